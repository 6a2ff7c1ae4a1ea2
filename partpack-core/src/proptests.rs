//! Property tests for the split/reassemble laws:
//!
//! - part count is `ceil(len / chunk)` and every part respects the bound
//! - reassembling the parts of any artifact returns the artifact
//! - splitting twice leaves the same part set behind

use std::fs;

use proptest::prelude::*;

use crate::options::{ReassembleOptions, SplitOptions};
use crate::plan::PartPlan;
use crate::reassemble::assemble::{assemble, reassemble};
use crate::reassemble::source_fs::FsPartSource;
use crate::split::writer::split;

fn options(chunk_size: u64) -> SplitOptions {
    SplitOptions {
        prefix: "main.wasm.part".into(),
        chunk_size,
        write_manifest: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn plan_tiles_the_artifact(len in 0u64..100_000, chunk in 1u64..10_000) {
        let plan = PartPlan::new(len, chunk).unwrap();
        prop_assert_eq!(plan.num_parts(), len.div_ceil(chunk));
        let mut next = 0;
        for r in plan.ranges() {
            prop_assert_eq!(r.start, next);
            prop_assert!(r.end > r.start);
            prop_assert!(r.end - r.start <= chunk);
            next = r.end;
        }
        prop_assert_eq!(next, len);
    }

    #[test]
    fn assemble_undoes_slicing(
        data in prop::collection::vec(any::<u8>(), 0..2048),
        chunk in 1u64..300,
    ) {
        let plan = PartPlan::new(data.len() as u64, chunk).unwrap();
        let mut parts: Vec<(u64, Vec<u8>)> = plan
            .ranges()
            .enumerate()
            .map(|(i, r)| (i as u64, data[r.start as usize..r.end as usize].to_vec()))
            .collect();
        parts.reverse();
        prop_assert_eq!(assemble(parts).unwrap(), data);
    }

    #[test]
    fn split_then_reassemble_on_disk(
        data in prop::collection::vec(any::<u8>(), 1..4096),
        pick in 0usize..5,
    ) {
        let len = data.len() as u64;
        let chunk = [1, len, (len - 1).max(1), len + 1, u64::MAX][pick];

        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("main.wasm");
        fs::write(&src, &data).unwrap();
        let out = tmp.path().join("build");

        let report = split(&src, &out, &options(chunk)).unwrap();
        prop_assert_eq!(report.num_chunks(), len.div_ceil(chunk));

        let got = reassemble(&FsPartSource::new(&out), &ReassembleOptions::default()).unwrap();
        prop_assert_eq!(got, data);
    }

    #[test]
    fn splitting_twice_is_idempotent(
        data in prop::collection::vec(any::<u8>(), 0..1024),
        chunk in 1u64..200,
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("main.wasm");
        fs::write(&src, &data).unwrap();
        let out = tmp.path().join("build");

        split(&src, &out, &options(chunk)).unwrap();
        let first = snapshot(&out);
        split(&src, &out, &options(chunk)).unwrap();
        prop_assert_eq!(snapshot(&out), first);
    }
}

fn snapshot(dir: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    let mut v: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    v.sort();
    v
}
