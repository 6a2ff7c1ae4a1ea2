use std::io::Write;

use rayon::prelude::*;

use crate::container::manifest::{Manifest, manifest_name};
use crate::domain::ReassemblyReport;
use crate::error::{PartError, Result};
use crate::options::ReassembleOptions;
use crate::reassemble::discover::{check_contiguous, discover};
use crate::reassemble::source::PartSource;

/// Concatenate `(index, bytes)` pairs in index order.
///
/// Arrival order does not matter; the indices must be exactly `0..n`.
pub fn assemble<I>(parts: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (u64, Vec<u8>)>,
{
    let mut parts: Vec<(u64, Vec<u8>)> = parts.into_iter().collect();
    parts.sort_by_key(|(i, _)| *i);
    let indices: Vec<u64> = parts.iter().map(|(i, _)| *i).collect();
    check_contiguous(&indices)?;
    let total = parts.iter().map(|(_, b)| b.len()).sum();
    let mut out = Vec::with_capacity(total);
    for (_, b) in parts {
        out.extend_from_slice(&b);
    }
    Ok(out)
}

/// Rebuild the artifact from every part `source` holds for the prefix.
pub fn reassemble(source: &dyn PartSource, opts: &ReassembleOptions) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    reassemble_into(source, opts, &mut out)?;
    Ok(out)
}

/// Like [`reassemble`], writing into `out`.
///
/// All parts are fetched, and checked against the manifest if there is one
/// (per part and as a whole), before the first byte reaches `out`. A failure
/// other than an I/O error on `out` itself leaves `out` untouched.
pub fn reassemble_into<W: Write>(
    source: &dyn PartSource,
    opts: &ReassembleOptions,
    mut out: W,
) -> Result<ReassemblyReport> {
    let refs = discover(source.list_names()?, &opts.prefix)?;
    let manifest = if opts.verify_manifest {
        load_manifest(source, &opts.prefix)?
    } else {
        None
    };

    // Fetch in parallel; collect keeps index order regardless of completion order.
    let parts: Vec<Vec<u8>> = refs
        .par_iter()
        .map(|r| {
            source.fetch(&r.name).map_err(|e| PartError::PartFetch {
                name: r.name.clone(),
                source: e,
            })
        })
        .collect::<Result<_>>()?;

    if let Some(m) = &manifest {
        m.check_parts(&parts)?;
    }

    let mut hasher = blake3::Hasher::new();
    let mut total_size = 0u64;
    for p in &parts {
        hasher.update(p);
        total_size += p.len() as u64;
    }
    let digest = *hasher.finalize().as_bytes();

    if let Some(m) = &manifest {
        m.check_artifact(total_size, &digest)?;
    }

    for p in &parts {
        out.write_all(p)?;
    }
    out.flush()?;

    tracing::info!(
        parts = refs.len(),
        total_size,
        manifest = manifest.is_some(),
        "reassembled artifact"
    );
    Ok(ReassemblyReport {
        parts: refs.len() as u64,
        total_size,
        blake3: digest,
        manifest_checked: manifest.is_some(),
    })
}

/// Reassemble into a sink to prove the part set is complete and consistent.
pub fn verify(source: &dyn PartSource, prefix: &str) -> Result<ReassemblyReport> {
    let opts = ReassembleOptions {
        prefix: prefix.to_string(),
        verify_manifest: true,
    };
    reassemble_into(source, &opts, std::io::sink())
}

fn load_manifest(source: &dyn PartSource, prefix: &str) -> Result<Option<Manifest>> {
    let name = manifest_name(prefix);
    match source.fetch(&name) {
        Ok(bytes) => Ok(Some(Manifest::from_json(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(manifest = %name, "no manifest, relying on part names");
            Ok(None)
        }
        Err(e) => Err(PartError::PartFetch { name, source: e }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PartPlan;
    use crate::reassemble::source_mem::MemPartSource;

    fn opts(prefix: &str) -> ReassembleOptions {
        ReassembleOptions {
            prefix: prefix.to_string(),
            verify_manifest: true,
        }
    }

    fn parts_of(data: &[u8], chunk: u64, with_manifest: bool) -> MemPartSource {
        let plan = PartPlan::new(data.len() as u64, chunk).unwrap();
        let mut src: MemPartSource = plan
            .ranges()
            .enumerate()
            .map(|(i, r)| (format!("p{i}"), data[r.start as usize..r.end as usize].to_vec()))
            .collect();
        if with_manifest {
            let m = Manifest::build("p", &plan, data);
            src.insert(manifest_name("p"), m.to_json().unwrap());
        }
        src
    }

    /// Fails every fetch of one name.
    struct Flaky {
        inner: MemPartSource,
        broken: &'static str,
    }

    impl PartSource for Flaky {
        fn list_names(&self) -> Result<Vec<String>> {
            self.inner.list_names()
        }
        fn fetch(&self, name: &str) -> std::io::Result<Vec<u8>> {
            if name == self.broken {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "fetch timed out",
                ));
            }
            self.inner.fetch(name)
        }
    }

    #[test]
    fn assemble_ignores_arrival_order() {
        let got = assemble(vec![(2, b"c".to_vec()), (0, b"a".to_vec()), (1, b"b".to_vec())]).unwrap();
        assert_eq!(got, b"abc");
    }

    #[test]
    fn assemble_of_nothing_is_empty() {
        assert!(assemble(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn assemble_rejects_gap() {
        let err = assemble(vec![(0, vec![1]), (2, vec![3])]).unwrap_err();
        assert!(matches!(err, PartError::ReassemblyGap { missing: 1, .. }));
    }

    #[test]
    fn reassembles_more_than_ten_parts() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let src = parts_of(&data, 70, false);
        assert_eq!(src.files.len(), 15);
        assert_eq!(reassemble(&src, &opts("p")).unwrap(), data);
    }

    #[test]
    fn zero_parts_is_an_empty_artifact() {
        let src = MemPartSource::new();
        let report = reassemble_into(&src, &opts("p"), std::io::sink()).unwrap();
        assert_eq!(report.parts, 0);
        assert_eq!(report.total_size, 0);
    }

    #[test]
    fn gap_writes_nothing() {
        let mut src = parts_of(&[9u8; 40], 10, false);
        src.files.remove("p2");
        let mut out = Vec::new();
        let err = reassemble_into(&src, &opts("p"), &mut out).unwrap_err();
        assert!(matches!(err, PartError::ReassemblyGap { missing: 2, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn fetch_failure_fails_the_whole_reassembly() {
        let src = Flaky {
            inner: parts_of(&[1u8; 30], 10, false),
            broken: "p1",
        };
        let mut out = Vec::new();
        let err = reassemble_into(&src, &opts("p"), &mut out).unwrap_err();
        match err {
            PartError::PartFetch { name, .. } => assert_eq!(name, "p1"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn manifest_catches_missing_trailing_part() {
        let mut src = parts_of(&[5u8; 35], 10, true);
        src.files.remove("p3");
        assert!(matches!(
            reassemble(&src, &opts("p")),
            Err(PartError::ManifestMismatch(_))
        ));

        let lenient = ReassembleOptions {
            verify_manifest: false,
            ..opts("p")
        };
        assert_eq!(reassemble(&src, &lenient).unwrap().len(), 30);
    }

    #[test]
    fn manifest_catches_swapped_content() {
        let data: Vec<u8> = (0..20u8).collect();
        let mut src = parts_of(&data, 10, true);
        let p0 = src.files.remove("p0").unwrap();
        let p1 = src.files.remove("p1").unwrap();
        src.insert("p0", p1);
        src.insert("p1", p0);
        assert!(matches!(
            reassemble(&src, &opts("p")),
            Err(PartError::ManifestMismatch(_))
        ));
    }

    #[test]
    fn wrong_artifact_digest_writes_nothing() {
        let data: Vec<u8> = (0..8u8).collect();
        let plan = PartPlan::new(8, 4).unwrap();
        let mut src = parts_of(&data, 4, false);
        let mut m = Manifest::build("p", &plan, &data);
        m.blake3 = "00".repeat(32);
        src.insert(manifest_name("p"), m.to_json().unwrap());

        let mut out = Vec::new();
        let err = reassemble_into(&src, &opts("p"), &mut out).unwrap_err();
        assert!(matches!(err, PartError::ManifestMismatch(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn wrong_total_size_writes_nothing() {
        let data: Vec<u8> = (0..8u8).collect();
        let plan = PartPlan::new(8, 4).unwrap();
        let mut src = parts_of(&data, 4, false);
        let mut m = Manifest::build("p", &plan, &data);
        m.total_size = 9;
        src.insert(manifest_name("p"), m.to_json().unwrap());

        let mut out = Vec::new();
        assert!(reassemble_into(&src, &opts("p"), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn verify_reports_digest() {
        let data = b"the quick brown fox".to_vec();
        let src = parts_of(&data, 4, true);
        let report = verify(&src, "p").unwrap();
        assert_eq!(report.parts, 5);
        assert_eq!(report.total_size, data.len() as u64);
        assert_eq!(report.blake3, *blake3::hash(&data).as_bytes());
        assert!(report.manifest_checked);
    }
}
