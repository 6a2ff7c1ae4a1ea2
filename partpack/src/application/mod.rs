pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use partpack_core::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    dispatch(cli.command)
}

pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Split {
            source,
            out_dir,
            prefix,
            chunk_size,
            manifest,
        } => handlers::handle_split(source, out_dir, prefix, chunk_size, manifest),
        Commands::Reassemble {
            dir,
            out,
            prefix,
            no_verify,
        } => handlers::handle_reassemble(dir, out, prefix, no_verify),
        Commands::Verify { dir, prefix } => handlers::handle_verify(dir, prefix),
        Commands::List { dir, prefix } => handlers::handle_list(dir, prefix),
        Commands::CopyShim { dest_dir, goroot } => handlers::handle_copy_shim(dest_dir, goroot),
        Commands::RewriteHtml {
            html,
            url,
            from,
            remove_artifact,
        } => handlers::handle_rewrite_html(html, url, from, remove_artifact),
    }
}
