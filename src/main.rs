use byte_unit::Byte;
use clap::Parser;
use probe_input::{ProbeInput, ReaderSource};
use probe_sniff::{detect_format, FormatKind};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Files or directories to probe
    paths: Vec<PathBuf>,
    /// Min file size to probe.
    /// Files below this size are skipped
    #[clap(long, default_value = "1b")]
    min_size: Byte,
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env()?;
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_file(false))
        .with(env_filter)
        .init();

    let args = Args::parse();

    let files = collect_files(&args.paths);
    let identified: usize = files
        .par_iter()
        .map(|path| match probe(path, args.min_size) {
            Ok(Some((kind, size))) => {
                info!("{}: {kind} ({:#.1})", path.display(), Byte::from_u64(size));
                1
            }
            Ok(None) => 0,
            Err(e) => {
                warn!("Failed to probe {}: {e}", path.display());
                0
            }
        })
        .sum();
    info!("All done. Identified {identified} of {} files", files.len());
    Ok(())
}

fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        files.push(entry.path().to_path_buf())
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Failed to walk {}: {e}", path.display()),
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn probe(path: &Path, min_size: Byte) -> anyhow::Result<Option<(FormatKind, u64)>> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size < min_size {
        return Ok(None);
    }
    let reader = BufReader::with_capacity(1024 * 1024, file);
    let mut input = ProbeInput::new(ReaderSource::new(reader));
    let kind = detect_format(&mut input)?;
    Ok(Some((kind, size)))
}
