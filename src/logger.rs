use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::path::Path;

/// Send `log` output to `path`, filtered by `RUST_LOG` (default `info`).
///
/// The terminal belongs to the game screen, so logs never go to stdout or
/// stderr.
pub fn init_file_logger(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;

    Ok(())
}
