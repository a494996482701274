//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file in the
//! platform data directory. `RUST_LOG` picks the level, `warn` by default.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};

const LOG_FILE: &str = "backdrop.log";

/// Install the logger. Returns the log file path, or `None` when the
/// platform has no data directory and logging stays disabled.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dirs) = ProjectDirs::from("", "", "backdrop") else {
        return Ok(None);
    };
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("could not create log directory {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("could not open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("could not install the logger")?;
    Ok(Some(path))
}
