//! Command line arguments.

use std::path::PathBuf;

use color_eyre::eyre::{bail, eyre};

pub const USAGE: &str = "\
Animated generative backdrops in the terminal

Usage: backdrop [OPTIONS]

Options:
  -c, --config <PATH>        Read the config from PATH
      --write-default-config Write the default config and exit
  -h, --help                 Print this help

Keys:
  q, Esc     quit
  Space      toggle starfield activity
  Tab        switch engine
  j/k, Up/Down, PageUp/PageDown  scroll the parallax offset
  r          remount the current engine";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub write_default_config: bool,
    pub help: bool,
}

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> color_eyre::Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    let path = args
                        .next()
                        .ok_or_else(|| eyre!("{arg} requires a path"))?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                "--write-default-config" => parsed.write_default_config = true,
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument: {other}\n\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}
