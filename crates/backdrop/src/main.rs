use backdrop_config::Config;
use color_eyre::eyre::WrapErr;

mod app;
mod cli;
mod logging;
mod widget;

use app::App;
use cli::Args;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let path = match args.config_path {
        Some(path) => path,
        None => Config::default_path()?,
    };
    if args.write_default_config {
        Config::default()
            .save(&path)
            .wrap_err("could not write the default config")?;
        println!("wrote default config to {}", path.display());
        return Ok(());
    }
    let config = Config::load(&path)?;

    if let Some(log_path) = logging::init()? {
        log::info!("logging to {}", log_path.display());
    }

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}
