//! CRFsuite Dump Decoder

use clap::Parser;
use crfsuite_dump::{Config, Result, VERSION, cli, init_logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::load()?
    };

    // The command line wins over the config file
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level);

    tracing::info!("CRFsuite Dump Decoder v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    cli::execute(args, config)?;

    Ok(())
}
