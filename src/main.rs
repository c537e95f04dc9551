//! logvault - leveled, persistent application logger
//!
//! Usage:
//!   logvault write --level info "message"    Append one message
//!   logvault export --limit 100              Print recent entries
//!   logvault export-file                     Write recent entries to a file
//!   logvault --threshold error <command>     Apply a severity threshold

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use logvault::{Callsite, Config, Logger};

fn main() -> logvault::Result<()> {
    let cli = Cli::parse();
    logvault::init_tracing(cli.verbose);

    let mut config = Config::default();
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(threshold) = cli.threshold {
        config.level = threshold;
    }

    let logger = Logger::new(config)?;

    match cli.command {
        Command::Write { level, message } => {
            logger.log(message, level, Callsite::default());
            logger.flush();
        }
        Command::Export { limit } => {
            println!("{}", logger.export_text(limit));
        }
        Command::ExportFile { limit } => match logger.export_file(limit).recv() {
            Ok(Ok(path)) => println!("Exported to {}", path.display()),
            Ok(Err(e)) => eprintln!("Export failed: {}", e),
            Err(_) => eprintln!("Export worker terminated"),
        },
    }

    Ok(())
}
