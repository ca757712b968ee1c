mod cli;
mod display;
mod engine;
mod logging;
mod model;
mod orchestrator;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.log_file.as_deref());
    let is_headless = args.is_headless();

    match cli::run(args).await {
        Ok(()) => {
            tracing::info!("timer exited");
            // Exit explicitly in headless modes: a pending stdin read would
            // otherwise hold up runtime shutdown.
            if is_headless {
                std::process::exit(0);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "timer failed");
            if is_headless {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
            Err(e)
        }
    }
}
