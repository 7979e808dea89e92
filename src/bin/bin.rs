use anyhow::Result;
use log::{error, info};
use logstats::{Outcome, ResolvedInput, UnmatchedLog};
use std::{io, path::PathBuf};
use structopt::StructOpt;

/// Count unique client IPs and the busiest IPs and urls in an access log.
#[derive(StructOpt)]
struct Options {
    /// Where to append lines that have no IP address
    #[structopt(short, long, env = "UNMATCHED_LOG", default_value = "unmatchedIPs.log", parse(from_os_str))]
    unmatched_log: PathBuf,
    /// Access log to read. Asked for interactively when left out
    #[structopt(parse(from_os_str))]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load from .env file if it is present
    dotenv::dotenv().ok();
    // Initialize logging, showing diagnostics unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // Get command line arguments
    let options = Options::from_args();

    // Work out which file to read
    let input = match options.file {
        Some(file) => ResolvedInput::from_argument(file),
        None => {
            let prompted = tokio::task::spawn_blocking(|| ResolvedInput::from_prompt(io::stdin().lock(), io::stdout()));
            match prompted.await? {
                Ok(input) => input,
                Err(error) => {
                    error!("Error reading file path: {}", error);
                    return Ok(());
                }
            }
        }
    };
    if let Err(error) = input.check_access().await {
        error!("{}", error);
        return Ok(());
    }

    let mut unmatched = UnmatchedLog::new(options.unmatched_log);
    match logstats::parse_file(input.path(), &mut unmatched).await {
        Ok(Outcome::Summary(summary)) => {
            println!("{}", summary);
            info!("Processing completed.");
        }
        Ok(Outcome::Empty) => error!("File is empty: {}", input.path().display()),
        Err(error) => error!("{:#}", anyhow::Error::from(error)),
    }

    Ok(())
}
