use crate::commands::Cli;
use crate::config::PersistedDefaults;
use crate::cue::CueParser;
use crate::cue::fs::resolve_cue_path;
use crate::dispatch::dispatch;
use crate::options::validate;
use crate::probe::HeaderProber;
use crate::split::CueSplitter;
use crate::util::quote;
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::ops::ControlFlow;

mod cd;
mod commands;
mod config;
mod cue;
mod dispatch;
mod formats;
mod options;
mod probe;
mod report;
mod split;
mod util;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print()?;
            std::process::exit(code);
        }
    };

    let defaults = PersistedDefaults::from_env()?;
    let options = validate(cli.raw_options(), &defaults)?;

    let cue_path = resolve_cue_path(&cli.cue).await?;
    // a directory was searched for the sheet
    if options.dry_run && cue_path != cli.cue {
        info!("Using cue file {}", quote(&cue_path.to_string_lossy()));
    }

    let ignore_errors = options.ignore_errors;
    let cue_sheet = CueParser::new(&cue_path)
        .with_encoding(options.coding.as_deref())
        .parse(|err| {
            error!("{}: {err}", err.line().unwrap_or_default());
            if ignore_errors {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
        .await?;

    let splitter = CueSplitter::new(&cue_sheet, &options);
    let mut stdout = std::io::stdout().lock();
    dispatch(&cue_sheet, &options, &HeaderProber, &splitter, &mut stdout)?;

    Ok(())
}
