mod config;
mod fetcher;
mod models;
mod parser;
mod telemetry;
mod updater;

use std::path::Path;

use anyhow::Result;

use crate::fetcher::HttpFetcher;

fn main() -> Result<()> {
    telemetry::init_tracing();

    let fetcher = HttpFetcher::new()?;
    updater::run(Path::new(config::OFFERS_PATH), &fetcher)?;
    Ok(())
}
