use anyhow::Context;
use clap::Parser;
use gazetteer::{Cli, CsvSource, LocationCatalog, MatchResponse, Matcher, MatcherConfig};
use std::io::BufRead;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    gazetteer::trace_init();

    let mut source = CsvSource::new(cli.catalog.clone());
    let catalog = LocationCatalog::load(&mut source)
        .with_context(|| format!("Unable to load locations from {:?}.", cli.catalog))?;
    info!("Gazetteer ready: {} records.", catalog.len());

    let config = MatcherConfig::from_env();
    let matcher = Matcher::new(&catalog, config);

    if let Some(address) = &cli.address {
        resolve_one(&matcher, &catalog, address, cli.pretty)?;
    } else if cli.stdin {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            resolve_one(&matcher, &catalog, &line, cli.pretty)?;
        }
    } else {
        anyhow::bail!("Provide --address or --stdin.");
    }
    Ok(())
}

fn resolve_one(
    matcher: &Matcher,
    catalog: &LocationCatalog,
    address: &str,
    pretty: bool,
) -> anyhow::Result<()> {
    let result = matcher.resolve(address.trim());
    info!(
        "Selected strategy: {} at {}.",
        result.selected_strategy(),
        result.selected_confidence()
    );
    let response = MatchResponse::build(&result, catalog);
    let body = if pretty {
        response.to_json_pretty()?
    } else {
        response.to_json()?
    };
    println!("{body}");
    Ok(())
}
