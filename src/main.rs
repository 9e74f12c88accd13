use clap::Parser;
use geoloc_util::utils::{logger, validation::Validate};
use geoloc_util::{BatchReport, BatchResolver, CliConfig, OpenWeatherGeocoder};

async fn resolve(cli: &CliConfig) -> geoloc_util::Result<BatchReport> {
    let config = cli.geocoder_config()?;
    config.validate()?;

    let resolver = BatchResolver::new(OpenWeatherGeocoder::new(config)?);
    resolver.run(cli.locations.as_slice()).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting geoloc-util");
    if cli.verbose {
        tracing::debug!("Locations: {:?}", cli.locations);
    }

    let report = match resolve(&cli).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("❌ Location lookup failed: {}", e);
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            return Err(e.into());
        }
    };

    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }
    for record in &report.records {
        println!("{}", record);
    }

    Ok(())
}
