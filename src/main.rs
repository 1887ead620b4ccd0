use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use oembed_resolver::config::Config;
use oembed_resolver::oembed::{HttpTransport, OembedFetcher, Registry};
use tracing_subscriber::EnvFilter;

mod cli;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_logging(args.verbose);

    let config = Config::load()?;

    let registry = match &args.providers {
        Some(path) => Registry::from_path(path)
            .with_context(|| format!("failed to load providers from {path:?}"))?,
        None => config.load_registry()?,
    };
    let registry = Arc::new(registry);

    match args.command {
        cli::Command::Providers { discovery } => {
            if discovery {
                let mut endpoints: Vec<_> = registry.discovery_endpoints().collect();
                endpoints.reverse();
                for (provider, endpoint) in endpoints {
                    println!("{}\t{}", provider.name, endpoint.url);
                }
                return Ok(());
            }

            for provider in registry.providers() {
                println!("{}", provider.name);
                for endpoint in &provider.endpoints {
                    let discovery = if endpoint.discovery { " (discovery)" } else { "" };
                    println!("  {}{discovery}", endpoint.url);
                    for scheme in &endpoint.schemes {
                        println!("    {}", scheme.as_str());
                    }
                }
            }
            Ok(())
        }

        cli::Command::Resolve { url } => {
            cli::validate_url(&url)?;
            let resolution = registry.resolve(&url)?;
            println!("{}", serde_json::to_string_pretty(&resolution)?);
            Ok(())
        }

        cli::Command::Fetch { url } => {
            cli::validate_url(&url)?;

            let transport = HttpTransport::new(&config).context("failed to build http client")?;
            let fetcher = OembedFetcher::new(registry, transport);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            // dropping the lookup on ctrl-c cancels the request in flight
            let data = runtime.block_on(async {
                tokio::select! {
                    result = fetcher.fetch_oembed_data(&url) => result.map_err(anyhow::Error::from),
                    _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("interrupted")),
                }
            })?;

            log::info!("{url}: oEmbed data fetched ({})", data.kind().unwrap_or("unknown type"));
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        }
    }
}
