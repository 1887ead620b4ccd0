use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Provider descriptor (JSON) to use instead of the configured one
    #[clap(long, global = true)]
    pub providers: Option<String>,

    /// Log debug output
    #[clap(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch oEmbed data for a url and print it
    Fetch {
        /// a url
        url: String,
    },

    /// Show which endpoint (or discovery endpoints) a url resolves to
    Resolve {
        /// a url
        url: String,
    },

    /// List known providers
    Providers {
        /// Only list discovery endpoints, in the order they are tried
        #[clap(long, default_value = "false")]
        discovery: bool,
    },
}

/// Reject anything that isn't an absolute http(s) url.
pub fn validate_url(url: &str) -> anyhow::Result<()> {
    let parsed = url::Url::parse(url).map_err(|e| anyhow::anyhow!("invalid url {url:?}: {e}"))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => anyhow::bail!("unsupported url scheme '{scheme}'"),
    }
}
