use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use homedir::my_home;
use serde::{Deserialize, Serialize};

use crate::oembed::Registry;

const CONFIG_FILE: &str = "config.yaml";

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT_DEFAULT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Provider descriptor to use instead of the bundled one
    #[serde(default)]
    pub providers_path: Option<String>,

    /// Upper bound for a single oEmbed request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Proxy for all requests (http, https or socks5 url)
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers_path: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: USER_AGENT_DEFAULT.to_string(),
            proxy: None,
            base_path: PathBuf::new(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    USER_AGENT_DEFAULT.to_string()
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        if let Some(proxy) = self.proxy.as_deref().filter(|p| !p.is_empty()) {
            let parsed = url::Url::parse(proxy).with_context(|| format!("proxy {proxy:?} is not a valid url"))?;
            if !["http", "https", "socks5", "socks5h"].contains(&parsed.scheme()) {
                bail!("proxy scheme '{}' is not supported", parsed.scheme());
            }
        }

        Ok(())
    }

    /// Directory holding `config.yaml`: `$OEMBED_BASE_PATH`, else `~/.config/oembed`.
    pub fn base_path() -> Result<PathBuf> {
        if let Ok(base_path) = std::env::var("OEMBED_BASE_PATH") {
            return Ok(PathBuf::from(base_path));
        }

        let home = my_home()
            .context("could not determine home directory")?
            .context("home directory path is empty")?;

        Ok(home.join(".config").join("oembed"))
    }

    pub fn load() -> Result<Self> {
        Self::load_with(Self::base_path()?)
    }

    pub fn load_with(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref();
        let path = base_path.join(CONFIG_FILE);

        // create new if does not exist
        if !path.exists() {
            std::fs::create_dir_all(base_path)
                .with_context(|| format!("failed to create {base_path:?}"))?;
            std::fs::write(&path, serde_yml::to_string(&Self::default())?)
                .with_context(|| format!("failed to write {path:?}"))?;
        }

        let config_str =
            std::fs::read_to_string(&path).with_context(|| format!("failed to read {path:?}"))?;
        let mut config: Self =
            serde_yml::from_str(&config_str).with_context(|| format!("{path:?} is malformed"))?;

        config.base_path = base_path.to_path_buf();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = self.base_path.join(CONFIG_FILE);
        let config_str = serde_yml::to_string(&self)?;

        std::fs::write(&path, config_str).with_context(|| format!("failed to write {path:?}"))
    }

    /// Load the provider registry this config points at.
    ///
    /// Relative `providers_path` values are taken from the config directory.
    pub fn load_registry(&self) -> Result<Registry> {
        let registry = match &self.providers_path {
            Some(path) => {
                let path = self.base_path.join(path);
                Registry::from_path(&path)
                    .with_context(|| format!("failed to load providers from {path:?}"))?
            }
            None => Registry::bundled().context("failed to load bundled providers")?,
        };

        log::debug!("{} oEmbed providers loaded", registry.len());
        Ok(registry)
    }
}
