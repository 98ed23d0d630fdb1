use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Values supplied on the command line, applied on top of the file config
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_url: Option<String>,
    pub base_url: Option<String>,
    pub max_links: Option<usize>,
    pub max_concurrency: Option<usize>,
    pub sitemap_path: Option<String>,
}

impl ConfigOverrides {
    /// Applies every set override to the configuration
    pub fn apply(self, config: &mut Config) {
        if let Some(target) = self.target_url {
            config.crawler.target_url = Some(target);
        }
        if let Some(base) = self.base_url {
            config.crawler.base_url = Some(base);
        }
        if let Some(max_links) = self.max_links {
            config.crawler.max_links = max_links;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.crawler.max_concurrency = max_concurrency;
        }
        if let Some(path) = self.sitemap_path {
            config.output.sitemap_path = path;
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// The file is only parsed here; validation runs in [`resolve_config`] once
/// command-line overrides have been applied.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitemapper::config::load_config;
///
/// let config = load_config(Path::new("sitemapper.toml")).unwrap();
/// println!("Max links: {}", config.crawler.max_links);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Builds the effective configuration
///
/// Starts from the file at `path` (or the defaults when no file is given),
/// applies the overrides and validates the result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    overrides.apply(&mut config);
    validate(&config)?;

    Ok(config)
}
