use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use edge_sets::{DEFAULT_MAX_SYSTEMS_WARNING, DEFAULT_SIMILARITY_THRESHOLD};

/// Settings for every subcommand, read from `vci.toml` in the working directory.
#[derive(Debug, PartialEq)]
pub struct VciConfiguration {
    /// The netconvert executable
    pub netconvert: String,
    pub max_systems_warning: usize,
    pub similarity_threshold: f64,
}

#[derive(Deserialize)]
struct RawVciConfiguration {
    pub netconvert: Option<String>,
    pub max_systems_warning: Option<usize>,
    pub similarity_threshold: Option<f64>,
}

pub fn load_configuration() -> Result<VciConfiguration> {
    load_configuration_from("vci.toml")
}

/// A missing file means defaults, but a file that can't be parsed is an error.
pub fn load_configuration_from<P: AsRef<Path>>(path: P) -> Result<VciConfiguration> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(default_configuration());
    }
    let text = fs_err::read_to_string(path)?;
    let config = toml::from_str::<RawVciConfiguration>(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!("Using settings from {}", path.display());
    Ok(fill_in_defaults(config))
}

fn default_configuration() -> VciConfiguration {
    VciConfiguration {
        netconvert: String::from("netconvert"),
        max_systems_warning: DEFAULT_MAX_SYSTEMS_WARNING,
        similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
    }
}

fn fill_in_defaults(config: RawVciConfiguration) -> VciConfiguration {
    let result = default_configuration();
    VciConfiguration {
        netconvert: config.netconvert.unwrap_or(result.netconvert),
        max_systems_warning: config
            .max_systems_warning
            .unwrap_or(result.max_systems_warning),
        similarity_threshold: config
            .similarity_threshold
            .unwrap_or(result.similarity_threshold),
    }
}
