//! Runtime settings: the rate profile and the diagram dimensions.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `RBD_`-prefixed environment variables using `__`
//! as the nesting separator.
//!
//! `[layout]` keys merge over the default dimensions one by one. A `[rates]`
//! table in the file replaces the built-in profile as a whole: it must carry
//! a `node` entry, and any kind it leaves out falls back to the node rates.
//! Environment variables still override single rate fields on top of either.
//!
//! ```toml
//! [rates.node]
//! lambda = 0.003678
//! mu = 1.1367382
//!
//! [layout]
//! canvas_width = 737.0
//! horizontal_gap = 20.0
//! ```
//!
//! ```bash
//! RBD_RATES__LINK__LAMBDA=0.0002 trace-rbd --file tr.txt
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;
use crate::model::RateTable;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "RBD";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rates: RateTable,
    pub layout: LayoutConfig,
}

/// Default layer used when the file brings its own rate profile.
#[derive(Serialize)]
struct LayoutOnly<'a> {
    layout: &'a LayoutConfig,
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file = path
            .map(|path| {
                Config::builder()
                    .add_source(File::from(path))
                    .build()
                    .with_context(|| format!("failed to read settings from {}", path.display()))
            })
            .transpose()?;
        let file_has_rates = file
            .as_ref()
            .is_some_and(|file| file.get_table("rates").is_ok());

        let defaults = Settings::default();
        let defaults = if file_has_rates {
            Config::try_from(&LayoutOnly {
                layout: &defaults.layout,
            })?
        } else {
            Config::try_from(&defaults)?
        };

        let mut builder = Config::builder().add_source(defaults);
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        let settings: Settings = builder
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
            .context("invalid settings")?;

        settings.layout.validate().context("invalid layout settings")?;
        Ok(settings)
    }
}
