//! Rendering options.

use std::time::Duration;

use docsearch_config::Config;

/// Controls how results are batched and previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Results appended per tick.
    pub batch_size: usize,
    /// Delay between ticks.
    pub batch_interval: Duration,
    /// Content previews shown per result.
    pub max_previews: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_interval: Duration::from_millis(100),
            max_previews: 3,
        }
    }
}

impl RenderOptions {
    /// Builds options from the `[render]` section of a resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.render.batch_size,
            batch_interval: Duration::from_millis(config.render.batch_millis),
            max_previews: config.render.max_previews,
        }
    }
}
