//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The configured corpus file does not exist.
    CorpusMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// A field boost is zero or negative.
    NonPositiveBoost {
        /// Name of the boost setting.
        field: &'static str,
        /// Configured value.
        value: f32,
    },
    /// Content matches would outrank title matches.
    ContentOutranksTitle {
        /// Configured title boost.
        title: f32,
        /// Configured content boost.
        content: f32,
    },
    /// A render batch size of zero, which renders as batches of one.
    ZeroBatchSize,
    /// Results are rendered without content previews.
    NoPreviews,
    /// The base URL lacks its trailing slash, so URL rewriting would leave a stray segment.
    BaseUrlWithoutSlash {
        /// Configured base URL.
        base_url: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorpusMissing { path } => write!(f, "corpus file does not exist: {path}"),
            Self::NonPositiveBoost { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::ContentOutranksTitle { title, content } => write!(
                f,
                "content_boost ({content}) is not below title_boost ({title}); title matches will not rank first"
            ),
            Self::ZeroBatchSize => {
                write!(f, "render.batch_size is 0; results render one per batch")
            }
            Self::NoPreviews => write!(f, "render.max_previews is 0; results have no excerpts"),
            Self::BaseUrlWithoutSlash { base_url } => {
                write!(f, "site.base_url should end with '/': {base_url}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if let Some(ref corpus) = config.site.corpus
        && !corpus.is_file()
    {
        warnings.push(ConfigWarning::CorpusMissing {
            path: corpus.display().to_string(),
        });
    }

    if !config.site.base_url.ends_with('/') {
        warnings.push(ConfigWarning::BaseUrlWithoutSlash {
            base_url: config.site.base_url.clone(),
        });
    }

    let search = &config.search;
    for (field, value) in [
        ("title_boost", search.title_boost),
        ("content_boost", search.content_boost),
        ("url_boost", search.url_boost),
        ("exact_boost", search.exact_boost),
    ] {
        if value <= 0.0 {
            warnings.push(ConfigWarning::NonPositiveBoost { field, value });
        }
    }

    if search.content_boost >= search.title_boost {
        warnings.push(ConfigWarning::ContentOutranksTitle {
            title: search.title_boost,
            content: search.content_boost,
        });
    }

    if config.render.batch_size == 0 {
        warnings.push(ConfigWarning::ZeroBatchSize);
    }
    if config.render.max_previews == 0 {
        warnings.push(ConfigWarning::NoPreviews);
    }

    warnings
}
