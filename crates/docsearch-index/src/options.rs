//! Index construction and query options.

use docsearch_config::Config;
use serde::Serialize;

use crate::schema::boost;

/// Default length at which tokens stop being fuzzy matched.
pub const DEFAULT_MAX_FUZZY_TOKEN_LEN: usize = 20;

/// Per-field ranking weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldBoosts {
    /// Title field weight.
    pub title: f32,
    /// Content field weight.
    pub content: f32,
    /// Url field weight.
    pub url: f32,
}

impl Default for FieldBoosts {
    fn default() -> Self {
        Self {
            title: boost::TITLE,
            content: boost::CONTENT,
            url: boost::URL,
        }
    }
}

/// Options controlling analysis and ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexOptions {
    /// Stemmer language name.
    pub stemmer: String,
    /// Per-field ranking weights.
    pub boosts: FieldBoosts,
    /// Multiplier applied to exact-term clauses.
    pub exact_boost: f32,
    /// Tokens at least this many characters long are not fuzzy matched.
    pub max_fuzzy_token_len: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            stemmer: String::from("english"),
            boosts: FieldBoosts::default(),
            exact_boost: boost::EXACT,
            max_fuzzy_token_len: DEFAULT_MAX_FUZZY_TOKEN_LEN,
        }
    }
}

impl IndexOptions {
    /// Builds options from the `[search]` section of a resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        let search = &config.search;
        Self {
            stemmer: search.stemmer.clone(),
            boosts: FieldBoosts {
                title: search.title_boost,
                content: search.content_boost,
                url: search.url_boost,
            },
            exact_boost: search.exact_boost,
            max_fuzzy_token_len: search.max_fuzzy_token_len,
        }
    }
}
