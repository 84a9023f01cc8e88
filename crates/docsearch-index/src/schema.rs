//! Index schema definition for the docsearch index.
//!
//! Defines the Tantivy schema with one document per corpus record:
//! - `id`: Corpus key (raw string, stored)
//! - `title`: Section title (text, stored, boosted 200x)
//! - `content`: Plain-text body (text, stored, boosted 2x)
//! - `url`: Record URL (text, stored, boosted 1x)

use tantivy::schema::{
    Field, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::DOC_TOKENIZER;

/// Default field boost weights for search ranking.
pub mod boost {
    /// Title field boost (200x).
    pub const TITLE: f32 = 200.0;
    /// Content field boost (2x).
    pub const CONTENT: f32 = 2.0;
    /// Url field boost (1x).
    pub const URL: f32 = 1.0;
    /// Extra multiplier applied to exact-term clauses (10x).
    pub const EXACT: f32 = 10.0;
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Corpus key.
    pub id: Field,
    /// Section title.
    pub title: Field,
    /// Record body.
    pub content: Field,
    /// Record URL as generated.
    pub url: Field,
}

/// Options shared by the tokenized fields.
fn text_options() -> TextOptions {
    TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(DOC_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored()
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let id = builder.add_text_field("id", STRING | STORED);
        let title = builder.add_text_field("title", text_options());
        let content = builder.add_text_field("content", text_options());
        let url = builder.add_text_field("url", text_options());

        Self {
            schema: builder.build(),
            id,
            title,
            content,
            url,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the searchable fields with their names.
    pub fn text_fields(&self) -> [(&'static str, Field); 3] {
        [
            ("title", self.title),
            ("content", self.content),
            ("url", self.url),
        ]
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
