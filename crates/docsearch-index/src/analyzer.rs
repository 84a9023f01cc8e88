//! Text analysis pipeline for the docsearch index.
//!
//! Implements a five-stage text analysis pipeline:
//! 1. `SeparatorTokenizer` - splits on whitespace and `/`, trims punctuation from token edges
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than 40 bytes
//! 4. `StopWordFilter` - drops the language's stop words (index side only)
//! 5. `Stemmer` - applies language-specific stemming
//!
//! Queries skip the stop word filter, so a lone stop word still reaches the wildcard stage.
//! Languages without a stop word list are indexed unfiltered.
//!
//! The stemmer language is configurable via the `stemmer` setting in `.docsearch.toml`.

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, Stemmer, StopWordFilter, TextAnalyzer, TokenStream,
};

use crate::{IndexError, tokenizer::SeparatorTokenizer};

/// Name of the custom tokenizer registered with Tantivy.
pub const DOC_TOKENIZER: &str = "docsearch_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Parses a stemmer language string into a Tantivy `Language`.
///
/// Supports lowercase language names matching Tantivy's `Language` enum.
pub fn parse_language(name: &str) -> Result<Language, IndexError> {
    match name.to_lowercase().as_str() {
        "arabic" => Ok(Language::Arabic),
        "danish" => Ok(Language::Danish),
        "dutch" => Ok(Language::Dutch),
        "english" => Ok(Language::English),
        "finnish" => Ok(Language::Finnish),
        "french" => Ok(Language::French),
        "german" => Ok(Language::German),
        "greek" => Ok(Language::Greek),
        "hungarian" => Ok(Language::Hungarian),
        "italian" => Ok(Language::Italian),
        "norwegian" => Ok(Language::Norwegian),
        "portuguese" => Ok(Language::Portuguese),
        "romanian" => Ok(Language::Romanian),
        "russian" => Ok(Language::Russian),
        "spanish" => Ok(Language::Spanish),
        "swedish" => Ok(Language::Swedish),
        "tamil" => Ok(Language::Tamil),
        "turkish" => Ok(Language::Turkish),
        other => Err(IndexError::InvalidLanguage(other.to_string())),
    }
}

/// Builds the index-time analyzer with the specified stemmer language.
pub fn build_analyzer(language: Language) -> TextAnalyzer {
    let builder = TextAnalyzer::builder(SeparatorTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH));
    match StopWordFilter::new(language) {
        Some(stop_words) => builder
            .filter(stop_words)
            .filter(Stemmer::new(language))
            .build(),
        None => builder.filter(Stemmer::new(language)).build(),
    }
}

/// Builds the query-time analyzer: the index pipeline without stop word removal.
pub fn build_query_analyzer(language: Language) -> TextAnalyzer {
    TextAnalyzer::builder(SeparatorTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(Stemmer::new(language))
        .build()
}

/// Builds the index-time analyzer from a language name string.
pub fn build_analyzer_from_name(language_name: &str) -> Result<TextAnalyzer, IndexError> {
    let language = parse_language(language_name)?;
    Ok(build_analyzer(language))
}

/// Runs the analyzer over `text`, returning each analyzed term with its byte range.
pub(crate) fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<(String, usize, usize)> {
    let mut stream = analyzer.token_stream(text);
    let mut out = Vec::new();
    while let Some(token) = stream.next() {
        out.push((token.text.clone(), token.offset_from, token.offset_to));
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn terms(text: &str) -> Vec<String> {
        let mut analyzer = build_analyzer(Language::English);
        analyze(&mut analyzer, text)
            .into_iter()
            .map(|(t, _, _)| t)
            .collect()
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(parse_language("English").unwrap(), Language::English);
        assert_eq!(parse_language("FRENCH").unwrap(), Language::French);
        assert_eq!(parse_language("tamil").unwrap(), Language::Tamil);
    }

    #[test]
    fn parse_invalid_language() {
        let err = parse_language("klingon").unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn analyzer_lowercases_and_stems() {
        assert_eq!(terms("HELLO Running"), vec!["hello", "run"]);
    }

    #[test]
    fn index_analyzer_drops_stop_words() {
        assert_eq!(terms("Connect the motor to the board"), vec!["connect", "motor", "board"]);
    }

    #[test]
    fn query_analyzer_keeps_stop_words() {
        let mut analyzer = build_query_analyzer(Language::English);
        let analyzed: Vec<String> = analyze(&mut analyzer, "the motor")
            .into_iter()
            .map(|(t, _, _)| t)
            .collect();
        assert_eq!(analyzed, vec!["the", "motor"]);
    }

    #[test]
    fn languages_without_stop_words_still_analyze() {
        let mut analyzer = build_analyzer(Language::Tamil);
        assert_eq!(analyze(&mut analyzer, "the").len(), 1);
    }

    #[test]
    fn analyzer_removes_long_tokens() {
        let long_token = "a".repeat(50);
        assert_eq!(terms(&format!("short {long_token} word")), vec!["short", "word"]);
    }

    #[test]
    fn analyzer_keeps_inner_punctuation() {
        assert_eq!(
            terms("(FOC) apps/docs hardware_setup.html"),
            vec!["foc", "app", "doc", "hardware_setup.html"]
        );
    }

    #[test]
    fn offsets_cover_surface_text() {
        let mut analyzer = build_analyzer(Language::English);
        let text = "Motors, running.";
        let analyzed = analyze(&mut analyzer, text);
        assert_eq!(&text[analyzed[0].1..analyzed[0].2], "Motors");
        assert_eq!(&text[analyzed[1].1..analyzed[1].2], "running");
    }

    #[test]
    fn build_from_invalid_name() {
        let Err(err) = build_analyzer_from_name("invalid") else {
            panic!("expected error");
        };
        assert!(err.to_string().contains("invalid"));
    }
}
