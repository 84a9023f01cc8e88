//! Tokenizer splitting on whitespace and path separators.
//!
//! Corpus content mixes prose with URLs and file paths, so `/` separates tokens just like
//! whitespace does. Each raw token is then trimmed of leading and trailing non-word
//! characters: `Setup.` becomes `Setup`, `(FOC)` becomes `FOC`, and a lone `|` vanishes.

use std::str::CharIndices;

use tantivy::tokenizer::{Token, TokenStream, Tokenizer};

/// Tokenizer that splits on whitespace and `/`, trimming punctuation from token edges.
#[derive(Clone, Default)]
pub struct SeparatorTokenizer {
    /// Token reused across streams.
    token: Token,
}

/// Token stream produced by [`SeparatorTokenizer`].
pub struct SeparatorTokenStream<'a> {
    /// Text being tokenized.
    text: &'a str,
    /// Remaining characters.
    chars: CharIndices<'a>,
    /// Current token.
    token: &'a mut Token,
}

impl Tokenizer for SeparatorTokenizer {
    type TokenStream<'a> = SeparatorTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> SeparatorTokenStream<'a> {
        self.token.reset();
        SeparatorTokenStream {
            text,
            chars: text.char_indices(),
            token: &mut self.token,
        }
    }
}

/// Characters that end a token.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '/'
}

/// Characters kept at token edges.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl SeparatorTokenStream<'_> {
    /// Consumes characters up to and including the next separator, returning the raw end.
    fn raw_token_end(&mut self) -> usize {
        (&mut self.chars)
            .find(|(_, c)| is_separator(*c))
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

impl TokenStream for SeparatorTokenStream<'_> {
    fn advance(&mut self) -> bool {
        self.token.text.clear();
        self.token.position = self.token.position.wrapping_add(1);

        while let Some((start, c)) = self.chars.next() {
            if is_separator(c) {
                continue;
            }
            let end = self.raw_token_end();
            let raw = &self.text[start..end];
            let leading = raw.len() - raw.trim_start_matches(|c| !is_word_char(c)).len();
            let word = raw.trim_matches(|c| !is_word_char(c));
            if word.is_empty() {
                continue;
            }

            self.token.offset_from = start + leading;
            self.token.offset_to = self.token.offset_from + word.len();
            self.token.text.push_str(word);
            return true;
        }

        false
    }

    fn token(&self) -> &Token {
        self.token
    }

    fn token_mut(&mut self) -> &mut Token {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<(String, usize, usize)> {
        let mut tokenizer = SeparatorTokenizer::default();
        let mut stream = tokenizer.token_stream(text);
        let mut out = Vec::new();
        while let Some(token) = stream.next() {
            out.push((token.text.clone(), token.offset_from, token.offset_to));
        }
        out
    }

    #[test]
    fn splits_on_whitespace_and_slash() {
        let words: Vec<_> = tokens("apps/docs readme.html\tfoo")
            .into_iter()
            .map(|(t, _, _)| t)
            .collect();
        assert_eq!(words, vec!["apps", "docs", "readme.html", "foo"]);
    }

    #[test]
    fn trims_punctuation_at_edges() {
        assert_eq!(
            tokens("(FOC). Setup,"),
            vec![("FOC".to_string(), 1, 4), ("Setup".to_string(), 7, 12)]
        );
    }

    #[test]
    fn drops_tokens_without_word_characters() {
        let words: Vec<_> = tokens(". | Board | . |").into_iter().map(|(t, _, _)| t).collect();
        assert_eq!(words, vec!["Board"]);
    }

    #[test]
    fn keeps_inner_punctuation() {
        assert_eq!(tokens("85224-6199"), vec![("85224-6199".to_string(), 0, 10)]);
    }

    #[test]
    fn offsets_are_byte_offsets() {
        let text = "MPLAB® Harmony “I ACCEPT”";
        let found = tokens(text);
        assert_eq!(found[0].0, "MPLAB");
        assert_eq!(found[1].0, "Harmony");
        assert_eq!(&text[found[2].1..found[2].2], "I");
        assert_eq!(&text[found[3].1..found[3].2], "ACCEPT");
    }

    #[test]
    fn positions_count_emitted_tokens() {
        let mut tokenizer = SeparatorTokenizer::default();
        let mut stream = tokenizer.token_stream("a | b");
        let mut positions = Vec::new();
        while let Some(token) = stream.next() {
            positions.push(token.position);
        }
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokens("").is_empty());
        assert!(tokens(" / ").is_empty());
    }
}
