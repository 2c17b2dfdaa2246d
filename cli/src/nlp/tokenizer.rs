//! # Tokenizer
//!
//! File: cli/src/nlp/tokenizer.rs
//!
//! Splits chat messages into tokens the way a tweet tokenizer would: email
//! addresses, URLs, `@handles` and contractions stay whole, runs of the same
//! punctuation (`!!!`, `...`) stay together, everything else splits on
//! whitespace and punctuation.
//!
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
          https?://\S+                        # URLs
        | [\w.+\-]+@[\w\-]+(?:\.[\w\-]+)+     # email addresses
        | @\w+                                # handles
        | [+\-]?\d+(?:[.,:]\d+)*              # numbers, times
        | \w+(?:['’\-]\w+)*                   # words, contractions, hyphenated words
        | \.{2,} | !+ | \?+                   # punctuation runs
        | [^\w\s]                             # any other single symbol
        ",
    )
    .expect("token pattern is valid")
});

const URL_TRAILING: &[char] = &['.', ',', '!', '?', ';', ':', ')'];

#[derive(Debug, Default, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn tokenize(&self, input: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for m in TOKEN_RE.find_iter(input) {
            let text = m.as_str();
            if text.starts_with("http://") || text.starts_with("https://") {
                push_url(&mut tokens, text);
            } else {
                tokens.push(text.to_string());
            }
        }
        tokens
    }
}

/// URLs swallow trailing sentence punctuation; give it back as separate tokens.
fn push_url(tokens: &mut Vec<String>, text: &str) {
    let url = text.trim_end_matches(URL_TRAILING);
    tokens.push(url.to_string());
    for c in text[url.len()..].chars() {
        tokens.push(c.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(input: &str) -> Vec<String> {
        Tokenizer::new().tokenize(input)
    }

    #[test]
    fn test_greeting() {
        assert_eq!(tok("Hi Godzilla!"), vec!["Hi", "Godzilla", "!"]);
    }

    #[test]
    fn test_email_and_sentence_end() {
        assert_eq!(
            tok("His email is bill@gmail.com, and"),
            vec!["His", "email", "is", "bill@gmail.com", ",", "and"]
        );
        assert_eq!(tok("bill.t+hr@example.co.uk."), vec!["bill.t+hr@example.co.uk", "."]);
    }

    #[test]
    fn test_contractions_and_handles() {
        assert_eq!(
            tok("What's the employee's handle? @octocat"),
            vec!["What's", "the", "employee's", "handle", "?", "@octocat"]
        );
    }

    #[test]
    fn test_punctuation_runs() {
        assert_eq!(tok("Gojira!!! ..."), vec!["Gojira", "!!!", "..."]);
    }

    #[test]
    fn test_url_keeps_trailing_punctuation_separate() {
        assert_eq!(
            tok("see https://giphy.com/gifs/abc."),
            vec!["see", "https://giphy.com/gifs/abc", "."]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tok("").is_empty());
        assert!(tok("   \t\n").is_empty());
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tok("ゴジラ rawr"), vec!["ゴジラ", "rawr"]);
    }
}
