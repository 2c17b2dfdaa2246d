//! # Part-of-Speech Tagger
//!
//! File: cli/src/nlp/tagger.rs
//!
//! ## Overview
//!
//! Assigns Brown corpus tags to tokens. The chunker only cares about a few
//! distinctions (proper nouns `NP*`, verbs `VB*`, punctuation), so a lexicon of
//! closed-class words and the vocabulary the bot listens for, plus
//! capitalisation and suffix heuristics, is enough.
//!
//! ## Rules
//!
//! In order, first match wins:
//! 1. Punctuation: sentence enders become `.`, commas `,`, colons and
//!    semicolons `:`, brackets `(` / `)`.
//! 2. Email addresses and URLs are `NN`, `@handles` are `NP`, numbers `CD`.
//! 3. Configured extra lexicon entries.
//! 4. Capitalised known first names are `NP`.
//! 5. Built-in lexicon. A capitalised open-class word in the middle of a
//!    sentence is treated as a proper noun instead.
//! 6. Any other capitalised word is `NP`.
//! 7. Suffixes: `-ing` `VBG`, `-ed` `VBD`, `-ly` `RB`, `-s` `NNS`, else `NN`.
//!
use super::names;
use super::tree::TaggedToken;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Anything that can tag a token sequence.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken>;
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+\-]?\d+(?:[.,:]\d+)*$").expect("number pattern is valid"));

static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let entries: &[(&str, &str)] = &[
        // articles & determiners
        ("a", "AT"), ("an", "AT"), ("the", "AT"), ("every", "AT"), ("no", "AT"),
        ("this", "DT"), ("that", "DT"), ("each", "DT"), ("these", "DTS"), ("those", "DTS"),
        ("some", "DTI"), ("any", "DTI"), ("all", "ABN"), ("another", "DT"),
        // pronouns
        ("i", "PPSS"), ("you", "PPSS"), ("we", "PPSS"), ("they", "PPSS"),
        ("he", "PPS"), ("she", "PPS"), ("it", "PPS"),
        ("me", "PPO"), ("him", "PPO"), ("us", "PPO"), ("them", "PPO"),
        ("my", "PP$"), ("your", "PP$"), ("his", "PP$"), ("her", "PP$"), ("its", "PP$"),
        ("our", "PP$"), ("their", "PP$"),
        ("what", "WDT"), ("which", "WDT"), ("who", "WPS"), ("whom", "WPO"),
        ("where", "WRB"), ("when", "WRB"), ("why", "WRB"), ("how", "WRB"),
        ("i'm", "PPSS+BEM"), ("it's", "PPS+BEZ"), ("what's", "WDT+BEZ"), ("they're", "PPSS+BER"),
        // be, have, do
        ("be", "BE"), ("is", "BEZ"), ("am", "BEM"), ("are", "BER"), ("was", "BEDZ"),
        ("were", "BED"), ("been", "BEN"), ("being", "BEG"),
        ("have", "HV"), ("has", "HVZ"), ("had", "HVD"),
        ("do", "DO"), ("does", "DOZ"), ("did", "DOD"), ("don't", "DO*"),
        // modals
        ("will", "MD"), ("would", "MD"), ("can", "MD"), ("could", "MD"), ("should", "MD"),
        ("shall", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"), ("won't", "MD*"),
        ("can't", "MD*"),
        // prepositions, particles, conjunctions
        ("to", "TO"), ("for", "IN"), ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"),
        ("with", "IN"), ("from", "IN"), ("by", "IN"), ("about", "IN"), ("into", "IN"),
        ("as", "CS"), ("if", "CS"), ("because", "CS"), ("so", "CS"),
        ("and", "CC"), ("or", "CC"), ("but", "CC"),
        ("up", "RP"), ("out", "RP"), ("there", "EX"), ("not", "*"),
        // adverbs & qualifiers
        ("please", "RB"), ("also", "RB"), ("now", "RB"), ("just", "RB"), ("again", "RB"),
        ("here", "RB"), ("then", "RB"), ("yes", "RB"), ("very", "QL"), ("too", "QL"),
        // interjections
        ("hi", "UH"), ("hello", "UH"), ("hey", "UH"), ("yo", "UH"), ("sup", "UH"),
        ("ok", "UH"), ("okay", "UH"), ("thanks", "UH"), ("nevermind", "UH"), ("rawr", "UH"),
        ("greetings", "NNS"),
        // verbs the bot listens for
        ("create", "VB"), ("add", "VB"), ("generate", "VB"), ("make", "VB"), ("invite", "VB"),
        ("need", "VB"), ("want", "VB"), ("set", "VB"), ("give", "VB"), ("send", "VB"),
        ("show", "VB"), ("help", "VB"), ("get", "VB"), ("find", "VB"), ("tell", "VB"),
        ("start", "VB"), ("hire", "VB"), ("let", "VB"), ("sign", "VB"), ("stop", "VB"),
        ("cancel", "VB"), ("quit", "VB"), ("onboard", "VB"), ("like", "VB"),
        // nouns
        ("account", "NN"), ("email", "NN"), ("e-mail", "NN"), ("title", "NN"), ("name", "NN"),
        ("username", "NN"), ("handle", "NN"), ("user", "NN"), ("employee", "NN"),
        ("job", "NN"), ("address", "NN"), ("google", "NN"), ("github", "NN"),
        ("trello", "NN"), ("abacus", "NN"), ("gif", "NN"), ("team", "NN"),
        ("software", "NN"), ("developer", "NN"), ("engineer", "NN"), ("scientist", "NN"),
        ("programmer", "NN"), ("coder", "NN"), ("designer", "NN"), ("data", "NNS"),
        ("content", "NN"), ("ux", "NN"),
        // adjectives & ordinals
        ("new", "JJ"), ("personal", "JJ"), ("full", "JJ"), ("creative", "JJ"),
        ("first", "OD"), ("last", "AP"),
    ];
    entries.iter().copied().collect()
});

fn is_open_class(tag: &str) -> bool {
    matches!(tag, "NN" | "NNS" | "JJ" | "VB")
}

fn is_capitalised(word: &str) -> bool {
    word.chars().next().map_or(false, char::is_uppercase)
}

fn punctuation_tag(token: &str) -> Option<String> {
    if token.is_empty() || token.chars().any(|c| c.is_alphanumeric()) {
        return None;
    }
    let tag = match token.chars().next() {
        Some('.') | Some('!') | Some('?') => ".".to_string(),
        Some(',') => ",".to_string(),
        Some(':') | Some(';') => ":".to_string(),
        Some('(') | Some('[') => "(".to_string(),
        Some(')') | Some(']') => ")".to_string(),
        _ => token.to_string(),
    };
    Some(tag)
}

fn suffix_tag(lword: &str) -> &'static str {
    if lword.ends_with("ing") && lword.len() > 5 {
        "VBG"
    } else if lword.ends_with("ed") && lword.len() > 3 {
        "VBD"
    } else if lword.ends_with("ly") && lword.len() > 3 {
        "RB"
    } else if lword.ends_with('s') && !lword.ends_with("ss") && lword.len() > 3 {
        "NNS"
    } else {
        "NN"
    }
}

/// Lexicon + heuristics tagger producing Brown tags.
#[derive(Debug, Default, Clone)]
pub struct LexiconTagger {
    extra: HashMap<String, String>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extra entries take precedence over the built-in lexicon. Keys are matched lowercased.
    pub fn with_extra_lexicon(extra: &HashMap<String, String>) -> Self {
        Self {
            extra: extra
                .iter()
                .map(|(word, tag)| (word.to_lowercase(), tag.trim().to_uppercase()))
                .collect(),
        }
    }

    fn tag_word(&self, word: &str, sentence_start: bool) -> String {
        if let Some(tag) = punctuation_tag(word) {
            return tag;
        }
        if EMAIL_RE.is_match(word) || word.starts_with("http://") || word.starts_with("https://")
        {
            return "NN".to_string();
        }
        if word.starts_with('@') && word.len() > 1 {
            return "NP".to_string();
        }
        if NUMBER_RE.is_match(word) {
            return "CD".to_string();
        }

        let lword = word.to_lowercase();
        if let Some(tag) = self.extra.get(&lword) {
            return tag.clone();
        }
        let capitalised = is_capitalised(word);
        if capitalised && names::is_first_name(word) {
            return "NP".to_string();
        }
        if let Some(tag) = LEXICON.get(lword.as_str()) {
            if capitalised && !sentence_start && is_open_class(tag) {
                return "NP".to_string();
            }
            return (*tag).to_string();
        }
        if capitalised {
            return "NP".to_string();
        }
        suffix_tag(&lword).to_string()
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let mut sentence_start = true;
        tokens
            .iter()
            .map(|word| {
                let tag = self.tag_word(word, sentence_start);
                sentence_start = tag == ".";
                TaggedToken::new(word.as_str(), tag)
            })
            .collect()
    }
}
