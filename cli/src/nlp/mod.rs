//! # Natural Language Pipeline
//!
//! File: cli/src/nlp/mod.rs
//!
//! ## Overview
//!
//! Turns a chat message into something the bot can act on:
//!
//! ```text
//! text ──tokenize──> tokens ──tag──> (word, tag) ──chunk──> ChunkTree
//! ```
//!
//! - `tokenizer`: splits text, keeping emails, URLs and handles whole.
//! - `tagger`: Brown-style part-of-speech tags.
//! - `names`: first names used to spot people.
//! - `chunker`: labels greetings, people, titles, emails and action words.
//! - `tree`: IOB labels and the chunk tree built from them.
//! - `pipeline`: all of the above in one call.
//!
pub mod chunker;
pub mod names;
pub mod pipeline;
pub mod tagger;
pub mod tokenizer;
pub mod tree;

pub use chunker::{ChunkContext, Chunker};
pub use pipeline::{Analysis, Pipeline};
pub use tagger::{LexiconTagger, Tagger};
pub use tokenizer::Tokenizer;
pub use tree::{Chunk, ChunkLabel, ChunkTree, InviteService, Iob, IobToken, Node, TaggedToken};
