//! # Chunk Labels and Chunk Trees
//!
//! File: cli/src/nlp/tree.rs
//!
//! ## Overview
//!
//! The chunker labels each tagged token with an IOB tag (`B-<LABEL>`, `I-<LABEL>`
//! or `O`). This module holds those types and turns a labelled sequence into a
//! flat chunk tree: bare leaves for `O` tokens and one `Chunk` per run of tokens
//! sharing a label.
//!
//! Conversion follows CoNLL semantics:
//! - `B-X` always opens a new chunk `X`.
//! - `I-X` continues the open chunk if it is also `X`, otherwise opens one.
//! - `O` closes any open chunk and becomes a leaf.
//!
//! The tree prints in bracketed form, e.g. `(S Hi/UH (GODZILLA Godzilla/NP) !/.)`.
//!
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.word, self.tag)
    }
}

/// External services the bot can invite people to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InviteService {
    GitHub,
    Trello,
    Abacus,
}

impl InviteService {
    pub const ALL: [InviteService; 3] = [Self::GitHub, Self::Trello, Self::Abacus];

    /// Matches the lowercased word a user would type.
    pub fn from_word(lword: &str) -> Option<Self> {
        match lword {
            "github" => Some(Self::GitHub),
            "trello" => Some(Self::Trello),
            "abacus" => Some(Self::Abacus),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Trello => "Trello",
            Self::Abacus => "Abacus",
        }
    }
}

/// Chunk labels produced by the chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkLabel {
    Greeting,
    Godzilla,
    Person,
    CreateAction,
    CreateGoogleAccount,
    CancelAction,
    JobTitle,
    Email,
    InviteAction,
    Invite(InviteService),
    Username,
}

impl fmt::Display for ChunkLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Greeting => "GREETING",
            Self::Godzilla => "GODZILLA",
            Self::Person => "PERSON",
            Self::CreateAction => "CREATE_ACTION",
            Self::CreateGoogleAccount => "CREATE_GOOGLE_ACCOUNT",
            Self::CancelAction => "CANCEL_ACTION",
            Self::JobTitle => "JOB_TITLE",
            Self::Email => "EMAIL",
            Self::InviteAction => "INVITE_ACTION",
            Self::Invite(InviteService::GitHub) => "INVITE_GITHUB",
            Self::Invite(InviteService::Trello) => "INVITE_TRELLO",
            Self::Invite(InviteService::Abacus) => "INVITE_ABACUS",
            Self::Username => "USERNAME",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iob {
    Begin(ChunkLabel),
    Inside(ChunkLabel),
    Outside,
}

impl fmt::Display for Iob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin(label) => write!(f, "B-{}", label),
            Self::Inside(label) => write!(f, "I-{}", label),
            Self::Outside => f.write_str("O"),
        }
    }
}

/// A tagged token plus its chunk label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IobToken {
    pub token: TaggedToken,
    pub iob: Iob,
}

impl IobToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>, iob: Iob) -> Self {
        Self {
            token: TaggedToken::new(word, tag),
            iob,
        }
    }
}

impl fmt::Display for IobToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token, self.iob)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub label: ChunkLabel,
    pub leaves: Vec<TaggedToken>,
}

impl Chunk {
    /// Leaf words joined with single spaces.
    pub fn text(&self) -> String {
        self.leaves
            .iter()
            .map(|leaf| leaf.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(TaggedToken),
    Chunk(Chunk),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkTree {
    pub nodes: Vec<Node>,
}

impl ChunkTree {
    pub fn from_iob(tokens: Vec<IobToken>) -> Self {
        let mut nodes: Vec<Node> = Vec::new();
        let mut open: Option<Chunk> = None;

        for IobToken { token, iob } in tokens {
            match iob {
                Iob::Outside => {
                    if let Some(chunk) = open.take() {
                        nodes.push(Node::Chunk(chunk));
                    }
                    nodes.push(Node::Leaf(token));
                }
                Iob::Inside(label) if open.as_ref().map_or(false, |c| c.label == label) => {
                    if let Some(chunk) = open.as_mut() {
                        chunk.leaves.push(token);
                    }
                }
                Iob::Begin(label) | Iob::Inside(label) => {
                    if let Some(chunk) = open.take() {
                        nodes.push(Node::Chunk(chunk));
                    }
                    open = Some(Chunk {
                        label,
                        leaves: vec![token],
                    });
                }
            }
        }
        if let Some(chunk) = open {
            nodes.push(Node::Chunk(chunk));
        }

        Self { nodes }
    }

    /// Chunks in input order, skipping bare leaves.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Chunk(chunk) => Some(chunk),
            Node::Leaf(_) => None,
        })
    }
}

impl fmt::Display for ChunkTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(S")?;
        for node in &self.nodes {
            match node {
                Node::Leaf(token) => write!(f, " {}", token)?,
                Node::Chunk(chunk) => {
                    write!(f, " ({}", chunk.label)?;
                    for leaf in &chunk.leaves {
                        write!(f, " {}", leaf)?;
                    }
                    f.write_str(")")?;
                }
            }
        }
        f.write_str(")")
    }
}
