//! # NLP Pipeline
//!
//! File: cli/src/nlp/pipeline.rs
//!
//! Runs tokenizer, tagger and chunker in sequence and keeps every
//! intermediate result, so `godzillops parse` can print them and the chat
//! engine can act on the tree.
//!
use super::chunker::{ChunkContext, Chunker};
use super::tagger::{LexiconTagger, Tagger};
use super::tokenizer::Tokenizer;
use super::tree::{ChunkTree, IobToken, TaggedToken};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<String>,
    pub tagged: Vec<TaggedToken>,
    pub iob: Vec<IobToken>,
    pub tree: ChunkTree,
}

pub struct Pipeline {
    tokenizer: Tokenizer,
    tagger: Box<dyn Tagger>,
    chunker: Chunker,
}

impl Pipeline {
    pub fn new(tagger: Box<dyn Tagger>) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            tagger,
            chunker: Chunker::new(),
        }
    }

    /// The default lexicon tagger, extended with configured entries.
    pub fn with_extra_lexicon(extra: &HashMap<String, String>) -> Self {
        Self::new(Box::new(LexiconTagger::with_extra_lexicon(extra)))
    }

    pub fn analyze(&self, input: &str, ctx: ChunkContext) -> Analysis {
        let tokens = self.tokenizer.tokenize(input);
        let tagged = self.tagger.tag(&tokens);
        let iob = self.chunker.iob_tags(&tagged, ctx);
        let tree = ChunkTree::from_iob(iob.clone());
        Analysis {
            tokens,
            tagged,
            iob,
            tree,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(LexiconTagger::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_keeps_every_stage() {
        let analysis = Pipeline::default().analyze("Hi Godzilla!", ChunkContext::default());
        assert_eq!(analysis.tokens, vec!["Hi", "Godzilla", "!"]);
        assert_eq!(analysis.tagged.len(), 3);
        assert_eq!(analysis.iob[1].to_string(), "Godzilla/NP/B-GODZILLA");
        assert_eq!(
            analysis.tree.to_string(),
            "(S (GREETING Hi/UH) (GODZILLA Godzilla/NP) !/.)"
        );
    }

    #[test]
    fn test_extra_lexicon_reaches_tagger() {
        let mut extra = HashMap::new();
        extra.insert("provision".to_string(), "VB".to_string());
        let analysis = Pipeline::with_extra_lexicon(&extra).analyze("provision it", ChunkContext::default());
        assert_eq!(analysis.tagged[0].tag, "VB");
    }
}
