//! # Godzillops Parse Command
//!
//! File: cli/src/commands/parse.rs
//!
//! ## Overview
//!
//! Prints every stage of the NLP pipeline for a message, which is the quickest
//! way to see why the bot did (or did not) understand something:
//!
//! ```text
//! $ godzillops parse Hi Godzilla!
//! Tokens: Hi | Godzilla | !
//! Tagged: Hi/UH Godzilla/NP !/.
//! IOB:    Hi/UH/I-GREETING Godzilla/NP/B-GODZILLA !/./O
//! Tree:   (S (GREETING Hi/UH) (GODZILLA Godzilla/NP) !/.)
//! ```
//!
//! `--step` parses the message as the answer to one of the bot's questions
//! during account creation.
//!
use crate::bot::{Action, ActionArgs, ActionState, Step};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::nlp::{Analysis, Pipeline};
use clap::{Parser, ValueEnum};
use std::fmt::Display;

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// The message to analyze.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Parse as the reply to this question of an account creation.
    #[arg(long, value_enum)]
    pub step: Option<StepArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StepArg {
    Name,
    Email,
    Title,
    Username,
}

impl From<StepArg> for Step {
    fn from(step: StepArg) -> Self {
        match step {
            StepArg::Name => Step::Name,
            StepArg::Email => Step::Email,
            StepArg::Title => Step::Title,
            StepArg::Username => Step::Username,
        }
    }
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn render(analysis: &Analysis) -> String {
    format!(
        "Tokens: {}\nTagged: {}\nIOB:    {}\nTree:   {}",
        analysis.tokens.join(" | "),
        join(&analysis.tagged, " "),
        join(&analysis.iob, " "),
        analysis.tree
    )
}

pub fn handle_parse(args: ParseArgs, config: &Config) -> Result<()> {
    let pending = match args.step {
        Some(step) => ActionState::waiting(Action::CreateGoogleAccount, step.into(), ActionArgs::default()),
        None => ActionState::default(),
    };
    let pipeline = Pipeline::with_extra_lexicon(&config.nlp.extra_lexicon);
    let analysis = pipeline.analyze(&args.text.join(" "), pending.chunk_context());
    println!("{}", render(&analysis));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::ChunkContext;

    #[test]
    fn test_render_all_stages() {
        let analysis = Pipeline::default().analyze("Hi Godzilla!", ChunkContext::default());
        assert_eq!(
            render(&analysis),
            "Tokens: Hi | Godzilla | !\n\
             Tagged: Hi/UH Godzilla/NP !/.\n\
             IOB:    Hi/UH/I-GREETING Godzilla/NP/B-GODZILLA !/./O\n\
             Tree:   (S (GREETING Hi/UH) (GODZILLA Godzilla/NP) !/.)"
        );
    }
}
