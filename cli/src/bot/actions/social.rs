//! # Small Talk Actions
//!
//! File: cli/src/bot/actions/social.rs
//!
use crate::bot::chat::{Chat, Turn};
use crate::core::error::Result;
use crate::nlp::chunker::GREETINGS;
use rand::seq::SliceRandom;

const CANCELED: &str = "Previous action canceled. I didn't want to do it anyways.";

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Chat {
    /// Says hello back with a random greeting.
    pub(in crate::bot) fn greet(&self, turn: &mut Turn<'_>) {
        let greeting = GREETINGS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("hello");
        turn.say(title_case(greeting));
        turn.say("Can I help you with anything?");
    }

    pub(in crate::bot) async fn gz_gif(&self, turn: &mut Turn<'_>) -> Result<()> {
        turn.say("RAWR!");
        let url = self.services.gifs.random_gif().await?;
        turn.say(url);
        Ok(())
    }

    pub(in crate::bot) fn cancel(&self, turn: &mut Turn<'_>) {
        self.states.clear(turn.user());
        turn.say(CANCELED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sup"), "Sup");
        assert_eq!(title_case("greetings"), "Greetings");
        assert_eq!(title_case(""), "");
    }
}
