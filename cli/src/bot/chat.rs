//! # Godzillops Chat Engine
//!
//! File: cli/src/bot/chat.rs
//!
//! ## Overview
//!
//! `Chat` is the bot's brain. Every platform hands it a line of text and an
//! optional `Context` and gets back the replies to show, in order:
//!
//! 1. Look up the user's pending `ActionState`.
//! 2. Tokenize, tag and chunk the text (chunker flags seeded from that state).
//! 3. Resolve an `Action` and its arguments.
//! 4. Run the action, which may call external services and update the state.
//!
//! ## Error Handling
//!
//! `respond` never fails. If an action errors, the error is logged and the
//! replies produced before the failure are returned followed by
//! `"I... Erm... What? Try again."`.
//!
//! ## Examples
//!
//! ```ignore
//! let chat = Chat::new(&config)?;
//! for reply in chat.respond("Hi Godzilla!", None).await {
//!     println!("{}", reply);
//! }
//! ```
//!
use super::context::Context;
use super::intent::determine_action;
use super::state::{Action, ActionArgs, ActionState, StateStore, Step};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::integrations::Services;
use crate::nlp::{Analysis, Pipeline};
use tracing::{debug, error, info};

pub const ERROR_REPLY: &str = "I... Erm... What? Try again.";

pub struct Chat {
    pub(super) pipeline: Pipeline,
    pub(super) services: Services,
    pub(super) states: StateStore,
}

/// Replies collected while handling one message.
pub(super) struct Turn<'a> {
    pub context: &'a Context,
    replies: Vec<String>,
}

impl<'a> Turn<'a> {
    fn new(context: &'a Context) -> Self {
        Self {
            context,
            replies: Vec::new(),
        }
    }

    pub fn say(&mut self, reply: impl Into<String>) {
        self.replies.push(reply.into());
    }

    pub fn user(&self) -> &str {
        &self.context.user
    }
}

impl Chat {
    /// Builds the pipeline and every configured service.
    pub fn new(config: &Config) -> Result<Self> {
        let services = Services::from_config(config)?;
        Ok(Self::with_services(
            Pipeline::with_extra_lexicon(&config.nlp.extra_lexicon),
            services,
        ))
    }

    pub fn with_services(pipeline: Pipeline, services: Services) -> Self {
        Self {
            pipeline,
            services,
            states: StateStore::new(),
        }
    }

    /// Runs the NLP pipeline as it would run for `user`'s next message.
    pub fn analyze(&self, input: &str, user: &str) -> Analysis {
        let pending = self.states.get(user);
        self.pipeline.analyze(input, pending.chunk_context())
    }

    /// What the bot is waiting on from `user`, if anything.
    pub fn pending(&self, user: &str) -> ActionState {
        self.states.get(user)
    }

    pub async fn respond(&self, input: &str, context: Option<Context>) -> Vec<String> {
        let context = context.unwrap_or_default();
        let mut turn = Turn::new(&context);
        if let Err(e) = self.handle(input, &mut turn).await {
            error!("An error occurred responding to {}: {:?}", context.user, e);
            turn.say(ERROR_REPLY);
        }
        turn.replies
    }

    async fn handle(&self, input: &str, turn: &mut Turn<'_>) -> Result<()> {
        let pending = self.states.get(turn.user());
        let analysis = self.pipeline.analyze(input, pending.chunk_context());
        debug!("Chunked input: {}", analysis.tree);

        let intent = determine_action(&analysis.tree, &pending, input);
        let Some(action) = intent.action else {
            debug!("No action for input from {}", turn.user());
            return Ok(());
        };
        info!("Performing '{}' for {}", action, turn.user());

        match action {
            Action::Greet => self.greet(turn),
            Action::GzGif => self.gz_gif(turn).await?,
            Action::Cancel => self.cancel(turn),
            Action::CreateGoogleAccount => self.create_google_account(intent.args, turn).await?,
            Action::Invite(service) => self.invite(service, intent.args, turn).await?,
        }
        Ok(())
    }

    /// Stores what the bot is waiting for and asks the question.
    pub(super) fn ask(
        &self,
        turn: &mut Turn<'_>,
        action: Action,
        step: Step,
        args: ActionArgs,
        question: impl Into<String>,
    ) {
        self.states
            .set(turn.user(), ActionState::waiting(action, step, args));
        turn.say(question);
    }
}
