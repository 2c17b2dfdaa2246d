//! # Actions and Per-User Action State
//!
//! File: cli/src/bot/state.rs
//!
//! ## Overview
//!
//! Some actions need more than one message: the bot asks for a missing name,
//! email or job title and waits. `ActionState` records what the bot is doing
//! for a user (`action`), what it asked for last (`step`) and what it has
//! collected so far (`args`). `StateStore` keeps one state per user id.
//!
//! The store lock is only held inside its own methods, never across an await.
//!
//! Pending states are bounded: a state untouched for `PENDING_TTL` is
//! forgotten, and once `MAX_PENDING` users have one the oldest is dropped.
//!
use crate::nlp::{ChunkContext, InviteService};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

pub const PENDING_TTL: Duration = Duration::from_secs(30 * 60);
pub const MAX_PENDING: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Greet,
    GzGif,
    Cancel,
    CreateGoogleAccount,
    Invite(InviteService),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greet => f.write_str("greet"),
            Self::GzGif => f.write_str("gz_gif"),
            Self::Cancel => f.write_str("cancel"),
            Self::CreateGoogleAccount => f.write_str("create_google_account"),
            Self::Invite(service) => write!(f, "invite_{}", service.display_name().to_lowercase()),
        }
    }
}

/// What the bot asked for last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Name,
    Email,
    Title,
    Username,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionArgs {
    pub person: Option<String>,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub username: Option<String>,
    pub google_groups: Vec<String>,
}

impl ActionArgs {
    /// Values found in the newest message replace older ones. Groups are only
    /// replaced when the new message produced some.
    pub fn merge(&mut self, newer: ActionArgs) {
        if newer.person.is_some() {
            self.person = newer.person;
        }
        if newer.email.is_some() {
            self.email = newer.email;
        }
        if newer.job_title.is_some() {
            self.job_title = newer.job_title;
        }
        if newer.username.is_some() {
            self.username = newer.username;
        }
        if !newer.google_groups.is_empty() {
            self.google_groups = newer.google_groups;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionState {
    pub action: Option<Action>,
    pub step: Option<Step>,
    pub args: ActionArgs,
}

impl ActionState {
    pub fn waiting(action: Action, step: Step, args: ActionArgs) -> Self {
        Self {
            action: Some(action),
            step: Some(step),
            args,
        }
    }

    /// Chunker flags implied by this state.
    pub fn chunk_context(&self) -> ChunkContext {
        ChunkContext {
            pending_action: self.action.is_some(),
            google_account: self.action == Some(Action::CreateGoogleAccount),
            expect_title: self.step == Some(Step::Title),
            expect_name: self.step == Some(Step::Name),
        }
    }
}

#[derive(Debug)]
struct Entry {
    state: ActionState,
    touched: Instant,
}

#[derive(Debug)]
pub struct StateStore {
    states: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::with_limits(PENDING_TTL, MAX_PENDING)
    }
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// The user's state, or an empty one if there is none or it expired.
    pub fn get(&self, user: &str) -> ActionState {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = states.get(user) {
            if entry.touched.elapsed() <= self.ttl {
                return entry.state.clone();
            }
        } else {
            return ActionState::default();
        }
        debug!("Pending state for {} expired", user);
        states.remove(user);
        ActionState::default()
    }

    pub fn set(&self, user: &str, state: ActionState) {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        let ttl = self.ttl;
        states.retain(|_, entry| entry.touched.elapsed() <= ttl);
        if !states.contains_key(user) && states.len() >= self.capacity {
            let oldest = states
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                debug!("Dropping pending state for {} to make room", oldest);
                states.remove(&oldest);
            }
        }
        states.insert(
            user.to_string(),
            Entry {
                state,
                touched: Instant::now(),
            },
        );
    }

    pub fn clear(&self, user: &str) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user);
    }

    /// Users with a live pending state.
    pub fn len(&self) -> usize {
        let states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        states
            .values()
            .filter(|entry| entry.touched.elapsed() <= self.ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
