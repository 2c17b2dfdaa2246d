//! # Intent Resolution
//!
//! File: cli/src/bot/intent.rs
//!
//! Reads a chunk tree together with the user's pending state and decides what
//! to do and with which arguments.
//!
use super::state::{Action, ActionArgs, ActionState, Step};
use crate::nlp::{Chunk, ChunkLabel, ChunkTree};

const DEV_GROUPS: &[&str] = &["dev", "aws_restricted"];
const DESIGN_GROUPS: &[&str] = &["design"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub action: Option<Action>,
    pub args: ActionArgs,
}

/// Chunks are read in order. Entities keep their first occurrence; a pending
/// action stays in force unless the message names another one.
pub fn determine_action(tree: &ChunkTree, pending: &ActionState, input: &str) -> Intent {
    let mut action = pending.action;
    let mut found = ActionArgs::default();

    // The bot asked for a username: take whatever was typed.
    if pending.step == Some(Step::Username) {
        found.username = input
            .split_whitespace()
            .next()
            .map(|word| word.trim_start_matches('@').to_string())
            .filter(|username| !username.is_empty());
    }

    for chunk in tree.chunks() {
        match chunk.label {
            ChunkLabel::Greeting => action = Some(Action::Greet),
            ChunkLabel::Godzilla => {
                if action.is_none() {
                    action = Some(Action::GzGif);
                }
            }
            ChunkLabel::CreateGoogleAccount => action = Some(Action::CreateGoogleAccount),
            ChunkLabel::Invite(service) => action = Some(Action::Invite(service)),
            ChunkLabel::CancelAction => {
                if pending.action.is_some() {
                    action = Some(Action::Cancel);
                }
            }
            ChunkLabel::Person => {
                found.person.get_or_insert_with(|| chunk.text());
            }
            ChunkLabel::Email => {
                found.email.get_or_insert_with(|| chunk.text());
            }
            ChunkLabel::Username => {
                found.username.get_or_insert_with(|| chunk.text());
            }
            ChunkLabel::JobTitle => {
                if found.job_title.is_none() {
                    found.job_title = Some(chunk.text());
                    found.google_groups = groups_for_title(chunk);
                }
            }
            ChunkLabel::CreateAction | ChunkLabel::InviteAction => {}
        }
    }

    if action == Some(Action::Cancel) {
        return Intent {
            action,
            args: ActionArgs::default(),
        };
    }

    // A username answer is only a username; anything else in it would
    // overwrite what was collected before.
    if pending.step == Some(Step::Username) {
        found = ActionArgs {
            username: found.username,
            ..Default::default()
        };
    }

    let mut args = pending.args.clone();
    args.merge(found);
    Intent { action, args }
}

/// Dev titles map to the dev groups, design titles to the design group. Mixed
/// or unknown titles map to nothing.
fn groups_for_title(title: &Chunk) -> Vec<String> {
    let dev = title.leaves.iter().any(|leaf| leaf.tag == "GDEV");
    let design = title.leaves.iter().any(|leaf| leaf.tag == "GDES");
    let groups = match (dev, design) {
        (true, false) => DEV_GROUPS,
        (false, true) => DESIGN_GROUPS,
        _ => &[],
    };
    groups.iter().map(|g| g.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{InviteService, Pipeline};

    fn resolve(input: &str, pending: &ActionState) -> Intent {
        let analysis = Pipeline::default().analyze(input, pending.chunk_context());
        determine_action(&analysis.tree, pending, input)
    }

    #[test]
    fn test_greeting_wins_over_alias() {
        let intent = resolve("Hello Godzilla", &ActionState::default());
        assert_eq!(intent.action, Some(Action::Greet));

        let intent = resolve("Godzilla!", &ActionState::default());
        assert_eq!(intent.action, Some(Action::GzGif));
    }

    #[test]
    fn test_full_request_collects_everything() {
        let intent = resolve(
            "I need to create a google account for Bill Tester. His email is bill@gmail.com, \
             and his title will be Software Engineer.",
            &ActionState::default(),
        );
        assert_eq!(intent.action, Some(Action::CreateGoogleAccount));
        assert_eq!(intent.args.person.as_deref(), Some("Bill Tester"));
        assert_eq!(intent.args.email.as_deref(), Some("bill@gmail.com"));
        assert_eq!(intent.args.job_title.as_deref(), Some("Software Engineer"));
        assert_eq!(intent.args.google_groups, vec!["dev", "aws_restricted"]);
    }

    #[test]
    fn test_pending_action_carries_args() {
        let pending = ActionState::waiting(
            Action::CreateGoogleAccount,
            Step::Email,
            ActionArgs {
                person: Some("Bill Tester".into()),
                ..Default::default()
            },
        );
        let intent = resolve("bill@gmail.com", &pending);
        assert_eq!(intent.action, Some(Action::CreateGoogleAccount));
        assert_eq!(intent.args.person.as_deref(), Some("Bill Tester"));
        assert_eq!(intent.args.email.as_deref(), Some("bill@gmail.com"));
    }

    #[test]
    fn test_username_step_takes_raw_input() {
        let pending = ActionState::waiting(Action::CreateGoogleAccount, Step::Username, ActionArgs::default());
        let intent = resolve("  btester  please", &pending);
        assert_eq!(intent.args.username.as_deref(), Some("btester"));
    }

    #[test]
    fn test_username_answer_keeps_collected_entities() {
        let pending = ActionState::waiting(
            Action::CreateGoogleAccount,
            Step::Username,
            ActionArgs {
                person: Some("Bill Tester".into()),
                email: Some("bill@gmail.com".into()),
                job_title: Some("Software Engineer".into()),
                google_groups: vec!["dev".into(), "aws_restricted".into()],
                ..Default::default()
            },
        );
        let intent = resolve("Billy", &pending);
        assert_eq!(intent.action, Some(Action::CreateGoogleAccount));
        assert_eq!(intent.args.username.as_deref(), Some("Billy"));
        assert_eq!(intent.args.person.as_deref(), Some("Bill Tester"));
        assert_eq!(intent.args.job_title.as_deref(), Some("Software Engineer"));
        assert_eq!(intent.args.google_groups, vec!["dev", "aws_restricted"]);
    }

    #[test]
    fn test_cancel_needs_pending_action() {
        let intent = resolve("cancel", &ActionState::default());
        assert_eq!(intent.action, None);

        let pending = ActionState::waiting(
            Action::Invite(InviteService::GitHub),
            Step::Username,
            ActionArgs::default(),
        );
        let intent = resolve("cancel", &pending);
        assert_eq!(intent.action, Some(Action::Cancel));
        assert_eq!(intent.args, ActionArgs::default());
    }

    #[test]
    fn test_design_and_mixed_titles() {
        let pending = ActionState::waiting(Action::CreateGoogleAccount, Step::Title, ActionArgs::default());
        let intent = resolve("Creative Designer", &pending);
        assert_eq!(intent.args.google_groups, vec!["design"]);

        let intent = resolve("UX Engineer", &pending);
        assert_eq!(intent.args.job_title.as_deref(), Some("UX Engineer"));
        assert!(intent.args.google_groups.is_empty());
    }

    #[test]
    fn test_invite_request() {
        let intent = resolve("Please invite @octocat to GitHub", &ActionState::default());
        assert_eq!(intent.action, Some(Action::Invite(InviteService::GitHub)));
        assert_eq!(intent.args.username.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_small_talk_has_no_action() {
        assert_eq!(resolve("what a nice day", &ActionState::default()).action, None);
    }
}
