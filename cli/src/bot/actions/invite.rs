//! # Service Invites
//!
//! File: cli/src/bot/actions/invite.rs
//!
//! What each service needs before an invite can go out:
//!
//! | Service | Needs                |
//! |---------|----------------------|
//! | GitHub  | username             |
//! | Trello  | email and full name  |
//! | Abacus  | email                |
//!
use crate::bot::chat::{Chat, Turn};
use crate::bot::state::{Action, ActionArgs, Step};
use crate::core::error::Result;
use crate::integrations::Invitee;
use crate::nlp::InviteService;
use tracing::warn;

/// GitHub logins are letters, digits and single inner hyphens, at most 39 long.
fn is_valid_github_username(username: &str) -> bool {
    (1..=39).contains(&username.len())
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
}

impl Chat {
    pub(in crate::bot) async fn invite(
        &self,
        service: InviteService,
        mut args: ActionArgs,
        turn: &mut Turn<'_>,
    ) -> Result<()> {
        let name = service.display_name();
        if !turn.context.admin {
            self.states.clear(turn.user());
            turn.say("Sorry, only admins can invite people.");
            return Ok(());
        }
        let Some(inviter) = self.services.inviters.get(&service).cloned() else {
            self.states.clear(turn.user());
            turn.say(format!("{} isn't configured for me yet.", name));
            return Ok(());
        };

        let action = Action::Invite(service);
        let who = match service {
            InviteService::GitHub => {
                let Some(username) = args.username.clone() else {
                    let question = format!("What is their {} username?", name);
                    self.ask(turn, action, Step::Username, args, question);
                    return Ok(());
                };
                if !is_valid_github_username(&username) {
                    args.username = None;
                    let question = format!(
                        "'{}' isn't a valid {} username. What is their {} username?",
                        username, name, name
                    );
                    self.ask(turn, action, Step::Username, args, question);
                    return Ok(());
                }
                username
            }
            InviteService::Trello | InviteService::Abacus => {
                let Some(email) = args.email.clone() else {
                    let question = format!("What email address should I send the {} invite to?", name);
                    self.ask(turn, action, Step::Email, args, question);
                    return Ok(());
                };
                if service == InviteService::Trello && args.person.is_none() {
                    self.ask(turn, action, Step::Name, args, "What is their full name?");
                    return Ok(());
                }
                args.person.clone().unwrap_or(email)
            }
        };

        self.states.clear(turn.user());
        let invitee = Invitee {
            username: args.username,
            email: args.email,
            full_name: args.person,
        };
        if inviter.invite(&invitee).await? {
            turn.say(format!("Invited {} to {}!", who, name));
        } else {
            warn!("{} refused the invite for {}", name, who);
            turn.say(format!(
                "{} didn't accept the invite for {}. Check the logs.",
                name, who
            ));
        }
        Ok(())
    }
}
