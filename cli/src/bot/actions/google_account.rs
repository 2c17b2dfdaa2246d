//! # Google Account Creation
//!
//! File: cli/src/bot/actions/google_account.rs
//!
//! ## Overview
//!
//! Creating an account needs the employee's full name, a personal email
//! address and a job title. Whatever is missing is asked for, one question per
//! message, with the answers collected in the user's `ActionState`. Once
//! everything is known:
//!
//! 1. Pick a username (given, or the lowercased first name) and check it is free.
//! 2. Create the user with a temporary password that must be changed at first login.
//! 3. Add them to the Google groups implied by the job title.
//! 4. Email the login details to the personal address.
//!
use crate::bot::chat::{Chat, Turn};
use crate::bot::state::{Action, ActionArgs, Step};
use crate::core::error::Result;
use crate::integrations::{NewUser, WelcomeEmail};
use rand::{distributions::Alphanumeric, Rng};
use tracing::info;

const ACTION: Action = Action::CreateGoogleAccount;
const PASSWORD_LENGTH: usize = 16;

/// Google usernames: ASCII letters, digits, periods, dashes and underscores.
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

/// Random alphanumeric password for a new account.
pub fn temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

fn welcome_email(given_name: &str, to: &str, login: &str, password: &str) -> WelcomeEmail {
    let domain = login.split_once('@').map_or(login, |(_, domain)| domain);
    WelcomeEmail {
        to: to.to_string(),
        subject: format!("Welcome to {}!", domain),
        body: format!(
            "Hi {given_name},\n\n\
             Your new Google account is ready.\n\n\
             Login: {login}\n\
             Temporary password: {password}\n\n\
             Sign in at https://accounts.google.com and you will be asked to choose a new password.\n"
        ),
    }
}

impl Chat {
    pub(in crate::bot) async fn create_google_account(
        &self,
        mut args: ActionArgs,
        turn: &mut Turn<'_>,
    ) -> Result<()> {
        if !turn.context.admin {
            self.states.clear(turn.user());
            turn.say("Sorry, only admins can create accounts.");
            return Ok(());
        }
        let Some(directory) = self.services.directory.clone() else {
            self.states.clear(turn.user());
            turn.say("Google isn't configured for me yet.");
            return Ok(());
        };

        let Some(name) = args.person.clone() else {
            self.ask(turn, ACTION, Step::Name, args, "What is the employee's full name?");
            return Ok(());
        };
        let Some(email) = args.email.clone() else {
            let question = format!("What is a personal email address for {}?", name);
            self.ask(turn, ACTION, Step::Email, args, question);
            return Ok(());
        };
        let Some(job_title) = args.job_title.clone() else {
            let question = format!("What will {}'s job title be?", name);
            self.ask(turn, ACTION, Step::Title, args, question);
            return Ok(());
        };

        let mut parts = name.split_whitespace();
        let given_name = parts.next().unwrap_or_default().to_string();
        let family_name = parts.collect::<Vec<_>>().join(" ");
        if family_name.is_empty() {
            self.ask(
                turn,
                ACTION,
                Step::Name,
                args,
                "Google requires both a first and last name - lame right? What is the employee's first & last name?",
            );
            return Ok(());
        }

        let username = args
            .username
            .clone()
            .unwrap_or_else(|| given_name.clone())
            .to_lowercase();
        if !is_valid_username(&username) {
            args.username = None;
            self.ask(
                turn,
                ACTION,
                Step::Username,
                args,
                format!(
                    "'{}' won't work as a Google username. Use only letters, numbers, periods, \
                     dashes and underscores. What username should I use?",
                    username
                ),
            );
            return Ok(());
        }

        turn.say(format!(
            "Okay, let me check if '{}' is an available Google username.",
            username
        ));

        if !directory.is_username_available(&username).await? {
            let initial: String = given_name.chars().take(1).collect();
            let suggestion = format!("{}{}", initial, family_name.replace(' ', "")).to_lowercase();
            args.username = None;
            self.ask(
                turn,
                ACTION,
                Step::Username,
                args,
                format!(
                    "Aw nuts, that name is taken. Might I suggest a nickname or something like {}? \
                     Either way, enter a new username for me to use.",
                    suggestion
                ),
            );
            return Ok(());
        }

        turn.say("We're good to go! Creating the new account now.");
        let password = temporary_password();
        let created = directory
            .create_user(&NewUser {
                given_name: given_name.clone(),
                family_name,
                username,
                recovery_email: email.clone(),
                job_title,
                password: password.clone(),
            })
            .await?;
        info!("Created Google account {}", created.primary_email);

        if !args.google_groups.is_empty() {
            turn.say(format!(
                "Adding {} to the following Google groups now: {}",
                given_name,
                args.google_groups.join(", ")
            ));
            for group in &args.google_groups {
                directory.add_to_group(&created.primary_email, group).await?;
            }
        }

        turn.say(format!("Sending them a welcome email at {}.", email));
        directory
            .send_welcome_email(&welcome_email(
                &given_name,
                &email,
                &created.primary_email,
                &password,
            ))
            .await?;

        turn.say("Google account creation complete!");
        self.states.clear(turn.user());
        Ok(())
    }
}
