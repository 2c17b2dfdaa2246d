//! # Godzillops Chunker
//!
//! File: cli/src/nlp/chunker.rs
//!
//! ## Overview
//!
//! The chunker walks POS-tagged text once, left to right, and labels the pieces
//! that tell the bot what to do: greetings, its own name, people, email
//! addresses, job titles, usernames, and the verbs/nouns that start or cancel
//! an action. Labels come out as IOB tags and are folded into a `ChunkTree`.
//!
//! ## Architecture
//!
//! The walk keeps a handful of context flags (did a greeting just happen, are
//! we inside a person's name, did the user ask to create something, are we
//! looking for a job title ...). Some flags are seeded from the user's pending
//! action through `ChunkContext`, which is how a reply like "Software Engineer"
//! is understood as a job title when the bot just asked for one.
//!
//! Rules are tried in a fixed order and the first match wins; see
//! `Chunker::iob_tags`.
//!
use super::names;
use super::tree::{ChunkLabel, ChunkTree, InviteService, Iob, IobToken, TaggedToken};
use once_cell::sync::Lazy;
use regex::Regex;

// Mini-corpora for checking input and determining intent.
pub const CREATE_ACTIONS: &[&str] = &["create", "add", "generate", "make"];
pub const INVITE_ACTIONS: &[&str] = &["invite"];
pub const DEV_TITLES: &[&str] = &[
    "data",
    "scientist",
    "software",
    "developer",
    "engineer",
    "coder",
    "programmer",
];
pub const DESIGN_TITLES: &[&str] = &["content", "creative", "designer", "ux"];
pub const GREETINGS: &[&str] = &["hey", "hello", "sup", "greetings", "hi", "yo"];
pub const GZ_ALIASES: &[&str] = &["godzillops", "godzilla", "zilla", "gojira"];
pub const CANCEL_ACTIONS: &[&str] = &["stop", "cancel", "nevermind", "quit"];
const USERNAME_CUES: &[&str] = &["username", "handle"];
// Words allowed between a username cue and the username itself.
const USERNAME_FILLERS: &[&str] = &["is", "was", "will", "be", "should", ":", "=", "of"];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[^@]+@[^@]+\.[^@]+").expect("email pattern is valid"));

/// Flags seeded from the user's pending action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkContext {
    /// Some action is waiting for more input (lets "cancel" through).
    pub pending_action: bool,
    /// A Google account creation is in progress.
    pub google_account: bool,
    /// The bot just asked for a job title.
    pub expect_title: bool,
    /// The bot just asked for a name.
    pub expect_name: bool,
}

#[derive(Debug, Default)]
struct Flags {
    greeting: bool,
    person: bool,
    create_action: bool,
    create_google_account: bool,
    check_for_title: bool,
    finding_title: bool,
    expect_name: bool,
    awaiting_username: bool,
}

impl Flags {
    fn seeded(ctx: ChunkContext) -> Self {
        Self {
            create_action: ctx.pending_action || ctx.google_account,
            create_google_account: ctx.google_account,
            check_for_title: ctx.google_account && ctx.expect_title,
            expect_name: ctx.expect_name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Chunker;

impl Chunker {
    pub fn new() -> Self {
        Self
    }

    /// Splits tagged text into actionable chunks.
    pub fn parse(&self, tagged: &[TaggedToken], ctx: ChunkContext) -> ChunkTree {
        ChunkTree::from_iob(self.iob_tags(tagged, ctx))
    }

    /// Labels every token. A cancel word on its own stops the walk, so the
    /// output can be shorter than the input.
    pub fn iob_tags(&self, tagged: &[TaggedToken], ctx: ChunkContext) -> Vec<IobToken> {
        tracing::debug!(?tagged, ?ctx, "Chunking tagged text");
        let mut flags = Flags::seeded(ctx);
        let mut iobs: Vec<IobToken> = Vec::with_capacity(tagged.len());

        for TaggedToken { word, tag } in tagged {
            let lword = word.to_lowercase();
            let lw = lword.as_str();

            if GZ_ALIASES.contains(&lw) {
                if flags.greeting {
                    flags.greeting = false;
                    iobs.push(IobToken::new(word, tag, Iob::Begin(ChunkLabel::Godzilla)));
                } else {
                    iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::Godzilla)));
                }
            } else if names::is_first_name(word)
                || ((flags.person || flags.expect_name) && tag.starts_with("NP"))
            {
                if flags.person {
                    iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::Person)));
                } else {
                    iobs.push(IobToken::new(word, tag, Iob::Begin(ChunkLabel::Person)));
                    flags.person = true;
                }
            } else if GREETINGS.contains(&lw) {
                flags.greeting = true;
                iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::Greeting)));
            } else if CREATE_ACTIONS.contains(&lw) && tag.starts_with("VB") {
                flags.create_action = true;
                iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::CreateAction)));
            } else if INVITE_ACTIONS.contains(&lw) && tag.starts_with("VB") {
                flags.create_action = true;
                iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::InviteAction)));
            } else if flags.create_action && lw == "google" {
                flags.create_action = false;
                flags.create_google_account = true;
                iobs.push(IobToken::new(
                    word,
                    tag,
                    Iob::Inside(ChunkLabel::CreateGoogleAccount),
                ));
            } else if let Some(service) =
                InviteService::from_word(lw).filter(|_| flags.create_action)
            {
                iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::Invite(service))));
            } else if flags.create_google_account && lw == "title" {
                // The word itself is dropped; what follows may be the title.
                flags.check_for_title = true;
                flags.finding_title = false;
            } else if flags.create_action && CANCEL_ACTIONS.contains(&lw) && iobs.is_empty() {
                // Cancel is only recognised on its own.
                iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::CancelAction)));
                break;
            } else if flags.check_for_title {
                iobs.push(parse_job_title(&mut flags, word, tag, lw));
            } else if EMAIL_RE.is_match(lw) {
                iobs.push(IobToken::new(word, "NN", Iob::Inside(ChunkLabel::Email)));
            } else if word.starts_with('@') && word.len() > 1 {
                flags.awaiting_username = false;
                iobs.push(IobToken::new(
                    word.trim_start_matches('@'),
                    tag,
                    Iob::Inside(ChunkLabel::Username),
                ));
            } else if flags.awaiting_username
                && !USERNAME_FILLERS.contains(&lw)
                && word.chars().any(char::is_alphanumeric)
            {
                flags.awaiting_username = false;
                iobs.push(IobToken::new(word, tag, Iob::Inside(ChunkLabel::Username)));
            } else {
                flags.person = false;
                if USERNAME_CUES.contains(&lw) {
                    flags.awaiting_username = true;
                }
                iobs.push(IobToken::new(word, tag, Iob::Outside));
            }
        }

        iobs
    }
}

/// Job titles: words from the dev or design corpora, or proper nouns, in a row.
/// Dev/design words get the custom tags `GDEV`/`GDES` so the Google groups can
/// be decided later.
fn parse_job_title(flags: &mut Flags, word: &str, tag: &str, lword: &str) -> IobToken {
    let probably_dev = DEV_TITLES.contains(&lword);
    let probably_design = DESIGN_TITLES.contains(&lword);

    let job_title_tag = if probably_dev {
        "GDEV"
    } else if probably_design {
        "GDES"
    } else {
        tag
    };

    let probably_job_title = probably_dev || probably_design || tag.starts_with("NP");

    if probably_job_title && flags.finding_title {
        IobToken::new(word, job_title_tag, Iob::Inside(ChunkLabel::JobTitle))
    } else if probably_job_title {
        flags.finding_title = true;
        IobToken::new(word, job_title_tag, Iob::Begin(ChunkLabel::JobTitle))
    } else {
        if flags.finding_title {
            flags.finding_title = false;
            flags.check_for_title = false;
        }
        IobToken::new(word, tag, Iob::Outside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tagger::{LexiconTagger, Tagger};
    use crate::nlp::tokenizer::Tokenizer;

    fn chunk(input: &str, ctx: ChunkContext) -> ChunkTree {
        let tokens = Tokenizer::new().tokenize(input);
        let tagged = LexiconTagger::new().tag(&tokens);
        Chunker::new().parse(&tagged, ctx)
    }

    fn labelled(tree: &ChunkTree) -> Vec<(String, String)> {
        tree.chunks()
            .map(|c| (c.label.to_string(), c.text()))
            .collect()
    }

    #[test]
    fn test_greeting_then_alias() {
        let tree = chunk("Hi Godzilla!", ChunkContext::default());
        assert_eq!(
            labelled(&tree),
            vec![
                ("GREETING".to_string(), "Hi".to_string()),
                ("GODZILLA".to_string(), "Godzilla".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_google_account_request() {
        let tree = chunk(
            "I need to create a google account for Bill Tester. His email is bill@gmail.com, \
             and his title will be Software Engineer.",
            ChunkContext::default(),
        );
        let chunks = labelled(&tree);
        assert!(chunks.contains(&("CREATE_ACTION".into(), "create".into())));
        assert!(chunks.contains(&("CREATE_GOOGLE_ACCOUNT".into(), "google".into())));
        assert!(chunks.contains(&("PERSON".into(), "Bill Tester".into())));
        assert!(chunks.contains(&("EMAIL".into(), "bill@gmail.com".into())));
        assert!(chunks.contains(&("JOB_TITLE".into(), "Software Engineer".into())));

        let title = tree
            .chunks()
            .find(|c| c.label == ChunkLabel::JobTitle)
            .unwrap();
        assert!(title.leaves.iter().all(|leaf| leaf.tag == "GDEV"));
        // The cue word "title" is consumed, not emitted.
        assert!(!tree.to_string().contains("title/"));
    }

    #[test]
    fn test_cancel_only_when_alone_and_pending() {
        let pending = ChunkContext {
            pending_action: true,
            google_account: true,
            ..Default::default()
        };
        let tree = chunk("cancel that please", pending);
        assert_eq!(labelled(&tree), vec![("CANCEL_ACTION".to_string(), "cancel".to_string())]);
        assert_eq!(tree.nodes.len(), 1);

        let tree = chunk("cancel", ChunkContext::default());
        assert_eq!(tree.chunks().count(), 0);
    }

    #[test]
    fn test_title_step_seeds_title_search() {
        let ctx = ChunkContext {
            pending_action: true,
            google_account: true,
            expect_title: true,
            ..Default::default()
        };
        let tree = chunk("UX Designer", ctx);
        let title = tree.chunks().next().unwrap();
        assert_eq!(title.label, ChunkLabel::JobTitle);
        assert_eq!(title.text(), "UX Designer");
        assert!(title.leaves.iter().all(|leaf| leaf.tag == "GDES"));
    }

    #[test]
    fn test_name_step_accepts_unknown_proper_nouns() {
        let ctx = ChunkContext {
            pending_action: true,
            google_account: true,
            expect_name: true,
            ..Default::default()
        };
        let tree = chunk("Zorgon Blaster", ctx);
        assert_eq!(
            labelled(&tree),
            vec![("PERSON".to_string(), "Zorgon Blaster".to_string())]
        );
    }

    #[test]
    fn test_invites() {
        let tree = chunk("invite @octocat to github", ChunkContext::default());
        assert_eq!(
            labelled(&tree),
            vec![
                ("INVITE_ACTION".to_string(), "invite".to_string()),
                ("USERNAME".to_string(), "octocat".to_string()),
                ("INVITE_GITHUB".to_string(), "github".to_string()),
            ]
        );

        let tree = chunk(
            "please add Jane Doe to trello, her username is ignored and email is jane@example.com",
            ChunkContext::default(),
        );
        let chunks = labelled(&tree);
        assert!(chunks.contains(&("INVITE_TRELLO".into(), "trello".into())));
        assert!(chunks.contains(&("PERSON".into(), "Jane Doe".into())));
        assert!(chunks.contains(&("USERNAME".into(), "ignored".into())));
        assert!(chunks.contains(&("EMAIL".into(), "jane@example.com".into())));
    }

    #[test]
    fn test_service_word_without_action_is_plain() {
        let tree = chunk("github is down", ChunkContext::default());
        assert_eq!(tree.chunks().count(), 0);
    }
}
