//! Which inbound messages get validated, and what to do with the verdict.

use crate::config::RelayConfig;
use crate::validation::ValidationResult;

/// Phrases that mark a message as an introduction attempt.
const INTRODUCTION_PHRASES: &[&str] = &[
    "good morning respected seniors",
    "good afternoon respected seniors",
    "good evening respected seniors",
    "my name is",
    "i am from",
    "i am pursuing",
    "my hobby is",
];

/// How many phrases must appear before a message counts as an introduction.
const INTRODUCTION_THRESHOLD: usize = 3;

/// Group chat ids carry this suffix.
const GROUP_SUFFIX: &str = "@g.us";

pub fn is_introduction_message(text: &str) -> bool {
    let lower = text.to_lowercase();
    INTRODUCTION_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count()
        >= INTRODUCTION_THRESHOLD
}

pub fn is_group_message(from: &str) -> bool {
    from.contains(GROUP_SUFFIX)
}

/// A configured target group wins; otherwise all groups or none, depending
/// on `monitor_group_chats`.
pub fn should_monitor_group(config: &RelayConfig, group_id: &str) -> bool {
    match &config.target_group_id {
        Some(target) => target == group_id,
        None => config.monitor_group_chats,
    }
}

/// An outbound step taken in response to a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayAction {
    React {
        to: String,
        message_id: String,
        emoji: String,
    },
    Reply {
        to: String,
        body: String,
        reply_to: String,
    },
    Welcome {
        group_id: String,
        body: String,
    },
}

/// Context of one inbound message.
#[derive(Debug, Clone)]
pub struct InboundContext<'a> {
    pub chat_id: &'a str,
    pub message_id: &'a str,
    pub sender_name: &'a str,
    pub is_group: bool,
}

/// Accepted ⇒ react (and welcome in groups). Rejected ⇒ reply with the
/// configured text, quoting the message.
pub fn plan_actions(
    config: &RelayConfig,
    inbound: &InboundContext<'_>,
    result: &ValidationResult,
) -> Vec<RelayAction> {
    if !result.is_valid {
        return vec![RelayAction::Reply {
            to: inbound.chat_id.to_string(),
            body: config.reply_text.clone(),
            reply_to: inbound.message_id.to_string(),
        }];
    }

    let mut actions = vec![RelayAction::React {
        to: inbound.chat_id.to_string(),
        message_id: inbound.message_id.to_string(),
        emoji: config.ack_emoji.clone(),
    }];
    if inbound.is_group && config.send_group_welcome {
        actions.push(RelayAction::Welcome {
            group_id: inbound.chat_id.to_string(),
            body: welcome_message(inbound.sender_name),
        });
    }
    actions
}

pub fn welcome_message(name: &str) -> String {
    format!("Welcome to the group, {name}! 👋 Your introduction has been validated successfully.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    fn ctx(is_group: bool) -> InboundContext<'static> {
        InboundContext {
            chat_id: if is_group { "120363@g.us" } else { "919812345678" },
            message_id: "wamid.1",
            sender_name: "Asha",
            is_group,
        }
    }

    #[test]
    fn introduction_needs_three_phrases() {
        assert!(is_introduction_message(
            "good morning respected seniors. my name is x. i am from y"
        ));
        assert!(!is_introduction_message("My name is Asha. I am from Pune."));
        assert!(!is_introduction_message("ok thanks"));
    }

    #[test]
    fn group_detection() {
        assert!(is_group_message("120363025246125486@g.us"));
        assert!(!is_group_message("919812345678"));
    }

    #[test]
    fn target_group_overrides_monitor_flag() {
        let config = RelayConfig {
            target_group_id: Some("a@g.us".into()),
            monitor_group_chats: true,
            ..RelayConfig::default()
        };
        assert!(should_monitor_group(&config, "a@g.us"));
        assert!(!should_monitor_group(&config, "b@g.us"));
    }

    #[test]
    fn groups_ignored_by_default() {
        let config = RelayConfig::default();
        assert!(!should_monitor_group(&config, "a@g.us"));
        let config = RelayConfig {
            monitor_group_chats: true,
            ..RelayConfig::default()
        };
        assert!(should_monitor_group(&config, "a@g.us"));
    }

    #[test]
    fn rejected_message_gets_repeat_reply() {
        let result = ValidationResult::from_errors(vec![ValidationError::message_level("bad")]);
        let actions = plan_actions(&RelayConfig::default(), &ctx(false), &result);
        assert_eq!(
            actions,
            vec![RelayAction::Reply {
                to: "919812345678".into(),
                body: "repeat".into(),
                reply_to: "wamid.1".into(),
            }]
        );
    }

    #[test]
    fn accepted_direct_message_only_reacts() {
        let result = ValidationResult::from_errors(vec![]);
        let actions = plan_actions(&RelayConfig::default(), &ctx(false), &result);
        assert_eq!(actions.len(), 1);
        assert!(matches!(&actions[0], RelayAction::React { emoji, .. } if emoji == "👍"));
    }

    #[test]
    fn accepted_group_message_reacts_and_welcomes() {
        let result = ValidationResult::from_errors(vec![]);
        let actions = plan_actions(&RelayConfig::default(), &ctx(true), &result);
        assert_eq!(actions.len(), 2);
        assert!(matches!(
            &actions[1],
            RelayAction::Welcome { group_id, body } if group_id == "120363@g.us" && body.contains("Asha")
        ));
    }

    #[test]
    fn welcome_can_be_disabled() {
        let config = RelayConfig {
            send_group_welcome: false,
            ..RelayConfig::default()
        };
        let result = ValidationResult::from_errors(vec![]);
        assert_eq!(plan_actions(&config, &ctx(true), &result).len(), 1);
    }
}
