//! Message router - Picks the one rule that answers a message

use crate::domain::entities::{Message, Rule, Trigger};

/// Reply produced by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Name of the rule that produced the reply
    pub rule: String,
    pub text: String,
}

/// Ordered rule list with a catch-all fallback.
///
/// Rules are tried in registration order and the first match wins. The
/// fallback is held apart from the list so it only runs after every explicit
/// rule has failed.
pub struct MessageRouter {
    rules: Vec<Rule>,
    fallback: Rule,
}

impl MessageRouter {
    pub fn new<F>(fallback: F) -> Self
    where
        F: Fn(&Message) -> String + Send + Sync + 'static,
    {
        Self {
            rules: Vec::new(),
            fallback: Rule::new("fallback", Trigger::Any, fallback),
        }
    }

    /// Append a rule after the ones already registered
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Find the handling rule; falls back when nothing matches
    pub fn select(&self, message: &Message) -> &Rule {
        self.rules
            .iter()
            .find(|rule| rule.matches(message))
            .unwrap_or(&self.fallback)
    }

    /// Route a message to exactly one handler
    pub fn route(&self, message: &Message) -> Reply {
        let rule = self.select(message);
        tracing::debug!("[{}] '{}' -> {}", message.chat_id, message.preview(), rule.name);

        Reply {
            rule: rule.name.clone(),
            text: rule.respond(message),
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
