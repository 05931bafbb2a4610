//! Trigger rules - predicates over message text paired with reply handlers

use crate::domain::entities::Message;

/// Reply handler function type
pub type Handler = Box<dyn Fn(&Message) -> String + Send + Sync>;

/// What a rule listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// First word equals the command name, with or without the prefix
    Command { name: String, prefix: String },
    /// Text equals one of the literals exactly (case-sensitive)
    Text(Vec<String>),
    /// Matches every message
    Any,
}

impl Trigger {
    pub fn command(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Trigger::Command {
            name: name.into(),
            prefix: prefix.into(),
        }
    }

    pub fn text<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Trigger::Text(literals.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Trigger::Command { name, prefix } => {
                let Some(first) = text.split_whitespace().next() else {
                    return false;
                };
                let first = if prefix.is_empty() {
                    first
                } else {
                    first.strip_prefix(prefix.as_str()).unwrap_or(first)
                };
                first == name
            }
            Trigger::Text(literals) => literals.iter().any(|l| l == text),
            Trigger::Any => true,
        }
    }
}

/// A named trigger with the handler that answers it
pub struct Rule {
    pub name: String,
    pub description: Option<String>,
    pub trigger: Trigger,
    pub handler: Handler,
}

impl Rule {
    pub fn new<F>(name: impl Into<String>, trigger: Trigger, handler: F) -> Self
    where
        F: Fn(&Message) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            trigger,
            handler: Box::new(handler),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn matches(&self, message: &Message) -> bool {
        self.trigger.matches(&message.text)
    }

    pub fn respond(&self, message: &Message) -> String {
        (self.handler)(message)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .finish()
    }
}
