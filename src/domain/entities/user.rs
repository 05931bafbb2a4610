use std::fmt;

/// Name used when the transport does not report one
pub const DEFAULT_DISPLAY_NAME: &str = "Customer";

/// Represents the sender of a message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Set the display name; blank names are treated as absent
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
