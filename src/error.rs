use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead not found: {0}")]
    LeadNotFound(String),

    #[error("segment not found: {0}")]
    SegmentNotFound(String),

    #[error("saved view not found: {0}")]
    ViewNotFound(String),

    #[error("invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("no {0}<N> ids left")]
    IdsExhausted(String),

    #[error("invalid workspace: {0}")]
    InvalidWorkspace(String),
}

pub type Result<T> = std::result::Result<T, LeadError>;

/// Field-level form errors, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|(_, m)| m.as_str()).collect();
        f.write_str(&messages.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_are_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_display_lists_one_message_per_line() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name is required");
        errors.add("source", "Source is required");
        assert_eq!(errors.to_string(), "Name is required\nSource is required");
        assert_eq!(errors.get("source"), Some("Source is required"));
        assert_eq!(errors.get("email"), None);

        let err: LeadError = errors.into();
        assert!(matches!(err, LeadError::Validation(_)));
    }
}
