use std::fmt;

/// An error raised when the topic field cannot start a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    #[error("Input is empty, Please type *something*")]
    Empty,
}

/// A trimmed, non-empty research topic.
///
/// Holding a `Topic` is the only way to ask for a connection, so blank input
/// can never reach the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    pub fn parse(raw: &str) -> Result<Self, TopicError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let topic = Topic::parse("  quantum computing \n").unwrap();
        assert_eq!(topic.as_str(), "quantum computing");
        assert_eq!(topic.to_string(), "quantum computing");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Topic::parse(""), Err(TopicError::Empty));
        assert_eq!(Topic::parse(" \t\n "), Err(TopicError::Empty));
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(Topic::parse(" a  b ").unwrap().as_str(), "a  b");
    }
}
