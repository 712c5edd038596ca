//! Core error types for the class model
//!
//! `ModelError` covers everything a store operation can reject. Malformed
//! member notation is not an error for the model: it is classified by
//! `NotationError` and dropped from generated output.

use thiserror::Error;

/// Errors raised by model mutations and script loading
///
/// A store operation that returns one of these has not changed the model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Class name cannot be empty")]
    EmptyClassName,

    #[error("Class '{name}' already exists")]
    DuplicateClass { name: String },

    #[error("Class '{name}' does not exist")]
    UnknownClass { name: String },

    #[error("One or both classes do not exist: '{source_class}' -> '{target_class}'")]
    MissingEndpoints {
        source_class: String,
        target_class: String,
    },

    #[error("Class '{name}' cannot be related to itself")]
    SelfRelation { name: String },

    #[error("Class '{child}' already inherits '{existing}', cannot also inherit '{requested}'")]
    MultipleParents {
        child: String,
        existing: String,
        requested: String,
    },

    #[error("Class '{child}' cannot inherit '{parent}': '{parent}' already descends from '{child}'")]
    InheritanceCycle { child: String, parent: String },

    #[error("Parse error: {message} at line {line}, column {column}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ModelError {
    /// Create a new parse error
    pub fn parse_error(message: String, line: usize, column: usize) -> Self {
        Self::ParseError {
            message,
            line,
            column,
        }
    }

    pub fn duplicate_class(name: impl Into<String>) -> Self {
        Self::DuplicateClass { name: name.into() }
    }

    pub fn unknown_class(name: impl Into<String>) -> Self {
        Self::UnknownClass { name: name.into() }
    }

    pub fn missing_endpoints(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::MissingEndpoints {
            source_class: source.into(),
            target_class: target.into(),
        }
    }

    /// True for the validation failures a user can fix by editing the diagram
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::ParseError { .. } | Self::IoError { .. })
    }
}

/// Result alias for model operations
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Classification of a member line that did not produce a member
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("blank member line")]
    Blank,

    #[error("malformed member line '{line}': {reason}")]
    Malformed { line: String, reason: String },
}

impl NotationError {
    pub fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let error = ModelError::parse_error("unexpected '}'".to_string(), 5, 10);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Parse error"));
        assert!(error_msg.contains("unexpected '}'"));
        assert!(error_msg.contains("line 5"));
        assert!(error_msg.contains("column 10"));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_missing_endpoints() {
        let error = ModelError::missing_endpoints("Order", "Ghost");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("do not exist"));
        assert!(error_msg.contains("Order"));
        assert!(error_msg.contains("Ghost"));
        assert!(error.is_validation());
    }

    #[test]
    fn test_multiple_parents() {
        let error = ModelError::MultipleParents {
            child: "Dog".to_string(),
            existing: "Animal".to_string(),
            requested: "Pet".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Class 'Dog' already inherits 'Animal', cannot also inherit 'Pet'"
        );
    }

    #[test]
    fn test_inheritance_cycle() {
        let error = ModelError::InheritanceCycle {
            child: "Club".to_string(),
            parent: "Player".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Class 'Club' cannot inherit 'Player': 'Player' already descends from 'Club'"
        );
        assert!(error.is_validation());
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ModelError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }

    #[test]
    fn test_notation_error_display() {
        let error = NotationError::malformed("+ (", "expected identifier");
        assert!(error.to_string().contains("'+ ('"));
        assert!(!error.is_blank());
        assert!(NotationError::Blank.is_blank());
    }
}
