//! Tests for core error types

use classgen::core::{ModelError, NotationError};

#[test]
fn test_parse_error() {
    let error = ModelError::parse_error("Invalid syntax".to_string(), 5, 10);
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Parse error"));
    assert!(error_msg.contains("Invalid syntax"));
    assert!(error_msg.contains("line 5"));
    assert!(error_msg.contains("column 10"));
    assert!(!error.is_validation());
}

#[test]
fn test_missing_endpoints() {
    let error = ModelError::missing_endpoints("Team", "Player");
    assert_eq!(
        error.to_string(),
        "One or both classes do not exist: 'Team' -> 'Player'"
    );
    assert!(error.is_validation());
}

#[test]
fn test_validation_messages() {
    assert_eq!(
        ModelError::EmptyClassName.to_string(),
        "Class name cannot be empty"
    );
    assert_eq!(
        ModelError::duplicate_class("Dog").to_string(),
        "Class 'Dog' already exists"
    );
    assert_eq!(
        ModelError::unknown_class("Cat").to_string(),
        "Class 'Cat' does not exist"
    );
    let parents = ModelError::MultipleParents {
        child: "Dog".to_string(),
        existing: "Animal".to_string(),
        requested: "Pet".to_string(),
    };
    assert!(parents.to_string().contains("already inherits 'Animal'"));
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.cd");
    let error: ModelError = io.into();
    assert!(matches!(error, ModelError::IoError { .. }));
    assert!(error.to_string().contains("missing.cd"));
}

#[test]
fn test_notation_error() {
    let error = NotationError::malformed("+ :int", "expected identifier");
    assert!(!error.is_blank());
    assert_eq!(
        error.to_string(),
        "malformed member line '+ :int': expected identifier"
    );
    assert!(NotationError::Blank.is_blank());
}

#[test]
fn test_model_error_into_anyhow() {
    let error: anyhow::Error = ModelError::EmptyClassName.into();
    assert!(error.downcast_ref::<ModelError>().is_some());
}
