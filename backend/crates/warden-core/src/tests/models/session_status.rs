use crate::SessionStatus;

use std::str::FromStr;

#[test]
fn test_session_status_as_str() {
    assert_eq!(SessionStatus::Active.as_str(), "ACTIVE");
    assert_eq!(SessionStatus::Expired.as_str(), "EXPIRED");
}

#[test]
fn test_session_status_from_str() {
    assert_eq!(
        SessionStatus::from_str("ACTIVE").unwrap(),
        SessionStatus::Active
    );
    assert_eq!(
        SessionStatus::from_str("EXPIRED").unwrap(),
        SessionStatus::Expired
    );
    assert!(SessionStatus::from_str("active").is_err());
}

#[test]
fn test_session_status_default() {
    assert_eq!(SessionStatus::default(), SessionStatus::Active);
}

#[test]
fn test_session_status_serializes_uppercase() {
    let json = serde_json::to_string(&SessionStatus::Expired).unwrap();
    assert_eq!(json, "\"EXPIRED\"");
}
