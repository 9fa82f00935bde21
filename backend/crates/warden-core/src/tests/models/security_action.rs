use crate::SecurityAction;

use std::str::FromStr;

#[test]
fn test_every_action_parses_back_from_its_db_string() {
    for action in SecurityAction::ALL {
        assert_eq!(SecurityAction::from_str(action.as_str()).unwrap(), action);
    }
}

#[test]
fn test_fingerprint_mismatch_db_string() {
    assert_eq!(
        SecurityAction::FingerprintMismatch.as_str(),
        "FINGERPRINT_MISMATCH"
    );
    assert_eq!(
        SecurityAction::FingerprintMismatch.to_string(),
        "FINGERPRINT_MISMATCH"
    );
}

#[test]
fn test_unknown_action_is_rejected() {
    assert!(SecurityAction::from_str("LOGIN").is_err());
}
