use crate::{Session, SessionStatus};

use chrono::{Duration, Utc};

fn session_expiring_in(minutes: i64) -> Session {
    Session::new(
        "S1".to_string(),
        "user-1".to_string(),
        Utc::now() + Duration::minutes(minutes),
    )
}

#[test]
fn given_future_expiry_when_checked_then_usable() {
    let session = session_expiring_in(15);

    assert!(!session.is_past_expiry(Utc::now()));
    assert!(session.is_usable(Utc::now()));
}

#[test]
fn given_past_expiry_when_checked_then_not_usable() {
    let session = session_expiring_in(-1);

    assert!(session.is_past_expiry(Utc::now()));
    assert!(!session.is_usable(Utc::now()));
}

#[test]
fn given_expired_status_with_future_expiry_when_checked_then_not_usable() {
    let mut session = session_expiring_in(15);
    session.status = SessionStatus::Expired;

    assert!(!session.is_usable(Utc::now()));
}

#[test]
fn given_expiry_equal_to_now_when_checked_then_past_expiry() {
    let now = Utc::now();
    let session = Session::new("S1".to_string(), "user-1".to_string(), now);

    assert!(session.is_past_expiry(now));
}
