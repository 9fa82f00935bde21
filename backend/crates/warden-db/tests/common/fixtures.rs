use warden_core::{SecurityAction, SecurityEvent, Session, SessionStatus};

use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed reference instant so expiry comparisons are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// ACTIVE session expiring `expires_in_secs` after `base_time()` (negative = already past)
pub fn create_test_session(id: &str, user_id: &str, expires_in_secs: i64) -> Session {
    Session {
        id: id.to_string(),
        user_id: user_id.to_string(),
        status: SessionStatus::Active,
        fingerprint: Some("10.0.0.1|TestAgent/1.0".to_string()),
        user_agent: None,
        expires_at: base_time() + Duration::seconds(expires_in_secs),
        created_at: base_time() - Duration::hours(1),
    }
}

pub fn create_test_event(action: SecurityAction, user_id: Option<&str>) -> SecurityEvent {
    SecurityEvent::new(
        action,
        user_id.map(str::to_string),
        "10.0.0.1".to_string(),
        Some("TestAgent/1.0".to_string()),
        base_time(),
    )
}
