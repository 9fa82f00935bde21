use crate::Fingerprint;

#[test]
fn test_derive_joins_ip_and_user_agent() {
    assert_eq!(Fingerprint::derive("ip1", Some("uaA")), "ip1|uaA");
}

#[test]
fn test_derive_without_user_agent_keeps_ip() {
    assert_eq!(Fingerprint::derive("10.0.0.5", None), "10.0.0.5|");
}

#[test]
fn test_matches_ignores_surrounding_whitespace_only() {
    assert!(Fingerprint::matches("ip1|uaA", " ip1|uaA "));
    assert!(!Fingerprint::matches("ip1|uaA", "ip1|uaB"));
    assert!(!Fingerprint::matches("ip1|uaA", "ip1|uaa"));
}
