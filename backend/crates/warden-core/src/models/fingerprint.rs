/// Coarse device/context identifier, `"<client ip>|<user agent>"`.
pub struct Fingerprint;

impl Fingerprint {
    const SEPARATOR: char = '|';

    /// Derive a fingerprint from the request context. A missing user-agent
    /// contributes an empty component so the IP alone still binds.
    pub fn derive(client_ip: &str, user_agent: Option<&str>) -> String {
        format!(
            "{}{}{}",
            client_ip.trim(),
            Self::SEPARATOR,
            user_agent.map(str::trim).unwrap_or_default()
        )
    }

    /// Fingerprints are compared verbatim; only surrounding whitespace is ignored.
    pub fn matches(expected: &str, presented: &str) -> bool {
        expected.trim() == presented.trim()
    }
}
