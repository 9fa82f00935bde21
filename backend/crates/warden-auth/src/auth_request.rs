use warden_core::Fingerprint;

const BEARER_PREFIX: &str = "Bearer ";

/// The parts of an inbound request the gate looks at, already lifted out of
/// the transport by the HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// Value of the `token` cookie
    pub cookie_token: Option<String>,
    pub client_ip: String,
    pub user_agent: Option<String>,
    /// Client-supplied device fingerprint, if any
    pub device_fingerprint: Option<String>,
}

impl AuthRequest {
    pub fn new(client_ip: impl Into<String>) -> Self {
        Self {
            client_ip: client_ip.into(),
            ..Self::default()
        }
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.authorization = Some(format!("{}{}", BEARER_PREFIX, token));
        self
    }

    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    pub fn with_cookie_token(mut self, token: impl Into<String>) -> Self {
        self.cookie_token = Some(token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_device_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.device_fingerprint = Some(fingerprint.into());
        self
    }

    /// Bearer header first, then the cookie. Blank values count as absent.
    pub fn credential(&self) -> Option<&str> {
        let from_header = self
            .authorization
            .as_deref()
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        from_header.or_else(|| {
            self.cookie_token
                .as_deref()
                .map(str::trim)
                .filter(|token| !token.is_empty())
        })
    }

    /// The fingerprint this request presents: the client's own if sent,
    /// else one derived from IP and user-agent.
    pub fn presented_fingerprint(&self) -> String {
        match self.device_fingerprint.as_deref().map(str::trim) {
            Some(fingerprint) if !fingerprint.is_empty() => fingerprint.to_string(),
            _ => Fingerprint::derive(&self.client_ip, self.user_agent.as_deref()),
        }
    }
}
