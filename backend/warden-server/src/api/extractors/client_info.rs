//! Lifting the authentication inputs out of an HTTP request

use warden_auth::AuthRequest;

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{HeaderMap, header, request::Parts},
};

pub const TOKEN_COOKIE: &str = "token";
pub const DEVICE_FINGERPRINT_HEADER: &str = "x-device-fingerprint";
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

const UNKNOWN_CLIENT: &str = "unknown";

/// Client IP: the first `X-Forwarded-For` hop when trusted, else the peer.
pub fn client_ip(parts: &Parts, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for
        && let Some(first_hop) = header_str(&parts.headers, FORWARDED_FOR_HEADER)
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty())
    {
        return first_hop.to_string();
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Value of the named cookie, if the request carries it
pub fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

pub fn auth_request(parts: &Parts, trust_forwarded_for: bool) -> AuthRequest {
    let headers = &parts.headers;

    AuthRequest {
        authorization: header_str(headers, header::AUTHORIZATION.as_str()).map(str::to_string),
        cookie_token: cookie(headers, TOKEN_COOKIE),
        client_ip: client_ip(parts, trust_forwarded_for),
        user_agent: header_str(headers, header::USER_AGENT.as_str()).map(str::to_string),
        device_fingerprint: header_str(headers, DEVICE_FINGERPRINT_HEADER).map(str::to_string),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
