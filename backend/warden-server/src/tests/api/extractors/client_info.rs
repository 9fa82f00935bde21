use crate::api::extractors::client_info::{auth_request, client_ip, cookie};

use std::net::SocketAddr;

use axum::{body::Body, extract::ConnectInfo, http::Request};

fn parts(request: Request<Body>) -> axum::http::request::Parts {
    request.into_parts().0
}

#[test]
fn given_trusted_forwarded_for_when_client_ip_then_first_hop_used() {
    let parts = parts(
        Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap(),
    );

    assert_eq!(client_ip(&parts, true), "203.0.113.7");
}

#[test]
fn given_untrusted_forwarded_for_when_client_ip_then_peer_used() {
    let mut request = Request::builder()
        .header("X-Forwarded-For", "203.0.113.7")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo("192.0.2.10:5555".parse::<SocketAddr>().unwrap()));
    let parts = parts(request);

    assert_eq!(client_ip(&parts, false), "192.0.2.10");
}

#[test]
fn given_no_peer_and_no_header_when_client_ip_then_unknown() {
    let parts = parts(Request::builder().body(Body::empty()).unwrap());

    assert_eq!(client_ip(&parts, true), "unknown");
}

#[test]
fn given_several_cookies_when_cookie_then_named_value_returned() {
    let parts = parts(
        Request::builder()
            .header("Cookie", "theme=dark; token=a.b.c; lang=en")
            .body(Body::empty())
            .unwrap(),
    );

    assert_eq!(cookie(&parts.headers, "token"), Some("a.b.c".to_string()));
    assert_eq!(cookie(&parts.headers, "missing"), None);
}

#[test]
fn given_full_request_when_auth_request_then_all_inputs_lifted() {
    let parts = parts(
        Request::builder()
            .header("Authorization", "Bearer x.y.z")
            .header("Cookie", "token=a.b.c")
            .header("User-Agent", "uaA")
            .header("X-Device-Fingerprint", "device-42")
            .header("X-Forwarded-For", "203.0.113.7")
            .body(Body::empty())
            .unwrap(),
    );

    let request = auth_request(&parts, true);

    assert_eq!(request.authorization.as_deref(), Some("Bearer x.y.z"));
    assert_eq!(request.cookie_token.as_deref(), Some("a.b.c"));
    assert_eq!(request.user_agent.as_deref(), Some("uaA"));
    assert_eq!(request.device_fingerprint.as_deref(), Some("device-42"));
    assert_eq!(request.client_ip, "203.0.113.7");
    assert_eq!(request.credential(), Some("x.y.z"));
}
