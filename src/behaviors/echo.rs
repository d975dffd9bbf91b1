//! Request reflection: `/anything`, `/user-agent`, `/ip` and `/bearer`.

use std::net::SocketAddr;

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, Request},
    response::Response,
};
use serde::Serialize;

use crate::behaviors::BehaviorError;
use crate::http::response::text_json;

/// Headers that describe a single connection and must not be echoed.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::CONTENT_LENGTH,
];

/// Echo the request headers and stream the body back unchanged.
pub fn anything(request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    for (name, value) in parts.headers.iter() {
        if HOP_BY_HOP.contains(name) || name.as_str() == "keep-alive" {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    response
}

#[derive(Serialize)]
struct UserAgent<'a> {
    #[serde(rename = "user-agent")]
    user_agent: &'a str,
}

pub fn user_agent(headers: &HeaderMap) -> Response {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    text_json(&UserAgent { user_agent })
}

#[derive(Serialize)]
struct Origin {
    origin: String,
}

pub fn ip(peer: SocketAddr) -> Response {
    text_json(&Origin {
        origin: peer.ip().to_string(),
    })
}

#[derive(Serialize)]
struct Authenticated<'a> {
    authenticated: bool,
    token: &'a str,
}

/// Accept only `Authorization: Bearer <token>`.
pub fn bearer(headers: &HeaderMap) -> Result<Response, BehaviorError> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let mut fields = authorization.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some("Bearer"), Some(token), None) => Ok(text_json(&Authenticated {
            authenticated: true,
            token,
        })),
        _ => Err(BehaviorError::Unauthorized),
    }
}
