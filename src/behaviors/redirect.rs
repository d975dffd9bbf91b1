//! `/redirect/{n}`: a chain of `n` 302 hops ending in a 200.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

use crate::behaviors::BehaviorError;
use crate::config::BehaviorConfig;
use crate::http::response::status_text;

pub const COMPLETED: &str = "completed redirects";

pub fn respond(param: &str, limits: &BehaviorConfig) -> Result<Response, BehaviorError> {
    let remaining: u64 = param
        .parse()
        .map_err(|_| BehaviorError::validation("Invalid redirects"))?;

    if remaining == 0 {
        return Ok(Response::new(Body::from(COMPLETED)));
    }
    if remaining > u64::from(limits.max_redirects) {
        return Err(BehaviorError::validation(format!(
            "maximum of {} redirects allowed",
            limits.max_redirects
        )));
    }

    let location = format!("/redirect/{}", remaining - 1);
    let mut response = status_text(StatusCode::FOUND);
    response.headers_mut().insert(
        header::LOCATION,
        HeaderValue::from_str(&location).map_err(|e| BehaviorError::validation(e.to_string()))?,
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(param: &str) -> Result<Response, BehaviorError> {
        respond(param, &BehaviorConfig::default())
    }

    #[tokio::test]
    async fn test_zero_completes() {
        let response = redirect("0").unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&body[..], COMPLETED.as_bytes());
    }

    #[test]
    fn test_each_hop_points_to_the_next() {
        for n in 1..=20u32 {
            let response = redirect(&n.to_string()).unwrap();
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(
                response.headers()[header::LOCATION],
                format!("/redirect/{}", n - 1).as_str()
            );
        }
    }

    #[test]
    fn test_limit() {
        assert_eq!(
            redirect("21").unwrap_err(),
            BehaviorError::validation("maximum of 20 redirects allowed")
        );
        assert_eq!(
            redirect("99999999999").unwrap_err(),
            BehaviorError::validation("maximum of 20 redirects allowed")
        );
    }

    #[test]
    fn test_invalid_input() {
        for param in ["x", "-1", "1.5", ""] {
            assert_eq!(
                redirect(param).unwrap_err(),
                BehaviorError::validation("Invalid redirects"),
                "param {param}"
            );
        }
    }
}
