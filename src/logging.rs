//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    let is_json = headers.headers.get(CONTENT_TYPE)
        == Some(&"application/json".parse().expect("valid header value"));

    if is_json {
        let display_text = redact_field(&body_text, "password");
        let display_text = redact_field(&display_text, "new_password");
        let display_text = redact_field(&display_text, "confirm_new_password");
        log_request(&headers, &display_text);
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

/// Replace the string value of `field_name` in a JSON body with asterisks.
///
/// Works on the raw text rather than a parsed document so that malformed
/// bodies are still logged (and still redacted where possible). The value is
/// spliced out at its position in the body, so a password that also appears
/// elsewhere (e.g. as part of the email) masks the right occurrence.
fn redact_field(body_text: &str, field_name: &str) -> String {
    let needle = format!("\"{field_name}\"");

    let Some(key_position) = body_text.find(&needle) else {
        return body_text.to_string();
    };

    let after_key = &body_text[key_position + needle.len()..];
    let Some(colon_offset) = after_key.find(':') else {
        return body_text.to_string();
    };
    let after_colon = &after_key[colon_offset + 1..];

    let Some(quote_offset) = after_colon.find('"') else {
        return body_text.to_string();
    };
    let value_start = body_text.len() - after_colon.len() + quote_offset + 1;

    let mut value_end = None;
    let mut previous_char = '"';
    for (index, character) in body_text[value_start..].char_indices() {
        if character == '"' && previous_char != '\\' {
            value_end = Some(value_start + index);
            break;
        }
        previous_char = character;
    }

    match value_end {
        Some(end) => format!(
            "{}********{}",
            &body_text[..value_start],
            &body_text[end..]
        ),
        None => body_text.to_string(),
    }
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

/// The maximum number of body bytes logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Cut `text` down to at most `limit` bytes without splitting a multibyte
/// character. Bodies may hold arbitrary UTF-8, e.g. emoji category names.
fn truncate_at_char_boundary(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate_at_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate_at_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}


#[cfg(test)]
mod truncate_tests {
    use super::{LOG_BODY_LENGTH_LIMIT, log_request, truncate_at_char_boundary};

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_at_char_boundary("hello", 64), "hello");
    }

    #[test]
    fn ascii_text_is_cut_at_the_limit() {
        let text = "a".repeat(100);

        assert_eq!(truncate_at_char_boundary(&text, 64).len(), 64);
    }

    #[test]
    fn multibyte_character_straddling_the_limit_is_dropped() {
        // The é occupies bytes 63..65, straddling the 64-byte limit.
        let text = format!("{}é{}", "a".repeat(63), "b".repeat(10));

        let truncated = truncate_at_char_boundary(&text, 64);

        assert_eq!(truncated, "a".repeat(63));
    }

    #[test]
    fn logging_a_long_multibyte_body_does_not_panic() {
        let body = format!("{}é{}", "a".repeat(LOG_BODY_LENGTH_LIMIT - 1), "b".repeat(10));
        let (parts, _) = axum::http::Request::new(()).into_parts();

        log_request(&parts, &body);
    }
}
