// src/api/parser.rs
//! Response-body handling.
//!
//! Tumblr wraps payloads as `{meta, response}`. Only the parts the client
//! acts on are decoded here: the status envelope, poll blocks inside a
//! post's `content`, the reblog keys of a parent post, and poll result sets.
//! Everything else is handed back untouched.

use super::wire::WirePoll;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;
use crate::model::{PollBlock, PollResults};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    meta: Option<Meta>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

/// Keys a reblog needs from the post being reblogged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParentPost {
    pub tumblelog_uuid: String,
    pub reblog_key: String,
}

/// Decode a raw HTTP response body, turning error statuses into
/// [`AppError::TumblrService`].
pub fn parse_body(status: u16, body: &str, url: &str) -> Result<Value, AppError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| {
            log::error!("Failed to parse response from {}: {}", url, e);
            AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
        });
    }

    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| {
            let detail = envelope
                .errors
                .into_iter()
                .find_map(|error| error.detail.or(error.title));
            detail.or_else(|| envelope.meta.and_then(|meta| meta.msg))
        })
        .unwrap_or_else(|| format!("HTTP {} from {}", status, url));

    Err(AppError::TumblrService { status, message })
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// The payload inside a `{meta, response}` envelope, or the body itself when
/// it is not enveloped.
pub fn unwrap_envelope(body: &Value) -> &Value {
    body.get("response").unwrap_or(body)
}

/// Poll blocks in a fetched post, in content order. Non-poll blocks are skipped.
pub fn decode_post_polls(post: &Value) -> Result<Vec<PollBlock>, AppError> {
    let content = unwrap_envelope(post)
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::MalformedResponse("post has no 'content' array".to_string()))?;

    content
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("poll"))
        .map(|block| -> Result<PollBlock, AppError> {
            let wire = WirePoll::deserialize(block)?;
            Ok(PollBlock::try_from(wire)?)
        })
        .collect()
}

/// Reblog keys of a fetched post.
pub fn decode_parent_post(post: &Value) -> Result<ParentPost, AppError> {
    ParentPost::deserialize(unwrap_envelope(post))
        .map_err(|e| AppError::MalformedResponse(format!("cannot reblog post: {}", e)))
}

/// Vote counts from the results endpoint, enveloped or bare.
pub fn parse_poll_results(body: &Value) -> Result<PollResults, AppError> {
    let results = unwrap_envelope(body).get("results").ok_or_else(|| {
        AppError::MalformedResponse("poll result body has no 'results' mapping".to_string())
    })?;
    Ok(PollResults::deserialize(results)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_success_body_parsed() {
        let value = parse_body(200, r#"{"meta":{"status":200},"response":{}}"#, "u").unwrap();
        assert_eq!(value["meta"]["status"], json!(200));
    }

    #[test]
    fn test_error_message_prefers_detail() {
        let body = r#"{"meta":{"status":400,"msg":"Bad Request"},"errors":[{"title":"Bad","detail":"Poll needs two answers"}]}"#;
        match parse_body(400, body, "u").unwrap_err() {
            AppError::TumblrService { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Poll needs two answers");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_error_falls_back_to_meta_then_status() {
        let err = parse_body(401, r#"{"meta":{"status":401,"msg":"Unauthorized"}}"#, "u")
            .unwrap_err();
        assert_eq!(err.to_string(), "Tumblr API returned an error (401): Unauthorized");

        let err = parse_body(502, "<html>", "https://x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tumblr API returned an error (502): HTTP 502 from https://x"
        );
    }

    #[test]
    fn test_garbage_success_body() {
        let err = parse_body(200, "not json", "u").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn test_decode_post_polls_skips_other_blocks() {
        let post = json!({"response": {"content": [
            {"type": "text", "text": "hi"},
            {"type": "poll", "question": "Q", "client_id": "p1",
             "answers": [{"answer_text": "A", "client_id": "a"}],
             "settings": {"close_status": "closed-after", "expire_after": 604800}},
            {"type": "poll", "question": "Q2", "client_id": "p2",
             "answers": [], "settings": {"expire_after": 86400}}
        ]}});

        let polls = decode_post_polls(&post).unwrap();
        let ids: Vec<&str> = polls.iter().map(|p| p.poll_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_decode_post_polls_requires_content() {
        assert!(decode_post_polls(&json!({"response": {}})).is_err());
    }

    #[test]
    fn test_poll_results_enveloped_or_bare() {
        let enveloped = json!({"meta": {"status": 200}, "response": {"results": {"a": 2, "b": 0}}});
        let bare = json!({"results": {"a": 2, "b": 0}});

        let expected: PollResults = [("a", 2u64), ("b", 0u64)].into_iter().collect();
        assert_eq!(parse_poll_results(&enveloped).unwrap(), expected);
        assert_eq!(parse_poll_results(&bare).unwrap(), expected);
        assert!(parse_poll_results(&json!({"response": {}})).is_err());
    }

    #[test]
    fn test_parent_post_keys() {
        let post = json!({"response": {"tumblelog_uuid": "t:abc", "reblog_key": "rk", "id": 1}});
        assert_eq!(
            decode_parent_post(&post).unwrap(),
            ParentPost {
                tumblelog_uuid: "t:abc".to_string(),
                reblog_key: "rk".to_string()
            }
        );
    }
}
