// tests/client_flows.rs
//! End-to-end client flows over an in-memory transport.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tumblr_npf::{
    AppError, BlogName, ContentBuilder, Method, PollSettings, PostId, ReblogTarget,
    RequestDescription, Transport, TumblrClient,
};

/// Replays canned responses in order and records every request it sees.
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, AppError>>>,
    seen: Mutex<Vec<RequestDescription>>,
}

impl ScriptedTransport {
    fn replying(responses: Vec<Result<Value, AppError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<RequestDescription> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &RequestDescription) -> Result<Value, AppError> {
        self.seen.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"meta": {"status": 200}, "response": {}})))
    }
}

fn client(transport: &Arc<ScriptedTransport>) -> TumblrClient<Arc<ScriptedTransport>> {
    TumblrClient::new(Arc::clone(transport), BlogName::new("staff").unwrap())
}

fn post_with_poll() -> Value {
    json!({
        "meta": {"status": 200, "msg": "OK"},
        "response": {
            "id_string": "42",
            "tumblelog_uuid": "t:abc",
            "reblog_key": "rk1",
            "content": [
                {"type": "text", "text": "vote!"},
                {
                    "type": "poll",
                    "question": "Best?",
                    "client_id": "poll-1",
                    "answers": [
                        {"answer_text": "A", "client_id": "a"},
                        {"answer_text": "B", "client_id": "b"},
                        {"answer_text": "C", "client_id": "c"}
                    ],
                    "settings": {"close_status": "closed-after", "expire_after": 86400}
                }
            ]
        }
    })
}

#[tokio::test]
async fn test_post_sends_assembled_body_to_blog_route() {
    let transport = ScriptedTransport::replying(vec![Ok(json!({"response": {"id": 1}}))]);
    let mut builder = ContentBuilder::new();
    builder.text("hello");

    let response = client(&transport)
        .post(builder.build(), &["a", "b"], Map::new())
        .await
        .unwrap();
    assert_eq!(response, json!({"response": {"id": 1}}));

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].route, "blog/staff/posts");
    assert_eq!(seen[0].method, Method::Post);
    let body = seen[0].body.as_ref().unwrap();
    assert_eq!(body["content"], json!([{"type": "text", "text": "hello"}]));
    assert_eq!(body["tags"], json!("a, b"));
}

#[tokio::test]
async fn test_poll_results_joins_definition_and_votes() {
    let transport = ScriptedTransport::replying(vec![
        Ok(post_with_poll()),
        Ok(json!({"meta": {"status": 200}, "response": {"results": {"a": 5, "c": 2}}})),
    ]);

    let enriched = client(&transport)
        .poll_results(&PostId::parse("42").unwrap(), None)
        .await
        .unwrap();

    let votes: Vec<(&str, u64)> = enriched
        .options
        .iter()
        .map(|tally| (tally.option_id.as_str(), tally.votes))
        .collect();
    assert_eq!(votes, vec![("a", 5), ("b", 0), ("c", 2)]);
    assert_eq!(enriched.total_votes, 7);
    assert_eq!(enriched.question, "Best?");

    let routes: Vec<String> = transport.seen().into_iter().map(|r| r.route).collect();
    assert_eq!(
        routes,
        vec!["blog/staff/posts/42", "polls/staff/42/poll-1/results"]
    );
}

#[tokio::test]
async fn test_poll_results_without_poll() {
    let transport = ScriptedTransport::replying(vec![Ok(json!({
        "response": {"content": [{"type": "text", "text": "no poll"}]}
    }))]);

    let err = client(&transport)
        .poll_results(&PostId::parse("7").unwrap(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NoPollInPost { ref post_id } if post_id == "7"));
    assert_eq!(transport.seen().len(), 1);
}

#[tokio::test]
async fn test_reblog_carries_parent_keys() {
    let transport = ScriptedTransport::replying(vec![Ok(post_with_poll())]);
    let mut builder = ContentBuilder::new();
    builder
        .poll_with("Another?", ["yes", "no"], PollSettings::default())
        .unwrap();

    let target = ReblogTarget {
        from_id: PostId::parse("42").unwrap(),
        from_blog: Some(BlogName::new("source").unwrap()),
        to_blog: None,
    };
    client(&transport)
        .reblog(&target, builder.build(), &["re"])
        .await
        .unwrap();

    let seen = transport.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].route, "blog/source/posts/42");
    assert_eq!(seen[1].route, "blog/staff/posts");

    let body = seen[1].body.as_ref().unwrap();
    assert_eq!(body["parent_post_id"], json!(42));
    assert_eq!(body["parent_tumblelog_uuid"], json!("t:abc"));
    assert_eq!(body["reblog_key"], json!("rk1"));
    assert_eq!(body["content"][0]["type"], json!("poll"));
}

#[tokio::test]
async fn test_service_errors_pass_through_unchanged() {
    let transport = ScriptedTransport::replying(vec![Err(AppError::TumblrService {
        status: 404,
        message: "Not Found".to_string(),
    })]);

    let err = client(&transport)
        .get_post(&PostId::parse("1").unwrap(), None)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(transport.seen().len(), 1);
}

#[tokio::test]
async fn test_invalid_content_fails_before_any_request() {
    let transport = ScriptedTransport::replying(vec![]);
    let blocks = vec![tumblr_npf::Block::Row(tumblr_npf::RowBlock { images: vec![] })];

    let err = client(&transport)
        .post(&blocks, &["x"], Map::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Serialization(_)));
    assert!(transport.seen().is_empty());
}
