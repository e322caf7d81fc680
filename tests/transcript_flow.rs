use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

use chatflex::error::ChatError;
use chatflex::llm::chat::{ ApiMessage, ChatGateway };
use chatflex::models::chat::{ ImageInput, Part, Role, Turn };
use chatflex::transcript::Transcript;

struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, ChatError>>>,
    calls: Mutex<Vec<Vec<ApiMessage>>>,
}

impl ScriptedGateway {
    fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, ChatError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatGateway for ScriptedGateway {
    async fn complete(&self, messages: &[ApiMessage]) -> Result<String, ChatError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ChatError::MalformedResponse("no scripted reply")))
    }
}

#[tokio::test]
async fn full_exchange_then_regenerate() {
    let gateway = ScriptedGateway::new([Ok("B".to_string()), Ok("B2".to_string())]);
    let mut transcript = Transcript::new();

    transcript.append_user(Turn::user("A"));
    let first = transcript.request_completion(&gateway).await.unwrap();
    assert_eq!(first.parts(), &[Part::text("B")]);
    assert_eq!(transcript.len(), 2);

    let second = transcript.regenerate_last(&gateway).await.unwrap().unwrap();
    assert_eq!(second.parts(), &[Part::text("B2")]);
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.turns()[0].parts(), &[Part::text("A")]);
    assert_eq!(transcript.turns()[1].role(), Role::Assistant);
}

#[tokio::test]
async fn multimodal_exchange_reaches_the_gateway_normalized() {
    let gateway = ScriptedGateway::new([Ok("that is a red square".to_string())]);
    let mut transcript = Transcript::new();

    let image = ImageInput {
        bytes: b"fakepixels".to_vec(),
        mime_type: "image/jpeg".to_string(),
    };
    let turn = Turn::from_input(Some("what is this?"), Some(&image)).unwrap();
    transcript.append_user(turn);
    transcript.request_completion(&gateway).await.unwrap();

    let calls = gateway.calls.lock().unwrap();
    let wire = serde_json::to_value(&calls[0]).unwrap();
    assert_eq!(wire[0]["role"], "user");
    assert_eq!(wire[0]["content"][0], json!({ "type": "text", "text": "what is this?" }));
    let url = wire[0]["content"][1]["image_url"]["url"].as_str().unwrap();
    assert!(url.starts_with("data:image/jpg;base64,"));
}

#[tokio::test]
async fn gateway_failure_during_regenerate_shortens_the_transcript() {
    let gateway = ScriptedGateway::new([
        Ok("B".to_string()),
        Err(ChatError::Gateway("503 from upstream".to_string())),
    ]);
    let mut transcript = Transcript::new();
    transcript.append_user(Turn::user("A"));
    transcript.request_completion(&gateway).await.unwrap();

    let err = transcript.regenerate_last(&gateway).await.unwrap_err();
    assert!(matches!(err, ChatError::Gateway(_)));
    // Documented trade-off: the popped reply stays popped.
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript.turns()[0].parts(), &[Part::text("A")]);
    // The generic message leaks no upstream detail.
    assert_eq!(err.to_string(), "model gateway call failed");
}

#[tokio::test]
async fn regenerate_with_no_reply_makes_no_gateway_call() {
    let gateway = ScriptedGateway::new([Ok("unused".to_string())]);
    let mut transcript = Transcript::new();
    transcript.append_user(Turn::user("A"));

    assert!(transcript.regenerate_last(&gateway).await.unwrap().is_none());
    assert_eq!(transcript.len(), 1);
    assert!(gateway.calls.lock().unwrap().is_empty());
}
