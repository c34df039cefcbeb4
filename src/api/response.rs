//! Chat Completion Responses
//!
//! One `Response` type serves both the buffered result (`object` is
//! `"chat.completion"`) and the streamed chunk (`"chat.completion.chunk"`).
//! Each choice carries exactly one of a full message, an incremental delta,
//! or a choice-level error; the server decides which, the types do not
//! enforce it.

use serde::{Deserialize, Serialize};

/// A chat completion result, whole or partial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response ID
    #[serde(default)]
    pub id: String,

    /// Object type: "chat.completion" or "chat.completion.chunk"
    #[serde(default)]
    pub object: String,

    /// Creation timestamp (Unix seconds)
    #[serde(default)]
    pub created: u64,

    /// Model that produced the completion
    #[serde(default)]
    pub model: String,

    /// System fingerprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_fingerprint: Option<String>,

    /// Candidate completions
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage (on whole responses; some providers attach it to the
    /// final streamed chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// One candidate completion, possibly partial
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Why generation stopped; may be absent on intermediate chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,

    /// Provider-native finish reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_finish_reason: Option<String>,

    /// Completion text (legacy prompt-style completions)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Full message (non-streaming)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ResponseMessage>,

    /// Incremental delta (streaming)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,

    /// Error attributed to this choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// A complete assistant message in a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Role, normally "assistant"
    #[serde(default)]
    pub role: String,

    /// Message content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls issued by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// The incremental portion of a message in one streamed chunk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    /// Role (usually only on the first chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool call fragments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// A model-issued instruction to invoke an external function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool call ID (absent on continuation fragments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Index in the tool_calls array (streaming fragments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,

    /// Type of tool call (usually "function")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,

    /// Function details
    #[serde(default)]
    pub function: FunctionCall,
}

/// Function call details; `arguments` stays a JSON-encoded string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name (absent on continuation fragments)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Arguments as a JSON string, not parsed further
    #[serde(default)]
    pub arguments: String,
}

/// An error the backend attributed to a choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Provider error code
    #[serde(default)]
    pub code: i64,

    /// Human-readable message
    #[serde(default)]
    pub message: String,

    /// Provider-specific details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Response {
    /// Whether this is a streaming chunk rather than a whole completion
    pub fn is_chunk(&self) -> bool {
        self.object == "chat.completion.chunk"
    }

    /// Content of the first choice's full message
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }

    /// Content fragment of the first choice's delta
    pub fn delta_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.as_ref())
            .and_then(|d| d.content.as_deref())
    }

    /// Tool calls from the first choice's full message
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.tool_calls.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_response_deserialization() {
        let json = r#"{
            "id": "gen-123",
            "object": "chat.completion",
            "created": 1677652288,
            "model": "google/gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        assert!(!response.is_chunk());
        assert_eq!(response.content(), Some("Hello!"));
        assert_eq!(response.delta_content(), None);
        assert_eq!(response.usage.as_ref().unwrap().total_tokens, 15);
        assert_eq!(
            response.choices[0].finish_reason.as_deref(),
            Some("stop")
        );
    }

    #[test]
    fn test_chunk_deserialization() {
        let json = r#"{
            "id": "gen-123",
            "object": "chat.completion.chunk",
            "created": 1677652288,
            "model": "google/gemini-2.5-flash",
            "choices": [{"index": 0, "delta": {"content": "Hel"}, "finish_reason": null}]
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        assert!(response.is_chunk());
        assert_eq!(response.delta_content(), Some("Hel"));
        assert!(response.choices[0].message.is_none());
        assert!(response.choices[0].finish_reason.is_none());
    }

    #[test]
    fn test_choice_error_deserialization() {
        let json = r#"{
            "id": "gen-123",
            "object": "chat.completion",
            "created": 1,
            "model": "m",
            "choices": [{"error": {"code": 502, "message": "upstream unavailable"}}]
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        let error = response.choices[0].error.as_ref().unwrap();
        assert_eq!(error.code, 502);
        assert_eq!(error.message, "upstream unavailable");
    }

    #[test]
    fn test_tool_call_arguments_left_raw() {
        let json = r#"{
            "id": "gen-1",
            "object": "chat.completion",
            "created": 1,
            "model": "m",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "get_weather", "arguments": "{\"city\":\"Bern\"}"}
                    }]
                }
            }]
        }"#;

        let response: Response = serde_json::from_str(json).unwrap();
        let calls = response.tool_calls().unwrap();
        assert_eq!(calls[0].function.name.as_deref(), Some("get_weather"));
        assert_eq!(calls[0].function.arguments, "{\"city\":\"Bern\"}");
    }
}
