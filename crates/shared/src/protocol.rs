use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::domain::{AgentId, PartNumber, ThreadId};

pub const QUERY_ROUTE: &str = "/api/query";
pub const CONTINUE_TALK_ROUTE: &str = "/api/continue_talk";

/// Envelope status. Anything other than `"success"` is a failure, including a
/// missing field, `null` or a non-string value.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for ResponseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        #[allow(dead_code)]
        enum RawStatus {
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match RawStatus::deserialize(deserializer)? {
            RawStatus::Text(text) => match text.as_str() {
                "success" => ResponseStatus::Success,
                "error" => ResponseStatus::Error,
                _ => ResponseStatus::Unknown,
            },
            RawStatus::Other(_) => ResponseStatus::Unknown,
        })
    }
}

impl ResponseStatus {
    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationLog {
    pub agent: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TalkInitial {
    pub thread_id: ThreadId,
    pub agent_id: AgentId,
    pub initial_response: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_logs: Option<Vec<VerificationLog>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_initial: Option<TalkInitial>,
}

impl QueryResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContinueTalkRequest {
    pub thread_id: ThreadId,
    pub agent_id: AgentId,
    pub part_number: PartNumber,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TalkPart {
    pub response: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ContinueTalkResponse {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<TalkPart>,
}

impl ContinueTalkResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            response: None,
        }
    }
}

/// Body returned for requests rejected before reaching a handler, such as
/// malformed JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub status: ResponseStatus,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
        }
    }
}
