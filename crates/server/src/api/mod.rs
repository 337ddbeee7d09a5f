//! Mock question backend used by the preview server. Answers are canned; they
//! exist so the generated page can be exercised end to end locally.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use shared::{
    domain::{AgentId, PartNumber, ThreadId},
    protocol::{
        ContinueTalkResponse, ErrorEnvelope, QueryResponse, ResponseStatus, TalkInitial, TalkPart,
        VerificationLog,
    },
};

pub const MOCK_AGENT_ID: &str = "agent_123";
/// Parts at or beyond this number are reported as the final one.
pub const FINAL_PART: u32 = 5;

pub const QUERY_REQUIRED: &str = "Query is required";
pub const TALK_FIELDS_REQUIRED: &str = "thread_id, agent_id, and part_number are required";

/// Lenient request bodies: missing fields are validation failures rather
/// than decode failures, so clients get the usual envelope back.
#[derive(Debug, Default, Deserialize)]
pub struct QueryBody {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContinueTalkBody {
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub part_number: Option<u32>,
}

pub fn answer_query(body: &QueryBody, now: DateTime<Utc>) -> Result<QueryResponse, ErrorEnvelope> {
    let query = body
        .query
        .as_deref()
        .filter(|query| !query.is_empty())
        .ok_or_else(|| ErrorEnvelope::new(QUERY_REQUIRED))?;

    Ok(QueryResponse {
        status: ResponseStatus::Success,
        message: None,
        text_response: Some(format!("This is a sample response to your query: {query}")),
        verification_logs: Some(vec![
            VerificationLog {
                agent: "System".into(),
                response: format!("Query received: {query}"),
            },
            VerificationLog {
                agent: "AI".into(),
                response: "Processing query...".into(),
            },
        ]),
        talk_initial: Some(TalkInitial {
            thread_id: thread_id_for(now),
            agent_id: AgentId::new(MOCK_AGENT_ID),
            initial_response: "Initial conversation response.".into(),
            completed: false,
        }),
    })
}

pub fn continue_talk(body: &ContinueTalkBody) -> Result<ContinueTalkResponse, ErrorEnvelope> {
    let missing = || ErrorEnvelope::new(TALK_FIELDS_REQUIRED);
    let thread_id = body
        .thread_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(missing)?;
    let agent_id = body
        .agent_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(missing)?;
    let part_number = body
        .part_number
        .filter(|part| *part > 0)
        .map(PartNumber)
        .ok_or_else(missing)?;

    Ok(ContinueTalkResponse {
        status: ResponseStatus::Success,
        message: None,
        response: Some(TalkPart {
            response: format!(
                "This is part {part_number} of the conversation. Thread: {thread_id}, Agent: {agent_id}"
            ),
            completed: part_number.get() >= FINAL_PART,
        }),
    })
}

fn thread_id_for(now: DateTime<Utc>) -> ThreadId {
    ThreadId::new(format!("thread_{}", now.timestamp_millis()))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
