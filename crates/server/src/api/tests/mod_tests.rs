use super::*;
use chrono::TimeZone;

fn at_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).single().expect("timestamp")
}

#[test]
fn query_answer_carries_logs_and_an_open_conversation() {
    let body = QueryBody {
        query: Some("What is MSLearn?".into()),
    };
    let reply = answer_query(&body, at_millis(1_700_000_000_123)).expect("answer");

    assert!(reply.status.is_success());
    assert_eq!(
        reply.text_response.as_deref(),
        Some("This is a sample response to your query: What is MSLearn?")
    );
    let logs = reply.verification_logs.expect("logs");
    assert_eq!(logs[0].agent, "System");
    assert_eq!(logs[0].response, "Query received: What is MSLearn?");
    assert_eq!(logs[1].agent, "AI");

    let talk = reply.talk_initial.expect("talk");
    assert_eq!(talk.thread_id, ThreadId::new("thread_1700000000123"));
    assert_eq!(talk.agent_id, AgentId::new(MOCK_AGENT_ID));
    assert!(!talk.completed);
}

#[test]
fn empty_or_missing_query_is_rejected() {
    for body in [QueryBody::default(), QueryBody { query: Some(String::new()) }] {
        let err = answer_query(&body, Utc::now()).expect_err("required");
        assert_eq!(err.status, ResponseStatus::Error);
        assert_eq!(err.message, QUERY_REQUIRED);
    }
}

#[test]
fn conversation_completes_at_final_part() {
    let body = |part| ContinueTalkBody {
        thread_id: Some("t1".into()),
        agent_id: Some("a1".into()),
        part_number: Some(part),
    };

    let second = continue_talk(&body(2)).expect("part 2").response.expect("payload");
    assert_eq!(
        second.response,
        "This is part 2 of the conversation. Thread: t1, Agent: a1"
    );
    assert!(!second.completed);

    let fourth = continue_talk(&body(4)).expect("part 4").response.expect("payload");
    assert!(!fourth.completed);

    let fifth = continue_talk(&body(FINAL_PART)).expect("part 5").response.expect("payload");
    assert!(fifth.completed);
}

#[test]
fn continue_talk_requires_every_field() {
    let complete = ContinueTalkBody {
        thread_id: Some("t1".into()),
        agent_id: Some("a1".into()),
        part_number: Some(2),
    };
    let cases = [
        ContinueTalkBody {
            thread_id: None,
            ..complete.clone()
        },
        ContinueTalkBody {
            agent_id: Some(String::new()),
            ..complete.clone()
        },
        ContinueTalkBody {
            part_number: Some(0),
            ..complete.clone()
        },
        ContinueTalkBody::default(),
    ];

    for body in cases {
        let err = continue_talk(&body).expect_err("invalid");
        assert_eq!(err.status, ResponseStatus::Error);
        assert_eq!(err.message, TALK_FIELDS_REQUIRED);
    }
}
