//! Page controller: the query/advance state machine behind the question page.

use shared::{
    domain::{AgentId, PartNumber, ThreadId},
    error::{AlertMessages, ErrorKind, Locale, PageError},
    protocol::{
        ContinueTalkRequest, ContinueTalkResponse, QueryRequest, QueryResponse, TalkInitial,
        CONTINUE_TALK_ROUTE, QUERY_ROUTE,
    },
};
use tracing::{debug, error, info, warn};

use crate::{transport::ConversationApi, view::PageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    AwaitingResult,
    ShowingResult,
    ShowingError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationPhase {
    None,
    Active,
    AdvanceInFlight,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// No active conversation, or it already completed. No request was sent.
    Skipped,
    /// Server returned a non-terminal part; holds the part to request next.
    Continued(PartNumber),
    Completed,
}

/// Identifiers needed to fetch the next turn of a multi-part answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationCursor {
    pub thread_id: ThreadId,
    pub agent_id: AgentId,
    pub part_number: PartNumber,
    pub completed: bool,
}

impl ConversationCursor {
    pub fn from_initial(talk: &TalkInitial) -> Self {
        Self {
            thread_id: talk.thread_id.clone(),
            agent_id: talk.agent_id.clone(),
            part_number: PartNumber::FIRST_ADVANCE,
            completed: talk.completed,
        }
    }

    pub fn request(&self) -> ContinueTalkRequest {
        ContinueTalkRequest {
            thread_id: self.thread_id.clone(),
            agent_id: self.agent_id.clone(),
            part_number: self.part_number,
        }
    }
}

pub struct PageController<A: ConversationApi> {
    api: A,
    messages: AlertMessages,
    view: PageView,
    cursor: Option<ConversationCursor>,
    phase: SubmitPhase,
    advance_in_flight: bool,
}

impl<A: ConversationApi> PageController<A> {
    pub fn new(api: A, locale: Locale) -> Self {
        Self {
            api,
            messages: AlertMessages::for_locale(locale),
            view: PageView::default(),
            cursor: None,
            phase: SubmitPhase::Idle,
            advance_in_flight: false,
        }
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn cursor(&self) -> Option<&ConversationCursor> {
        self.cursor.as_ref()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn conversation_phase(&self) -> ConversationPhase {
        match &self.cursor {
            None => ConversationPhase::None,
            Some(_) if self.advance_in_flight => ConversationPhase::AdvanceInFlight,
            Some(cursor) if cursor.completed => ConversationPhase::Completed,
            Some(_) => ConversationPhase::Active,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Submits a question. Blank input is rejected locally without a request.
    ///
    /// Every outcome ends with the busy indicator hidden and the submit
    /// control re-enabled. Errors have already been recorded as alerts.
    pub async fn submit_query(&mut self, text: &str) -> Result<(), PageError> {
        let query = text.trim();
        if query.is_empty() {
            let err = PageError::validation(self.messages.empty_query);
            return Err(self.alert(err));
        }

        self.cursor = None;
        self.view.hide_results();
        self.view.busy = true;
        self.view.submit_enabled = false;
        self.phase = SubmitPhase::AwaitingResult;

        let request = QueryRequest {
            query: query.to_string(),
        };
        let outcome = match self.api.query(&request).await {
            Ok(response) => self.apply_query_response(response),
            Err(err) => {
                error!(route = QUERY_ROUTE, %err, "query request failed");
                Err(PageError::transport(self.messages.transport_failure))
            }
        };

        self.view.busy = false;
        self.view.submit_enabled = true;

        match outcome {
            Ok(()) => {
                self.phase = SubmitPhase::ShowingResult;
                Ok(())
            }
            Err(err) => {
                self.phase = match err.kind {
                    ErrorKind::Transport => SubmitPhase::Idle,
                    _ => SubmitPhase::ShowingError,
                };
                Err(self.alert(err))
            }
        }
    }

    /// Requests the next conversation part. A no-op without an active,
    /// unfinished conversation.
    pub async fn advance_conversation(&mut self) -> Result<AdvanceOutcome, PageError> {
        let Some(cursor) = self.cursor.as_ref().filter(|cursor| !cursor.completed) else {
            debug!("advance ignored; no active conversation");
            return Ok(AdvanceOutcome::Skipped);
        };
        let request = cursor.request();

        self.view.next_enabled = false;
        self.view.busy = true;
        self.advance_in_flight = true;
        debug!(
            thread_id = %request.thread_id,
            agent_id = %request.agent_id,
            part_number = %request.part_number,
            "advancing conversation"
        );

        let outcome = match self.api.continue_talk(&request).await {
            Ok(response) => self.apply_talk_response(response),
            Err(err) => {
                error!(route = CONTINUE_TALK_ROUTE, %err, "continue_talk request failed");
                Err(PageError::transport(self.messages.transport_failure))
            }
        };

        self.view.busy = false;
        self.advance_in_flight = false;
        outcome.map_err(|err| self.alert(err))
    }

    pub fn toggle_logs(&mut self) -> bool {
        self.view.logs_expanded = !self.view.logs_expanded;
        self.view.logs_expanded
    }

    fn apply_query_response(&mut self, response: QueryResponse) -> Result<(), PageError> {
        if !response.status.is_success() {
            return Err(self.application_failure(response.message));
        }

        self.view.text_response = Some(response.text_response.unwrap_or_default());
        self.view.show_logs(response.verification_logs);

        if let Some(talk) = response.talk_initial {
            let cursor = ConversationCursor::from_initial(&talk);
            info!(
                thread_id = %cursor.thread_id,
                agent_id = %cursor.agent_id,
                completed = cursor.completed,
                "conversation started"
            );
            self.view.next_enabled = !cursor.completed;
            self.view.talk_response = Some(talk.initial_response);
            self.cursor = Some(cursor);
        }
        Ok(())
    }

    fn apply_talk_response(
        &mut self,
        response: ContinueTalkResponse,
    ) -> Result<AdvanceOutcome, PageError> {
        if !response.status.is_success() {
            return Err(self.application_failure(response.message));
        }
        let Some(part) = response.response else {
            warn!("continue_talk reported success without a response payload");
            return Err(PageError::transport(self.messages.transport_failure));
        };
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(AdvanceOutcome::Skipped);
        };

        self.view.talk_response = Some(part.response);
        if part.completed {
            cursor.completed = true;
            self.view.next_enabled = false;
            info!(thread_id = %cursor.thread_id, part_number = %cursor.part_number, "conversation completed");
            Ok(AdvanceOutcome::Completed)
        } else {
            cursor.part_number = cursor.part_number.next();
            self.view.next_enabled = true;
            Ok(AdvanceOutcome::Continued(cursor.part_number))
        }
    }

    fn application_failure(&self, message: Option<String>) -> PageError {
        let message = message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| self.messages.generic_failure.to_string());
        PageError::application(message)
    }

    fn alert(&mut self, err: PageError) -> PageError {
        warn!(kind = ?err.kind, message = %err.message, "alert shown");
        self.view.alerts.push(err.message.clone());
        err
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
