use shared::protocol::VerificationLog;

/// In-memory model of the rendered page: what is visible, what each panel
/// holds and which controls accept input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Primary answer panel; `None` while hidden.
    pub text_response: Option<String>,
    pub verification_logs: Vec<VerificationLog>,
    pub log_section_visible: bool,
    pub logs_expanded: bool,
    /// Conversation panel; `None` while hidden.
    pub talk_response: Option<String>,
    pub submit_enabled: bool,
    pub next_enabled: bool,
    pub busy: bool,
    pub alerts: Vec<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            text_response: None,
            verification_logs: Vec::new(),
            log_section_visible: false,
            logs_expanded: false,
            talk_response: None,
            submit_enabled: true,
            next_enabled: false,
            busy: false,
            alerts: Vec::new(),
        }
    }
}

impl PageView {
    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn conversation_visible(&self) -> bool {
        self.talk_response.is_some()
    }

    pub(crate) fn hide_results(&mut self) {
        self.text_response = None;
        self.talk_response = None;
        self.next_enabled = false;
    }

    pub(crate) fn show_logs(&mut self, logs: Option<Vec<VerificationLog>>) {
        match logs {
            Some(logs) => {
                self.verification_logs = logs;
                self.log_section_visible = true;
            }
            None => {
                self.verification_logs.clear();
                self.log_section_visible = false;
            }
        }
    }
}
