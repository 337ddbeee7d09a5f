use shared::error::Locale;

/// Visible labels of the question page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStrings {
    pub html_lang: &'static str,
    pub title: &'static str,
    pub ask_heading: &'static str,
    pub query_placeholder: &'static str,
    pub submit_label: &'static str,
    pub log_toggle_label: &'static str,
    pub talk_heading: &'static str,
    pub next_label: &'static str,
}

impl PageStrings {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ko => Self {
                html_lang: "ko",
                title: "MSLearn AI 질문 시스템",
                ask_heading: "질문하기",
                query_placeholder: "MSLearn에 궁금한 사항을 물어보세요!",
                submit_label: "질문하기",
                log_toggle_label: "처리 로그 보기",
                talk_heading: "대화형 응답",
                next_label: "다음",
            },
            Locale::En => Self {
                html_lang: "en",
                title: "MSLearn AI Question System",
                ask_heading: "Ask a question",
                query_placeholder: "Ask anything about MSLearn!",
                submit_label: "Ask",
                log_toggle_label: "Show processing logs",
                talk_heading: "Conversational response",
                next_label: "Next",
            },
        }
    }
}
