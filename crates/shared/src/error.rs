use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Rejected locally before any request was issued.
    Validation,
    /// The backend answered with a non-success status.
    Application,
    /// Network failure or an unreadable body.
    Transport,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct PageError {
    pub kind: ErrorKind,
    pub message: String,
}

impl PageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Application, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected ko or en)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ko => f.write_str("ko"),
            Locale::En => f.write_str("en"),
        }
    }
}

/// User-facing alert texts, shared by the generated page script and the
/// native controller so both surface identical wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertMessages {
    pub empty_query: &'static str,
    pub generic_failure: &'static str,
    pub transport_failure: &'static str,
}

impl AlertMessages {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ko => Self {
                empty_query: "질문을 입력해주세요.",
                generic_failure: "처리 중 오류가 발생했습니다.",
                transport_failure: "서버 요청 중 오류가 발생했습니다.",
            },
            Locale::En => Self {
                empty_query: "Please enter a question.",
                generic_failure: "An error occurred while processing your request.",
                transport_failure: "An error occurred while contacting the server.",
            },
        }
    }
}

impl Default for AlertMessages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}
