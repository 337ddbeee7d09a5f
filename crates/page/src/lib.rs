//! Renders the MSLearn question page: one self-contained HTML document with
//! inline style, inline controller script and a JSON settings block.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use shared::{
    error::{AlertMessages, Locale},
    protocol::{CONTINUE_TALK_ROUTE, QUERY_ROUTE},
};
use thiserror::Error;
use tracing::info;

mod script;
mod strings;
mod style;

pub use strings::PageStrings;

pub const DEFAULT_OUTPUT: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageConfig {
    pub locale: Locale,
    /// Prefix prepended to the API routes, e.g. `/backend`. Empty means the
    /// routes are requested root-relative.
    pub api_base: String,
}

impl PageConfig {
    pub fn new(locale: Locale, api_base: impl Into<String>) -> Self {
        Self {
            locale,
            api_base: normalize_api_base(&api_base.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write page to '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode page settings: {0}")]
    Settings(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ScriptSettings<'a> {
    api_base: &'a str,
    query_path: &'a str,
    continue_path: &'a str,
    messages: ScriptMessages<'a>,
}

#[derive(Serialize)]
struct ScriptMessages<'a> {
    empty_query: &'a str,
    generic_failure: &'a str,
    transport_failure: &'a str,
}

pub fn render_document(config: &PageConfig) -> Result<String, RenderError> {
    let strings = PageStrings::for_locale(config.locale);
    let messages = AlertMessages::for_locale(config.locale);
    let api_base = normalize_api_base(&config.api_base);
    let settings = ScriptSettings {
        api_base: &api_base,
        query_path: QUERY_ROUTE,
        continue_path: CONTINUE_TALK_ROUTE,
        messages: ScriptMessages {
            empty_query: messages.empty_query,
            generic_failure: messages.generic_failure,
            transport_failure: messages.transport_failure,
        },
    };
    let settings_json = embed_json(&serde_json::to_string(&settings)?);

    let lang = escape_html(strings.html_lang);
    let title = escape_html(strings.title);
    let ask_heading = escape_html(strings.ask_heading);
    let placeholder = escape_html(strings.query_placeholder);
    let submit_label = escape_html(strings.submit_label);
    let log_toggle = escape_html(strings.log_toggle_label);
    let talk_heading = escape_html(strings.talk_heading);
    let next_label = escape_html(strings.next_label);
    let style = style::STYLE;
    let script = script::SCRIPT;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <title>{title}</title>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>{style}    </style>
</head>
<body>
    <h1>{title}</h1>

    <div class="container">
        <h2>{ask_heading}</h2>
        <input type="text" id="query" placeholder="{placeholder}">
        <button id="submit-btn">{submit_label}</button>
        <div class="loader" id="loader"></div>

        <div id="text-response" class="response" style="display:none;"></div>

        <div class="log-section" id="log-section">
            <p class="log-toggle" id="log-toggle">{log_toggle}</p>
            <div id="logs" style="display:none;"></div>
        </div>
    </div>

    <div class="container talk-section" id="talk-section">
        <h2>{talk_heading}</h2>
        <div id="talk-response" class="response"></div>
        <button id="next-btn" disabled>{next_label}</button>
    </div>

    <script id="page-config" type="application/json">{settings_json}</script>
    <script>{script}    </script>
</body>
</html>
"#
    ))
}

/// Renders the page and writes it to `path`, creating parent directories.
pub fn write_document(config: &PageConfig, path: impl AsRef<Path>) -> Result<PathBuf, RenderError> {
    let path = path.as_ref().to_path_buf();
    let document = render_document(config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, document.as_bytes()).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), locale = %config.locale, bytes = document.len(), "page written");
    Ok(path)
}

pub fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.contains("://") || trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// JSON inside a <script> element must not close the element early.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
