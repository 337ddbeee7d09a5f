use super::*;

fn settings_block(document: &str) -> serde_json::Value {
    let start_tag = r#"<script id="page-config" type="application/json">"#;
    let start = document.find(start_tag).expect("settings block") + start_tag.len();
    let end = start + document[start..].find("</script>").expect("settings end");
    serde_json::from_str(&document[start..end].replace("<\\/", "</")).expect("settings json")
}

#[test]
fn default_page_uses_korean_strings_and_root_routes() {
    let document = render_document(&PageConfig::default()).expect("render");

    assert!(document.starts_with("<!DOCTYPE html>"));
    assert!(document.contains(r#"<html lang="ko">"#));
    assert!(document.contains("<title>MSLearn AI 질문 시스템</title>"));
    assert!(document.contains("MSLearn에 궁금한 사항을 물어보세요!"));

    let settings = settings_block(&document);
    assert_eq!(settings["api_base"], "");
    assert_eq!(settings["query_path"], "/api/query");
    assert_eq!(settings["continue_path"], "/api/continue_talk");
    assert_eq!(settings["messages"]["empty_query"], "질문을 입력해주세요.");
}

#[test]
fn english_page_switches_labels_and_alerts() {
    let document = render_document(&PageConfig::new(Locale::En, "")).expect("render");
    assert!(document.contains(r#"<html lang="en">"#));
    assert!(document.contains(">Next</button>"));
    let settings = settings_block(&document);
    assert_eq!(settings["messages"]["empty_query"], "Please enter a question.");
}

#[test]
fn document_contains_every_element_the_script_reads() {
    let document = render_document(&PageConfig::default()).expect("render");
    for id in [
        "query",
        "submit-btn",
        "next-btn",
        "loader",
        "text-response",
        "talk-section",
        "talk-response",
        "log-section",
        "log-toggle",
        "logs",
        "page-config",
    ] {
        assert!(
            document.contains(&format!(r#"id="{id}""#)),
            "missing element id {id}"
        );
        if id != "page-config" {
            assert!(
                script::SCRIPT.contains(&format!("'{id}'")),
                "script never looks up {id}"
            );
        }
    }
}

#[test]
fn superseded_advance_never_alerts() {
    let handler_start = script::SCRIPT
        .find("nextBtn.addEventListener")
        .expect("advance handler");
    let handler = &script::SCRIPT[handler_start..];
    let handler = &handler[..handler.find("logToggle.addEventListener").expect("handler end")];

    let guard = handler.find("if (cursor !== active) return;").expect("guard");
    let status_check = handler
        .find("data.status === 'success'")
        .expect("status check");
    assert!(guard < status_check, "stale replies must be dropped before any rendering");

    let catch_block = &handler[handler.find("catch (error)").expect("catch")..];
    let transport_alert = catch_block
        .find("alert(messages.transport_failure)")
        .expect("transport alert");
    let catch_guard = catch_block.find("if (cursor === active)").expect("catch guard");
    assert!(catch_guard < transport_alert);
}

#[test]
fn advance_control_starts_disabled_and_conversation_hidden() {
    let document = render_document(&PageConfig::default()).expect("render");
    assert!(document.contains(r#"<button id="next-btn" disabled>"#));
    assert!(document.contains(r#"class="container talk-section" id="talk-section""#));
}

#[test]
fn api_base_is_normalized_and_embedded_safely() {
    assert_eq!(normalize_api_base(""), "");
    assert_eq!(normalize_api_base(" /backend/ "), "/backend");
    assert_eq!(normalize_api_base("backend"), "/backend");
    assert_eq!(
        normalize_api_base("http://localhost:3000/"),
        "http://localhost:3000"
    );

    let config = PageConfig::new(Locale::Ko, "/x</script><b>");
    let document = render_document(&config).expect("render");
    assert!(!document.contains("/x</script><b>"));
    assert_eq!(settings_block(&document)["api_base"], "/x</script><b>");
}

#[test]
fn escape_html_covers_markup_characters() {
    assert_eq!(
        escape_html(r#"<a href="x">'&'</a>"#),
        "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
    );
}

#[test]
fn write_document_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("site").join("nested").join("index.html");

    let written = write_document(&PageConfig::default(), &target).expect("write");
    assert_eq!(written, target);

    let on_disk = fs::read_to_string(&target).expect("read back");
    assert_eq!(on_disk, render_document(&PageConfig::default()).expect("render"));
}

#[test]
fn write_document_reports_the_failing_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("file");
    fs::write(&blocker, b"not a directory").expect("blocker");

    let err = write_document(&PageConfig::default(), blocker.join("index.html"))
        .expect_err("parent is a file");
    assert!(matches!(err, RenderError::CreateDir { .. } | RenderError::Write { .. }));
}
