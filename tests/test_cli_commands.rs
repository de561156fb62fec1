mod common;

use common::{Site, run_docportal};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn render_json_tab() {
    let site = Site::standard();
    let output = run_docportal(&["render", "about", "--site", &site.root(), "-q"]);
    assert!(
        output.status.success(),
        "render should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let html = stdout(&output);
    assert!(html.starts_with(r#"<div class="content-section about-content">"#));
    assert!(html.contains("<h1>About Us</h1>"));
}

#[test]
fn render_shell_document() {
    let site = Site::standard();
    let output = run_docportal(&["render", "guide", "--site", &site.root(), "--shell", "-q"]);
    assert!(output.status.success());
    let html = stdout(&output);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Guide - Ops Portal</title>"));
    assert!(html.contains(r#"<span id="last-updated">3/7/2024</span>"#));
    assert!(html.contains(r##"<li><a href="#faq" data-tab="faq">FAQ</a></li>"##));
}

#[test]
fn render_unknown_tab_suggests() {
    let site = Site::standard();
    let output = run_docportal(&["render", "abuot", "--site", &site.root(), "-q"]);
    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("did you mean 'about'?"), "stderr: {stderr}");
}

#[test]
fn render_tab_with_missing_file_is_render_error() {
    let site = Site::standard();
    site.write(
        "app.json",
        r#"{"navigation":{"tabs":[{"id":"x","name":"X","content":{"source":"json"}}]}}"#,
    );
    let output = run_docportal(&["render", "x", "--site", &site.root(), "-q"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn render_missing_site_is_io_error() {
    let output = run_docportal(&[
        "render",
        "about",
        "--site",
        "/tmp/docportal-no-such-site-dir",
        "-q",
    ]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn nav_json_is_sorted() {
    let site = Site::standard();
    let output = run_docportal(&["nav", "--site", &site.root(), "--format", "json", "-q"]);
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<_> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["homepage", "about", "guide", "runbook", "faq"]);
    assert_eq!(entries[1]["source"], "json");
    assert_eq!(entries[0]["active"], true);
}

#[test]
fn markdown_command() {
    let site = Site::empty();
    site.write("doc.md", "# Title\n\n* a\n* b");
    let path = site.path().join("doc.md");
    let output = run_docportal(&["markdown", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim_end(),
        "<h1>Title</h1>\n<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn version_json() {
    let output = run_docportal(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["name"], "docportal");
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn serve_rejects_bad_bind_address() {
    let site = Site::standard();
    let output = run_docportal(&["serve", "--site", &site.root(), "--bind", "nowhere", "-q"]);
    assert_eq!(output.status.code(), Some(1));
}
