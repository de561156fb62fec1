//! Shared integration-test harness: builds a portal site in a temporary
//! directory and runs the `docportal` binary against it.

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Manifest used by most integration tests.
pub const MANIFEST: &str = r#"{
    "app": {"name": "Ops Portal", "version": "2.1.0", "lastUpdated": "2024-03-07"},
    "navigation": {"tabs": [
        {"id": "homepage", "name": "Home", "order": 1, "active": true, "icon": "home"},
        {"id": "about", "name": "About", "title": "About", "order": 2,
         "content": {"source": "json", "file": "about.json"},
         "styles": {"file": "about.css"}},
        {"id": "guide", "name": "Guide", "order": 3,
         "content": {"source": "markdown", "file": "guide.md"}},
        {"id": "runbook", "name": "Runbook", "order": 4,
         "content": {"source": "html", "path": "pages/", "file": "runbook.html"},
         "scripts": {"file": "runbook.js"}},
        {"id": "faq", "name": "FAQ", "order": 5,
         "content": {"source": "json", "file": "faq.json"}}
    ]}
}"#;

pub const ABOUT_JSON: &str =
    r#"{"title":"About Us","sections":[{"title":"Mission","content":"Our mission..."}]}"#;

/// A site directory that lives as long as the value.
pub struct Site {
    dir: TempDir,
}

impl Site {
    /// Creates the standard site. `faq.json` is deliberately malformed.
    #[allow(clippy::missing_panics_doc)]
    pub fn standard() -> Self {
        let site = Self::empty();
        site.write("app.json", MANIFEST);
        site.write("json/about.json", ABOUT_JSON);
        site.write("json/faq.json", "{\"title\": ");
        site.write("css/about.css", "h1 { color: teal; }");
        site.write("markdown/guide.md", "# Hello\n\nWorld\n* item1\n* item2");
        site.write("pages/runbook.html", "<section id=\"runbook\">Steps</section>");
        site
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// Writes a file relative to the site root, creating directories.
    #[allow(clippy::missing_panics_doc)]
    pub fn write(&self, resource: &str, body: &str) {
        let path = self.dir.path().join(resource);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create site dir");
        }
        std::fs::write(path, body).expect("failed to write site file");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[allow(clippy::missing_panics_doc)]
    pub fn root(&self) -> String {
        self.dir.path().to_str().expect("non-UTF-8 temp dir").to_string()
    }
}

/// Runs the binary to completion with logging silenced.
#[allow(clippy::missing_panics_doc)]
pub fn run_docportal(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docportal"))
        .args(args)
        .env_remove("DOCPORTAL_SITE")
        .env_remove("DOCPORTAL_MANIFEST")
        .env_remove("DOCPORTAL_LOG_LEVEL")
        .output()
        .expect("failed to run docportal")
}
