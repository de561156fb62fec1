//! `docportal nav`: list a site's tabs in navigation order.

use serde::Serialize;

use crate::cli::args::{NavArgs, OutputFormat};
use crate::config::{ConfigStore, TabDescriptor};
use crate::error::PortalError;
use crate::fetch;

#[derive(Debug, Serialize)]
struct NavEntry<'a> {
    id: &'a str,
    name: &'a str,
    order: i64,
    source: &'static str,
    active: bool,
}

impl<'a> From<&'a TabDescriptor> for NavEntry<'a> {
    fn from(tab: &'a TabDescriptor) -> Self {
        Self {
            id: &tab.id,
            name: &tab.name,
            order: tab.order,
            source: tab
                .content
                .as_ref()
                .and_then(|c| c.source)
                .map_or("none", |s| s.as_str()),
            active: tab.active,
        }
    }
}

/// Loads the manifest (falling back like the portal does) and prints it.
///
/// # Errors
///
/// Returns an error if the site cannot be opened or JSON output fails.
pub async fn run(args: &NavArgs) -> Result<(), PortalError> {
    let options = super::options_for(&args.site);
    let fetcher = fetch::from_site(&args.site.site, &options)?;
    let store = ConfigStore::load(fetcher.as_ref(), &options).await;
    let tabs = store.sorted_tabs();
    let entries: Vec<NavEntry<'_>> = tabs.iter().map(NavEntry::from).collect();

    match args.format {
        OutputFormat::Human => {
            println!("{}", format_table(&entries));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn format_table(entries: &[NavEntry<'_>]) -> String {
    let id_width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0).max(2);
    let name_width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0).max(4);

    let mut lines = vec![format!(
        "  {:<id_width$}  {:<name_width$}  {:>5}  SOURCE",
        "ID", "NAME", "ORDER"
    )];
    lines.extend(entries.iter().map(|e| {
        format!(
            "{} {:<id_width$}  {:<name_width$}  {:>5}  {}",
            if e.active { '*' } else { ' ' },
            e.id,
            e.name,
            e.order,
            e.source
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_reports_source() {
        let tab: TabDescriptor = serde_json::from_value(json!({
            "id": "guide", "name": "Guide", "order": 2,
            "content": {"source": "markdown", "file": "guide.md"}
        }))
        .unwrap();
        let entry = NavEntry::from(&tab);
        assert_eq!(entry.source, "markdown");
        assert!(!entry.active);
    }

    #[test]
    fn table_marks_active_tab() {
        let tabs: Vec<TabDescriptor> = serde_json::from_value(json!([
            {"id": "homepage", "name": "Home", "order": 1, "active": true},
            {"id": "about", "name": "About", "order": 2}
        ]))
        .unwrap();
        let entries: Vec<_> = tabs.iter().map(NavEntry::from).collect();
        let table = format_table(&entries);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("* homepage"));
        assert!(lines[2].starts_with("  about"));
        assert!(lines[2].ends_with("none"));
    }
}
