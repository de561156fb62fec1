//! `docportal render`: render one tab to stdout.

use crate::cli::args::RenderArgs;
use crate::controller::{SwitchOutcome, SwitchReport};
use crate::error::PortalError;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Opens the site with the requested tab as the location fragment and
/// prints the content region, or the whole shell with `--shell`.
///
/// # Errors
///
/// Returns [`PortalError::Usage`] for an unknown tab and
/// [`PortalError::Render`] when the tab shows the error fragment.
pub async fn run(args: &RenderArgs) -> Result<(), PortalError> {
    let portal = super::open_portal(&args.site).await?;
    let config = portal.config();

    // An unknown fragment would fall through to the default tab.
    if config.tab(&args.tab).is_none() {
        let ids: Vec<String> = config.navigation.tabs.iter().map(|t| t.id.clone()).collect();
        return Err(PortalError::Usage(unknown_tab_message(&args.tab, &ids)));
    }

    let content = match portal.show_initial(Some(&args.tab)).await {
        Some(SwitchReport {
            outcome: SwitchOutcome::Failed(e),
            ..
        }) => return Err(e.into()),
        Some(SwitchReport {
            content: Some(content),
            ..
        }) => content,
        _ => portal.page().content,
    };

    if args.shell {
        println!("{}", portal.page().render_document());
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Error message for an unknown tab, with the closest id if one is close.
#[must_use]
pub fn unknown_tab_message(requested: &str, ids: &[String]) -> String {
    let best = ids
        .iter()
        .map(|id| (strsim::jaro_winkler(requested, id), id))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0));

    match best {
        Some((_, id)) => format!("unknown tab '{requested}' (did you mean '{id}'?)"),
        None => format!("unknown tab '{requested}'; available: {}", ids.join(", ")),
    }
}
