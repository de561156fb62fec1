//! `docportal markdown`: run the minimal Markdown transform on a file.

use crate::cli::args::MarkdownArgs;
use crate::error::PortalError;
use crate::render::markdown;

/// Converts the file and prints the HTML.
///
/// # Errors
///
/// Returns [`PortalError::Io`] if the file cannot be read.
pub async fn run(args: &MarkdownArgs) -> Result<(), PortalError> {
    let source = tokio::fs::read_to_string(&args.file).await?;
    println!("{}", markdown::to_html(&source));
    Ok(())
}
