//! host::metadata
//!
//! Copy the current page's metadata to the clipboard.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::traits::{Clipboard, HostError};

/// Text layout for copied metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataFormat {
    /// `[title](url)` followed by the description
    #[default]
    Markdown,
    /// Title, url, and description on separate lines
    Plain,
}

impl MetadataFormat {
    /// Names accepted in config files.
    pub const NAMES: &'static [&'static str] = &["markdown", "plain"];
}

impl std::fmt::Display for MetadataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataFormat::Markdown => write!(f, "markdown"),
            MetadataFormat::Plain => write!(f, "plain"),
        }
    }
}

impl FromStr for MetadataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(MetadataFormat::Markdown),
            "plain" => Ok(MetadataFormat::Plain),
            other => Err(format!(
                "invalid metadata format '{}', must be one of: {}",
                other,
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// Metadata describing a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
}

impl PageMetadata {
    /// Render the metadata as clipboard text.
    ///
    /// A blank title falls back to the url. A blank description is omitted.
    pub fn render(&self, format: MetadataFormat) -> String {
        let title = match self.title.trim() {
            "" => self.url.as_str(),
            t => t,
        };
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let mut text = match format {
            MetadataFormat::Markdown => format!("[{}]({})", escape_brackets(title), self.url),
            MetadataFormat::Plain => format!("{}\n{}", title, self.url),
        };
        if let Some(description) = description {
            text.push('\n');
            text.push_str(description);
        }
        text
    }
}

fn escape_brackets(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Render `page` and write it to the clipboard.
///
/// Returns the copied text.
pub async fn copy_page_metadata(
    page: &PageMetadata,
    format: MetadataFormat,
    clipboard: &dyn Clipboard,
) -> Result<String, HostError> {
    let text = page.render(format);
    clipboard.write_text(&text).await?;
    Ok(text)
}
