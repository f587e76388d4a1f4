//! Proposal format implementations
//!
//! Provides generators for Markdown, HTML and PDF proposals.

pub mod html;
pub mod markdown;
pub mod pdf;

pub use html::HtmlProposal;
pub use markdown::MarkdownProposal;
pub use pdf::PdfProposal;

use std::fmt;
use std::str::FromStr;

/// Supported proposal formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposalFormat {
    /// Markdown document
    #[default]
    Markdown,
    /// Self-contained HTML page
    Html,
    /// PDF (generated from HTML)
    Pdf,
}

impl ProposalFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ProposalFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("Unknown proposal format: {s}")),
        }
    }
}

impl fmt::Display for ProposalFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}
