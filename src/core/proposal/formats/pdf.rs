//! PDF proposal generator via HTML-to-PDF conversion
//!
//! Writes the HTML proposal to a temporary file and prints it to PDF with
//! headless Chrome/Chromium, or with a converter given by the caller.

use super::html::HtmlProposal;
use crate::core::proposal::{ProposalContext, ProposalGenerator};
use std::error::Error;
use std::path::Path;
use std::process::{Command, Stdio};

/// PDF proposal generator using HTML-to-PDF conversion
pub struct PdfProposal {
    /// Optional custom PDF converter command
    converter: Option<String>,
}

impl PdfProposal {
    /// Create a PDF generator that auto-detects Chrome/Chromium
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF generator with a custom converter
    #[must_use]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    /// Detect an available Chrome/Chromium browser
    fn detect_chrome() -> Option<String> {
        let candidates = [
            "google-chrome",
            "chrome",
            "chromium",
            "chromium-browser",
            "google-chrome-stable",
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
            "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
        ];

        candidates.into_iter().find_map(|candidate| {
            Command::new(candidate)
                .arg("--version")
                .output()
                .ok()
                .filter(|output| output.status.success())
                .map(|_| candidate.to_owned())
        })
    }

    /// Print an HTML file to PDF with Chrome/Chromium
    fn html_to_pdf_chrome(
        chrome_cmd: &str,
        html_path: &Path,
        pdf_path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        crate::debug!("Converting {} with {chrome_cmd}", html_path.display());

        // The page has no scripts, so no virtual time budget is needed
        let status = Command::new(chrome_cmd)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg("--run-all-compositor-stages-before-draw")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.canonicalize()?.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(format!("{chrome_cmd} PDF conversion failed ({status})").into());
        }

        Ok(())
    }

    fn convert_html_to_pdf(&self, html_path: &Path, pdf_path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(converter) = &self.converter {
            return Self::html_to_pdf_chrome(converter, html_path, pdf_path);
        }

        if let Some(chrome) = Self::detect_chrome() {
            return Self::html_to_pdf_chrome(&chrome, html_path, pdf_path);
        }

        Err("PDF conversion failed: Chrome/Chromium not found.\n\
            \n\
            To generate PDF proposals, install Chrome or Chromium:\n\
            \n\
            • Ubuntu/Debian:  sudo apt install chromium-browser\n\
            • Fedora/RHEL:    sudo dnf install chromium\n\
            • macOS:          brew install --cask google-chrome\n\
            • Windows:        Download from https://www.google.com/chrome/\n\
            \n\
            Alternatively, specify a custom PDF converter:\n\
              --pdf-converter /path/to/chrome\n\
            \n\
            Or generate HTML and print it from a browser:\n\
              --format html\n\
            "
        .into())
    }
}

impl Default for PdfProposal {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalGenerator for PdfProposal {
    fn generate(&self, ctx: &ProposalContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html_path = std::env::temp_dir().join(format!(
            "teachpricing_proposal_{}.html",
            std::process::id()
        ));
        HtmlProposal::new().generate(ctx, &html_path)?;

        let result = self.convert_html_to_pdf(&html_path, output_path);
        let _ = std::fs::remove_file(&html_path);
        result
    }

    /// PDF output is binary; the textual form is the HTML it is printed from
    fn render(&self, ctx: &ProposalContext) -> Result<String, Box<dyn Error>> {
        HtmlProposal::new().render(ctx)
    }
}
