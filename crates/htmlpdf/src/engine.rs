use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::error::PdfError;

/// Magic bytes every PDF file starts with.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

pub fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Converts an HTML document (plus optional CSS stylesheets) into PDF
/// bytes. Implementations resolve any absolute URLs referenced by the
/// document (fonts, images) themselves.
///
/// Calls may block on layout/rasterization; callers on an async runtime
/// are expected to wrap them in `web::block` or equivalent.
pub trait HtmlToPdf: Send + Sync {
    fn render(&self, html: &str, stylesheets: &[String]) -> Result<Vec<u8>, PdfError>;
}

/// Renders through the WeasyPrint command line tool.
pub struct WeasyPrintEngine {
    bin: PathBuf,
}

impl WeasyPrintEngine {
    pub fn new(bin: impl Into<PathBuf>) -> WeasyPrintEngine {
        WeasyPrintEngine { bin: bin.into() }
    }
}

impl HtmlToPdf for WeasyPrintEngine {
    fn render(&self, html: &str, stylesheets: &[String]) -> Result<Vec<u8>, PdfError> {
        // WeasyPrint works on files, not stdin; stage everything in a
        // throwaway directory that is cleaned up on drop.
        let work_dir = tempfile::tempdir()?;
        let html_path = work_dir.path().join("document.html");
        let pdf_path = work_dir.path().join("document.pdf");
        fs::write(&html_path, html)?;

        let mut cmd = Command::new(&self.bin);
        for (idx, css) in stylesheets.iter().enumerate() {
            let css_path = work_dir.path().join(format!("style_{}.css", idx));
            fs::write(&css_path, css)?;
            cmd.arg("-s").arg(css_path);
        }
        cmd.arg(&html_path).arg(&pdf_path);

        log::debug!("running PDF renderer: {:?}", &cmd);
        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PdfError::Engine(stderr.trim().to_string()));
        }

        let data = fs::read(&pdf_path)
            .map_err(|_| PdfError::InvalidOutput("renderer wrote no output file".to_string()))?;
        if !looks_like_pdf(&data) {
            return Err(PdfError::InvalidOutput(
                "missing PDF signature".to_string(),
            ));
        }
        log::debug!("rendered PDF, {} bytes", data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_magic_matches_signature_only() {
        assert!(looks_like_pdf(b"%PDF-1.7\nrest of file"));
        assert!(!looks_like_pdf(b"<!DOCTYPE html>"));
        assert!(!looks_like_pdf(b""));
        assert!(!looks_like_pdf(b"%PDX-1.0"));
    }
}
