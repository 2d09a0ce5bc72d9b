//! htmlpdf
//!
//! HTML to PDF conversion behind a narrow engine interface. The actual
//! layout and rasterization work is delegated to an external renderer
//! process; this crate only owns the process plumbing and the error
//! surface.

pub mod engine;
pub mod error;

pub use engine::{looks_like_pdf, HtmlToPdf, WeasyPrintEngine};
pub use error::PdfError;
