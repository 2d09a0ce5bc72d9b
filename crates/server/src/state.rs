use std::sync::Arc;

use htmlpdf::HtmlToPdf;

#[derive(Clone)]
pub struct AppState {
    pub pdf_engine: Arc<dyn HtmlToPdf>,
}
