pub mod pdf_export;
pub mod return_form_renderer;
pub mod return_form_service;

pub use pdf_export::{render_pdf, write_pdf};
pub use return_form_renderer::ReturnFormRenderer;
pub use return_form_service::{ExportSummary, ReturnFormService};
