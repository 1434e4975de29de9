pub mod filesystem_store;
pub mod html_renderer;
pub mod translations;
pub mod wkhtmltopdf_renderer;

pub use filesystem_store::FilesystemDocumentStore;
pub use html_renderer::HtmlInvoiceRenderer;
pub use wkhtmltopdf_renderer::WkHtmlToPdfRenderer;
