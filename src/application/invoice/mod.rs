pub mod change_invoice_status;
pub mod delete_invoice;
pub mod generate_invoice;
pub mod get_dashboard_metrics;
pub mod get_invoice_details;
pub mod get_invoice_document;
pub mod list_invoices;

pub use change_invoice_status::{
  ChangeInvoiceStatusCommand, ChangeInvoiceStatusResponse, ChangeInvoiceStatusUseCase,
};
pub use delete_invoice::{DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use generate_invoice::{GenerateInvoiceCommand, GenerateInvoiceUseCase};
pub use get_dashboard_metrics::{GetDashboardMetricsCommand, GetDashboardMetricsUseCase};
pub use get_invoice_details::{
  GetInvoiceDetailsCommand, GetInvoiceDetailsUseCase, InvoiceDetailsResponse, InvoiceLineItemDto,
};
pub use get_invoice_document::{
  GetInvoiceDocumentCommand, GetInvoiceDocumentUseCase, InvoiceDocumentResponse,
};
pub use list_invoices::{
  InvoiceListItemDto, ListInvoicesCommand, ListInvoicesResponse, ListInvoicesUseCase,
};
