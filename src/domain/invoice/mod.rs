pub mod aggregator;
pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use aggregator::{AggregatedLine, InvoiceAggregate, aggregate};
pub use entities::{
  DashboardMetrics, Invoice, InvoiceDocument, InvoiceDraft, InvoiceLineItem, NewInvoice,
  RenderedDocument,
};
pub use errors::InvoiceError;
pub use ports::{
  DocumentRenderer, DocumentStore, InvoiceFilter, InvoiceNumberSequence, InvoiceRepository,
};
pub use services::{InvoiceService, InvoiceServiceDependencies, InvoiceSettings};
pub use value_objects::{
  BillingPeriod, Currency, DashboardPeriod, DocumentFormat, InvoiceNumber, InvoiceStatus,
  Language, Money, NumberingScope, ValueObjectError, round_currency,
};
