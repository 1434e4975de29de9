use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::Client;
use crate::domain::client::ports::ClientRepository;
use crate::domain::profile::ports::ProfileRepository;
use crate::domain::time_entry::ports::TimeEntryRepository;

use super::aggregator::aggregate;
use super::entities::{
  DashboardMetrics, Invoice, InvoiceDocument, InvoiceDraft, InvoiceLineItem, NewInvoice,
};
use super::errors::InvoiceError;
use super::ports::{
  DocumentRenderer, DocumentStore, InvoiceFilter, InvoiceNumberSequence, InvoiceRepository,
};
use super::value_objects::{
  BillingPeriod, Currency, DashboardPeriod, DocumentFormat, InvoiceNumber, InvoiceStatus,
  Language, NumberingScope,
};

/// Invoicing knobs taken from configuration
#[derive(Debug, Clone)]
pub struct InvoiceSettings {
  pub numbering_scope: NumberingScope,
  pub number_width: usize,
  pub payment_terms_days: u32,
  pub currency: Currency,
}

impl Default for InvoiceSettings {
  fn default() -> Self {
    Self {
      numbering_scope: NumberingScope::Year,
      number_width: 3,
      payment_terms_days: 30,
      currency: Currency::EUR,
    }
  }
}

pub struct InvoiceServiceDependencies {
  pub invoice_repo: Arc<dyn InvoiceRepository>,
  pub number_sequence: Arc<dyn InvoiceNumberSequence>,
  pub client_repo: Arc<dyn ClientRepository>,
  pub time_entry_repo: Arc<dyn TimeEntryRepository>,
  pub profile_repo: Arc<dyn ProfileRepository>,
  pub renderer: Arc<dyn DocumentRenderer>,
  pub document_store: Arc<dyn DocumentStore>,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  number_sequence: Arc<dyn InvoiceNumberSequence>,
  client_repo: Arc<dyn ClientRepository>,
  time_entry_repo: Arc<dyn TimeEntryRepository>,
  profile_repo: Arc<dyn ProfileRepository>,
  renderer: Arc<dyn DocumentRenderer>,
  document_store: Arc<dyn DocumentStore>,
  settings: InvoiceSettings,
}

impl InvoiceService {
  pub fn new(deps: InvoiceServiceDependencies, settings: InvoiceSettings) -> Self {
    Self {
      invoice_repo: deps.invoice_repo,
      number_sequence: deps.number_sequence,
      client_repo: deps.client_repo,
      time_entry_repo: deps.time_entry_repo,
      profile_repo: deps.profile_repo,
      renderer: deps.renderer,
      document_store: deps.document_store,
      settings,
    }
  }

  /// Aggregates the client's completed entries for the period into a draft
  /// with a fresh number. Nothing but the sequence counter is written.
  pub async fn generate_invoice(
    &self,
    client_id: Uuid,
    period_start: NaiveDate,
    period_end: NaiveDate,
    language: Language,
  ) -> Result<InvoiceDraft, InvoiceError> {
    let period = BillingPeriod::new(period_start, period_end)
      .map_err(|e| InvoiceError::InvalidRange(e.to_string()))?;

    let client = self.find_client(client_id).await?;

    let entries = self
      .time_entry_repo
      .find_by_client_starting_between(client_id, period.starts_at(), period.ends_before())
      .await
      .map_err(|e| InvoiceError::Storage(e.to_string()))?;

    let hourly_rate = client.hourly_rate.value();
    let aggregate = aggregate(&entries, &period, hourly_rate);

    let issue_date = Utc::now().date_naive();
    let number = self.next_number(issue_date).await?;

    let invoice = Invoice::new(NewInvoice {
      number,
      client_id,
      period,
      total_hours: aggregate.total_hours,
      hourly_rate,
      total_amount: aggregate.total_amount,
      currency: self.settings.currency,
      language,
      issue_date,
      payment_terms_days: self.settings.payment_terms_days,
    });

    let line_items = aggregate
      .lines
      .into_iter()
      .enumerate()
      .map(|(i, line)| InvoiceLineItem {
        id: Uuid::new_v4(),
        invoice_id: invoice.id,
        time_entry_id: line.time_entry_id,
        title: line.title,
        start: line.start,
        end: line.end,
        duration_seconds: line.duration_seconds,
        amount: line.amount,
        sort_order: (i + 1) as i32,
      })
      .collect::<Vec<_>>();

    tracing::info!(
      "Generated invoice {} for client {}: {} entries, {} hours, {}",
      invoice.number,
      client_id,
      line_items.len(),
      invoice.total_hours,
      invoice.total_amount
    );

    Ok(InvoiceDraft {
      invoice,
      line_items,
    })
  }

  /// Renders and stores the document, then persists the invoice. The stored
  /// document is removed again if persisting fails.
  pub async fn issue_invoice(
    &self,
    draft: InvoiceDraft,
  ) -> Result<(Invoice, Vec<InvoiceLineItem>), InvoiceError> {
    let InvoiceDraft {
      mut invoice,
      line_items,
    } = draft;

    let client = self.find_client(invoice.client_id).await?;
    let profile = self
      .profile_repo
      .find()
      .await
      .map_err(|e| InvoiceError::Storage(e.to_string()))?;
    if profile.is_none() {
      tracing::warn!("Issuing invoice {} without a profile", invoice.number);
    }

    let rendered = self
      .renderer
      .render(InvoiceDocument {
        invoice: &invoice,
        line_items: &line_items,
        client: &client,
        profile: profile.as_ref(),
      })
      .await?;

    let location = self
      .document_store
      .store(&invoice.document_name(), &rendered)
      .await?;
    invoice.set_document_path(location.clone());

    match self.invoice_repo.create(invoice, line_items).await {
      Ok(created) => {
        tracing::info!("Issued invoice {} ({})", created.0.number, location);
        Ok(created)
      }
      Err(e) => {
        tracing::warn!("Persisting invoice failed, removing {}: {}", location, e);
        if let Err(remove_err) = self.document_store.remove(&location).await {
          tracing::warn!("Failed to remove orphaned document {}: {}", location, remove_err);
        }
        Err(e)
      }
    }
  }

  pub async fn list_invoices(&self, filter: InvoiceFilter) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_repo.find_all(&filter).await
  }

  pub async fn get_invoice(&self, invoice_id: Uuid) -> Result<Invoice, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))
  }

  pub async fn get_invoice_with_details(
    &self,
    invoice_id: Uuid,
  ) -> Result<(Invoice, Vec<InvoiceLineItem>, Client), InvoiceError> {
    let invoice = self.get_invoice(invoice_id).await?;
    let line_items = self.invoice_repo.find_line_items(invoice_id).await?;
    let client = self.find_client(invoice.client_id).await?;
    Ok((invoice, line_items, client))
  }

  pub async fn change_invoice_status(
    &self,
    invoice_id: Uuid,
    new_status: InvoiceStatus,
    paid_date: Option<NaiveDate>,
  ) -> Result<Invoice, InvoiceError> {
    let mut invoice = self.get_invoice(invoice_id).await?;
    invoice.change_status(new_status, paid_date)?;

    let updated = self.invoice_repo.update(invoice).await?;
    tracing::info!("Invoice {} is now {}", updated.number, updated.status);
    Ok(updated)
  }

  /// Allowed in any status; the stored document goes with it.
  pub async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), InvoiceError> {
    let invoice = self.get_invoice(invoice_id).await?;
    self.invoice_repo.delete(invoice_id).await?;

    if let Some(location) = &invoice.document_path {
      if let Err(e) = self.document_store.remove(location).await {
        tracing::warn!("Failed to remove document {} of invoice {}: {}", location, invoice.number, e);
      }
    }

    tracing::info!("Deleted invoice {}", invoice.number);
    Ok(())
  }

  pub async fn get_invoice_document(
    &self,
    invoice_id: Uuid,
  ) -> Result<(Invoice, DocumentFormat, Vec<u8>), InvoiceError> {
    let invoice = self.get_invoice(invoice_id).await?;
    let location = invoice.document_path.clone().ok_or_else(|| {
      InvoiceError::Document(format!("Invoice {} has no stored document", invoice.number))
    })?;
    let format = DocumentFormat::from_path(&location).ok_or_else(|| {
      InvoiceError::Document(format!("Unknown document format for {}", location))
    })?;

    let bytes = self.document_store.load(&location).await?;
    Ok((invoice, format, bytes))
  }

  /// Revenue counts paid invoices issued within the period; pending and
  /// count figures cover all invoices.
  pub async fn dashboard_metrics(
    &self,
    period: DashboardPeriod,
  ) -> Result<DashboardMetrics, InvoiceError> {
    let (start, end) = period.date_range()?;
    let invoices = self.invoice_repo.find_all(&InvoiceFilter::default()).await?;

    let mut metrics = DashboardMetrics {
      period_start: start,
      period_end: end,
      total_revenue_period: Default::default(),
      pending_invoices_amount: Default::default(),
      pending_invoices_count: 0,
      total_invoices_count: invoices.len() as i64,
      paid_invoices_count: 0,
      currency: self.settings.currency,
    };

    for invoice in &invoices {
      if invoice.is_outstanding() {
        metrics.pending_invoices_count += 1;
        metrics.pending_invoices_amount += invoice.total_amount.amount;
      } else if invoice.status == InvoiceStatus::Paid {
        metrics.paid_invoices_count += 1;
        if invoice.issue_date >= start && invoice.issue_date < end {
          metrics.total_revenue_period += invoice.total_amount.amount;
        }
      }
    }

    tracing::debug!(
      "Dashboard {:?}: revenue={}, pending={} ({}), total={}, paid={}",
      period,
      metrics.total_revenue_period,
      metrics.pending_invoices_amount,
      metrics.pending_invoices_count,
      metrics.total_invoices_count,
      metrics.paid_invoices_count
    );
    Ok(metrics)
  }

  async fn next_number(&self, issue_date: NaiveDate) -> Result<InvoiceNumber, InvoiceError> {
    let scope = self.settings.numbering_scope.key_for(issue_date);
    let sequence = self.number_sequence.next_value(&scope).await?;
    Ok(InvoiceNumber::from_sequence(
      &scope,
      sequence,
      self.settings.number_width,
    )?)
  }

  async fn find_client(&self, client_id: Uuid) -> Result<Client, InvoiceError> {
    self
      .client_repo
      .find_by_id(client_id)
      .await
      .map_err(|e| InvoiceError::Storage(e.to_string()))?
      .ok_or(InvoiceError::ClientNotFound(client_id))
  }
}
