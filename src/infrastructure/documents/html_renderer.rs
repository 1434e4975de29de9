use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera};

use super::translations::{date_format, labels};
use crate::domain::invoice::{
  DocumentFormat, InvoiceDocument, InvoiceError, Language, Money, RenderedDocument,
  ports::DocumentRenderer, round_currency,
};

const TEMPLATE_NAME: &str = "invoice.html";
const TEMPLATE: &str = include_str!("templates/invoice.html.tera");

#[derive(Serialize)]
struct InvoiceView {
  number: String,
  issue_date: String,
  due_date: String,
  period_start: String,
  period_end: String,
  hourly_rate: String,
  total_hours: String,
  total_amount: String,
}

#[derive(Serialize)]
struct LineItemView {
  title: String,
  start: String,
  end: String,
  hours: String,
  amount: String,
}

#[derive(Serialize)]
struct ClientView<'a> {
  name: &'a str,
  address: &'a str,
  contact_person: Option<&'a str>,
}

#[derive(Serialize)]
struct ProfileView<'a> {
  name: &'a str,
  address: &'a str,
  tax_id: Option<&'a str>,
  bank_details: Option<&'a str>,
}

/// Renders invoices to standalone HTML with an embedded Tera template.
pub struct HtmlInvoiceRenderer {
  tera: Tera,
}

impl HtmlInvoiceRenderer {
  pub fn new() -> Result<Self, InvoiceError> {
    let mut tera = Tera::default();
    tera
      .add_raw_template(TEMPLATE_NAME, TEMPLATE)
      .map_err(|e| InvoiceError::Document(format!("Invalid invoice template: {}", e)))?;
    Ok(Self { tera })
  }

  pub fn render_html(&self, document: &InvoiceDocument<'_>) -> Result<String, InvoiceError> {
    let invoice = document.invoice;
    let language = invoice.language;
    let date = |d: NaiveDate| d.format(date_format(language)).to_string();
    let timestamp =
      |t: DateTime<Utc>| t.format(&format!("{} %H:%M", date_format(language))).to_string();
    let money = |amount: Decimal| {
      Money {
        amount: round_currency(amount),
        currency: invoice.total_amount.currency,
      }
      .to_string()
    };

    let view = InvoiceView {
      number: invoice.number.to_string(),
      issue_date: date(invoice.issue_date),
      due_date: date(invoice.due_date),
      period_start: date(invoice.period.start()),
      period_end: date(invoice.period.end()),
      hourly_rate: money(invoice.hourly_rate),
      total_hours: format_hours(invoice.total_hours),
      total_amount: invoice.total_amount.to_string(),
    };

    let line_items: Vec<LineItemView> = document
      .line_items
      .iter()
      .map(|item| LineItemView {
        title: item.title.clone(),
        start: timestamp(item.start),
        end: timestamp(item.end),
        hours: format_hours(item.duration_hours()),
        amount: money(item.amount),
      })
      .collect();

    let mut context = Context::new();
    context.insert("language", language.code());
    context.insert("labels", labels(language));
    context.insert("invoice", &view);
    context.insert("line_items", &line_items);
    context.insert(
      "client",
      &ClientView {
        name: document.client.name.value(),
        address: &document.client.contact.address,
        contact_person: document.client.contact.contact_person.as_deref(),
      },
    );
    if let Some(profile) = document.profile {
      context.insert(
        "profile",
        &ProfileView {
          name: &profile.name,
          address: &profile.address,
          tax_id: profile.tax_id.as_deref(),
          bank_details: profile.bank_details.as_deref(),
        },
      );
    }

    self
      .tera
      .render(TEMPLATE_NAME, &context)
      .map_err(|e| InvoiceError::Document(format!("Failed to render invoice {}: {}", invoice.number, e)))
  }
}

fn format_hours(hours: Decimal) -> String {
  format!("{:.2}", round_currency(hours))
}

#[async_trait]
impl DocumentRenderer for HtmlInvoiceRenderer {
  async fn render(&self, document: InvoiceDocument<'_>) -> Result<RenderedDocument, InvoiceError> {
    let html = self.render_html(&document)?;
    Ok(RenderedDocument {
      format: DocumentFormat::Html,
      bytes: html.into_bytes(),
    })
  }
}
