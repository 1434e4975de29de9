use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::html_renderer::HtmlInvoiceRenderer;
use crate::domain::invoice::{
  DocumentFormat, InvoiceDocument, InvoiceError, RenderedDocument, ports::DocumentRenderer,
};

/// Renders the HTML invoice and pipes it through `wkhtmltopdf`.
pub struct WkHtmlToPdfRenderer {
  html: HtmlInvoiceRenderer,
  wkhtmltopdf_path: String,
}

impl WkHtmlToPdfRenderer {
  pub fn new(html: HtmlInvoiceRenderer, wkhtmltopdf_path: Option<String>) -> Self {
    let wkhtmltopdf_path = wkhtmltopdf_path.unwrap_or_else(|| "wkhtmltopdf".to_string());
    Self {
      html,
      wkhtmltopdf_path,
    }
  }

  pub async fn verify_installed(&self) -> Result<(), InvoiceError> {
    let output = Command::new(&self.wkhtmltopdf_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        InvoiceError::Document(format!(
          "wkhtmltopdf not found: {}. Please install wkhtmltopdf.",
          e
        ))
      })?;

    if !output.status.success() {
      return Err(InvoiceError::Document(
        "wkhtmltopdf is not working correctly".to_string(),
      ));
    }

    Ok(())
  }

  async fn html_to_pdf(&self, html: String) -> Result<Vec<u8>, InvoiceError> {
    let mut child = Command::new(&self.wkhtmltopdf_path)
      .args([
        "--page-size",
        "A4",
        "--margin-top",
        "10mm",
        "--margin-bottom",
        "10mm",
        "--margin-left",
        "10mm",
        "--margin-right",
        "10mm",
        "--encoding",
        "utf-8",
        "--quiet",
        "-",
        "-",
      ])
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()
      .map_err(|e| InvoiceError::Document(format!("wkhtmltopdf execution failed: {}", e)))?;

    let mut stdin = child
      .stdin
      .take()
      .ok_or_else(|| InvoiceError::Document("wkhtmltopdf stdin unavailable".to_string()))?;
    let writer = tokio::spawn(async move {
      stdin.write_all(html.as_bytes()).await?;
      stdin.shutdown().await
    });

    let output = child
      .wait_with_output()
      .await
      .map_err(|e| InvoiceError::Document(format!("wkhtmltopdf execution failed: {}", e)))?;

    match writer.await {
      Ok(Ok(())) => {}
      Ok(Err(e)) => tracing::warn!("Writing HTML to wkhtmltopdf failed: {}", e),
      Err(e) => tracing::warn!("wkhtmltopdf writer task failed: {}", e),
    }

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(InvoiceError::Document(format!(
        "wkhtmltopdf failed: {}",
        stderr
      )));
    }
    if output.stdout.is_empty() {
      return Err(InvoiceError::Document(
        "wkhtmltopdf produced no output".to_string(),
      ));
    }

    Ok(output.stdout)
  }
}

#[async_trait]
impl DocumentRenderer for WkHtmlToPdfRenderer {
  async fn render(&self, document: InvoiceDocument<'_>) -> Result<RenderedDocument, InvoiceError> {
    let html = self.html.render_html(&document)?;
    tracing::info!("Generating PDF for invoice {}", document.invoice.number);

    let bytes = self.html_to_pdf(html).await?;
    Ok(RenderedDocument {
      format: DocumentFormat::Pdf,
      bytes,
    })
  }
}
