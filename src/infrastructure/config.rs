use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::invoice::{Currency, InvoiceSettings, NumberingScope};

fn default_db_max_connections() -> u32 {
  5
}

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_number_width() -> usize {
  3
}

fn default_payment_terms_days() -> u32 {
  30
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  #[serde(default)]
  pub invoicing: InvoicingConfig,
  pub documents: DocumentsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Directory served under `/static` when set
  #[serde(default)]
  pub static_dir: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  #[serde(default = "default_db_max_connections")]
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Invoice numbering and terms
#[derive(Debug, Clone, Deserialize)]
pub struct InvoicingConfig {
  #[serde(default)]
  pub numbering_scope: NumberingScope,
  #[serde(default = "default_number_width")]
  pub number_width: usize,
  #[serde(default = "default_payment_terms_days")]
  pub payment_terms_days: u32,
  #[serde(default)]
  pub currency: Currency,
}

impl Default for InvoicingConfig {
  fn default() -> Self {
    Self {
      numbering_scope: NumberingScope::default(),
      number_width: default_number_width(),
      payment_terms_days: default_payment_terms_days(),
      currency: Currency::default(),
    }
  }
}

impl From<&InvoicingConfig> for InvoiceSettings {
  fn from(config: &InvoicingConfig) -> Self {
    InvoiceSettings {
      numbering_scope: config.numbering_scope,
      number_width: config.number_width,
      payment_terms_days: config.payment_terms_days,
      currency: config.currency,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
  #[default]
  Html,
  Wkhtmltopdf,
}

/// Rendered invoice documents
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
  pub output_dir: String,
  #[serde(default)]
  pub renderer: RendererKind,
  pub wkhtmltopdf_path: Option<String>,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with HOURBOOK_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the HOURBOOK_ prefix and are separated by double underscores:
  /// - `HOURBOOK_SERVER__PORT=8080`
  /// - `HOURBOOK_DATABASE__URL=sqlite://data/hourbook.db`
  /// - `HOURBOOK_INVOICING__NUMBERING_SCOPE=year_month`
  /// - `HOURBOOK_DOCUMENTS__RENDERER=wkhtmltopdf`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("HOURBOOK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_config_structure() {
    let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "sqlite://data/hourbook.db"

            [documents]
            output_dir = "./data/invoices"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert!(config.server.static_dir.is_none());
    assert_eq!(config.database.max_connections, 5); // default
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.invoicing.numbering_scope, NumberingScope::Year);
    assert_eq!(config.invoicing.number_width, 3);
    assert_eq!(config.invoicing.payment_terms_days, 30);
    assert_eq!(config.invoicing.currency, Currency::EUR);
    assert_eq!(config.documents.renderer, RendererKind::Html);
  }

  #[test]
  fn test_invoicing_overrides() {
    let toml = r#"
            [server]
            host = "0.0.0.0"
            port = 80

            [database]
            url = "sqlite::memory:"

            [invoicing]
            numbering_scope = "year_month"
            number_width = 4
            payment_terms_days = 14
            currency = "CHF"

            [documents]
            output_dir = "/var/lib/hourbook"
            renderer = "wkhtmltopdf"
            wkhtmltopdf_path = "/usr/local/bin/wkhtmltopdf"
        "#;

    let config: Config = toml::from_str(toml).expect("Failed to parse config");
    let settings = InvoiceSettings::from(&config.invoicing);

    assert_eq!(settings.numbering_scope, NumberingScope::YearMonth);
    assert_eq!(settings.number_width, 4);
    assert_eq!(settings.payment_terms_days, 14);
    assert_eq!(settings.currency, Currency::CHF);
    assert_eq!(config.documents.renderer, RendererKind::Wkhtmltopdf);
  }
}
