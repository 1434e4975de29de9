use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::invoice::{InvoiceError, RenderedDocument, ports::DocumentStore};

/// Keeps rendered invoices as files below one directory. Locations handed
/// out are file names relative to that directory.
pub struct FilesystemDocumentStore {
  root: PathBuf,
}

impl FilesystemDocumentStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn resolve(&self, location: &str) -> Result<PathBuf, InvoiceError> {
    let relative = Path::new(location);
    let is_plain_name = relative.components().count() == 1
      && matches!(
        relative.components().next(),
        Some(std::path::Component::Normal(_))
      );
    if !is_plain_name {
      return Err(InvoiceError::Document(format!(
        "Invalid document location: {}",
        location
      )));
    }
    Ok(self.root.join(relative))
  }
}

#[async_trait]
impl DocumentStore for FilesystemDocumentStore {
  async fn store(&self, name: &str, document: &RenderedDocument) -> Result<String, InvoiceError> {
    tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
      InvoiceError::Document(format!(
        "Failed to create document directory {}: {}",
        self.root.display(),
        e
      ))
    })?;

    let location = format!("{}.{}", name, document.format.extension());
    let path = self.resolve(&location)?;
    tokio::fs::write(&path, &document.bytes)
      .await
      .map_err(|e| InvoiceError::Document(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!("Stored document {} ({} bytes)", path.display(), document.bytes.len());
    Ok(location)
  }

  async fn load(&self, location: &str) -> Result<Vec<u8>, InvoiceError> {
    let path = self.resolve(location)?;
    tokio::fs::read(&path)
      .await
      .map_err(|e| InvoiceError::Document(format!("Failed to read {}: {}", path.display(), e)))
  }

  async fn remove(&self, location: &str) -> Result<(), InvoiceError> {
    let path = self.resolve(location)?;
    match tokio::fs::remove_file(&path).await {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(InvoiceError::Document(format!(
        "Failed to remove {}: {}",
        path.display(),
        e
      ))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::DocumentFormat;
  use tempfile::TempDir;

  fn pdf(bytes: &[u8]) -> RenderedDocument {
    RenderedDocument {
      format: DocumentFormat::Pdf,
      bytes: bytes.to_vec(),
    }
  }

  #[tokio::test]
  async fn test_store_load_remove() {
    let dir = TempDir::new().unwrap();
    let store = FilesystemDocumentStore::new(dir.path().join("invoices"));

    let location = store.store("invoice-2026-001", &pdf(b"%PDF-1.4")).await.unwrap();
    assert_eq!(location, "invoice-2026-001.pdf");
    assert_eq!(store.load(&location).await.unwrap(), b"%PDF-1.4");

    store.remove(&location).await.unwrap();
    assert!(store.load(&location).await.is_err());
    // removing twice is fine
    store.remove(&location).await.unwrap();
  }

  #[tokio::test]
  async fn test_rejects_locations_outside_root() {
    let dir = TempDir::new().unwrap();
    let store = FilesystemDocumentStore::new(dir.path());

    for location in ["../secret.pdf", "/etc/passwd", "a/b.pdf", ""] {
      assert!(matches!(
        store.load(location).await,
        Err(InvoiceError::Document(_))
      ));
    }
  }
}
