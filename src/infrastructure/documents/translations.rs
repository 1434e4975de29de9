use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::domain::invoice::Language;

pub type Labels = HashMap<&'static str, &'static str>;

lazy_static! {
  static ref LABELS_EN: Labels = {
    let mut map = HashMap::new();
    map.insert("invoice", "INVOICE");
    map.insert("invoice_number", "Invoice No.");
    map.insert("date", "Date");
    map.insert("due_date", "Due Date");
    map.insert("period", "Service Period");
    map.insert("from", "FROM");
    map.insert("to", "TO");
    map.insert("contact", "Contact");
    map.insert("tax_id", "Tax ID");
    map.insert("service", "Service");
    map.insert("start", "Start");
    map.insert("end", "End");
    map.insert("hours", "Hours");
    map.insert("rate", "Hourly Rate");
    map.insert("amount", "Amount");
    map.insert("total_hours", "Total Hours");
    map.insert("total_amount", "Total Amount");
    map.insert("no_entries", "No billable sessions in this period.");
    map.insert("payment_details", "Payment Details");
    map.insert("no_payment_details", "Please contact for payment details.");
    map.insert("missing_profile", "Profile not set up");
    map
  };

  static ref LABELS_DE: Labels = {
    let mut map = HashMap::new();
    map.insert("invoice", "RECHNUNG");
    map.insert("invoice_number", "Rechnungsnr.");
    map.insert("date", "Datum");
    map.insert("due_date", "Fällig am");
    map.insert("period", "Leistungszeitraum");
    map.insert("from", "VON");
    map.insert("to", "AN");
    map.insert("contact", "Ansprechpartner");
    map.insert("tax_id", "Steuernummer");
    map.insert("service", "Leistung");
    map.insert("start", "Beginn");
    map.insert("end", "Ende");
    map.insert("hours", "Stunden");
    map.insert("rate", "Stundensatz");
    map.insert("amount", "Betrag");
    map.insert("total_hours", "Gesamtstunden");
    map.insert("total_amount", "Gesamtbetrag");
    map.insert("no_entries", "Keine abrechenbaren Einheiten in diesem Zeitraum.");
    map.insert("payment_details", "Zahlungsinformationen");
    map.insert("no_payment_details", "Bitte kontaktieren Sie uns für Zahlungsdetails.");
    map.insert("missing_profile", "Profil nicht angelegt");
    map
  };
}

pub fn labels(language: Language) -> &'static Labels {
  match language {
    Language::English => &LABELS_EN,
    Language::German => &LABELS_DE,
  }
}

/// Date format customary for the language.
pub fn date_format(language: Language) -> &'static str {
  match language {
    Language::English => "%Y-%m-%d",
    Language::German => "%d.%m.%Y",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_both_languages_define_the_same_keys() {
    let mut en: Vec<_> = labels(Language::English).keys().collect();
    let mut de: Vec<_> = labels(Language::German).keys().collect();
    en.sort();
    de.sort();
    assert_eq!(en, de);
  }

  #[test]
  fn test_german_labels() {
    assert_eq!(labels(Language::German)["invoice"], "RECHNUNG");
    assert_eq!(labels(Language::English)["total_amount"], "Total Amount");
  }
}
