//! PDF date objects.

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::PdfString;

/// A PDF date value, serialized per the PDF date syntax `D:YYYYMMDDHHmmSSZ`.
///
/// PDF dates are always emitted in UTC by this writer; the object model does not
/// carry a local timezone offset since every producer in this crate works from
/// `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfDate {
    instant: DateTime<Utc>,
}

impl PdfDate {
    /// Creates a PDF date from a UTC instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Returns the underlying UTC instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Returns the number of milliseconds since the Unix epoch.
    ///
    /// Used as the `creationDateMillis` input to file-ID generation.
    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// Formats the date per `D:YYYYMMDDHHmmSSZ`.
    pub fn to_pdf_string(&self) -> String {
        format!(
            "D:{:04}{:02}{:02}{:02}{:02}{:02}Z",
            self.instant.year(),
            self.instant.month(),
            self.instant.day(),
            self.instant.hour(),
            self.instant.minute(),
            self.instant.second()
        )
    }

    /// Renders the date as a literal PDF string object.
    pub fn to_pdf_string_object(&self) -> PdfString {
        PdfString::literal(self.to_pdf_string())
    }
}
