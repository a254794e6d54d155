//! Error types for the itin-core library.
//!
//! Parsing never fails: extractors absorb malformed input and return an
//! empty or partially defaulted result. These errors only cover the
//! collaborators around the parsers (PDF text, record store, files).

use thiserror::Error;

/// Main error type for the itin library.
#[derive(Error, Debug)]
pub enum ItinError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Import commit error.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with this id in the collection.
    #[error("{collection} record not found: {id}")]
    NotFound { collection: &'static str, id: String },

    /// A stored value does not match the entity shape.
    #[error("failed to (de)serialize {collection} record: {reason}")]
    Serialization {
        collection: &'static str,
        reason: String,
    },

    /// Backing file could not be read or written.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The store file was written by a newer schema.
    #[error("unsupported store schema version {found} (expected at most {supported})")]
    SchemaVersion { found: u32, supported: u32 },
}

/// Errors raised while committing an import preview.
#[derive(Error, Debug)]
pub enum ImportError {
    /// A trip id is required before records can be persisted.
    #[error("missing trip id")]
    MissingTripId,

    /// The preview does not contain anything to commit.
    #[error("no records to import")]
    NoRecords,
}

/// Result type for the itin library.
pub type Result<T> = std::result::Result<T, ItinError>;
