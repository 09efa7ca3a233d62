//! Error types for the rust-pdf library.

use thiserror::Error;

/// The main error type for PDF operations.
#[derive(Debug, Error)]
pub enum PdfError {
    /// Error during object serialization.
    #[error("Object error: {0}")]
    Object(#[from] ObjectError),

    /// Error during document building.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error during PDF writing.
    #[error("Writer error: {0}")]
    Writer(#[from] WriterError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error during compression.
    #[cfg(feature = "compression")]
    #[error("Compression error: {0}")]
    Compression(#[from] CompressionError),

    /// Error during encryption.
    #[error("Encryption error: {0}")]
    Encryption(#[from] EncryptionError),

    /// Error from the indirect-object registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors related to the indirect-object registry and document lifecycle.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A document was finalized with no content registered.
    #[error("document has no objects")]
    EmptyDocument,

    /// A write was attempted on a handle after the document was finalized.
    #[error("write attempted after document end")]
    WriteAfterEnd,

    /// The document was finalized while object handles were still alive.
    #[error("document finalized with {0} object handle(s) still open")]
    HandlesStillOpen(usize),
}

/// Errors related to PDF object handling.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// Invalid PDF name (contains invalid characters).
    #[error("Invalid PDF name: {0}")]
    InvalidName(String),

    /// Invalid PDF string encoding.
    #[error("Invalid PDF string: {0}")]
    InvalidString(String),

    /// Invalid object reference.
    #[error("Invalid object reference: ({0}, {1})")]
    InvalidReference(u32, u16),

    /// Stream without required Length key.
    #[error("Stream missing required Length key")]
    StreamMissingLength,
}

/// Errors related to document building.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document has no pages.
    #[error("Document must have at least one page")]
    NoPages,

    /// Invalid PDF version.
    #[error("Invalid PDF version: {0}")]
    InvalidVersion(String),

    /// Missing required resource.
    #[error("Missing required resource: {0}")]
    MissingResource(String),
}

/// Errors related to PDF writing.
#[derive(Debug, Error)]
pub enum WriterError {
    /// Failed to write PDF structure.
    #[error("Failed to write PDF structure: {0}")]
    Structure(String),

    /// Invalid byte offset.
    #[error("Invalid byte offset: {0}")]
    InvalidOffset(u64),
}

/// Errors related to compression operations.
#[cfg(feature = "compression")]
#[derive(Debug, Error)]
pub enum CompressionError {
    /// Failed to compress data.
    #[error("Failed to compress data: {0}")]
    CompressionFailed(String),

    /// Failed to decompress data.
    #[error("Failed to decompress data: {0}")]
    DecompressionFailed(String),

    /// Invalid compressed data.
    #[error("Invalid compressed data")]
    InvalidData,
}

/// Errors related to PDF encryption.
#[derive(Debug, Error)]
pub enum EncryptionError {
    /// Invalid password.
    #[error("Invalid password")]
    InvalidPassword,

    /// A password-protected operation was requested but no password was configured.
    #[error("no password configured for this operation")]
    NoPasswordConfigured,

    /// Encryption key generation failed.
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// AES encryption/decryption failed.
    #[error("Cipher operation failed: {0}")]
    CipherFailed(String),

    /// Invalid encryption parameters.
    #[error("Invalid encryption parameters: {0}")]
    InvalidParameters(String),

    /// Unsupported encryption algorithm.
    #[error("Unsupported encryption algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Missing file ID.
    #[error("File ID required for encryption")]
    MissingFileId,
}

/// A specialized Result type for PDF operations.
pub type PdfResult<T> = Result<T, PdfError>;
