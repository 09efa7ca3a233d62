//! # rust-pdf
//!
//! A streaming PDF object/serialization core with the standard (ISO
//! 32000-2, 7.6) security handler.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_pdf::prelude::*;
//!
//! let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
//!
//! let pages_id = doc.pages_id();
//!
//! let mut catalog = PdfDictionary::new();
//! catalog.set("Type", Object::Name(PdfName::new_unchecked("Catalog")));
//! catalog.set("Pages", Object::Reference(pages_id));
//! let mut catalog_handle = doc.ref_object(catalog);
//! doc.set_root(catalog_handle.id());
//! catalog_handle.end().unwrap();
//!
//! let mut page = PdfDictionary::new();
//! page.set("Type", Object::Name(PdfName::new_unchecked("Page")));
//! page.set("Parent", Object::Reference(pages_id));
//! let mut page_handle = doc.ref_object(page);
//! doc.add_page(page_handle.id());
//! page_handle.end().unwrap();
//!
//! let bytes = doc.end().unwrap();
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! ```
//!
//! ## Encryption
//!
//! ```rust
//! use rust_pdf::prelude::*;
//!
//! let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
//! doc.configure_encryption(
//!     EncryptionConfig::aes128()
//!         .user_password("user")
//!         .owner_password("owner")
//!         .permissions(Permissions::new().allow_printing(true)),
//! ).unwrap();
//! ```

// Module declarations
pub mod document;
pub mod encryption;
pub mod error;
pub mod object;
pub mod registry;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use document::{Document, DocumentInfo, DocumentInfoBuilder, PdfVersion};
pub use encryption::{EncryptionConfig, Permissions, SecurityHandler};
pub use error::{
    DocumentError, EncryptionError, ObjectError, PdfError, PdfResult, RegistryError, WriterError,
};
#[cfg(feature = "compression")]
pub use error::CompressionError;
pub use object::{
    DictionaryBuilder, Object, PdfArray, PdfDate, PdfDictionary, PdfName, PdfStream, PdfString,
    StreamBuilder,
};
pub use registry::ObjectHandle;
pub use types::ObjectId;

/// Prelude module for convenient imports.
///
/// Use `use rust_pdf::prelude::*;` to import all commonly used types.
pub mod prelude {
    pub use crate::document::{Document, DocumentInfo, DocumentInfoBuilder, PdfVersion};
    pub use crate::encryption::{EncryptionConfig, Permissions, SecurityHandler};
    pub use crate::error::{PdfError, PdfResult};
    #[cfg(feature = "compression")]
    pub use crate::error::CompressionError;
    pub use crate::object::{
        DictionaryBuilder, Object, PdfArray, PdfDate, PdfDictionary, PdfName, PdfStream, PdfString,
    };
    pub use crate::registry::ObjectHandle;
    pub use crate::types::ObjectId;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn catalog(pages: ObjectId) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        dict.set("Type", Object::Name(PdfName::new_unchecked("Catalog")));
        dict.set("Pages", Object::Reference(pages));
        dict
    }

    fn page(parent: ObjectId) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        dict.set("Type", Object::Name(PdfName::new_unchecked("Page")));
        dict.set("Parent", Object::Reference(parent));
        dict
    }

    #[test]
    fn test_simple_pdf_creation() {
        let info = DocumentInfo::new().title("Test Document");
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, info, 0).unwrap();

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        doc.set_root(catalog_handle.id());
        catalog_handle.end().unwrap();

        let mut page_handle = doc.ref_object(page(pages_id));
        doc.add_page(page_handle.id());
        page_handle.end().unwrap();

        let bytes = doc.end().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Page"));
        assert!(content.contains("/Title (Test Document)"));
        assert!(content.contains("%%EOF"));
    }

    #[test]
    fn test_multi_page_pdf() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        doc.set_root(catalog_handle.id());
        catalog_handle.end().unwrap();

        for _ in 0..2 {
            let mut page_handle = doc.ref_object(page(pages_id));
            doc.add_page(page_handle.id());
            page_handle.end().unwrap();
        }

        let bytes = doc.end().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Count 2"));
    }

    #[test]
    fn test_stream_object_with_filter() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
        doc.set_compression(false);

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        doc.set_root(catalog_handle.id());
        catalog_handle.end().unwrap();

        let mut page_handle = doc.ref_object(page(pages_id));
        let page_id = page_handle.id();
        doc.add_page(page_id);
        page_handle.end().unwrap();

        let mut content_handle = doc.ref_object(PdfDictionary::new());
        content_handle.write(b"BT /F1 24 Tf 72 750 Td (Hello, World!) Tj ET".to_vec()).unwrap();
        content_handle.end().unwrap();

        let bytes = doc.end().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("stream"));
        assert!(content.contains("Hello, World!"));
        assert!(content.contains("endstream"));
    }

    #[test]
    fn test_handles_can_finalize_out_of_order() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        let catalog_id = catalog_handle.id();
        doc.set_root(catalog_id);

        let mut page_handle = doc.ref_object(page(pages_id));
        let page_id = page_handle.id();
        doc.add_page(page_id);

        // End the page before the catalog, even though the catalog was
        // allocated first.
        page_handle.end().unwrap();
        catalog_handle.end().unwrap();

        let bytes = doc.end().unwrap();
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Page"));
    }
}
