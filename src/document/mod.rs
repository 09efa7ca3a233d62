//! Document assembly: the PDF header, the pages tree, the Info and Encrypt
//! dictionaries, and the trailer/xref tail.
//!
//! [`Document`] wraps a [`Registry`] and owns the handful of indirect objects
//! every conforming PDF needs regardless of content: the pages tree, the
//! optional Info dictionary, the optional `/Encrypt` dictionary, and the
//! trailer. Everything else — the catalog, page dictionaries, content
//! streams, fonts, resources — is built by the caller with
//! [`Document::ref_object`] and wired together with [`crate::types::ObjectId`]
//! references, in any order, before calling [`Document::end`].

mod file_id;
mod info;
mod version;

pub use info::{DocumentInfo, DocumentInfoBuilder};
pub use version::PdfVersion;

use std::io::Write;

use log::info;

use crate::encryption::{EncryptionConfig, SecurityHandler};
use crate::error::{DocumentError, PdfResult, RegistryError};
use crate::object::{Object, PdfArray, PdfDictionary, PdfName, PdfString};
use crate::registry::{ObjectHandle, Registry};
use crate::types::ObjectId;
use crate::writer::TokenSink;

/// A PDF document under construction.
///
/// A `Document` is created over a writer, accumulates indirect objects via
/// [`Document::ref_object`], and is consumed by [`Document::end`] to produce
/// the finished byte stream. There is no in-memory object graph: each object
/// is serialized to the underlying writer as soon as its handle is ended, so
/// memory use is bounded by the largest single object rather than by the
/// document as a whole.
pub struct Document<W: Write> {
    registry: Registry<W>,
    version: PdfVersion,
    info: DocumentInfo,
    file_id: Vec<u8>,
    root: Option<ObjectId>,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    security: Option<SecurityHandler>,
}

impl<W: Write> Document<W> {
    /// Starts a new document, writing the PDF header immediately.
    ///
    /// `info` and `creation_millis` seed the document's file identifier
    /// (ISO 32000-2, 7.5.5) up front, so it is available before the first
    /// call to [`Self::configure_encryption`] — the standard security
    /// handler's key derivation requires the file ID as an input, which
    /// means it must be fixed before any object is encrypted rather than
    /// computed lazily at the end from whatever metadata happens to be
    /// present by then.
    pub fn new(writer: W, version: PdfVersion, info: DocumentInfo, creation_millis: i64) -> PdfResult<Self> {
        let mut sink = TokenSink::new(writer);
        sink.write_header(version.as_str())?;

        let registry = Registry::new(sink);
        let pages_id = registry.reserve();
        let file_id = file_id::generate_file_id(&info, creation_millis);

        info!(
            "started PDF {} document, pages tree reserved as {}",
            version,
            pages_id.reference_string()
        );

        Ok(Self {
            registry,
            version,
            info,
            file_id,
            root: None,
            pages_id,
            page_ids: Vec::new(),
            security: None,
        })
    }

    /// Returns the configured PDF version.
    pub fn version(&self) -> PdfVersion {
        self.version
    }

    /// Returns the object number reserved for the pages tree.
    ///
    /// A caller builds the document catalog before any page exists — the
    /// catalog's `/Pages` entry needs this ID even though the pages tree's
    /// `/Kids` array isn't known until every page has been added.
    pub fn pages_id(&self) -> ObjectId {
        self.pages_id
    }

    /// Sets the catalog object as the document root.
    pub fn set_root(&mut self, catalog: ObjectId) {
        self.root = Some(catalog);
    }

    /// Registers a page object as a child of the pages tree.
    ///
    /// Pages are listed in the order they are added here, independent of
    /// the order their handles are finalized.
    pub fn add_page(&mut self, page: ObjectId) {
        self.page_ids.push(page);
    }

    /// Enables or disables the deflate (zlib) stream filter applied to every
    /// stream payload before it is written (and before encryption, if any is
    /// configured). Enabled by default.
    ///
    /// No-op when built without the `compression` feature.
    pub fn set_compression(&mut self, compress: bool) {
        self.registry.set_compression(compress);
    }

    /// Enables the standard security handler for every object finalized
    /// from this point onward.
    ///
    /// Must be called before any call to [`Self::ref_object`] whose handle
    /// is finalized after this one — a handle finalized while no handler is
    /// configured is written in plaintext and cannot be retroactively
    /// encrypted. Callers should configure encryption immediately after
    /// construction, before producing any content.
    pub fn configure_encryption(&mut self, config: EncryptionConfig) -> PdfResult<()> {
        let handler = SecurityHandler::new(config, self.file_id.clone())?;
        self.registry.set_security(handler.clone());
        self.security = Some(handler);
        Ok(())
    }

    /// Allocates a new indirect object and returns a handle to it.
    ///
    /// See [`ObjectHandle`] for the write/set/end lifecycle.
    pub fn ref_object(&self, dictionary: PdfDictionary) -> ObjectHandle<W> {
        self.registry.ref_object(dictionary)
    }

    /// Finalizes the document: writes the pages tree, the Info dictionary
    /// (if any metadata was set), the `/Encrypt` dictionary (if encryption
    /// was configured), the trailer, and the cross-reference table, then
    /// returns the underlying writer.
    ///
    /// Fails with [`DocumentError::NoPages`] if no page was ever registered
    /// via [`Self::add_page`], with [`DocumentError::MissingResource`] if no
    /// root was set via [`Self::set_root`], and with
    /// [`RegistryError::HandlesStillOpen`] if an object handle obtained from
    /// this document is still alive.
    pub fn end(mut self) -> PdfResult<W> {
        if self.page_ids.is_empty() {
            return Err(DocumentError::NoPages.into());
        }
        let root = self
            .root
            .ok_or_else(|| DocumentError::MissingResource("Root".to_string()))?;

        let mut pages_dict = PdfDictionary::new();
        pages_dict.set("Type", Object::Name(PdfName::new_unchecked("Pages")));
        pages_dict.set(
            "Kids",
            Object::Array(self.page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        );
        pages_dict.set("Count", Object::Integer(self.page_ids.len() as i64));
        self.registry.handle_for(self.pages_id, pages_dict).end()?;

        let info_id = if !self.info.is_empty() {
            let mut handle = self.registry.ref_object(self.info.to_dictionary());
            let id = handle.id();
            handle.end()?;
            Some(id)
        } else {
            None
        };

        let encrypt_id = if let Some(handler) = self.security.take() {
            let mut handle = self.registry.ref_object(handler.create_encrypt_dictionary());
            handle.exempt_from_encryption();
            let id = handle.id();
            handle.end()?;
            Some(id)
        } else {
            None
        };

        if self.registry.object_count() == 0 {
            return Err(RegistryError::EmptyDocument.into());
        }

        let mut trailer = PdfDictionary::new();
        trailer.set("Size", Object::Integer((self.registry.object_count() + 1) as i64));
        trailer.set("Root", Object::Reference(root));
        if let Some(info_id) = info_id {
            trailer.set("Info", Object::Reference(info_id));
        }
        trailer.set("ID", Object::Array(file_id_array(&self.file_id)));
        if let Some(encrypt_id) = encrypt_id {
            trailer.set("Encrypt", Object::Reference(encrypt_id));
        }

        info!(
            "finalizing document with {} objects, {} page(s)",
            self.registry.object_count(),
            self.page_ids.len()
        );

        self.registry.write_tail(trailer)
    }
}

fn file_id_array(file_id: &[u8]) -> PdfArray {
    let mut arr = PdfArray::new();
    arr.push(Object::String(PdfString::Hex(file_id.to_vec())));
    arr.push(Object::String(PdfString::Hex(file_id.to_vec())));
    arr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::Permissions;

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
    fn test_minimal_document_round_trips() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        let catalog_id = catalog_handle.id();
        catalog_handle.end().unwrap();
        doc.set_root(catalog_id);

        let mut page_handle = doc.ref_object(page(pages_id));
        let page_id = page_handle.id();
        page_handle.end().unwrap();
        doc.add_page(page_id);

        let bytes = doc.end().unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Type /Pages"));
        assert!(text.contains("/Type /Page"));
        assert!(text.contains("trailer"));
        assert!(text.contains("/ID ["));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_no_pages_is_an_error() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        doc.set_root(catalog_handle.id());
        catalog_handle.end().unwrap();

        let err = doc.end().unwrap_err();
        assert!(matches!(err, crate::error::PdfError::Document(DocumentError::NoPages)));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
        let pages_id = doc.pages_id();
        let mut page_handle = doc.ref_object(page(pages_id));
        doc.add_page(page_handle.id());
        page_handle.end().unwrap();

        let err = doc.end().unwrap_err();
        assert!(matches!(
            err,
            crate::error::PdfError::Document(DocumentError::MissingResource(_))
        ));
    }

    #[test]
    fn test_info_dictionary_is_written_when_present() {
        let info = DocumentInfo::new().title("Report").author("rust-pdf");
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, info, 0).unwrap();

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        doc.set_root(catalog_handle.id());
        catalog_handle.end().unwrap();

        let mut page_handle = doc.ref_object(page(pages_id));
        doc.add_page(page_handle.id());
        page_handle.end().unwrap();

        let bytes = doc.end().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Report)"));
        assert!(text.contains("/Info "));
    }

    #[test]
    fn test_encrypted_document_has_encrypt_dictionary_in_plaintext() {
        let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
        doc.configure_encryption(
            EncryptionConfig::aes128()
                .user_password("user")
                .owner_password("owner")
                .permissions(Permissions::new().allow_printing(true)),
        )
        .unwrap();

        let pages_id = doc.pages_id();
        let mut catalog_handle = doc.ref_object(catalog(pages_id));
        doc.set_root(catalog_handle.id());
        catalog_handle.end().unwrap();

        let mut page_handle = doc.ref_object(page(pages_id));
        doc.add_page(page_handle.id());
        page_handle.end().unwrap();

        let bytes = doc.end().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Filter /Standard"));
        assert!(text.contains("/Encrypt "));
        // The catalog's /Type name and /Pages reference aren't strings, so
        // they pass through unencrypted and stay readable for this check.
        assert!(text.contains("/Type /Catalog"));
    }

    #[test]
    fn test_object_number_one_is_pages_tree() {
        let doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
        assert_eq!(doc.pages_id().number, 1);
    }
}
