//! End-to-end document assembly scenarios.
//!
//! Each test drives the public `Document`/`ObjectHandle` API the way a
//! producer would: allocate objects, wire references, finalize, then inspect
//! the resulting byte stream.

use rust_pdf::prelude::*;

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

fn minimal_document(mut doc: Document<Vec<u8>>) -> Vec<u8> {
    let pages_id = doc.pages_id();

    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    doc.set_root(catalog_handle.id());
    catalog_handle.end().unwrap();

    let mut page_handle = doc.ref_object(page(pages_id));
    doc.add_page(page_handle.id());
    page_handle.end().unwrap();

    doc.end().unwrap()
}

#[test]
fn test_unencrypted_minimal_document() {
    let doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    let bytes = minimal_document(doc);
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.starts_with("%PDF-1.7\n%"));
    assert_eq!(bytes[10], 0xE2, "binary marker byte must be >= 0x80");
    assert_eq!(text.matches("xref\n").count(), 1, "exactly one xref section");
    assert!(text.contains("trailer"));
    assert!(text.ends_with("\n%%EOF\n"));
    assert!(text.contains("/Size 4")); // catalog, pages, page, plus the free object
}

#[test]
fn test_r2_encryption_round_trip() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    doc.configure_encryption(EncryptionConfig::rc4_40().user_password("test"))
        .unwrap();

    let bytes = minimal_document(doc);
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/V 1"));
    assert!(text.contains("/R 2"));
    assert!(text.contains("/Filter /Standard"));
    assert!(!text.contains("/CF"));
}

#[test]
fn test_r4_aes128_encryption_has_crypt_filter() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    doc.configure_encryption(EncryptionConfig::aes128().user_password("test"))
        .unwrap();

    let bytes = minimal_document(doc);
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/V 4"));
    assert!(text.contains("/R 4"));
    assert!(text.contains("/CFM /AESV2"));
    assert!(text.contains("/StmF /StdCF"));
    assert!(text.contains("/StrF /StdCF"));
}

#[test]
fn test_r5_aes256_encryption_has_oe_ue_perms() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V2_0, DocumentInfo::new(), 0).unwrap();
    doc.configure_encryption(
        EncryptionConfig::aes256()
            .user_password("user")
            .owner_password("owner"),
    )
    .unwrap();

    let bytes = minimal_document(doc);
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/CFM /AESV3"));
    assert!(text.contains("/StmF /StdCF"));
    assert!(text.contains("/StrF /StdCF"));
    assert!(text.contains("/OE"));
    assert!(text.contains("/UE"));
    assert!(text.contains("/Perms"));
}

#[test]
fn test_object_number_changes_legacy_ciphertext() {
    let config = EncryptionConfig::rc4_128().user_password("test");
    let handler = SecurityHandler::new(config, vec![1; 16]).unwrap();

    let a = handler.encrypt_data(b"same plaintext!!", 1, 0).unwrap();
    let b = handler.encrypt_data(b"same plaintext!!", 2, 0).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_encrypt_dictionary_is_never_self_encrypted() {
    // A /Title on the Info dictionary is a string and gets encrypted; the
    // /Filter /Standard name and the O/U strings on the Encrypt dictionary
    // itself must not be run through the cipher a second time.
    let info = DocumentInfo::new().title("Confidential Report");
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, info, 0).unwrap();
    doc.configure_encryption(EncryptionConfig::aes128().user_password("test"))
        .unwrap();

    let bytes = minimal_document(doc);
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/Filter /Standard"));
    assert!(!text.contains("Confidential Report"));
}

#[test]
fn test_no_pages_fails() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    let pages_id = doc.pages_id();
    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    doc.set_root(catalog_handle.id());
    catalog_handle.end().unwrap();

    assert!(doc.end().is_err());
}

#[test]
fn test_handle_not_ended_is_finalized_on_drop() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    let pages_id = doc.pages_id();

    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    doc.set_root(catalog_handle.id());
    catalog_handle.end().unwrap();

    // The page handle is dropped without an explicit end() call.
    let page_handle = doc.ref_object(page(pages_id));
    doc.add_page(page_handle.id());
    drop(page_handle);

    let bytes = doc.end().unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Type /Page"));
}

#[test]
fn test_write_after_end_fails() {
    let doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    let pages_id = doc.pages_id();
    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    catalog_handle.end().unwrap();
    assert!(catalog_handle.write(b"too late".to_vec()).is_err());
    drop(doc);
}

#[cfg(feature = "compression")]
#[test]
fn test_compressed_stream_round_trip() {
    let payload = vec![b'A'; 10_000];
    let stream = PdfStream::new(payload.clone()).with_compression().unwrap();

    assert!(stream.is_compressed());
    assert!(stream.len() < payload.len());

    let decompressed = stream.decompress().unwrap();
    assert_eq!(decompressed, payload);
}

#[cfg(feature = "compression")]
#[test]
fn test_document_compresses_stream_payload_by_default() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    let pages_id = doc.pages_id();

    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    doc.set_root(catalog_handle.id());
    catalog_handle.end().unwrap();

    let mut page_handle = doc.ref_object(page(pages_id));
    doc.add_page(page_handle.id());
    page_handle.end().unwrap();

    let payload = vec![b'A'; 10_000];
    let mut content_handle = doc.ref_object(PdfDictionary::new());
    content_handle.write(payload.clone()).unwrap();
    content_handle.end().unwrap();

    let bytes = doc.end().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(text.contains("/Filter /FlateDecode"));
    // 10,000 repeated bytes deflate far smaller than the original payload.
    assert!(!text.contains(&"A".repeat(10_000)));
}

#[cfg(feature = "compression")]
#[test]
fn test_document_compression_disabled_leaves_payload_raw() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    doc.set_compression(false);
    let pages_id = doc.pages_id();

    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    doc.set_root(catalog_handle.id());
    catalog_handle.end().unwrap();

    let mut page_handle = doc.ref_object(page(pages_id));
    doc.add_page(page_handle.id());
    page_handle.end().unwrap();

    let mut content_handle = doc.ref_object(PdfDictionary::new());
    content_handle.write(b"uncompressed content stream".to_vec()).unwrap();
    content_handle.end().unwrap();

    let bytes = doc.end().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    assert!(!text.contains("/Filter /FlateDecode"));
    assert!(text.contains("uncompressed content stream"));
}

#[cfg(feature = "compression")]
#[test]
fn test_document_compresses_before_encrypting() {
    let mut doc = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 0).unwrap();
    doc.configure_encryption(EncryptionConfig::aes128().user_password("test"))
        .unwrap();
    let pages_id = doc.pages_id();

    let mut catalog_handle = doc.ref_object(catalog(pages_id));
    doc.set_root(catalog_handle.id());
    catalog_handle.end().unwrap();

    let mut page_handle = doc.ref_object(page(pages_id));
    doc.add_page(page_handle.id());
    page_handle.end().unwrap();

    let payload = vec![b'A'; 10_000];
    let mut content_handle = doc.ref_object(PdfDictionary::new());
    content_handle.write(payload.clone()).unwrap();
    content_handle.end().unwrap();

    let bytes = doc.end().unwrap();
    let text = String::from_utf8_lossy(&bytes);

    // The stream dictionary is plaintext, so the filter name set during the
    // compression stage is still visible even though the bytes after it are
    // ciphertext.
    assert!(text.contains("/Filter /FlateDecode"));
    assert!(!text.contains(&"A".repeat(10_000)));
}

#[test]
fn test_file_id_is_deterministic_for_equal_inputs() {
    let doc_a = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 1_700_000_000_000).unwrap();
    let doc_b = Document::new(Vec::new(), PdfVersion::V1_7, DocumentInfo::new(), 1_700_000_000_000).unwrap();

    let bytes_a = minimal_document(doc_a);
    let bytes_b = minimal_document(doc_b);

    let text_a = String::from_utf8_lossy(&bytes_a);
    let text_b = String::from_utf8_lossy(&bytes_b);

    assert_eq!(extract_id(&text_a), extract_id(&text_b));
    assert_eq!(extract_id(&text_a).len(), 32); // 16 bytes, hex-encoded
}

fn extract_id(text: &str) -> String {
    let start = text.find("/ID [<").unwrap() + "/ID [<".len();
    let end = text[start..].find('>').unwrap();
    text[start..start + end].to_string()
}
