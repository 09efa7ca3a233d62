//! The indirect-object registry.
//!
//! Producers call [`Document::ref_object`] to allocate an object number and
//! receive a handle; the handle accepts an optional stream payload and is
//! finalized with [`ObjectHandle::end`]. Handles may be finalized in any
//! order — the registry records each object's byte offset at the moment it
//! is actually written, and the cross-reference table is built from those
//! recorded offsets rather than from allocation order.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use log::trace;

use crate::encryption::SecurityHandler;
use crate::error::{PdfResult, RegistryError};
use crate::object::{Object, PdfDictionary, PdfStream, PdfString};
use crate::types::ObjectId;
use crate::writer::{TokenSink, XrefTable};

pub(crate) struct Inner<W: Write> {
    pub(crate) sink: TokenSink<W>,
    pub(crate) xref: XrefTable,
    pub(crate) next_object_number: u32,
    pub(crate) security: Option<SecurityHandler>,
    pub(crate) compress: bool,
}

impl<W: Write> Inner<W> {
    pub(crate) fn allocate(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_object_number);
        self.next_object_number += 1;
        id
    }
}

/// A registry of indirect objects backed by a single streaming output sink.
///
/// This is the shared state behind both [`crate::document::Document`] and
/// every [`ObjectHandle`] it issues; producers normally go through
/// `Document`, which wraps a `Registry` with catalog/info/trailer bookkeeping.
pub struct Registry<W: Write> {
    pub(crate) inner: Rc<RefCell<Inner<W>>>,
}

impl<W: Write> Registry<W> {
    pub(crate) fn new(sink: TokenSink<W>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                sink,
                xref: XrefTable::new(),
                next_object_number: 1,
                security: None,
                compress: true,
            })),
        }
    }

    pub(crate) fn set_security(&self, handler: SecurityHandler) {
        self.inner.borrow_mut().security = Some(handler);
    }

    pub(crate) fn set_compression(&self, compress: bool) {
        self.inner.borrow_mut().compress = compress;
    }

    /// Allocates a new indirect object and returns a handle for it.
    ///
    /// The handle does not touch the output stream until [`ObjectHandle::end`]
    /// is called, so handles may be created, written to, and finalized in any
    /// interleaving, including nested inside another object's construction.
    pub fn ref_object(&self, dictionary: PdfDictionary) -> ObjectHandle<W> {
        let id = self.inner.borrow_mut().allocate();
        ObjectHandle {
            id,
            dictionary,
            payload: None,
            inner: Rc::clone(&self.inner),
            finished: false,
            exempt_from_encryption: false,
        }
    }

    pub(crate) fn object_count(&self) -> u32 {
        self.inner.borrow().next_object_number - 1
    }

    /// Allocates an object number without creating a handle for it yet.
    ///
    /// Used by [`crate::document::Document`] to hand out the pages-tree
    /// object's identifier up front, so a catalog built early can already
    /// reference it, while the actual Kids/Count content is only known once
    /// every page has been added.
    pub(crate) fn reserve(&self) -> ObjectId {
        self.inner.borrow_mut().allocate()
    }

    /// Creates a handle for a previously [`Self::reserve`]d object number.
    pub(crate) fn handle_for(&self, id: ObjectId, dictionary: PdfDictionary) -> ObjectHandle<W> {
        ObjectHandle {
            id,
            dictionary,
            payload: None,
            inner: Rc::clone(&self.inner),
            finished: false,
            exempt_from_encryption: false,
        }
    }

    /// Writes the cross-reference table and trailer, then consumes the
    /// registry and returns the underlying writer.
    ///
    /// Fails if any [`ObjectHandle`] issued by this registry is still alive,
    /// since its eventual `end()` would write into a file that already has
    /// its cross-reference table on disk.
    pub(crate) fn write_tail(self, trailer: PdfDictionary) -> PdfResult<W> {
        let outstanding = Rc::strong_count(&self.inner) - 1;
        if outstanding > 0 {
            return Err(RegistryError::HandlesStillOpen(outstanding).into());
        }

        let inner = Rc::try_unwrap(self.inner)
            .unwrap_or_else(|_| unreachable!("strong count checked above"))
            .into_inner();

        let mut sink = inner.sink;
        let xref_offset = sink.position();
        sink.write_str(&inner.xref.to_xref_string())?;
        sink.write_str("trailer\n")?;
        sink.write_str(&trailer.to_pdf_string())?;
        sink.write_str(&format!("\nstartxref\n{xref_offset}\n%%EOF\n"))?;
        sink.flush()?;
        Ok(sink.into_inner())
    }
}

/// A handle to an indirect object pending finalization.
pub struct ObjectHandle<W: Write> {
    id: ObjectId,
    dictionary: PdfDictionary,
    payload: Option<Vec<u8>>,
    inner: Rc<RefCell<Inner<W>>>,
    finished: bool,
    exempt_from_encryption: bool,
}

impl<W: Write> ObjectHandle<W> {
    /// Returns the object identifier producers use to build `/...  N 0 R`
    /// references to this object before it is finalized.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Marks this object as exempt from encryption, even when a security
    /// handler is configured. The `/Encrypt` dictionary itself is the only
    /// object in a conforming file that must stay in plaintext.
    pub fn exempt_from_encryption(&mut self) {
        self.exempt_from_encryption = true;
    }

    /// Attaches a stream payload to this object. Calling this more than once
    /// replaces the previous payload; calling it after [`Self::end`] fails.
    pub fn write(&mut self, data: impl Into<Vec<u8>>) -> PdfResult<()> {
        if self.finished {
            return Err(RegistryError::WriteAfterEnd.into());
        }
        self.payload = Some(data.into());
        Ok(())
    }

    /// Sets or overwrites a dictionary entry before finalization.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) -> PdfResult<()> {
        if self.finished {
            return Err(RegistryError::WriteAfterEnd.into());
        }
        self.dictionary.set(key, value);
        Ok(())
    }

    /// Finalizes the object: applies the stream filter stage (compression),
    /// encrypts the stream payload if a security handler is configured,
    /// records its offset for the cross-reference table, and writes it to
    /// the output sink.
    ///
    /// Compression always runs before encryption — compressing ciphertext
    /// is pointless, since it no longer has the redundancy a deflate
    /// transform can exploit.
    ///
    /// A second call is silently ignored, matching the "finalize once"
    /// contract producers rely on when a handle is held past its natural
    /// scope (e.g. in a `Drop` impl).
    pub fn end(&mut self) -> PdfResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let compress = self.inner.borrow().compress;
        let payload = match self.payload.take() {
            Some(data) => Some(Self::filter_payload(&mut self.dictionary, data, compress)?),
            None => None,
        };

        let mut inner = self.inner.borrow_mut();
        let security = if self.exempt_from_encryption { None } else { inner.security.clone() };

        if let Some(handler) = &security {
            for (_, value) in self.dictionary.iter_mut() {
                encrypt_strings(value, handler, self.id.number, self.id.generation)?;
            }
        }

        let encrypted_payload = match (&payload, &security) {
            (Some(data), Some(handler)) => {
                Some(handler.encrypt_data(data, self.id.number, self.id.generation)?)
            }
            (Some(data), None) => Some(data.clone()),
            (None, _) => None,
        };

        let offset = inner.sink.position();
        inner.xref.add_object(self.id, offset);

        inner.sink.write_str(&self.id.definition_string())?;
        inner.sink.write_str("\n")?;

        match encrypted_payload {
            Some(data) => {
                let mut dict = self.dictionary.clone();
                dict.set("Length", Object::Integer(data.len() as i64));
                let stream = PdfStream::from_raw(dict, data);
                inner.sink.write_bytes(stream.to_pdf_bytes().as_slice())?;
                inner.sink.write_str("\n")?;
            }
            None => {
                inner.sink.write_str(&self.dictionary.to_pdf_string())?;
                inner.sink.write_str("\n")?;
            }
        }

        inner.sink.write_str("endobj\n")?;

        trace!("finalized object {} at offset {offset}", self.id.number);
        Ok(())
    }

    /// Applies the deflate (zlib) stream filter to `data` when compression
    /// is enabled and the dictionary doesn't already name a filter, updating
    /// `dictionary` in place with `/Filter /FlateDecode`.
    #[cfg(feature = "compression")]
    fn filter_payload(dictionary: &mut PdfDictionary, data: Vec<u8>, compress: bool) -> PdfResult<Vec<u8>> {
        if !compress {
            return Ok(data);
        }
        let stream = PdfStream::with_dictionary(dictionary.clone(), data).with_compression()?;
        *dictionary = stream.dictionary;
        Ok(stream.data)
    }

    #[cfg(not(feature = "compression"))]
    fn filter_payload(_dictionary: &mut PdfDictionary, data: Vec<u8>, _compress: bool) -> PdfResult<Vec<u8>> {
        Ok(data)
    }
}

/// Recursively encrypts every string object reachable from `obj`, per
/// ISO 32000-2's requirement that Algorithm 1 apply to strings as well as
/// stream content.
fn encrypt_strings(
    obj: &mut Object,
    handler: &SecurityHandler,
    obj_num: u32,
    gen_num: u16,
) -> PdfResult<()> {
    match obj {
        Object::String(s) => {
            let is_hex = matches!(s, PdfString::Hex(_));
            let encrypted = handler.encrypt_data(s.as_bytes(), obj_num, gen_num)?;
            *s = if is_hex {
                PdfString::Hex(encrypted)
            } else {
                PdfString::Literal(encrypted)
            };
        }
        Object::Array(arr) => {
            for item in arr.iter_mut() {
                encrypt_strings(item, handler, obj_num, gen_num)?;
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                encrypt_strings(value, handler, obj_num, gen_num)?;
            }
        }
        _ => {}
    }
    Ok(())
}

impl<W: Write> Drop for ObjectHandle<W> {
    fn drop(&mut self) {
        if !self.finished {
            let _ = self.end();
        }
    }
}
