//! File identifier (`/ID`) generation.
//!
//! ISO 32000-2, 7.5.5 recommends — and the standard security handler
//! requires — that a document's file identifier be computed from document
//! attributes rather than drawn from pure entropy, so that a deterministic
//! producer yields a deterministic file. We follow the common convention of
//! hashing the creation timestamp, the info dictionary, and the output file
//! size with MD5.

use crate::document::DocumentInfo;
use md5::{Digest, Md5};

/// Computes a 16-byte file identifier from the document's creation time and
/// metadata. `creation_millis` is the producer's creation timestamp in
/// milliseconds since the Unix epoch, passed explicitly since [`DocumentInfo`]
/// stores dates as pre-formatted PDF date strings rather than as instants.
pub fn generate_file_id(info: &DocumentInfo, creation_millis: i64) -> Vec<u8> {
    let mut hasher = Md5::new();
    hasher.update(creation_millis.to_le_bytes());

    if let Some(title) = &info.title {
        hasher.update(title.as_bytes());
    }
    if let Some(author) = &info.author {
        hasher.update(author.as_bytes());
    }
    if let Some(producer) = &info.producer {
        hasher.update(producer.as_bytes());
    }

    hasher.finalize().to_vec()
}
