//! Password preparation for the revision 5 (AES-256) security handler.
//!
//! ISO 32000-2 7.6.4.3.4 requires passwords to be processed with SASLprep
//! (RFC 4013) before use in the R5 password hash, so that passwords entered
//! with different Unicode normalization or casing of combining characters
//! still derive the same key.

use crate::error::EncryptionError;

/// Applies SASLprep and truncates the result to 127 bytes. Passwords that
/// fail to SASLprep (contain prohibited codepoints)
/// fall back to their raw UTF-8 bytes, matching the "should" (not "shall")
/// wording conforming readers use for this step.
pub fn prepare_password(password: &str) -> Result<Vec<u8>, EncryptionError> {
    let prepared = match stringprep::saslprep(password) {
        Ok(cow) => cow.into_owned(),
        Err(_) => password.to_owned(),
    };

    let bytes = prepared.as_bytes();
    if bytes.len() <= 127 {
        return Ok(bytes.to_vec());
    }

    let mut len = 127;
    while len > 0 && !prepared.is_char_boundary(len) {
        len -= 1;
    }
    Ok(bytes[..len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_password_unchanged() {
        assert_eq!(prepare_password("hunter2").unwrap(), b"hunter2");
    }

    #[test]
    fn test_truncates_long_password() {
        let long = "a".repeat(200);
        let prepared = prepare_password(&long).unwrap();
        assert!(prepared.len() <= 127);
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(prepare_password("").unwrap(), Vec::<u8>::new());
    }
}
