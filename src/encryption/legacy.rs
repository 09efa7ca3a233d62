//! Key derivation and stream encryption for the legacy standard security handler
//! (revisions 2 through 4: 40-bit and 128-bit RC4, and AES-128-CBC under V4).
//!
//! Implements Algorithm 2 (computing an encryption key) and Algorithm 1
//! (encrypting data using RC4 or AES) from ISO 32000-2, plus the per-object
//! key derivation that both algorithms share.

use crate::error::EncryptionError;
use md5::{Digest, Md5};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimal RC4 stream cipher (key-scheduling + pseudo-random generation),
/// supporting the arbitrary-length runtime keys this module requires.
struct Rc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    fn new(key: &[u8]) -> Self {
        let mut state = [0u8; 256];
        for (idx, byte) in state.iter_mut().enumerate() {
            *byte = idx as u8;
        }
        let mut j: u8 = 0;
        for i in 0..256usize {
            j = j
                .wrapping_add(state[i])
                .wrapping_add(key[i % key.len()]);
            state.swap(i, j as usize);
        }
        Rc4 { state, i: 0, j: 0 }
    }

    fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.state[self.i as usize]);
            self.state.swap(self.i as usize, self.j as usize);
            let k = self.state[(self.state[self.i as usize].wrapping_add(self.state[self.j as usize])) as usize];
            *byte ^= k;
        }
    }
}

/// The 32-byte padding string used to pad or truncate passwords to exactly 32 bytes
/// (ISO 32000-2, 7.6.4.3, Algorithm 2, step a).
const PADDING: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

/// Encryption key material for a revision 2, 3, or 4 security handler.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct LegacyKeys {
    /// The file encryption key (5 bytes for R2, `key_length_bytes` for R3/R4).
    pub file_encryption_key: Vec<u8>,
    /// The O (owner) value for the encryption dictionary (32 bytes).
    pub o_value: Vec<u8>,
    /// The U (user) value for the encryption dictionary (32 bytes).
    pub u_value: Vec<u8>,
}

/// Pads or truncates a password to exactly 32 bytes per Algorithm 2, step a.
fn pad_password(password: &[u8]) -> [u8; 32] {
    let mut padded = [0u8; 32];
    if password.len() >= 32 {
        padded.copy_from_slice(&password[..32]);
    } else {
        padded[..password.len()].copy_from_slice(password);
        padded[password.len()..].copy_from_slice(&PADDING[..32 - password.len()]);
    }
    padded
}

/// Algorithm 3: computing the owner password value (O entry).
///
/// `owner_password` falls back to `user_password` when empty, matching the
/// convention that an unset owner password defaults to the user password.
pub fn compute_owner_value(
    owner_password: &[u8],
    user_password: &[u8],
    revision: u8,
    key_length_bytes: usize,
) -> Vec<u8> {
    let owner_source = if owner_password.is_empty() {
        user_password
    } else {
        owner_password
    };

    let padded_owner = pad_password(owner_source);
    let mut digest: [u8; 16] = Md5::digest(padded_owner).into();

    if revision >= 3 {
        for _ in 0..50 {
            digest = Md5::digest(&digest[..key_length_bytes.min(16)]).into();
        }
    }

    let rc4_key = &digest[..key_length_bytes];
    let mut result = pad_password(user_password).to_vec();

    let mut cipher = Rc4::new(rc4_key);
    cipher.apply_keystream(&mut result);

    if revision >= 3 {
        for i in 1u8..=19 {
            let round_key: Vec<u8> = rc4_key.iter().map(|b| b ^ i).collect();
            let mut cipher = Rc4::new(round_key.as_slice());
            cipher.apply_keystream(&mut result);
        }
    }

    result
}

/// Algorithm 2: computing an encryption key from the padded user password,
/// the owner value, the permissions bitmask, and the first file identifier.
pub fn compute_encryption_key(
    user_password: &[u8],
    owner_value: &[u8],
    permissions: i32,
    file_id: &[u8],
    revision: u8,
    key_length_bytes: usize,
    encrypt_metadata: bool,
) -> Vec<u8> {
    let padded_user = pad_password(user_password);

    let mut hasher = Md5::new();
    hasher.update(padded_user);
    hasher.update(owner_value);
    hasher.update(permissions.to_le_bytes());
    hasher.update(file_id);
    if revision >= 4 && !encrypt_metadata {
        hasher.update([0xFF, 0xFF, 0xFF, 0xFF]);
    }
    let mut digest: [u8; 16] = hasher.finalize().into();

    let n = if revision == 2 { 5 } else { key_length_bytes };

    if revision >= 3 {
        for _ in 0..50 {
            digest = Md5::digest(&digest[..n]).into();
        }
    }

    digest[..n].to_vec()
}

/// Algorithm 4/5: computing the user password value (U entry).
///
/// Revision 2 encrypts the padding string directly with RC4; revision 3 and
/// up run the MD5-based scramble against the file identifier.
pub fn compute_user_value(file_key: &[u8], file_id: &[u8], revision: u8) -> Vec<u8> {
    if revision == 2 {
        let mut result = PADDING.to_vec();
        let mut cipher = Rc4::new(file_key);
        cipher.apply_keystream(&mut result);
        return result;
    }

    let mut hasher = Md5::new();
    hasher.update(PADDING);
    hasher.update(file_id);
    let digest: [u8; 16] = hasher.finalize().into();

    let mut result = digest.to_vec();
    let mut cipher = Rc4::new(file_key);
    cipher.apply_keystream(&mut result);

    for i in 1u8..=19 {
        let round_key: Vec<u8> = file_key.iter().map(|b| b ^ i).collect();
        let mut cipher = Rc4::new(round_key.as_slice());
        cipher.apply_keystream(&mut result);
    }

    // Per spec, the stored U value is padded to 32 bytes with arbitrial bytes;
    // we emit zeros for the trailing 16, which conforming readers ignore.
    result.resize(32, 0);
    result
}

/// Derives the full key set for a revision 2, 3, or 4 security handler.
pub fn derive_legacy_keys(
    user_password: &str,
    owner_password: &str,
    permissions: i32,
    file_id: &[u8],
    revision: u8,
    key_length_bytes: usize,
    encrypt_metadata: bool,
) -> Result<LegacyKeys, EncryptionError> {
    if !(2..=4).contains(&revision) {
        return Err(EncryptionError::UnsupportedAlgorithm(format!(
            "unsupported standard security handler revision: {revision}"
        )));
    }

    let user_bytes = user_password.as_bytes();
    let owner_bytes = owner_password.as_bytes();

    let o_value = compute_owner_value(owner_bytes, user_bytes, revision, key_length_bytes);
    let file_encryption_key = compute_encryption_key(
        user_bytes,
        &o_value,
        permissions,
        file_id,
        revision,
        key_length_bytes,
        encrypt_metadata,
    );
    let u_value = compute_user_value(&file_encryption_key, file_id, revision);

    Ok(LegacyKeys {
        file_encryption_key,
        o_value,
        u_value,
    })
}

/// Derives the per-object RC4/AES-128 key from the file key and the object's
/// number and generation (Algorithm 1, steps b-d). `for_aes` appends the
/// `sAlT` constant required when the crypt filter method is AESV2.
pub fn object_key(file_key: &[u8], object_number: u32, generation: u16, for_aes: bool) -> Vec<u8> {
    let mut hasher = Md5::new();
    hasher.update(file_key);
    hasher.update(&object_number.to_le_bytes()[..3]);
    hasher.update(&generation.to_le_bytes()[..2]);
    if for_aes {
        hasher.update(b"sAlT");
    }
    let digest: [u8; 16] = hasher.finalize().into();

    let n = (file_key.len() + 5).min(16);
    digest[..n].to_vec()
}

/// Encrypts (or decrypts; RC4 is its own inverse) a buffer with the per-object RC4 key.
pub fn rc4_crypt(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut buf = data.to_vec();
    let mut cipher = Rc4::new(key);
    cipher.apply_keystream(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_password_short() {
        let padded = pad_password(b"abc");
        assert_eq!(&padded[..3], b"abc");
        assert_eq!(&padded[3..], &PADDING[..29]);
    }

    #[test]
    fn test_pad_password_long_truncates() {
        let long = [b'x'; 40];
        let padded = pad_password(&long);
        assert_eq!(padded, [b'x'; 32]);
    }

    #[test]
    fn test_derive_legacy_keys_r2() {
        let keys = derive_legacy_keys("user", "owner", -44, b"0123456789ABCDEF", 2, 5, true).unwrap();
        assert_eq!(keys.file_encryption_key.len(), 5);
        assert_eq!(keys.o_value.len(), 32);
        assert_eq!(keys.u_value.len(), 32);
    }

    #[test]
    fn test_derive_legacy_keys_r3_128bit() {
        let keys = derive_legacy_keys("user", "owner", -44, b"0123456789ABCDEF", 3, 16, true).unwrap();
        assert_eq!(keys.file_encryption_key.len(), 16);
    }

    #[test]
    fn test_empty_owner_password_falls_back_to_user() {
        let o_from_empty = compute_owner_value(b"", b"user", 3, 16);
        let o_from_user = compute_owner_value(b"user", b"user", 3, 16);
        assert_eq!(o_from_empty, o_from_user);
    }

    #[test]
    fn test_object_key_length_capped_at_16() {
        let file_key = [0u8; 16];
        let key = object_key(&file_key, 7, 0, false);
        assert_eq!(key.len(), 16);
    }

    #[test]
    fn test_object_key_varies_with_object_number() {
        let file_key = [0x42u8; 5];
        let key_a = object_key(&file_key, 1, 0, false);
        let key_b = object_key(&file_key, 2, 0, false);
        assert_ne!(key_a, key_b);
    }

    #[test]
    fn test_rc4_roundtrip() {
        let key = b"secretkey";
        let plaintext = b"The quick brown fox";
        let ciphertext = rc4_crypt(key, plaintext);
        assert_ne!(ciphertext, plaintext);
        let decrypted = rc4_crypt(key, &ciphertext);
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_rc4_known_answer_vector() {
        let ciphertext = rc4_crypt(b"Key", b"Plaintext");
        assert_eq!(ciphertext, [0xbb, 0xf3, 0x16, 0xe8, 0xd9, 0x40, 0xaf, 0x0a, 0xd3]);
    }

    #[test]
    fn test_unsupported_revision_rejected() {
        let result = derive_legacy_keys("user", "owner", -44, b"0123456789ABCDEF", 6, 16, true);
        assert!(result.is_err());
    }
}
