//! Key derivation for the AES-256 (V=5, R=5) standard security handler.
//!
//! Implements the R5 password hash and key-wrapping formulas (the single
//! round SHA-256 scheme, not ISO 32000-2's later R6 iterative hardening).
//! Revisions 2-4 live in [`super::legacy`].

use super::saslprep::prepare_password;
use crate::error::EncryptionError;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Encryption key material derived from passwords.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKeys {
    /// The file encryption key (32 bytes for AES-256).
    pub file_encryption_key: Vec<u8>,
    /// The O (owner) value for the encryption dictionary.
    pub o_value: Vec<u8>,
    /// The U (user) value for the encryption dictionary.
    pub u_value: Vec<u8>,
    /// The OE (owner encrypted key) value.
    pub oe_value: Vec<u8>,
    /// The UE (user encrypted key) value.
    pub ue_value: Vec<u8>,
    /// The Perms (permissions validation) value.
    pub perms_value: Vec<u8>,
}

/// Derives encryption keys for AES-256 (V=5, R=5) encryption: the U/UE,
/// O/OE, and Perms values.
pub fn derive_aes256_keys(
    user_password: &str,
    owner_password: &str,
    permissions: i32,
    encrypt_metadata: bool,
) -> Result<EncryptionKeys, EncryptionError> {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    // Generate random salts (8 bytes each)
    let mut user_validation_salt = [0u8; 8];
    let mut user_key_salt = [0u8; 8];
    let mut owner_validation_salt = [0u8; 8];
    let mut owner_key_salt = [0u8; 8];

    rng.fill(&mut user_validation_salt);
    rng.fill(&mut user_key_salt);
    rng.fill(&mut owner_validation_salt);
    rng.fill(&mut owner_key_salt);

    // Generate random file encryption key (32 bytes)
    let mut file_encryption_key = [0u8; 32];
    rng.fill(&mut file_encryption_key);

    // SASLprep and truncate passwords to at most 127 bytes
    let user_pwd = prepare_password(user_password)?;
    let owner_pwd = prepare_password(owner_password)?;

    // ===== Computing U and UE =====

    let user_hash = compute_hash_2a(&user_pwd, &user_validation_salt, None)?;

    // U = Hash (32 bytes) || user_validation_salt (8 bytes) || user_key_salt (8 bytes)
    let mut u_value = Vec::with_capacity(48);
    u_value.extend_from_slice(&user_hash);
    u_value.extend_from_slice(&user_validation_salt);
    u_value.extend_from_slice(&user_key_salt);

    let user_key = compute_hash_2a(&user_pwd, &user_key_salt, None)?;

    // UE = AES-256-CBC(user_key, IV=0, file_encryption_key)
    let ue_value = aes_cbc_encrypt_no_padding(&user_key, &[0u8; 16], &file_encryption_key)?;

    // ===== Computing O and OE =====

    let owner_hash = compute_hash_2a(&owner_pwd, &owner_validation_salt, Some(&u_value))?;

    // O = Hash (32 bytes) || owner_validation_salt (8 bytes) || owner_key_salt (8 bytes)
    let mut o_value = Vec::with_capacity(48);
    o_value.extend_from_slice(&owner_hash);
    o_value.extend_from_slice(&owner_validation_salt);
    o_value.extend_from_slice(&owner_key_salt);

    let owner_key = compute_hash_2a(&owner_pwd, &owner_key_salt, Some(&u_value))?;

    // OE = AES-256-CBC(owner_key, IV=0, file_encryption_key)
    let oe_value = aes_cbc_encrypt_no_padding(&owner_key, &[0u8; 16], &file_encryption_key)?;

    let perms_value = compute_perms(&file_encryption_key, permissions, encrypt_metadata)?;

    Ok(EncryptionKeys {
        file_encryption_key: file_encryption_key.to_vec(),
        o_value,
        u_value,
        oe_value,
        ue_value,
        perms_value,
    })
}

/// The R5 password hash: a single `SHA-256(password ‖ salt ‖ u)` call.
///
/// `u` is empty for the user password and the full 48-byte U value for the
/// owner password.
fn compute_hash_2a(
    password: &[u8],
    salt: &[u8],
    user_bytes: Option<&[u8]>,
) -> Result<[u8; 32], EncryptionError> {
    let u = user_bytes.unwrap_or(&[]);

    let mut hasher = Sha256::new();
    hasher.update(password);
    hasher.update(salt);
    hasher.update(u);
    Ok(hasher.finalize().into())
}

/// Computes the Perms value (16 bytes).
fn compute_perms(
    file_key: &[u8],
    permissions: i32,
    encrypt_metadata: bool,
) -> Result<Vec<u8>, EncryptionError> {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    // Build the 16-byte plaintext
    let mut perms_plain = [0u8; 16];

    // Bytes 0-3: permissions (little-endian)
    perms_plain[0..4].copy_from_slice(&permissions.to_le_bytes());

    // Bytes 4-7: 0xFFFFFFFF
    perms_plain[4..8].copy_from_slice(&0xFFFFFFFFu32.to_le_bytes());

    // Byte 8: 'T' or 'F' for EncryptMetadata
    perms_plain[8] = if encrypt_metadata { b'T' } else { b'F' };

    // Byte 9: 'a'
    perms_plain[9] = b'a';

    // Byte 10: 'd'
    perms_plain[10] = b'd';

    // Byte 11: 'b'
    perms_plain[11] = b'b';

    // Bytes 12-15: random
    rng.fill(&mut perms_plain[12..16]);

    // Encrypt with AES-256-ECB (no IV, single block)
    aes_ecb_encrypt(file_key, &perms_plain)
}

/// AES-256-CBC encryption (PKCS#7 padding).
#[allow(dead_code)]
fn aes_cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockEncryptMut, KeyIvInit};
    use cbc::Encryptor;

    type Aes256CbcEnc = Encryptor<aes::Aes256>;

    let encryptor = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    // Calculate buffer size (plaintext + PKCS#7 padding)
    let block_size = 16;
    let padding_len = block_size - (plaintext.len() % block_size);
    let padded_len = plaintext.len() + padding_len;

    // Create buffer with space for padding
    let mut buf = vec![0u8; padded_len];
    buf[..plaintext.len()].copy_from_slice(plaintext);

    // Encrypt with PKCS#7 padding
    let ciphertext = encryptor
        .encrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buf, plaintext.len())
        .map_err(|e| EncryptionError::CipherFailed(format!("Encryption failed: {:?}", e)))?;

    Ok(ciphertext.to_vec())
}

/// AES-256-CBC encryption without padding (for block-aligned data like UE/OE).
fn aes_cbc_encrypt_no_padding(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockEncryptMut, KeyIvInit};
    use cbc::Encryptor;

    type Aes256CbcEnc = Encryptor<aes::Aes256>;

    if plaintext.len() % 16 != 0 {
        return Err(EncryptionError::CipherFailed(
            "Plaintext must be block-aligned for no-padding encryption".into(),
        ));
    }

    let encryptor = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    // Create buffer - same size as plaintext since no padding
    let mut buf = plaintext.to_vec();

    // Encrypt using NoPadding since data is already block-aligned
    let ciphertext = encryptor
        .encrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut buf, plaintext.len())
        .map_err(|e| EncryptionError::CipherFailed(format!("Encryption failed: {:?}", e)))?;

    Ok(ciphertext.to_vec())
}

/// AES-256-ECB encryption (single block, no padding).
fn aes_ecb_encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockEncrypt, KeyInit};

    if plaintext.len() != 16 {
        return Err(EncryptionError::CipherFailed(
            "ECB plaintext must be 16 bytes".into(),
        ));
    }

    let cipher = aes::Aes256::new_from_slice(key)
        .map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    let mut block: aes::cipher::generic_array::GenericArray<u8, _> =
        aes::cipher::generic_array::GenericArray::clone_from_slice(plaintext);
    cipher.encrypt_block(&mut block);

    Ok(block.to_vec())
}

/// AES-256-CBC decryption.
#[allow(dead_code)]
fn aes_cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockDecryptMut, KeyIvInit};
    use cbc::Decryptor;

    type Aes256CbcDec = Decryptor<aes::Aes256>;

    let decryptor = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    // Clone ciphertext to mutable buffer
    let mut buf = ciphertext.to_vec();

    let plaintext = decryptor
        .decrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buf)
        .map_err(|e| EncryptionError::CipherFailed(format!("Decryption failed: {:?}", e)))?;

    Ok(plaintext.to_vec())
}

/// Verifies a user password against the stored U value.
/// Returns the file encryption key if successful.
pub fn verify_user_password(
    password: &str,
    u_value: &[u8],
    ue_value: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    if u_value.len() != 48 {
        return Err(EncryptionError::CipherFailed("Invalid U value length".into()));
    }
    if ue_value.len() != 32 {
        return Err(EncryptionError::CipherFailed("Invalid UE value length".into()));
    }

    let password_bytes = prepare_password(password)?;

    // Extract validation salt from U[32:40]
    let validation_salt = &u_value[32..40];

    // Recompute the hash with the stored validation salt.
    let hash = compute_hash_2a(&password_bytes, validation_salt, None)?;

    // Compare with stored hash U[0:32]
    if hash.as_slice() != &u_value[0..32] {
        return Err(EncryptionError::CipherFailed("Password verification failed".into()));
    }

    // Password is correct, now decrypt the file key from UE
    // Key salt is at U[40:48]
    let key_salt = &u_value[40..48];

    // Derive the key that UE was wrapped with, from the key salt this time.
    let decryption_key = compute_hash_2a(&password_bytes, key_salt, None)?;

    // Decrypt UE to get file key using AES-256-CBC with zero IV
    let file_key = aes_cbc_decrypt_no_padding(&decryption_key, &[0u8; 16], ue_value)?;

    Ok(file_key)
}

/// AES-256-CBC decryption without padding.
fn aes_cbc_decrypt_no_padding(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockDecryptMut, KeyIvInit};
    use cbc::Decryptor;

    type Aes256CbcDec = Decryptor<aes::Aes256>;

    if ciphertext.len() % 16 != 0 {
        return Err(EncryptionError::CipherFailed(
            "Ciphertext must be block-aligned".into(),
        ));
    }

    let decryptor = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    let mut buf = ciphertext.to_vec();

    let plaintext = decryptor
        .decrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut buf)
        .map_err(|e| EncryptionError::CipherFailed(format!("Decryption failed: {:?}", e)))?;

    Ok(plaintext.to_vec())
}
