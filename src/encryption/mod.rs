//! PDF standard security handler.
//!
//! Supports every revision of the standard security handler named in the
//! encryption dictionary's `/R` entry: revisions 2 and 3 (40- to 128-bit
//! RC4), revision 4 (AES-128 via a crypt filter), and revision 5 (AES-256,
//! PDF 2.0). Revisions 2-4 share MD5/RC4 key derivation in [`legacy`];
//! revision 5 uses the single-round SHA-256 hash in [`r5`].
//!
//! # Example
//!
//! ```ignore
//! use rust_pdf::encryption::{EncryptionConfig, Permissions};
//!
//! let config = EncryptionConfig::aes256()
//!     .user_password("user123")
//!     .owner_password("owner456")
//!     .permissions(Permissions::new().allow_printing(true));
//!
//! let handler = SecurityHandler::new(config, file_id)?;
//! ```

mod config;
mod legacy;
mod permissions;
mod r5;
mod saslprep;

pub use config::{EncryptionAlgorithm, EncryptionConfig};
pub use permissions::Permissions;

use crate::error::EncryptionError;
use crate::object::{Object, PdfDictionary, PdfName, PdfString};
use log::debug;
use zeroize::Zeroize;

/// Key material for whichever revision [`EncryptionConfig`] selected.
#[derive(Debug, Clone)]
enum KeyMaterial {
    Legacy(legacy::LegacyKeys),
    R5(r5::EncryptionKeys),
}

/// Dispatches key derivation, the `/Encrypt` dictionary, and per-object
/// encryption across every supported standard security handler revision.
#[derive(Debug, Clone)]
pub struct SecurityHandler {
    config: EncryptionConfig,
    keys: KeyMaterial,
    file_id: Vec<u8>,
}

impl SecurityHandler {
    /// Creates a new security handler, deriving keys for the configured
    /// algorithm. `file_id` is the document's first file identifier element,
    /// required by every revision's key derivation.
    pub fn new(config: EncryptionConfig, file_id: Vec<u8>) -> Result<Self, EncryptionError> {
        if file_id.is_empty() {
            return Err(EncryptionError::MissingFileId);
        }

        let keys = if config.algorithm.is_legacy() {
            let revision = config.algorithm.r_value() as u8;
            let keys = legacy::derive_legacy_keys(
                &config.user_password,
                &config.owner_password,
                config.permissions.as_i32_for_revision(revision as i32),
                &file_id,
                revision,
                config.algorithm.key_length(),
                config.encrypt_metadata,
            )?;
            KeyMaterial::Legacy(keys)
        } else {
            let keys = r5::derive_aes256_keys(
                &config.user_password,
                &config.owner_password,
                config.permissions.as_i32(),
                config.encrypt_metadata,
            )?;
            KeyMaterial::R5(keys)
        };

        debug!(
            "derived {} key material ({} bytes)",
            match config.algorithm {
                EncryptionAlgorithm::Rc4Bit40 => "RC4-40",
                EncryptionAlgorithm::Rc4Bit128 => "RC4-128",
                EncryptionAlgorithm::Aes128 => "AES-128",
                EncryptionAlgorithm::Aes256 => "AES-256",
            },
            config.algorithm.key_length()
        );

        Ok(Self { config, keys, file_id })
    }

    /// Returns the file encryption key.
    pub fn file_key(&self) -> &[u8] {
        match &self.keys {
            KeyMaterial::Legacy(k) => &k.file_encryption_key,
            KeyMaterial::R5(k) => &k.file_encryption_key,
        }
    }

    /// Returns the file ID this handler was created with.
    pub fn file_id(&self) -> &[u8] {
        &self.file_id
    }

    /// Encrypts a buffer (a stream's content or a string object's bytes) for
    /// the given indirect object.
    pub fn encrypt_data(&self, data: &[u8], obj_num: u32, gen_num: u16) -> Result<Vec<u8>, EncryptionError> {
        match self.config.algorithm {
            EncryptionAlgorithm::Rc4Bit40 | EncryptionAlgorithm::Rc4Bit128 => {
                let key = legacy::object_key(self.file_key(), obj_num, gen_num, false);
                Ok(legacy::rc4_crypt(&key, data))
            }
            EncryptionAlgorithm::Aes128 => {
                let key = legacy::object_key(self.file_key(), obj_num, gen_num, true);
                aes128_cbc_encrypt(&key, data)
            }
            EncryptionAlgorithm::Aes256 => aes256_cbc_encrypt(self.file_key(), data),
        }
    }

    /// Decrypts a buffer previously produced by [`Self::encrypt_data`].
    #[allow(dead_code)]
    pub fn decrypt_data(&self, data: &[u8], obj_num: u32, gen_num: u16) -> Result<Vec<u8>, EncryptionError> {
        match self.config.algorithm {
            EncryptionAlgorithm::Rc4Bit40 | EncryptionAlgorithm::Rc4Bit128 => {
                let key = legacy::object_key(self.file_key(), obj_num, gen_num, false);
                Ok(legacy::rc4_crypt(&key, data))
            }
            EncryptionAlgorithm::Aes128 => {
                let key = legacy::object_key(self.file_key(), obj_num, gen_num, true);
                aes128_cbc_decrypt(&key, data)
            }
            EncryptionAlgorithm::Aes256 => aes256_cbc_decrypt(self.file_key(), data),
        }
    }

    /// Builds the `/Encrypt` dictionary. Field emission follows the order
    /// conforming readers expect: Filter, V, R, Length, O, U, P, then the
    /// crypt-filter fields (CF/StmF/StrF) for V>=4, then OE/UE/Perms for R>=5.
    pub fn create_encrypt_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();

        dict.set("Filter", Object::Name(PdfName::new_unchecked("Standard")));
        dict.set("V", Object::Integer(self.config.algorithm.v_value() as i64));
        dict.set("R", Object::Integer(self.config.algorithm.r_value() as i64));
        dict.set(
            "Length",
            Object::Integer((self.config.algorithm.key_length() * 8) as i64),
        );

        match &self.keys {
            KeyMaterial::Legacy(k) => {
                dict.set("O", Object::String(PdfString::literal_bytes(k.o_value.clone())));
                dict.set("U", Object::String(PdfString::literal_bytes(k.u_value.clone())));
            }
            KeyMaterial::R5(k) => {
                dict.set("O", Object::String(PdfString::Hex(k.o_value.clone())));
                dict.set("U", Object::String(PdfString::Hex(k.u_value.clone())));
            }
        }

        let p_value = self
            .config
            .permissions
            .as_i32_for_revision(self.config.algorithm.r_value());
        dict.set("P", Object::Integer(p_value as i64));

        if self.config.algorithm.v_value() >= 4 {
            let cfm = if self.config.algorithm.uses_aes() {
                if matches!(self.config.algorithm, EncryptionAlgorithm::Aes256) {
                    "AESV3"
                } else {
                    "AESV2"
                }
            } else {
                "V2"
            };

            let mut cf_dict = PdfDictionary::new();
            let mut std_cf = PdfDictionary::new();
            std_cf.set("CFM", Object::Name(PdfName::new_unchecked(cfm)));
            std_cf.set(
                "Length",
                Object::Integer(self.config.algorithm.key_length() as i64),
            );
            std_cf.set("AuthEvent", Object::Name(PdfName::new_unchecked("DocOpen")));
            cf_dict.set("StdCF", Object::Dictionary(std_cf));

            dict.set("CF", Object::Dictionary(cf_dict));
            dict.set("StmF", Object::Name(PdfName::new_unchecked("StdCF")));
            dict.set("StrF", Object::Name(PdfName::new_unchecked("StdCF")));

            if !self.config.encrypt_metadata {
                dict.set("EncryptMetadata", Object::Boolean(false));
            }
        }

        if let KeyMaterial::R5(k) = &self.keys {
            dict.set("OE", Object::String(PdfString::Hex(k.oe_value.clone())));
            dict.set("UE", Object::String(PdfString::Hex(k.ue_value.clone())));
            dict.set("Perms", Object::String(PdfString::Hex(k.perms_value.clone())));
        }

        dict
    }

    /// Creates the file ID array (`/ID` entry) for the trailer, repeating the
    /// same identifier as both the original and current value.
    pub fn create_file_id_array(&self) -> crate::object::PdfArray {
        let mut arr = crate::object::PdfArray::new();
        arr.push(Object::String(PdfString::Hex(self.file_id.clone())));
        arr.push(Object::String(PdfString::Hex(self.file_id.clone())));
        arr
    }
}

impl Drop for SecurityHandler {
    fn drop(&mut self) {
        self.file_id.zeroize();
    }
}

fn aes128_cbc_encrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockEncryptMut, KeyIvInit};
    use cbc::Encryptor;
    use rand::Rng;

    type Aes128CbcEnc = Encryptor<aes::Aes128>;

    let mut iv = [0u8; 16];
    rand::thread_rng().fill(&mut iv);

    let encryptor =
        Aes128CbcEnc::new_from_slices(key, &iv).map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    let padding_len = 16 - (data.len() % 16);
    let mut buf = vec![0u8; data.len() + padding_len];
    buf[..data.len()].copy_from_slice(data);

    let ciphertext = encryptor
        .encrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buf, data.len())
        .map_err(|e| EncryptionError::CipherFailed(format!("{e:?}")))?;

    let mut result = Vec::with_capacity(16 + ciphertext.len());
    result.extend_from_slice(&iv);
    result.extend_from_slice(ciphertext);
    Ok(result)
}

fn aes128_cbc_decrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockDecryptMut, KeyIvInit};
    use cbc::Decryptor;

    if data.len() < 16 {
        return Err(EncryptionError::CipherFailed("ciphertext too short".into()));
    }

    type Aes128CbcDec = Decryptor<aes::Aes128>;

    let (iv, ciphertext) = data.split_at(16);
    let decryptor =
        Aes128CbcDec::new_from_slices(key, iv).map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    let mut buf = ciphertext.to_vec();
    let plaintext = decryptor
        .decrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buf)
        .map_err(|e| EncryptionError::CipherFailed(format!("{e:?}")))?;

    Ok(plaintext.to_vec())
}

fn aes256_cbc_encrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockEncryptMut, KeyIvInit};
    use cbc::Encryptor;
    use rand::Rng;

    type Aes256CbcEnc = Encryptor<aes::Aes256>;

    let mut iv = [0u8; 16];
    rand::thread_rng().fill(&mut iv);

    let encryptor =
        Aes256CbcEnc::new_from_slices(key, &iv).map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    let padding_len = 16 - (data.len() % 16);
    let mut buf = vec![0u8; data.len() + padding_len];
    buf[..data.len()].copy_from_slice(data);

    let ciphertext = encryptor
        .encrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buf, data.len())
        .map_err(|e| EncryptionError::CipherFailed(format!("{e:?}")))?;

    let mut result = Vec::with_capacity(16 + ciphertext.len());
    result.extend_from_slice(&iv);
    result.extend_from_slice(ciphertext);
    Ok(result)
}

fn aes256_cbc_decrypt(key: &[u8], data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    use aes::cipher::{BlockDecryptMut, KeyIvInit};
    use cbc::Decryptor;

    if data.len() < 16 {
        return Err(EncryptionError::CipherFailed("ciphertext too short".into()));
    }

    type Aes256CbcDec = Decryptor<aes::Aes256>;

    let (iv, ciphertext) = data.split_at(16);
    let decryptor =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|e| EncryptionError::CipherFailed(e.to_string()))?;

    let mut buf = ciphertext.to_vec();
    let plaintext = decryptor
        .decrypt_padded_mut::<aes::cipher::block_padding::Pkcs7>(&mut buf)
        .map_err(|e| EncryptionError::CipherFailed(format!("{e:?}")))?;

    Ok(plaintext.to_vec())
}

/// Generates a random 16-byte file identifier, suitable for both elements of
/// the `/ID` array when the document has no deterministic source of entropy.
pub fn generate_file_id() -> Vec<u8> {
    use rand::Rng;
    let mut id = vec![0u8; 16];
    rand::thread_rng().fill(&mut id[..]);
    id
}
