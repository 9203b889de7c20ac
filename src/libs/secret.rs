//! Symmetric encryption for values persisted on disk.
//!
//! The session payload may carry a live credential, so the file-backed
//! key/value store never writes it in the clear. Values are encrypted with
//! AES-256-CBC (PKCS7 padding) and stored base64 encoded. The key and IV are
//! embedded at compile time by `build.rs`.

use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};

// Include generated metadata with encryption keys
include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

#[derive(Clone, Debug)]
pub struct Cipher {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl Default for Cipher {
    fn default() -> Self {
        Self::new(APP_METADATA_ENCRYPTION_KEY, APP_METADATA_ENCRYPTION_IV)
    }
}

impl Cipher {
    pub fn new(key: &[u8], iv: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            iv: iv.to_vec(),
        }
    }

    /// Encrypts `plaintext` and returns it base64 encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or IV has the wrong length.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let ciphertext = cipher.encrypt_vec(plaintext.as_bytes());
        Ok(BASE64_STANDARD.encode(ciphertext))
    }

    /// Reverses [`Cipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns an error for malformed base64, bad padding (wrong key or
    /// tampered data) or a plaintext that is not UTF-8.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let plaintext = cipher.decrypt_vec(&ciphertext)?;
        Ok(String::from_utf8(plaintext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_key_lengths() {
        assert_eq!(APP_METADATA_ENCRYPTION_KEY.len(), 32);
        assert_eq!(APP_METADATA_ENCRYPTION_IV.len(), 16);
    }

    #[test]
    fn test_ciphertext_hides_plaintext() {
        let cipher = Cipher::default();
        let encoded = cipher.encrypt(r#"{"credential":"sid=abc"}"#).unwrap();
        assert!(!encoded.contains("sid=abc"));
        assert_eq!(cipher.decrypt(&encoded).unwrap(), r#"{"credential":"sid=abc"}"#);
    }

    #[test]
    fn test_decrypt_rejects_garbage() {
        let cipher = Cipher::default();
        assert!(cipher.decrypt("invalid_base64_content!@#$").is_err());
    }

    #[test]
    fn test_wrong_key_length() {
        let cipher = Cipher::new(b"short", b"also short");
        assert!(cipher.encrypt("value").is_err());
    }
}
