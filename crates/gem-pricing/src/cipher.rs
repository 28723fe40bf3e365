//! Transport decryption of prices.
//!
//! Prices travel as OpenSSL passphrase envelopes: base64 of
//! `"Salted__" || salt[8] || ciphertext`, with key and IV derived from the
//! passphrase via `EVP_BytesToKey` (MD5, one round) and AES-256-CBC/PKCS#7 for
//! the payload. This is the format CryptoJS emits for
//! `AES.encrypt(text, passphrase)`.
//!
//! Neither the secret nor the plaintext is ever logged.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use md5::{Digest, Md5};

use crate::numeric::parse_leading_float;
use crate::CodecError;

type Aes256CbcDec = cbc::Decryptor<Aes256>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;

const SALT_HEADER: &[u8; 8] = b"Salted__";
const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// Decrypt a transport price into a number.
///
/// Returns `0.0` when either input is empty or when anything goes wrong.
/// A `0` result means "price unavailable", not "price is zero".
pub fn decrypt(ciphertext: &str, secret: &str) -> f64 {
    match try_decrypt(ciphertext, secret) {
        Ok(value) => value,
        Err(CodecError::Missing(what)) => {
            tracing::debug!(missing = what, "price decryption skipped");
            0.0
        }
        Err(e) => {
            tracing::warn!(error = %e, "price decryption failed");
            0.0
        }
    }
}

/// Decrypt a transport price, reporting why it failed.
pub fn try_decrypt(ciphertext: &str, secret: &str) -> Result<f64, CodecError> {
    let ciphertext = ciphertext.trim();
    if ciphertext.is_empty() {
        return Err(CodecError::Missing("ciphertext"));
    }
    if secret.is_empty() {
        return Err(CodecError::Missing("secret"));
    }

    let raw = STANDARD
        .decode(ciphertext)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;

    if raw.len() < SALT_HEADER.len() + SALT_LEN || &raw[..SALT_HEADER.len()] != SALT_HEADER {
        return Err(CodecError::MissingSaltHeader);
    }
    let salt = &raw[SALT_HEADER.len()..SALT_HEADER.len() + SALT_LEN];
    let body = &raw[SALT_HEADER.len() + SALT_LEN..];
    if body.is_empty() || body.len() % BLOCK_LEN != 0 {
        return Err(CodecError::InvalidLength(body.len()));
    }

    let (key, iv) = derive_key_iv(secret.as_bytes(), salt);
    let plaintext = Aes256CbcDec::new_from_slices(&key, &iv)
        .map_err(|_| CodecError::InvalidLength(key.len()))?
        .decrypt_padded_vec_mut::<Pkcs7>(body)
        .map_err(|_| CodecError::BadPadding)?;

    let text = String::from_utf8(plaintext).map_err(|_| CodecError::InvalidUtf8)?;
    parse_leading_float(&text).ok_or(CodecError::NotANumber)
}

/// Encrypt `plaintext` into the transport envelope using a fixed salt.
///
/// The same `(plaintext, secret, salt)` always produces the same envelope.
pub fn seal(plaintext: &str, secret: &str, salt: [u8; SALT_LEN]) -> Result<String, CodecError> {
    if secret.is_empty() {
        return Err(CodecError::Missing("secret"));
    }

    let (key, iv) = derive_key_iv(secret.as_bytes(), &salt);
    let body = Aes256CbcEnc::new_from_slices(&key, &iv)
        .map_err(|_| CodecError::InvalidLength(key.len()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut envelope = Vec::with_capacity(SALT_HEADER.len() + SALT_LEN + body.len());
    envelope.extend_from_slice(SALT_HEADER);
    envelope.extend_from_slice(&salt);
    envelope.extend_from_slice(&body);
    Ok(STANDARD.encode(envelope))
}

/// Encrypt `plaintext` with a freshly generated random salt.
pub fn seal_random(plaintext: &str, secret: &str) -> Result<String, CodecError> {
    use rand::Rng;

    let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
    seal(plaintext, secret, salt)
}

/// OpenSSL `EVP_BytesToKey` with MD5 and a single iteration.
fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> ([u8; KEY_LEN], [u8; IV_LEN]) {
    let mut derived = Vec::with_capacity(KEY_LEN + IV_LEN + 16);
    let mut previous: Vec<u8> = Vec::new();

    while derived.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        hasher.update(&previous);
        hasher.update(passphrase);
        hasher.update(salt);
        previous = hasher.finalize().to_vec();
        derived.extend_from_slice(&previous);
    }

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&derived[..KEY_LEN]);
    iv.copy_from_slice(&derived[KEY_LEN..KEY_LEN + IV_LEN]);
    (key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "correct horse battery staple";
    const SALT: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    /// `echo -n 12345.5 | openssl enc -aes-256-cbc -md md5 -base64`
    const OPENSSL_ENVELOPE: &str = "U2FsdGVkX1/45qrtUf7rk+dIrUzRfhNbYsRquGtohzw=";
    const OPENSSL_SALT: [u8; 8] = [0xf8, 0xe6, 0xaa, 0xed, 0x51, 0xfe, 0xeb, 0x93];

    #[test]
    fn test_decrypt_openssl_envelope() {
        assert_eq!(try_decrypt(OPENSSL_ENVELOPE, SECRET).unwrap(), 12345.5);
        assert_eq!(decrypt(OPENSSL_ENVELOPE, SECRET), 12345.5);
        assert_eq!(decrypt(OPENSSL_ENVELOPE, "wrong secret"), 0.0);
    }

    #[test]
    fn test_seal_matches_openssl() {
        assert_eq!(seal("12345.5", SECRET, OPENSSL_SALT).unwrap(), OPENSSL_ENVELOPE);
    }

    #[test]
    fn test_decrypt_sealed_price() {
        let envelope = seal("12345.5", SECRET, SALT).unwrap();
        assert_eq!(decrypt(&envelope, SECRET), 12345.5);
    }

    #[test]
    fn test_decrypt_is_deterministic() {
        let envelope = seal("880", SECRET, SALT).unwrap();
        let first = decrypt(&envelope, SECRET);
        let second = decrypt(&envelope, SECRET);
        assert_eq!(first, second);
        assert_eq!(first, 880.0);
    }

    #[test]
    fn test_seal_is_deterministic_for_fixed_salt() {
        assert_eq!(
            seal("42", SECRET, SALT).unwrap(),
            seal("42", SECRET, SALT).unwrap()
        );
    }

    #[test]
    fn test_envelope_layout() {
        let envelope = seal("1", SECRET, SALT).unwrap();
        let raw = STANDARD.decode(envelope).unwrap();
        assert_eq!(&raw[..8], b"Salted__");
        assert_eq!(&raw[8..16], &SALT);
        assert_eq!(raw.len(), 16 + 16);
    }

    #[test]
    fn test_empty_inputs_yield_zero() {
        let envelope = seal("99", SECRET, SALT).unwrap();
        assert_eq!(decrypt("", SECRET), 0.0);
        assert_eq!(decrypt(&envelope, ""), 0.0);
        assert_eq!(decrypt("   ", SECRET), 0.0);
        assert_eq!(try_decrypt("", SECRET), Err(CodecError::Missing("ciphertext")));
        assert_eq!(try_decrypt(&envelope, ""), Err(CodecError::Missing("secret")));
    }

    #[test]
    fn test_malformed_ciphertext_yields_zero() {
        assert_eq!(decrypt("not base64 !!", SECRET), 0.0);
        assert!(matches!(
            try_decrypt("not base64 !!", SECRET),
            Err(CodecError::InvalidBase64(_))
        ));

        let no_header = STANDARD.encode([0u8; 32]);
        assert_eq!(try_decrypt(&no_header, SECRET), Err(CodecError::MissingSaltHeader));

        let mut short = b"Salted__".to_vec();
        short.extend_from_slice(&SALT);
        short.extend_from_slice(&[0u8; 5]);
        assert_eq!(
            try_decrypt(&STANDARD.encode(short), SECRET),
            Err(CodecError::InvalidLength(5))
        );
    }

    #[test]
    fn test_wrong_secret_yields_zero() {
        let envelope = seal("5000", SECRET, SALT).unwrap();
        assert_eq!(decrypt(&envelope, "wrong secret"), 0.0);
        assert!(try_decrypt(&envelope, "wrong secret").is_err());
    }

    #[test]
    fn test_non_numeric_plaintext_yields_zero() {
        let envelope = seal("price on request", SECRET, SALT).unwrap();
        assert_eq!(try_decrypt(&envelope, SECRET), Err(CodecError::NotANumber));
        assert_eq!(decrypt(&envelope, SECRET), 0.0);
    }

    #[test]
    fn test_seal_random_round_trips() {
        let a = seal_random("710", SECRET).unwrap();
        let b = seal_random("710", SECRET).unwrap();
        assert_eq!(decrypt(&a, SECRET), 710.0);
        assert_eq!(decrypt(&b, SECRET), 710.0);
    }

    #[test]
    fn test_key_derivation_lengths() {
        let (key, iv) = derive_key_iv(b"pw", &SALT);
        assert_eq!(key.len(), 32);
        assert_eq!(iv.len(), 16);
        let (key2, iv2) = derive_key_iv(b"pw", &SALT);
        assert_eq!(key, key2);
        assert_eq!(iv, iv2);
    }
}
