//! Reversible credential obfuscation for stored passwords.
//! Passwords are sealed with AES-256-GCM under a key stretched from a fixed
//! built-in passphrase; the payload is base64(nonce || ciphertext). This is
//! obfuscation for a demo store, not a security boundary: the binding
//! contract is only that `decode(encode(p)) == p` and that any malformed or
//! tampered payload decodes to `None`.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

// Fixed demo key. A production rewrite must externalize this.
const SECRET_KEY: &str = "vitrine-demo-secret";
const NONCE_LEN: usize = 12;

static KEY_BYTES: Lazy<[u8; 32]> = Lazy::new(|| Sha256::digest(SECRET_KEY.as_bytes()).into());

fn cipher() -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*KEY_BYTES))
}

/// Obfuscate a plaintext password for storage. The nonce is random, so two
/// encodings of the same password differ; equality checks must go through
/// [`decode`].
pub fn encode(plaintext: &str) -> String {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let sealed = cipher()
        .encrypt(&nonce, plaintext.as_bytes())
        .expect("AES-GCM encrypt over an in-memory buffer");
    let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&sealed);
    STANDARD.encode(payload)
}

/// Recover the plaintext password. Returns `None` for malformed base64,
/// truncated payloads, tampered ciphertext or non-UTF-8 plaintext; callers
/// treat `None` as a credential mismatch, never a fatal error.
pub fn decode(ciphertext: &str) -> Option<String> {
    let raw = STANDARD.decode(ciphertext.trim()).ok()?;
    if raw.len() <= NONCE_LEN {
        return None;
    }
    let (nonce, sealed) = raw.split_at(NONCE_LEN);
    let plain = cipher().decrypt(Nonce::from_slice(nonce), sealed).ok()?;
    String::from_utf8(plain).ok()
}
