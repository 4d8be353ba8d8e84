//! API Key generation
//!
//! Generates the public and secret halves of a credential pair.

use std::fmt::Debug;

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};

/// Number of random bytes behind a public key
pub const PUBLIC_KEY_BYTES: usize = 50;

/// Length of a secret key
pub const SECRET_KEY_LENGTH: usize = 50;

const SECRET_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Source of fresh credential values
pub trait KeyGenerator: Send + Sync + Debug {
    /// Generates a candidate public key
    fn public_key(&self) -> String;

    /// Generates a candidate secret key
    fn secret_key(&self) -> String;
}

/// Generator backed by the thread-local CSPRNG
#[derive(Debug, Clone, Default)]
pub struct RandomKeyGenerator;

impl RandomKeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl KeyGenerator for RandomKeyGenerator {
    /// Base64 of [`PUBLIC_KEY_BYTES`] random bytes with `+` and `/` swapped
    /// for two randomly chosen alphanumerics, so the key is 67 characters
    /// of `[A-Za-z0-9]`.
    fn public_key(&self) -> String {
        let mut rng = rand::thread_rng();

        let mut random_bytes = [0u8; PUBLIC_KEY_BYTES];
        rng.fill_bytes(&mut random_bytes);

        let plus = rng.sample(Alphanumeric) as char;
        let slash = rng.sample(Alphanumeric) as char;

        STANDARD_NO_PAD
            .encode(random_bytes)
            .chars()
            .map(|c| match c {
                '+' => plus,
                '/' => slash,
                other => other,
            })
            .collect()
    }

    fn secret_key(&self) -> String {
        let mut rng = rand::thread_rng();

        (0..SECRET_KEY_LENGTH)
            .map(|_| SECRET_ALPHABET[rng.gen_range(0..SECRET_ALPHABET.len())] as char)
            .collect()
    }
}
