use rand::distributions::{Distribution, Uniform};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::DotenvError;
use crate::salts::{Result, SaltProvider};

pub const SALT_LEN: usize = 64;

/// Characters a generated salt is drawn from. Matches the WordPress generator.
pub const ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_ []{}<>~`+=,.;:/?|";

/// Salts sampled uniformly from `ALPHABET` using the operating system's
/// secure random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSaltProvider;

impl SaltProvider for RandomSaltProvider {
    fn salt(&self) -> Result<String> {
        // OsRng panics on failure when sampling, so check it can be read first.
        let mut probe = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut probe)
            .map_err(|e| DotenvError::RandomSourceUnavailable(e.to_string()))?;

        let between = Uniform::from(0..ALPHABET.len());
        Ok((0..SALT_LEN)
            .map(|_| ALPHABET[between.sample(&mut OsRng)] as char)
            .collect())
    }
}
