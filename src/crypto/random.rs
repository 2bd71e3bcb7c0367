//! Random source for salts, peppers, and IVs
//!
//! Any cryptographically secure `rand` generator can act as the source.
//! Production code uses `OsRng`; tests inject a seeded `StdRng`.

use rand::{CryptoRng, RngCore};

use crate::error::{SealError, SealResult};

/// Source of uniformly random octets
pub trait RandomSource {
    /// Fill `dest` with random bytes
    fn fill_random(&mut self, dest: &mut [u8]) -> SealResult<()>;

    /// Produce `n` random bytes
    fn random_bytes(&mut self, n: usize) -> SealResult<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        self.fill_random(&mut bytes)?;
        Ok(bytes)
    }

    /// Produce a fixed-size array of random bytes
    fn random_array<const N: usize>(&mut self) -> SealResult<[u8; N]> {
        let mut bytes = [0u8; N];
        self.fill_random(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R: RngCore + CryptoRng + ?Sized> RandomSource for R {
    fn fill_random(&mut self, dest: &mut [u8]) -> SealResult<()> {
        self.try_fill_bytes(dest)
            .map_err(|e| SealError::EntropyUnavailable(e.to_string()))
    }
}
