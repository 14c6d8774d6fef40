use crate::RandSource;
use rand::{RngCore, rng};

/// A [`RandSource`] backed by the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// periodically reseeded from the OS.
///
/// Each OS thread lazily initializes its own RNG instance, so concurrent
/// callers never contend. This type does not store the RNG itself; it
/// looks up the thread-local generator on every call, which keeps it
/// `Send + Sync + Copy` even though `ThreadRng` is none of those.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill(&self, buf: &mut [u8]) {
        rng().fill_bytes(buf);
    }
}
