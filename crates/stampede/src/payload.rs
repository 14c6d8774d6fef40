//! Response payload generation.
//!
//! A [`PayloadGenerator`] produces one [`Payload`] per call. Each call:
//!
//! 1. Fills a fixed-size buffer ([`PAYLOAD_SIZE`] bytes by default) from a
//!    [`RandSource`].
//! 2. Spills the raw buffer to a uniquely named file in the spill
//!    directory.
//! 3. Hashes the buffer with SHA-256.
//!
//! The resulting payload carries the hex-encoded buffer, the spill path,
//! and the hex-encoded digest, so a client can independently re-derive the
//! checksum from the value it received.
//!
//! ## Spill files
//!
//! Spill files accumulate for the lifetime of the process tree; nothing
//! deletes them. The write exists to put real disk I/O on the request
//! path, not to manage artifacts, so cleanup is left to the platform's
//! temp directory policy.

use crate::{Error, RandSource, Result, ThreadRandom};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use uuid::Uuid;

/// Size in bytes of the random buffer backing a payload: 10 KiB.
pub const PAYLOAD_SIZE: usize = 10 * 1024;

/// A generated response payload.
///
/// Serialized field order is part of the wire shape: `value`, `filepath`,
/// `checksum`, all JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Hex encoding of the random buffer.
    pub value: String,
    /// Path of the spill file holding the raw buffer.
    pub filepath: PathBuf,
    /// Hex-encoded SHA-256 digest of the raw buffer.
    pub checksum: String,
}

impl Payload {
    /// Returns `true` if `checksum` is the SHA-256 digest of the bytes
    /// that `value` hex-encodes.
    ///
    /// Verification only looks at the payload itself; it does not read
    /// the spill file back.
    pub fn verify(&self) -> bool {
        match hex::decode(&self.value) {
            Ok(raw) => hex::encode(Sha256::digest(raw)) == self.checksum,
            Err(_) => false,
        }
    }
}

/// Produces [`Payload`]s backed by random bytes from `R`.
///
/// The generator is cheap to construct and stateless between calls apart
/// from its configuration, so one instance can serve any number of
/// requests across threads (given `R: Sync`).
///
/// # Examples
///
/// ```
/// use stampede::{PAYLOAD_SIZE, PayloadGenerator};
///
/// let generator = PayloadGenerator::default();
/// let payload = generator.generate()?;
///
/// assert_eq!(payload.value.len(), PAYLOAD_SIZE * 2);
/// assert!(payload.verify());
/// # Ok::<(), stampede::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PayloadGenerator<R = ThreadRandom> {
    rand: R,
    payload_size: usize,
    spill_dir: PathBuf,
}

impl Default for PayloadGenerator<ThreadRandom> {
    fn default() -> Self {
        Self::new(ThreadRandom)
    }
}

impl<R: RandSource> PayloadGenerator<R> {
    /// Creates a generator producing [`PAYLOAD_SIZE`]-byte payloads that
    /// spill into [`std::env::temp_dir`].
    pub fn new(rand: R) -> Self {
        Self::from_parts(rand, PAYLOAD_SIZE, std::env::temp_dir())
    }

    /// Creates a generator with an explicit payload size and spill
    /// directory.
    ///
    /// The directory must already exist; [`generate`](Self::generate)
    /// does not create it.
    pub fn from_parts(rand: R, payload_size: usize, spill_dir: impl Into<PathBuf>) -> Self {
        Self {
            rand,
            payload_size,
            spill_dir: spill_dir.into(),
        }
    }

    /// Returns the directory spill files are written to.
    pub fn spill_dir(&self) -> &std::path::Path {
        &self.spill_dir
    }

    /// Generates a payload: random bytes, spill file, checksum.
    ///
    /// Every call writes one new file named by a freshly minted UUID v4,
    /// so concurrent calls never collide. The write is synchronous and
    /// happens before the digest.
    ///
    /// # Errors
    ///
    /// - [`Error::Spill`]: the spill file could not be written.
    pub fn generate(&self) -> Result<Payload> {
        let mut buf = vec![0_u8; self.payload_size];
        self.rand.fill(&mut buf);

        let path = self.spill_dir.join(Uuid::new_v4().to_string());
        std::fs::write(&path, &buf).map_err(|source| Error::Spill {
            path: path.clone(),
            source,
        })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(path = %path.display(), size = self.payload_size, "spilled payload");

        Ok(Payload {
            value: hex::encode(&buf),
            filepath: path,
            checksum: hex::encode(Sha256::digest(&buf)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng, rngs::StdRng};
    use std::cell::RefCell;

    /// Deterministic [`RandSource`] for reproducible payloads.
    struct SeededRandom(RefCell<StdRng>);

    impl SeededRandom {
        fn new(seed: u64) -> Self {
            Self(RefCell::new(StdRng::seed_from_u64(seed)))
        }
    }

    impl RandSource for SeededRandom {
        fn fill(&self, buf: &mut [u8]) {
            self.0.borrow_mut().fill_bytes(buf);
        }
    }

    #[test]
    fn payload_matches_spill_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = PayloadGenerator::from_parts(ThreadRandom, PAYLOAD_SIZE, dir.path());

        let payload = generator.generate().unwrap();

        let raw = hex::decode(&payload.value).unwrap();
        assert_eq!(raw.len(), PAYLOAD_SIZE);
        assert_eq!(std::fs::read(&payload.filepath).unwrap(), raw);
        assert_eq!(payload.checksum, hex::encode(Sha256::digest(&raw)));
        assert!(payload.verify());
    }

    #[test]
    fn spill_paths_are_unique_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let generator = PayloadGenerator::from_parts(ThreadRandom, 64, dir.path());

        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();

        assert_ne!(a.filepath, b.filepath);
        assert!(a.filepath.exists());
        assert!(b.filepath.exists());
        assert!(a.filepath.starts_with(dir.path()));
    }

    #[test]
    fn seeded_sources_reproduce_values() {
        let dir = tempfile::tempdir().unwrap();
        let a = PayloadGenerator::from_parts(SeededRandom::new(42), 256, dir.path());
        let b = PayloadGenerator::from_parts(SeededRandom::new(42), 256, dir.path());

        let pa = a.generate().unwrap();
        let pb = b.generate().unwrap();

        assert_eq!(pa.value, pb.value);
        assert_eq!(pa.checksum, pb.checksum);
        // Same bytes, distinct spill files.
        assert_ne!(pa.filepath, pb.filepath);
    }

    #[test]
    fn spill_failure_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let generator = PayloadGenerator::from_parts(ThreadRandom, 64, &missing);

        let err = generator.generate().unwrap_err();
        let Error::Spill { path, .. } = err;
        assert!(path.starts_with(&missing));
    }

    #[test]
    fn tampered_payloads_fail_verification() {
        let dir = tempfile::tempdir().unwrap();
        let generator = PayloadGenerator::from_parts(ThreadRandom, 64, dir.path());

        let mut payload = generator.generate().unwrap();
        payload.value.replace_range(0..2, "zz");
        assert!(!payload.verify());
    }

    #[test]
    fn json_shape_is_three_string_fields() {
        let dir = tempfile::tempdir().unwrap();
        let generator = PayloadGenerator::from_parts(SeededRandom::new(7), 32, dir.path());

        let payload = generator.generate().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 3);
        for key in ["value", "filepath", "checksum"] {
            assert!(object[key].is_string(), "{key} must serialize as a string");
        }

        let text = serde_json::to_string(&payload).unwrap();
        let value_at = text.find("\"value\"").unwrap();
        let filepath_at = text.find("\"filepath\"").unwrap();
        let checksum_at = text.find("\"checksum\"").unwrap();
        assert!(value_at < filepath_at && filepath_at < checksum_at);

        let back: Payload = serde_json::from_str(&text).unwrap();
        assert_eq!(back, payload);
    }
}
