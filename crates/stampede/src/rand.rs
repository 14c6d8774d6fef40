/// A source of random bytes.
///
/// Implementations are free to be thread-local, seeded, or shared. The
/// provided [`ThreadRandom`](crate::ThreadRandom) is suitable for
/// production; tests typically substitute a seeded source.
pub trait RandSource {
    /// Fills `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]);
}
