use stampede::{PayloadGenerator, ThreadRandom};

/// Random byte source used by all payload generators.
///
/// This controls where each payload's entropy comes from.
pub type Rand = ThreadRandom;

/// Payload generator used per worker process.
///
/// Each instance produces fixed-size payloads and spills them into the
/// platform temp directory (honoring `TMPDIR`).
pub type Generator = PayloadGenerator<Rand>;
