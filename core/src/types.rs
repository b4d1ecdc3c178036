//! Shared primitive types used across the entire simulation.

/// Virtual time in milliseconds. One "time unit" of the pet model is 1000 ms.
pub type Millis = u64;

/// Index into a variant's animation frames. Consumers always wrap it
/// modulo the frame count; it is never stored pre-wrapped.
pub type FrameIndex = u64;

/// Identifier of the shared-storage namespace both processes agree on.
pub type SuiteId = String;
