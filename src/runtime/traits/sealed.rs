// ABOUTME: Sealed marker for the runtime capability traits.
// ABOUTME: Only engine clients defined in this crate may implement them.

/// Implemented by engine clients inside this crate (and the test fake).
pub trait Sealed {}
