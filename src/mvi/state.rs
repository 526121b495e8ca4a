//! Base trait for state machine values.

/// Marker trait for reducer state.
///
/// States should be:
/// - Owned (Clone to publish snapshots)
/// - Comparable (PartialEq for detecting changes after a dispatch)
/// - Defaultable (the initial, inert state)
pub trait MachineState: Clone + PartialEq + Default + Send + 'static {}
