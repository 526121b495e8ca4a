//! Base trait for intents fed into a reducer.

/// Marker trait for intent objects.
///
/// Intents represent either a change in a machine's inputs (new credentials,
/// a new selected state) or the completion of a fetch that the machine
/// launched earlier.
pub trait Intent: Send + 'static {}
