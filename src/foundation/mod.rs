pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod rng;
/// Fixed presentation timing constants.
pub mod timing;
