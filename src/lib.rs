//! Streaming decay-curve histograms for time-tagged photon data.
//!
//! A [`DecayCurve`](st::DecayCurve) turns batches of per-channel arrival-time
//! tags into a fine-resolution histogram over a fixed range, and projects it
//! (optionally coarsened) onto [`DisplayFrame`]s for a live plot.

mod base;
pub mod concurrent;
pub use crate::base::*;
pub mod st;
pub mod serialization;
pub mod logging;

#[cfg(test)]
mod tests;
