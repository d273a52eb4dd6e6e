//! Pure statistics shared across the prediction pipeline.
//!
//! - [`descriptive`] - summary statistics over numeric sequences, used to
//!   condense evaluation trajectories into fixed feature fields.
//! - [`classification`] - confusion-matrix based metrics (accuracy, weighted
//!   precision/recall/F1) used to score and compare trained models.
//!
//! Everything here is deterministic and allocation-light; no randomness, no
//! I/O.

pub mod classification;
pub mod descriptive;

pub use self::{classification::ConfusionMatrix, descriptive::DescriptiveStats};
