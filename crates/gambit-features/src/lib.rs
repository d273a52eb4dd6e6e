//! Feature engineering: raw game records to fixed-width numeric features.
//!
//! This crate converts one [`gambit_engine::GameRecord`] into one
//! [`FeatureVector`] and batches of records into a [`FeatureTable`] ready for
//! model training.
//!
//! # Architecture
//!
//! ```text
//! GameRecord --extract--> FeatureVector --from_vectors--> FeatureTable
//!                 |
//!                 +-- PositionScorer (trajectory + per-snapshot score)
//!                 +-- OpeningBook    (longest-prefix opening name)
//! ```
//!
//! # Degradation, not failure
//!
//! Extraction never fails and never produces a partial row. A game whose
//! move list cannot be replayed (unparseable token, illegal move, empty
//! list) keeps its rating and classification fields and receives the shared
//! zero-filled evaluation block; every [`FeatureVector`] always carries the
//! full field set, so tabular assembly never sees ragged rows. The only
//! construction-time error is a zero ply horizon ([`ConfigError`]).
//!
//! # Determinism
//!
//! The extractor holds its collaborators and horizon for its whole lifetime;
//! extracting the same record twice yields identical vectors, and batch
//! extraction is an independent, order-preserving map over its input.

pub mod extractor;
pub mod table;
pub mod time_control;

pub use self::{
    extractor::{ConfigError, DEFAULT_HALF_MOVE_HORIZON, FeatureExtractor, Horizon},
    table::{Column, FeatureTable, FeatureVector, TableError},
    time_control::TimeControlClass,
};
