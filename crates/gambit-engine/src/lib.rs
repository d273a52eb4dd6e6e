//! Chess game domain model for the outcome-prediction pipeline.
//!
//! This crate owns everything the pipeline knows about chess itself:
//!
//! - [`record`] - Raw game records as delivered by the collection stage, and
//!   the [`record::Outcome`] label alphabet used as the training target.
//! - [`trajectory`] - Replaying a SAN move list into a bounded sequence of
//!   board snapshots and scoring each snapshot
//!   ([`trajectory::PositionScorer`] / [`trajectory::MaterialScorer`]).
//! - [`opening`] - Longest-prefix opening classification against an embedded
//!   table of named lines.
//! - [`cleaning`] - Order-preserving batch cleaning helpers (deduplication,
//!   rating-range filtering, label filtering) used ahead of feature
//!   extraction.
//!
//! The downstream feature extractor consumes [`trajectory::PositionScorer`]
//! through a single stable contract: one method to produce snapshots, one to
//! score a snapshot. The score sign convention (positive favors White, pawn
//! units) is fixed here and must be preserved by consumers, never re-derived.

pub mod cleaning;
pub mod opening;
pub mod record;
pub mod trajectory;

pub use self::{
    opening::{OpeningBook, UNKNOWN_OPENING},
    record::{DEFAULT_RATING, GameRecord, Outcome},
    trajectory::{MaterialScorer, PositionScorer, TrajectoryError},
};
