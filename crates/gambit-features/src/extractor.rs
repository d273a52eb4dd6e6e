//! Single-game and batch feature extraction.

use gambit_engine::{GameRecord, MaterialScorer, OpeningBook, PositionScorer};
use gambit_stats::DescriptiveStats;

use crate::{
    table::{FeatureTable, FeatureVector},
    time_control::TimeControlClass,
};

/// Half-move horizon used when the configuration names none.
pub const DEFAULT_HALF_MOVE_HORIZON: usize = 20;

/// Ply horizon, expressed either directly or as full-move pairs.
///
/// One full move is two half-moves; when a configuration supplies both
/// styles, the full-move form takes precedence (see
/// [`Horizon::from_config`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    HalfMoves(usize),
    FullMoves(usize),
}

impl Horizon {
    /// Resolves the configured horizon: `fullmoves` wins over `num_moves`,
    /// and the default applies when neither is set.
    #[must_use]
    pub fn from_config(fullmoves: Option<usize>, num_moves: Option<usize>) -> Self {
        match (fullmoves, num_moves) {
            (Some(full), _) => Self::FullMoves(full),
            (None, Some(half)) => Self::HalfMoves(half),
            (None, None) => Self::HalfMoves(DEFAULT_HALF_MOVE_HORIZON),
        }
    }

    /// The horizon in half-moves.
    #[must_use]
    pub fn half_moves(self) -> usize {
        match self {
            Self::HalfMoves(n) => n,
            Self::FullMoves(n) => n * 2,
        }
    }
}

/// Rejected extractor configuration.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("ply horizon must cover at least one half-move")]
    ZeroHorizon,
}

/// Statistics over an evaluation trajectory.
///
/// `Default` is the shared zero-filled block used both for games without
/// moves and for trajectories that could not be evaluated.
#[derive(Debug, Clone, Copy, Default)]
struct EvalBlock {
    mean: f64,
    std: f64,
    max: f64,
    min: f64,
    last: f64,
    trend: f64,
}

impl EvalBlock {
    fn from_scores(scores: &[f64]) -> Self {
        let Some(stats) = DescriptiveStats::new(scores.iter().copied()) else {
            return Self::default();
        };
        let first = scores[0];
        let last = scores[scores.len() - 1];
        Self {
            mean: stats.mean,
            std: stats.std_dev,
            max: stats.max,
            min: stats.min,
            last,
            trend: if scores.len() > 1 { last - first } else { 0.0 },
        }
    }
}

/// Converts game records into feature vectors.
///
/// The ply horizon and both collaborators (position scorer, opening book)
/// are fixed at construction and shared by every extraction. Extraction is
/// read-only over its input and never fails; see the crate docs for the
/// degradation rules.
pub struct FeatureExtractor {
    half_move_horizon: usize,
    scorer: Box<dyn PositionScorer>,
    openings: OpeningBook,
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("half_move_horizon", &self.half_move_horizon)
            .finish_non_exhaustive()
    }
}

impl FeatureExtractor {
    /// Creates an extractor with the default material scorer.
    pub fn new(horizon: Horizon) -> Result<Self, ConfigError> {
        Self::with_scorer(horizon, Box::new(MaterialScorer))
    }

    /// Creates an extractor with an explicit scorer. The scorer cannot be
    /// swapped afterwards.
    pub fn with_scorer(
        horizon: Horizon,
        scorer: Box<dyn PositionScorer>,
    ) -> Result<Self, ConfigError> {
        let half_move_horizon = horizon.half_moves();
        if half_move_horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        Ok(Self {
            half_move_horizon,
            scorer,
            openings: OpeningBook,
        })
    }

    #[must_use]
    pub fn half_move_horizon(&self) -> usize {
        self.half_move_horizon
    }

    /// Extracts the feature vector for a single game.
    #[must_use]
    pub fn extract(&self, game: &GameRecord) -> FeatureVector {
        #[expect(clippy::cast_precision_loss)]
        let white_rating = game.white_rating_or_default() as f64;
        #[expect(clippy::cast_precision_loss)]
        let black_rating = game.black_rating_or_default() as f64;

        let tokens = game.move_tokens();
        let examined = &tokens[..tokens.len().min(self.half_move_horizon)];
        let evals = self.evaluation_block(game, examined);

        FeatureVector {
            white_rating,
            black_rating,
            rating_diff: white_rating - black_rating,
            avg_rating: (white_rating + black_rating) / 2.0,
            num_moves: examined.len(),
            eval_mean: evals.mean,
            eval_std: evals.std,
            eval_max: evals.max,
            eval_min: evals.min,
            eval_final: evals.last,
            eval_trend: evals.trend,
            time_control: TimeControlClass::classify(&game.time_control),
            // The opening lookup sees the full move list, not the truncated
            // one.
            opening: self.openings.classify(&tokens).to_owned(),
        }
    }

    /// Extracts features for every record, independently and in input order.
    ///
    /// One game's malformed moves never affect another game's row.
    #[must_use]
    pub fn extract_batch(&self, games: &[GameRecord]) -> FeatureTable {
        let vectors: Vec<FeatureVector> = games.iter().map(|game| self.extract(game)).collect();
        FeatureTable::from_vectors(&vectors)
    }

    fn evaluation_block(&self, game: &GameRecord, examined: &[&str]) -> EvalBlock {
        if examined.is_empty() {
            return EvalBlock::default();
        }
        match self
            .scorer
            .positions_from_moves(examined, self.half_move_horizon)
        {
            Ok(snapshots) => {
                let scores: Vec<f64> = snapshots
                    .iter()
                    .map(|board| self.scorer.evaluate(board))
                    .collect();
                EvalBlock::from_scores(&scores)
            }
            Err(err) => {
                log::debug!(
                    "zero-filled evaluations for game {}: {err}",
                    game.id.as_deref().unwrap_or("<unnamed>")
                );
                EvalBlock::default()
            }
        }
    }
}
