use serde::{Deserialize, Serialize};

/// Rating substituted when a game record carries no rating for a player.
pub const DEFAULT_RATING: i64 = 1500;

/// A raw chess game as delivered by the collection stage.
///
/// Every field except `moves` is optional in the source data; absent fields
/// deserialize to their empty/`None` forms and are defaulted where they are
/// consumed (ratings default to [`DEFAULT_RATING`] at extraction time, not at
/// parse time, so a record round-trips unchanged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Source-assigned game identifier, when the collector provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whitespace-separated SAN move tokens in ply order.
    #[serde(default)]
    pub moves: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black_rating: Option<i64>,
    /// Free-text time control (`"300+3"`, `"rapid"`, tournament names, ...).
    #[serde(default)]
    pub time_control: String,
    /// Raw result token (`"1-0"`, `"white"`, ...); parsed via
    /// [`Outcome::parse_result`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl GameRecord {
    /// Splits the move text into SAN tokens, in ply order.
    #[must_use]
    pub fn move_tokens(&self) -> Vec<&str> {
        self.moves.split_whitespace().collect()
    }

    /// White's rating with the default applied.
    #[must_use]
    pub fn white_rating_or_default(&self) -> i64 {
        self.white_rating.unwrap_or(DEFAULT_RATING)
    }

    /// Black's rating with the default applied.
    #[must_use]
    pub fn black_rating_or_default(&self) -> i64 {
        self.black_rating.unwrap_or(DEFAULT_RATING)
    }
}

/// Final outcome of a game, the label alphabet of the training target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[display("white_win")]
    WhiteWin,
    #[display("black_win")]
    BlackWin,
    #[display("draw")]
    Draw,
}

impl Outcome {
    /// Maps external-source result notation into an outcome.
    ///
    /// Accepts PGN result tokens (`1-0`, `0-1`, `1/2-1/2`) and collector
    /// winner tokens (`white`, `black`, `draw`), case-insensitively. Any
    /// other token yields `None`; unparseable results are dropped by the
    /// cleaning stage rather than guessed.
    #[must_use]
    pub fn parse_result(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "1-0" | "white" => Some(Self::WhiteWin),
            "0-1" | "black" => Some(Self::BlackWin),
            "1/2-1/2" | "1/2" | "draw" => Some(Self::Draw),
            _ => None,
        }
    }
}
