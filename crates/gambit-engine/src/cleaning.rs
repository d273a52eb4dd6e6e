//! Batch cleaning of raw game records ahead of feature extraction.
//!
//! All helpers are order-preserving and operate in place; the CLI `clean`
//! subcommand composes them. None of them inspects move legality - malformed
//! move lists are tolerated downstream by the feature extractor.

use std::collections::HashSet;

use crate::record::{GameRecord, Outcome};

/// Inclusive rating range a cleaned game must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingRange {
    pub min: i64,
    pub max: i64,
}

impl RatingRange {
    #[must_use]
    pub fn contains(&self, rating: i64) -> bool {
        (self.min..=self.max).contains(&rating)
    }
}

/// Removes duplicate records, keeping the first occurrence.
///
/// Records with an id are considered duplicates when ids collide; records
/// without one fall back to the move text plus both ratings.
pub fn dedup_games(games: &mut Vec<GameRecord>) {
    let before = games.len();
    let mut seen = HashSet::new();
    games.retain(|game| {
        let key = match &game.id {
            Some(id) => format!("id:{id}"),
            None => format!(
                "g:{}:{}:{}",
                game.moves,
                game.white_rating_or_default(),
                game.black_rating_or_default()
            ),
        };
        seen.insert(key)
    });
    log::debug!("dedup removed {} of {} games", before - games.len(), before);
}

/// Keeps games where both players' ratings (defaulted when absent) fall
/// inside `range`.
pub fn filter_by_rating(games: &mut Vec<GameRecord>, range: RatingRange) {
    games.retain(|game| {
        range.contains(game.white_rating_or_default())
            && range.contains(game.black_rating_or_default())
    });
}

/// Keeps games whose result token parses into an [`Outcome`].
///
/// Games without a usable label cannot contribute to training and are
/// dropped here rather than silently mislabeled later.
pub fn retain_labeled(games: &mut Vec<GameRecord>) {
    games.retain(|game| {
        game.result
            .as_deref()
            .and_then(Outcome::parse_result)
            .is_some()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: Option<&str>, moves: &str, white: i64, black: i64, result: &str) -> GameRecord {
        GameRecord {
            id: id.map(str::to_owned),
            moves: moves.to_owned(),
            white_rating: Some(white),
            black_rating: Some(black),
            time_control: String::new(),
            result: Some(result.to_owned()),
        }
    }

    #[test]
    fn test_dedup_by_id_keeps_first() {
        let mut games = vec![
            game(Some("a"), "e4 e5", 1600, 1610, "1-0"),
            game(Some("a"), "d4 d5", 1700, 1710, "0-1"),
            game(Some("b"), "e4 e5", 1600, 1610, "1-0"),
        ];
        dedup_games(&mut games);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].moves, "e4 e5");
        assert_eq!(games[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_dedup_without_id_uses_moves_and_ratings() {
        let mut games = vec![
            game(None, "e4 e5", 1600, 1610, "1-0"),
            game(None, "e4 e5", 1600, 1610, "1-0"),
            game(None, "e4 e5", 1600, 1999, "1-0"),
        ];
        dedup_games(&mut games);
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn test_rating_filter_defaults_missing_ratings() {
        let mut games = vec![
            game(None, "e4", 1600, 1610, "1-0"),
            game(None, "d4", 900, 1610, "1-0"),
            GameRecord {
                white_rating: None,
                ..game(None, "c4", 0, 1610, "1-0")
            },
        ];
        filter_by_rating(&mut games, RatingRange { min: 1400, max: 2000 });
        // 900 is out of range; the missing rating defaults to 1500, in range.
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].moves, "e4");
        assert_eq!(games[1].moves, "c4");
    }

    #[test]
    fn test_retain_labeled_drops_unparseable_results() {
        let mut games = vec![
            game(None, "e4", 1600, 1610, "1-0"),
            game(None, "d4", 1600, 1610, "*"),
            GameRecord {
                result: None,
                ..game(None, "c4", 1600, 1610, "1-0")
            },
        ];
        retain_labeled(&mut games);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].moves, "e4");
    }
}
