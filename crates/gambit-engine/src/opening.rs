//! Opening classification by longest-prefix match against named lines.

/// Sentinel returned when no opening line matches the game's moves.
pub const UNKNOWN_OPENING: &str = "Unknown";

/// Named opening lines as space-separated SAN prefixes.
///
/// Deeper lines must carry their full prefix; classification picks the
/// longest matching entry, so order within the table does not matter.
const OPENING_LINES: &[(&str, &str)] = &[
    ("e4", "King's Pawn Opening"),
    ("e4 e5", "King's Pawn Game"),
    ("e4 e5 Nf3", "King's Knight Opening"),
    ("e4 e5 Nf3 Nc6 Bb5", "Ruy Lopez"),
    ("e4 e5 Nf3 Nc6 Bb5 a6", "Ruy Lopez: Morphy Defense"),
    ("e4 e5 Nf3 Nc6 Bc4", "Italian Game"),
    ("e4 e5 Nf3 Nc6 Bc4 Bc5", "Italian Game: Giuoco Piano"),
    ("e4 e5 Nf3 Nc6 Bc4 Nf6", "Italian Game: Two Knights Defense"),
    ("e4 e5 Nf3 Nc6 d4", "Scotch Game"),
    ("e4 e5 Nf3 Nc6 Nc3", "Three Knights Opening"),
    ("e4 e5 Nf3 Nc6 Nc3 Nf6", "Four Knights Game"),
    ("e4 e5 Nf3 Nf6", "Petrov's Defense"),
    ("e4 e5 Nf3 d6", "Philidor Defense"),
    ("e4 e5 f4", "King's Gambit"),
    ("e4 e5 Nc3", "Vienna Game"),
    ("e4 e5 Bc4", "Bishop's Opening"),
    ("e4 c5", "Sicilian Defense"),
    ("e4 c5 Nf3 Nc6", "Sicilian Defense: Old Sicilian"),
    ("e4 c5 Nf3 d6", "Sicilian Defense: Modern Variations"),
    ("e4 c5 Nf3 e6", "Sicilian Defense: French Variation"),
    ("e4 c5 c3", "Sicilian Defense: Alapin Variation"),
    ("e4 c5 Nc3", "Sicilian Defense: Closed"),
    (
        "e4 c5 Nf3 d6 d4 cxd4 Nxd4 Nf6 Nc3 a6",
        "Sicilian Defense: Najdorf Variation",
    ),
    ("e4 e6", "French Defense"),
    ("e4 e6 d4 d5", "French Defense: Normal Variation"),
    ("e4 c6", "Caro-Kann Defense"),
    ("e4 c6 d4 d5", "Caro-Kann Defense: Main Line"),
    ("e4 d5", "Scandinavian Defense"),
    ("e4 d6", "Pirc Defense"),
    ("e4 g6", "Modern Defense"),
    ("e4 Nf6", "Alekhine's Defense"),
    ("d4", "Queen's Pawn Opening"),
    ("d4 d5", "Queen's Pawn Game"),
    ("d4 d5 c4", "Queen's Gambit"),
    ("d4 d5 c4 dxc4", "Queen's Gambit Accepted"),
    ("d4 d5 c4 e6", "Queen's Gambit Declined"),
    ("d4 d5 c4 c6", "Slav Defense"),
    ("d4 Nf6", "Indian Game"),
    ("d4 Nf6 c4 e6 Nc3 Bb4", "Nimzo-Indian Defense"),
    ("d4 Nf6 c4 e6 Nf3 b6", "Queen's Indian Defense"),
    ("d4 Nf6 c4 g6", "King's Indian Defense"),
    ("d4 Nf6 c4 g6 Nc3 d5", "Gr\u{fc}nfeld Defense"),
    ("d4 Nf6 c4 c5", "Benoni Defense"),
    ("d4 f5", "Dutch Defense"),
    ("c4", "English Opening"),
    ("c4 e5", "English Opening: King's English"),
    ("c4 c5", "English Opening: Symmetrical Variation"),
    ("Nf3", "Zukertort Opening"),
    ("Nf3 d5 g3", "King's Indian Attack"),
    ("f4", "Bird's Opening"),
    ("b3", "Nimzo-Larsen Attack"),
    ("g3", "Hungarian Opening"),
];

/// Classifies games into named openings from their full move list.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpeningBook;

impl OpeningBook {
    /// Returns the name of the deepest opening line prefixing `moves`, or
    /// [`UNKNOWN_OPENING`] when none matches.
    ///
    /// The full, untruncated move list should be passed; the lookup only
    /// reads as many plies as the deepest table entry.
    #[must_use]
    pub fn classify(&self, moves: &[&str]) -> &'static str {
        let mut best: Option<(usize, &'static str)> = None;
        for (line, name) in OPENING_LINES {
            let prefix: Vec<&str> = line.split_whitespace().collect();
            if prefix.len() > moves.len() {
                continue;
            }
            if prefix.iter().zip(moves).all(|(a, b)| a == b)
                && best.is_none_or(|(depth, _)| prefix.len() > depth)
            {
                best = Some((prefix.len(), name));
            }
        }
        best.map_or(UNKNOWN_OPENING, |(_, name)| name)
    }
}
