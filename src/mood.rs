//! Mood scoring
//!
//! Maps mood symbols onto an ordinal wellbeing score from 1 (worst) to 5 (best).

use crate::types::MoodSymbol;

/// Highest wellbeing score
pub const MAX_SCORE: u8 = 5;
/// Lowest wellbeing score
pub const MIN_SCORE: u8 = 1;
/// Score assigned to symbols outside the recognized set.
///
/// Unknown input is read as neutral so trend lines have no gaps.
pub const NEUTRAL_SCORE: u8 = 3;

/// Scorer for mood symbols
pub struct MoodScorer;

impl MoodScorer {
    /// Score a symbol. Total: every symbol yields a value in `MIN_SCORE..=MAX_SCORE`.
    pub fn score(symbol: &MoodSymbol) -> u8 {
        match symbol {
            MoodSymbol::Excellent => 5,
            MoodSymbol::Good => 4,
            MoodSymbol::Neutral => 3,
            MoodSymbol::Low => 2,
            MoodSymbol::VeryLow => 1,
            // Built directly with a recognized glyph, score it as that glyph
            MoodSymbol::Unrecognized(raw) => match MoodSymbol::parse(raw) {
                MoodSymbol::Unrecognized(_) => NEUTRAL_SCORE,
                known => Self::score(&known),
            },
        }
    }
}

/// Score a mood symbol
pub fn score_mood(symbol: &MoodSymbol) -> u8 {
    MoodScorer::score(symbol)
}

/// Score a raw symbol string
pub fn score_mood_str(raw: &str) -> u8 {
    MoodScorer::score(&MoodSymbol::parse(raw))
}

impl MoodSymbol {
    /// Recognized symbol for a score, used for axis ticks and tooltips
    pub fn from_score(score: u8) -> Option<MoodSymbol> {
        match score {
            5 => Some(MoodSymbol::Excellent),
            4 => Some(MoodSymbol::Good),
            3 => Some(MoodSymbol::Neutral),
            2 => Some(MoodSymbol::Low),
            1 => Some(MoodSymbol::VeryLow),
            _ => None,
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            MoodSymbol::Excellent => "Excellent",
            MoodSymbol::Good => "Good",
            MoodSymbol::Neutral => "Neutral",
            MoodSymbol::Low => "Low",
            MoodSymbol::VeryLow => "Very Low",
            MoodSymbol::Unrecognized(_) => "Unrecognized",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_recognized_scores_descend() {
        let scores: Vec<u8> = MoodSymbol::RECOGNIZED.iter().map(score_mood).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unrecognized_is_neutral() {
        for raw in ["🤔", "", "happy", "😀😀", " 😀"] {
            assert_eq!(score_mood_str(raw), NEUTRAL_SCORE, "input {raw:?}");
        }
        assert_eq!(NEUTRAL_SCORE, 3);
    }

    #[test]
    fn test_unrecognized_holding_known_glyph_scores_like_serde_round_trip() {
        let wrapped = MoodSymbol::Unrecognized("😀".to_string());
        assert_eq!(score_mood(&wrapped), 5);

        let json = serde_json::to_string(&wrapped).unwrap();
        let restored: MoodSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, MoodSymbol::Excellent);
        assert_eq!(score_mood(&restored), score_mood(&wrapped));
        assert_eq!(wrapped.canonical(), MoodSymbol::Excellent);
    }

    #[test]
    fn test_score_mood_str_matches_symbols() {
        assert_eq!(score_mood_str("😀"), 5);
        assert_eq!(score_mood_str("🙂"), 4);
        assert_eq!(score_mood_str("😐"), 3);
        assert_eq!(score_mood_str("😟"), 2);
        assert_eq!(score_mood_str("😣"), 1);
    }

    #[test]
    fn test_from_score_inverts_recognized_scores() {
        for symbol in MoodSymbol::RECOGNIZED {
            assert_eq!(MoodSymbol::from_score(score_mood(&symbol)), Some(symbol));
        }
        assert_eq!(MoodSymbol::from_score(0), None);
        assert_eq!(MoodSymbol::from_score(6), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MoodSymbol::Excellent.label(), "Excellent");
        assert_eq!(MoodSymbol::VeryLow.label(), "Very Low");
    }
}
