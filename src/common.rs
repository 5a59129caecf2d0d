//! Common pieces shared by the encoder, the scoring functions and the
//! aligners: the crate error type, the scoring [`Parameters`] and the fixed
//! limits of the phonetic model.
//!
//! ## Parameters
//! [`Parameters`] carries the ALINE scoring knobs. The defaults are the ones
//! published with ALINE; [`Parameters::validate`] is run by every aligner
//! before any computation starts.
//!
//! ## Examples
//! ```rust
//! use aliners::Parameters;
//! let p = Parameters { skip_cost: -800, ..Default::default() };
//! assert!(p.validate().is_ok());
//!
//! let bad = Parameters { salience: vec![5; 12], ..Default::default() };
//! assert!(bad.validate().is_err());
//! ```

use crate::features::FEATURE_COUNT;

/// Longest accepted word text, in characters.
pub const MAX_WORD_CHARS: usize = 30;

/// Longest phonetic length an encoded word may reach.
pub const MAX_PHONEMES: usize = 40;

/// Errors that can be returned by the algorithms in this crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AlineError {
    /// Returned when a word is empty, blank, or contains a character the
    /// renderer reserves (whitespace, `-`, `|`, `<`).
    #[error("invalid word input: {0}")]
    InvalidInput(String),
    /// Returned when a word is longer than [`MAX_WORD_CHARS`].
    #[error("max word representation length ({max}) exceeded: {len} characters")]
    LengthExceeded { len: usize, max: usize },
    /// Returned when [`Parameters`] do not describe a usable scoring scheme.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Largest accepted salience coefficient.
pub const MAX_SALIENCE: i32 = 1000;

/// Largest magnitude accepted for the score constants. Cell scores stay far
/// inside `i32` for words of [`MAX_PHONEMES`] under these bounds.
pub const MAX_SCORE_MAGNITUDE: i32 = 1_000_000;

/// Default per-feature salience, in feature order (syllabic, place, manner,
/// voice, nasal, retroflex, lateral, aspirated, long, high, back, round,
/// double).
pub const DEFAULT_SALIENCE: [i32; FEATURE_COUNT] = [5, 40, 50, 10, 10, 10, 10, 5, 1, 5, 5, 5, 10];

/// Scoring configuration shared by all aligner kinds.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    /// Multiplicative tolerance applied to the best score; alignments scoring at
    /// least `best * score_margin` are accepted. Must lie in `(0, 1]`.
    pub score_margin: f32,
    /// Maximal substitution score (two identical consonants).
    pub max_substitution_score: i32,
    /// Maximal expansion/compression score.
    pub max_compression_score: i32,
    /// Score of an insertion or deletion (negative).
    pub skip_cost: i32,
    /// Subtracted once for every vowel taking part in a substitution or squash.
    pub vowel_handicap: i32,
    /// Per-feature weights; exactly 13 entries.
    pub salience: Vec<i32>,
    /// Allow expansion/compression (two phonemes against one).
    pub squashing: bool,
    /// Stop the search after the first accepted alignment.
    pub stop_at_first: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            score_margin: 1.0,
            max_substitution_score: 3500,
            max_compression_score: 4500,
            skip_cost: -1000,
            vowel_handicap: 1000,
            salience: DEFAULT_SALIENCE.to_vec(),
            squashing: true,
            stop_at_first: true,
        }
    }
}

impl Parameters {
    /// Check the configuration before it reaches the scoring functions.
    pub fn validate(&self) -> Result<(), AlineError> {
        if self.salience.len() != FEATURE_COUNT {
            return Err(AlineError::InvalidConfiguration(format!(
                "an array of {FEATURE_COUNT} salience coefficients is required, got {}",
                self.salience.len()
            )));
        }
        if let Some(s) = self.salience.iter().find(|s| !(0..=MAX_SALIENCE).contains(*s)) {
            return Err(AlineError::InvalidConfiguration(format!(
                "salience coefficients must be within 0..={MAX_SALIENCE}, got {s}"
            )));
        }
        for (name, v) in [
            ("max substitution score", self.max_substitution_score),
            ("max compression score", self.max_compression_score),
            ("skip cost", self.skip_cost),
            ("vowel handicap", self.vowel_handicap),
        ] {
            if v.unsigned_abs() > MAX_SCORE_MAGNITUDE.unsigned_abs() {
                return Err(AlineError::InvalidConfiguration(format!(
                    "{name} must be within ±{MAX_SCORE_MAGNITUDE}, got {v}"
                )));
            }
        }
        if !self.score_margin.is_finite() || self.score_margin <= 0.0 || self.score_margin > 1.0 {
            return Err(AlineError::InvalidConfiguration(format!(
                "score margin must be within (0, 1], got {}",
                self.score_margin
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let p = Parameters::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.salience.len(), 13);
        assert_eq!(p.skip_cost, -1000);
    }

    #[test]
    fn salience_length_checked() {
        for n in [0, 12, 14] {
            let p = Parameters { salience: vec![1; n], ..Default::default() };
            assert!(matches!(p.validate(), Err(AlineError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn margin_checked() {
        for m in [0.0, -0.5, 1.5, f32::NAN] {
            let p = Parameters { score_margin: m, ..Default::default() };
            assert!(p.validate().is_err(), "margin {m} should be rejected");
        }
        let p = Parameters { score_margin: 0.75, ..Default::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn salience_range_checked() {
        for s in [i32::MAX, MAX_SALIENCE + 1, -1] {
            let mut salience = DEFAULT_SALIENCE.to_vec();
            salience[1] = s;
            let p = Parameters { salience, ..Default::default() };
            assert!(matches!(p.validate(), Err(AlineError::InvalidConfiguration(_))), "salience {s}");
        }
        let p = Parameters { salience: vec![MAX_SALIENCE; FEATURE_COUNT], ..Default::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn score_constants_are_bounded() {
        let huge = [
            Parameters { max_substitution_score: i32::MAX, ..Default::default() },
            Parameters { max_compression_score: MAX_SCORE_MAGNITUDE + 1, ..Default::default() },
            Parameters { skip_cost: i32::MIN, ..Default::default() },
            Parameters { vowel_handicap: -MAX_SCORE_MAGNITUDE - 1, ..Default::default() },
        ];
        for p in huge {
            assert!(matches!(p.validate(), Err(AlineError::InvalidConfiguration(_))), "{p:?}");
        }
        let p = Parameters { skip_cost: -MAX_SCORE_MAGNITUDE, ..Default::default() };
        assert!(p.validate().is_ok());
    }
}
