//! Word encoding: text → ordered phoneme feature vectors.
//!
//! Lowercase letters `a`–`z` start a new phoneme taken from the
//! [feature table](crate::features::FEATURE_TABLE). Uppercase *modifier*
//! letters adjust the phoneme started most recently instead of adding one:
//!
//! | letter | effect |
//! |---|---|
//! | `A` | aspirated |
//! | `C` | central (backness 50) |
//! | `D` | dental place |
//! | `F` | front (backness 100) |
//! | `H` | long |
//! | `L` | lax (ignored) |
//! | `N` | nasal |
//! | `P` | palatal place |
//! | `S` | spirant (fricative manner) |
//! | `V` | palato-alveolar place |
//! | `X` | retroflex |
//!
//! Any other uppercase letter, or a modifier with nothing to modify yet, is
//! read as its lowercase base letter. Diacritics are stripped by canonical
//! decomposition; characters without an ASCII base, digits and punctuation
//! are skipped but stay part of the surrounding phoneme's source span, which
//! is what the renderer prints.
//!
//! ### Example
//! ```rust
//! use aliners::{Word, features::Feature};
//! let w = Word::new("bAt").unwrap();
//! assert_eq!(w.phonetic_len(), 2);
//! assert_eq!(w.phonemes()[0].get(Feature::Aspirated), 100);
//! assert_eq!(w.source(0), "bA");
//! ```

use std::fmt;
use std::ops::Range;

use unicode_normalization::UnicodeNormalization;

use crate::common::{AlineError, MAX_PHONEMES, MAX_WORD_CHARS};
use crate::features::{base_phoneme, value, Feature, Phoneme};

/// An encoded word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    text: String,
    chars: Vec<char>,
    phonemes: Vec<Phoneme>,
    /// Index into `chars` where each phoneme's span starts; the first is always 0.
    starts: Vec<usize>,
}

impl Word {
    /// Validate and encode `text`.
    pub fn new(text: &str) -> Result<Self, AlineError> {
        validate(text)?;
        let chars: Vec<char> = text.chars().collect();
        let mut phonemes: Vec<Phoneme> = Vec::with_capacity(chars.len());
        let mut starts: Vec<usize> = Vec::with_capacity(chars.len());

        for (idx, &raw) in chars.iter().enumerate() {
            let Some(c) = fold_char(raw) else { continue };
            if let Some(current) = phonemes.last_mut() {
                if modify(current, c) { continue; }
            }
            if let Some(p) = base_phoneme(c.to_ascii_lowercase()) {
                phonemes.push(p);
                starts.push(idx);
            }
        }
        if phonemes.is_empty() {
            return Err(AlineError::InvalidInput(format!("no phonemes found in {text:?}")));
        }
        debug_assert!(phonemes.len() <= MAX_PHONEMES);
        starts[0] = 0;
        for p in phonemes.iter_mut() {
            *p = p.with_redundancy();
        }
        Ok(Self { text: text.to_string(), chars, phonemes, starts })
    }

    /// The original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Number of phonemes.
    pub fn phonetic_len(&self) -> usize {
        self.phonemes.len()
    }

    /// Phonemes in reading order.
    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    /// Phoneme at 1-based position `pos` counted from the **end** of the word,
    /// the order in which the aligner walks words. `None` for position 0 or
    /// past the start.
    pub fn segment(&self, pos: usize) -> Option<&Phoneme> {
        if pos == 0 || pos > self.phonemes.len() { return None; }
        self.phonemes.get(self.phonemes.len() - pos)
    }

    /// Character range of the text that produced phoneme `index` (reading order).
    pub fn span(&self, index: usize) -> Range<usize> {
        let start = self.starts[index];
        let end = self.starts.get(index + 1).copied().unwrap_or(self.chars.len());
        start..end
    }

    /// Source text of phoneme `index`, modifiers included.
    pub fn source(&self, index: usize) -> String {
        self.chars[self.span(index)].iter().collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Reject empty or reserved input before encoding.
fn validate(text: &str) -> Result<(), AlineError> {
    if text.trim().is_empty() {
        return Err(AlineError::InvalidInput("an empty or blank word was provided".into()));
    }
    if let Some(c) = text.chars().find(|&c| c.is_whitespace() || matches!(c, '-' | '|' | '<')) {
        return Err(AlineError::InvalidInput(format!("word {text:?} contains reserved character {c:?}")));
    }
    let len = text.chars().count();
    if len > MAX_WORD_CHARS {
        return Err(AlineError::LengthExceeded { len, max: MAX_WORD_CHARS });
    }
    Ok(())
}

/// Reduce a character to ASCII. Non-ASCII letters lose their diacritics and are
/// lowercased so a decomposed `Å` is read as `a`, not as a modifier.
fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    c.to_string().nfd().next().filter(char::is_ascii).map(|b| b.to_ascii_lowercase())
}

/// Apply modifier letter `c` to `p`; returns `false` if `c` is not a modifier.
fn modify(p: &mut Phoneme, c: char) -> bool {
    match c {
        'A' => p.set(Feature::Aspirated, value::PRESENT),
        'C' => p.set(Feature::Back, value::CENTRAL),
        'D' => p.set(Feature::Place, value::DENTAL),
        'F' => p.set(Feature::Back, value::FRONT),
        'H' => p.set(Feature::Long, value::PRESENT),
        'L' => {}
        'N' => p.set(Feature::Nasal, value::PRESENT),
        'P' => p.set(Feature::Place, value::PALATAL),
        'S' => p.set(Feature::Manner, value::FRICATIVE),
        'V' => p.set(Feature::Place, value::PALATO_ALVEOLAR),
        'X' => p.set(Feature::Retroflex, value::PRESENT),
        _ => return false,
    }
    true
}
