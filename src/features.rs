//! The ALINE phonetic feature model.
//!
//! Every phoneme is a vector of 13 multi-valued features on a 0–100 scale.
//! The table below maps the 26 base letters `a`–`z` to their vectors; modifier
//! letters (see [`crate::word`]) adjust individual features afterwards.
//!
//! The published table already has the redundancy rules applied (see
//! [`Phoneme::with_redundancy`]), so an unmodified letter encodes to exactly
//! its table entry.
//!
//! ### Example
//! ```rust
//! use aliners::features::{base_phoneme, Feature, value};
//! let b = base_phoneme('b').unwrap();
//! assert_eq!(b.get(Feature::Place), value::BILABIAL);
//! assert_eq!(b.get(Feature::Manner), value::STOP);
//! assert!(!b.is_vowel());
//! ```

/// Number of features in a phoneme vector.
pub const FEATURE_COUNT: usize = 13;

/// Feature indices, in vector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Syllabic = 0,
    Place,
    Manner,
    Voice,
    Nasal,
    Retroflex,
    Lateral,
    Aspirated,
    Long,
    High,
    Back,
    Round,
    /// Secondary place of articulation (double articulations such as `w`).
    Double,
}

impl Feature {
    /// Position of the feature in a phoneme vector.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Named feature values.
pub mod value {
    pub const SYLLABIC: i32 = 100;
    pub const NON_SYLLABIC: i32 = 0;

    // place
    pub const GLOTTAL: i32 = 10;
    pub const VELAR: i32 = 60;
    pub const PALATAL: i32 = 70;
    pub const PALATO_ALVEOLAR: i32 = 75;
    pub const RETROFLEX_PLACE: i32 = 80;
    pub const ALVEOLAR: i32 = 85;
    pub const DENTAL: i32 = 90;
    pub const LABIODENTAL: i32 = 95;
    pub const BILABIAL: i32 = 100;

    // manner
    pub const LOW_VOWEL: i32 = 0;
    pub const MID_VOWEL: i32 = 20;
    pub const HIGH_VOWEL: i32 = 40;
    pub const VOWEL: i32 = HIGH_VOWEL;
    pub const APPROXIMANT: i32 = 60;
    pub const FRICATIVE: i32 = 80;
    pub const AFFRICATE: i32 = 90;
    pub const STOP: i32 = 100;

    // binary features
    pub const VOICED: i32 = 100;
    pub const VOICELESS: i32 = 0;
    pub const PRESENT: i32 = 100;
    pub const ABSENT: i32 = 0;

    // height
    pub const HIGH: i32 = 100;
    pub const MID: i32 = 50;
    pub const LOW: i32 = 0;

    // backness
    pub const FRONT: i32 = 100;
    pub const CENTRAL: i32 = 50;
    pub const BACK: i32 = 0;
}

use value::*;

/// A phoneme feature vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Phoneme([i32; FEATURE_COUNT]);

impl Phoneme {
    /// Value of one feature.
    pub const fn get(&self, feature: Feature) -> i32 {
        self.0[feature as usize]
    }

    pub fn set(&mut self, feature: Feature, v: i32) {
        self.0[feature.index()] = v;
    }

    /// Vowels (and glides) sit below approximants on the manner scale.
    pub const fn is_vowel(&self) -> bool {
        self.0[Feature::Manner as usize] < APPROXIMANT
    }

    /// Apply the redundancy rules: a vowel's manner encodes its height class,
    /// and a consonant's height is pinned to [`value::HIGH`] so it never
    /// matches a vowel height by accident.
    pub const fn with_redundancy(self) -> Self {
        let mut f = self.0;
        if self.is_vowel() {
            match f[Feature::High as usize] {
                HIGH => f[Feature::Manner as usize] = HIGH_VOWEL,
                MID => f[Feature::Manner as usize] = MID_VOWEL,
                LOW => f[Feature::Manner as usize] = LOW_VOWEL,
                _ => {}
            }
        } else {
            f[Feature::High as usize] = HIGH;
        }
        Self(f)
    }
}

impl std::ops::Index<Feature> for Phoneme {
    type Output = i32;
    fn index(&self, feature: Feature) -> &i32 {
        &self.0[feature.index()]
    }
}

#[rustfmt::skip]
const RAW_TABLE: [[i32; FEATURE_COUNT]; 26] = [
    //  syl           place            manner       voice      nas      ret              lat      asp ln height back     round    double
    [SYLLABIC,     VELAR,           VOWEL,       VOICED,    0,       0,               0,       0,  0, LOW,   CENTRAL, 0,       0],        // a
    [NON_SYLLABIC, BILABIAL,        STOP,        VOICED,    0,       0,               0,       0,  0, 0,     0,       0,       0],        // b
    [NON_SYLLABIC, ALVEOLAR,        AFFRICATE,   VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // c
    [NON_SYLLABIC, ALVEOLAR,        STOP,        VOICED,    0,       0,               0,       0,  0, 0,     0,       0,       0],        // d
    [SYLLABIC,     PALATAL,         VOWEL,       VOICED,    0,       0,               0,       0,  0, MID,   FRONT,   0,       0],        // e
    [NON_SYLLABIC, LABIODENTAL,     FRICATIVE,   VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // f
    [NON_SYLLABIC, VELAR,           STOP,        VOICED,    0,       0,               0,       0,  0, 0,     0,       0,       0],        // g
    [NON_SYLLABIC, GLOTTAL,         FRICATIVE,   VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // h
    [SYLLABIC,     PALATAL,         VOWEL,       VOICED,    0,       0,               0,       0,  0, HIGH,  FRONT,   0,       0],        // i
    [NON_SYLLABIC, ALVEOLAR,        AFFRICATE,   VOICED,    0,       0,               0,       0,  0, 0,     0,       0,       0],        // j
    [NON_SYLLABIC, VELAR,           STOP,        VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // k
    [NON_SYLLABIC, ALVEOLAR,        APPROXIMANT, VOICED,    0,       0,               PRESENT, 0,  0, 0,     0,       0,       0],        // l
    [NON_SYLLABIC, BILABIAL,        STOP,        VOICED,    PRESENT, 0,               0,       0,  0, 0,     0,       0,       0],        // m
    [NON_SYLLABIC, ALVEOLAR,        STOP,        VOICED,    PRESENT, 0,               0,       0,  0, 0,     0,       0,       0],        // n
    [SYLLABIC,     VELAR,           VOWEL,       VOICED,    0,       0,               0,       0,  0, MID,   BACK,    PRESENT, 0],        // o
    [NON_SYLLABIC, BILABIAL,        STOP,        VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // p
    [NON_SYLLABIC, GLOTTAL,         STOP,        VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // q
    [NON_SYLLABIC, RETROFLEX_PLACE, APPROXIMANT, VOICED,    0,       PRESENT,         0,       0,  0, 0,     0,       0,       0],        // r
    [NON_SYLLABIC, ALVEOLAR,        FRICATIVE,   VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // s
    [NON_SYLLABIC, ALVEOLAR,        STOP,        VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // t
    [SYLLABIC,     VELAR,           VOWEL,       VOICED,    0,       0,               0,       0,  0, HIGH,  BACK,    PRESENT, 0],        // u
    [NON_SYLLABIC, LABIODENTAL,     FRICATIVE,   VOICED,    0,       0,               0,       0,  0, 0,     0,       0,       0],        // v
    [NON_SYLLABIC, VELAR,           VOWEL,       VOICED,    0,       0,               0,       0,  0, HIGH,  BACK,    PRESENT, BILABIAL], // w
    [NON_SYLLABIC, VELAR,           FRICATIVE,   VOICELESS, 0,       0,               0,       0,  0, 0,     0,       0,       0],        // x
    [NON_SYLLABIC, PALATAL,         VOWEL,       VOICED,    0,       0,               0,       0,  0, HIGH,  FRONT,   0,       0],        // y
    [NON_SYLLABIC, ALVEOLAR,        FRICATIVE,   VOICED,    0,       0,               0,       0,  0, 0,     0,       0,       0],        // z
];

const fn build_table() -> [Phoneme; 26] {
    let mut out = [Phoneme([0; FEATURE_COUNT]); 26];
    let mut i = 0;
    while i < 26 {
        out[i] = Phoneme(RAW_TABLE[i]).with_redundancy();
        i += 1;
    }
    out
}

/// Feature vectors of the base letters `a`–`z`, redundancy rules applied.
pub static FEATURE_TABLE: [Phoneme; 26] = build_table();

/// Table entry for a lowercase ASCII base letter.
pub fn base_phoneme(c: char) -> Option<Phoneme> {
    if c.is_ascii_lowercase() {
        Some(FEATURE_TABLE[(c as u8 - b'a') as usize])
    } else {
        None
    }
}
