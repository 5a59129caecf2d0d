//! ALINE scoring functions (σ_sub, σ_skip, σ_exp).
//!
//! Positions are 1-based and counted from the **end** of each word, matching
//! the traversal order of [`crate::aligner`]. Position 0 stands for "before the
//! word" and always scores [`NO_SCORE`].
//!
//! Distances weight each feature difference by its salience. Vowel pairs are
//! compared on vowel features only; every other pair on the consonant
//! features plus a place term that honours double articulations.

use crate::common::Parameters;
use crate::features::{Feature, Phoneme};
use crate::word::Word;

/// Sentinel for a transition that cannot be taken. Never returned as a score.
pub const NO_SCORE: i32 = -99999;

const VOWEL_FEATURES: [Feature; 7] = [
    Feature::Syllabic, Feature::Nasal, Feature::Retroflex, Feature::High,
    Feature::Back, Feature::Round, Feature::Long,
];

const CONSONANT_FEATURES: [Feature; 7] = [
    Feature::Syllabic, Feature::Manner, Feature::Voice, Feature::Nasal,
    Feature::Retroflex, Feature::Lateral, Feature::Aspirated,
];

/// Smallest place difference between two phonemes, considering the secondary
/// place of articulation of either side when present.
pub fn place_difference(p: &Phoneme, q: &Phoneme) -> i32 {
    let (pp, pd) = (p[Feature::Place], p[Feature::Double]);
    let (qp, qd) = (q[Feature::Place], q[Feature::Double]);
    let mut d = (pp - qp).abs();
    if pd != 0 { d = d.min((pd - qp).abs()); }
    if qd != 0 { d = d.min((pp - qd).abs()); }
    if pd != 0 && qd != 0 { d = d.min((pd - qd).abs()); }
    d
}

/// Salience-weighted distance between two phonemes. `salience` must hold 13 weights.
pub fn distance(p: &Phoneme, q: &Phoneme, salience: &[i32]) -> i32 {
    let diff = |f: Feature| (p[f] - q[f]).abs() * salience[f.index()];
    if p.is_vowel() && q.is_vowel() {
        VOWEL_FEATURES.iter().map(|&f| diff(f)).sum()
    } else {
        let features: i32 = CONSONANT_FEATURES.iter().map(|&f| diff(f)).sum();
        features + place_difference(p, q) * salience[Feature::Place.index()]
    }
}

/// Substitution score of `a[i]` against `b[j]`.
pub fn substitution(a: &Word, i: usize, b: &Word, j: usize, params: &Parameters) -> i32 {
    let (Some(pa), Some(pb)) = (a.segment(i), b.segment(j)) else { return NO_SCORE };
    let mut score = params.max_substitution_score - distance(pa, pb, &params.salience);
    if pa.is_vowel() { score -= params.vowel_handicap; }
    if pb.is_vowel() { score -= params.vowel_handicap; }
    score
}

/// Score of an insertion or deletion. The cost does not depend on the phoneme.
pub fn skip(cost: i32) -> i32 {
    cost
}

/// Score of squashing `b[j1]` and `b[j2]` together against `a[i]`
/// (an expansion seen from `a`, a compression seen from `b`).
pub fn expansion(a: &Word, i: usize, b: &Word, j1: usize, j2: usize, params: &Parameters) -> i32 {
    let (Some(pa), Some(p1), Some(p2)) = (a.segment(i), b.segment(j1), b.segment(j2)) else {
        return NO_SCORE;
    };
    let d1 = distance(p1, pa, &params.salience);
    let d2 = distance(p2, pa, &params.salience);
    // an exact half-match is a plain substitution plus a skip
    if d1 == 0 || d2 == 0 {
        return NO_SCORE;
    }
    let mut score = params.max_compression_score - (d1 + d2);
    if p1.is_vowel() || p2.is_vowel() { score -= params.vowel_handicap; }
    if pa.is_vowel() { score -= params.vowel_handicap; }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::base_phoneme;

    fn w(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn identical_consonants_score_max() {
        let p = Parameters::default();
        assert_eq!(substitution(&w("t"), 1, &w("t"), 1, &p), 3500);
    }

    #[test]
    fn vowels_pay_the_handicap_per_side() {
        let p = Parameters::default();
        assert_eq!(substitution(&w("a"), 1, &w("a"), 1, &p), 1500);
    }

    #[test]
    fn position_zero_has_no_score() {
        let p = Parameters::default();
        assert_eq!(substitution(&w("ta"), 0, &w("ta"), 1, &p), NO_SCORE);
        assert_eq!(substitution(&w("ta"), 1, &w("ta"), 0, &p), NO_SCORE);
        assert_eq!(expansion(&w("ta"), 1, &w("ta"), 0, 1, &p), NO_SCORE);
        assert_eq!(expansion(&w("ta"), 0, &w("ta"), 1, 2, &p), NO_SCORE);
    }

    #[test]
    fn voicing_is_closer_than_place_and_nasality() {
        let p = Parameters::default();
        let tp = substitution(&w("t"), 1, &w("d"), 1, &p);
        let ts = substitution(&w("t"), 1, &w("s"), 1, &p);
        let tm = substitution(&w("t"), 1, &w("m"), 1, &p);
        // voice: 100 * 10
        assert_eq!(tp, 2500);
        assert!(tp > tm);
        assert!(ts < 3500);
    }

    #[test]
    fn double_articulation_uses_nearest_place() {
        let wq = base_phoneme('w').unwrap();
        let bq = base_phoneme('b').unwrap();
        let gq = base_phoneme('g').unwrap();
        assert_eq!(place_difference(&wq, &bq), 0);
        assert_eq!(place_difference(&wq, &gq), 0);
        assert_eq!(place_difference(&bq, &gq), 40);
    }

    #[test]
    fn degenerate_expansion_disallowed() {
        let p = Parameters::default();
        // "t" against "tt": one half is identical
        assert_eq!(expansion(&w("t"), 1, &w("tt"), 1, 2, &p), NO_SCORE);
        let s = expansion(&w("c"), 1, &w("ts"), 1, 2, &p);
        assert!(s > NO_SCORE);
        assert!(s < p.max_compression_score);
    }

    #[test]
    fn expansion_handicaps_each_side_once() {
        let p = Parameters::default();
        let a = w("o");
        let b = w("au");
        let d1 = distance(b.segment(1).unwrap(), a.segment(1).unwrap(), &p.salience);
        let d2 = distance(b.segment(2).unwrap(), a.segment(1).unwrap(), &p.salience);
        assert_eq!(expansion(&a, 1, &b, 1, 2, &p), 4500 - d1 - d2 - 2000);
    }

    #[test]
    fn skip_is_the_configured_cost() {
        assert_eq!(skip(-1000), -1000);
    }
}
