//! Invariants of the three aligner kinds over seeded random word pairs.

use aliners::scoring::NO_SCORE;
use aliners::trace::allowed;
use aliners::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const MODIFIERS: &[u8] = b"ACDFHLNPSVX";

/// Random word of `1..=max` letters, each followed by a modifier now and then.
fn random_word<R: Rng>(rng: &mut R, max: usize) -> String {
    let n = rng.gen_range(1..=max);
    let mut s = String::new();
    for _ in 0..n {
        s.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
        if rng.gen_bool(0.15) {
            s.push(MODIFIERS[rng.gen_range(0..MODIFIERS.len())] as char);
        }
    }
    s
}

fn pairs(seed: u64, count: usize, max: usize) -> Vec<(String, String)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| (random_word(&mut rng, max), random_word(&mut rng, max))).collect()
}

fn aligner(kind: AlignerKind) -> Aligner {
    Aligner::new(kind, Parameters::default()).unwrap()
}

fn check_rendering(r: &AlignmentResult, a: &str, b: &str) {
    assert_eq!(r.align_a.chars().count(), r.align_b.chars().count(), "{a} / {b}");
    assert_eq!(r.words(), (a.to_string(), b.to_string()));
    let borders: Vec<usize> = r.columns.iter().enumerate().filter(|(_, c)| c.is_border()).map(|(k, _)| k).collect();
    assert_eq!(borders.len(), 2, "{a} / {b}: {:?}", r.columns);
    assert!(allowed(&r.columns[..borders[1]]), "{a} / {b}: {:?}", r.columns);
}

#[test]
fn rendered_rows_round_trip() {
    for kind in [AlignerKind::Local, AlignerKind::SemiGlobal, AlignerKind::Global] {
        let al = aligner(kind);
        for (a, b) in pairs(7, 200, 8) {
            let r = al.align(&a, &b).unwrap();
            assert_ne!(r.raw_score, NO_SCORE);
            assert_ne!(r.score, NO_SCORE);
            if r.is_aligned() {
                check_rendering(&r, &a, &b);
            }
        }
    }
}

#[test]
fn local_scores_are_percentages() {
    let al = aligner(AlignerKind::Local);
    for (a, b) in pairs(11, 300, 10) {
        let r = al.align(&a, &b).unwrap();
        assert!((0..=100).contains(&r.score), "{a} / {b}: {}", r.score);
    }
}

#[test]
fn local_self_alignment_is_perfect() {
    let al = aligner(AlignerKind::Local);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let w: String = (0..rng.gen_range(1..=12)).map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char).collect();
        let r = al.align(&w, &w).unwrap();
        assert_eq!(r.score, 100, "{w}");
        assert!(r.columns.iter().filter(|c| !c.is_border()).all(|c| c.is_match()), "{w}");
    }
}

#[test]
fn global_self_alignment_matches_every_phoneme() {
    let al = aligner(AlignerKind::Global);
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let w: String = (0..rng.gen_range(1..=12)).map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char).collect();
        let word = Word::new(&w).unwrap();
        let r = al.align_words(&word, &word);
        assert_eq!(r.raw_score, al.self_similarity(&word), "{w}");
        let inner: Vec<&Column> = r.columns.iter().filter(|c| !c.is_border()).collect();
        assert_eq!(inner.len(), word.phonetic_len());
        for (k, c) in inner.iter().enumerate() {
            assert_eq!(**c, Column::new(Mark::Segment(k), Mark::Segment(k)), "{w}");
        }
    }
}

#[test]
fn matrices_are_shared_and_floored() {
    let (g, s, l) = (aligner(AlignerKind::Global), aligner(AlignerKind::SemiGlobal), aligner(AlignerKind::Local));
    for (a, b) in pairs(19, 200, 10) {
        let (wa, wb) = (Word::new(&a).unwrap(), Word::new(&b).unwrap());
        let (mg, ms, ml) = (g.similarity_matrix(&wa, &wb), s.similarity_matrix(&wa, &wb), l.similarity_matrix(&wa, &wb));
        let mut max = 0;
        for i in 0..ml.rows() {
            for j in 0..ml.cols() {
                let v = ml.get(i, j).unwrap();
                assert!(v >= 0, "{a} / {b}");
                assert_eq!(mg.get(i, j), Some(v));
                assert_eq!(ms.get(i, j), Some(v));
                max = max.max(v);
            }
        }
        assert_eq!(ms.similarity(), max, "{a} / {b}");
        assert_eq!(ml.similarity(), max, "{a} / {b}");
        assert_eq!(mg.similarity(), mg.get(wa.phonetic_len(), wb.phonetic_len()).unwrap());
    }
}

#[test]
fn global_alignment_is_anchored_and_stops_at_an_edge() {
    let al = aligner(AlignerKind::Global);
    for (a, b) in pairs(23, 100, 8) {
        let r = al.align(&a, &b).unwrap();
        if !r.is_aligned() {
            continue;
        }
        assert!(r.columns[0].is_border(), "{a} / {b}: {:?}", r.columns);
        let end = r.columns.iter().rposition(Column::is_border).unwrap();
        let tail = &r.columns[end + 1..];
        // whatever is left over belongs to one word only
        assert!(tail.iter().all(Column::is_deletion) || tail.iter().all(Column::is_insertion), "{a} / {b}");
    }
}

#[test]
fn exhaustive_search_finds_at_least_as_many() {
    let first = Aligner::new(AlignerKind::Local, Parameters { score_margin: 0.8, ..Default::default() }).unwrap();
    let every = Aligner::new(
        AlignerKind::Local,
        Parameters { score_margin: 0.8, stop_at_first: false, ..Default::default() },
    )
    .unwrap();
    for (a, b) in pairs(29, 60, 5) {
        let one = first.align_all(&a, &b).unwrap();
        let all = every.align_all(&a, &b).unwrap();
        assert!(one.len() <= 1);
        assert!(all.len() >= one.len(), "{a} / {b}");
        for r in &all {
            check_rendering(r, &a, &b);
        }
    }
}

#[test]
fn close_substitution_costs_less_than_a_distant_one() {
    let close = align("pato", "bato", None).unwrap();
    let distant = align("pato", "iato", None).unwrap();
    assert!(close.score > distant.score, "{} vs {}", close.score, distant.score);
    assert!(close.score < 100);
}

#[test]
fn squashing_aligns_affricate_with_a_cluster() {
    let al = aligner(AlignerKind::Global);
    let r = al.align("fakto", "hecho").unwrap();
    if r.is_aligned() {
        check_rendering(&r, "fakto", "hecho");
    }
    let plain = Aligner::new(AlignerKind::Global, Parameters { squashing: false, ..Default::default() }).unwrap();
    let p = plain.align("fakto", "hecho").unwrap();
    assert!(r.raw_score >= p.raw_score);
}

#[test]
fn errors_are_reported_before_alignment() {
    let al = aligner(AlignerKind::Local);
    assert!(matches!(al.align("", "pato"), Err(AlineError::InvalidInput(_))));
    assert!(matches!(al.align("pa to", "pato"), Err(AlineError::InvalidInput(_))));
    assert!(matches!(al.align("pato", "..."), Err(AlineError::InvalidInput(_))));
    assert!(matches!(al.align(&"t".repeat(31), "pato"), Err(AlineError::LengthExceeded { len: 31, max: 30 })));
    for n in [12, 14] {
        let p = Parameters { salience: vec![10; n], ..Default::default() };
        assert!(matches!(Aligner::new(AlignerKind::Global, p), Err(AlineError::InvalidConfiguration(_))));
    }
}
