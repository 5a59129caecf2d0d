//! The ALINE alignment engine: similarity matrix plus branch-and-bound search.
//!
//! One matrix serves all three [`AlignerKind`]s: borders are 0 and every
//! cell is floored at 0. The kind only decides where the reported similarity
//! is read and where backtracking may start and stop:
//!
//! | kind | similarity | start cells | stop |
//! |---|---|---|---|
//! | `Local` | matrix maximum | any cell | an edge, or a cell scoring 0 |
//! | `SemiGlobal` | matrix maximum | any cell | an edge, or a cell scoring 0 |
//! | `Global` | cell `(lenA, lenB)` | cell `(lenA, lenB)` | an edge |
//!
//! Only `Local` scores are normalized; the other kinds report the raw score.
//!
//! Words are walked from their **end**: cell `(i, j)` scores the last `i`
//! phonemes of A against the last `j` of B. Backtracking from a start cell
//! towards the origin therefore visits phonemes in reading order, and every
//! recorded [`Column`] is already in output order.
//!
//! The search is a depth-first branch and bound. A move is followed only if
//! the best completion from its target cell can still reach the accepted
//! score (`similarity * score_margin`). Every complete path is checked
//! against the alternating-skip rule ([`trace::allowed`]) before it is kept.
//!
//! ### Example
//! ```rust
//! use aliners::{Aligner, AlignerKind, Parameters};
//! let aligner = Aligner::new(AlignerKind::Global, Parameters::default()).unwrap();
//! let r = aligner.align("tens", "dek").unwrap();
//! assert_eq!(r.align_a.chars().count(), r.align_b.chars().count());
//! assert_eq!(r.words(), ("tens".to_string(), "dek".to_string()));
//! ```

use std::fmt;

use tracing::{debug, trace, warn};

use crate::common::{AlineError, Parameters};
use crate::result::AlignmentResult;
use crate::scoring::{expansion, skip, substitution, NO_SCORE};
use crate::trace::{self as render, Column, Mark, Trail};
use crate::word::Word;

/// Which alignment problem to solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignerKind {
    /// Anchored at the first phoneme of both words, running until one word
    /// is used up.
    Global,
    /// Same search as `Local`, reporting the raw score.
    SemiGlobal,
    /// Best matching region of both words; scores reported as 0..=100.
    #[default]
    Local,
}

impl fmt::Display for AlignerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlignerKind::Global => "global",
            AlignerKind::SemiGlobal => "semi-global",
            AlignerKind::Local => "local",
        })
    }
}

/// Moves of the recurrence, in the order the search tries them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Move {
    Substitution,
    Insertion,
    /// One phoneme of A against two of B.
    Expansion,
    Deletion,
    /// Two phonemes of A against one of B.
    Compression,
}

impl Move {
    const ORDER: [Move; 5] = [Move::Substitution, Move::Insertion, Move::Expansion, Move::Deletion, Move::Compression];

    /// Phonemes of A and B consumed by the move.
    fn offset(self) -> (usize, usize) {
        match self {
            Move::Substitution => (1, 1),
            Move::Insertion => (0, 1),
            Move::Expansion => (1, 2),
            Move::Deletion => (1, 0),
            Move::Compression => (2, 1),
        }
    }

    fn squashes(self) -> bool {
        matches!(self, Move::Expansion | Move::Compression)
    }

    /// Score of taking the move into cell `(i, j)`. Callers make sure the
    /// source cell exists, so `j - 1` and `i - 1` cannot underflow here.
    fn score(self, a: &Word, i: usize, b: &Word, j: usize, params: &Parameters) -> i32 {
        match self {
            Move::Substitution => substitution(a, i, b, j, params),
            Move::Insertion | Move::Deletion => skip(params.skip_cost),
            Move::Expansion => expansion(a, i, b, j - 1, j, params),
            Move::Compression => expansion(b, j, a, i - 1, i, params),
        }
    }

    /// Columns recorded for the move out of cell `(i, j)`, in reading order.
    fn columns(self, a: &Word, i: usize, b: &Word, j: usize) -> (Column, Option<Column>) {
        let sa = |pos: usize| Mark::Segment(a.phonetic_len() - pos);
        let sb = |pos: usize| Mark::Segment(b.phonetic_len() - pos);
        match self {
            Move::Substitution => (Column::new(sa(i), sb(j)), None),
            Move::Insertion => (Column::new(Mark::Gap, sb(j)), None),
            Move::Expansion => (Column::new(sa(i), sb(j)), Some(Column::new(Mark::Link, sb(j - 1)))),
            Move::Deletion => (Column::new(sa(i), Mark::Gap), None),
            Move::Compression => (Column::new(sa(i), sb(j)), Some(Column::new(sa(i - 1), Mark::Link))),
        }
    }
}

/// Add a transition score to a source cell, unless either is unavailable.
fn step(prev: Option<i32>, score: i32) -> Option<i32> {
    prev.filter(|_| score != NO_SCORE).map(|p| p + score)
}

/// Dynamic-programming matrix of one word pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimilarityMatrix {
    kind: AlignerKind,
    cells: Vec<Vec<i32>>,
}

impl SimilarityMatrix {
    /// Fill the matrix for `a` against `b`.
    pub fn build(kind: AlignerKind, a: &Word, b: &Word, params: &Parameters) -> Self {
        let n = a.phonetic_len();
        let m = b.phonetic_len();
        let mut mat = Self { kind, cells: vec![vec![0i32; m + 1]; n + 1] };
        for i in 1..=n {
            for j in 1..=m {
                let mut best = 0;
                for mv in Move::ORDER {
                    if mv.squashes() && !params.squashing { continue; }
                    let (di, dj) = mv.offset();
                    let Some(prev) = mat.back(i, di, j, dj) else { continue };
                    if let Some(v) = step(Some(prev), mv.score(a, i, b, j, params)) {
                        best = best.max(v);
                    }
                }
                mat.cells[i][j] = best;
            }
        }
        mat
    }

    pub fn kind(&self) -> AlignerKind {
        self.kind
    }

    /// Number of rows (`len(A) + 1`).
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (`len(B) + 1`).
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Score of cell `(i, j)`, `None` outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> Option<i32> {
        self.cells.get(i)?.get(j).copied()
    }

    /// Cell `(i - di, j - dj)`, `None` when it falls outside the matrix.
    fn back(&self, i: usize, di: usize, j: usize, dj: usize) -> Option<i32> {
        self.get(i.checked_sub(di)?, j.checked_sub(dj)?)
    }

    fn last(&self) -> (usize, usize) {
        (self.rows() - 1, self.cols() - 1)
    }

    /// Whether backtracking may start at `(i, j)`.
    fn is_start(&self, i: usize, j: usize) -> bool {
        let (n, m) = self.last();
        match self.kind {
            AlignerKind::Local | AlignerKind::SemiGlobal => true,
            AlignerKind::Global => i == n && j == m,
        }
    }

    /// Candidate start cells in row-major order.
    fn start_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (n, m) = self.last();
        (0..=n).flat_map(move |i| (0..=m).map(move |j| (i, j))).filter(|&(i, j)| self.is_start(i, j))
    }

    /// The similarity of the word pair under this matrix's kind.
    pub fn similarity(&self) -> i32 {
        self.start_cells().filter_map(|(i, j)| self.get(i, j)).max().unwrap_or(0)
    }
}

/// A complete path that passed the alternating-skip rule.
#[derive(Clone, Debug)]
struct Candidate {
    raw: i32,
    columns: Vec<Column>,
}

/// Working state of one search. Lives for a single `align` call.
struct Search<'w> {
    a: &'w Word,
    b: &'w Word,
    params: &'w Parameters,
    matrix: &'w SimilarityMatrix,
    accepted: f64,
    /// Unaligned columns in front of the current start cell.
    prefix: Vec<Column>,
    found: Vec<Candidate>,
    halted: bool,
    rejected: usize,
}

impl<'w> Search<'w> {
    fn run(&mut self) {
        let starts: Vec<(usize, usize)> = self.matrix.start_cells().collect();
        for (i, j) in starts {
            if self.halted { break; }
            let Some(score) = self.matrix.get(i, j) else { continue };
            if (score as f64) < self.accepted { continue; }
            self.prefix = self.unaligned_prefix(i, j);
            self.explore(i, j, 0, None);
        }
    }

    fn explore(&mut self, i: usize, j: usize, t: i32, trail: Option<&Trail<'_>>) {
        if self.halted { return; }
        if i != 0 && j != 0 {
            for mv in Move::ORDER {
                if mv.squashes() && !self.params.squashing { continue; }
                let (di, dj) = mv.offset();
                let Some(prev) = self.matrix.back(i, di, j, dj) else { continue };
                let s = mv.score(self.a, i, self.b, j, self.params);
                if s == NO_SCORE || ((prev + s + t) as f64) < self.accepted { continue; }
                let (first, second) = mv.columns(self.a, i, self.b, j);
                let node = Trail::push(trail, first);
                match second {
                    Some(col) => {
                        let linked = Trail::push(Some(&node), col);
                        self.explore(i - di, j - dj, t + s, Some(&linked));
                    }
                    None => self.explore(i - di, j - dj, t + s, Some(&node)),
                }
                if self.halted { return; }
            }
            // a global alignment may only end at an edge
            if self.matrix.kind() == AlignerKind::Global || self.matrix.get(i, j) != Some(0) { return; }
        }
        self.finish(i, j, t, trail);
    }

    /// Complete the path ending at `(i, j)` and keep it if it is allowed.
    fn finish(&mut self, i: usize, j: usize, t: i32, trail: Option<&Trail<'_>>) {
        let mut columns = self.prefix.clone();
        columns.push(Column::BORDER);
        columns.extend(Trail::columns(trail));
        if !render::allowed(&columns) {
            self.rejected += 1;
            trace!(end_a = i, end_b = j, score = t, "candidate rejected by the alternating-skip rule");
            return;
        }
        columns.push(Column::BORDER);
        let (la, lb) = (self.a.phonetic_len(), self.b.phonetic_len());
        columns.extend((1..=i).rev().map(|p| Column::new(Mark::Segment(la - p), Mark::Gap)));
        columns.extend((1..=j).rev().map(|p| Column::new(Mark::Gap, Mark::Segment(lb - p))));
        trace!(end_a = i, end_b = j, score = t, columns = columns.len(), "candidate accepted");
        self.found.push(Candidate { raw: t, columns });
        if self.params.stop_at_first {
            self.halted = true;
        }
    }

    /// Leading columns for a start at `(i, j)`: B's unaligned phonemes, then A's.
    fn unaligned_prefix(&self, i: usize, j: usize) -> Vec<Column> {
        let (la, lb) = (self.a.phonetic_len(), self.b.phonetic_len());
        let mut cols: Vec<Column> = ((j + 1)..=lb).rev().map(|p| Column::new(Mark::Gap, Mark::Segment(lb - p))).collect();
        cols.extend(((i + 1)..=la).rev().map(|p| Column::new(Mark::Segment(la - p), Mark::Gap)));
        cols
    }
}

/// An aligner of one kind with fixed parameters. Immutable; each call builds
/// its own matrix and search state, so one aligner can serve many threads.
#[derive(Clone, Debug)]
pub struct Aligner {
    kind: AlignerKind,
    params: Parameters,
}

impl Aligner {
    /// Validate `params` and build an aligner.
    pub fn new(kind: AlignerKind, params: Parameters) -> Result<Self, AlineError> {
        params.validate()?;
        Ok(Self { kind, params })
    }

    pub fn kind(&self) -> AlignerKind {
        self.kind
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Align two words and return the best accepted alignment.
    pub fn align(&self, a: &str, b: &str) -> Result<AlignmentResult, AlineError> {
        let (wa, wb) = (Word::new(a)?, Word::new(b)?);
        Ok(self.align_words(&wa, &wb))
    }

    /// Align two words and return every accepted alignment in discovery order.
    /// With `stop_at_first` set this is at most one.
    pub fn align_all(&self, a: &str, b: &str) -> Result<Vec<AlignmentResult>, AlineError> {
        let (wa, wb) = (Word::new(a)?, Word::new(b)?);
        Ok(self.align_words_all(&wa, &wb))
    }

    /// [`align`](Self::align) for already encoded words. The highest raw score
    /// wins, the earliest found on ties. Without any accepted path the result
    /// carries the matrix similarity and no rendering.
    pub fn align_words(&self, a: &Word, b: &Word) -> AlignmentResult {
        let (similarity, found) = self.search(a, b);
        let mut best: Option<Candidate> = None;
        for c in found {
            if best.as_ref().map_or(true, |kept| c.raw > kept.raw) { best = Some(c); }
        }
        let scale = self.local_scale(a, b);
        match best {
            Some(c) => self.render(c, a, b, scale),
            None => AlignmentResult::unaligned(self.report(similarity, scale), similarity),
        }
    }

    /// [`align_all`](Self::align_all) for already encoded words.
    pub fn align_words_all(&self, a: &Word, b: &Word) -> Vec<AlignmentResult> {
        let (_, found) = self.search(a, b);
        let scale = self.local_scale(a, b);
        found.into_iter().map(|c| self.render(c, a, b, scale)).collect()
    }

    /// The similarity matrix this aligner fills for `a` against `b`.
    pub fn similarity_matrix(&self, a: &Word, b: &Word) -> SimilarityMatrix {
        SimilarityMatrix::build(self.kind, a, b, &self.params)
    }

    /// Local similarity of a word with itself: the best score any alignment
    /// involving it can reach.
    pub fn self_similarity(&self, w: &Word) -> i32 {
        SimilarityMatrix::build(AlignerKind::Local, w, w, &self.params).similarity()
    }

    fn search(&self, a: &Word, b: &Word) -> (i32, Vec<Candidate>) {
        let matrix = self.similarity_matrix(a, b);
        let similarity = matrix.similarity();
        let accepted = similarity as f64 * self.params.score_margin as f64;
        debug!(kind = %self.kind, a = %a, b = %b, similarity, accepted, "similarity matrix built");
        let mut search = Search {
            a,
            b,
            params: &self.params,
            matrix: &matrix,
            accepted,
            prefix: Vec::new(),
            found: Vec::new(),
            halted: false,
            rejected: 0,
        };
        search.run();
        debug!(found = search.found.len(), rejected = search.rejected, "search finished");
        if search.found.is_empty() {
            warn!(kind = %self.kind, a = %a, b = %b, "no alignment reached the accepted score");
        }
        (similarity, search.found)
    }

    /// Normalizer for local scores: the self-similarity of the longer word.
    fn local_scale(&self, a: &Word, b: &Word) -> Option<i32> {
        (self.kind == AlignerKind::Local).then(|| {
            let longer = if a.char_len() >= b.char_len() { a } else { b };
            self.self_similarity(longer)
        })
    }

    fn report(&self, raw: i32, scale: Option<i32>) -> i32 {
        match scale {
            Some(s) => normalize(raw, s),
            None => raw,
        }
    }

    fn render(&self, c: Candidate, a: &Word, b: &Word, scale: Option<i32>) -> AlignmentResult {
        let (row_a, row_b) = render::render(&c.columns, a, b);
        AlignmentResult::new(self.report(c.raw, scale), c.raw, c.columns, row_a, row_b)
    }
}

/// Local score as a percentage of the best attainable score, both taken in
/// hundreds as ALINE reports them.
fn normalize(raw: i32, best: i32) -> i32 {
    let best = best / 100;
    if best <= 0 {
        return 0;
    }
    ((raw / 100) * 100 / best).clamp(0, 100)
}
