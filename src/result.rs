//! Alignment results and the efficiency heuristic.
//!
//! An [`AlignmentResult`] carries the reported score, the rendered rows and
//! the trace they were rendered from. Its `efficiency` rates how much of the
//! rendering is a good match:
//!
//! - a column with `|` in both rows toggles the counted region;
//! - inside it every non-blank column adds to the matched length, and gap
//!   columns additionally count as mismatches;
//! - outside it every non-blank column costs 5%, or 10% before any matched
//!   column has been seen.
//!
//! `efficiency = (length - mismatches) / length - 0.05 * penalty`.
//!
//! ### Example
//! ```rust
//! use aliners::result::efficiency;
//! let e = efficiency("|  t   e   n   s   |", "|  d   e   k   -   |");
//! assert!((e - 0.75).abs() < 1e-9);
//! ```

use crate::trace::{self, Column};

/// Pairs of letters the morphing treats as interchangeable.
const INTERCHANGEABLE: [(char, char); 8] = [
    ('p', 'b'), ('f', 'b'), ('f', 'p'), ('g', 'k'),
    ('t', 'd'), ('m', 'n'), ('w', 'u'), ('s', 'z'),
];

/// Penalty per character outside the counted region.
const OUTSIDE_PENALTY: f64 = 0.05;

/// One rendered alignment of two words.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentResult {
    /// Reported score: 0..=100 for local alignments, the raw score otherwise.
    pub score: i32,
    /// Sum of the operation scores along the alignment path.
    pub raw_score: i32,
    /// Rendered row for word A.
    pub align_a: String,
    /// Rendered row for word B (same character length as `align_a`).
    pub align_b: String,
    /// Trace the rows were rendered from, in reading order.
    pub columns: Vec<Column>,
    /// See the module documentation.
    pub efficiency: f64,
}

impl AlignmentResult {
    pub fn new(score: i32, raw_score: i32, columns: Vec<Column>, align_a: String, align_b: String) -> Self {
        let efficiency = efficiency(&align_a, &align_b);
        Self { score, raw_score, align_a, align_b, columns, efficiency }
    }

    /// A result without rendering, used when no path met the accepted score.
    pub fn unaligned(score: i32, raw_score: i32) -> Self {
        Self { score, raw_score, align_a: String::new(), align_b: String::new(), columns: Vec::new(), efficiency: 0.0 }
    }

    /// Whether a rendering exists.
    pub fn is_aligned(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Row by index (0 = A, 1 = B).
    pub fn row(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.align_a),
            1 => Some(&self.align_b),
            _ => None,
        }
    }

    /// CIGAR-like summary of the trace (see [`trace::cigar`]).
    pub fn cigar(&self) -> String {
        trace::cigar(&self.columns)
    }

    /// The two words read back from the rendered rows.
    pub fn words(&self) -> (String, String) {
        (strip_row(&self.align_a), strip_row(&self.align_b))
    }

    /// Merge the rows into two strings: a gap takes the other row's letter, and
    /// an interchangeable pair (e.g. `t`/`d`) also appends B's letter to the
    /// first string.
    pub fn morph(&self) -> (String, String) {
        let mut first = String::new();
        let mut second = String::new();
        for (x, y) in self.align_a.chars().zip(self.align_b.chars()) {
            if x == ' ' || x == '|' { continue; }
            first.push(if x == '-' { y } else { x });
            second.push(if y == '-' { x } else { y });
            for (p, q) in INTERCHANGEABLE {
                if (x, y) == (p, q) || (x, y) == (q, p) {
                    first.push(y);
                }
            }
        }
        (first, second)
    }
}

/// Remove padding, gaps, links and borders from a rendered row.
pub fn strip_row(row: &str) -> String {
    row.chars().filter(|c| !matches!(c, ' ' | '-' | '|' | '<')).collect()
}

/// Efficiency of a pair of rendered rows (see the module documentation).
/// An empty counted region contributes a ratio of 0.
pub fn efficiency(row_a: &str, row_b: &str) -> f64 {
    let mut length = 0.0f64;
    let mut mismatches = 0.0f64;
    let mut penalty = 0usize;
    let mut counting = false;
    for (x, y) in row_a.chars().zip(row_b.chars()) {
        if x == '-' || y == '-' {
            if counting { mismatches += 1.0; }
        } else if x == '|' && y == '|' {
            counting = !counting;
            continue;
        } else if x == ' ' && y == ' ' {
            continue;
        }
        if counting {
            length += 1.0;
        } else if length > 0.0 {
            penalty += 1;
        } else {
            penalty += 2;
        }
    }
    let ratio = if length > 0.0 { (length - mismatches) / length } else { 0.0 };
    ratio - penalty as f64 * OUTSIDE_PENALTY
}
