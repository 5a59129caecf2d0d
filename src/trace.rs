//! Alignment traces and their two-row rendering.
//!
//! A trace is the ordered list of [`Column`]s of one alignment, in reading
//! order. Each column pairs a [`Mark`] for word A with one for word B:
//!
//! - `Segment`/`Segment`: substitution (match),
//! - `Segment`/`Gap`: deletion, `Gap`/`Segment`: insertion,
//! - `Link`/`Segment` or `Segment`/`Link`: second half of an expansion or
//!   compression (the partner phoneme sits in the preceding column),
//! - `Border`/`Border`: start or end of the aligned region.
//!
//! During the search the trace is built as a [`Trail`], an immutable linked
//! list living on the recursion's stack frames.
//!
//! ### Rendering
//! Every column becomes one cell per row, padded to the same width (at least
//! [`CELL_WIDTH`] characters): phonemes print their source characters, gaps
//! `-`, links `<`, and borders `|` padded to [`BORDER_WIDTH`].
//!
//! ```text
//! |  t   e   n   s   |
//! |  d   e   k   -   |
//! ```

use crate::word::Word;

/// Minimum width of a rendered phoneme, gap or link cell.
pub const CELL_WIDTH: usize = 4;

/// Width of a rendered border cell.
pub const BORDER_WIDTH: usize = 3;

/// What one row shows in one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Phoneme at this 0-based index of the word (reading order).
    Segment(usize),
    /// No phoneme: the other row's phoneme is inserted/deleted.
    Gap,
    /// Squashed onto the phoneme in the previous column.
    Link,
    /// Boundary of the aligned region.
    Border,
}

/// One column of an alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    /// Mark for word A (top row).
    pub a: Mark,
    /// Mark for word B (bottom row).
    pub b: Mark,
}

impl Column {
    pub const BORDER: Column = Column { a: Mark::Border, b: Mark::Border };

    pub fn new(a: Mark, b: Mark) -> Self {
        Self { a, b }
    }

    /// A phoneme of A with no counterpart in B.
    pub fn is_deletion(&self) -> bool {
        matches!(self.a, Mark::Segment(_)) && self.b == Mark::Gap
    }

    /// A phoneme of B with no counterpart in A.
    pub fn is_insertion(&self) -> bool {
        self.a == Mark::Gap && matches!(self.b, Mark::Segment(_))
    }

    pub fn is_border(&self) -> bool {
        *self == Self::BORDER
    }

    /// Both rows hold a phoneme.
    pub fn is_match(&self) -> bool {
        matches!((self.a, self.b), (Mark::Segment(_), Mark::Segment(_)))
    }

    /// CIGAR-like operation letter: `M` match, `D` deletion, `I` insertion,
    /// `E` expansion link (two B phonemes on one A), `C` compression link.
    pub fn op(&self) -> char {
        match (self.a, self.b) {
            (Mark::Border, _) | (_, Mark::Border) => '|',
            (Mark::Link, _) => 'E',
            (_, Mark::Link) => 'C',
            (Mark::Gap, _) => 'I',
            (_, Mark::Gap) => 'D',
            _ => 'M',
        }
    }
}

/// Immutable trace under construction. Each recursion level owns one node
/// that points to its caller's node, so backtracking needs no explicit pops.
#[derive(Clone, Copy, Debug)]
pub struct Trail<'p> {
    column: Column,
    parent: Option<&'p Trail<'p>>,
    len: usize,
}

impl<'p> Trail<'p> {
    /// Extend `parent` (or start a new trail) by `column`.
    pub fn push(parent: Option<&'p Trail<'p>>, column: Column) -> Self {
        let len = parent.map_or(0, |p| p.len) + 1;
        Self { column, parent, len }
    }

    /// Number of columns recorded so far.
    pub fn depth(&self) -> usize {
        self.len
    }

    /// Columns from the oldest to the newest.
    pub fn columns(trail: Option<&Trail<'_>>) -> Vec<Column> {
        let mut out = Vec::with_capacity(trail.map_or(0, Trail::depth));
        let mut node = trail;
        while let Some(t) = node {
            out.push(t.column);
            node = t.parent;
        }
        out.reverse();
        out
    }
}

/// The alternating-skip rule: a column with a gap in row A may not directly
/// follow a column with a gap in row B. Such a pair is a deletion followed by
/// an insertion, which a substitution always describes better.
pub fn allowed(columns: &[Column]) -> bool {
    columns.windows(2).all(|w| !(w[1].a == Mark::Gap && w[0].b == Mark::Gap))
}

/// Render `columns` into two rows of equal character length, trailing blank
/// columns trimmed.
pub fn render(columns: &[Column], a: &Word, b: &Word) -> (String, String) {
    let mut row_a: Vec<char> = Vec::with_capacity(columns.len() * CELL_WIDTH);
    let mut row_b: Vec<char> = Vec::with_capacity(columns.len() * CELL_WIDTH);
    for col in columns {
        let ca = cell(col.a, a);
        let cb = cell(col.b, b);
        let width = if col.is_border() {
            BORDER_WIDTH
        } else {
            CELL_WIDTH.max(ca.chars().count()).max(cb.chars().count())
        };
        pad_into(&mut row_a, &ca, width);
        pad_into(&mut row_b, &cb, width);
    }
    let used = |row: &[char]| row.iter().rposition(|&c| c != ' ').map_or(0, |p| p + 1);
    let keep = used(&row_a).max(used(&row_b));
    row_a.truncate(keep);
    row_b.truncate(keep);
    (row_a.into_iter().collect(), row_b.into_iter().collect())
}

/// Run-length encoded operations of the aligned region, e.g. `2M1E1M1D`.
/// Columns outside the borders are reported as soft clips (`S`).
pub fn cigar(columns: &[Column]) -> String {
    let mut ops: Vec<(char, usize)> = Vec::new();
    let mut inside = false;
    for col in columns {
        if col.is_border() {
            inside = !inside;
            continue;
        }
        push_cigar(&mut ops, if inside { col.op() } else { 'S' }, 1);
    }
    ops.into_iter().map(|(op, len)| format!("{len}{op}")).collect()
}

fn push_cigar(ops: &mut Vec<(char, usize)>, op: char, k: usize) {
    if let Some(last) = ops.last_mut() {
        if last.0 == op { last.1 += k; return; }
    }
    ops.push((op, k));
}

fn cell(mark: Mark, word: &Word) -> String {
    match mark {
        Mark::Segment(k) => word.source(k),
        Mark::Gap => "-".to_string(),
        Mark::Link => "<".to_string(),
        Mark::Border => "|".to_string(),
    }
}

fn pad_into(row: &mut Vec<char>, text: &str, width: usize) {
    let before = row.len();
    row.extend(text.chars());
    row.resize(before + width, ' ');
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::*;

    fn col(a: Mark, b: Mark) -> Column {
        Column::new(a, b)
    }

    #[test]
    fn trail_collects_in_push_order() {
        let t1 = Trail::push(None, Column::BORDER);
        let t2 = Trail::push(Some(&t1), col(Segment(0), Segment(0)));
        let t3 = Trail::push(Some(&t2), col(Segment(1), Gap));
        assert_eq!(t3.depth(), 3);
        assert_eq!(
            Trail::columns(Some(&t3)),
            vec![Column::BORDER, col(Segment(0), Segment(0)), col(Segment(1), Gap)]
        );
        assert!(Trail::columns(None).is_empty());
    }

    #[test]
    fn deletion_then_insertion_rejected() {
        let bad = [col(Segment(0), Gap), col(Gap, Segment(0))];
        assert!(!allowed(&bad));
        let ok = [col(Gap, Segment(0)), col(Segment(0), Gap)];
        assert!(allowed(&ok));
        let runs = [col(Segment(0), Gap), col(Segment(1), Gap), col(Segment(2), Segment(0))];
        assert!(allowed(&runs));
    }

    #[test]
    fn renders_fixed_width_cells() {
        let a = Word::new("tens").unwrap();
        let b = Word::new("dek").unwrap();
        let cols = [
            Column::BORDER,
            col(Segment(0), Segment(0)),
            col(Segment(1), Segment(1)),
            col(Segment(2), Segment(2)),
            col(Segment(3), Gap),
            Column::BORDER,
        ];
        let (ra, rb) = render(&cols, &a, &b);
        assert_eq!(ra, "|  t   e   n   s   |");
        assert_eq!(rb, "|  d   e   k   -   |");
    }

    #[test]
    fn wide_spans_widen_the_column() {
        let a = Word::new("aHHHHi").unwrap();
        let b = Word::new("ai").unwrap();
        let cols = [col(Segment(0), Segment(0)), col(Segment(1), Segment(1))];
        let (ra, rb) = render(&cols, &a, &b);
        assert_eq!(ra, "aHHHHi");
        assert_eq!(rb, "a    i");
        assert_eq!(ra.chars().count(), rb.chars().count());
    }

    #[test]
    fn cigar_runs() {
        let cols = [
            col(Gap, Segment(0)),
            Column::BORDER,
            col(Segment(0), Segment(1)),
            col(Link, Segment(2)),
            col(Segment(1), Gap),
            col(Segment(2), Gap),
            Column::BORDER,
        ];
        assert_eq!(cigar(&cols), "1S1M1E2D");
    }
}
