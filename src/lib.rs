//! # aliners
//!
//! Phonetic word alignment with Kondrak's **ALINE** algorithm.
//!
//! Words are encoded as sequences of multi-valued phonetic feature vectors
//! ([`features`], [`word`]) and aligned with a dynamic-programming matrix
//! followed by a branch-and-bound backtrack ([`aligner`]). Besides
//! substitutions and skips, ALINE can *squash* two phonemes against one
//! (expansion and compression), which captures correspondences such as
//! Latin `factum` against Spanish `hecho` (`ct` against `ch`).
//!
//! Three alignment kinds share the same scoring ([`scoring`]):
//!
//! - [`AlignerKind::Global`]: anchored at the start of both words;
//! - [`AlignerKind::SemiGlobal`]: the best matching region, raw score;
//! - [`AlignerKind::Local`]: the best matching region, scored 0..=100
//!   against the longer word's self-alignment.
//!
//! Results are rendered as two rows of fixed-width cells ([`trace`]) and
//! rated with a simple efficiency heuristic ([`result`]).
//!
//! ### Example
//! ```
//! use aliners::{align, Parameters};
//! let r = align("tenso", "dentso", None).unwrap();
//! assert!(r.score > 50 && r.score <= 100);
//! println!("{}\n{}", r.align_a, r.align_b);
//!
//! // a custom configuration
//! let p = Parameters { skip_cost: -500, ..Default::default() };
//! let r = align("tenso", "dentso", Some(&p)).unwrap();
//! assert_eq!(r.words(), ("tenso".to_string(), "dentso".to_string()));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod aligner;
pub mod common;
pub mod features;
pub mod result;
pub mod scoring;
pub mod trace;
pub mod word;

pub use aligner::{Aligner, AlignerKind, SimilarityMatrix};
pub use common::{AlineError, Parameters};
pub use result::AlignmentResult;
pub use trace::{Column, Mark};
pub use word::Word;

/// Local alignment of two words, with the default parameters unless `params`
/// is given.
pub fn align(a: &str, b: &str, params: Option<&Parameters>) -> Result<AlignmentResult, AlineError> {
    let params = params.cloned().unwrap_or_default();
    Aligner::new(AlignerKind::Local, params)?.align(a, b)
}
