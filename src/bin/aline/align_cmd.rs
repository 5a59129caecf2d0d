//! CLI for `aline align`: one word pair, human-readable report.
use std::io::Write;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use aliners::*;
use crate::mode::ModeChoice;

/// Options for the `align` subcommand.
#[derive(Debug, Args)]
pub struct AlignCmd {
    /// First word (A, top row).
    #[arg(long)]
    pub a: String,
    /// Second word (B, bottom row).
    #[arg(long)]
    pub b: String,
    /// Alignment kind.
    #[arg(long, value_enum, default_value_t=ModeChoice::Local)]
    pub mode: ModeChoice,
    /// Accept alignments scoring at least this fraction of the best one.
    #[arg(long, default_value_t=1.0)]
    pub margin: f32,
    /// Insertion/deletion score (negative).
    #[arg(long, default_value_t=-1000, allow_hyphen_values=true)]
    pub skip: i32,
    /// Maximal substitution score.
    #[arg(long, default_value_t=3500)]
    pub max_score: i32,
    /// Maximal expansion/compression score.
    #[arg(long, default_value_t=4500)]
    pub max_compression: i32,
    /// Penalty per vowel in a substitution or squash.
    #[arg(long, default_value_t=1000)]
    pub vowel_handicap: i32,
    /// 13 comma-separated feature saliences.
    #[arg(long, value_delimiter=',', num_args=1..)]
    pub salience: Option<Vec<i32>>,
    /// Disable expansion/compression.
    #[arg(long)]
    pub no_squashing: bool,
    /// Report every accepted alignment instead of the best one.
    #[arg(long)]
    pub all: bool,
    /// Also print the two words merged through the alignment.
    #[arg(long)]
    pub morph: bool,
    /// Output file (stdout if omitted).
    #[arg(long)]
    pub outfile: Option<PathBuf>,
}

impl AlignCmd {
    fn params(&self) -> Parameters {
        let mut p = Parameters {
            score_margin: self.margin,
            max_substitution_score: self.max_score,
            max_compression_score: self.max_compression,
            skip_cost: self.skip,
            vowel_handicap: self.vowel_handicap,
            squashing: !self.no_squashing,
            stop_at_first: !self.all,
            ..Default::default()
        };
        if let Some(s) = &self.salience { p.salience = s.clone(); }
        p
    }
}

pub fn run(cmd: AlignCmd) -> Result<()> {
    let aligner = Aligner::new(cmd.mode.into(), cmd.params()).context("invalid alignment parameters")?;
    let results = if cmd.all {
        aligner.align_all(&cmd.a, &cmd.b)
    } else {
        aligner.align(&cmd.a, &cmd.b).map(|r| vec![r])
    }
    .with_context(|| format!("align {:?} with {:?}", cmd.a, cmd.b))?;

    let mut out: Box<dyn Write> = match &cmd.outfile {
        Some(p) => Box::new(std::fs::File::create(p).with_context(|| format!("create {}", p.display()))?),
        None => Box::new(std::io::stdout().lock()),
    };
    writeln!(out, "# ALINE {} alignment  A={}  B={}", aligner.kind(), cmd.a, cmd.b)?;
    if results.is_empty() {
        writeln!(out, "No alignment reached the accepted score.")?;
    }
    for (i, r) in results.iter().enumerate() {
        if cmd.all { writeln!(out, "[{}]", i + 1)?; }
        write_result(&mut out, r, cmd.morph)?;
    }
    Ok(())
}

/// One result block of the report.
fn write_result(out: &mut impl Write, r: &AlignmentResult, morph: bool) -> std::io::Result<()> {
    writeln!(out, "Score: {}   Raw: {}   Efficiency: {:.2}", r.score, r.raw_score, r.efficiency)?;
    if r.is_aligned() {
        writeln!(out, "CIGAR: {}", r.cigar())?;
        writeln!(out, "A {}", r.align_a)?;
        writeln!(out, "B {}", r.align_b)?;
        if morph {
            let (first, second) = r.morph();
            writeln!(out, "Morph: {first} / {second}")?;
        }
    } else {
        writeln!(out, "(no rendering)")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(a: &str, b: &str, morph: bool) -> String {
        let r = align(a, b, None).unwrap();
        let mut out = Vec::new();
        write_result(&mut out, &r, morph).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn morph_line_is_optional() {
        let plain = report("tenso", "tenso", false);
        assert!(plain.starts_with("Score: 100"));
        assert!(!plain.contains("Morph:"));
        let with = report("tenso", "tenso", true);
        assert!(with.contains("Morph: tenso / tenso\n"), "{with}");
    }

    #[test]
    fn morph_fills_gaps_from_the_other_word() {
        let r = align("tens", "tenso", None).unwrap();
        let (first, second) = r.morph();
        let mut out = Vec::new();
        write_result(&mut out, &r, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("Morph: {first} / {second}")), "{text}");
    }
}
