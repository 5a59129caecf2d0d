//! CLI for `aline batch`: align the word pairs of a TSV file.
//! Input lines hold two tab-separated words; `#` starts a comment line.
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};
use aliners::*;
use crate::mode::ModeChoice;

#[derive(Debug, Args)]
pub struct BatchCmd {
    /// Tab-separated word pairs.
    #[arg(long, value_name="FILE")]
    pub pairs: PathBuf,
    /// Alignment kind.
    #[arg(long, value_enum, default_value_t=ModeChoice::Local)]
    pub mode: ModeChoice,
    /// TSV summary output.
    #[arg(long, default_value="aline.tsv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: BatchCmd) -> Result<()> {
    let aligner = Aligner::new(cmd.mode.into(), Parameters::default())?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_path(&cmd.pairs)
        .with_context(|| format!("open pairs: {}", cmd.pairs.display()))?;
    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(&cmd.outfile)
        .with_context(|| format!("create {}", cmd.outfile.display()))?;
    w.write_record(["a", "b", "score", "raw_score", "efficiency", "row_a", "row_b"])?;

    let (mut done, mut skipped) = (0usize, 0usize);
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("read {} record {}", cmd.pairs.display(), line + 1))?;
        let (Some(a), Some(b)) = (rec.get(0), rec.get(1)) else {
            warn!(record = line + 1, "expected two tab-separated words; skipped");
            skipped += 1;
            continue;
        };
        let r = match aligner.align(a.trim(), b.trim()) {
            Ok(r) => r,
            Err(e) => {
                warn!(record = line + 1, error = %e, "pair skipped");
                skipped += 1;
                continue;
            }
        };
        let (score, raw, eff) = (r.score.to_string(), r.raw_score.to_string(), format!("{:.4}", r.efficiency));
        w.write_record([a.trim(), b.trim(), score.as_str(), raw.as_str(), eff.as_str(), r.align_a.as_str(), r.align_b.as_str()])?;
        done += 1;
    }
    w.flush()?;
    info!(aligned = done, skipped, outfile = %cmd.outfile.display(), "batch finished");
    Ok(())
}
