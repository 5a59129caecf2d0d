//! Alignment mode selection shared by the subcommands.
use clap::ValueEnum;
use aliners::AlignerKind;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeChoice { Local, SemiGlobal, Global }

impl From<ModeChoice> for AlignerKind {
    fn from(m: ModeChoice) -> Self {
        match m {
            ModeChoice::Local => AlignerKind::Local,
            ModeChoice::SemiGlobal => AlignerKind::SemiGlobal,
            ModeChoice::Global => AlignerKind::Global,
        }
    }
}
