//! Benchmark corpora
//!
//! Each benchmark reads JSON Lines files laid out as
//! `<data_dir>/<benchmark>/<split>.jsonl`, one typed sample per line.

mod loader;
mod samples;

pub use loader::CorpusLoader;
pub use samples::{Gsm8kSample, HumanEvalSample, MathSample, MmluSample};
