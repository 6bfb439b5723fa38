//! Analysis engine for suggesting version bumps from commits

pub mod commit_analyzer;

pub use commit_analyzer::{CommitAnalysis, CommitAnalyzer};
