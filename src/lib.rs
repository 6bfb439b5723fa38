pub mod analyzer;
pub mod boundary;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod plan;
pub mod resolver;
pub mod ui;

pub use error::{ResolverError, Result};
pub use resolver::{parse_suggestion, resolve, ResolveRequest, Strategy, VersionDecision};
