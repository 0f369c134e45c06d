#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Centralized constants used across driver, printing, and query text.
pub mod constants;
/// Interactive round driver and CLI runner.
pub mod driver;
/// Tabular output helpers.
pub mod printing;
/// Sequential selection sampling and its deterministic generator.
pub mod sampler;
/// Cross-round sampling sessions.
pub mod session;
/// Row source traits and built-in sources.
pub mod source;
/// Query text builders for relational backends.
pub mod sql;
/// Shared type aliases.
pub mod types;

mod errors;

pub use errors::SampleError;
pub use sampler::{DeterministicRng, sequential_sample};
pub use session::{RoundOutcome, SamplingSession};
pub use source::sources::{DelimitedSource, DelimitedSourceConfig};
pub use source::{InMemorySource, RowSource};
pub use types::{Position, PositionSet, Row, Seed, SourceId};
