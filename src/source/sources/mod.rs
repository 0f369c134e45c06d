/// Delimited-text-file row source implementation.
pub mod delimited_source;

pub use delimited_source::{DelimitedSource, DelimitedSourceConfig};
