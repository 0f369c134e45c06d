/// One-based ordinal position within a query's conceptually ordered result set.
/// Example: position `1` is the first row the backing query would return.
pub type Position = u64;
/// Seed value for one round's pseudo-random stream, used as generator state directly.
/// Example: `42`
pub type Seed = u64;
/// Identifier for the source that produced a population of rows.
/// Examples: `memory`, `cities.tsv`
pub type SourceId = String;
/// One materialized row, fields in column order.
/// Example: `vec!["3".into(), "Lyon".into()]`
pub type Row = Vec<String>;
/// Accumulated set of ordinal positions already drawn by a session.
pub type PositionSet = std::collections::HashSet<Position>;
