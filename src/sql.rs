use crate::constants::sql::{NUMBERED_ALIAS, ROW_NUMBER_COLUMN, SOURCE_ALIAS};
use crate::types::Position;

/// Trims surrounding whitespace and one trailing `;` from user query text.
///
/// Generated statements nest the query as a subquery and re-terminate it, so
/// a pasted terminator would otherwise end up inside the parentheses.
pub fn normalize_query(query: &str) -> String {
    let trimmed = query.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    trimmed.trim_end().to_string()
}

/// Query selecting every row of `table`, the shorthand for sampling a whole
/// table rather than an arbitrary query.
pub fn table_query(table: &str) -> String {
    format!("select * from {table}")
}

/// Statement counting the rows `query` would produce: the population size
/// for a session against a relational backend.
pub fn count_statement(query: &str) -> String {
    format!("select count(*) from ({query}) as {SOURCE_ALIAS};")
}

/// Statement materializing the sampled positions of a query's result.
///
/// The query is wrapped in a row-numbered projection so ordinal positions
/// can be matched against a column, then filtered to `positions` (given
/// ascending, rendered comma-separated). `positions` must be non-empty; an
/// empty `in` list is not valid SQL, and no caller materializes an empty
/// round. The helper column stays in the projection; destinations drop it
/// with [`drop_rownum_statement`] when unwanted.
pub fn selection_statement(query: &str, positions: &[Position]) -> String {
    format!(
        "select * from {} where {ROW_NUMBER_COLUMN} in ({});",
        numbered_projection(query),
        position_list(positions)
    )
}

/// Statement materializing the sampled positions of a query's result into
/// the destination table `table`.
pub fn selection_into_statement(query: &str, table: &str, positions: &[Position]) -> String {
    format!(
        "select * into {table} from {} where {ROW_NUMBER_COLUMN} in ({});",
        numbered_projection(query),
        position_list(positions)
    )
}

/// Statement removing the helper column from a materialized destination table.
pub fn drop_rownum_statement(table: &str) -> String {
    format!("alter table {table} drop column {ROW_NUMBER_COLUMN};")
}

/// Statement removing a scratch table once its contents were presented.
/// Guarded with `if exists` so callers can issue it unconditionally.
pub fn drop_table_statement(table: &str) -> String {
    format!("drop table if exists {table};")
}

fn numbered_projection(query: &str) -> String {
    format!(
        "(select row_number() over () as {ROW_NUMBER_COLUMN}, * from ({query}) as {SOURCE_ALIAS}) as {NUMBERED_ALIAS}"
    )
}

fn position_list(positions: &[Position]) -> String {
    positions
        .iter()
        .map(|position| position.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
