use crate::types::Seed;

/// Constants used by driver defaults and seed handling.
pub mod defaults {
    use super::Seed;

    /// Seed reported as "previous" before any round has set one.
    pub const INITIAL_SEED: Seed = 0;
    /// Field delimiter assumed for delimited sources unless overridden.
    pub const DEFAULT_DELIMITER: char = '\t';
}

/// Constants used by generated query text.
pub mod sql {
    /// Name of the helper column carrying the row-numbered projection.
    pub const ROW_NUMBER_COLUMN: &str = "rownum";
    /// Alias for the user's query when nested as a subquery.
    pub const SOURCE_ALIAS: &str = "src";
    /// Alias for the row-numbered projection wrapping the user's query.
    pub const NUMBERED_ALIAS: &str = "numbered";
}

/// Constants used by tabular output.
pub mod printing {
    /// Separator placed between fields of a printed row.
    pub const COLUMN_SEPARATOR: char = '\t';
    /// Prefix used when synthesizing column names for headerless sources.
    pub const SYNTHETIC_COLUMN_PREFIX: &str = "c";
}
