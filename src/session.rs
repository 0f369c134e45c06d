use tracing::debug;

use crate::errors::SampleError;
use crate::sampler::sequential_sample;
use crate::types::{Position, PositionSet, Seed};

/// Outcome of one completed sampling round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    requested: u64,
    positions: Vec<Position>,
}

impl RoundOutcome {
    /// Sample size the caller asked for, before any clamping.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Sample size actually drawn (`requested` unless the round clamped).
    pub fn actual(&self) -> u64 {
        self.positions.len() as u64
    }

    /// True when the request exceeded the remaining population and was reduced.
    pub fn clamped(&self) -> bool {
        self.actual() < self.requested
    }

    /// Drawn ordinal positions, ascending.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Consumes the outcome, returning the drawn positions.
    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }
}

/// Cross-round sampling state for one logical query.
///
/// Owns the fixed population size and the set of ordinal positions already
/// drawn. A position returned by one round is never returned by a later
/// round of the same session; the remaining count is recomputed from the
/// exclusion set rather than stored separately. Sessions are fully
/// independent of each other, with no shared or global state.
#[derive(Debug, Clone)]
pub struct SamplingSession {
    total: u64,
    excluded: PositionSet,
}

impl SamplingSession {
    /// Creates a session over a population of `total` ordinal positions.
    pub fn new(total: u64) -> Self {
        debug!(total, "sampling session created");
        Self {
            total,
            excluded: PositionSet::new(),
        }
    }

    /// Population size the session was created with.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count of positions not yet drawn by any round of this session.
    pub fn remaining(&self) -> u64 {
        self.total - self.excluded.len() as u64
    }

    /// True once every position has been drawn; further rounds are rejected.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Positions drawn so far, across all rounds.
    pub fn sampled(&self) -> &PositionSet {
        &self.excluded
    }

    /// Draws one round of up to `requested` new positions.
    ///
    /// The request is clamped to the remaining count; [`RoundOutcome::clamped`]
    /// reports when that happened. Clamping is a normal outcome, not an error.
    /// Drawing on an exhausted session fails with [`SampleError::Exhausted`]
    /// and leaves the session untouched. `requested == 0` on a non-exhausted
    /// session is a valid empty round.
    pub fn draw_round(
        &mut self,
        requested: u64,
        seed: Seed,
    ) -> Result<RoundOutcome, SampleError> {
        let remaining = self.remaining();
        if remaining == 0 {
            return Err(SampleError::Exhausted(format!(
                "all {} positions already drawn",
                self.total
            )));
        }
        let actual = requested.min(remaining);
        let positions = sequential_sample(remaining, actual, seed, &self.excluded);
        self.excluded.extend(positions.iter().copied());
        debug!(
            requested,
            actual,
            remaining = self.remaining(),
            "sampling round completed"
        );
        Ok(RoundOutcome {
            requested,
            positions,
        })
    }
}
