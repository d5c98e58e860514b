//! Liquidity distribution reconstruction from mint/burn history.
//!
//! Every mint and burn event contributes a signed liquidity delta at
//! its two boundary ticks (`+L` at the lower, `-L` at the upper).
//! Folding all deltas visible at a cursor and prefix-summing them in
//! tick order yields the pool's liquidity curve: a contiguous run of
//! half-open `[lower, upper)` segments, each holding the liquidity
//! active while the price sits inside it.

use std::collections::BTreeMap;

use tracing::trace;

use crate::domain::{Cursor, Liquidity, LiquidityEvent, Tick};
use crate::error::ReplayError;
use crate::math::max_aligned_tick;

/// Residue below this magnitude is float noise from summing many
/// deltas, not real liquidity.
const LIQUIDITY_EPSILON: f64 = 1e-6;

/// One half-open `[lower, upper)` run of constant liquidity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSegment {
    pub lower: Tick,
    pub upper: Tick,
    pub liquidity: Liquidity,
}

impl TickSegment {
    /// Whether `tick` falls inside the half-open range.
    #[must_use]
    pub fn contains(&self, tick: Tick) -> bool {
        self.lower <= tick && tick < self.upper
    }
}

/// The pool's liquidity curve at one point in log time.
///
/// Segments are sorted ascending and contiguous: each segment's upper
/// bound is the next segment's lower bound, and the last upper bound
/// is the largest grid-aligned tick. Gaps where no position is active
/// appear as zero-liquidity segments rather than being elided, so a
/// tick range is never credited with a neighbor's reserves.
#[derive(Debug, Clone, PartialEq)]
pub struct LiquidityDistribution {
    segments: Vec<TickSegment>,
    tick_spacing: i32,
}

impl LiquidityDistribution {
    /// Folds all mint/burn events strictly before `as_of` into a
    /// liquidity curve.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyDistribution`] if no tick holds positive
    ///   liquidity at `as_of`.
    /// - [`ReplayError::CorruptEventLog`] if the cumulative liquidity
    ///   goes below `-1e-6` at any tick, or does not return to zero
    ///   (within `1e-6`) after the last populated tick. Burns
    ///   exceeding prior mints cannot be represented and are never
    ///   clamped away.
    /// - [`ReplayError::InvalidTick`] for non-positive `tick_spacing`.
    pub fn build(
        events: &[LiquidityEvent],
        as_of: Cursor,
        tick_spacing: i32,
    ) -> crate::error::Result<Self> {
        let sentinel = max_aligned_tick(tick_spacing)?;

        // Net signed delta per boundary tick, over the visible prefix
        // of the log.
        let mut net_deltas: BTreeMap<i32, f64> = BTreeMap::new();
        for event in events.iter().filter(|e| e.cursor < as_of) {
            let delta = event.signed_liquidity();
            *net_deltas.entry(event.tick_lower.get()).or_insert(0.0) += delta;
            *net_deltas.entry(event.tick_upper.get()).or_insert(0.0) -= delta;
        }
        // Fully-reverted boundary ticks carry no information.
        net_deltas.retain(|_, delta| *delta != 0.0);

        if net_deltas.is_empty() {
            return Err(ReplayError::EmptyDistribution);
        }

        let boundaries: Vec<(i32, f64)> = net_deltas.into_iter().collect();
        let mut segments = Vec::with_capacity(boundaries.len());
        let mut cumulative = 0.0_f64;
        let mut any_positive = false;

        for (index, &(tick, delta)) in boundaries.iter().enumerate() {
            cumulative += delta;
            if cumulative < -LIQUIDITY_EPSILON {
                return Err(ReplayError::CorruptEventLog(
                    "negative cumulative liquidity",
                ));
            }
            let lower = Tick::new(tick)?;
            let upper = match boundaries.get(index + 1) {
                Some(&(next_tick, _)) => Tick::new(next_tick)?,
                None => sentinel,
            };
            // Only the last boundary can coincide with the sentinel;
            // its cumulative is zero by the trailing check below.
            if lower >= upper {
                continue;
            }
            let liquidity = Liquidity::new(cumulative.max(0.0))?;
            any_positive |= liquidity.get() > 0.0;
            segments.push(TickSegment {
                lower,
                upper,
                liquidity,
            });
        }

        if cumulative.abs() > LIQUIDITY_EPSILON {
            return Err(ReplayError::CorruptEventLog(
                "liquidity outlives the last boundary tick",
            ));
        }
        if !any_positive {
            return Err(ReplayError::EmptyDistribution);
        }

        trace!(
            as_of = %as_of,
            segments = segments.len(),
            "built liquidity distribution"
        );

        Ok(Self {
            segments,
            tick_spacing,
        })
    }

    /// The contiguous ascending segments of the curve.
    #[must_use]
    pub fn segments(&self) -> &[TickSegment] {
        &self.segments
    }

    #[must_use]
    pub const fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    /// Index of the segment whose half-open range covers `tick`, if
    /// the curve covers it at all.
    #[must_use]
    pub fn segment_index_at(&self, tick: Tick) -> Option<usize> {
        let candidate = self
            .segments
            .partition_point(|s| s.lower <= tick)
            .checked_sub(1)?;
        self.segments
            .get(candidate)
            .filter(|s| s.contains(tick))
            .map(|_| candidate)
    }

    /// Active liquidity at `tick`; zero outside the populated range.
    #[must_use]
    pub fn liquidity_at(&self, tick: Tick) -> Liquidity {
        self.segment_index_at(tick)
            .and_then(|i| self.segments.get(i))
            .map_or(Liquidity::ZERO, |s| s.liquidity)
    }
}
