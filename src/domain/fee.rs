//! Swap fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// A swap fee expressed in parts per million.
///
/// The canonical v3 tiers are 100 (0.01%), 500 (0.05%), 3000 (0.3%)
/// and 10000 (1%), but any value below one million is accepted since
/// forks deploy arbitrary tiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct FeePpm(u32);

impl FeePpm {
    /// Denominator of the ppm scale.
    const SCALE: u32 = 1_000_000;

    /// The 0.3% tier, the most common deployment.
    pub const STANDARD: Self = Self(3000);

    /// Creates a new fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidAmount`] if the rate is one
    /// million ppm (100%) or more.
    pub const fn new(ppm: u32) -> crate::error::Result<Self> {
        if ppm >= Self::SCALE {
            return Err(ReplayError::InvalidAmount(
                "fee must be below 1_000_000 ppm",
            ));
        }
        Ok(Self(ppm))
    }

    /// Returns the raw ppm value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The fee as a fraction in `[0, 1)`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    /// The fraction of an input amount kept after the fee, `1 - fee`.
    #[must_use]
    pub fn complement(&self) -> f64 {
        1.0 - self.fraction()
    }
}

impl fmt::Display for FeePpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ppm", self.0)
    }
}
