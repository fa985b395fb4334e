//! Committed band: a narrower display view of an estimated range.
//!
//! The output is wrapped in [`CommittedRange`] so it cannot be passed where an
//! estimation input is expected. Only [`CommittedRange::as_range`] exposes the
//! numbers, for rendering.

use landed_core::MoneyRange;
use serde::{Deserialize, Serialize};

struct TightenBand {
    min_samples: usize,
    /// Half-width as a fraction of the original spread
    shrink: f64,
    clamp_ratio: f64,
}

const TIGHTEN_BANDS: &[TightenBand] = &[
    TightenBand { min_samples: 30, shrink: 0.15, clamp_ratio: 1.6 },
    TightenBand { min_samples: 10, shrink: 0.12, clamp_ratio: 1.7 },
    TightenBand { min_samples: 0, shrink: 0.20, clamp_ratio: 1.8 },
];

/// Display-only range derived from an estimation band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommittedRange(MoneyRange);

impl CommittedRange {
    pub fn as_range(&self) -> &MoneyRange {
        &self.0
    }
}

/// Shrink `range` around its midpoint according to how many samples backed it
pub fn tighten(range: &MoneyRange, sample_count: usize) -> CommittedRange {
    let band = TIGHTEN_BANDS
        .iter()
        .find(|b| sample_count >= b.min_samples)
        .unwrap_or(&TIGHTEN_BANDS[TIGHTEN_BANDS.len() - 1]);

    let mid = range.mid();
    let half = band.shrink * range.spread();
    let shrunk = MoneyRange::new(mid - half, mid + half)
        .with_currency(range.currency.clone(), range.unit.clone());

    CommittedRange(shrunk.clamp_ratio(band.clamp_ratio))
}
