use serde::{Deserialize, Serialize};

use crate::base::numeric;
use crate::base::*;

/// Immutable configuration of one decay-curve session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveSettings {
    pub channels_to_sum: Vec<ChannelId>,
    /// Display coarsening factor, 1 means no coarsening.
    pub bin_width: u64,
    pub bin_low: f64,
    pub bin_high: f64,
    /// Ceiling on the number of fine bin edges.
    pub max_num_histogram_bins: i64,
    /// Seconds per raw tick.
    pub time_unit: f64,
    #[serde(default)]
    pub display_only_initial_data: bool,
    #[serde(default)]
    pub sender: SenderId,
}

macro_rules! expect {
    ($t:expr, $e:expr) => {
        if $t { return Err($e); }
    };
}

impl CurveSettings {
    pub fn new(
        channels_to_sum: Vec<ChannelId>,
        bin_width: u64,
        bin_low: f64,
        bin_high: f64,
        max_num_histogram_bins: i64,
        time_unit: f64,
    ) -> Result<CurveSettings, CreationError> {
        let s = CurveSettings {
            channels_to_sum,
            bin_width,
            bin_low,
            bin_high,
            max_num_histogram_bins,
            time_unit,
            display_only_initial_data: false,
            sender: SenderId::default(),
        };
        s.validate()?;
        Ok(s)
    }

    pub fn with_sender(mut self, sender: SenderId) -> CurveSettings {
        self.sender = sender;
        self
    }

    pub fn with_display_only_initial_data(mut self, display_only_initial_data: bool) -> CurveSettings {
        self.display_only_initial_data = display_only_initial_data;
        self
    }

    /// Checks everything that can be checked before edges are planned.
    /// Settings deserialized from a host config bypass `new`, so sessions
    /// call this again on construction.
    pub fn validate(&self) -> Result<(), CreationError> {
        expect!(
            !self.bin_low.is_finite() || !self.bin_high.is_finite(),
            CreationError::NonFiniteRange
        );
        expect!(self.bin_low >= self.bin_high, CreationError::LowNotBelowHigh);
        expect!(
            !numeric::in_tick_domain(self.bin_low, self.bin_high),
            CreationError::RangeExceedsTicks { low: self.bin_low, high: self.bin_high }
        );
        expect!(
            self.max_num_histogram_bins < 2,
            CreationError::TooFewEdges { max_edges: self.max_num_histogram_bins }
        );
        expect!(self.bin_width < 1, CreationError::ZeroBinWidth);
        expect!(
            !self.time_unit.is_finite() || self.time_unit <= 0.0,
            CreationError::InvalidTimeUnit
        );
        Ok(())
    }

    /// Raw tick position in nanoseconds.
    #[inline(always)]
    pub fn tick_to_ns(&self, tick: i64) -> f64 {
        tick as f64 * self.time_unit * 1e9
    }
}
