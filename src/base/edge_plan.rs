use log::debug;

use crate::base::numeric::{in_tick_domain, linspace, linspace_len};
use crate::base::CreationError;

/// Integer bin-edge layout for one session: `len` edges from `first`, `width` ticks apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EdgePlan {
    pub first: i64,
    pub width: i64,
    pub len: usize,
}

impl EdgePlan {
    /// Unit spacing over `[low, high]` unless that yields more than
    /// `max_edges` edges, in which case the spacing is widened to
    /// `ceil((high - low) / max_edges)` and further until the edges fit.
    /// Whatever count the final spacing produces is kept, even if below the ceiling.
    pub fn new(low: f64, high: f64, max_edges: i64) -> Result<EdgePlan, CreationError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(CreationError::NonFiniteRange);
        }
        if low >= high {
            return Err(CreationError::LowNotBelowHigh);
        }
        if max_edges < 2 {
            return Err(CreationError::TooFewEdges { max_edges });
        }
        let exceeds = CreationError::RangeExceedsTicks { low, high };
        if !in_tick_domain(low, high) {
            return Err(exceeds);
        }

        let mut width = 1_i64;
        let mut len = linspace_len(low, high, width);

        if len > max_edges {
            let initial = ((high - low) / max_edges as f64).ceil().max(1.0);
            if initial >= i64::MAX as f64 {
                return Err(exceeds);
            }
            width = initial as i64;
            len = linspace_len(low, high, width);
            while len > max_edges {
                width = width.checked_add(1).ok_or_else(|| exceeds.clone())?;
                len = linspace_len(low, high, width);
            }
            debug!("edge ceiling {} forces spacing {} ({} edges)", max_edges, width, len);
        }

        if len < 2 {
            return Err(CreationError::DegenerateRange { low, high });
        }

        let first = low.ceil() as i64;
        (len - 1)
            .checked_mul(width)
            .and_then(|span| first.checked_add(span))
            .ok_or(exceeds)?;

        Ok(EdgePlan {
            first,
            width,
            len: len as usize,
        })
    }

    pub fn edges(&self) -> Vec<i64> {
        linspace(self.first, self.width, self.len)
    }

    pub fn last(&self) -> i64 {
        self.first + (self.len as i64 - 1) * self.width
    }
}
