use crate::base::numeric;
use crate::base::{Counter, CurveMetaData};

/// Read access to fine-resolution session state.
pub trait ReadableCurve {
    type Count: Counter;

    fn edges(&self) -> &[i64];
    fn counts(&self) -> &[Self::Count];
    fn meta_data(&self) -> &CurveMetaData;

    /// Saturates at `u64::MAX`.
    fn total_count(&self) -> u64 {
        numeric::saturating_total(self.counts())
    }
}
