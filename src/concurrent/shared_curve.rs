use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::base::*;
use crate::serialization::CurveSnapshot;
use crate::st::{DecayCurve, UpdateOutcome, UpdateProducer};

/// A [`DecayCurve`] several producers can feed. Every call takes the lock for
/// its whole duration, so updates are applied one at a time in lock order.
pub struct SharedDecayCurve<C = u64> {
    inner: Arc<Mutex<DecayCurve<C>>>,
}

impl<C> Clone for SharedDecayCurve<C> {
    fn clone(&self) -> Self {
        SharedDecayCurve {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Counter> SharedDecayCurve<C> {
    pub fn new(settings: CurveSettings) -> Result<SharedDecayCurve<C>, CreationError> {
        DecayCurve::new(settings).map(SharedDecayCurve::from_curve)
    }

    pub fn from_curve(curve: DecayCurve<C>) -> SharedDecayCurve<C> {
        SharedDecayCurve {
            inner: Arc::new(Mutex::new(curve)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, DecayCurve<C>> {
        self.inner.lock()
    }

    pub fn arrange_update(&self, batch: &EventBatch, rebin_only: bool) -> Result<UpdateOutcome, UpdateError> {
        self.inner.lock().arrange_update(batch, rebin_only)
    }

    pub fn clear_data(&self) {
        self.inner.lock().clear_data()
    }

    pub fn times_to_save(&self, batch: &EventBatch) -> BTreeMap<ChannelId, u64> {
        self.inner.lock().times_to_save(batch)
    }

    pub fn snapshot(&self) -> CurveSnapshot<C> {
        CurveSnapshot::of(&*self.inner.lock())
    }
}

impl<C: Counter> UpdateProducer for SharedDecayCurve<C> {
    fn arrange_update(&mut self, batch: &EventBatch, rebin_only: bool) -> Result<UpdateOutcome, UpdateError> {
        SharedDecayCurve::arrange_update(self, batch, rebin_only)
    }

    fn clear_data(&mut self) {
        SharedDecayCurve::clear_data(self)
    }

    fn times_to_save(&self, batch: &EventBatch) -> BTreeMap<ChannelId, u64> {
        SharedDecayCurve::times_to_save(self, batch)
    }
}
