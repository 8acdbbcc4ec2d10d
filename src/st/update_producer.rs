use std::collections::BTreeMap;

use crate::base::{BinningError, ChannelId, DisplayFrame, EventBatch, UpdateError};

/// Diagnostics of one fold step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FoldReport {
    /// Timestamps that landed in a bin.
    pub binned: u64,
    /// Timestamps outside the histogram domain.
    pub dropped: u64,
    /// Channels whose contribution was discarded.
    pub failures: Vec<(ChannelId, BinningError)>,
}

impl FoldReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateOutcome {
    pub frame: DisplayFrame,
    pub report: FoldReport,
}

/// Anything the view layer can ask for a fresh frame on every acquisition tick.
pub trait UpdateProducer {
    /// Consumes `batch` (ignored when `rebin_only`) and returns the frame to show.
    fn arrange_update(&mut self, batch: &EventBatch, rebin_only: bool) -> Result<UpdateOutcome, UpdateError>;

    fn clear_data(&mut self);

    /// Per channel, the macro time before which upstream may discard raw data.
    fn times_to_save(&self, batch: &EventBatch) -> BTreeMap<ChannelId, u64>;
}
