use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::base::BinningError;

/// Identifier of a time-tagger input channel.
pub type ChannelId = u64;

/// The new arrivals on one channel since the previous update.
///
/// `micro_times` is the raw micro-time buffer the upstream source hands over;
/// only the window `[new_micro_start, new_micro_start + n_new_micro)` is new.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelUpdate {
    pub micro_times: Vec<i64>,
    pub new_micro_start: usize,
    pub n_new_micro: usize,
    /// Macro-time up to which the source has delivered data for this channel.
    pub macro_end: u64,
}

impl ChannelUpdate {
    /// An update in which every timestamp of `micro_times` is new.
    pub fn new(micro_times: Vec<i64>) -> ChannelUpdate {
        let n_new_micro = micro_times.len();
        ChannelUpdate {
            micro_times,
            new_micro_start: 0,
            n_new_micro,
            macro_end: 0,
        }
    }

    pub fn with_window(micro_times: Vec<i64>, new_micro_start: usize, n_new_micro: usize) -> ChannelUpdate {
        ChannelUpdate {
            micro_times,
            new_micro_start,
            n_new_micro,
            macro_end: 0,
        }
    }

    pub fn with_macro_end(mut self, macro_end: u64) -> ChannelUpdate {
        self.macro_end = macro_end;
        self
    }

    fn window(&self) -> Result<Range<usize>, BinningError> {
        let out_of_bounds = BinningError::BatchOutOfBounds {
            start: self.new_micro_start,
            len: self.n_new_micro,
            available: self.micro_times.len(),
        };
        let end = self
            .new_micro_start
            .checked_add(self.n_new_micro)
            .ok_or_else(|| out_of_bounds.clone())?;
        if end > self.micro_times.len() {
            return Err(out_of_bounds);
        }
        Ok(self.new_micro_start..end)
    }

    /// The newly arrived timestamps, ascending as emitted by the source.
    pub fn new_micro_times(&self) -> Result<&[i64], BinningError> {
        let window = self.window()?;
        Ok(&self.micro_times[window])
    }
}

/// All channel updates delivered by one acquisition tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    pub updates: BTreeMap<ChannelId, ChannelUpdate>,
}

impl EventBatch {
    pub fn new() -> EventBatch {
        EventBatch { updates: BTreeMap::new() }
    }

    pub fn with_channel(mut self, channel: ChannelId, update: ChannelUpdate) -> EventBatch {
        self.insert(channel, update);
        self
    }

    pub fn insert(&mut self, channel: ChannelId, update: ChannelUpdate) {
        self.updates.insert(channel, update);
    }

    pub fn get(&self, channel: ChannelId) -> Option<&ChannelUpdate> {
        self.updates.get(&channel)
    }

    pub fn is_empty(&self) -> bool {
        self.updates.values().all(|u| u.n_new_micro == 0)
    }
}
