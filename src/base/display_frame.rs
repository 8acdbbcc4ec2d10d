use serde::{Deserialize, Serialize};

use crate::base::ChannelId;

/// Opaque handle the view layer resolves to the widget that asked for an update.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct SenderId(pub u64);

/// What a frame's counts were gathered from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FrameChannel {
    /// Sum over every configured channel.
    Aggregate,
    Channel(ChannelId),
}

/// One refresh of a decay-curve plot. `xs` are bin edges in nanoseconds, so
/// `xs.len() == ys.len() + 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayFrame {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub channel: FrameChannel,
    pub sender: SenderId,
}

impl DisplayFrame {
    pub fn total(&self) -> f64 {
        self.ys.iter().sum()
    }

    pub fn bin_count(&self) -> usize {
        self.ys.len()
    }
}
