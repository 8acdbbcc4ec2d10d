use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::base::numeric::{self, bin_sequential};
use crate::base::*;
use crate::serialization::CurveSnapshot;
use crate::st::update_producer::{FoldReport, UpdateOutcome, UpdateProducer};

/// Streaming decay-curve accumulator.
///
/// Raw micro-times of the configured channels are folded into one
/// fine-resolution histogram whose edges are planned on the first update of a
/// session. Every update then projects that histogram, coarsened by the
/// configured bin width, onto a [`DisplayFrame`]. Coarsening never touches the
/// fine counts, so the bin width of the view can change without rescanning data.
#[derive(Clone, Debug)]
pub struct DecayCurve<C = u64> {
    pub meta_data: CurveMetaData,
    settings: CurveSettings,
    edges: Vec<i64>,
    counts: Vec<C>,
    data_displayed: bool,
}

// read methods
impl<C: Counter> DecayCurve<C> {
    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    pub fn edges(&self) -> &[i64] {
        &self.edges
    }

    pub fn counts(&self) -> &[C] {
        &self.counts
    }

    /// False before the first update of a session and after [`clear_data`](Self::clear_data).
    pub fn is_initialized(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn data_displayed(&self) -> bool {
        self.data_displayed
    }

    /// Sum of all fine counts, pinned at `u64::MAX`.
    pub fn total_count(&self) -> u64 {
        numeric::saturating_total(&self.counts)
    }

    pub fn get_count_at_value(&self, value: i64) -> Option<C> {
        let last = self.edges.len().checked_sub(1)?;
        if value < self.edges[0] || value >= self.edges[last] {
            return None;
        }
        let idx = self.edges.partition_point(|&e| e <= value) - 1;
        self.counts.get(idx).copied()
    }

    /// Derives the display view of the current state, coarsened by the
    /// configured bin width, with edges converted to nanoseconds.
    pub fn project(&self) -> Result<DisplayFrame, ProjectionError> {
        let bin_width = self.settings.bin_width;

        let (xs, ys) = if bin_width == 1 {
            (
                self.edges.iter().map(|&e| self.settings.tick_to_ns(e)).collect(),
                self.counts.iter().map(Counter::as_f64).collect(),
            )
        } else {
            let mut use_xs = vec![0_i64; numeric::rebin_bin_edges_len(self.edges.len(), bin_width)];
            let mut use_ys = vec![0_u64; numeric::rebin_len(self.counts.len(), bin_width)];
            numeric::rebin(&self.counts, bin_width, &mut use_ys)?;
            numeric::rebin_bin_edges(&self.edges, bin_width, &mut use_xs)?;
            (
                use_xs.into_iter().map(|e| self.settings.tick_to_ns(e)).collect(),
                use_ys.into_iter().map(|c| c as f64).collect(),
            )
        };

        Ok(DisplayFrame {
            xs,
            ys,
            channel: FrameChannel::Aggregate,
            sender: self.settings.sender,
        })
    }
}

// write methods
impl<C: Counter> DecayCurve<C> {
    pub fn new(settings: CurveSettings) -> Result<DecayCurve<C>, CreationError> {
        settings.validate()?;
        Ok(DecayCurve {
            meta_data: CurveMetaData::new(),
            settings,
            edges: Vec::new(),
            counts: Vec::new(),
            data_displayed: false,
        })
    }

    /// Resumes a session from a snapshot taken under compatible settings.
    pub fn from_snapshot(settings: CurveSettings, snapshot: CurveSnapshot<C>) -> Result<DecayCurve<C>, DeserializationError> {
        let mut curve = DecayCurve::new(settings.clone()).map_err(DeserializationError::InvalidSettings)?;
        let CurveSnapshot { edges, counts } = snapshot;
        numeric::check_edges(&edges).map_err(DeserializationError::InvalidEdges)?;
        if counts.len() != edges.len() - 1 {
            return Err(DeserializationError::InvalidEdges(BinningError::CountsLengthMismatch {
                expected: edges.len() - 1,
                actual: counts.len(),
            }));
        }
        let (first, last) = (edges[0], edges[edges.len() - 1]);
        if (first as f64) < settings.bin_low || (last as f64) > settings.bin_high {
            return Err(DeserializationError::EdgesOutsideRange { first, last });
        }
        if edges.len() as i64 > settings.max_num_histogram_bins {
            return Err(DeserializationError::ExceedsEdgeCeiling {
                edges: edges.len(),
                max_edges: settings.max_num_histogram_bins,
            });
        }
        curve.edges = edges;
        curve.counts = counts;
        curve.meta_data.set_start_now();
        Ok(curve)
    }

    /// Returns the session to the uninitialized state: edges, counts and the
    /// displayed flag all go, the next update plans edges afresh.
    pub fn clear_data(&mut self) {
        debug!("clearing decay curve for {:?}", self.settings.sender);
        self.edges.clear();
        self.counts.clear();
        self.data_displayed = false;
        self.meta_data.clear();
    }

    fn establish_edges(&mut self) -> Result<(), CreationError> {
        if self.is_initialized() {
            return Ok(());
        }
        let plan = EdgePlan::new(
            self.settings.bin_low,
            self.settings.bin_high,
            self.settings.max_num_histogram_bins,
        )?;
        debug!(
            "planned {} edges over [{}, {}] with spacing {}",
            plan.len, plan.first, plan.last(), plan.width
        );
        self.edges = plan.edges();
        self.counts = vec![C::zero(); self.edges.len() - 1];
        self.meta_data.set_start_now();
        Ok(())
    }

    /// Adds the new timestamps of every configured channel in `batch`.
    ///
    /// Channels that are not summed, or that carry nothing new, are skipped.
    /// A channel whose timestamps cannot be binned contributes nothing and is
    /// reported; the remaining channels are still folded.
    pub fn fold(&mut self, batch: &EventBatch) -> Result<FoldReport, CreationError> {
        self.establish_edges()?;

        let mut report = FoldReport::default();
        for &chan in self.settings.channels_to_sum.iter() {
            let update = match batch.get(chan) {
                Some(u) if u.n_new_micro != 0 => u,
                _ => continue,
            };

            let res = update
                .new_micro_times()
                .and_then(|data| bin_sequential(&self.edges, data, &mut self.counts));

            match res {
                Ok(binned) => {
                    trace!("channel {}: {} of {} timestamps binned", chan, binned, update.n_new_micro);
                    report.binned += binned;
                    report.dropped += update.n_new_micro as u64 - binned;
                }
                Err(e) => {
                    warn!("error binning decay data on channel {}: {}", chan, e);
                    report.failures.push((chan, e));
                }
            }
        }
        self.meta_data.set_end_now();
        Ok(report)
    }

    /// Plans edges if needed, folds `batch` unless this is a display-only
    /// refresh, and projects the result.
    pub fn arrange_update(&mut self, batch: &EventBatch, rebin_only: bool) -> Result<UpdateOutcome, UpdateError> {
        let rebin_only = rebin_only || (self.settings.display_only_initial_data && self.data_displayed);

        let report = if rebin_only {
            self.establish_edges()?;
            FoldReport::default()
        } else {
            self.fold(batch)?
        };

        let frame = self.project()?;
        self.data_displayed = true;
        Ok(UpdateOutcome { frame, report })
    }

    /// Nothing raw is retained between updates, so every channel's data up to
    /// its macro end may be discarded upstream.
    pub fn times_to_save(&self, batch: &EventBatch) -> BTreeMap<ChannelId, u64> {
        batch.updates.iter().map(|(&chan, update)| (chan, update.macro_end)).collect()
    }
}

impl<C: Counter> ReadableCurve for DecayCurve<C> {
    type Count = C;

    fn edges(&self) -> &[i64] {
        &self.edges
    }
    fn counts(&self) -> &[C] {
        &self.counts
    }
    fn meta_data(&self) -> &CurveMetaData {
        &self.meta_data
    }
}

impl<C: Counter> UpdateProducer for DecayCurve<C> {
    fn arrange_update(&mut self, batch: &EventBatch, rebin_only: bool) -> Result<UpdateOutcome, UpdateError> {
        DecayCurve::arrange_update(self, batch, rebin_only)
    }

    fn clear_data(&mut self) {
        DecayCurve::clear_data(self)
    }

    fn times_to_save(&self, batch: &EventBatch) -> BTreeMap<ChannelId, u64> {
        DecayCurve::times_to_save(self, batch)
    }
}

impl<C: Counter> PartialEq for DecayCurve<C> {
    fn eq(&self, other: &Self) -> bool {
        self.settings == other.settings && self.edges == other.edges && self.counts == other.counts
    }
}
