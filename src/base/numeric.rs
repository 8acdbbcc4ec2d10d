//! Fixed-point numeric primitives the decay curve is built on: integer
//! linspace, sequential binning of sorted timestamps and contiguous rebinning.

use crate::base::{BinningError, Counter, ProjectionError};

/// Whether every integer tick of `[low, high]` is representable as `i64`.
pub fn in_tick_domain(low: f64, high: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    low >= i64::MIN as f64 && high < i64::MAX as f64
}

/// Number of integer edges `ceil(low), ceil(low) + width, ...` that fit in `[low, high]`.
pub fn linspace_len(low: f64, high: f64, width: i64) -> i64 {
    if width < 1 || !low.is_finite() || !high.is_finite() {
        return 0;
    }
    let first = low.ceil();
    let top = high.floor();
    if first > top {
        return 0;
    }
    let steps = (top as i128).saturating_sub(first as i128) / i128::from(width);
    i64::try_from(steps.saturating_add(1)).unwrap_or(i64::MAX)
}

/// The `len` edges starting at `first` spaced `width` apart. Stops early
/// rather than wrap past `i64::MAX`.
pub fn linspace(first: i64, width: i64, len: usize) -> Vec<i64> {
    std::iter::successors(Some(first), |&e| e.checked_add(width))
        .take(len)
        .collect()
}

pub fn check_edges(edges: &[i64]) -> Result<(), BinningError> {
    if edges.len() < 2 || edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(BinningError::MalformedEdges);
    }
    Ok(())
}

#[inline(always)]
fn locate(edges: &[i64], hint: usize, value: i64) -> Option<usize> {
    let last = edges.len() - 1;
    if value < edges[0] || value >= edges[last] {
        return None;
    }
    if hint < last && edges[hint] <= value && value < edges[hint + 1] {
        return Some(hint);
    }
    if hint + 1 < last && edges[hint + 1] <= value && value < edges[hint + 2] {
        return Some(hint + 1);
    }
    Some(edges.partition_point(|&e| e <= value) - 1)
}

/// Adds every timestamp of `data` to the bucket `[edges[i], edges[i + 1])` it
/// falls in. Timestamps outside `[edges[0], edges[last])` are dropped.
///
/// `data` is expected ascending, which keeps the lookup sequential; unsorted
/// input is still binned correctly, only slower. Either all of `data` lands in
/// `counts` or, on error, `counts` is left untouched. Returns how many
/// timestamps were binned.
pub fn bin_sequential<C: Counter>(edges: &[i64], data: &[i64], counts: &mut [C]) -> Result<u64, BinningError> {
    check_edges(edges)?;
    if counts.len() != edges.len() - 1 {
        return Err(BinningError::CountsLengthMismatch {
            expected: edges.len() - 1,
            actual: counts.len(),
        });
    }

    let mut increments = vec![0_u64; counts.len()];
    let mut binned = 0_u64;
    let mut hint = 0;
    for &t in data {
        if let Some(bin) = locate(edges, hint, t) {
            increments[bin] += 1;
            binned += 1;
            hint = bin;
        }
    }

    // verify every bucket first so a failure never leaves a partial fold behind
    for (bin, (count, &inc)) in counts.iter().zip(increments.iter()).enumerate() {
        if inc == 0 {
            continue;
        }
        C::from_u64(inc)
            .and_then(|inc| count.checked_add(&inc))
            .ok_or(BinningError::CountOverflow { bin })?;
    }
    for (count, &inc) in counts.iter_mut().zip(increments.iter()) {
        if inc != 0 {
            if let Some(inc) = C::from_u64(inc) {
                *count += inc;
            }
        }
    }
    Ok(binned)
}

/// Length of `len` counts merged in groups of `width`; a trailing partial group counts.
pub fn rebin_len(len: usize, width: u64) -> usize {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    (len + width - 1) / width
}

/// Edges bounding the groups of [`rebin_len`]: every `width`-th edge plus the
/// closing edge of a trailing partial group.
pub fn rebin_bin_edges_len(edges_len: usize, width: u64) -> usize {
    if edges_len == 0 {
        return 0;
    }
    rebin_len(edges_len - 1, width) + 1
}

/// Sum of `counts`, pinned at `u64::MAX`.
pub fn saturating_total<C: Counter>(counts: &[C]) -> u64 {
    counts.iter().fold(0_u64, |acc, c| acc.saturating_add(c.as_u64()))
}

pub fn rebin<C: Counter>(counts: &[C], width: u64, out: &mut [u64]) -> Result<(), ProjectionError> {
    if width == 0 {
        return Err(ProjectionError::ZeroBinWidth);
    }
    let expected = rebin_len(counts.len(), width);
    if out.len() != expected {
        return Err(ProjectionError::OutputLengthMismatch { expected, actual: out.len() });
    }
    for (bin, (slot, group)) in out.iter_mut().zip(counts.chunks(width as usize)).enumerate() {
        *slot = group
            .iter()
            .try_fold(0_u64, |acc, c| acc.checked_add(c.as_u64()))
            .ok_or(ProjectionError::CountOverflow { bin })?;
    }
    Ok(())
}

pub fn rebin_bin_edges(edges: &[i64], width: u64, out: &mut [i64]) -> Result<(), ProjectionError> {
    if width == 0 {
        return Err(ProjectionError::ZeroBinWidth);
    }
    let expected = rebin_bin_edges_len(edges.len(), width);
    if out.len() != expected {
        return Err(ProjectionError::OutputLengthMismatch { expected, actual: out.len() });
    }
    if let Some(last) = edges.len().checked_sub(1) {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = edges[(i * width as usize).min(last)];
        }
    }
    Ok(())
}
