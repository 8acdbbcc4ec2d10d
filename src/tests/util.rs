use crate::base::*;

macro_rules! succ {
    ($e:expr) => {
        assert!($e.is_ok());
    }
}

macro_rules! assert_approx_eq {
    ($e:expr, $v:expr, $t:expr) => {
        assert!(($e as f64 - $v as f64).abs() <= $t as f64, "{} !~= {} within {}", $e, $v, $t)
    }
}

pub const TIME_UNIT: f64 = 1e-12;
pub const CHAN: ChannelId = 1;

pub fn settings(low: f64, high: f64, max_edges: i64, bin_width: u64) -> CurveSettings {
    CurveSettings::new(vec![CHAN], bin_width, low, high, max_edges, TIME_UNIT).unwrap()
}

pub fn batch(chan: ChannelId, times: &[i64]) -> EventBatch {
    EventBatch::new().with_channel(chan, ChannelUpdate::new(times.to_vec()))
}
