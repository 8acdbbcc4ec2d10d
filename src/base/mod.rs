pub mod errors;
pub mod curve_settings;
pub mod counter;
pub mod numeric;
pub mod edge_plan;
pub mod event_batch;
pub mod display_frame;
pub mod meta_data;
pub mod readable_curve;

pub use self::counter::Counter;

pub use self::curve_settings::CurveSettings;
pub use self::display_frame::{DisplayFrame, FrameChannel, SenderId};
pub use self::edge_plan::EdgePlan;
pub use self::errors::*;
pub use self::event_batch::{ChannelId, ChannelUpdate, EventBatch};
pub use self::meta_data::CurveMetaData;
pub use self::readable_curve::ReadableCurve;
