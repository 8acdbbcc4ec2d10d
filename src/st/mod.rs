pub mod decay_curve;
pub mod update_producer;

pub use self::decay_curve::DecayCurve;
pub use self::update_producer::{FoldReport, UpdateOutcome, UpdateProducer};
