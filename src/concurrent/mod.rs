pub mod shared_curve;

pub use self::shared_curve::SharedDecayCurve;
