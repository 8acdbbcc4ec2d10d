pub mod zigzag;
pub mod snapshot;
pub mod compression;
pub mod constants;

pub use self::compression::{Compressor, Decompressor};
pub use self::snapshot::{CurveSnapshot, SerializableCurve};
