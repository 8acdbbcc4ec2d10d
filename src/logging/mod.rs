pub mod curve_log_writer;
pub mod curve_log_reader;
pub mod log_writer_builder;
pub mod util;

pub use self::curve_log_reader::{CurveLogReader, LogEntry};
pub use self::curve_log_writer::CurveLogWriter;
pub use self::log_writer_builder::builder;
