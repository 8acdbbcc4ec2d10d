use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::debug;

use crate::base::*;
use crate::logging::util::*;
use crate::serialization::SerializableCurve;

/// Appends one line per curve snapshot to `sink`:
/// `[Tag=<tag>,]<start>,<interval>,<total count>,<base64 compressed snapshot>`
/// with `start` in seconds since the log base time.
pub struct CurveLogWriter<T> {
    target_buffer: Vec<u8>,
    sink: T,
    base_time: SystemTime,
}

impl<T: Write> CurveLogWriter<T> {
    pub fn new(sink: T, base_time: SystemTime) -> CurveLogWriter<T> {
        CurveLogWriter {
            target_buffer: Vec::with_capacity(64),
            sink,
            base_time,
        }
    }

    pub fn set_base_time(&mut self, time: SystemTime) {
        self.base_time = time
    }

    pub fn get_base_time(&self) -> SystemTime {
        self.base_time
    }

    pub fn flush(&mut self) -> Result<(), io::Error> {
        self.sink.flush()
    }

    pub fn into_inner(self) -> T {
        self.sink
    }

    pub fn output_comment(&mut self, comment: &str) -> Result<(), LoggingError> {
        writeln!(self.sink, "#{}", comment)?;
        Ok(())
    }

    /// Logs `curve` over the interval recorded in its metadata.
    pub fn log<H: SerializableCurve>(&mut self, curve: &H) -> Result<(), LoggingError> {
        let (start, end) = {
            let meta_data = curve.meta_data();
            (meta_data.start_timestamp, meta_data.end_timestamp)
        };
        self.write_log_entry(curve, start, end)
    }

    pub fn log_with_start_end<H: SerializableCurve>(
        &mut self,
        curve: &H,
        start: SystemTime,
        end: SystemTime,
    ) -> Result<(), LoggingError> {
        self.write_log_entry(curve, Some(start), Some(end))
    }

    fn write_log_entry<H: SerializableCurve>(
        &mut self,
        curve: &H,
        start_time: Option<SystemTime>,
        end_time: Option<SystemTime>,
    ) -> Result<(), LoggingError> {
        let tag = match curve.meta_data().tag {
            Some(ref t) if has_delimiters(t) => return Err(LoggingError::TagHasDelimiters),
            ref t => t.clone(),
        };

        self.target_buffer.clear();
        curve.serialize_into_compressed(&mut self.target_buffer)?;

        let start_duration = match start_time {
            Some(s) => duration_as_float(s.duration_since(self.base_time)?),
            None => 0.0,
        };
        let start = start_time.unwrap_or(UNIX_EPOCH);
        let interval = end_time
            .unwrap_or_else(SystemTime::now)
            .duration_since(start)
            .map(duration_as_float)
            .unwrap_or(0.0);

        if let Some(t) = tag {
            write!(self.sink, "Tag={},", t)?;
        }
        write!(self.sink, "{:.3},{:.3},{},", start_duration, interval, curve.total_count())?;
        self.sink.write_all(STANDARD.encode(&self.target_buffer).as_bytes())?;
        writeln!(self.sink)?;

        debug!("logged decay curve snapshot of {} bytes", self.target_buffer.len());
        Ok(())
    }
}
