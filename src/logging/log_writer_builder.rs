use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::base::*;
use crate::logging::curve_log_writer::CurveLogWriter;
use crate::logging::util::*;

pub const CURVE_LOG_FORMAT_VERSION: &str = "1.0";

/// Builder state before a sink has been chosen.
pub struct NeedsSink;

struct BuilderState<'a> {
    base_time: Option<SystemTime>,
    write_format_version: bool,
    write_legend: bool,
    start_time: Option<SystemTime>,
    header_comment: Option<&'a str>,
}

/// Typestate builder; `S` is [`NeedsSink`] until `sink` swaps in the
/// writer, and `build` only exists for a `Write` sink.
pub struct LogWriterBuilder<'a, S> {
    state: BuilderState<'a>,
    sink: S,
}

pub fn builder<'a>() -> LogWriterBuilder<'a, NeedsSink> {
    LogWriterBuilder {
        state: BuilderState {
            base_time: None,
            write_format_version: false,
            write_legend: false,
            start_time: None,
            header_comment: None,
        },
        sink: NeedsSink,
    }
}

impl<'a, S> LogWriterBuilder<'a, S> {
    pub fn write_format_version(mut self) -> LogWriterBuilder<'a, S> {
        self.state.write_format_version = true;
        self
    }

    pub fn write_legend(mut self) -> LogWriterBuilder<'a, S> {
        self.state.write_legend = true;
        self
    }

    pub fn write_start_time(mut self, time: SystemTime) -> LogWriterBuilder<'a, S> {
        self.state.start_time = Some(time);
        self
    }

    pub fn header_comment<'b: 'a>(mut self, comment: &'b str) -> LogWriterBuilder<'a, S> {
        self.state.header_comment = Some(comment);
        self
    }

    pub fn base_time(mut self, base_time: SystemTime) -> LogWriterBuilder<'a, S> {
        self.state.base_time = Some(base_time);
        self
    }

    pub fn sink<T: Write>(self, sink: T) -> LogWriterBuilder<'a, T> {
        LogWriterBuilder { state: self.state, sink }
    }
}

impl<'a, T: Write> LogWriterBuilder<'a, T> {
    pub fn build(self) -> Result<CurveLogWriter<T>, LoggingError> {
        let LogWriterBuilder { state, mut sink } = self;
        let BuilderState {
            base_time,
            write_format_version,
            write_legend,
            start_time,
            header_comment,
        } = state;

        if let Some(c) = header_comment {
            writeln!(sink, "#{}", c)?;
        }
        if write_format_version {
            writeln!(sink, "#[Decay curve log format version {}]", CURVE_LOG_FORMAT_VERSION)?;
        }
        if let Some(t) = start_time {
            let start = duration_as_float(t.duration_since(UNIX_EPOCH)?);
            writeln!(sink, "#[StartTime: {:.3} (seconds since epoch)]", start)?;
        }
        if let Some(t) = base_time {
            let base = duration_as_float(t.duration_since(UNIX_EPOCH)?);
            writeln!(sink, "#[BaseTime: {:.3} (seconds since epoch)]", base)?;
        }
        if write_legend {
            writeln!(sink, r#""StartTimestamp","Interval_Length","Total_Count","Compressed_Curve""#)?;
        }

        Ok(CurveLogWriter::new(sink, base_time.unwrap_or(UNIX_EPOCH)))
    }

    pub fn build_with_header(mut self) -> Result<CurveLogWriter<T>, LoggingError> {
        if self.state.start_time.is_none() {
            self.state.start_time = Some(SystemTime::now());
        }
        self.state.write_format_version = true;
        self.state.write_legend = true;
        self.build()
    }
}
