use std::io::BufRead;
use std::marker::PhantomData;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use lazycell::LazyCell;

use crate::base::*;
use crate::serialization::CurveSnapshot;

/// One snapshot line. The payload is only decoded on first access.
pub struct LogEntry<C> {
    pub tag: Option<String>,
    /// Seconds since the log base time.
    pub start_timestamp: f64,
    pub interval_length: f64,
    pub total_count: u64,
    raw_snapshot: String,
    snapshot: LazyCell<Result<CurveSnapshot<C>, LogReadError>>,
}

impl<C: Counter> LogEntry<C> {
    fn decode_snapshot(raw_snapshot: &str) -> Result<CurveSnapshot<C>, LogReadError> {
        let decoded = STANDARD.decode(raw_snapshot)?;
        Ok(CurveSnapshot::deserialize_from(&mut Bytes::from(decoded))?)
    }

    pub fn snapshot(&self) -> &Result<CurveSnapshot<C>, LogReadError> {
        let raw_snapshot = &self.raw_snapshot;
        self.snapshot.borrow_with(|| Self::decode_snapshot(raw_snapshot))
    }

    fn parse(line: &str) -> Result<LogEntry<C>, LogReadError> {
        let malformed = || LogReadError::MalformedLine(line.to_string());

        let (tag, rest) = match line.strip_prefix("Tag=") {
            Some(tagged) => {
                let (tag, rest) = tagged.split_once(',').ok_or_else(malformed)?;
                (Some(tag.to_string()), rest)
            }
            None => (None, line),
        };

        let mut fields = rest.splitn(4, ',');
        let mut next = || fields.next().ok_or_else(malformed);
        let start_timestamp = next()?.parse::<f64>().map_err(|_| malformed())?;
        let interval_length = next()?.parse::<f64>().map_err(|_| malformed())?;
        let total_count = next()?.parse::<u64>().map_err(|_| malformed())?;
        let raw_snapshot = next()?.trim().to_string();

        Ok(LogEntry {
            tag,
            start_timestamp,
            interval_length,
            total_count,
            raw_snapshot,
            snapshot: LazyCell::new(),
        })
    }
}

/// Iterates the snapshot lines of a curve log, picking up the base time on the way.
pub struct CurveLogReader<R, C> {
    source: R,
    line: String,
    base_time: Option<f64>,
    start_time: Option<f64>,
    phantom: PhantomData<C>,
}

fn header_seconds(line: &str, key: &str) -> Option<f64> {
    let rest = line.strip_prefix("#[")?.strip_prefix(key)?;
    rest.trim_start().split_whitespace().next()?.parse().ok()
}

impl<R: BufRead, C: Counter> CurveLogReader<R, C> {
    pub fn new(source: R) -> CurveLogReader<R, C> {
        CurveLogReader {
            source,
            line: String::new(),
            base_time: None,
            start_time: None,
            phantom: PhantomData,
        }
    }

    /// Base time in seconds since the epoch, once its header line has been read.
    pub fn base_time(&self) -> Option<f64> {
        self.base_time
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }
}

impl<R: BufRead, C: Counter> Iterator for CurveLogReader<R, C> {
    type Item = Result<LogEntry<C>, LogReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.source.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            let line = self.line.trim_end();
            if line.is_empty() || line.starts_with('"') {
                continue;
            }
            if line.starts_with('#') {
                if let Some(t) = header_seconds(line, "BaseTime:") {
                    self.base_time = Some(t);
                } else if let Some(t) = header_seconds(line, "StartTime:") {
                    self.start_time = Some(t);
                }
                continue;
            }
            return Some(LogEntry::parse(line));
        }
    }
}
