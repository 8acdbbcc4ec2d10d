use thiserror::Error;

/// Configuration errors. Terminal for the session that raised them.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CreationError {
    #[error("histogram range bounds must be finite")]
    NonFiniteRange,
    #[error("histogram low bound must lie below the high bound")]
    LowNotBelowHigh,
    #[error("at least 2 bin edges are required, ceiling is {max_edges}")]
    TooFewEdges { max_edges: i64 },
    #[error("bin width must be at least 1")]
    ZeroBinWidth,
    #[error("time unit must be finite and positive")]
    InvalidTimeUnit,
    #[error("range [{low}, {high}] holds fewer than 2 integer edges")]
    DegenerateRange { low: f64, high: f64 },
    #[error("range [{low}, {high}] does not fit the 64-bit tick domain")]
    RangeExceedsTicks { low: f64, high: f64 },
}

/// Failure to assign one channel's timestamps to bins.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BinningError {
    #[error("edge table must hold at least 2 strictly increasing edges")]
    MalformedEdges,
    #[error("counts length {actual} does not match edge table, expected {expected}")]
    CountsLengthMismatch { expected: usize, actual: usize },
    #[error("new timestamps [{start}, {start}+{len}) exceed buffer of {available}")]
    BatchOutOfBounds { start: usize, len: usize, available: usize },
    #[error("count overflow in bin {bin}")]
    CountOverflow { bin: usize },
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProjectionError {
    #[error("coarsening factor must be at least 1")]
    ZeroBinWidth,
    #[error("coarsened output holds {actual} slots, expected {expected}")]
    OutputLengthMismatch { expected: usize, actual: usize },
    #[error("coarsened bin {bin} exceeds the 64-bit count range")]
    CountOverflow { bin: usize },
}

/// Errors escaping a single update call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UpdateError {
    #[error("session configuration rejected: {0}")]
    Creation(#[from] CreationError),
    #[error("display projection failed: {0}")]
    Projection(#[from] ProjectionError),
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SerializationError {
    #[error("value cannot be zigzag encoded")]
    ValueNotLEBEncodable,
    #[error("session holds no edges to serialize")]
    Uninitialized,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DeserializationError {
    #[error("settings rejected: {0}")]
    InvalidSettings(CreationError),
    #[error("unknown encoding cookie {0:#x}")]
    UnknownCookie(u32),
    #[error("payload ended early")]
    Truncated,
    #[error("payload holds trailing bytes")]
    TrailingBytes,
    #[error("decompression failed")]
    DecompressionFailed,
    #[error("count does not fit the counter word type")]
    CountExceedsTypeMax,
    #[error("restored edge table is invalid: {0}")]
    InvalidEdges(BinningError),
    #[error("restored edge table holds {edges} edges, ceiling is {max_edges}")]
    ExceedsEdgeCeiling { edges: usize, max_edges: i64 },
    #[error("restored edges [{first}, {last}] lie outside the session range")]
    EdgesOutsideRange { first: i64, last: i64 },
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Serialization(#[from] SerializationError),
    #[error("tag may not contain commas, spaces or line breaks")]
    TagHasDelimiters,
    #[error("timestamp precedes the log base time")]
    TimeBeforeBase(#[from] std::time::SystemTimeError),
}

#[derive(Debug, Error)]
pub enum LogReadError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed log line: {0}")]
    MalformedLine(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("snapshot decoding failed: {0}")]
    Deserialization(#[from] DeserializationError),
}
