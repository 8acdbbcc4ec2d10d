use std::time::SystemTime;

/// Wall-clock bookkeeping for a session, consumed by the curve log writer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurveMetaData {
    pub start_timestamp: Option<SystemTime>,
    pub end_timestamp: Option<SystemTime>,
    pub tag: Option<String>,
}

impl CurveMetaData {
    pub fn new() -> CurveMetaData {
        CurveMetaData::default()
    }
    /// Forgets the session timestamps; the tag names the curve, not the session, and stays.
    pub fn clear(&mut self) {
        self.start_timestamp = None;
        self.end_timestamp = None;
    }
    pub fn set_tag_string(&mut self, tag_string: String) {
        self.tag = Some(tag_string);
    }
    pub fn set_start_now(&mut self) {
        self.start_timestamp = Some(SystemTime::now());
    }
    pub fn set_end_now(&mut self) {
        self.end_timestamp = Some(SystemTime::now());
    }
}
