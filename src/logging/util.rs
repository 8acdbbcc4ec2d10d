use std::time::Duration;

pub fn duration_as_float(duration: Duration) -> f64 {
    duration.as_secs_f64()
}

// tags end up as a csv field
pub fn has_delimiters(text: &str) -> bool {
    text.chars().any(|c| c == ',' || c == ' ' || c == '\r' || c == '\n')
}
