#[macro_use]
mod util;
mod serialization;
mod logging;
mod concurrent_curve;
