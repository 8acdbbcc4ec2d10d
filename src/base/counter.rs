use num_traits as num;

/// Word type of a decay-curve bucket.
pub trait Counter
    : num::Num + num::ToPrimitive + num::FromPrimitive + num::NumAssignOps + num::CheckedAdd + PartialOrd<Self> + Copy
    {
    /// Counter as a f64, used when projecting counts onto a display frame.
    fn as_f64(&self) -> f64;
    /// Counter as a u64.
    fn as_u64(&self) -> u64;
    fn word_size() -> u8;
}

macro_rules! impl_counter {
    ($t:ty, $size:expr) => {
        impl Counter for $t {
            #[inline(always)]
            fn as_f64(&self) -> f64 {
                *self as f64
            }
            #[inline(always)]
            fn as_u64(&self) -> u64 {
                u64::from(*self)
            }
            #[inline(always)]
            fn word_size() -> u8 {
                $size
            }
        }
    };
}

impl_counter!(u16, 2);
impl_counter!(u32, 4);
impl_counter!(u64, 8);
