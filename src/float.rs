use std::fmt::{Debug, Display};

use num_traits::{Float as NumFloat, FromPrimitive};

/// Primitive floating-point type a [`Node`](crate::Node) is built over.
///
/// Only `f32` and `f64` implement this. Node values, derivative values and
/// Taylor results are all expressed in this type.
pub trait Float: NumFloat + FromPrimitive + Default + Debug + Display + 'static {
    /// Lossless-enough widening used for error reporting and logging.
    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl Float for f32 {}
impl Float for f64 {}
