use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Floating-point element type of the cluster engines.
pub trait LibData:
    'static + Copy + Send + Sync + Debug + Display + Float + FromPrimitive + Sum
{
}

impl LibData for f32 {}

impl LibData for f64 {}
