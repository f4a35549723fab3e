use std::error::Error;
use std::fmt;

/// InputValueError is used if some runner option or scenario parameter does not fulfill the
/// posed requirements, e.g., by selecting a race index outside the catalog.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

/// clamp_unit restricts x to the interval [0.0, 1.0]. NaN is mapped to 0.0 such that HUD values
/// derived from a division by zero stay drawable.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.max(0.0).min(1.0)
}
