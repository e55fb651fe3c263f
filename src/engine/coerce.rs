//! Lenient conversion of user-typed numbers.
//!
//! Anything that does not parse to a finite number becomes `None`; callers
//! decide the fallback (a zero weight delta, or a rejected multiplier).

/// A value a user may type into a weight or multiplier field.
pub trait NumericInput {
    /// The finite number this input represents, if any.
    fn to_number(&self) -> Option<f64>;
}

impl NumericInput for f64 {
    fn to_number(&self) -> Option<f64> {
        self.is_finite().then_some(*self)
    }
}

impl NumericInput for i32 {
    fn to_number(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl NumericInput for str {
    fn to_number(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl NumericInput for &str {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }
}

impl NumericInput for String {
    fn to_number(&self) -> Option<f64> {
        self.as_str().to_number()
    }
}

/// Parse a weight delta, treating anything unparseable as 0.
pub fn safe_parse_weight<T: NumericInput + ?Sized>(input: &T) -> f64 {
    input.to_number().unwrap_or(0.0)
}

/// Parse a multiplier; unparseable input becomes 0 and so fails validation.
pub fn safe_parse_multiplier<T: NumericInput + ?Sized>(input: &T) -> f64 {
    input.to_number().unwrap_or(0.0)
}

/// Whether a multiplier may be stored on a calculation.
#[inline]
pub fn is_valid_multiplier(multiplier: f64) -> bool {
    multiplier.is_finite() && multiplier > 0.0
}
