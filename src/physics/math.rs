//! Vector math for the orbit engine

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and accelerations
pub type Vector = bevy::math::DVec3;

/// Helpers the engine needs on top of the plain vector arithmetic.
///
/// Addition, subtraction, scaling and `length()` come straight from [`Vector`].
pub trait VectorExt {
    /// Unit vector in the same direction, or the zero vector when the length is zero.
    ///
    /// A zero result means "no preferred direction"; callers apply no acceleration.
    fn normalized(self) -> Vector;

    /// The vector itself when every component is finite, otherwise zero.
    fn finite_or_zero(self) -> Vector;
}

impl VectorExt for Vector {
    #[inline]
    fn normalized(self) -> Vector {
        self.normalize_or_zero()
    }

    #[inline]
    fn finite_or_zero(self) -> Vector {
        if self.is_finite() { self } else { Vector::ZERO }
    }
}

/// Returns `value` when finite, otherwise zero.
#[inline]
pub fn finite_or_zero(value: Scalar) -> Scalar {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_unit_length() {
        let v = Vector::new(3.0, 4.0, 0.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert_eq!(v, Vector::new(0.6, 0.8, 0.0));
    }

    #[test]
    fn test_normalized_zero_is_zero() {
        assert_eq!(Vector::ZERO.normalized(), Vector::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(-1.0, 0.5, 2.0);
        assert_eq!(a + b, Vector::new(0.0, 2.5, 5.0));
        assert_eq!(a - b, Vector::new(2.0, 1.5, 1.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0, 6.0));
        assert!((Vector::new(2.0, 3.0, 6.0).length() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(Vector::new(Scalar::NAN, 1.0, 0.0).finite_or_zero(), Vector::ZERO);
        assert_eq!(
            Vector::new(1.0, Scalar::INFINITY, 0.0).finite_or_zero(),
            Vector::ZERO
        );
        assert_eq!(Vector::X.finite_or_zero(), Vector::X);
        assert_eq!(finite_or_zero(Scalar::NEG_INFINITY), 0.0);
        assert_eq!(finite_or_zero(2.5), 2.5);
    }
}
