//! Unit conventions
//!
//! The engine works in SI units (metres, seconds, kilograms). Kilometres only
//! appear at the API boundary, for nominal orbital distances.

use super::math::Scalar;

/// Newtonian constant of gravitation, m^3 kg^-1 s^-2
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.674_30e-11;

/// Mass of the central body, kg
pub const SUN_MASS: Scalar = 1.989e30;

pub const METRES_PER_KILOMETRE: Scalar = 1_000.0;

#[inline]
pub fn km_to_m(km: Scalar) -> Scalar {
    km * METRES_PER_KILOMETRE
}

#[inline]
pub fn m_to_km(m: Scalar) -> Scalar {
    m / METRES_PER_KILOMETRE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_conversion() {
        assert_eq!(km_to_m(1.496e8), 1.496e11);
        assert_eq!(m_to_km(2.0e7), 2.0e4);
    }
}
