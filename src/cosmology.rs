use derivative::Derivative;
use serde::{Serialize, Deserialize};

/// Gyr per (km/s/Mpc)^-1, i.e. Mpc/(km/s) expressed in Gyr
pub const HUBBLE_TIME_GYR: f64 = 977.792_221_680_007_2;

/// Flat ΛCDM cosmology without radiation.
///
/// Constructed once and handed to every integrand evaluation by reference,
/// nothing in here is mutated after construction.
#[derive(Debug, Clone, Copy, Derivative, Serialize, Deserialize, PartialEq)]
#[derivative(Default)]
pub struct FlatLambdaCdm{
    /// Hubble constant in km/s/Mpc
    #[derivative(Default(value="70.0"))]
    pub h0: f64,
    /// Matter density fraction today
    #[derivative(Default(value="0.3"))]
    pub omega_m: f64
}

impl FlatLambdaCdm{
    #[inline]
    pub fn omega_lambda(&self) -> f64
    {
        1.0 - self.omega_m
    }

    /// dimensionless expansion rate E(z) = H(z)/H0
    #[inline]
    pub fn efunc(&self, z: f64) -> f64
    {
        let zp1 = 1.0 + z;
        (self.omega_m * zp1 * zp1 * zp1 + self.omega_lambda()).sqrt()
    }

    /// H0 in units of 1/Gyr
    #[inline]
    pub fn h0_per_gyr(&self) -> f64
    {
        self.h0 / HUBBLE_TIME_GYR
    }

    /// Hubble parameter H(z) in units of 1/Gyr
    #[inline]
    pub fn hubble_parameter(&self, z: f64) -> f64
    {
        self.h0_per_gyr() * self.efunc(z)
    }
}
