use crate::cosmology::FlatLambdaCdm;

/// One realization of the merger rate model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters{
    /// merger timescale tau in Gyr
    pub merger_timescale: f64,
    /// merger fraction at z=0
    pub base_merger_fraction: f64,
    pub evolution_exponent: f64,
    pub merger_fraction_correction: f64
}

impl ModelParameters{
    #[inline]
    pub fn is_physical(&self) -> bool
    {
        self.merger_timescale > 0.0 && self.base_merger_fraction > 0.0
    }

    #[inline]
    pub fn merger_interval(&self, z: f64) -> f64
    {
        merger_interval(
            z,
            self.merger_timescale,
            self.base_merger_fraction,
            self.evolution_exponent,
            self.merger_fraction_correction
        )
    }
}

/// Average time between mergers Gamma(z) = tau / (f0 (1+z)^m C).
///
/// Nothing is checked here. For f0 <= 0 or z <= -1 the result is
/// infinite, negative or NaN and will show up in the integral.
#[inline]
pub fn merger_interval(z: f64, tau: f64, f0: f64, m: f64, correction: f64) -> f64
{
    tau / (f0 * (1.0 + z).powf(m) * correction)
}

/// -1 / ((1+z) H(z) Gamma(z))
///
/// Negative, because dt = -dz / ((1+z) H(z)). Integrate from z_max down to z_min
/// to get a positive number of mergers.
#[inline]
pub fn merger_integrand(z: f64, params: &ModelParameters, cosmology: &FlatLambdaCdm) -> f64
{
    -((1.0 + z) * cosmology.hubble_parameter(z) * params.merger_interval(z)).recip()
}

#[cfg(test)]
mod tests{
    use super::*;
    use proptest::prelude::*;

    fn best_fit() -> ModelParameters
    {
        ModelParameters{
            merger_timescale: 0.4,
            base_merger_fraction: 0.009,
            evolution_exponent: 2.9,
            merger_fraction_correction: 0.6
        }
    }

    #[test]
    fn interval_at_z0()
    {
        let gamma = merger_interval(0.0, 0.4, 0.009, 2.9, 0.6);
        assert!((gamma - 0.4 / (0.009 * 0.6)).abs() < 1e-10);
    }

    #[test]
    fn interval_shrinks_with_exponent()
    {
        let mut p = best_fit();
        let low = p.merger_interval(1.5);
        p.evolution_exponent = 3.1;
        let high = p.merger_interval(1.5);
        assert!(high < low);
    }

    #[test]
    fn unphysical_fraction_is_not_finite()
    {
        let gamma = merger_interval(1.0, 0.4, 0.0, 2.9, 0.6);
        assert!(!gamma.is_finite());
        let gamma = merger_interval(1.0, 0.4, -0.01, 2.9, 0.6);
        assert!(gamma < 0.0);
    }

    #[test]
    fn integrand_is_negative()
    {
        let cosmo = FlatLambdaCdm::default();
        let p = best_fit();
        for i in 0..=27 {
            let z = 0.3 + i as f64 * 0.1;
            assert!(merger_integrand(z, &p, &cosmo) < 0.0);
        }
    }

    #[test]
    fn physical_check()
    {
        let mut p = best_fit();
        assert!(p.is_physical());
        p.merger_timescale = 0.0;
        assert!(!p.is_physical());
        p.merger_timescale = 0.1;
        p.base_merger_fraction = -1e-5;
        assert!(!p.is_physical());
    }

    proptest!{
        #[test]
        fn interval_positive(
            z in -0.99_f64..10.0,
            tau in 1e-4_f64..10.0,
            f0 in 1e-5_f64..1.0,
            m in -5.0_f64..5.0,
            c in 1e-3_f64..2.0
        )
        {
            let gamma = merger_interval(z, tau, f0, m, c);
            prop_assert!(gamma > 0.0);
            prop_assert!(gamma.is_finite());
        }

        #[test]
        fn larger_exponent_shorter_interval(
            z in 0.01_f64..8.0,
            m in -3.0_f64..5.0,
            dm in 0.01_f64..2.0
        )
        {
            let a = merger_interval(z, 0.4, 0.009, m, 0.6);
            let b = merger_interval(z, 0.4, 0.009, m + dm, 0.6);
            prop_assert!(b < a);
        }
    }
}
