use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Serialize, Deserialize};
use crate::error::*;
use super::rate::ModelParameters;

/// Best fit value together with its 1 sigma error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Prior{
    pub mean: f64,
    pub std_dev: f64
}

impl Prior{
    pub const fn new(mean: f64, std_dev: f64) -> Self
    {
        Self { mean, std_dev }
    }

    fn create_dist(&self, name: &'static str) -> Result<Normal<f64>>
    {
        let invalid = || EstimateError::InvalidPrior { name, mean: self.mean, std_dev: self.std_dev };
        // Normal::new only rejects non-finite widths
        if !self.mean.is_finite() || !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(invalid());
        }
        Normal::new(self.mean, self.std_dev)
            .map_err(|_| invalid())
    }
}

/// Best fit values of a merger rate study.
///
/// The three priors are sampled independently, correlations between them
/// are not modeled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParameterPriors{
    pub merger_timescale: Prior,
    pub base_merger_fraction: Prior,
    pub evolution_exponent: Prior,
    pub merger_fraction_correction: f64
}

impl ParameterPriors{
    pub fn best_fit(&self) -> ModelParameters
    {
        ModelParameters{
            merger_timescale: self.merger_timescale.mean,
            base_merger_fraction: self.base_merger_fraction.mean,
            evolution_exponent: self.evolution_exponent.mean,
            merger_fraction_correction: self.merger_fraction_correction
        }
    }

    pub fn validate(&self) -> Result<()>
    {
        self.merger_timescale.create_dist("merger_timescale")?;
        self.base_merger_fraction.create_dist("base_merger_fraction")?;
        self.evolution_exponent.create_dist("evolution_exponent")?;
        if !self.merger_fraction_correction.is_finite() {
            return Err(
                EstimateError::InvalidPrior{
                    name: "merger_fraction_correction",
                    mean: self.merger_fraction_correction,
                    std_dev: 0.0
                }
            );
        }
        Ok(())
    }

    /// Draws `amount` realizations and keeps only the physical ones.
    ///
    /// All timescales are drawn first, then all fractions, then all exponents.
    pub fn draw<R>(&self, amount: usize, rng: &mut R) -> Result<SampleSet>
    where R: Rng + ?Sized
    {
        let tau_dist = self.merger_timescale.create_dist("merger_timescale")?;
        let f0_dist = self.base_merger_fraction.create_dist("base_merger_fraction")?;
        let m_dist = self.evolution_exponent.create_dist("evolution_exponent")?;

        let taus: Vec<f64> = (0..amount).map(|_| tau_dist.sample(rng)).collect();
        let f0s: Vec<f64> = (0..amount).map(|_| f0_dist.sample(rng)).collect();
        let ms: Vec<f64> = (0..amount).map(|_| m_dist.sample(rng)).collect();

        let retained = taus.into_iter()
            .zip(f0s)
            .zip(ms)
            .map(
                |((merger_timescale, base_merger_fraction), evolution_exponent)|
                {
                    ModelParameters{
                        merger_timescale,
                        base_merger_fraction,
                        evolution_exponent,
                        merger_fraction_correction: self.merger_fraction_correction
                    }
                }
            ).filter(ModelParameters::is_physical)
            .collect();

        Ok(
            SampleSet{
                drawn: amount,
                retained
            }
        )
    }
}

/// Physical realizations out of `drawn` draws
#[derive(Debug, Clone)]
pub struct SampleSet{
    pub drawn: usize,
    pub retained: Vec<ModelParameters>
}

impl SampleSet{
    pub fn retained_count(&self) -> usize
    {
        self.retained.len()
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use super::super::presets::MergerStudy;

    #[test]
    fn only_physical_samples_survive()
    {
        let priors = MergerStudy::Ownsworth2014.priors();
        let mut rng = Pcg64::seed_from_u64(12);
        let set = priors.draw(10000, &mut rng).unwrap();
        assert_eq!(set.drawn, 10000);
        assert!(set.retained_count() < 10000);
        assert!(set.retained.iter().all(ModelParameters::is_physical));
        assert!(set.retained.iter().all(|p| p.merger_fraction_correction == 0.6));
        // P(tau > 0) is about 0.977 for 0.4 +- 0.2
        let frac = set.retained_count() as f64 / set.drawn as f64;
        assert!(frac > 0.96 && frac < 0.99, "{frac}");
    }

    #[test]
    fn zero_width_prior_is_constant()
    {
        let priors = ParameterPriors{
            merger_timescale: Prior::new(0.5, 0.0),
            base_merger_fraction: Prior::new(0.01, 0.0),
            evolution_exponent: Prior::new(2.0, 0.0),
            merger_fraction_correction: 0.6
        };
        let mut rng = Pcg64::seed_from_u64(1);
        let set = priors.draw(17, &mut rng).unwrap();
        assert_eq!(set.retained_count(), 17);
        assert!(set.retained.iter().all(|p| *p == priors.best_fit()));
    }

    #[test]
    fn same_seed_same_draws()
    {
        let priors = MergerStudy::Ownsworth2014.priors();
        let a = priors.draw(500, &mut Pcg64::seed_from_u64(99)).unwrap();
        let b = priors.draw(500, &mut Pcg64::seed_from_u64(99)).unwrap();
        assert_eq!(a.retained, b.retained);
    }

    #[test]
    fn negative_width_rejected()
    {
        let mut priors = MergerStudy::Ownsworth2014.priors();
        priors.evolution_exponent.std_dev = -0.1;
        assert!(
            matches!(
                priors.validate(),
                Err(EstimateError::InvalidPrior { name: "evolution_exponent", .. })
            )
        );
        let mut rng = Pcg64::seed_from_u64(1);
        assert!(priors.draw(10, &mut rng).is_err());
    }

    #[test]
    fn every_negative_width_rejected()
    {
        let base = MergerStudy::Ownsworth2014.priors();
        let mut rng = Pcg64::seed_from_u64(3);

        let mut tau = base;
        tau.merger_timescale.std_dev = -1e-12;
        assert!(matches!(tau.validate(), Err(EstimateError::InvalidPrior { name: "merger_timescale", .. })));
        assert!(tau.draw(5, &mut rng).is_err());

        let mut f0 = base;
        f0.base_merger_fraction.std_dev = -0.002;
        assert!(matches!(f0.validate(), Err(EstimateError::InvalidPrior { name: "base_merger_fraction", .. })));

        let mut nan = base;
        nan.evolution_exponent.std_dev = f64::NAN;
        assert!(nan.validate().is_err());

        let mut zero = base;
        zero.evolution_exponent.std_dev = 0.0;
        assert!(zero.validate().is_ok());
    }
}
