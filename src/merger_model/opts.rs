use derivative::Derivative;
use serde::{Serialize, Deserialize};
use std::num::*;
use crate::{
    cosmology::FlatLambdaCdm,
    error::Result,
    misc::{SampleRangeF64, VERSION}
};
use super::{
    estimator::*,
    presets::MergerStudy,
    quadrature::QuadOptions
};


#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
pub struct EstimateOpts{
    pub study: MergerStudy,
    pub cosmology: FlatLambdaCdm,

    #[derivative(Default(value="0.3"))]
    pub z_min: f64,
    #[derivative(Default(value="3.0"))]
    pub z_max: f64,

    #[derivative(Default(value="NonZeroUsize::new(5000).unwrap()"))]
    pub samples: NonZeroUsize,
    pub seed: u64,
    pub threads: Option<NonZeroUsize>,
    pub execution: Execution,
    pub quad: QuadOptions,

    /// bins of the histogram file
    #[derivative(Default(value="NonZeroUsize::new(50).unwrap()"))]
    pub hist_bins: NonZeroUsize,
    /// stem of all output files, derived from the options if missing
    pub out_stub: Option<String>,
    /// run gnuplot on the generated script
    pub gnuplot: bool
}

impl EstimateOpts{
    pub fn get_name(&self) -> String
    {
        match &self.out_stub{
            Some(stub) => stub.clone(),
            None => {
                format!(
                    "v{VERSION}_{}_H{}_Om{}_z{}-{}_N{}_s{}",
                    self.study.get_name(),
                    self.cosmology.h0,
                    self.cosmology.omega_m,
                    self.z_min,
                    self.z_max,
                    self.samples,
                    self.seed
                )
            }
        }
    }

    pub fn interval(&self) -> Result<RedshiftInterval>
    {
        RedshiftInterval::new(self.z_min, self.z_max)
    }

    pub fn estimator(&self) -> Result<MonteCarloEstimator>
    {
        let mut estimator = MonteCarloEstimator::new(
            self.study.priors(),
            self.cosmology,
            self.interval()?,
            self.samples.get()
        );
        estimator.quad = self.quad;
        estimator.execution = self.execution;
        estimator.show_progress = true;
        Ok(estimator)
    }
}

/// Merger count of the best fit values only, no sampling
#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
pub struct BestFitOpts{
    pub study: MergerStudy,
    pub cosmology: FlatLambdaCdm,
    #[derivative(Default(value="0.3"))]
    pub z_min: f64,
    #[derivative(Default(value="3.0"))]
    pub z_max: f64,
    pub quad: QuadOptions
}

/// Best fit merger count as function of the evolution exponent
#[derive(Debug, Clone, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
pub struct ExponentScanOpts{
    pub study: MergerStudy,
    pub cosmology: FlatLambdaCdm,
    #[derivative(Default(value="0.3"))]
    pub z_min: f64,
    #[derivative(Default(value="3.0"))]
    pub z_max: f64,
    pub quad: QuadOptions,
    #[derivative(Default(value="SampleRangeF64{start: 2.0, end: 4.0, samples: 21}"))]
    pub exponent: SampleRangeF64,
    pub out_stub: Option<String>
}

impl ExponentScanOpts{
    pub fn get_name(&self) -> String
    {
        match &self.out_stub{
            Some(stub) => format!("{stub}.dat"),
            None => {
                format!(
                    "v{VERSION}_{}_z{}-{}_m{}-{}_{}.dat",
                    self.study.get_name(),
                    self.z_min,
                    self.z_max,
                    self.exponent.start,
                    self.exponent.end,
                    self.exponent.samples
                )
            }
        }
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn default_options_roundtrip()
    {
        let opts = EstimateOpts::default();
        assert_eq!(opts.samples.get(), 5000);
        assert_eq!(opts.z_min, 0.3);
        assert_eq!(opts.z_max, 3.0);
        assert_eq!(opts.quad.limit, 50);
        let json = serde_json::to_string(&opts).unwrap();
        let back: EstimateOpts = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get_name(), opts.get_name());
    }

    #[test]
    fn stub_overrides_name()
    {
        let opts = EstimateOpts{
            out_stub: Some("run".to_owned()),
            ..Default::default()
        };
        assert_eq!(opts.get_name(), "run");
    }

    #[test]
    fn bad_bounds_surface_before_estimator()
    {
        let opts = EstimateOpts{
            z_min: 3.0,
            z_max: 0.3,
            ..Default::default()
        };
        assert!(opts.estimator().is_err());
    }
}
