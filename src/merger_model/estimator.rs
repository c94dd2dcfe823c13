use std::time::Instant;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use rand::Rng;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::{
    cosmology::FlatLambdaCdm,
    error::*,
    misc::indication_bar
};
use super::{
    quadrature::*,
    rate::*,
    sampling::*,
    stats::*
};

/// Redshift range a galaxy passes through, z_max is the earlier epoch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RedshiftInterval{
    pub z_min: f64,
    pub z_max: f64
}

impl RedshiftInterval{
    pub fn new(z_min: f64, z_max: f64) -> Result<Self>
    {
        let interval = Self { z_min, z_max };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> Result<()>
    {
        let valid = self.z_min.is_finite()
            && self.z_max.is_finite()
            && self.z_min > -1.0
            && self.z_min < self.z_max;
        if valid {
            Ok(())
        } else {
            Err(EstimateError::InvalidBounds { z_min: self.z_min, z_max: self.z_max })
        }
    }
}

/// Expected number of mergers of a single realization.
///
/// Integrates from z_max down to z_min, which turns the negative integrand
/// into a positive count.
pub fn merger_count(
    params: &ModelParameters,
    cosmology: &FlatLambdaCdm,
    interval: &RedshiftInterval,
    quad: &QuadOptions
) -> std::result::Result<QuadResult, QuadError>
{
    integrate(
        |z| merger_integrand(z, params, cosmology),
        interval.z_max,
        interval.z_min,
        quad
    )
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Execution{
    Sequential,
    #[default]
    Parallel
}

#[derive(Debug, Clone)]
pub struct MonteCarloEstimator{
    pub priors: ParameterPriors,
    pub cosmology: FlatLambdaCdm,
    pub interval: RedshiftInterval,
    pub samples: usize,
    pub quad: QuadOptions,
    pub execution: Execution,
    pub show_progress: bool
}

/// Result of one Monte Carlo run
#[derive(Debug, Clone, Serialize)]
pub struct MergerEstimate{
    pub summary: MergerCountSummary,
    /// retained / drawn
    pub retained_fraction: f64,
    pub drawn: usize,
    pub retained: usize,
    /// retained samples whose integration failed
    pub failed_integrations: usize,
    /// finite merger counts, ascending
    #[serde(skip)]
    pub merger_counts: Vec<f64>
}

impl MergerEstimate{
    /// Reduces one merger count per retained realization, NaN marks a failed
    /// integration. Errors if no finite count is left.
    pub fn from_counts(drawn: usize, counts: Vec<f64>) -> Result<Self>
    {
        let retained = counts.len();
        let failed_integrations = counts.iter()
            .filter(|c| !c.is_finite())
            .count();
        if failed_integrations > 0 {
            tracing::warn!(
                failed = failed_integrations,
                retained,
                "discarding realizations with failed integration"
            );
        }

        let merger_counts = sorted_finite(counts);
        let summary = MergerCountSummary::from_sorted(&merger_counts)
            .ok_or(
                EstimateError::NoPhysicalRealizations{
                    drawn,
                    retained,
                    failed: failed_integrations
                }
            )?;

        let retained_fraction = if drawn == 0 {
            0.0
        } else {
            retained as f64 / drawn as f64
        };

        Ok(
            Self{
                summary,
                retained_fraction,
                drawn,
                retained,
                failed_integrations,
                merger_counts
            }
        )
    }

    pub fn median(&self) -> f64
    {
        self.summary.median
    }

    pub fn lower_offset(&self) -> f64
    {
        self.summary.lower_offset
    }

    pub fn upper_offset(&self) -> f64
    {
        self.summary.upper_offset
    }
}

impl MonteCarloEstimator{
    pub fn new(
        priors: ParameterPriors,
        cosmology: FlatLambdaCdm,
        interval: RedshiftInterval,
        samples: usize
    ) -> Self
    {
        Self{
            priors,
            cosmology,
            interval,
            samples,
            quad: QuadOptions::default(),
            execution: Execution::default(),
            show_progress: false
        }
    }

    pub fn validate(&self) -> Result<()>
    {
        self.interval.validate()?;
        if self.samples == 0 {
            return Err(EstimateError::InvalidSampleCount);
        }
        self.priors.validate()
    }

    /// sample, filter, integrate, reduce
    pub fn run<R>(&self, rng: &mut R) -> Result<MergerEstimate>
    where R: Rng + ?Sized
    {
        self.validate()?;
        let start = Instant::now();

        let sample_set = self.priors.draw(self.samples, rng)?;
        tracing::info!(
            drawn = sample_set.drawn,
            retained = sample_set.retained_count(),
            "filtered unphysical realizations"
        );

        if sample_set.retained.is_empty() {
            return Err(
                EstimateError::NoPhysicalRealizations{
                    drawn: sample_set.drawn,
                    retained: 0,
                    failed: 0
                }
            );
        }

        let counts = self.integrate_all(&sample_set.retained);
        let estimate = MergerEstimate::from_counts(sample_set.drawn, counts)?;

        tracing::info!(
            elapsed = %humantime::format_duration(start.elapsed()),
            median = estimate.median(),
            "monte carlo run finished"
        );
        Ok(estimate)
    }

    /// One merger count per realization, NaN where the integration failed.
    /// Same order as `realizations` for both execution modes.
    pub fn integrate_all(&self, realizations: &[ModelParameters]) -> Vec<f64>
    {
        let bar = if self.show_progress {
            indication_bar(realizations.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_message("integrating");

        let single = |params: &ModelParameters| -> f64 {
            match merger_count(params, &self.cosmology, &self.interval, &self.quad) {
                Ok(res) if res.value.is_finite() => res.value,
                Ok(_) => f64::NAN,
                Err(e) => {
                    tracing::debug!(?params, error = %e, "integration failed");
                    f64::NAN
                }
            }
        };

        let counts = match self.execution {
            Execution::Sequential => {
                realizations.iter()
                    .progress_with(bar.clone())
                    .map(single)
                    .collect()
            },
            Execution::Parallel => {
                realizations.par_iter()
                    .progress_with(bar.clone())
                    .map(single)
                    .collect()
            }
        };
        bar.finish_and_clear();
        counts
    }
}
