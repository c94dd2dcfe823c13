use thiserror::Error;
use crate::merger_model::quadrature::QuadError;

#[derive(Debug, Error)]
pub enum EstimateError{
    #[error("invalid redshift bounds: z_min={z_min}, z_max={z_max} (need -1 < z_min < z_max)")]
    InvalidBounds{
        z_min: f64,
        z_max: f64
    },

    #[error("sample count has to be at least 1")]
    InvalidSampleCount,

    #[error("invalid prior for {name}: mean={mean}, std_dev={std_dev}")]
    InvalidPrior{
        name: &'static str,
        mean: f64,
        std_dev: f64
    },

    #[error("no physical realizations: {drawn} drawn, {retained} retained, {failed} failed integrations")]
    NoPhysicalRealizations{
        drawn: usize,
        retained: usize,
        failed: usize
    },

    #[error("integration failed: {0}")]
    Quad(#[from] QuadError),

    #[error("unable to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error)
}

pub type Result<T> = std::result::Result<T, EstimateError>;
