pub mod rate;
pub mod quadrature;
pub mod sampling;
pub mod stats;
pub mod estimator;
pub mod presets;
mod opts;
pub use opts::*;
mod execs;
pub use execs::*;
