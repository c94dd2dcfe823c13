use serde::{Serialize, Deserialize};
use std::io::stdout;
use crate::misc::{PrintAlternatives, print_spaces};
use super::sampling::{ParameterPriors, Prior};

/// Default correction of the merger fraction
pub const MERGER_FRACTION_CORRECTION: f64 = 0.6;

pub const OWNSWORTH_2014: ParameterPriors = ParameterPriors{
    merger_timescale: Prior::new(0.4, 0.2),
    base_merger_fraction: Prior::new(0.009, 0.002),
    evolution_exponent: Prior::new(2.9, 0.2),
    merger_fraction_correction: MERGER_FRACTION_CORRECTION
};

/// Which merger rate study the best fit values are taken from
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub enum MergerStudy{
    /// Ownsworth et al. 2014
    #[default]
    Ownsworth2014,
    Custom(ParameterPriors)
}

impl MergerStudy{
    pub fn priors(&self) -> ParameterPriors
    {
        match self{
            Self::Ownsworth2014 => OWNSWORTH_2014,
            Self::Custom(priors) => *priors
        }
    }

    pub fn get_name(&self) -> String
    {
        match self{
            Self::Ownsworth2014 => "O14".to_owned(),
            Self::Custom(p) => {
                format!(
                    "T{}_F{}_M{}",
                    p.merger_timescale.mean,
                    p.base_merger_fraction.mean,
                    p.evolution_exponent.mean
                )
            }
        }
    }
}

impl PrintAlternatives for MergerStudy{
    fn print_alternatives(layer: u8) {
        let a = MergerStudy::Ownsworth2014;
        let b = MergerStudy::Custom(OWNSWORTH_2014);
        let mut stdout = stdout();
        print_spaces(layer);
        println!("a)");
        serde_json::to_writer_pretty(&mut stdout, &a)
            .expect("unable to create json a");
        println!();
        print_spaces(layer);
        println!("b)");
        serde_json::to_writer_pretty(stdout, &b)
            .expect("unable to create json b");
        println!();
    }
}
