use clap::Parser;

#[derive(Parser, Debug)]
pub struct SimpleOpt{
    #[arg(short, long)]
    /// File Name of json file. Prints the default json if missing
    pub json: Option<String>,

    #[arg(short, long)]
    /// Print the available merger rate studies
    pub print_alternatives: bool
}

#[derive(Parser, Debug)]
#[command(version, about)]
pub enum CmdChooser{
    /// Monte Carlo estimate of the number of mergers with asymmetric errors
    Estimate(SimpleOpt),
    /// Number of mergers for the best fit parameters only
    BestFit(SimpleOpt),
    /// Best fit number of mergers as function of the evolution exponent
    ScanExponent(SimpleOpt)
}
