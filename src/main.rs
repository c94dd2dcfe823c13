use {
    clap::Parser,
    global_opts::CmdChooser,
    merger_model::{presets::MergerStudy, *},
    misc::*,
    std::process::exit,
    tracing_subscriber::EnvFilter
};

pub mod misc;
mod error;
mod global_opts;
mod cosmology;
mod merger_model;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let command = CmdChooser::parse();

    let result = match command{
        CmdChooser::Estimate(opt) => {
            if opt.print_alternatives{
                MergerStudy::print_alternatives(0);
                Ok(())
            } else {
                let o: EstimateOpts = parse(opt.json);
                exec_estimate(&o).map(|_| ())
            }
        },
        CmdChooser::BestFit(opt) => {
            if opt.print_alternatives{
                MergerStudy::print_alternatives(0);
                Ok(())
            } else {
                let o: BestFitOpts = parse(opt.json);
                exec_best_fit(&o)
            }
        },
        CmdChooser::ScanExponent(opt) => {
            if opt.print_alternatives{
                MergerStudy::print_alternatives(0);
                Ok(())
            } else {
                let o: ExponentScanOpts = parse(opt.json);
                exec_exponent_scan(&o)
            }
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "aborting");
        exit(1);
    }
}
