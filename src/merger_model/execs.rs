use std::io::Write;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde_json::Value;
use crate::{
    error::Result,
    misc::*
};
use super::{
    estimator::*,
    opts::*,
    stats::*
};

pub fn exec_estimate(opts: &EstimateOpts) -> Result<MergerEstimate>
{
    if let Some(j) = opts.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(j.get())
            .build_global()?;
    }
    let estimator = opts.estimator()?;
    tracing::info!(
        study = %opts.study.get_name(),
        samples = opts.samples.get(),
        seed = opts.seed,
        z_min = opts.z_min,
        z_max = opts.z_max,
        "starting monte carlo estimate"
    );

    let mut rng = Pcg64::seed_from_u64(opts.seed);
    let estimate = estimator.run(&mut rng)?;

    print_summary(&estimate);
    write_estimate_files(opts, &estimate)?;
    Ok(estimate)
}

pub fn print_summary(estimate: &MergerEstimate)
{
    println!(
        "N_merg = {:.4} +{:.4} -{:.4}",
        estimate.median(),
        estimate.upper_offset(),
        estimate.lower_offset()
    );
    println!(
        "retained {} of {} realizations ({:.2}%), {} failed integrations",
        estimate.retained,
        estimate.drawn,
        estimate.retained_fraction * 100.0,
        estimate.failed_integrations
    );
}

fn write_estimate_files(opts: &EstimateOpts, estimate: &MergerEstimate) -> Result<()>
{
    let stub = opts.get_name();
    let json: Value = serde_json::to_value(opts)?;
    let summary: Value = serde_json::to_value(estimate)?;

    let counts_name = format!("{stub}.dat");
    let mut buf = create_buf_with_command_and_version(&counts_name)?;
    write_json(&mut buf, &json)?;
    write_json(&mut buf, &summary)?;
    write_slice_head(&mut buf, ["N_merg"])?;
    for count in estimate.merger_counts.iter() {
        writeln!(buf, "{count}")?;
    }
    buf.flush()?;

    let hist_name = format!("{stub}_hist.dat");
    if let Some(hist) = MergerCountHist::from_sorted(&estimate.merger_counts, opts.hist_bins.get()) {
        let header = ["bin_left", "bin_right", "hits", "density"];
        let mut buf = create_buf_with_command_and_version_and_header(&hist_name, header)?;
        for (left, right, hits, density) in hist.bin_iter() {
            writeln!(buf, "{left} {right} {hits} {density}")?;
        }
        buf.flush()?;
    }

    let gp_name = format!("{stub}.gp");
    let mut gp = create_gnuplot_buf(&gp_name)?;
    let s = &estimate.summary;
    writeln!(gp, "set t pdfcairo")?;
    writeln!(gp, "set output '{stub}.pdf'")?;
    writeln!(gp, "set xlabel 'N_{{merg}}'")?;
    writeln!(gp, "set ylabel 'density'")?;
    writeln!(gp, "set style fill solid 0.5")?;
    writeln!(gp, "set arrow from {}, graph 0 to {}, graph 1 nohead dt 1", s.median, s.median)?;
    writeln!(gp, "set arrow from {}, graph 0 to {}, graph 1 nohead dt 2", s.lower, s.lower)?;
    writeln!(gp, "set arrow from {}, graph 0 to {}, graph 1 nohead dt 2", s.upper, s.upper)?;
    writeln!(gp, "p '{hist_name}' u (($1+$2)/2):4:($2-$1) w boxes t ''")?;
    writeln!(gp, "set output")?;
    drop(gp);

    tracing::info!(counts = %counts_name, histogram = %hist_name, script = %gp_name, "wrote output files");

    if opts.gnuplot {
        let out = call_gnuplot(&gp_name)?;
        if !out.status.success() {
            tracing::warn!(
                stderr = %String::from_utf8_lossy(&out.stderr),
                "gnuplot failed"
            );
        }
    }
    Ok(())
}

pub fn exec_best_fit(opts: &BestFitOpts) -> Result<()>
{
    let interval = RedshiftInterval::new(opts.z_min, opts.z_max)?;
    let params = opts.study.priors().best_fit();
    let res = merger_count(&params, &opts.cosmology, &interval, &opts.quad)?;
    println!(
        "N_merg(best fit) = {} (error estimate {:e}, {} segments, {} evaluations)",
        res.value,
        res.abs_err,
        res.segments,
        res.evaluations
    );
    Ok(())
}

pub fn exec_exponent_scan(opts: &ExponentScanOpts) -> Result<()>
{
    let interval = RedshiftInterval::new(opts.z_min, opts.z_max)?;
    let mut params = opts.study.priors().best_fit();
    let name = opts.get_name();
    let header = ["m", "N_merg", "abs_err"];
    let mut buf = create_buf_with_command_and_version_and_header(&name, header)?;
    let json: Value = serde_json::to_value(opts)?;
    write_json(&mut buf, &json)?;

    for m in opts.exponent.get_iter() {
        params.evolution_exponent = m;
        match merger_count(&params, &opts.cosmology, &interval, &opts.quad) {
            Ok(res) => writeln!(buf, "{m} {} {}", res.value, res.abs_err)?,
            Err(e) => {
                tracing::warn!(m, error = %e, "integration failed");
                writeln!(buf, "{m} NaN NaN")?;
            }
        }
    }
    buf.flush()?;
    tracing::info!(file = %name, "wrote exponent scan");
    Ok(())
}
