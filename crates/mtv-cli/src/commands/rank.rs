use crate::cli::RankArgs;
use crate::config;
use crate::error::Result;
use mtvqubo::core::io::samples;
use mtvqubo::workflows;
use std::io::Write;
use tracing::{info, warn};

pub fn run(args: &RankArgs, stdout: &mut impl Write) -> Result<()> {
    let definition = config::load_problem(&args.problem)?;

    info!("Loading solver samples from {:?}", &args.samples);
    let ensemble = samples::load_samples(&args.samples)?;
    if ensemble.is_empty() {
        warn!("Sample file contains no candidates.");
    }

    let reports = workflows::analyze::rank(&definition, &ensemble, args.top)?;
    let width = reports
        .iter()
        .map(|r| r.bitstring.len())
        .max()
        .unwrap_or(0)
        .max("Bits".len());

    writeln!(
        stdout,
        "{:>4}  {:>11}  {:>12}  {:<w$}  {}",
        "Rank",
        "Probability",
        "Objective",
        "Bits",
        "Configuration",
        w = width
    )?;
    for (i, report) in reports.iter().enumerate() {
        writeln!(
            stdout,
            "{:>4}  {:>11.6}  {:>12.4}  {:<w$}  {}",
            i + 1,
            report.probability,
            report.objective,
            report.bitstring,
            report.label,
            w = width
        )?;
    }
    Ok(())
}
