use crate::cli::DecodeArgs;
use crate::config;
use crate::error::Result;
use mtvqubo::core::solution::parse_bitstring;
use mtvqubo::presentation::palette;
use mtvqubo::workflows;
use std::io::Write;

pub fn run(args: &DecodeArgs, stdout: &mut impl Write) -> Result<()> {
    let definition = config::load_problem(&args.problem)?;
    let bits = parse_bitstring(&args.bits)?;
    let decoded = workflows::analyze::decode(&definition, &bits)?;

    writeln!(stdout, "{:>6}  {:<12}  {}", "Site", "Linker", "Color")?;
    for (site, color) in decoded.node_colors.iter().enumerate() {
        writeln!(
            stdout,
            "{:>6}  {:<12}  {}",
            site,
            decoded.assignment.site_label(site),
            color
        )?;
    }

    if !decoded.edge_scale.is_empty() {
        writeln!(stdout)?;
        writeln!(stdout, "Edge weights ({}):", palette::EDGE_COLORMAP)?;
        for (weight, position) in &decoded.edge_scale {
            writeln!(stdout, "  {:>8}  {:.2}", weight, position)?;
        }
    }

    let penalties = decoded.penalties;
    writeln!(stdout)?;
    writeln!(stdout, "Composition: {:.4}", penalties.composition)?;
    writeln!(stdout, "Balance:     {:.4}", penalties.balance)?;
    writeln!(stdout, "Occupancy:   {:.4}", penalties.occupancy)?;
    writeln!(stdout, "Objective:   {:.4}", penalties.total())?;
    Ok(())
}
