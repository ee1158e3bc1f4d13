use crate::cli::ProblemArgs;
use crate::error::{CliError, Result};
use mtvqubo::workflows::problem::{ProblemDefinition, ProblemFile};
use tracing::debug;

/// Loads the problem file and layers CLI flags, then `--set` values, over its penalties.
pub fn load_problem(args: &ProblemArgs) -> Result<ProblemDefinition> {
    debug!("Loading problem definition from file: {:?}", &args.problem);
    let mut file = ProblemFile::load(&args.problem)?;

    apply_flag_overrides(&mut file, args);
    apply_set_values(&mut file, &args.set_values)?;

    Ok(file.into_definition()?)
}

fn apply_flag_overrides(file: &mut ProblemFile, args: &ProblemArgs) {
    let penalties = &mut file.penalties;
    if let Some(w) = args.composition_weight {
        penalties.composition = Some(w);
    }
    if let Some(w) = args.occupancy_weight {
        penalties.occupancy = Some(w);
    }
    if let Some(w) = args.balance_weight {
        penalties.balance = Some(w);
    }
}

fn apply_set_values(file: &mut ProblemFile, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
            CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            ))
        })?;

        let value: f64 = value_str.parse().map_err(|_| {
            CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
        })?;

        let slot = match key {
            "penalties.composition" => &mut file.penalties.composition,
            "penalties.occupancy" => &mut file.penalties.occupancy,
            "penalties.balance" => &mut file.penalties.balance,
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        };
        debug!("Overriding {} = {}", key, value);
        *slot = Some(value);
    }
    Ok(())
}
