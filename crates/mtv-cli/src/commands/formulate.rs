use crate::cli::FormulateArgs;
use crate::config;
use crate::error::Result;
use mtvqubo::core::io::lp;
use mtvqubo::workflows;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

pub fn run(args: &FormulateArgs, stdout: &mut impl Write) -> Result<()> {
    let definition = config::load_problem(&args.problem)?;
    let program = workflows::formulate::run(&definition)?;

    match &args.output {
        Some(path) => {
            info!("Writing LP model to {:?}", path);
            let mut writer = BufWriter::new(File::create(path)?);
            lp::write_lp(&program, &mut writer)?;
            writer.flush()?;
            writeln!(
                stdout,
                "Wrote {} binary variables to {}",
                program.num_variables(),
                path.display()
            )?;
        }
        None => lp::write_lp(&program, stdout)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const PROBLEM: &str = r#"
        [linkers]
        types = ["A", "B"]
        required-counts = { A = 1, B = 1 }
        lengths = { A = 1.0, B = 2.0 }

        [graph]
        sites = 2
        edges = [{ source = 0, target = 1, weight = 1.0 }]
    "#;

    fn formulate_args(extra: &[&str]) -> FormulateArgs {
        let mut argv = vec!["mtv", "formulate"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Formulate(args) => args,
            _ => panic!("Expected 'formulate' subcommand"),
        }
    }

    #[test]
    fn writes_lp_model_to_stdout_when_no_output_given() {
        let dir = tempdir().unwrap();
        let problem = dir.path().join("problem.toml");
        fs::write(&problem, PROBLEM).unwrap();

        let args = formulate_args(&["-p", problem.to_str().unwrap()]);
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("MTV Porous Material Cost Function"));
        assert!(text.contains("Binaries\n q_0_A q_0_B q_1_A q_1_B\n"));
    }

    #[test]
    fn writes_lp_model_to_output_file() {
        let dir = tempdir().unwrap();
        let problem = dir.path().join("problem.toml");
        let model = dir.path().join("model.lp");
        fs::write(&problem, PROBLEM).unwrap();

        let args = formulate_args(&["-p", problem.to_str().unwrap(), "-o", model.to_str().unwrap()]);
        let mut out = Vec::new();
        run(&args, &mut out).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("Wrote 4 binary variables"));
        assert!(fs::read_to_string(model).unwrap().ends_with("End\n"));
    }
}
