use crate::core::program::QuadraticProgram;
use std::io::{self, Write};

const TERMS_PER_LINE: usize = 6;

struct TermWriter {
    out: String,
    written: usize,
}

impl TermWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            written: 0,
        }
    }

    fn push(&mut self, coeff: f64, body: &str) {
        if coeff == 0.0 {
            return;
        }
        if self.written > 0 && self.written % TERMS_PER_LINE == 0 {
            self.out.push_str("\n    ");
        }
        let sign = if coeff < 0.0 { '-' } else { '+' };
        let term = match (self.written, sign) {
            (0, '+') => format!("{} {}", coeff.abs(), body),
            (0, _) => format!("- {} {}", coeff.abs(), body),
            _ => format!(" {} {} {}", sign, coeff.abs(), body),
        };
        self.out.push_str(&term);
        self.written += 1;
    }
}

/// Writes `program` in CPLEX LP format as a minimization.
///
/// Quadratic objective terms go in the `[ ... ] / 2` block with doubled coefficients, as
/// the format requires. The program has no constraints; every variable is declared binary.
pub fn write_lp(program: &QuadraticProgram, writer: &mut impl Write) -> io::Result<()> {
    let objective = program.objective();
    let name = |i: usize| {
        program
            .variable(i)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| format!("x{}", i))
    };

    let mut terms = TermWriter::new();
    for (&i, &c) in &objective.linear {
        terms.push(c, &name(i));
    }

    let mut quadratic = TermWriter::new();
    for (&(i, j), &c) in &objective.quadratic {
        let body = if i == j {
            format!("{}^2", name(i))
        } else {
            format!("{} * {}", name(i), name(j))
        };
        quadratic.push(2.0 * c, &body);
    }

    writeln!(writer, "\\ Problem name: {}", program.name())?;
    writeln!(writer)?;
    writeln!(writer, "Minimize")?;

    write!(writer, " obj:")?;
    if terms.written > 0 {
        write!(writer, " {}", terms.out)?;
    }
    if quadratic.written > 0 {
        let joiner = if terms.written > 0 { " + " } else { " " };
        write!(writer, "{}[ {} ] / 2", joiner, quadratic.out)?;
    }
    if objective.constant != 0.0 || (terms.written == 0 && quadratic.written == 0) {
        let sign = if objective.constant < 0.0 { '-' } else { '+' };
        write!(writer, " {} {}", sign, objective.constant.abs())?;
    }
    writeln!(writer)?;

    writeln!(writer, "Subject To")?;
    writeln!(writer)?;
    writeln!(writer, "Binaries")?;
    for chunk in program.variables().chunks(TERMS_PER_LINE) {
        let names: Vec<&str> = chunk.iter().map(|v| v.name.as_str()).collect();
        writeln!(writer, " {}", names.join(" "))?;
    }
    writeln!(writer, "End")?;
    Ok(())
}
