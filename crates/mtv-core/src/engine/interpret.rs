use super::error::DecodingError;
use crate::core::linkers::{LinkerCatalogue, VariableLayout};
use std::fmt;

/// Label reported for a site with no linker assigned.
pub const EMPTY_SITE: &str = "-";

/// Per-site linker assignment decoded from a binary solution vector.
///
/// A site may hold zero, one or several linker types; the occupancy penalty is soft,
/// so all three cases are reported as they appear in the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    sites: Vec<Vec<String>>,
}

impl Assignment {
    pub fn sites(&self) -> &[Vec<String>] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Linker types at `site`, comma-joined in catalogue order, or [`EMPTY_SITE`].
    pub fn site_label(&self, site: usize) -> String {
        match self.sites.get(site) {
            Some(types) if !types.is_empty() => types.join(","),
            _ => EMPTY_SITE.to_string(),
        }
    }

    pub fn labels(&self) -> Vec<String> {
        (0..self.sites.len()).map(|i| self.site_label(i)).collect()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, label) in self.labels().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", label)?;
        }
        write!(f, "]")
    }
}

/// Decodes a raw solution vector into per-site linker assignments.
///
/// Site `i` reads the bits of [`VariableLayout::site_range`]; a bit equal to 1 assigns the
/// linker type at the same offset in `catalogue`.
///
/// # Errors
///
/// Returns [`DecodingError::LengthMismatch`] if `bits` is not exactly
/// `site_count × catalogue.len()` long.
pub fn interpret(
    bits: &[u8],
    site_count: usize,
    catalogue: &LinkerCatalogue,
) -> Result<Assignment, DecodingError> {
    let layout = VariableLayout::new(site_count, catalogue.len());
    if bits.len() != layout.len() {
        return Err(DecodingError::LengthMismatch {
            expected: layout.len(),
            actual: bits.len(),
        });
    }

    let sites: Vec<Vec<String>> = (0..site_count)
        .map(|site| {
            catalogue
                .iter()
                .enumerate()
                .filter(|&(t, _)| bits[layout.index(site, t)] == 1)
                .map(|(_, label)| label.to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(Assignment { sites })
}
