//! Rendering of registry contents for the terminal.

use std::{
    io::{self, Write},
    path::Path,
};

use petreg::{Registry, storage::SkippedLine};

use crate::cli::terminal::{Colorize, rule};

/// Writes every animal, separated by rules.
pub fn list<W: Write>(out: &mut W, registry: &Registry) -> io::Result<()> {
    if registry.is_empty() {
        return writeln!(out, "{}", "⚠ No animals registered!".warning());
    }

    writeln!(out, "\n{}", "🐾 REGISTERED ANIMALS 🐾".info())?;
    for animal in registry.list() {
        writeln!(out, "{animal}")?;
        writeln!(out, "{}", rule())?;
    }
    Ok(())
}

/// Writes every animal called `name`, or a notice if there are none.
pub fn matches<W: Write>(out: &mut W, registry: &Registry, name: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "🔎 SEARCH RESULTS:".info())?;

    let mut found = false;
    for animal in registry.find(name) {
        writeln!(out, "{animal}")?;
        found = true;
    }

    if !found {
        writeln!(
            out,
            "{}",
            format!("⚠ No animal found with the name '{}'.", name.trim()).warning()
        )?;
    }
    Ok(())
}

/// Writes a warning for each line skipped during a load.
pub fn skipped<W: Write>(out: &mut W, path: &Path, skipped: &[SkippedLine]) -> io::Result<()> {
    for line in skipped {
        writeln!(
            out,
            "{}",
            format!(
                "⚠ Skipping {}:{}: {} ({})",
                path.display(),
                line.line_number,
                line.reason,
                line.content
            )
            .warning()
        )?;
    }
    Ok(())
}
