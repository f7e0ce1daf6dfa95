//! Wiki audit command

use anyhow::{bail, Result};

use doxa_core::DiagnosticSeverity;

use super::Site;
use crate::output::Output;

/// Audit the wiki; fails when any error-level finding is reported
pub fn run(site: &Site, output: &Output) -> Result<()> {
    let wiki = site.wiki()?;
    let diagnostics = wiki.audit();
    output.print_diagnostics(&diagnostics);

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == DiagnosticSeverity::Error)
        .count();
    if errors > 0 {
        bail!("{} page(s) could not be loaded", errors);
    }
    Ok(())
}
