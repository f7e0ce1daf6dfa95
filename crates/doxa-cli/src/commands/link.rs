//! Link and anchor command handlers

use anyhow::Result;

use doxa_core::{resolve_link, slugify};

use super::Site;
use crate::output::Output;

/// Classify each raw target against the configured catalog
pub fn resolve(site: &Site, targets: &[String], output: &Output) -> Result<()> {
    let catalog = site.config.catalog()?;
    let results: Vec<_> = targets
        .iter()
        .map(|target| (target.clone(), resolve_link(target, &catalog)))
        .collect();
    output.print_resolved(&results);
    Ok(())
}

/// Anchor id each heading text would receive
pub fn anchor(texts: &[String], output: &Output) -> Result<()> {
    let results: Vec<_> = texts
        .iter()
        .map(|text| (text.clone(), slugify(text)))
        .collect();
    output.print_anchors(&results);
    Ok(())
}
