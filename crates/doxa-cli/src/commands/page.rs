//! Page command handlers

use anyhow::{Context, Result};
use clap::ValueEnum;

use doxa_core::to_html;

use super::Site;
use crate::output::Output;

/// How `render` prints a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// HTML fragment
    Html,
    /// Full page (document tree, navigation, edit link) as JSON
    Json,
    /// Table of contents built from the headings
    Toc,
}

/// List catalog pages
pub fn list(site: &Site, output: &Output) -> Result<()> {
    let wiki = site.wiki()?;
    let index = &wiki.config().index_page;
    output.print_pages(&wiki.navigation(index));
    Ok(())
}

/// Render one page, addressed by id or by request path
pub fn render(site: &Site, page: &str, format: RenderFormat, output: &Output) -> Result<()> {
    let wiki = site.wiki()?;
    let loaded = if page.starts_with('/') {
        wiki.load_path(page)
    } else {
        wiki.load_page(page)
    }
    .with_context(|| format!("Failed to load page '{}'", page))?;
    log::info!("Rendered page '{}' ({})", loaded.entry.id, loaded.document.digest);

    let format = if output.is_json() {
        RenderFormat::Json
    } else {
        format
    };

    match format {
        RenderFormat::Html => {
            output.print_page_header(&loaded.entry, loaded.edit_url.as_deref());
            print!("{}", to_html(&loaded.document));
        }
        RenderFormat::Json => output.print_json(&loaded),
        RenderFormat::Toc => output.print_toc(&loaded.document.headings),
    }
    Ok(())
}
