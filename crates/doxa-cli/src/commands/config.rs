//! Config command handler

use anyhow::Result;

use super::Site;
use crate::output::{Output, OutputFormat};

/// Show the effective configuration
pub fn show(site: &Site, output: &Output) -> Result<()> {
    let content_root = site.content_root();

    match output.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "source": site.source.as_ref().map(|p| p.display().to_string()),
                "content_root": content_root.display().to_string(),
                "config": site.config,
            });
            output.print_json(&json);
        }
        OutputFormat::Quiet => {
            println!("{}", content_root.display());
        }
        OutputFormat::Human => {
            match &site.source {
                Some(path) => println!("# Loaded from {}", path.display()),
                None => println!("# Built-in defaults (no config file found)"),
            }
            println!("# Content root: {}", content_root.display());
            print!("{}", site.config.to_yaml()?);
        }
    }

    Ok(())
}
