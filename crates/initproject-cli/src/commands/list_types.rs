//! `initproject --list-types`.

use std::io;

use initproject_core::prelude::{ProjectTypeDescriptor, ProjectTypeRegistry};

use crate::{cli::OutputFormat, error::CliResult, output::OutputManager};

pub fn execute(registry: &ProjectTypeRegistry, output: &OutputManager) -> CliResult<()> {
    let descriptors: Vec<_> = registry.list_available().collect();

    let text = match output.format() {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&descriptors).map_err(io::Error::from)?;
            json.push('\n');
            json
        }
        _ => render_listing(&descriptors),
    };

    output.data(&text)?;
    Ok(())
}

/// Heading, then one tab-separated `name` / description line per type.
pub fn render_listing(descriptors: &[ProjectTypeDescriptor]) -> String {
    let mut text = String::from("available project types:\n");
    for descriptor in descriptors {
        text.push_str(&format!(
            "\t{}\t{}\n",
            descriptor.name, descriptor.short_description
        ));
    }
    text
}
