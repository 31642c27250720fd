//! `smbulk fields`: print the field catalog.

use serde::Serialize;
use tabled::Tabled;

use smbulk_core::{CATALOG, FieldSpec};

use crate::cli::FieldsArgs;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct FieldEntry {
    number: usize,
    #[serde(flatten)]
    spec: &'static FieldSpec,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Suggested values")]
    options: String,
}

fn row(entry: &FieldEntry) -> FieldRow {
    FieldRow {
        number: entry.number,
        name: entry.spec.name,
        kind: entry.spec.kind.to_string(),
        options: entry
            .spec
            .hint
            .map(|hint| hint.options.join(", "))
            .unwrap_or_default(),
    }
}

pub fn handle(args: &FieldsArgs) -> Result<(), CliError> {
    let entries: Vec<FieldEntry> = CATALOG
        .iter()
        .enumerate()
        .map(|(idx, spec)| FieldEntry {
            number: idx + 1,
            spec,
        })
        .collect();

    let out = output::render_list(args.output, &entries, row, |e| {
        e.spec.name.to_owned()
    })?;
    output::print_output(&out)
}
