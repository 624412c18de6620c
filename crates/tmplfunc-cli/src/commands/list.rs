//! List command - show every registered function with its signature

use crate::config::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use tmplfunc_runtime::simple::simple_functions;
use tmplfunc_runtime::{functions, merge, FuncMap, Signature};

/// One row; `params` and `results` carry the structured types
#[derive(Debug, Serialize)]
struct Entry {
    name: String,
    signature: String,
    #[serde(flatten)]
    types: Signature,
}

/// The operations merged with the demo functions
pub fn table() -> FuncMap {
    merge(&functions(), &simple_functions())
}

fn entries(table: &FuncMap) -> Vec<Entry> {
    table
        .iter()
        .filter_map(|(name, value)| {
            value.as_callable().map(|func| Entry {
                name: name.clone(),
                signature: func.signature().to_string(),
                types: func.signature().clone(),
            })
        })
        .collect()
}

/// Print the function table
pub fn run(output: OutputFormat) -> Result<()> {
    let entries = entries(&table());
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
            for entry in &entries {
                println!("{:<width$}  {}", entry.name, entry.signature, width = width);
            }
        }
    }
    Ok(())
}
