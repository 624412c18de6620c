//! Apply command - run one operation over an input array

use super::render;
use crate::config::OutputFormat;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use tmplfunc_runtime::conversion::{from_json, from_json_untyped};
use tmplfunc_runtime::simple::simple_functions;
use tmplfunc_runtime::{Operation, Value};

/// Arguments for `tmplfunc apply`
#[derive(Debug, Clone)]
pub struct ApplyArgs {
    pub op: Operation,
    pub func: String,
    pub values: Vec<String>,
    pub data: Option<PathBuf>,
    pub untyped: bool,
    pub output: OutputFormat,
}

/// Run the operation and print its result to stdout
pub fn run(args: &ApplyArgs) -> Result<()> {
    println!("{}", execute(args)?);
    Ok(())
}

/// Run the operation and return the rendered result
pub fn execute(args: &ApplyArgs) -> Result<String> {
    let table = simple_functions();
    let Some(func) = table.get(&args.func) else {
        let known: Vec<&str> = table.keys().map(String::as_str).collect();
        bail!(
            "Unknown function '{}' (available: {})",
            args.func,
            known.join(", ")
        );
    };

    let input = load_input(args)?;
    tracing::debug!(op = %args.op, func = %args.func, input = %input.type_name(), "applying");

    let result = args
        .op
        .apply(&input, func)
        .with_context(|| format!("{}({}) failed", args.op, args.func))?;
    render(&result, args.output)
}

/// Build the input value from `--data` or the positional values
fn load_input(args: &ApplyArgs) -> Result<Value> {
    let json = match &args.data {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read data file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in data file: {}", path.display()))?
        }
        None => serde_json::Value::Array(args.values.iter().map(|raw| parse_literal(raw)).collect()),
    };

    let value = if args.untyped {
        from_json_untyped(&json)
    } else {
        from_json(&json)
    };
    value.context("Input cannot be converted")
}

/// A JSON literal, or a plain string when the text is not valid JSON
fn parse_literal(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}
