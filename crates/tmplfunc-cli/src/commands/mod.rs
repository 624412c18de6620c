pub mod apply;
pub mod list;

use crate::config::OutputFormat;
use anyhow::Result;
use tmplfunc_runtime::conversion::to_json;
use tmplfunc_runtime::Value;

/// Render a value for stdout in the configured format
pub fn render(value: &Value, output: OutputFormat) -> Result<String> {
    Ok(match output {
        OutputFormat::Text => value.to_string(),
        OutputFormat::Json => serde_json::to_string(&to_json(value)?)?,
    })
}
