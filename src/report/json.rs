use serde::Serialize;

use crate::model::results::CompositeResult;

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub result: &'a CompositeResult,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(result: &'a CompositeResult) -> Self {
        Self {
            tool: TOOL_NAME,
            version: TOOL_VERSION,
            result,
        }
    }
}

pub fn render_result_json(
    result: &CompositeResult,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    let envelope = ReportEnvelope::new(result);
    if pretty {
        serde_json::to_string_pretty(&envelope)
    } else {
        serde_json::to_string(&envelope)
    }
}
