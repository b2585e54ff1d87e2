//! JSON rendering of analysis results for downstream tooling.

use crate::{Analysis, AnalysisError};

/// Render one analysis as pretty-printed JSON.
pub fn to_json(analysis: &Analysis) -> Result<String, AnalysisError> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Render a batch of analyses as JSON Lines, one object per buffer in input
/// order.
pub fn to_json_lines(analyses: &[Analysis]) -> Result<String, AnalysisError> {
    let mut output = String::new();
    for analysis in analyses {
        output.push_str(&serde_json::to_string(analysis)?);
        output.push('\n');
    }
    Ok(output)
}
