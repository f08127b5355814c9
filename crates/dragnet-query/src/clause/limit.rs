//! Row-count caps.

use crate::error::{CompileError, CompileResult};
use crate::plan::QueryPlan;

/// Validate and set the limit. The literal is parsed as a non-negative
/// integer before it may appear in SQL text; an empty string means no cap.
pub fn set_limit(plan: &mut QueryPlan, raw: &str) -> CompileResult<()> {
    if raw.is_empty() {
        return Ok(());
    }
    let n: u64 = raw
        .parse()
        .map_err(|_| CompileError::InvalidLimit(raw.to_string()))?;
    plan.limit = Some(n);
    Ok(())
}
