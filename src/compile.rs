//! Compilation of a `Criteria` tree into a MongoDB-style filter document.
//!
//! The output mirrors the AST one-to-one: no reordering, no merging of
//! predicates on the same field, no optimization. The storage layer's own
//! query planner is responsible for evaluation strategy.

use serde_json::{json, Value};

use crate::ast::{CompareOp, Criteria, LogicalOp};
use crate::value::FieldValue;

/// Compile a criteria tree into its filter document.
pub fn to_filter(criteria: &Criteria) -> Value {
    match criteria {
        Criteria::Compare { field, op, value } => {
            let operand = to_operand(value);
            match op {
                // Equality uses the implicit `{field: value}` form.
                CompareOp::Eq => json!({ field.as_str(): operand }),
                CompareOp::Ne => json!({ field.as_str(): { "$ne": operand } }),
                CompareOp::Gt => json!({ field.as_str(): { "$gt": operand } }),
                CompareOp::Lt => json!({ field.as_str(): { "$lt": operand } }),
            }
        }
        Criteria::Logical { op, left, right } => {
            let children = vec![to_filter(left), to_filter(right)];
            match op {
                LogicalOp::And => json!({ "$and": children }),
                LogicalOp::Or => json!({ "$or": children }),
            }
        }
    }
}

/// Render a typed value as an extended-JSON operand. Dates and object ids
/// get their extended-JSON wrappers so the document stays unambiguous.
fn to_operand(value: &FieldValue) -> Value {
    match value {
        FieldValue::ObjectId(id) => json!({ "$oid": id.to_string() }),
        FieldValue::Integer(n) => json!(n),
        FieldValue::Double(n) => json!(n),
        FieldValue::DateTime(dt) => json!({ "$date": dt.format("%Y-%m-%dT%H:%M:%S").to_string() }),
        FieldValue::String(s) => json!(s),
    }
}
