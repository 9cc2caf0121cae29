//! runq: a small boolean filter-query language over a fixed set of typed
//! fields, compiled to MongoDB-style filter documents.
//!
//! ```
//! use runq::{parse_and_compile, FieldRegistry};
//!
//! let fields = FieldRegistry::default();
//! let filter = parse_and_compile(&fields, "(duration gt 1000) AND (distance lt 2500)").unwrap();
//! assert_eq!(
//!     filter,
//!     serde_json::json!({ "$and": [
//!         { "duration": { "$gt": 1000 } },
//!         { "distance": { "$lt": 2500.0 } },
//!     ] })
//! );
//! ```

pub mod ast;
pub mod compile;
pub mod evaluator;
pub mod fields;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{CompareOp, Criteria, LogicalOp, Token};
pub use compile::to_filter;
pub use fields::{FieldRegistry, FieldType};
pub use lexer::Lexer;
pub use parser::{ParseError, QueryParser};
pub use value::{FieldValue, ObjectId};

/// Parse a query string and compile it into a filter document in one call.
///
/// This is the boundary the surrounding application consumes: the registry
/// is built once at startup, and every search request funnels its query
/// string through here. All failures are [`ParseError`]s attributable to
/// the input, never to process state.
pub fn parse_and_compile(
    fields: &FieldRegistry,
    query: &str,
) -> Result<serde_json::Value, ParseError> {
    let criteria = QueryParser::new(fields).parse(query)?;
    Ok(to_filter(&criteria))
}
