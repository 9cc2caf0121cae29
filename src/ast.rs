//! Filter criteria AST.
//!
//! A parsed query is an immutable binary tree of [`Criteria`] nodes. Leaves
//! compare one registered field against a typed value; internal nodes combine
//! two subtrees with a boolean connective. Trees are built once per parse
//! call, handed to the compiler, and dropped; no node is mutated after
//! construction.

use crate::value::FieldValue;

/// Raw token produced by the lexer. A `Text` token is either a boolean
/// connective or a command fragment; the distinction is made by the parser,
/// not the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    Text(String),
}

/// Comparison operator of a leaf criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl CompareOp {
    /// Parse an operator keyword, case-insensitively.
    pub fn from_keyword(op: &str) -> Option<CompareOp> {
        match op.to_ascii_lowercase().as_str() {
            "eq" => Some(CompareOp::Eq),
            "ne" => Some(CompareOp::Ne),
            "gt" => Some(CompareOp::Gt),
            "lt" => Some(CompareOp::Lt),
            _ => None,
        }
    }
}

/// Boolean connective of an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Recognize a connective token, case-insensitively. The token itself
    /// keeps its original casing; only recognition ignores case.
    pub fn from_token(token: &str) -> Option<LogicalOp> {
        if token.eq_ignore_ascii_case("AND") {
            Some(LogicalOp::And)
        } else if token.eq_ignore_ascii_case("OR") {
            Some(LogicalOp::Or)
        } else {
            None
        }
    }

    /// Operator precedence. Higher binds tighter: AND outranks OR.
    pub fn precedence(&self) -> u8 {
        match self {
            LogicalOp::And => 2,
            LogicalOp::Or => 1,
        }
    }
}

/// A node of the filter AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Criteria {
    /// Leaf: `field op value`.
    Compare {
        field: String,
        op: CompareOp,
        value: FieldValue,
    },
    /// Internal node: boolean combination of two subtrees. Owns both
    /// children exclusively; the tree is always acyclic.
    Logical {
        op: LogicalOp,
        left: Box<Criteria>,
        right: Box<Criteria>,
    },
}

impl Criteria {
    pub fn compare(field: impl Into<String>, op: CompareOp, value: FieldValue) -> Criteria {
        Criteria::Compare {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn and(left: Criteria, right: Criteria) -> Criteria {
        Criteria::Logical {
            op: LogicalOp::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Criteria, right: Criteria) -> Criteria {
        Criteria::Logical {
            op: LogicalOp::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
