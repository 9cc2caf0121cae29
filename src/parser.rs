//! Query parsing: infix token stream to `Criteria` tree.
//!
//! Parsing runs in three passes over owned data, with no shared mutable
//! state: the lexer output is reordered into postfix (Reverse Polish)
//! form with the shunting-yard algorithm, then folded into a [`Criteria`]
//! tree by a stack machine, with each command fragment decoded against the
//! [`FieldRegistry`]. Every failure mode maps to a [`ParseError`] variant;
//! all of them mean malformed client input, never a process fault.

use thiserror::Error;
use tracing::debug;

use crate::ast::{CompareOp, Criteria, LogicalOp, Token};
use crate::fields::FieldRegistry;
use crate::lexer::Lexer;

/// Why a query string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A command fragment did not split into exactly `field op value`.
    #[error("illegal query format: '{command}'")]
    Format { command: String },

    /// The comparison keyword is not one of eq/gt/lt/ne.
    #[error("unsupported comparison operator: '{op}'")]
    UnsupportedOperator { op: String },

    /// The field is not present in the registry.
    #[error("unknown query field: '{field}'")]
    UnknownField { field: String },

    /// The raw value does not coerce to the field's declared type.
    #[error("invalid value '{value}' for field '{field}': expected {expected}")]
    ValueCoercion {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Unbalanced parentheses, a missing connective or operand, or an
    /// empty query.
    #[error("malformed query expression: {reason}")]
    MalformedExpression { reason: String },
}

impl ParseError {
    fn malformed(reason: impl Into<String>) -> ParseError {
        ParseError::MalformedExpression {
            reason: reason.into(),
        }
    }
}

/// Parses filter queries against one immutable field registry.
///
/// The registry is only read, so a single parser (or registry) may be
/// shared across threads; each call to [`parse`](QueryParser::parse) owns
/// its own token buffers and stacks.
pub struct QueryParser<'a> {
    fields: &'a FieldRegistry,
}

impl<'a> QueryParser<'a> {
    pub fn new(fields: &'a FieldRegistry) -> Self {
        QueryParser { fields }
    }

    /// Parse a query string into a `Criteria` tree.
    pub fn parse(&self, query: &str) -> Result<Criteria, ParseError> {
        debug!(query, "parsing query");

        let tokens = Lexer::new(query).tokenize();
        let postfix = to_postfix(tokens)?;
        debug!(?postfix, "postfix token order");

        let criteria = self.build(postfix)?;
        debug!(?criteria, "parsed criteria");
        Ok(criteria)
    }

    /// Fold a postfix token sequence into a single tree with a stack
    /// machine. The first-popped operand becomes the right child, the
    /// second-popped the left.
    fn build(&self, postfix: Vec<Token>) -> Result<Criteria, ParseError> {
        let mut stack: Vec<Criteria> = Vec::new();

        for token in postfix {
            let text = match token {
                Token::Text(text) => text,
                // to_postfix never emits parens.
                Token::LParen | Token::RParen => {
                    return Err(ParseError::malformed("unexpected parenthesis"));
                }
            };

            match LogicalOp::from_token(&text) {
                Some(op) => {
                    let top = stack
                        .pop()
                        .ok_or_else(|| ParseError::malformed("connective is missing an operand"))?;
                    let next = stack
                        .pop()
                        .ok_or_else(|| ParseError::malformed("connective is missing an operand"))?;
                    stack.push(Criteria::Logical {
                        op,
                        left: Box::new(next),
                        right: Box::new(top),
                    });
                }
                None => stack.push(self.parse_command(&text)?),
            }
        }

        let root = stack
            .pop()
            .ok_or_else(|| ParseError::malformed("empty query"))?;
        if !stack.is_empty() {
            return Err(ParseError::malformed("operand without a connective"));
        }
        Ok(root)
    }

    /// Decode one `field op value` command fragment into a leaf criterion.
    fn parse_command(&self, command: &str) -> Result<Criteria, ParseError> {
        let parts: Vec<&str> = command.split_whitespace().collect();

        let [field, op, raw_value] = parts[..] else {
            return Err(ParseError::Format {
                command: command.to_string(),
            });
        };

        let op = CompareOp::from_keyword(op).ok_or_else(|| ParseError::UnsupportedOperator {
            op: op.to_string(),
        })?;

        let field_type = self
            .fields
            .get(field)
            .ok_or_else(|| ParseError::UnknownField {
                field: field.to_string(),
            })?;

        let value = field_type
            .coerce(raw_value)
            .ok_or_else(|| ParseError::ValueCoercion {
                field: field.to_string(),
                value: raw_value.to_string(),
                expected: field_type.name(),
            })?;

        Ok(Criteria::compare(field, op, value))
    }
}

/// Shunting-yard conversion from infix to postfix order.
///
/// Connectives are left-associative, so an equal-precedence stack top is
/// popped before pushing. Command fragments pass straight through to the
/// output; only parens and connectives ever sit on the operator stack.
fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut operators: Vec<Token> = Vec::new();
    let mut output: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::LParen => operators.push(Token::LParen),
            Token::RParen => loop {
                match operators.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(ParseError::malformed("unmatched ')'")),
                }
            },
            Token::Text(text) => match LogicalOp::from_token(&text) {
                Some(op) => {
                    while stack_top_outranks(&operators, op) {
                        let popped = operators.pop().unwrap();
                        output.push(popped);
                    }
                    operators.push(Token::Text(text));
                }
                None => output.push(Token::Text(text)),
            },
        }
    }

    while let Some(op) = operators.pop() {
        if op == Token::LParen {
            return Err(ParseError::malformed("unmatched '('"));
        }
        output.push(op);
    }

    Ok(output)
}

/// Left-associativity: a stack-top connective of greater or equal
/// precedence is emitted before the incoming one is pushed.
fn stack_top_outranks(operators: &[Token], incoming: LogicalOp) -> bool {
    match operators.last() {
        Some(Token::Text(top)) => match LogicalOp::from_token(top) {
            Some(top_op) => top_op.precedence() >= incoming.precedence(),
            None => false,
        },
        _ => false,
    }
}
