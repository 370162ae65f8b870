use crate::{rules::TokenKind, token::Position};
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
pub enum EvaluationError {
    #[error("failed to parse the expression")]
    Parse,
    #[error("{position}: unknown identifier {name:?}")]
    UnknownIdentifier { name: String, position: Position },
    #[error("{position}: variable {name:?} is undefined")]
    UndefinedVariable { name: String, position: Position },
    #[error("{position}: invalid literal {literal:?}")]
    InvalidLiteral { literal: String, position: Position },
    #[error("{position}: no operation {left} {operator} {right}")]
    MissingBinaryOperation {
        operator: TokenKind,
        left: &'static str,
        right: &'static str,
        position: Position,
    },
    #[error("{position}: no operation {operator} {operand}")]
    MissingUnaryOperation {
        operator: TokenKind,
        operand: &'static str,
        position: Position,
    },
    #[error("{position}: operation {operator} has no result")]
    NoResult {
        operator: TokenKind,
        position: Position,
    },
    #[error("{position}: cannot evaluate {node}")]
    UnsupportedNode { node: String, position: Position },
}
