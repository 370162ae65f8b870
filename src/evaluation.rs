use crate::{
    ast::Node,
    environment::Environment,
    error::EvaluationError,
    objects::{object, Array, Boolean, Float, Integer, Object, Str},
    operations::Operations,
    rules::{RuleNode, RuleToken, TokenKind},
    token::Position,
};

/// Evaluates rule trees against an [`Environment`] with the functions of some [`Operations`].
///
/// Every operator, `and` and `or` included, is looked up in the tables: both operands are always
/// evaluated.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    operations: &'a Operations<TokenKind>,
    environment: &'a Environment,
}

impl<'a> Evaluator<'a> {
    pub fn new(operations: &'a Operations<TokenKind>, environment: &'a Environment) -> Self {
        Self {
            operations,
            environment,
        }
    }

    pub fn evaluate(&self, node: &RuleNode) -> Result<Box<dyn Object>, EvaluationError> {
        match node {
            Node::Ident(ident) => self.lookup(ident.token.value(), ident.token.position()),
            Node::Value(value) => self.decode(&value.token),
            Node::BinaryOp(operation) if operation.token.key() == TokenKind::Dot => {
                let Some((name, position)) = path(node) else {
                    return Err(unsupported(node));
                };
                self.lookup(&name, position)
            }
            Node::BinaryOp(operation) => {
                let left = self.evaluate(&operation.left)?;
                let right = self.evaluate(&operation.right)?;
                let operator = operation.token.key();
                let position = operation.token.position();
                let binary = &self.operations.binary;
                let Some(function) = binary.get(operator, left.kind(), right.kind()) else {
                    return Err(EvaluationError::MissingBinaryOperation {
                        operator,
                        left: left.kind().name(),
                        right: right.kind().name(),
                        position,
                    });
                };
                function(left.as_ref(), right.as_ref())
                    .ok_or(EvaluationError::NoResult { operator, position })
            }
            Node::PrefixOp(operation) => {
                self.apply_unary(&operation.token, self.evaluate(&operation.operand)?)
            }
            Node::PostfixOp(operation) => {
                self.apply_unary(&operation.token, self.evaluate(&operation.operand)?)
            }
            Node::Sequence(sequence) => {
                let items = sequence
                    .items
                    .iter()
                    .map(|item| self.evaluate(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(object(Array(items)))
            }
        }
    }

    fn lookup(&self, name: &str, position: Position) -> Result<Box<dyn Object>, EvaluationError> {
        match self.environment.get(name) {
            Ok(Some(value)) => Ok(value.clone_object()),
            Ok(None) => Err(EvaluationError::UndefinedVariable {
                name: name.to_owned(),
                position,
            }),
            Err(_) => Err(EvaluationError::UnknownIdentifier {
                name: name.to_owned(),
                position,
            }),
        }
    }

    fn decode(&self, token: &RuleToken) -> Result<Box<dyn Object>, EvaluationError> {
        let transforms = &self.operations.transforms;
        let text = Str::from(token.value());
        let value = match token.key() {
            TokenKind::Number => transforms.call::<Integer>(&text).map(object),
            TokenKind::Float => transforms.call::<Float>(&text).map(object),
            TokenKind::True | TokenKind::False => transforms.call::<Boolean>(&text).map(object),
            TokenKind::String => Some(object(text)),
            _ => None,
        };
        value.ok_or_else(|| EvaluationError::InvalidLiteral {
            literal: token.raw_value().to_owned(),
            position: token.position(),
        })
    }

    fn apply_unary(
        &self,
        operator: &RuleToken,
        operand: Box<dyn Object>,
    ) -> Result<Box<dyn Object>, EvaluationError> {
        let (position, operator) = (operator.position(), operator.key());
        let Some(function) = self.operations.unary.get(operator, operand.kind()) else {
            return Err(EvaluationError::MissingUnaryOperation {
                operator,
                operand: operand.kind().name(),
                position,
            });
        };
        function(operand.as_ref()).ok_or(EvaluationError::NoResult { operator, position })
    }
}

// The joined name of `a.b.c`, at the position of `a`.
fn path(node: &RuleNode) -> Option<(String, Position)> {
    match node {
        Node::Ident(ident) => Some((ident.token.value().to_owned(), ident.token.position())),
        Node::BinaryOp(operation) if operation.token.key() == TokenKind::Dot => {
            let (left, position) = path(&operation.left)?;
            let (right, _) = path(&operation.right)?;
            Some((format!("{left}.{right}"), position))
        }
        _ => None,
    }
}

fn unsupported(node: &RuleNode) -> EvaluationError {
    EvaluationError::UnsupportedNode {
        node: format!("{} {:?}", node.kind(), node.token().raw_value()),
        position: node.token().position(),
    }
}
