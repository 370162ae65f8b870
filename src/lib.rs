//! An embeddable expression engine: a trie-driven tokenizer, a Pratt parser and runtime values
//! whose operations are dispatched on the kinds of their operands.
//!
//! # Examples
//!
//! Evaluating a rule with the built-in language:
//!
//! ```
//! use erules::{builtins, objects::Boolean, Environment, RuleEngine, VariableDefinition};
//!
//! let engine = RuleEngine::new();
//! let operations = builtins::operations();
//!
//! // Declare the variables, then assign them
//! let mut environment = Environment::new(&[
//!     VariableDefinition::integer("exchange_id"),
//!     VariableDefinition::string_list("deal_ids"),
//!     VariableDefinition::float("bidfloor"),
//! ])
//! .unwrap();
//! environment.with_integer("exchange_id", 1).unwrap();
//! environment.with_string_list("deal_ids", &["deal-1", "deal-2"]).unwrap();
//! environment.with_float("bidfloor", 0.5).unwrap();
//!
//! let expression = r#"exchange_id = 1 and "deal-2" in deal_ids and bidfloor < 1.0"#;
//! let result = engine.evaluate(expression, &operations, &environment).unwrap();
//! assert_eq!(Some(&Boolean(true)), result.downcast_ref::<Boolean>());
//! ```
//!
//! Building a language from scratch with a [`Lexer`] and a [`Grammar`]:
//!
//! ```
//! use erules::{Grammar, Lexer, Parser, Token, Tokenizer, LOWEST_PRECEDENCE};
//!
//! let mut lexer = Lexer::new();
//! lexer.set_number_key('n');
//! lexer.set_key('+', "+");
//!
//! let mut grammar: Grammar<i64, Token<char>> = Grammar::new();
//! grammar.set_nud('n', |parser| parser.current().value().parse::<i64>().ok());
//! grammar.set_led_with_precedence('+', 1, |parser, left| {
//!     parser.advance();
//!     let right = parser.parse_expression(1)?;
//!     Some(left + right)
//! });
//!
//! let tokens = Tokenizer::new(&lexer, "1 + 2 + 39").tokenize();
//! let mut parser = Parser::new(&grammar, tokens);
//! assert_eq!(Some(42), parser.parse_expression(LOWEST_PRECEDENCE));
//! ```
//!
//! # Rule language
//!
//! The language set up by [`RuleEngine`] supports:
//!
//! * Boolean operators: `and` (`&&`), `or` (`||`) and `not` (`!`);
//! * Comparison: `=` (`==`), `!=` (`<>`), `<`, `<=`, `>`, `>=`;
//! * Arithmetic: `+`, `-`, `*`, `/` and `%`, with checked integer arithmetic;
//! * Ranges: `low..high` (closed) and `low...high` (half-open, integers only);
//! * Membership: `in` for intervals, sequences such as `("US", "CA")` and substrings;
//! * Member access: `user.country` resolves the variable named `user.country`;
//! * Literals: integers (`1_000`), floats (`2.5e-3`), strings (`"a"` or `'a'`), `true` and
//!   `false`. `[not]` quotes an identifier.
//!
//! An operation without a function for its operand kinds fails the evaluation; new ones can be
//! registered in the [`Operations`] tables.
//!
//! # Design
//!
//! * The configuration ([`Lexer`], [`Grammar`], [`Operations`]) is immutable while in use, and
//!   every run gets its own [`Tokenizer`] and [`Parser`], so the configuration can be shared
//!   between threads;
//! * The tokenizer finds the longest literal matching at the cursor with a [`Trie`] and lets the
//!   action registered for it produce the token;
//! * The parser never fails with an error: a missing handler or a missing token makes the
//!   current expression `None`;
//! * Every runtime value is an [`objects::Object`] with a [`objects::Kind`]; the dispatch tables
//!   are keyed on the kinds of the operands.
mod ast;
pub mod builtins;
mod environment;
mod error;
mod evaluation;
mod lexer;
pub mod objects;
mod operations;
mod parser;
pub mod rendering;
pub mod rules;
pub mod scanner;
#[cfg(test)]
mod test_utils;
mod token;
mod trie;

pub use crate::{
    ast::{BinaryOp, Ident, Node, PostfixOp, PrefixOp, Sequence, TreeNode, Value},
    environment::{Environment, EnvironmentError, VariableDefinition, VariableKind},
    error::EvaluationError,
    evaluation::Evaluator,
    lexer::{Action, Cursor, DefaultAction, Lexer, Seed, Tokenizer},
    operations::{
        BinaryFunction, BinaryOperations, Operations, TransformFunction, Transforms,
        UnaryFunction, UnaryOperations,
    },
    parser::{Grammar, Led, Nud, Parser, ParserState, LOWEST_PRECEDENCE},
    rules::{Precedence, RuleEngine, RuleNode, RuleParser, RuleToken, TokenKind},
    token::{Lexeme, Position, Token, TokenKey},
    trie::{Trie, TrieMatch},
};
