//! The reference rule language built on top of the engine.

use crate::{
    ast::Node,
    environment::Environment,
    error::EvaluationError,
    evaluation::Evaluator,
    lexer::{Lexer, Tokenizer},
    objects::Object,
    operations::Operations,
    parser::{Grammar, Parser},
    token::Token,
};
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TokenKind {
    #[default]
    Eof,
    And,
    Or,
    Not,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    In,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Dot,
    DotDot,
    DotDotDot,
    Comma,
    LParen,
    RParen,
    Ident,
    Number,
    Float,
    String,
    True,
    False,
}

impl Display for TokenKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let spelling = match self {
            Self::Eof => "<eof>",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::In => "in",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Dot => ".",
            Self::DotDot => "..",
            Self::DotDotDot => "...",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Ident => "<ident>",
            Self::Number => "<number>",
            Self::Float => "<float>",
            Self::String => "<string>",
            Self::True => "true",
            Self::False => "false",
        };
        write!(formatter, "{spelling}")
    }
}

/// Binding powers, from the loosest to the tightest.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest = -1,
    Or = 1,
    And,
    Comparison,
    In,
    Range,
    Sum,
    Product,
    Prefix,
    Member,
}

impl From<Precedence> for i32 {
    #[inline]
    fn from(precedence: Precedence) -> Self {
        precedence as i32
    }
}

pub type RuleToken = Token<TokenKind>;
pub type RuleNode = Node<TokenKind>;
pub type RuleParser<'grammar> = Parser<'grammar, RuleNode, RuleToken>;

/// The literal patterns of the rule language, with their keys.
const LITERALS: &[(TokenKind, &str)] = &[
    (TokenKind::And, "and"),
    (TokenKind::And, "&&"),
    (TokenKind::Or, "or"),
    (TokenKind::Or, "||"),
    (TokenKind::Not, "not"),
    (TokenKind::Not, "!"),
    (TokenKind::In, "in"),
    (TokenKind::True, "true"),
    (TokenKind::False, "false"),
    (TokenKind::Eq, "="),
    (TokenKind::Eq, "=="),
    (TokenKind::NotEq, "!="),
    (TokenKind::NotEq, "<>"),
    (TokenKind::Lt, "<"),
    (TokenKind::LtEq, "<="),
    (TokenKind::Gt, ">"),
    (TokenKind::GtEq, ">="),
    (TokenKind::LParen, "("),
    (TokenKind::RParen, ")"),
    (TokenKind::Plus, "+"),
    (TokenKind::Minus, "-"),
    (TokenKind::Mul, "*"),
    (TokenKind::Div, "/"),
    (TokenKind::Mod, "%"),
    (TokenKind::Comma, ","),
    (TokenKind::Dot, "."),
    (TokenKind::DotDot, ".."),
    (TokenKind::DotDotDot, "..."),
];

const BINARY_OPERATORS: &[(TokenKind, Precedence)] = &[
    (TokenKind::Or, Precedence::Or),
    (TokenKind::And, Precedence::And),
    (TokenKind::Eq, Precedence::Comparison),
    (TokenKind::NotEq, Precedence::Comparison),
    (TokenKind::Lt, Precedence::Comparison),
    (TokenKind::LtEq, Precedence::Comparison),
    (TokenKind::Gt, Precedence::Comparison),
    (TokenKind::GtEq, Precedence::Comparison),
    (TokenKind::In, Precedence::In),
    (TokenKind::DotDot, Precedence::Range),
    (TokenKind::DotDotDot, Precedence::Range),
    (TokenKind::Plus, Precedence::Sum),
    (TokenKind::Minus, Precedence::Sum),
    (TokenKind::Mul, Precedence::Product),
    (TokenKind::Div, Precedence::Product),
    (TokenKind::Mod, Precedence::Product),
    (TokenKind::Dot, Precedence::Member),
];

/// The tokenizer configuration of the rule language.
pub fn lexer() -> Lexer<TokenKind> {
    let mut lexer = Lexer::new();
    lexer.set_ident_key(TokenKind::Ident);
    lexer.set_number_key(TokenKind::Number);
    lexer.set_float_key(TokenKind::Float);
    for (key, literal) in LITERALS {
        lexer.set_key(*key, literal);
    }
    lexer.set_string_key(TokenKind::String, "\"", "\"");
    lexer.set_string_key(TokenKind::String, "'", "'");
    lexer.set_string_key(TokenKind::Ident, "[", "]");
    lexer
}

/// The parser configuration of the rule language.
pub fn grammar() -> Grammar<RuleNode, RuleToken> {
    let mut grammar = Grammar::new();
    grammar.set_nud(TokenKind::Ident, parse_ident);
    for key in [
        TokenKind::Number,
        TokenKind::Float,
        TokenKind::String,
        TokenKind::True,
        TokenKind::False,
    ] {
        grammar.set_nud(key, parse_value);
    }
    for key in [TokenKind::Not, TokenKind::Minus, TokenKind::Plus] {
        grammar.set_nud(key, parse_prefix);
    }
    grammar.set_nud(TokenKind::LParen, parse_group);

    for (key, precedence) in BINARY_OPERATORS {
        grammar.set_led_with_precedence(*key, (*precedence).into(), parse_binary);
    }
    grammar
}

fn parse_ident(parser: &mut RuleParser<'_>) -> Option<RuleNode> {
    Some(Node::ident(parser.current()))
}

fn parse_value(parser: &mut RuleParser<'_>) -> Option<RuleNode> {
    Some(Node::value(parser.current()))
}

fn parse_prefix(parser: &mut RuleParser<'_>) -> Option<RuleNode> {
    let operator = parser.current();
    parser.advance();
    let operand = parser.parse_expression(Precedence::Prefix.into())?;
    Some(Node::prefix(operator, operand))
}

fn parse_binary(parser: &mut RuleParser<'_>, left: RuleNode) -> Option<RuleNode> {
    let operator = parser.current();
    let precedence = parser.current_precedence();
    parser.advance();
    let right = parser.parse_expression(precedence)?;
    Some(Node::binary(operator, left, right))
}

// A parenthesized expression, or a sequence when it holds commas. The closing parenthesis is
// optional.
fn parse_group(parser: &mut RuleParser<'_>) -> Option<RuleNode> {
    let open = parser.current();
    if parser.expect(TokenKind::RParen) {
        return Some(Node::sequence(open, vec![]));
    }

    parser.advance();
    let first = parser.parse_expression(Precedence::Lowest.into())?;
    if parser.next_key() != TokenKind::Comma {
        parser.expect(TokenKind::RParen);
        return Some(first);
    }

    let mut items = vec![first];
    while parser.expect(TokenKind::Comma) {
        if parser.next_key() == TokenKind::RParen {
            break;
        }
        parser.advance();
        items.push(parser.parse_expression(Precedence::Lowest.into())?);
    }
    parser.expect(TokenKind::RParen);
    Some(Node::sequence(open, items))
}

/// The rule language, ready to parse and evaluate expressions.
///
/// The engine only holds configuration: every call works on its own tokenizer and parser, so a
/// single engine can be shared between threads.
///
/// # Examples
///
/// ```
/// use erules::{builtins, objects::Boolean, Environment, RuleEngine, VariableDefinition};
///
/// let engine = RuleEngine::new();
/// let operations = builtins::operations();
/// let mut environment = Environment::new(&[
///     VariableDefinition::integer("price"),
///     VariableDefinition::string("country"),
/// ])
/// .unwrap();
/// environment.with_integer("price", 250).unwrap();
/// environment.with_string("country", "CA").unwrap();
///
/// let result = engine
///     .evaluate(
///         r#"price in 100..900 and country in ("US", "CA")"#,
///         &operations,
///         &environment,
///     )
///     .unwrap();
///
/// assert_eq!(Some(&Boolean(true)), result.downcast_ref::<Boolean>());
/// ```
#[derive(Debug)]
pub struct RuleEngine {
    lexer: Lexer<TokenKind>,
    grammar: Grammar<RuleNode, RuleToken>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            lexer: lexer(),
            grammar: grammar(),
        }
    }

    #[inline]
    pub fn lexer(&self) -> &Lexer<TokenKind> {
        &self.lexer
    }

    /// The tokenizer configuration, to extend the language.
    #[inline]
    pub fn lexer_mut(&mut self) -> &mut Lexer<TokenKind> {
        &mut self.lexer
    }

    #[inline]
    pub fn grammar(&self) -> &Grammar<RuleNode, RuleToken> {
        &self.grammar
    }

    /// The parser configuration, to extend the language.
    #[inline]
    pub fn grammar_mut(&mut self) -> &mut Grammar<RuleNode, RuleToken> {
        &mut self.grammar
    }

    pub fn tokenize(&self, source: &str) -> Vec<RuleToken> {
        Tokenizer::new(&self.lexer, source).tokenize()
    }

    /// Parse one full expression; `None` when the source does not parse.
    ///
    /// Tokens following the expression are dropped with a warning.
    pub fn run(&self, source: &str) -> Option<RuleNode> {
        let mut parser = Parser::new(&self.grammar, self.tokenize(source));
        let root = parser.parse_expression(Precedence::Lowest.into());
        if root.is_none() {
            log::debug!("failed to parse {source:?}");
        } else if !parser.is_next_eof() {
            log::warn!(
                "ignored the input following {} in {source:?}",
                parser.current().position()
            );
        }
        root
    }

    /// Parse and evaluate an expression.
    pub fn evaluate(
        &self,
        source: &str,
        operations: &Operations<TokenKind>,
        environment: &Environment,
    ) -> Result<Box<dyn Object>, EvaluationError> {
        let root = self.run(source).ok_or(EvaluationError::Parse)?;
        Evaluator::new(operations, environment).evaluate(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering;

    fn lex_keys(source: &str) -> Vec<TokenKind> {
        let _ = env_logger::builder().is_test(true).try_init();
        RuleEngine::new()
            .tokenize(source)
            .iter()
            .map(Token::key)
            .collect()
    }

    fn parse(source: &str) -> Option<String> {
        let _ = env_logger::builder().is_test(true).try_init();
        let transforms = rendering::transforms::<TokenKind>();
        let root = RuleEngine::new().run(source)?;
        rendering::render(&transforms, &root)
    }

    #[test]
    fn can_lex_every_operator() {
        assert_eq!(
            vec![
                TokenKind::Eq,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::Lt,
                TokenKind::GtEq,
                TokenKind::Gt,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
            ],
            lex_keys("= == != <> <= < >= > && || !")
        );
        assert_eq!(
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Mod,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::DotDot,
                TokenKind::DotDotDot,
                TokenKind::LParen,
                TokenKind::RParen,
            ],
            lex_keys("+ - * / % , . .. ... ( )")
        );
    }

    #[test]
    fn can_lex_keywords_and_literals() {
        assert_eq!(
            vec![
                TokenKind::Not,
                TokenKind::True,
                TokenKind::And,
                TokenKind::False,
                TokenKind::Or,
                TokenKind::Ident,
                TokenKind::In,
                TokenKind::Number,
                TokenKind::DotDot,
                TokenKind::Float,
                TokenKind::Or,
                TokenKind::String,
            ],
            lex_keys(r#"not true and false or x in 1..2.5 or 'a'"#)
        );
    }

    #[test]
    fn can_lex_identifiers_starting_with_keywords() {
        assert_eq!(
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Ident],
            lex_keys("andbruh order trueish")
        );
    }

    #[test]
    fn can_lex_a_quoted_keyword_as_an_identifier() {
        let tokens = RuleEngine::new().tokenize("[not] = 1");

        assert_eq!(TokenKind::Ident, tokens[0].key());
        assert_eq!("not", tokens[0].value());
    }

    #[test]
    fn return_none_on_empty_input() {
        assert_eq!(None, parse(""));
        assert_eq!(None, parse("   "));
    }

    #[test]
    fn return_none_on_invalid_input() {
        assert_eq!(None, parse(")(invalid"));
        assert_eq!(None, parse("1 +"));
        assert_eq!(None, parse("* 2"));
    }

    #[test]
    fn keep_the_first_expression_of_a_misspelled_rule() {
        assert_eq!(Some("(1 > 0)".to_owned()), parse("1 > 0 adn 2 < 1"));
        assert_eq!(Some("a".to_owned()), parse("a b c"));
    }

    #[test]
    fn can_parse_with_precedences() {
        assert_eq!(Some("(1 + (2 * 3))".to_owned()), parse("1 + 2 * 3"));
        assert_eq!(Some("((1 * 2) + 3)".to_owned()), parse("1 * 2 + 3"));
        assert_eq!(Some("((1 - 2) - 3)".to_owned()), parse("1 - 2 - 3"));
        assert_eq!(Some("((1 + 2) * 3)".to_owned()), parse("(1 + 2) * 3"));
    }

    #[test]
    fn can_parse_boolean_operators() {
        assert_eq!(
            Some("((a and b) or ((not c) and d))".to_owned()),
            parse("a and b or not c and d")
        );
        assert_eq!(
            Some("((a = 1) && (b != 2))".to_owned()),
            parse("a = 1 && b != 2")
        );
    }

    #[test]
    fn bind_prefix_operators_tighter_than_binary_ones() {
        assert_eq!(Some("((- a) * b)".to_owned()), parse("-a * b"));
        assert_eq!(Some("(not (a . b))".to_owned()), parse("not a.b"));
    }

    #[test]
    fn can_parse_ranges_and_membership() {
        assert_eq!(
            Some("((a in (100 .. 900)) and (not (p > l)))".to_owned()),
            parse("a in 100..900 and not (p > l)")
        );
        assert_eq!(
            Some("(x in ((1 + 1) ... 5))".to_owned()),
            parse("x in 1 + 1...5")
        );
    }

    #[test]
    fn can_parse_member_access() {
        assert_eq!(Some("((a . b) . c)".to_owned()), parse("a.b.c"));
    }

    #[test]
    fn can_parse_sequences() {
        assert_eq!(
            Some(r#"(country in ("US", "CA"))"#.to_owned()),
            parse(r#"country in ("US", "CA")"#)
        );
        assert_eq!(Some("(1, (2 + 3))".to_owned()), parse("(1, 2 + 3,)"));
        assert_eq!(Some("()".to_owned()), parse("()"));
    }

    #[test]
    fn tolerate_a_missing_closing_parenthesis() {
        assert_eq!(Some("(1 + 2)".to_owned()), parse("(1 + 2"));
        assert_eq!(Some("(1, 2)".to_owned()), parse("(1, 2"));
    }

    #[test]
    fn keep_the_tokens_of_the_parsed_nodes() {
        let root = RuleEngine::new().run("a\n  or b").unwrap();

        assert_eq!(TokenKind::Or, root.token().key());
        assert_eq!(1, root.token().position().line);
        assert_eq!(2, root.token().position().column);
    }

    #[test]
    fn can_extend_the_language() {
        let mut engine = RuleEngine::new();
        engine.lexer_mut().set_key(TokenKind::Not, "?");
        engine
            .grammar_mut()
            .set_led_with_precedence(TokenKind::Not, Precedence::Member.into(), |parser, left| {
                Some(Node::postfix(parser.current(), left))
            });
        let transforms = rendering::transforms::<TokenKind>();

        let root = engine.run("a? and b").unwrap();

        assert_eq!(
            Some("((a ?) and b)".to_owned()),
            rendering::render(&transforms, &root)
        );
    }

    #[test]
    fn render_every_kind_with_its_spelling() {
        assert_eq!("<=", TokenKind::LtEq.to_string());
        assert_eq!("...", TokenKind::DotDotDot.to_string());
        assert_eq!("<eof>", TokenKind::default().to_string());
    }
}
