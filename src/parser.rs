use crate::token::Lexeme;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
};

/// The precedence of keys without one. Nothing binds tighter than a precedence this low, so
/// `parse_expression(LOWEST_PRECEDENCE)` reads a full expression.
pub const LOWEST_PRECEDENCE: i32 = -1;

/// A null denotation: builds a node from the token at the start of an expression.
pub type Nud<N, T> = Box<dyn Fn(&mut Parser<'_, N, T>) -> Option<N> + Send + Sync>;

/// A left denotation: builds a node from an infix or postfix token and the node on its left.
pub type Led<N, T> = Box<dyn Fn(&mut Parser<'_, N, T>, N) -> Option<N> + Send + Sync>;

/// The handler tables of a Pratt parser.
///
/// When a handler is called, the parser's current token is the one it was registered for.
/// Handlers signal a failure by returning `None`, which aborts the whole parse.
pub struct Grammar<N, T: Lexeme> {
    nuds: HashMap<T::Key, Nud<N, T>>,
    leds: HashMap<T::Key, Led<N, T>>,
    precedences: HashMap<T::Key, i32>,
    default_nud: Option<Nud<N, T>>,
    default_led: Option<Led<N, T>>,
}

impl<N, T: Lexeme> Default for Grammar<N, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, T: Lexeme> Grammar<N, T> {
    pub fn new() -> Self {
        Self {
            nuds: HashMap::new(),
            leds: HashMap::new(),
            precedences: HashMap::new(),
            default_nud: None,
            default_led: None,
        }
    }

    pub fn set_nud<F>(&mut self, key: T::Key, nud: F)
    where
        F: Fn(&mut Parser<'_, N, T>) -> Option<N> + Send + Sync + 'static,
    {
        self.nuds.insert(key, Box::new(nud));
    }

    pub fn set_led<F>(&mut self, key: T::Key, led: F)
    where
        F: Fn(&mut Parser<'_, N, T>, N) -> Option<N> + Send + Sync + 'static,
    {
        self.leds.insert(key, Box::new(led));
    }

    /// Register a left denotation along with the precedence of its key.
    pub fn set_led_with_precedence<F>(&mut self, key: T::Key, precedence: i32, led: F)
    where
        F: Fn(&mut Parser<'_, N, T>, N) -> Option<N> + Send + Sync + 'static,
    {
        self.set_precedence(key, precedence);
        self.set_led(key, led);
    }

    pub fn set_default_nud<F>(&mut self, nud: F)
    where
        F: Fn(&mut Parser<'_, N, T>) -> Option<N> + Send + Sync + 'static,
    {
        self.default_nud = Some(Box::new(nud));
    }

    pub fn set_default_led<F>(&mut self, led: F)
    where
        F: Fn(&mut Parser<'_, N, T>, N) -> Option<N> + Send + Sync + 'static,
    {
        self.default_led = Some(Box::new(led));
    }

    pub fn set_precedence(&mut self, key: T::Key, precedence: i32) {
        self.precedences.insert(key, precedence);
    }

    pub fn precedence(&self, key: T::Key) -> i32 {
        self.precedences
            .get(&key)
            .copied()
            .unwrap_or(LOWEST_PRECEDENCE)
    }

    pub fn has_nud(&self, key: T::Key) -> bool {
        self.nuds.contains_key(&key)
    }

    pub fn has_led(&self, key: T::Key) -> bool {
        self.leds.contains_key(&key)
    }
}

impl<N, T: Lexeme> Debug for Grammar<N, T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Grammar")
            .field("nuds", &self.nuds.keys().collect::<Vec<_>>())
            .field("leds", &self.leds.keys().collect::<Vec<_>>())
            .field("precedences", &self.precedences)
            .field("default_nud", &self.default_nud.is_some())
            .field("default_led", &self.default_led.is_some())
            .finish()
    }
}

/// A snapshot of the parser's read position, see [`Parser::store()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserState {
    current: usize,
    next: usize,
}

/// A Pratt parser running a [`Grammar`] over a token sequence.
///
/// The parser keeps two cursors: the current token, which handlers consume, and the look-ahead
/// token whose precedence decides whether the expression goes on. Past the end of the sequence,
/// both read as the default token.
///
/// # Examples
///
/// ```
/// use erules::{Grammar, Parser, Position, Token, LOWEST_PRECEDENCE};
///
/// let mut grammar: Grammar<i64, Token<char>> = Grammar::new();
/// grammar.set_nud('n', |parser| parser.current().value().parse().ok());
/// grammar.set_led_with_precedence('+', 1, |parser, left| {
///     let precedence = parser.current_precedence();
///     parser.advance();
///     Some(left + parser.parse_expression(precedence)?)
/// });
///
/// let tokens = ["1", "+", "2", "+", "3"]
///     .iter()
///     .map(|raw| {
///         let key = if *raw == "+" { '+' } else { 'n' };
///         Token::new(key, raw, Position::default())
///     })
///     .collect();
/// let mut parser = Parser::new(&grammar, tokens);
///
/// assert_eq!(Some(6), parser.parse_expression(LOWEST_PRECEDENCE));
/// ```
pub struct Parser<'grammar, N, T: Lexeme> {
    grammar: &'grammar Grammar<N, T>,
    tokens: Vec<T>,
    current: usize,
    next: usize,
}

impl<'grammar, N, T: Lexeme> Parser<'grammar, N, T> {
    pub fn new(grammar: &'grammar Grammar<N, T>, tokens: Vec<T>) -> Self {
        let mut parser = Self {
            grammar,
            tokens: vec![],
            current: 0,
            next: 0,
        };
        parser.reset(tokens);
        parser
    }

    /// Start over on a new token sequence.
    pub fn reset(&mut self, tokens: Vec<T>) {
        self.tokens = tokens;
        self.current = 0;
        self.next = 0;
        self.advance();
    }

    #[inline]
    pub fn grammar(&self) -> &'grammar Grammar<N, T> {
        self.grammar
    }

    #[inline]
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Parse an expression whose operators bind tighter than `precedence`.
    ///
    /// The current token goes through its null denotation (or the default one), then every
    /// look-ahead token with a higher precedence becomes current and goes through its left
    /// denotation. Returns `None` as soon as a handler fails or is missing.
    pub fn parse_expression(&mut self, precedence: i32) -> Option<N> {
        let grammar = self.grammar;
        let key = self.current_key();
        let nud = grammar.nuds.get(&key).or(grammar.default_nud.as_ref());
        let Some(nud) = nud else {
            log::debug!("no null denotation for {key:?}");
            return None;
        };
        log::trace!("nud {key:?} at {precedence}");
        let mut left = nud(self)?;

        while precedence < self.next_precedence() {
            let key = self.next_key();
            self.advance();
            let led = grammar.leds.get(&key).or(grammar.default_led.as_ref());
            let Some(led) = led else {
                log::debug!("no left denotation for {key:?}");
                return None;
            };
            log::trace!("led {key:?} at {precedence}");
            left = led(self, left)?;
        }

        Some(left)
    }

    /// Make the look-ahead token current.
    pub fn advance(&mut self) {
        self.current = self.next;
        if self.next < self.tokens.len() {
            self.next += 1;
        }
    }

    /// Advance when the look-ahead token has `key`.
    pub fn expect(&mut self, key: T::Key) -> bool {
        let expected = self.next_key() == key;
        if expected {
            self.advance();
        }
        expected
    }

    #[inline]
    pub fn current(&self) -> T {
        self.token(self.current)
    }

    #[inline]
    pub fn next(&self) -> T {
        self.token(self.next)
    }

    #[inline]
    pub fn current_key(&self) -> T::Key {
        self.key(self.current)
    }

    #[inline]
    pub fn next_key(&self) -> T::Key {
        self.key(self.next)
    }

    pub fn current_precedence(&self) -> i32 {
        self.grammar.precedence(self.current_key())
    }

    pub fn next_precedence(&self) -> i32 {
        self.grammar.precedence(self.next_key())
    }

    /// Whether the current token is past the end of the sequence.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Whether the look-ahead token is past the end of the sequence.
    #[inline]
    pub fn is_next_eof(&self) -> bool {
        self.next >= self.tokens.len()
    }

    /// Take a snapshot of the read position, to backtrack after a speculative parse.
    #[inline]
    pub fn store(&self) -> ParserState {
        ParserState {
            current: self.current,
            next: self.next,
        }
    }

    #[inline]
    pub fn restore(&mut self, state: ParserState) {
        self.current = state.current;
        self.next = state.next;
    }

    fn token(&self, index: usize) -> T {
        self.tokens.get(index).cloned().unwrap_or_default()
    }

    fn key(&self, index: usize) -> T::Key {
        self.tokens
            .get(index)
            .map(Lexeme::key)
            .unwrap_or_default()
    }
}

impl<N, T: Lexeme + Debug> Debug for Parser<'_, N, T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Parser")
            .field("tokens", &self.tokens)
            .field("current", &self.current)
            .field("next", &self.next)
            .finish()
    }
}
