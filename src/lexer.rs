use crate::{
    scanner,
    token::{Position, Token, TokenKey},
    trie::Trie,
};
use std::{
    fmt::{Debug, Formatter},
    ops::Range,
};

/// Invoked when a registered pattern matched at the cursor.
///
/// It receives the seeded token and the absolute byte span of the match; the cursor still points
/// at the start of that span and the action is responsible for advancing it.
pub type Action<K> =
    Box<dyn Fn(&Lexer<K>, &mut Cursor<'_>, Token<K>, Range<usize>) -> Token<K> + Send + Sync>;

/// Invoked when no registered pattern matched at the cursor.
pub type DefaultAction<K> =
    Box<dyn Fn(&Lexer<K>, &mut Cursor<'_>, Token<K>) -> Token<K> + Send + Sync>;

/// Builds the token every action starts from.
pub type Seed<K> = Box<dyn Fn(Position) -> Token<K> + Send + Sync>;

/// A read position inside a source.
#[derive(Clone, Debug)]
pub struct Cursor<'source> {
    source: &'source str,
    offset: usize,
}

impl<'source> Cursor<'source> {
    pub fn new(source: &'source str, offset: usize) -> Self {
        Self {
            source,
            offset: offset.min(source.len()),
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// What is left to read.
    #[inline]
    pub fn rest(&self) -> &'source str {
        &self.source[self.offset..]
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Move the cursor to `offset`, clamped to the end of the source.
    #[inline]
    pub fn advance_to(&mut self, offset: usize) {
        debug_assert!(self.source.is_char_boundary(offset.min(self.source.len())));
        self.offset = offset.min(self.source.len());
    }

    #[inline]
    pub fn advance(&mut self, bytes: usize) {
        self.advance_to(self.offset + bytes);
    }

    #[inline]
    pub fn slice(&self, span: Range<usize>) -> &'source str {
        &self.source[span]
    }

    pub fn skip_spaces(&mut self) {
        self.advance(scanner::skip_spaces(self.rest()));
    }
}

/// The configuration of a tokenizer: which patterns produce which tokens.
///
/// Literal patterns are stored in a [`Trie`] and matched greedily, so that `==` wins over `=`
/// when both are registered. When nothing matches, the default action runs; unless replaced
/// through [`Lexer::set_default_action()`], it reads numbers and identifiers with the keys set by
/// [`Lexer::set_number_key()`], [`Lexer::set_float_key()`] and [`Lexer::set_ident_key()`].
///
/// A [`Lexer`] is immutable once configured and can be shared between threads, each one running
/// its own [`Tokenizer`].
///
/// # Examples
///
/// ```
/// use erules::{Lexer, Tokenizer};
///
/// #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// enum Key {
///     #[default]
///     Eof,
///     Ident,
///     Number,
///     Equal,
/// }
///
/// let mut lexer = Lexer::new();
/// lexer.set_ident_key(Key::Ident);
/// lexer.set_number_key(Key::Number);
/// lexer.set_key(Key::Equal, "==");
///
/// let keys: Vec<_> = Tokenizer::new(&lexer, "answer == 42")
///     .map(|token| token.key())
///     .collect();
/// assert_eq!(vec![Key::Ident, Key::Equal, Key::Number], keys);
/// ```
pub struct Lexer<K> {
    trie: Trie<Action<K>>,
    default_action: Option<DefaultAction<K>>,
    seed: Option<Seed<K>>,
    ident_key: Option<K>,
    number_key: Option<K>,
    float_key: Option<K>,
}

impl<K: TokenKey> Default for Lexer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKey> Lexer<K> {
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            default_action: None,
            seed: None,
            ident_key: None,
            number_key: None,
            float_key: None,
        }
    }

    /// Register an action for a literal pattern, replacing any previous one.
    pub fn set_action<F>(&mut self, pattern: &str, action: F)
    where
        F: Fn(&Lexer<K>, &mut Cursor<'_>, Token<K>, Range<usize>) -> Token<K>
            + Send
            + Sync
            + 'static,
    {
        if self.trie.set(pattern, Box::new(action)).is_some() {
            log::debug!("replaced the action of pattern {pattern:?}");
        }
    }

    /// Replace the action used when no pattern matches.
    pub fn set_default_action<F>(&mut self, action: F)
    where
        F: Fn(&Lexer<K>, &mut Cursor<'_>, Token<K>) -> Token<K> + Send + Sync + 'static,
    {
        self.default_action = Some(Box::new(action));
    }

    /// Replace how the initial token of each [`Tokenizer::next_token()`] call is built.
    pub fn set_seed<F>(&mut self, seed: F)
    where
        F: Fn(Position) -> Token<K> + Send + Sync + 'static,
    {
        self.seed = Some(Box::new(seed));
    }

    /// Map `literal` to `key`.
    ///
    /// Literals that look like identifiers (`and`, `true`, ...) are keywords: when the input goes
    /// on with identifier characters (`andy`), the whole run is reported as an identifier instead.
    pub fn set_key(&mut self, key: K, literal: &str) {
        if scanner::is_identifier(literal) {
            self.set_keyword(key, literal);
        } else {
            self.set_action(literal, move |_, cursor, token, span| {
                cursor.advance_to(span.end);
                token.with_key(key).with_raw_value(cursor.slice(span))
            });
        }
    }

    fn set_keyword(&mut self, key: K, literal: &str) {
        self.set_action(literal, move |lexer, cursor, token, span| {
            cursor.advance_to(span.end);
            match (cursor.peek(), lexer.ident_key) {
                (Some(next), Some(ident_key)) if scanner::is_ident(next) => {
                    cursor.advance(scanner::read_ident(cursor.rest()));
                    token
                        .with_key(ident_key)
                        .with_raw_value(cursor.slice(span.start..cursor.offset()))
                }
                _ => token.with_key(key).with_raw_value(cursor.slice(span)),
            }
        });
    }

    /// Register a delimited literal (a string, a quoted identifier, ...).
    ///
    /// The token's raw value spans both delimiters while its value is the decoded body.
    pub fn set_string_key(&mut self, key: K, open: &str, close: &str) {
        let close = close.to_owned();
        self.set_action(open, move |_, cursor, token, span| {
            cursor.advance_to(span.end);
            let (consumed, value) = scanner::read_string(cursor.rest(), &close);
            cursor.advance(consumed);
            token
                .with_key(key)
                .with_raw_value(cursor.slice(span.start..cursor.offset()))
                .with_value(value)
        });
    }

    pub fn set_ident_key(&mut self, key: K) {
        self.ident_key = Some(key);
    }

    pub fn set_number_key(&mut self, key: K) {
        self.number_key = Some(key);
    }

    pub fn set_float_key(&mut self, key: K) {
        self.float_key = Some(key);
    }

    #[inline]
    pub fn ident_key(&self) -> Option<K> {
        self.ident_key
    }

    #[inline]
    pub fn number_key(&self) -> Option<K> {
        self.number_key
    }

    #[inline]
    pub fn float_key(&self) -> Option<K> {
        self.float_key
    }

    pub fn seed(&self, position: Position) -> Token<K> {
        match &self.seed {
            Some(seed) => seed(position),
            None => Token::at(position),
        }
    }

    /// Produce one token from the cursor.
    ///
    /// The registered patterns are tried first (longest match); otherwise the default action
    /// runs. The returned token is left unclassified when nothing applies, in which case the
    /// cursor did not move.
    pub fn next(&self, cursor: &mut Cursor<'_>, token: Token<K>) -> Token<K> {
        let start = cursor.offset();
        match self.trie.get(cursor.rest(), true) {
            Some(found) => {
                let span = found.span();
                (found.action())(self, cursor, token, start + span.start..start + span.end)
            }
            None => match &self.default_action {
                Some(action) => action(self, cursor, token),
                None => self.classify(cursor, token),
            },
        }
    }

    /// The built-in default action: a number when the cursor is on a digit, an identifier when
    /// it is on a letter or an underscore.
    pub fn classify(&self, cursor: &mut Cursor<'_>, token: Token<K>) -> Token<K> {
        match cursor.peek() {
            Some(character) if scanner::is_digit(character) => self.read_number(cursor, token),
            Some(character) if scanner::is_ident_start(character) => {
                self.read_ident(cursor, token)
            }
            _ => token,
        }
    }

    pub fn read_ident(&self, cursor: &mut Cursor<'_>, token: Token<K>) -> Token<K> {
        let Some(key) = self.ident_key else {
            return token;
        };
        let start = cursor.offset();
        cursor.advance(scanner::read_ident(cursor.rest()));
        token
            .with_key(key)
            .with_raw_value(cursor.slice(start..cursor.offset()))
    }

    /// Read a number; without a float key, only its integer part is read.
    pub fn read_number(&self, cursor: &mut Cursor<'_>, token: Token<K>) -> Token<K> {
        let (length, is_float) = scanner::read_number(cursor.rest());
        let (key, length) = match (is_float, self.float_key, self.number_key) {
            (true, Some(key), _) => (key, length),
            (_, _, Some(key)) => (key, scanner::read_integer(cursor.rest())),
            _ => return token,
        };

        let start = cursor.offset();
        cursor.advance(length);
        token
            .with_key(key)
            .with_raw_value(cursor.slice(start..cursor.offset()))
    }

    /// The number of registered patterns.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}

impl<K: Debug> Debug for Lexer<K> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Lexer")
            .field("patterns", &self.trie.len())
            .field("custom_default_action", &self.default_action.is_some())
            .field("custom_seed", &self.seed.is_some())
            .field("ident_key", &self.ident_key)
            .field("number_key", &self.number_key)
            .field("float_key", &self.float_key)
            .finish()
    }
}

/// Splits a source into tokens according to a [`Lexer`].
///
/// Whitespace is skipped before every token so a token's position is the one of its first
/// character. Iterating stops at the end of the source or, with a warning, on the first piece of
/// input no rule consumes; that unclassified token is still yielded.
#[derive(Debug)]
pub struct Tokenizer<'lexer, K> {
    lexer: &'lexer Lexer<K>,
    source: String,
    offset: usize,
    line_starts: Vec<usize>,
    stalled: bool,
}

impl<'lexer, K: TokenKey> Tokenizer<'lexer, K> {
    pub fn new(lexer: &'lexer Lexer<K>, source: impl Into<String>) -> Self {
        let mut tokenizer = Self {
            lexer,
            source: String::new(),
            offset: 0,
            line_starts: vec![],
            stalled: false,
        };
        tokenizer.reset(source);
        tokenizer
    }

    /// Start over on a new source.
    pub fn reset(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.offset = 0;
        self.stalled = false;
        self.line_starts = std::iter::once(0)
            .chain(
                self.source
                    .match_indices('\n')
                    .map(|(offset, _)| offset + 1),
            )
            .collect();
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether only whitespace is left.
    pub fn is_eof(&self) -> bool {
        self.offset + scanner::skip_spaces(&self.source[self.offset..]) >= self.source.len()
    }

    /// The line/column of a byte offset of the source.
    pub fn locate(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or_default();
        let column = self
            .source
            .get(line_start..offset)
            .map_or(0, |text| text.chars().count());
        Position::new(line, column)
    }

    /// Skip whitespace and produce the next token.
    ///
    /// At the end of the source, this returns the unclassified default token.
    pub fn next_token(&mut self) -> Token<K> {
        let mut cursor = Cursor::new(&self.source, self.offset);
        cursor.skip_spaces();
        let token = self.lexer.seed(self.locate(cursor.offset()));
        let token = self.lexer.next(&mut cursor, token);
        self.offset = cursor.offset();

        log::trace!(
            "lexed {:?} {:?} at {}",
            token.key(),
            token.raw_value(),
            token.position()
        );
        token
    }

    /// Tokenize what is left of the source.
    pub fn tokenize(&mut self) -> Vec<Token<K>> {
        self.by_ref().collect()
    }
}

impl<K: TokenKey> Iterator for Tokenizer<'_, K> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stalled || self.is_eof() {
            return None;
        }

        self.offset += scanner::skip_spaces(&self.source[self.offset..]);
        let before = self.offset;
        let token = self.next_token();
        if self.offset == before {
            log::warn!(
                "no rule matches the input at {}: {:?}",
                token.position(),
                self.source[self.offset..].chars().next()
            );
            self.stalled = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
    enum Key {
        #[default]
        Eof,
        Ident,
        Number,
        Float,
        String,
        And,
        Or,
        Assign,
        Equal,
        Dot,
        Range,
        HalfOpenRange,
        LeftParenthesis,
        RightParenthesis,
    }

    fn a_lexer() -> Lexer<Key> {
        let mut lexer = Lexer::new();
        lexer.set_ident_key(Key::Ident);
        lexer.set_number_key(Key::Number);
        lexer.set_float_key(Key::Float);
        lexer.set_key(Key::And, "and");
        lexer.set_key(Key::And, "&&");
        lexer.set_key(Key::Or, "or");
        lexer.set_key(Key::Assign, "=");
        lexer.set_key(Key::Equal, "==");
        lexer.set_key(Key::Dot, ".");
        lexer.set_key(Key::Range, "..");
        lexer.set_key(Key::HalfOpenRange, "...");
        lexer.set_key(Key::LeftParenthesis, "(");
        lexer.set_key(Key::RightParenthesis, ")");
        lexer.set_string_key(Key::String, "\"", "\"");
        lexer.set_string_key(Key::String, "'", "'");
        lexer.set_string_key(Key::Ident, "[", "]");
        lexer
    }

    fn lex_tokens(lexer: &Lexer<Key>, input: &str) -> Vec<Token<Key>> {
        let _ = env_logger::builder().is_test(true).try_init();
        Tokenizer::new(lexer, input).tokenize()
    }

    fn lex_keys(input: &str) -> Vec<Key> {
        lex_tokens(&a_lexer(), input)
            .iter()
            .map(Token::key)
            .collect()
    }

    fn lex_raw_values(input: &str) -> Vec<String> {
        lex_tokens(&a_lexer(), input)
            .iter()
            .map(|token| token.raw_value().to_owned())
            .collect()
    }

    #[test]
    fn can_lex_nothing() {
        assert!(lex_keys("").is_empty());
        assert!(lex_keys(" \t\r\n ").is_empty());
    }

    #[test]
    fn can_lex_the_longest_operator() {
        assert_eq!(vec![Key::Equal], lex_keys("=="));
        assert_eq!(vec![Key::Equal, Key::Assign], lex_keys("==="));
        assert_eq!(vec![Key::Assign, Key::Assign], lex_keys("= ="));
    }

    #[test]
    fn can_lex_a_keyword() {
        assert_eq!(vec![Key::And], lex_keys("and"));
        assert_eq!(vec![Key::And], lex_keys("&&"));
    }

    #[test]
    fn can_lex_an_identifier_starting_with_a_keyword() {
        let tokens = lex_tokens(&a_lexer(), "andbruh");

        assert_eq!(1, tokens.len());
        assert_eq!(Key::Ident, tokens[0].key());
        assert_eq!("andbruh", tokens[0].raw_value());
    }

    #[test]
    fn can_lex_a_keyword_followed_by_a_non_identifier_character() {
        assert_eq!(
            vec![Key::And, Key::LeftParenthesis, Key::Ident, Key::RightParenthesis],
            lex_keys("and(x)")
        );
    }

    #[test]
    fn can_lex_an_identifier() {
        let tokens = lex_tokens(&a_lexer(), "deal_ids _private x1");

        assert_eq!(
            vec!["deal_ids", "_private", "x1"],
            tokens.iter().map(Token::raw_value).collect::<Vec<_>>()
        );
        assert!(tokens.iter().all(|token| token.key() == Key::Ident));
    }

    #[test]
    fn can_lex_integers_and_floats() {
        assert_eq!(vec![Key::Number], lex_keys("1_000"));
        assert_eq!(vec![Key::Float], lex_keys("0.5"));
        assert_eq!(vec![Key::Float], lex_keys("1e10"));
        assert_eq!(vec!["1.5e-3"], lex_raw_values("1.5e-3"));
    }

    #[test]
    fn can_lex_a_range_between_integers() {
        assert_eq!(vec![Key::Number, Key::Range, Key::Number], lex_keys("1..2"));
        assert_eq!(
            vec![Key::Number, Key::HalfOpenRange, Key::Number],
            lex_keys("1...2")
        );
    }

    #[test]
    fn can_lex_a_float_range() {
        assert_eq!(vec!["1.5", "..", "2.5"], lex_raw_values("1.5..2.5"));
    }

    #[test]
    fn can_lex_a_member_access() {
        assert_eq!(vec![Key::Ident, Key::Dot, Key::Ident], lex_keys("a.b"));
    }

    #[test]
    fn read_only_the_integer_part_without_a_float_key() {
        let mut lexer = a_lexer();
        lexer.float_key = None;

        let keys: Vec<_> = lex_tokens(&lexer, "1.5")
            .iter()
            .map(Token::key)
            .collect();

        assert_eq!(vec![Key::Number, Key::Dot, Key::Number], keys);
    }

    #[test]
    fn can_lex_a_string() {
        let tokens = lex_tokens(&a_lexer(), r#""deal_1" 'deal_2'"#);

        assert_eq!(2, tokens.len());
        assert_eq!(Key::String, tokens[0].key());
        assert_eq!(r#""deal_1""#, tokens[0].raw_value());
        assert_eq!("deal_1", tokens[0].value());
        assert_eq!("deal_2", tokens[1].value());
    }

    #[test]
    fn can_lex_a_string_with_escapes() {
        let tokens = lex_tokens(&a_lexer(), r#""a\"b\n\d""#);

        assert_eq!("a\"b\n\\d", tokens[0].value());
        assert_eq!(r#""a\"b\n\d""#, tokens[0].raw_value());
    }

    #[test]
    fn can_lex_an_unterminated_string_up_to_the_end_of_the_input() {
        let tokens = lex_tokens(&a_lexer(), "x = 'never closed");

        assert_eq!(3, tokens.len());
        assert_eq!(Key::String, tokens[2].key());
        assert_eq!("never closed", tokens[2].value());
    }

    #[test]
    fn can_lex_a_quoted_identifier() {
        let tokens = lex_tokens(&a_lexer(), "[not] and [a b]");

        assert_eq!(Key::Ident, tokens[0].key());
        assert_eq!("not", tokens[0].value());
        assert_eq!("[not]", tokens[0].raw_value());
        assert_eq!("a b", tokens[2].value());
    }

    #[test]
    fn can_lex_multiple_expressions() {
        let actual = lex_keys(r#"(a == 1.5 or b = "x") and c..d"#);

        assert_eq!(
            vec![
                Key::LeftParenthesis,
                Key::Ident,
                Key::Equal,
                Key::Float,
                Key::Or,
                Key::Ident,
                Key::Assign,
                Key::String,
                Key::RightParenthesis,
                Key::And,
                Key::Ident,
                Key::Range,
                Key::Ident,
            ],
            actual
        );
    }

    #[test]
    fn can_locate_tokens_by_line_and_column() {
        let tokens = lex_tokens(&a_lexer(), "a and\n  bc\r\n\t1");

        assert_eq!(
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 1),
            ],
            tokens.iter().map(Token::position).collect::<Vec<_>>()
        );
    }

    #[test]
    fn count_columns_in_characters() {
        let tokens = lex_tokens(&a_lexer(), "'é' x");

        assert_eq!(Position::new(0, 4), tokens[1].position());
    }

    #[test]
    fn stop_on_input_no_rule_consumes() {
        let tokens = lex_tokens(&a_lexer(), "a ? b");

        assert_eq!(2, tokens.len());
        assert_eq!(Key::Ident, tokens[0].key());
        assert!(tokens[1].is_unclassified());
        assert_eq!(Position::new(0, 2), tokens[1].position());
    }

    #[test]
    fn yield_a_single_unclassified_token_after_spaces() {
        let tokens = lex_tokens(&a_lexer(), "x = 1  $ y");

        assert_eq!(4, tokens.len());
        assert_eq!(Key::Number, tokens[2].key());
        assert!(tokens[3].is_unclassified());
        assert_eq!(Position::new(0, 7), tokens[3].position());
        assert_eq!(1, tokens.iter().filter(|token| token.is_unclassified()).count());
    }

    #[test]
    fn can_locate_an_offset() {
        let lexer = a_lexer();
        let mut tokenizer = Tokenizer::new(&lexer, "a\n 'é' b");
        tokenizer.next_token();

        assert_eq!(Position::new(0, 0), tokenizer.locate(0));
        assert_eq!(Position::new(1, 1), tokenizer.locate(3));
        assert_eq!(Position::new(1, 5), tokenizer.locate(8));
        assert_eq!(Position::new(1, 6), tokenizer.locate(100));
    }

    #[test]
    fn return_the_default_token_at_the_end_of_the_input() {
        let lexer = a_lexer();
        let mut tokenizer = Tokenizer::new(&lexer, "a ");

        assert_eq!(Key::Ident, tokenizer.next_token().key());
        assert!(tokenizer.is_eof());
        assert!(tokenizer.next_token().is_unclassified());
    }

    #[test]
    fn can_reset_the_tokenizer() {
        let lexer = a_lexer();
        let mut tokenizer = Tokenizer::new(&lexer, "a b");
        tokenizer.next_token();

        tokenizer.reset("1");

        assert_eq!(vec![Key::Number], tokenizer.map(|token| token.key()).collect::<Vec<_>>());
    }

    #[test]
    fn can_use_a_custom_default_action() {
        let mut lexer = a_lexer();
        lexer.set_default_action(|lexer, cursor, token| match cursor.peek() {
            Some('#') => {
                cursor.advance_to(cursor.source().len());
                token
            }
            _ => lexer.classify(cursor, token),
        });

        let tokens = lex_tokens(&lexer, "a # comment");

        assert_eq!(2, tokens.len());
        assert!(tokens[1].is_unclassified());
    }

    #[test]
    fn can_use_a_custom_seed() {
        let mut lexer = a_lexer();
        lexer.set_seed(|position| Token::at(Position::new(position.line + 1, position.column + 1)));

        let tokens = lex_tokens(&lexer, "a");

        assert_eq!(Position::new(1, 1), tokens[0].position());
    }

    #[test]
    fn can_replace_the_action_of_a_pattern() {
        let mut lexer = a_lexer();
        lexer.set_key(Key::Or, "==");

        assert_eq!(
            vec![Key::Or],
            lex_tokens(&lexer, "==").iter().map(Token::key).collect::<Vec<_>>()
        );
        assert_eq!(13, lexer.len());
    }

    fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z_][a-z0-9_]{0,6}",
            "[0-9]{1,4}",
            "[0-9]{1,3}\\.[0-9]{1,3}",
            "\"[a-z ]{0,5}\"",
            Just("==".to_owned()),
            Just("=".to_owned()),
            Just("&&".to_owned()),
            Just("..".to_owned()),
            Just("(".to_owned()),
            Just(")".to_owned()),
        ]
    }

    proptest! {
        #[test]
        fn raw_values_and_skipped_spaces_rebuild_the_source(
            fragments in prop::collection::vec((fragment(), "[ \t\n]{0,2}"), 0..12)
        ) {
            let source: String = fragments
                .iter()
                .flat_map(|(fragment, spaces)| [fragment.as_str(), spaces.as_str()])
                .collect();

            let tokens = lex_tokens(&a_lexer(), &source);

            let mut rebuilt = String::new();
            for token in &tokens {
                prop_assert!(!token.is_unclassified());
                let rest = source.get(rebuilt.len()..).unwrap_or_default();
                rebuilt.push_str(&rest[..scanner::skip_spaces(rest)]);
                rebuilt.push_str(token.raw_value());
            }
            let rest = source.get(rebuilt.len()..).unwrap_or_default();
            rebuilt.push_str(&rest[..scanner::skip_spaces(rest)]);
            prop_assert_eq!(source, rebuilt);
        }
    }
}
