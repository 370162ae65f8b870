use std::{
    fmt::{Debug, Display, Formatter},
    hash::Hash,
};

/// A zero-based line/column location inside the tokenized source.
///
/// The column counts characters from the start of the line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.line, self.column)
    }
}

/// The requirements on a caller-defined token key.
///
/// The [`Default`] value doubles as the key of the end-of-input sentinel and of tokens that no
/// rule managed to classify.
pub trait TokenKey: Copy + Debug + Default + Eq + Hash + Ord + Send + Sync + 'static {}

impl<T> TokenKey for T where T: Copy + Debug + Default + Eq + Hash + Ord + Send + Sync + 'static {}

/// What the parser needs to know about a token.
pub trait Lexeme: Clone + Default {
    type Key: TokenKey;

    fn key(&self) -> Self::Key;
}

/// A classified slice of the source.
///
/// `raw_value` is the exact text that was consumed while `value` is its decoded payload (e.g. a
/// string literal with its escapes resolved). Both are equal when no decoding applies.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Token<K> {
    key: K,
    raw_value: String,
    value: String,
    position: Position,
}

impl<K: TokenKey> Token<K> {
    /// Create an unclassified token seeded at `position`.
    pub fn at(position: Position) -> Self {
        Self {
            key: K::default(),
            raw_value: String::new(),
            value: String::new(),
            position,
        }
    }

    pub fn new(key: K, raw_value: &str, position: Position) -> Self {
        Self {
            key,
            raw_value: raw_value.to_owned(),
            value: raw_value.to_owned(),
            position,
        }
    }

    #[inline]
    pub fn key(&self) -> K {
        self.key
    }

    #[inline]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether this is the default token, i.e. the end-of-input sentinel or an unclassified one.
    #[inline]
    pub fn is_unclassified(&self) -> bool {
        self.key == K::default()
    }

    pub fn with_key(mut self, key: K) -> Self {
        self.key = key;
        self
    }

    /// Set both the raw and the decoded value to `raw_value`.
    pub fn with_raw_value(mut self, raw_value: &str) -> Self {
        self.raw_value = raw_value.to_owned();
        self.value = raw_value.to_owned();
        self
    }

    pub fn with_value(mut self, value: String) -> Self {
        self.value = value;
        self
    }
}

impl<K: TokenKey> Lexeme for Token<K> {
    type Key = K;

    #[inline]
    fn key(&self) -> K {
        self.key
    }
}

impl<K: Display> Display for Token<K> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{} {:?} at {}",
            self.key, self.raw_value, self.position
        )
    }
}
