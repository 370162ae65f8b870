use crate::objects::{cast, object, Kind, Object, ObjectKind};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    hash::Hash,
    sync::Arc,
};

pub type BinaryFunction =
    Arc<dyn Fn(&dyn Object, &dyn Object) -> Option<Box<dyn Object>> + Send + Sync>;

pub type UnaryFunction = Arc<dyn Fn(&dyn Object) -> Option<Box<dyn Object>> + Send + Sync>;

pub type TransformFunction =
    Arc<dyn Fn(&Transforms, &dyn Object) -> Option<Box<dyn Object>> + Send + Sync>;

/// Binary operations keyed by operator and operand kinds.
///
/// Registered functions are typed; the table takes care of downcasting the operands and boxing
/// the result. A function returns `None` when the operation has no result for its operands (e.g.
/// a division by zero).
///
/// # Examples
///
/// ```
/// use erules::{objects::{object, Integer}, BinaryOperations};
///
/// let mut operations = BinaryOperations::new();
/// operations.set('+', |left: &Integer, right: &Integer| {
///     left.0.checked_add(right.0).map(Integer)
/// });
///
/// assert_eq!(
///     Some(Integer(3)),
///     operations.call_cast::<Integer>('+', &Integer(1), &Integer(2))
/// );
/// assert_eq!(None, operations.call('-', &Integer(1), &Integer(2)));
/// ```
#[derive(Clone)]
pub struct BinaryOperations<O> {
    functions: HashMap<(O, Kind, Kind), BinaryFunction>,
}

impl<O: Copy + Debug + Eq + Hash> Default for BinaryOperations<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Copy + Debug + Eq + Hash> BinaryOperations<O> {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Register `function` for `left operator right`, replacing any previous one.
    pub fn set<L, R, T, F>(&mut self, operator: O, function: F)
    where
        L: ObjectKind,
        R: ObjectKind,
        T: ObjectKind,
        F: Fn(&L, &R) -> Option<T> + Send + Sync + 'static,
    {
        self.insert::<L, R, T, F>(operator, Arc::new(function));
    }

    /// Register `function` for `left operator right` and, when both kinds differ, for
    /// `right operator left` with the operands swapped back before the call.
    pub fn set_with_reverse<L, R, T, F>(&mut self, operator: O, function: F)
    where
        L: ObjectKind,
        R: ObjectKind,
        T: ObjectKind,
        F: Fn(&L, &R) -> Option<T> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        if Kind::of::<L>() != Kind::of::<R>() {
            let reversed = Arc::clone(&function);
            self.functions.insert(
                (operator, Kind::of::<R>(), Kind::of::<L>()),
                Arc::new(move |left: &dyn Object, right: &dyn Object| {
                    reversed(right.downcast_ref::<L>()?, left.downcast_ref::<R>()?).map(object)
                }),
            );
        }
        self.insert::<L, R, T, F>(operator, function);
    }

    fn insert<L, R, T, F>(&mut self, operator: O, function: Arc<F>)
    where
        L: ObjectKind,
        R: ObjectKind,
        T: ObjectKind,
        F: Fn(&L, &R) -> Option<T> + Send + Sync + 'static,
    {
        let key = (operator, Kind::of::<L>(), Kind::of::<R>());
        let function: BinaryFunction = Arc::new(move |left: &dyn Object, right: &dyn Object| {
            function(left.downcast_ref::<L>()?, right.downcast_ref::<R>()?).map(object)
        });
        if self.functions.insert(key, function).is_some() {
            log::debug!("replaced binary operation {key:?}");
        }
    }

    /// Apply `operator`; `None` when no function is registered for the operand kinds or when the
    /// function itself has no result.
    pub fn call(
        &self,
        operator: O,
        left: &dyn Object,
        right: &dyn Object,
    ) -> Option<Box<dyn Object>> {
        let Some(function) = self.get(operator, left.kind(), right.kind()) else {
            log::debug!(
                "no binary operation {operator:?} for ({}, {})",
                left.kind(),
                right.kind()
            );
            return None;
        };
        function(left, right)
    }

    /// Like [`BinaryOperations::call()`] with the result unboxed.
    ///
    /// # Panics
    ///
    /// When the registered function returns another kind than `T`.
    pub fn call_cast<T: ObjectKind>(
        &self,
        operator: O,
        left: &dyn Object,
        right: &dyn Object,
    ) -> Option<T> {
        self.call(operator, left, right).map(cast::<T>)
    }

    pub fn get(&self, operator: O, left: Kind, right: Kind) -> Option<&BinaryFunction> {
        self.functions.get(&(operator, left, right))
    }

    pub fn contains<L: ObjectKind, R: ObjectKind>(&self, operator: O) -> bool {
        self.get(operator, Kind::of::<L>(), Kind::of::<R>())
            .is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<O: Debug> Debug for BinaryOperations<O> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_set()
            .entries(self.functions.keys())
            .finish()
    }
}

/// Unary operations keyed by operator and operand kind.
#[derive(Clone)]
pub struct UnaryOperations<O> {
    functions: HashMap<(O, Kind), UnaryFunction>,
}

impl<O: Copy + Debug + Eq + Hash> Default for UnaryOperations<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Copy + Debug + Eq + Hash> UnaryOperations<O> {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn set<A, T, F>(&mut self, operator: O, function: F)
    where
        A: ObjectKind,
        T: ObjectKind,
        F: Fn(&A) -> Option<T> + Send + Sync + 'static,
    {
        let key = (operator, Kind::of::<A>());
        let function: UnaryFunction = Arc::new(move |operand: &dyn Object| {
            function(operand.downcast_ref::<A>()?).map(object)
        });
        if self.functions.insert(key, function).is_some() {
            log::debug!("replaced unary operation {key:?}");
        }
    }

    pub fn call(&self, operator: O, operand: &dyn Object) -> Option<Box<dyn Object>> {
        let Some(function) = self.get(operator, operand.kind()) else {
            log::debug!("no unary operation {operator:?} for {}", operand.kind());
            return None;
        };
        function(operand)
    }

    /// # Panics
    ///
    /// When the registered function returns another kind than `T`.
    pub fn call_cast<T: ObjectKind>(&self, operator: O, operand: &dyn Object) -> Option<T> {
        self.call(operator, operand).map(cast::<T>)
    }

    pub fn get(&self, operator: O, operand: Kind) -> Option<&UnaryFunction> {
        self.functions.get(&(operator, operand))
    }

    pub fn contains<A: ObjectKind>(&self, operator: O) -> bool {
        self.get(operator, Kind::of::<A>()).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<O: Debug> Debug for UnaryOperations<O> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_set()
            .entries(self.functions.keys())
            .finish()
    }
}

/// Conversions keyed by source and target kinds.
///
/// A transform receives the table itself so that it can convert the parts of composite values,
/// which is how whole trees get rendered.
#[derive(Clone, Default)]
pub struct Transforms {
    functions: HashMap<(Kind, Kind), TransformFunction>,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<F, T, G>(&mut self, function: G)
    where
        F: ObjectKind,
        T: ObjectKind,
        G: Fn(&Transforms, &F) -> Option<T> + Send + Sync + 'static,
    {
        let key = (Kind::of::<F>(), Kind::of::<T>());
        let function: TransformFunction =
            Arc::new(move |transforms: &Transforms, value: &dyn Object| {
                function(transforms, value.downcast_ref::<F>()?).map(object)
            });
        if self.functions.insert(key, function).is_some() {
            log::debug!("replaced transform {} -> {}", key.0, key.1);
        }
    }

    /// Convert `value` into a `T`; `None` when no transform is registered or when the conversion
    /// fails.
    ///
    /// # Panics
    ///
    /// When the registered function returns another kind than `T`.
    pub fn call<T: ObjectKind>(&self, value: &dyn Object) -> Option<T> {
        self.call_dyn(value, Kind::of::<T>()).map(cast::<T>)
    }

    pub fn call_dyn(&self, value: &dyn Object, to: Kind) -> Option<Box<dyn Object>> {
        let Some(function) = self.get(value.kind(), to) else {
            log::debug!("no transform {} -> {to}", value.kind());
            return None;
        };
        function(self, value)
    }

    pub fn get(&self, from: Kind, to: Kind) -> Option<&TransformFunction> {
        self.functions.get(&(from, to))
    }

    pub fn contains<F: ObjectKind, T: ObjectKind>(&self) -> bool {
        self.get(Kind::of::<F>(), Kind::of::<T>()).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Debug for Transforms {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_set()
            .entries(self.functions.keys())
            .finish()
    }
}

/// The three dispatch tables of an evaluation context.
#[derive(Clone, Debug)]
pub struct Operations<O> {
    pub binary: BinaryOperations<O>,
    pub unary: UnaryOperations<O>,
    pub transforms: Transforms,
}

impl<O: Copy + Debug + Eq + Hash> Default for Operations<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Copy + Debug + Eq + Hash> Operations<O> {
    pub fn new() -> Self {
        Self {
            binary: BinaryOperations::new(),
            unary: UnaryOperations::new(),
            transforms: Transforms::new(),
        }
    }
}
