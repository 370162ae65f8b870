//! Runtime values and their kinds.
//!
//! Every value handled by the dispatch tables is a boxed [`Object`]. The [`Kind`] of an object is
//! the identity of its concrete type and is what the tables are keyed on.

use once_cell::sync::Lazy;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt::{Debug, Display, Formatter},
    sync::{PoisonError, RwLock},
};

static KINDS: Lazy<RwLock<HashMap<TypeId, Kind>>> = Lazy::new(Default::default);

/// The runtime identity of an object type.
///
/// Two objects have the same kind if and only if they have the same concrete type.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Kind {
    id: u32,
    name: &'static str,
}

impl Kind {
    /// The kind of `T`, registered on first use.
    pub fn of<T: ObjectKind>() -> Self {
        let type_id = TypeId::of::<T>();
        if let Some(kind) = KINDS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return *kind;
        }

        let mut kinds = KINDS.write().unwrap_or_else(PoisonError::into_inner);
        let id = kinds.len() as u32;
        *kinds.entry(type_id).or_insert(Kind { id, name: T::NAME })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Display for Kind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.name)
    }
}

/// Implemented by every concrete value type; [`Object`] comes with it.
pub trait ObjectKind: Any + Clone + Debug + PartialEq + Send + Sync {
    /// A readable name for the kind, used in logs and error messages.
    const NAME: &'static str;
}

/// A value with a runtime [`Kind`].
pub trait Object: Any + Debug + Send + Sync + 'static {
    fn kind(&self) -> Kind;

    /// A deep copy: nothing is shared between the copy and the original.
    fn clone_object(&self) -> Box<dyn Object>;

    /// Whether `other` has the same kind and an equal value.
    fn equals(&self, other: &dyn Object) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: ObjectKind> Object for T {
    #[inline]
    fn kind(&self) -> Kind {
        Kind::of::<T>()
    }

    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }

    fn equals(&self, other: &dyn Object) -> bool {
        other.downcast_ref::<T>() == Some(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Object {
    #[inline]
    pub fn is<T: ObjectKind>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: ObjectKind>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: ObjectKind>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    pub fn downcast<T: ObjectKind>(self: Box<Self>) -> Option<T> {
        self.into_any().downcast().ok().map(|value| *value)
    }
}

impl Clone for Box<dyn Object> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

impl PartialEq for dyn Object {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Box a value as an [`Object`].
#[inline]
pub fn object<T: ObjectKind>(value: T) -> Box<dyn Object> {
    Box::new(value)
}

/// Unbox an object known to be a `T`.
///
/// # Panics
///
/// When the object is of another kind; this is a bug in the caller.
pub fn cast<T: ObjectKind>(object: Box<dyn Object>) -> T {
    let kind = object.kind();
    match object.downcast::<T>() {
        Some(value) => value,
        None => panic!(
            "expected an object of kind {}, found {kind}",
            Kind::of::<T>()
        ),
    }
}

#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Str(pub String);

impl ObjectKind for Str {
    const NAME: &'static str = "string";
}

impl From<&str> for Str {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Str {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Integer(pub i64);

impl ObjectKind for Integer {
    const NAME: &'static str = "integer";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Float(pub f64);

impl ObjectKind for Float {
    const NAME: &'static str = "float";
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Boolean(pub bool);

impl ObjectKind for Boolean {
    const NAME: &'static str = "boolean";
}

#[derive(Clone, Debug)]
pub struct Pair {
    pub left: Box<dyn Object>,
    pub right: Box<dyn Object>,
}

impl PartialEq for Pair {
    fn eq(&self, other: &Self) -> bool {
        self.left.equals(other.left.as_ref()) && self.right.equals(other.right.as_ref())
    }
}

impl ObjectKind for Pair {
    const NAME: &'static str = "pair";
}

#[derive(Clone, Debug, Default)]
pub struct Array(pub Vec<Box<dyn Object>>);

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| a.equals(b.as_ref()))
    }
}

impl ObjectKind for Array {
    const NAME: &'static str = "array";
}

/// A closed interval; the bounds are usually both integers or both floats.
#[derive(Clone, Debug)]
pub struct Interval {
    pub low: Box<dyn Object>,
    pub high: Box<dyn Object>,
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.low.equals(other.low.as_ref()) && self.high.equals(other.high.as_ref())
    }
}

impl ObjectKind for Interval {
    const NAME: &'static str = "interval";
}
