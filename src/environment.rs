use crate::objects::{object, Array, Boolean, Float, Integer, Object, Str};
use itertools::Itertools;
use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};
use thiserror::Error;

#[derive(Error, PartialEq, Debug)]
pub enum EnvironmentError {
    #[error("variable {0} has already been defined")]
    AlreadyPresent(String),
    #[error("variable {0:?} does not exist")]
    NonExistingVariable(String),
    #[error("{name:?}: wrong types => expected: {expected}, found: {actual}")]
    WrongType {
        name: String,
        expected: VariableKind,
        actual: VariableKind,
    },
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VariableKind {
    Boolean,
    Integer,
    Float,
    String,
    IntegerList,
    StringList,
}

impl Display for VariableKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::IntegerList => "list of integers",
            Self::StringList => "list of strings",
        };
        write!(formatter, "{name}")
    }
}

/// The declaration of a variable usable in expressions.
#[derive(Clone, Debug)]
pub struct VariableDefinition {
    name: String,
    kind: VariableKind,
}

impl VariableDefinition {
    fn new(name: &str, kind: VariableKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
        }
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, VariableKind::Boolean)
    }

    pub fn integer(name: &str) -> Self {
        Self::new(name, VariableKind::Integer)
    }

    pub fn float(name: &str) -> Self {
        Self::new(name, VariableKind::Float)
    }

    pub fn string(name: &str) -> Self {
        Self::new(name, VariableKind::String)
    }

    pub fn integer_list(name: &str) -> Self {
        Self::new(name, VariableKind::IntegerList)
    }

    pub fn string_list(name: &str) -> Self {
        Self::new(name, VariableKind::StringList)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }
}

#[derive(Clone, Debug)]
struct Variable {
    kind: VariableKind,
    value: Option<Box<dyn Object>>,
}

/// The values the identifiers of an expression resolve to.
///
/// Every variable is declared up front with its type and starts undefined. Dotted names such as
/// `user.country` are declared as is.
///
/// # Examples
///
/// ```
/// use erules::{objects::Integer, Environment, VariableDefinition};
///
/// let mut environment = Environment::new(&[
///     VariableDefinition::integer("price"),
///     VariableDefinition::string_list("tags"),
/// ])
/// .unwrap();
/// environment.with_integer("price", 10).unwrap();
///
/// assert!(environment.with_boolean("price", true).is_err());
/// assert_eq!(
///     Some(&Integer(10)),
///     environment.get("price").unwrap().and_then(|value| value.downcast_ref::<Integer>())
/// );
/// assert!(environment.get("tags").unwrap().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Variable>,
}

impl Environment {
    pub fn new(definitions: &[VariableDefinition]) -> Result<Self, EnvironmentError> {
        let mut variables = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            if variables.contains_key(&definition.name) {
                return Err(EnvironmentError::AlreadyPresent(definition.name.clone()));
            }
            variables.insert(
                definition.name.clone(),
                Variable {
                    kind: definition.kind,
                    value: None,
                },
            );
        }
        Ok(Self { variables })
    }

    pub fn with_boolean(&mut self, name: &str, value: bool) -> Result<(), EnvironmentError> {
        self.set_value(name, VariableKind::Boolean, || object(Boolean(value)))
    }

    pub fn with_integer(&mut self, name: &str, value: i64) -> Result<(), EnvironmentError> {
        self.set_value(name, VariableKind::Integer, || object(Integer(value)))
    }

    pub fn with_float(&mut self, name: &str, value: f64) -> Result<(), EnvironmentError> {
        self.set_value(name, VariableKind::Float, || object(Float(value)))
    }

    pub fn with_string(&mut self, name: &str, value: &str) -> Result<(), EnvironmentError> {
        self.set_value(name, VariableKind::String, || object(Str::from(value)))
    }

    /// Set a list of integers; duplicates are removed.
    pub fn with_integer_list(
        &mut self,
        name: &str,
        values: &[i64],
    ) -> Result<(), EnvironmentError> {
        self.set_value(name, VariableKind::IntegerList, || {
            let items = values
                .iter()
                .unique()
                .map(|value| object(Integer(*value)))
                .collect_vec();
            object(Array(items))
        })
    }

    /// Set a list of strings; duplicates are removed.
    pub fn with_string_list(
        &mut self,
        name: &str,
        values: &[&str],
    ) -> Result<(), EnvironmentError> {
        self.set_value(name, VariableKind::StringList, || {
            let items = values
                .iter()
                .unique()
                .map(|value| object(Str::from(*value)))
                .collect_vec();
            object(Array(items))
        })
    }

    /// Reset a variable to undefined.
    pub fn with_undefined(&mut self, name: &str) -> Result<(), EnvironmentError> {
        self.variable_mut(name)?.value = None;
        Ok(())
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut Variable, EnvironmentError> {
        self.variables
            .get_mut(name)
            .ok_or_else(|| EnvironmentError::NonExistingVariable(name.to_owned()))
    }

    fn set_value<F>(
        &mut self,
        name: &str,
        actual: VariableKind,
        f: F,
    ) -> Result<(), EnvironmentError>
    where
        F: FnOnce() -> Box<dyn Object>,
    {
        let variable = self.variable_mut(name)?;
        if variable.kind != actual {
            return Err(EnvironmentError::WrongType {
                name: name.to_owned(),
                expected: variable.kind,
                actual,
            });
        }
        variable.value = Some(f());
        Ok(())
    }

    /// The value of a variable, `None` while it is undefined.
    pub fn get(&self, name: &str) -> Result<Option<&dyn Object>, EnvironmentError> {
        self.variables
            .get(name)
            .map(|variable| variable.value.as_deref())
            .ok_or_else(|| EnvironmentError::NonExistingVariable(name.to_owned()))
    }

    pub fn kind(&self, name: &str) -> Option<VariableKind> {
        self.variables.get(name).map(|variable| variable.kind)
    }

    /// Reset every variable to undefined, keeping the declarations.
    pub fn clear(&mut self) {
        self.variables
            .values_mut()
            .for_each(|variable| variable.value = None);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
