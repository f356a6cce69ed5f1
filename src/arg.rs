use std::fmt::{self, Formatter};

/// A single argument inside a member expression.
///
/// Either a concrete value the call must equal, or the wildcard that
/// accepts anything at its position. Recorder methods take
/// `impl Into<Arg<T>>`, so plain values and [`any`] can be mixed
/// freely:
///
/// ```
/// use understudy::{any, Arg};
///
/// let exact: Arg<i32> = 3.into();
/// let wildcard: Arg<i32> = any();
///
/// assert_eq!(exact, Arg::Value(3));
/// assert!(wildcard.is_any());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Arg<T> {
    Any,
    Value(T),
}

/// Returns the wildcard marker for any argument type.
pub fn any<T>() -> Arg<T> {
    Arg::Any
}

impl<T> Arg<T> {
    pub fn is_any(&self) -> bool {
        matches!(self, Arg::Any)
    }
}

impl<T> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Arg::Value(value)
    }
}

impl<'a, T: Clone> From<&'a T> for Arg<T> {
    fn from(value: &'a T) -> Self {
        Arg::Value(value.clone())
    }
}

impl<'a> From<&'a str> for Arg<String> {
    fn from(value: &'a str) -> Self {
        Arg::Value(value.to_owned())
    }
}

impl<T: fmt::Debug> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Any => f.write_str("_"),
            Arg::Value(value) => fmt::Debug::fmt(value, f),
        }
    }
}
