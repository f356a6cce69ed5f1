mod tuple;

pub use tuple::{ActualArgs, IntoState};

use std::{
    any::Any,
    fmt::{self, Formatter},
};

use crate::Arg;

/// Structural equality contract for argument values.
///
/// Every argument that takes part in a setup must be comparable
/// against the argument the double later receives. This is
/// implemented for every `PartialEq + Debug + Send + 'static` type.
///
/// Types that cannot be compared (closures, handles, ...) should be
/// wrapped in a newtype with a canonical `PartialEq`, or only ever be
/// matched with [`any`](crate::any).
pub trait ArgValue: fmt::Debug + Send + 'static {
    /// Returns `true` if `other` holds a value of the same type that
    /// is equal to `self`.
    fn eq_value(&self, other: &dyn ArgValue) -> bool;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;
}

impl<T: PartialEq + fmt::Debug + Send + 'static> ArgValue for T {
    fn eq_value(&self, other: &dyn ArgValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One position of an [`ArgState`].
pub(crate) enum Slot {
    Any,
    Value(Box<dyn ArgValue>),
}

impl<T: ArgValue> From<Arg<T>> for Slot {
    fn from(arg: Arg<T>) -> Self {
        match arg {
            Arg::Any => Slot::Any,
            Arg::Value(value) => Slot::Value(Box::new(value)),
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Any => f.write_str("_"),
            Slot::Value(value) => fmt::Debug::fmt(value, f),
        }
    }
}

/// A borrowed view of one argument position, either from a
/// configured state or from the arguments of a real call.
#[doc(hidden)]
#[derive(Clone, Copy)]
pub enum Query<'a> {
    Any,
    Value(&'a dyn ArgValue),
}

impl fmt::Debug for Query<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Query::Any => f.write_str("_"),
            Query::Value(value) => fmt::Debug::fmt(value, f),
        }
    }
}

/// The ordered argument values a behavior was configured with.
///
/// Properties have an empty state.
#[derive(Default)]
pub struct ArgState {
    slots: Vec<Slot>,
}

impl ArgState {
    pub(crate) fn new(slots: Vec<Slot>) -> Self {
        ArgState { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.slots.iter().any(|slot| matches!(slot, Slot::Any))
    }

    pub(crate) fn query(&self) -> Vec<Query<'_>> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Any => Query::Any,
                Slot::Value(value) => Query::Value(&**value),
            })
            .collect()
    }

    /// Equality with no wildcard substitution: a wildcard only equals
    /// another wildcard.
    pub(crate) fn is_exactly(&self, query: &[Query<'_>]) -> bool {
        self.slots.len() == query.len()
            && self
                .slots
                .iter()
                .zip(query)
                .all(|(slot, query)| match (slot, query) {
                    (Slot::Any, Query::Any) => true,
                    (Slot::Value(expected), Query::Value(actual)) => expected.eq_value(*actual),
                    _ => false,
                })
    }

    /// Wildcard positions accept anything; every other position must
    /// equal the queried value.
    pub(crate) fn accepts(&self, query: &[Query<'_>]) -> bool {
        self.slots.len() == query.len()
            && self
                .slots
                .iter()
                .zip(query)
                .all(|(slot, query)| match (slot, query) {
                    (Slot::Any, _) => true,
                    (Slot::Value(expected), Query::Value(actual)) => expected.eq_value(*actual),
                    (Slot::Value(_), Query::Any) => false,
                })
    }

    pub(crate) fn same_as(&self, other: &ArgState) -> bool {
        self.is_exactly(&other.query())
    }
}

impl fmt::Display for ArgState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_query(f, &self.query())
    }
}

impl fmt::Debug for ArgState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.slots).finish()
    }
}

/// Renders `3, _, "x"`.
pub(crate) fn write_query(f: &mut Formatter<'_>, query: &[Query<'_>]) -> fmt::Result {
    let mut query = query.iter();
    if let Some(first) = query.next() {
        write!(f, "{:?}", first)?;
    }
    query.try_for_each(|p| write!(f, ", {:?}", p))
}

pub(crate) struct DisplayQuery<'a, 'p>(pub &'a [Query<'p>]);

impl fmt::Display for DisplayQuery<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_query(f, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any;

    fn state(slots: Vec<Slot>) -> ArgState {
        ArgState::new(slots)
    }

    #[test]
    fn values_of_different_types_are_not_equal() {
        assert!(!1_i32.eq_value(&1_i64));
        assert!(1_i32.eq_value(&1_i32));
        assert!(String::from("a").eq_value(&String::from("a")));
    }

    #[test]
    fn exact_requires_wildcards_in_the_same_positions() {
        let configured = state(vec![Slot::from(Arg::Value(2)), Slot::from(any::<i32>())]);

        assert!(configured.is_exactly(&[Query::Value(&2), Query::Any]));
        assert!(!configured.is_exactly(&[Query::Value(&2), Query::Value(&9)]));
        assert!(!configured.is_exactly(&[Query::Any, Query::Any]));
    }

    #[test]
    fn wildcard_positions_accept_anything() {
        let configured = state(vec![Slot::from(any::<i32>()), Slot::from(Arg::Value(1))]);

        assert!(configured.accepts(&[Query::Value(&10), Query::Value(&1)]));
        assert!(configured.accepts(&[Query::Value(&5), Query::Value(&1)]));
        assert!(!configured.accepts(&[Query::Value(&5), Query::Value(&2)]));
        // a concrete position never accepts a wildcard query
        assert!(!configured.accepts(&[Query::Value(&5), Query::Any]));
    }

    #[test]
    fn length_mismatch_never_matches() {
        let configured = state(vec![Slot::from(any::<i32>())]);
        assert!(!configured.accepts(&[]));
        assert!(!configured.is_exactly(&[Query::Any, Query::Any]));
    }

    #[test]
    fn renders_values_and_wildcards() {
        let configured = state(vec![
            Slot::from(Arg::Value(3)),
            Slot::from(any::<i32>()),
            Slot::from(Arg::Value("x".to_string())),
        ]);
        assert_eq!(configured.to_string(), r#"3, _, "x""#);
        assert!(configured.has_wildcard());
    }
}
