use paste::paste;

use super::{ArgState, ArgValue, Query, Slot};
use crate::Arg;

/// Converts the arguments captured by a recorder into an
/// [`ArgState`].
///
/// Implemented for `()` and for tuples of [`Arg`] of up to ten
/// elements. The length of the tuple is the arity of the recorded
/// operation, so the signature never depends on the values inside.
pub trait IntoState {
    const ARITY: usize;

    fn into_state(self) -> ArgState;
}

/// The arguments a double received for a real call.
///
/// Implemented for `()` and for tuples of references of up to ten
/// elements.
pub trait ActualArgs {
    const ARITY: usize;

    #[doc(hidden)]
    fn query(&self) -> Vec<Query<'_>>;
}

impl IntoState for () {
    const ARITY: usize = 0;

    fn into_state(self) -> ArgState {
        ArgState::default()
    }
}

impl ActualArgs for () {
    const ARITY: usize = 0;

    fn query(&self) -> Vec<Query<'_>> {
        vec![]
    }
}

// (a b c) => 3
macro_rules! count {
    () => { 0usize };
    ($head:tt $($tail:tt)*) => { 1usize + count!($($tail)*) };
}

// (a,b,c) => tuple!(b,c)
macro_rules! peel {
    ($idx:tt, $($other:tt,)*) => (tuple! { $($other,)* })
}

// implement IntoState and ActualArgs for tuples
macro_rules! tuple {
    () => ();
    ($($idx:tt,)+) => (
        paste! {
            impl<$([<A $idx>]: ArgValue),+> IntoState for ($(Arg<[<A $idx>]>,)+) {
                const ARITY: usize = count!($($idx)+);

                fn into_state(self) -> ArgState {
                    let ($([<a $idx>],)+) = self;
                    ArgState::new(vec![$(Slot::from([<a $idx>])),+])
                }
            }

            impl<'a, $([<A $idx>]: ArgValue),+> ActualArgs for ($(&'a [<A $idx>],)+) {
                const ARITY: usize = count!($($idx)+);

                fn query(&self) -> Vec<Query<'_>> {
                    let ($([<a $idx>],)+) = self;
                    vec![$(Query::Value(*[<a $idx>])),+]
                }
            }
        }
        peel! { $($idx,)+ }
    )
}

tuple! { 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, }
