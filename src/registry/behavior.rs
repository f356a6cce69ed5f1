use std::{
    any::Any,
    fmt::{self, Formatter},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::ArgState;

/// One configured rule: the argument state it answers for, what it
/// answers with, and how often it has been used.
pub(crate) struct Behavior {
    state: ArgState,
    // an `Answer<O>` for the output type of the member
    answer: Box<dyn Any + Send>,
    invocations: usize,
    single_use: bool,
    default_fallback: bool,
    source: String,
}

type Supplier<O> = Arc<Mutex<dyn FnMut() -> O + Send>>;

enum Answer<O> {
    Once(O),
    Many(Supplier<O>),
}

/// The answer picked for a call.
///
/// A deferred supplier is run by the caller once the registry is
/// unlocked, and may call back into its mock.
pub(crate) enum Produced<O> {
    Ready(O),
    Deferred(Supplier<O>),
}

impl<O> Produced<O> {
    pub(crate) fn into_output(self) -> O {
        match self {
            Produced::Ready(value) => value,
            Produced::Deferred(supplier) => {
                let mut supplier = supplier.lock();
                (&mut *supplier)()
            }
        }
    }
}

impl Behavior {
    /// A behavior that answers every matching call.
    pub(crate) fn reusable<O: Send + 'static>(
        state: ArgState,
        source: String,
        answer: impl FnMut() -> O + Send + 'static,
    ) -> Self {
        let supplier: Supplier<O> = Arc::new(Mutex::new(answer));
        Behavior {
            state,
            answer: Box::new(Answer::Many(supplier)),
            invocations: 0,
            single_use: false,
            default_fallback: true,
            source,
        }
    }

    /// A behavior that is consumed by the first matching call.
    pub(crate) fn single_use<O: Send + 'static>(state: ArgState, source: String, value: O) -> Self {
        Behavior {
            state,
            answer: Box::new(Answer::Once(value)),
            invocations: 0,
            single_use: true,
            default_fallback: false,
            source,
        }
    }

    pub fn state(&self) -> &ArgState {
        &self.state
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }

    pub fn is_single_use(&self) -> bool {
        self.single_use
    }

    /// Whether this behavior may answer unmatched calls under
    /// [`Fallback::FirstConfigured`](crate::Fallback::FirstConfigured).
    pub fn is_default_fallback(&self) -> bool {
        self.default_fallback
    }

    /// The member expression this behavior was configured with.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn produces<O: 'static>(&self) -> bool {
        self.answer.is::<Answer<O>>()
    }

    pub(crate) fn record_invocation(&mut self) {
        self.invocations += 1;
    }

    /// The answer of a behavior that stays configured.
    ///
    /// Returns `None` if `O` is not the output type this behavior was
    /// configured with, or if a single-use answer is asked for without
    /// consuming it.
    pub(crate) fn answer<O: 'static>(&self) -> Option<Produced<O>> {
        match self.answer.downcast_ref::<Answer<O>>()? {
            Answer::Many(supplier) => Some(Produced::Deferred(Arc::clone(supplier))),
            Answer::Once(_) => None,
        }
    }

    /// The answer of a behavior that is being consumed.
    pub(crate) fn into_answer<O: 'static>(self) -> Option<Produced<O>> {
        match *self.answer.downcast::<Answer<O>>().ok()? {
            Answer::Once(value) => Some(Produced::Ready(value)),
            Answer::Many(supplier) => Some(Produced::Deferred(supplier)),
        }
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // the answer is type-erased so only describe its shape
        f.debug_struct("Behavior")
            .field("source", &self.source)
            .field("state", &self.state)
            .field("invocations", &self.invocations)
            .field("single_use", &self.single_use)
            .field("default_fallback", &self.default_fallback)
            .finish()
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.source, self.invocations)
    }
}
