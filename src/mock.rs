use std::fmt::{self, Formatter};

use tracing::{debug, warn};

use crate::{
    registry::{Behavior, Upserted},
    signature::{extract, Extracted},
    Dispatcher, Error, Member, MockConfig, Times,
};

/// Types that can stand in for a mocked trait.
///
/// Implemented by the doubles generated by
/// [`#[understudy::mockable]`](crate::mockable). The recorder is the
/// proxy that member expressions are evaluated against: it has one
/// method per trait method, taking [`Arg`](crate::Arg)s instead of
/// plain values and returning the recorded [`Member`].
pub trait Mockable: Sized {
    type Recorder: Default;

    /// Name of the mocked trait, used in diagnostics.
    const NAME: &'static str;

    fn from_dispatcher(dispatcher: Dispatcher) -> Self;
}

/// Configures and verifies the doubles of a mocked trait.
///
/// ```
/// #[understudy::mockable]
/// pub trait Odometer {
///     fn mileage(&self) -> u32;
///     fn add_trip(&self, km: u32) -> u32;
/// }
///
/// let mock = understudy::Mock::<OdometerDouble>::new();
/// mock.setup(|o| o.mileage(), 100);
/// mock.setup(|o| o.add_trip(understudy::any()), 120);
///
/// let odometer = mock.object();
/// assert_eq!(odometer.mileage(), 100);
/// assert_eq!(odometer.add_trip(20), 120);
///
/// mock.verify(|o| o.mileage(), understudy::Times::Once);
/// mock.verify(|o| o.add_trip(20), 1);
/// ```
pub struct Mock<D: Mockable> {
    dispatcher: Dispatcher,
    recorder: D::Recorder,
}

impl<D: Mockable> Mock<D> {
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Self {
        Mock {
            dispatcher: Dispatcher::new(config.or_name(D::NAME)),
            recorder: D::Recorder::default(),
        }
    }

    /// Returns a double to hand to the code under test.
    ///
    /// Every double shares this mock's behaviors and counts.
    pub fn object(&self) -> D {
        D::from_dispatcher(self.dispatcher.clone())
    }

    /// The recorder member expressions are evaluated against. Useful
    /// to build the members of a [`setup_sequence`](Self::setup_sequence).
    pub fn recorder(&self) -> &D::Recorder {
        &self.recorder
    }

    pub fn config(&self) -> &MockConfig {
        self.dispatcher.config()
    }

    /// Answers every matching call to `member` with a clone of
    /// `result`.
    ///
    /// Configuring the exact same arguments again replaces the
    /// previous answer and its count.
    ///
    /// # Panics
    ///
    /// If the member expression does not name a member.
    pub fn setup<O>(&self, member: impl FnOnce(&D::Recorder) -> Member<O>, result: O)
    where
        O: Clone + Send + 'static,
    {
        if let Err(e) = self.try_setup(member, result) {
            self.misuse(e)
        }
    }

    pub fn try_setup<O>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
        result: O,
    ) -> Result<(), Error>
    where
        O: Clone + Send + 'static,
    {
        self.try_setup_with(member, move || result.clone())
    }

    /// Answers every matching call to `member` with the output of
    /// `supplier`.
    ///
    /// The supplier runs after the mock is unlocked, so it may call
    /// other members of this mock through its doubles.
    ///
    /// # Panics
    ///
    /// If the member expression does not name a member.
    pub fn setup_with<O: Send + 'static>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
        supplier: impl FnMut() -> O + Send + 'static,
    ) {
        if let Err(e) = self.try_setup_with(member, supplier) {
            self.misuse(e)
        }
    }

    pub fn try_setup_with<O: Send + 'static>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
        supplier: impl FnMut() -> O + Send + 'static,
    ) -> Result<(), Error> {
        let Extracted {
            signature,
            state,
            source,
        } = extract(&self.recorder, member)?;

        let behavior = Behavior::reusable(state, source, supplier);
        self.upsert(signature, behavior);
        Ok(())
    }

    /// Answers the first matching call to `member` with `result`,
    /// ahead of any reusable behavior.
    ///
    /// Repeated calls queue more answers, even for the same arguments.
    ///
    /// # Panics
    ///
    /// If the member expression does not name a member.
    pub fn setup_once<O>(&self, member: impl FnOnce(&D::Recorder) -> Member<O>, result: O)
    where
        O: Send + 'static,
    {
        if let Err(e) = self.try_setup_once(member, result) {
            self.misuse(e)
        }
    }

    pub fn try_setup_once<O>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
        result: O,
    ) -> Result<(), Error>
    where
        O: Send + 'static,
    {
        let Extracted {
            signature,
            state,
            source,
        } = extract(&self.recorder, member)?;

        let behavior = Behavior::single_use(state, source, result);
        self.upsert(signature, behavior);
        Ok(())
    }

    /// Queues one single-use answer per entry, in order.
    ///
    /// ```
    /// #[understudy::mockable]
    /// pub trait Counter {
    ///     fn next(&self) -> u8;
    /// }
    ///
    /// let mock = understudy::Mock::<CounterDouble>::new();
    /// let r = mock.recorder();
    /// mock.setup_sequence([(r.next(), 1), (r.next(), 2)]);
    ///
    /// let counter = mock.object();
    /// assert_eq!(counter.next(), 1);
    /// assert_eq!(counter.next(), 2);
    /// ```
    ///
    /// # Panics
    ///
    /// If any member does not name a member. Entries before it stay
    /// configured.
    pub fn setup_sequence<O>(&self, setups: impl IntoIterator<Item = (Member<O>, O)>)
    where
        O: Send + 'static,
    {
        for (member, result) in setups {
            self.setup_once(|_| member, result);
        }
    }

    /// Number of calls answered by the behavior `member` resolves to.
    ///
    /// Resolution follows the same exact-then-wildcard rule as a real
    /// call but neither counts nor consumes anything. Returns 0 when
    /// no behavior matches.
    ///
    /// # Panics
    ///
    /// If the member expression does not name a member.
    pub fn times_member_called<O>(&self, member: impl FnOnce(&D::Recorder) -> Member<O>) -> usize {
        match extract(&self.recorder, member) {
            Ok(extracted) => self
                .dispatcher
                .invocations(&extracted.signature, &extracted.state.query()),
            Err(e) => self.misuse(e),
        }
    }

    /// Asserts that `member` was called `times` times.
    ///
    /// On mismatch, every behavior configured for the member is
    /// listed with its count before the assertion fails.
    pub fn verify<O>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
        times: impl Into<Times>,
    ) {
        match self.try_verify(member, times) {
            Ok(()) => {}
            Err(Error::VerificationFailed {
                source_text,
                expected,
                actual,
                configured,
            }) => assert_eq!(
                actual,
                expected,
                "{}: `{}` was not called the expected number of times. Actual calls made:\n{}",
                self.name(),
                source_text,
                configured
            ),
            Err(e) => self.misuse(e),
        }
    }

    pub fn try_verify<O>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
        times: impl Into<Times>,
    ) -> Result<(), Error> {
        let Extracted {
            signature,
            state,
            source,
        } = extract(&self.recorder, member)?;

        let expected = times.into().count();
        let actual = self.dispatcher.invocations(&signature, &state.query());
        if actual == expected {
            return Ok(());
        }

        let configured = self.dispatcher.describe(&signature);
        warn!(
            mock = self.name(),
            %signature,
            expected,
            actual,
            "actual calls made for `{}`:\n{}",
            source,
            configured
        );

        Err(Error::VerificationFailed {
            source_text: source,
            expected,
            actual,
            configured,
        })
    }

    /// Calls `member` with its recorded arguments, as a double would,
    /// but reports an unmatched call as [`Error::Unresolved`] instead
    /// of panicking.
    pub fn invoke<O: 'static>(
        &self,
        member: impl FnOnce(&D::Recorder) -> Member<O>,
    ) -> Result<O, Error> {
        let Extracted {
            signature,
            state,
            source,
        } = extract(&self.recorder, member)?;

        if state.has_wildcard() {
            return Err(Error::WildcardInvocation(source));
        }

        self.dispatcher.dispatch(&signature, &state.query())
    }

    fn upsert(&self, signature: crate::Signature, behavior: Behavior) {
        let source = behavior.source().to_string();
        let single_use = behavior.is_single_use();
        let upserted = self.dispatcher.registry().upsert(signature, behavior);

        match upserted {
            Upserted::Appended => debug!(mock = self.name(), %source, single_use, "configured behavior"),
            Upserted::Replaced => debug!(mock = self.name(), %source, "replaced behavior"),
        }
    }

    fn name(&self) -> &str {
        self.dispatcher.name()
    }

    fn misuse(&self, error: Error) -> ! {
        panic!("{}: {}", self.name(), error)
    }
}

impl<D: Mockable> Default for Mock<D> {
    fn default() -> Self {
        Mock::new()
    }
}

impl<D: Mockable> fmt::Debug for Mock<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
