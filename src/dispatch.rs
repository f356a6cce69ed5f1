use std::{
    fmt::{self, Formatter},
    sync::Arc,
};

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use crate::{
    registry::{Behavior, Produced, Registry, SignatureEntry},
    state::{ActualArgs, DisplayQuery, Query},
    Error, Fallback, MockConfig, Signature,
};

struct Shared {
    config: MockConfig,
    registry: Mutex<Registry>,
}

/// Handle to the behaviors of one mock.
///
/// The mock and every double it hands out share the same dispatcher,
/// so configuring the mock after a double was given away still
/// affects that double.
#[derive(Clone)]
pub struct Dispatcher {
    shared: Arc<Shared>,
}

impl Dispatcher {
    pub(crate) fn new(config: MockConfig) -> Self {
        Dispatcher {
            shared: Arc::new(Shared {
                config,
                registry: Mutex::new(Registry::new()),
            }),
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.shared.config
    }

    pub(crate) fn name(&self) -> &str {
        self.shared.config.name().unwrap_or("mock")
    }

    pub(crate) fn registry(&self) -> MutexGuard<'_, Registry> {
        self.shared.registry.lock()
    }

    #[doc(hidden)]
    /// Answers a call made on a double.
    ///
    /// Only meant to be called by the code generated by
    /// `#[understudy::mockable]`. Panics if the call is unresolved,
    /// since the mocked method has no way to return that.
    pub fn forward<O: 'static, A: ActualArgs>(&self, member: &'static str, args: A) -> O {
        let signature = Signature::operation(member, A::ARITY);
        match self.dispatch(&signature, &args.query()) {
            Ok(output) => output,
            Err(e) => panic!("{}: {}", self.name(), e),
        }
    }

    #[doc(hidden)]
    /// Answers a property read made on a double.
    ///
    /// Only meant to be called by the code generated by
    /// `#[understudy::mockable]`.
    pub fn forward_property<O: 'static>(&self, member: &'static str) -> O {
        let signature = Signature::property(member);
        match self.dispatch(&signature, &[]) {
            Ok(output) => output,
            Err(e) => panic!("{}: {}", self.name(), e),
        }
    }

    /// Resolves the behavior for a call, counts it, consumes it if it
    /// is single-use and produces its answer.
    ///
    /// Suppliers run after the registry is released, so they may call
    /// other members of the same mock.
    pub(crate) fn dispatch<O: 'static>(
        &self,
        signature: &Signature,
        query: &[Query<'_>],
    ) -> Result<O, Error> {
        let produced = {
            let mut registry = self.registry();
            let fallback = self.shared.config.fallback();

            let resolved = registry.lookup_mut(signature).and_then(|entry| {
                let index = if signature.is_property() {
                    // a property answers with its first behavior, no matching
                    (!entry.behaviors().is_empty()).then(|| 0)
                } else {
                    resolve(entry.behaviors(), query)
                };

                index
                    .or_else(|| fall_back(entry.behaviors(), fallback))
                    .map(|index| (entry, index))
            });

            match resolved {
                Some((entry, index)) => {
                    trace!(
                        mock = self.name(),
                        %signature,
                        arguments = %DisplayQuery(query),
                        behavior = entry.behaviors()[index].source(),
                        "dispatching"
                    );
                    produce(entry, index)?
                }
                None => {
                    let error = Error::Unresolved {
                        signature: signature.clone(),
                        arguments: DisplayQuery(query).to_string(),
                    };
                    warn!(mock = self.name(), "{}", error);
                    return Err(error);
                }
            }
        };

        Ok(produced.into_output())
    }

    /// Invocation count of the behavior the query resolves to, without
    /// touching it.
    pub(crate) fn invocations(&self, signature: &Signature, query: &[Query<'_>]) -> usize {
        let registry = self.registry();
        registry
            .lookup(signature)
            .and_then(|entry| {
                resolve(entry.behaviors(), query).map(|index| entry.behaviors()[index].invocations())
            })
            .unwrap_or(0)
    }

    pub(crate) fn describe(&self, signature: &Signature) -> String {
        match self.registry().lookup(signature) {
            Some(entry) if !entry.behaviors().is_empty() => entry.describe(),
            _ => "  (no behaviors configured)".to_string(),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("mock", &self.name())
            .finish()
    }
}

/// Picks the behavior that answers `query`.
///
/// An exact match wins. Otherwise the first behavior, in entry order,
/// whose concrete positions all equal the query and whose wildcard
/// positions accept anything.
pub(crate) fn resolve(behaviors: &[Behavior], query: &[Query<'_>]) -> Option<usize> {
    behaviors
        .iter()
        .position(|b| b.state().is_exactly(query))
        .or_else(|| {
            behaviors
                .iter()
                .position(|b| b.state().has_wildcard() && b.state().accepts(query))
        })
}

fn fall_back(behaviors: &[Behavior], fallback: Fallback) -> Option<usize> {
    match fallback {
        Fallback::Unresolved => None,
        Fallback::FirstConfigured => behaviors.iter().position(Behavior::is_default_fallback),
    }
}

fn produce<O: 'static>(entry: &mut SignatureEntry, index: usize) -> Result<Produced<O>, Error> {
    let signature = entry.signature().clone();
    let behaviors = entry.behaviors_mut();

    // check before counting or consuming anything
    if !behaviors[index].produces::<O>() {
        return Err(Error::TypeMismatch(signature));
    }

    behaviors[index].record_invocation();

    let output = if behaviors[index].is_single_use() {
        let behavior = behaviors.remove(index);
        debug!(%signature, behavior = behavior.source(), "consumed single-use behavior");
        behavior.into_answer::<O>()
    } else {
        behaviors[index].answer::<O>()
    };

    output.ok_or(Error::TypeMismatch(signature))
}
