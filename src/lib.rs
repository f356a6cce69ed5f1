//! Test doubles for traits, configured by recording member
//! expressions.
//!
//! Annotate a trait with [`#[mockable]`](mockable) to generate a double
//! and a recorder for it. A [`Mock`] then configures what the double
//! answers and verifies how it was called:
//!
//! ```
//! use understudy::{any, Mock, Times};
//!
//! #[understudy::mockable]
//! pub trait Car {
//!     #[property]
//!     fn name(&self) -> String;
//!     fn get_sum(&self, a: i32, b: i32) -> i32;
//! }
//!
//! let mock = Mock::<CarDouble>::new();
//! mock.setup(|c| c.name(), "herbie".to_string());
//! mock.setup(|c| c.get_sum(1, 2), 3);
//! mock.setup(|c| c.get_sum(any(), 5), 100);
//!
//! let car = mock.object();
//! assert_eq!(car.name(), "herbie");
//! assert_eq!(car.get_sum(1, 2), 3);
//! assert_eq!(car.get_sum(40, 5), 100);
//!
//! mock.verify(|c| c.get_sum(1, 2), Times::Once);
//! mock.verify(|c| c.get_sum(any(), 5), 1);
//! ```
//!
//! Calls are resolved in order:
//!
//! 1. a behavior configured with exactly the call's arguments
//! 2. the first behavior, in configuration order, whose concrete
//!    arguments equal the call's and whose [`any`] positions accept
//!    the rest
//! 3. the [`Fallback`] of the mock
//!
//! Behaviors queued with [`Mock::setup_once`] are tried before
//! reusable ones and are consumed by the call they answer.
//!
//! Failures are reported through [`tracing`](https://docs.rs/tracing):
//! install a subscriber in your tests to see which behaviors were
//! configured when a call goes unresolved.

mod arg;
mod config;
mod dispatch;
mod error;
mod mock;
mod registry;
mod signature;
mod state;
mod times;

pub use arg::{any, Arg};
pub use config::{Fallback, MockConfig};
pub use dispatch::Dispatcher;
pub use error::Error;
pub use mock::{Mock, Mockable};
pub use signature::{Member, Signature};
pub use state::{ArgState, ArgValue};
#[doc(hidden)]
pub use state::{ActualArgs, IntoState};
pub use times::Times;

pub use understudy_macros::mockable;
