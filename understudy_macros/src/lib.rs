extern crate proc_macro;

mod mockable;

use darling::{export::NestedMeta, FromMeta};
use proc_macro::TokenStream;

/// Generates a test double and a recorder for a trait.
///
/// For a trait `Car` this emits, next to the trait itself:
///
/// * `CarDouble`: implements `Car` by forwarding every call to the
///   [`Mock`](https://docs.rs/understudy) it was created from.
/// * `CarRecorder`: one method per trait method, taking
///   `impl Into<Arg<T>>` per argument. Member expressions given to
///   `Mock::setup` and `Mock::verify` are evaluated against it.
///
/// Methods without arguments can be marked `#[property]` to be
/// configured as properties instead of operations.
///
/// Both generated names can be changed:
///
/// ```
/// #[understudy::mockable(double = "FakeClock", recorder = "ClockCalls")]
/// pub trait Clock {
///     #[property]
///     fn now(&self) -> u64;
/// }
///
/// let mock = understudy::Mock::<FakeClock>::new();
/// mock.setup(|c: &ClockCalls| c.now(), 42);
/// assert_eq!(mock.object().now(), 42);
/// ```
#[proc_macro_attribute]
pub fn mockable(args: TokenStream, original: TokenStream) -> TokenStream {
    let original = syn::parse_macro_input!(original as syn::ItemTrait);

    let args = match NestedMeta::parse_meta_list(args.into())
        .map_err(darling::Error::from)
        .and_then(|v| mockable::Args::from_list(&v))
    {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    match mockable::Mockable::new(original, args) {
        Ok(mockable) => TokenStream::from(mockable),
        Err(e) => e.write_errors().into(),
    }
}
