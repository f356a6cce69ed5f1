use std::borrow::Cow;

/// What a double answers when no configured behavior matches a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// The call is unresolved: a panic from the double, or
    /// [`Error::Unresolved`](crate::Error::Unresolved) from
    /// [`Mock::invoke`](crate::Mock::invoke).
    #[default]
    Unresolved,
    /// The first behavior configured through `setup` for the member
    /// answers instead, regardless of its arguments.
    FirstConfigured,
}

/// Options of a [`Mock`](crate::Mock).
///
/// ```
/// use understudy::{Fallback, MockConfig};
///
/// let config = MockConfig::new()
///     .with_name("stereo")
///     .with_fallback(Fallback::FirstConfigured);
///
/// assert_eq!(config.name(), Some("stereo"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    name: Option<Cow<'static, str>>,
    fallback: Fallback,
}

impl MockConfig {
    pub fn new() -> Self {
        MockConfig::default()
    }

    /// Name used in logs and failure messages. Defaults to the name of
    /// the mocked trait.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    pub(crate) fn or_name(mut self, name: &'static str) -> Self {
        self.name.get_or_insert(Cow::Borrowed(name));
        self
    }
}
