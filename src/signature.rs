use std::{
    borrow::Cow,
    fmt::{self, Formatter},
    marker::PhantomData,
};

use crate::{state::IntoState, ArgState, Error};

/// Identifies a member of a mocked trait by name and arity.
///
/// Properties display as their bare name (`mileage`), operations as
/// their name followed by positional placeholders
/// (`get_sum(p0, p1)`). Two signatures are equal if and only if they
/// share the name and arity; argument values never take part.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    name: String,
    arity: Option<usize>,
}

impl Signature {
    pub fn property(name: impl Into<String>) -> Self {
        Signature {
            name: name.into(),
            arity: None,
        }
    }

    pub fn operation(name: impl Into<String>, arity: usize) -> Self {
        Signature {
            name: name.into(),
            arity: Some(arity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` for properties.
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn is_property(&self) -> bool {
        self.arity.is_none()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        let arity = match self.arity {
            Some(arity) => arity,
            None => return Ok(()),
        };

        f.write_str("(")?;
        for position in 0..arity {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "p{}", position)?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Property,
    Operation { arity: usize },
}

/// A recorded member access: which member, and with which
/// arguments.
///
/// Recorders hand these out. `O` is the output type of the member so
/// that the result given to a setup is checked against it at compile
/// time.
pub struct Member<O> {
    name: Cow<'static, str>,
    kind: Kind,
    state: ArgState,
    // covariant with O, and Send/Sync regardless of it
    _output: PhantomData<fn() -> O>,
}

impl<O> Member<O> {
    /// Records a property read.
    pub fn property(name: impl Into<Cow<'static, str>>) -> Self {
        Member {
            name: name.into(),
            kind: Kind::Property,
            state: ArgState::default(),
            _output: PhantomData,
        }
    }

    /// Records an operation call.
    ///
    /// The arity is taken from the tuple of arguments, not from their
    /// values.
    pub fn operation<S: IntoState>(name: impl Into<Cow<'static, str>>, args: S) -> Self {
        Member {
            name: name.into(),
            kind: Kind::Operation { arity: S::ARITY },
            state: args.into_state(),
            _output: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &ArgState {
        &self.state
    }

    fn source(&self) -> String {
        match self.kind {
            Kind::Property => self.name.to_string(),
            Kind::Operation { .. } => format!("{}({})", self.name, self.state),
        }
    }
}

impl<O> fmt::Debug for Member<O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source())
    }
}

/// The canonical key and captured arguments of a member expression.
#[derive(Debug)]
pub(crate) struct Extracted {
    pub signature: Signature,
    pub state: ArgState,
    /// Rendered member expression, e.g. `set_station(_)`. Only used
    /// for diagnostics.
    pub source: String,
}

/// Evaluates a member expression against a recorder and derives its
/// signature and argument state.
///
/// Fails with [`Error::UnsupportedExpression`] if the recorded member
/// does not carry a member name.
pub(crate) fn extract<R, O>(
    recorder: &R,
    expression: impl FnOnce(&R) -> Member<O>,
) -> Result<Extracted, Error> {
    let member = expression(recorder);
    if !is_member_name(&member.name) {
        return Err(Error::UnsupportedExpression(member.name.into_owned()));
    }

    let source = member.source();
    let signature = match member.kind {
        Kind::Property => Signature::property(member.name),
        Kind::Operation { arity } => Signature::operation(member.name, arity),
    };

    Ok(Extracted {
        signature,
        state: member.state,
        source,
    })
}

fn is_member_name(name: &str) -> bool {
    let name = name.strip_prefix("r#").unwrap_or(name);
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }

    name != "_" && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{any, Arg};

    #[derive(Default)]
    struct Recorder;

    impl Recorder {
        fn get_sum(&self, a: impl Into<Arg<i32>>, b: impl Into<Arg<i32>>) -> Member<i32> {
            Member::operation("get_sum", (a.into(), b.into()))
        }

        fn get_a_string(&self) -> Member<String> {
            Member::operation("get_a_string", ())
        }

        fn string_property(&self) -> Member<String> {
            Member::property("string_property")
        }
    }

    #[test]
    fn signature_ignores_argument_values() {
        let first = extract(&Recorder, |r| r.get_sum(1, 2)).unwrap();
        let second = extract(&Recorder, |r| r.get_sum(40, any())).unwrap();

        assert_eq!(first.signature, second.signature);
        assert_eq!(first.signature.to_string(), "get_sum(p0, p1)");
        assert_eq!(first.source, "get_sum(1, 2)");
        assert_eq!(second.source, "get_sum(40, _)");
    }

    #[test]
    fn operation_without_arguments() {
        let extracted = extract(&Recorder, |r| r.get_a_string()).unwrap();
        assert_eq!(extracted.signature.to_string(), "get_a_string()");
        assert_eq!(extracted.signature.arity(), Some(0));
        assert!(extracted.state.is_empty());
    }

    #[test]
    fn property_is_bare_name_with_empty_state() {
        let extracted = extract(&Recorder, |r| r.string_property()).unwrap();
        assert_eq!(extracted.signature.to_string(), "string_property");
        assert!(extracted.signature.is_property());
        assert!(extracted.state.is_empty());
    }

    #[test]
    fn property_and_operation_of_same_name_differ() {
        assert_ne!(Signature::property("name"), Signature::operation("name", 0));
    }

    #[test]
    fn empty_member_name_is_unsupported() {
        let error = extract(&Recorder, |_| Member::<()>::operation("", ())).unwrap_err();
        assert_eq!(error, Error::UnsupportedExpression(String::new()));

        assert!(extract(&Recorder, |_| Member::<()>::property("not a name")).is_err());
        assert!(extract(&Recorder, |_| Member::<()>::property("_")).is_err());
        assert!(extract(&Recorder, |_| Member::<()>::property("r#type")).is_ok());
    }
}
