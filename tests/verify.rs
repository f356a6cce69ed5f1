use understudy::{any, Error, Mock, Times};

#[understudy::mockable]
pub trait Radio {
    fn tune(&self, frequency: u32) -> bool;
    fn mute(&self);
}

#[test]
fn times_accepts_integers_and_names() {
    let mock = Mock::<RadioDouble>::new();
    mock.setup(|r| r.tune(any()), true);
    mock.setup(|r| r.mute(), ());

    let radio = mock.object();
    radio.tune(88);
    radio.tune(101);
    radio.mute();

    mock.verify(|r| r.tune(any()), Times::Exactly(2));
    mock.verify(|r| r.tune(any()), 2);
    mock.verify(|r| r.mute(), Times::Once);
    mock.verify(|r| r.mute(), Times::from(1));
}

#[test]
fn try_verify_reports_the_configured_behaviors() {
    let mock = Mock::<RadioDouble>::new();
    mock.setup(|r| r.tune(88), true);
    mock.setup(|r| r.tune(any()), false);

    let radio = mock.object();
    radio.tune(88);
    radio.tune(90);
    radio.tune(91);

    assert_eq!(mock.try_verify(|r| r.tune(88), 1), Ok(()));

    let error = mock.try_verify(|r| r.tune(any()), Times::Once).unwrap_err();
    match error {
        Error::VerificationFailed {
            source_text,
            expected,
            actual,
            configured,
        } => {
            assert_eq!(source_text, "tune(_)");
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
            assert_eq!(configured, "  tune(88) x 1\n  tune(_) x 2");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn try_verify_without_behaviors() {
    let mock = Mock::<RadioDouble>::new();

    let error = mock.try_verify(|r| r.mute(), 1).unwrap_err();
    assert_eq!(
        error,
        Error::VerificationFailed {
            source_text: "mute()".to_string(),
            expected: 1,
            actual: 0,
            configured: "  (no behaviors configured)".to_string(),
        }
    );
}

#[test]
#[should_panic(expected = "was not called the expected number of times")]
fn verify_panics_on_mismatch() {
    let mock = Mock::<RadioDouble>::new();
    mock.setup(|r| r.mute(), ());

    mock.verify(|r| r.mute(), Times::Once);
}

#[test]
#[should_panic(expected = "tune(101) x 1")]
fn verify_failure_lists_actual_calls() {
    let mock = Mock::<RadioDouble>::new();
    mock.setup(|r| r.tune(101), true);
    mock.object().tune(101);

    mock.verify(|r| r.tune(101), Times::Never);
}
