use understudy::{any, Error, Mock};

#[understudy::mockable]
pub trait Dice {
    fn roll(&self) -> u8;
    fn roll_with(&self, sides: u8) -> u8;
}

#[test]
fn sequence_answers_in_order() {
    let mock = Mock::<DiceDouble>::new();
    let r = mock.recorder();
    mock.setup_sequence([(r.roll(), 1), (r.roll(), 2)]);

    let dice = mock.object();
    assert_eq!(dice.roll(), 1);
    assert_eq!(dice.roll(), 2);
    assert!(matches!(
        mock.invoke(|d| d.roll()),
        Err(Error::Unresolved { .. })
    ));
}

#[test]
#[should_panic(expected = "no behavior configured for `roll()`")]
fn exhausted_sequence_panics() {
    let mock = Mock::<DiceDouble>::new();
    let r = mock.recorder();
    mock.setup_sequence([(r.roll(), 6)]);

    let dice = mock.object();
    dice.roll();
    dice.roll();
}

#[test]
fn once_goes_before_standing() {
    let mock = Mock::<DiceDouble>::new();
    mock.setup(|d| d.roll_with(6), 3);
    mock.setup_once(|d| d.roll_with(6), 6);
    mock.setup_once(|d| d.roll_with(6), 5);

    let dice = mock.object();
    assert_eq!(dice.roll_with(6), 6);
    assert_eq!(dice.roll_with(6), 5);
    assert_eq!(dice.roll_with(6), 3);
    assert_eq!(dice.roll_with(6), 3);

    // consumed behaviors take their counts with them
    mock.verify(|d| d.roll_with(6), 2);
}

#[test]
fn exact_standing_wins_over_wildcard_once() {
    let mock = Mock::<DiceDouble>::new();
    mock.setup_once(|d| d.roll_with(any()), 4);
    mock.setup(|d| d.roll_with(20), 17);

    let dice = mock.object();
    assert_eq!(dice.roll_with(20), 17);
    assert_eq!(dice.roll_with(12), 4);
    assert!(mock.invoke(|d| d.roll_with(12)).is_err());
}

#[test]
fn sequence_with_different_arguments() {
    let mock = Mock::<DiceDouble>::new();
    let r = mock.recorder();
    mock.setup_sequence([(r.roll_with(6), 1), (r.roll_with(any()), 2), (r.roll_with(6), 3)]);

    let dice = mock.object();
    assert_eq!(dice.roll_with(6), 1);
    assert_eq!(dice.roll_with(6), 3);
    assert_eq!(dice.roll_with(6), 2);
    assert!(mock.invoke(|d| d.roll_with(6)).is_err());
}

#[test]
fn invoke_consumes_like_a_call() {
    let mock = Mock::<DiceDouble>::new();
    mock.setup_once(|d| d.roll(), 2);
    mock.setup(|d| d.roll_with(any()), 1);

    assert_eq!(mock.invoke(|d| d.roll()), Ok(2));
    assert_eq!(mock.invoke(|d| d.roll_with(8)), Ok(1));
    mock.verify(|d| d.roll_with(any()), 1);
}
