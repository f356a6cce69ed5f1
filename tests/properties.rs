use understudy::{Mock, Times};

#[understudy::mockable]
pub trait Vehicle {
    #[property]
    fn name(&self) -> String;

    #[property]
    fn wheels(&self) -> u8;

    fn name_of(&self, index: usize) -> String;
}

#[test]
fn property_reads_latest_setup() {
    let mock = Mock::<VehicleDouble>::new();
    mock.setup(|v| v.name(), "truck".to_string());
    mock.setup(|v| v.name(), "van".to_string());

    let vehicle = mock.object();
    assert_eq!(vehicle.name(), "van");
    assert_eq!(vehicle.name(), "van");
    mock.verify(|v| v.name(), 2);
}

#[test]
fn property_once_then_standing() {
    let mock = Mock::<VehicleDouble>::new();
    mock.setup(|v| v.wheels(), 4);
    mock.setup_once(|v| v.wheels(), 3);

    let vehicle = mock.object();
    assert_eq!(vehicle.wheels(), 3);
    assert_eq!(vehicle.wheels(), 4);
    mock.verify(|v| v.wheels(), Times::Once);
}

#[test]
fn property_and_operation_are_separate_members() {
    let mock = Mock::<VehicleDouble>::new();
    mock.setup(|v| v.name(), "bus".to_string());
    mock.setup(|v| v.name_of(0), "first".to_string());

    let vehicle = mock.object();
    assert_eq!(vehicle.name(), "bus");
    assert_eq!(vehicle.name_of(0), "first");
    mock.verify(|v| v.name(), 1);
    mock.verify(|v| v.name_of(0), 1);
}

#[test]
#[should_panic(expected = "no behavior configured for `wheels`")]
fn unconfigured_property_panics() {
    let mock = Mock::<VehicleDouble>::new();
    mock.object().wheels();
}
