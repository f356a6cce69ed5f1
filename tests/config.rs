use understudy::{any, Error, Fallback, Mock, MockConfig};

#[understudy::mockable]
pub trait Scale {
    fn weigh(&self, item: String) -> u32;
}

#[test]
fn strict_by_default() {
    let mock = Mock::<ScaleDouble>::new();
    mock.setup(|s| s.weigh("apple".to_string()), 150);

    assert_eq!(mock.config().fallback(), Fallback::Unresolved);
    assert_eq!(mock.config().name(), Some("Scale"));
    assert!(matches!(
        mock.invoke(|s| s.weigh("pear")),
        Err(Error::Unresolved { .. })
    ));
}

#[test]
fn first_configured_fallback() {
    let config = MockConfig::new().with_fallback(Fallback::FirstConfigured);
    let mock = Mock::<ScaleDouble>::with_config(config);
    mock.setup_once(|s| s.weigh("melon"), 2000);
    mock.setup(|s| s.weigh("apple"), 150);
    mock.setup(|s| s.weigh("plum"), 40);

    let scale = mock.object();
    assert_eq!(scale.weigh("pear".to_string()), 150);
    assert_eq!(scale.weigh("plum".to_string()), 40);
    assert_eq!(scale.weigh("melon".to_string()), 2000);

    mock.verify(|s| s.weigh("apple"), 1);
}

#[test]
fn fallback_needs_a_configured_member() {
    let config = MockConfig::new().with_fallback(Fallback::FirstConfigured);
    let mock = Mock::<ScaleDouble>::with_config(config);
    mock.setup_once(|s| s.weigh(any()), 1);

    assert_eq!(mock.invoke(|s| s.weigh("kiwi")), Ok(1));
    // single-use behaviors never act as the fallback
    assert!(mock.invoke(|s| s.weigh("kiwi")).is_err());
}

#[test]
#[should_panic(expected = "kitchen scale: ")]
fn name_shows_in_failures() {
    let mock = Mock::<ScaleDouble>::with_config(MockConfig::new().with_name("kitchen scale"));
    mock.object().weigh("flour".to_string());
}
