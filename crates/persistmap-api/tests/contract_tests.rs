// Lookup and removal contracts of PersistentMap

mod common;

use common::{s, MapTestFixture};
use persistmap::Error;

#[test]
fn test_missing_key_on_empty_map() {
    let fixture = MapTestFixture::new();
    let map = fixture.open();

    assert!(matches!(map.get("x"), Err(Error::KeyNotFound)));
    assert_eq!(map.try_get("x"), None);
    assert!(!map.contains_key("x"));
    assert!(!map.remove("x").expect("remove of a missing key must not fail"));
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
}

#[test]
fn test_remove_if_semantics() {
    let fixture = MapTestFixture::new();
    let map = fixture.open();
    map.set(s("a"), s("1")).unwrap();

    // Wrong expected value: no-op
    assert!(!map.remove_if("a", &s("2")).unwrap());
    assert_eq!(map.get("a").unwrap(), "1");
    assert_eq!(fixture.read_file().get("a"), Some(&s("1")));

    // Matching value: removed
    assert!(map.remove_if("a", &s("1")).unwrap());
    assert!(matches!(map.get("a"), Err(Error::KeyNotFound)));
    assert!(fixture.read_file().is_empty());

    // Absent key
    assert!(!map.remove_if("a", &s("1")).unwrap());
}

#[test]
fn test_add_overwrites_like_set() {
    let fixture = MapTestFixture::new();
    let map = fixture.open();

    map.add(s("k"), s("first")).unwrap();
    map.add(s("k"), s("second")).unwrap();
    assert_eq!(map.get("k").unwrap(), "second");
    assert_eq!(map.len(), 1);

    map.set(s("k"), s("third")).unwrap();
    assert_eq!(fixture.read_file().get("k"), Some(&s("third")));
}

#[test]
fn test_keys_values_and_snapshot() {
    let fixture = MapTestFixture::new();
    let map = fixture.open();
    map.set(s("a"), s("1")).unwrap();
    map.set(s("b"), s("2")).unwrap();
    map.set(s("c"), s("3")).unwrap();

    let mut keys = map.keys();
    keys.sort();
    assert_eq!(keys, vec![s("a"), s("b"), s("c")]);

    let mut values = map.values();
    values.sort();
    assert_eq!(values, vec![s("1"), s("2"), s("3")]);

    // Snapshots are copies, not live views
    let snapshot = map.snapshot();
    map.clear().unwrap();
    assert_eq!(snapshot.len(), 3);
    assert!(map.keys().is_empty());
    assert!(map.values().is_empty());
}

#[test]
fn test_iteration_is_restartable() {
    let fixture = MapTestFixture::new();
    let map = fixture.open();
    map.set(s("a"), s("1")).unwrap();

    assert_eq!(map.iter().count(), 1);
    map.set(s("b"), s("2")).unwrap();
    assert_eq!(map.iter().count(), 2);

    let mut pairs: Vec<(String, String)> = (&map).into_iter().collect();
    pairs.sort();
    assert_eq!(pairs, vec![(s("a"), s("1")), (s("b"), s("2"))]);
}

#[test]
fn test_borrowed_lookups() {
    let fixture = MapTestFixture::new();
    let map = fixture.open();
    map.set(s("key"), s("value")).unwrap();

    let owned = s("key");
    assert!(map.contains_key(&owned));
    assert!(map.contains_key("key"));
    assert!(map.contains("key", &s("value")));
    assert_eq!(map.get(owned.as_str()).unwrap(), "value");
}
