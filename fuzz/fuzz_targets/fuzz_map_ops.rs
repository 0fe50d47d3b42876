#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use persistmap::{JsonCodec, MapConfig, PersistentMap, SyncMode};
use std::collections::HashMap;

#[derive(Debug, Arbitrary)]
enum Op {
    Set(u8, u16),
    Remove(u8),
    RemoveIf(u8, u16),
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let path = dir.path().join("map.json");
    let config = MapConfig::new().with_sync_mode(SyncMode::Data);

    let map: PersistentMap<String, u16> =
        PersistentMap::open_with_config(&path, JsonCodec::new(), config.clone()).unwrap();
    let mut model: HashMap<String, u16> = HashMap::new();

    for op in ops.iter().take(64) {
        match op {
            Op::Set(k, v) => {
                map.set(k.to_string(), *v).unwrap();
                model.insert(k.to_string(), *v);
            }
            Op::Remove(k) => {
                let removed = map.remove(k.to_string().as_str()).unwrap();
                assert_eq!(removed, model.remove(&k.to_string()).is_some());
            }
            Op::RemoveIf(k, v) => {
                let removed = map.remove_if(k.to_string().as_str(), v).unwrap();
                let expected = model.get(&k.to_string()) == Some(v);
                if expected {
                    model.remove(&k.to_string());
                }
                assert_eq!(removed, expected);
            }
            Op::Clear => {
                map.clear().unwrap();
                model.clear();
            }
        }
    }

    assert_eq!(map.snapshot(), model);
    drop(map);

    if path.exists() {
        let reopened: PersistentMap<String, u16> =
            PersistentMap::open_with_config(&path, JsonCodec::new(), config).unwrap();
        assert_eq!(reopened.snapshot(), model);
    } else {
        assert!(model.is_empty());
    }
});
