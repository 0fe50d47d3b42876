#![no_main]

use libfuzzer_sys::fuzz_target;
use persistmap::{BincodeCodec, Checksummed, Codec, JsonCodec};
use std::collections::HashMap;

type Entries = HashMap<String, Vec<u8>>;

fuzz_target!(|data: &[u8]| {
    // Decoders must reject garbage with an error, never panic
    let _: persistmap::Result<Entries> = JsonCodec::new().decode(data);
    let _: persistmap::Result<Entries> = BincodeCodec::new().decode(data);
    let _: persistmap::Result<Entries> = Checksummed::new(BincodeCodec::new()).decode(data);

    // Whatever does decode must survive a round trip
    if let Ok(entries) = Codec::<String, Vec<u8>>::decode(&BincodeCodec::new(), data) {
        let codec = Checksummed::new(BincodeCodec::new());
        let encoded = codec.encode(&entries).expect("re-encode failed");
        let decoded: Entries = codec.decode(&encoded).expect("round trip failed");
        assert_eq!(decoded, entries);
    }
});
