//! Fuzz test for address decoding
//!
//! Ensures every decode strategy handles malformed input gracefully

#![no_main]

use coinaddr_core::{Address, Network};
use coinaddr_core::coinaddr_params::network::BUILTIN_NETWORKS;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Should never panic, only return Err for invalid input
        for net in BUILTIN_NETWORKS {
            if let Ok(addr) = Address::decode(net, s) {
                // Anything that decodes must re-encode on the same network
                let text = addr.encode().expect("decoded address re-encodes");
                assert_eq!(Address::decode(net, &text).ok(), Some(addr));
            }
        }
        let _ = Network::by_name(s);
    }
});
