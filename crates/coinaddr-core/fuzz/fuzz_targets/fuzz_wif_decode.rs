//! Fuzz test for WIF decoding

#![no_main]

use coinaddr_core::coinaddr_params::network::BUILTIN_NETWORKS;
use coinaddr_core::wif_decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for net in BUILTIN_NETWORKS {
            let _ = wif_decode(net, s);
        }
    }
});
