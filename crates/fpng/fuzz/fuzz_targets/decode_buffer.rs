#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let opts = fpng::fpng_core::options::DecoderOptions::new_fast().set_max_memory_bytes(1 << 26);

    let _ = fpng::get_info(data);
    let _ = fpng::decode_from_bytes_with_options(data, 0, opts);
});
