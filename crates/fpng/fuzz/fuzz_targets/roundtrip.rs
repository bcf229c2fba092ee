#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Some((raw, width, height, channels, flags)) = split_input(data) {
        let encoded = fpng::encode_to_bytes(raw, width, height, channels, flags)
            .expect("Encoding valid input failed");

        let decoded = fpng::decode_from_bytes(&encoded, 0)
            .expect("Failed to decode our own output!");

        assert_eq!(raw, decoded.pixels.as_slice());
    }
});

const METADATA_BYTES: usize = 3;

fn split_input(data: &[u8]) -> Option<(&[u8], u32, u32, u32, u32)> {
    // the first few bytes of the fuzzer input pick
    // the encoding settings
    if data.len() <= METADATA_BYTES {
        return None;
    }
    let height = u32::from(data[0]);
    if height == 0 {
        return None;
    }
    let channels = if data[1] & 1 == 0 { 3 } else { 4 };
    let flags = u32::from(data[2] % 3);

    let data = &data[METADATA_BYTES..];
    let width = data.len() as u32 / height / channels;
    if width == 0 {
        return None;
    }
    let total_bytes = (width * height * channels) as usize;

    Some((&data[..total_bytes], width, height, channels, flags))
}
