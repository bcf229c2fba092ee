/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::sync::atomic::{AtomicU8, Ordering};

const UNPROBED: u8 = 0;
const SCALAR: u8 = 1;
const ACCELERATED: u8 = 2;

static CPU_STATE: AtomicU8 = AtomicU8::new(UNPROBED);

/// Return true if the accelerated checksum routines can run on this cpu
///
/// The cpu is probed on the first call and the answer is cached,
/// concurrent first calls all compute the same value so the race is benign.
pub fn cpu_supports_fast_path() -> bool {
    match CPU_STATE.load(Ordering::Relaxed) {
        SCALAR => false,
        ACCELERATED => true,
        _ => {
            let supported = probe();
            let state = if supported { ACCELERATED } else { SCALAR };
            CPU_STATE.store(state, Ordering::Relaxed);
            supported
        }
    }
}

#[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
fn probe() -> bool {
    is_x86_feature_detected!("pclmulqdq") && is_x86_feature_detected!("sse4.1")
}

#[cfg(all(not(feature = "std"), any(target_arch = "x86", target_arch = "x86_64")))]
fn probe() -> bool {
    cfg!(all(target_feature = "pclmulqdq", target_feature = "sse4.1"))
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn probe() -> bool {
    false
}
