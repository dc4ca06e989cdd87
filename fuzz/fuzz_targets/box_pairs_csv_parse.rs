//! Fuzz target for box-pair CSV parsing and batch scoring.

#![no_main]

use iouscore::fuzz::fuzz_score_box_pairs_csv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = fuzz_score_box_pairs_csv(data);
});
