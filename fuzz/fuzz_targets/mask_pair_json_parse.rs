//! Fuzz target for mask-pair JSON parsing.
//!
//! Inputs that parse are scored too, so the mask kernel and Hausdorff search
//! see arbitrary shapes, including empty and mismatched grids.

#![no_main]

use iouscore::fuzz::fuzz_score_mask_pair_json;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Hausdorff is quadratic in on cells.
    if data.len() > 64 * 1024 {
        return;
    }

    let _ = fuzz_score_mask_pair_json(data);
});
