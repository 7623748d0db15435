#![no_main]

use libfuzzer_sys::fuzz_target;
use pepvar::dedup::{deduplicate, DuplicatePolicy};
use pepvar::loader::{load_bytes, LoadOptions};

fuzz_target!(|data: &[u8]| {
    // Loading arbitrary bytes must either succeed or fail with an error, never panic
    let options = LoadOptions::default();
    if let Ok(mut loaded) = load_bytes("fuzz", data, &options) {
        // Every row must be as wide as the header
        let width = loaded.table.columns().len();
        assert!(loaded.table.rows().iter().all(|row| row.len() == width));

        let before = loaded.table.len();
        let outcome = deduplicate(&mut loaded.table, DuplicatePolicy::KeepFirst);
        assert_eq!(loaded.table.len() + outcome.removed, before);
    }
});
