//! Fuzz target for VCF line parsing
//!
//! Data lines come from untrusted files; the parser must reject malformed
//! input with an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 4096 {
            return;
        }

        let _ = ferro_filter::cli::parse_vcf_line(input);
    }
});
