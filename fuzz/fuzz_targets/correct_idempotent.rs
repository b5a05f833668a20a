#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let issues = slugline::lint::validate(s).issues;
        let corrected = slugline::lint::correct(s, &issues);
        assert_eq!(corrected.change_count, corrected.applied_fixes.len());

        // Spacing is settled after one pass
        let again = slugline::lint::correct(&corrected.corrected_content, &[]);
        assert!(again.is_unchanged(), "{:?}", corrected.corrected_content);

        let quick = slugline::lint::quick_correct(s).corrected_content;
        assert!(slugline::lint::quick_correct(&quick).is_unchanged());
    }
});
