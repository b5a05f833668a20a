#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let result = slugline::extract::extract(s);
        let line_count = s.split('\n').count();

        for scene in &result.scenes {
            assert!(scene.start_line <= scene.end_line);
            assert!(scene.end_line <= line_count);
            for name in &scene.characters {
                assert!(result.character(name).is_some(), "{name} not in characters");
            }
        }

        if !result.scenes.is_empty() {
            assert!(slugline::extract::should_auto_import(s));
        }
    }
});
