#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let elements = slugline::read::parse(s);
        assert_eq!(elements.len(), s.split('\n').count());

        // Emitting without options reproduces the input exactly
        let emitted = slugline::write::emit(&elements);
        assert_eq!(emitted, s);

        let kinds1: Vec<_> = elements.iter().map(|e| e.kind).collect();
        let kinds2: Vec<_> = slugline::read::parse(&emitted).iter().map(|e| e.kind).collect();
        assert_eq!(kinds1, kinds2, "Element types changed through roundtrip");
    }
});
