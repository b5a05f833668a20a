#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    document: String,
    cursor: usize,
}

fuzz_target!(|input: Input| {
    let context = slugline::read::prompt_context(&input.document, input.cursor);
    let heading = slugline::read::current_scene_heading(&input.document, input.cursor);
    assert_eq!(context.scene.heading, heading);
});
