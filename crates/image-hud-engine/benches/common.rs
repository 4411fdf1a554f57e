// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_note_with_images(sections: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        content.push_str("Some paragraph text with a [[wiki link]] and a [web link](https://example.com).\n");
        content.push_str(&format!("![[assets/img{}.png|300]] caption\n", section % 10));
        content.push_str(&format!("![diagram](assets/img{}.png)\n", section % 10));
        content.push_str("![[missing.png]] and ![broken](nope.txt)\n\n");
    }
    content
}

#[allow(dead_code)]
pub const IMAGE_COUNT: usize = 10;
