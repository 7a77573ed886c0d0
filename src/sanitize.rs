use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\-&,()\. ]").expect("static pattern compiles")
});

pub fn sanitize(text: &str) -> String {
    UNSAFE_CHARS.replace_all(text, "_").trim().to_string()
}

pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}

pub fn is_safe_char(ch: char) -> bool {
    let mut buf = [0u8; 4];
    !UNSAFE_CHARS.is_match(ch.encode_utf8(&mut buf))
}
