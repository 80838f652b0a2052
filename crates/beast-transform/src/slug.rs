//! URL-safe slugs.

/// Lower-case, transliterated, dash-separated form of `text`.
///
/// Non-ASCII characters are spelled in ASCII first, so Greek, Cyrillic and
/// CJK names keep a readable slug. Every run of characters that is not an
/// ASCII letter or digit becomes a single `-`. The result never starts or
/// ends with `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        let spelled = if ch.is_ascii() {
            None
        } else {
            deunicode::deunicode_char(ch)
        };
        let mut push = |c: char| {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        };
        match spelled {
            Some(ascii) => ascii.chars().for_each(&mut push),
            None => push(ch),
        }
    }
    slug
}
