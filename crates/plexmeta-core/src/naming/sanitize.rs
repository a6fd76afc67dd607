//! Filesystem-safe folder names.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Makes a candidate folder name safe to create on Linux while keeping it
/// readable (spaces survive, Kometa matches folders by title).
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Collapses runs of `_` and runs of spaces
/// - Trims leading/trailing spaces, dots and underscores
/// - Limits length to 255 bytes
pub fn sanitize_folder_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev: Option<char> = None;

    for c in name.chars() {
        let c = if c.is_whitespace() {
            ' '
        } else if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else {
            c
        };
        if (c == '_' || c == ' ') && prev == Some(c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].trim_end().to_string()
    } else {
        trimmed.to_string()
    }
}
