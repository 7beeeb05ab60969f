// src/render/truncate.rs
// Caps text at a number of characters (not bytes), marking the cut with "...".

const MARKER: &str = "...";
const MARKER_LEN: usize = 3;

pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    // Too short to fit the marker at all: hard cut
    if max_length < MARKER_LEN {
        return text.chars().take(max_length).collect();
    }

    let mut truncated: String = text.chars().take(max_length - MARKER_LEN).collect();
    truncated.push_str(MARKER);
    truncated
}

// Like truncate_text(), for text that already holds HTML entities
//
// A cut never leaves half an entity ("&am") behind; the partial entity is
// dropped together with the rest of the tail. Short limits yield "".
pub fn truncate_markup(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length < MARKER_LEN {
        return String::new();
    }

    let mut truncated: String = text.chars().take(max_length - MARKER_LEN).collect();
    if let Some(amp) = truncated.rfind('&') {
        if !truncated[amp..].contains(';') {
            truncated.truncate(amp);
        }
    }
    truncated.push_str(MARKER);
    truncated
}
