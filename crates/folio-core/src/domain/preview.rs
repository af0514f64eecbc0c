//! Plain-text previews of post content.

use std::sync::LazyLock;

use regex::Regex;

/// Preview length used by the blog archive cards.
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

/// Marker appended when a preview is cut short.
const ELLIPSIS: char = '…';

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup, collapse whitespace and truncate to `max_chars` characters.
///
/// Text that fits is returned as is; longer text is cut at `max_chars`
/// characters and gets a trailing `…`.
pub fn content_preview(html: &str, max_chars: usize) -> String {
    let stripped = TAG.replace_all(html, "");
    let text = WHITESPACE.replace_all(&stripped, " ");
    let text = text.trim();

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut preview = text[..cut].to_string();
            preview.push(ELLIPSIS);
            preview
        }
        None => text.to_string(),
    }
}
