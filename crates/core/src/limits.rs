//! Per-platform text limits.
//!
//! Captions longer than a platform accepts are truncated, never rejected.

/// Facebook photo caption.
pub const FACEBOOK_CAPTION: usize = 63_206;
/// Instagram media container caption.
pub const INSTAGRAM_CAPTION: usize = 2_200;
/// LinkedIn share commentary.
pub const LINKEDIN_COMMENTARY: usize = 3_000;
/// TikTok direct video post title.
pub const TIKTOK_VIDEO_TITLE: usize = 150;
/// TikTok photo post title.
pub const TIKTOK_PHOTO_TITLE: usize = 90;
/// TikTok photo post description.
pub const TIKTOK_DESCRIPTION: usize = 4_000;

/// Truncate `text` to at most `max_chars` characters.
///
/// Counts Unicode scalar values, so multi-byte characters are never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("Hola UAGRM", 150), "Hola UAGRM");
    }

    #[test]
    fn exact_length_is_untouched() {
        assert_eq!(truncate_chars("abcde", 5), "abcde");
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        let text = "a".repeat(200);
        assert_eq!(truncate_chars(&text, TIKTOK_VIDEO_TITLE).len(), 150);
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        let text = "ñandú🎉ñandú";
        assert_eq!(truncate_chars(text, 6), "ñandú🎉");
    }

    #[test]
    fn zero_limit_yields_empty() {
        assert_eq!(truncate_chars("anything", 0), "");
    }
}
