//! Lyrics and artwork provider hooks
//!
//! Required by the host plugin contract; this plugin provides neither, so
//! every call reports "not available".

/// Provider names offered for lyrics/artwork lookup (none)
pub fn provider_names() -> Option<Vec<String>> {
    None
}

/// Lyrics lookup; always unavailable
pub fn retrieve_lyrics(
    _source_url: &str,
    _artist: &str,
    _title: &str,
    _album: &str,
    _synchronised_preferred: bool,
    _provider: &str,
) -> Option<String> {
    None
}

/// Artwork lookup (base64 image data); always unavailable
pub fn retrieve_artwork(
    _source_url: &str,
    _album_artist: &str,
    _album: &str,
    _provider: &str,
) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_always_report_not_available() {
        assert!(provider_names().is_none());
        assert!(retrieve_lyrics("url", "artist", "title", "album", false, "any").is_none());
        assert!(retrieve_artwork("url", "artist", "album", "any").is_none());
    }
}
