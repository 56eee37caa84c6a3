//! Handle canonicalization.
//!
//! Creators are entered with whatever was pasted into the CRM: `@name`, a
//! bare username, or a full profile URL. Providers want the bare
//! username/channel id, so everything funnels through here first.

use url::Url;

use crate::models::Platform;

/// Extract the bare username (or channel id) from a raw handle value.
///
/// Returns `None` only for blank input; unrecognized URL shapes fall back to
/// treating the input as a bare username.
#[must_use]
pub fn canonical_handle(platform: Platform, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(from_url) = handle_from_url(platform, trimmed) {
        return Some(from_url);
    }

    Some(trimmed.trim_start_matches('@').to_string())
}

/// Extract an Instagram post shortcode from a post URL
/// (`instagram.com/p/<code>`, `/reel/<code>`, `/tv/<code>`).
#[must_use]
pub fn instagram_shortcode(post_url: &str) -> Option<String> {
    let segments = url_path_segments(post_url, "instagram.com")?;
    match segments.as_slice() {
        [kind, code, ..] if matches!(kind.as_str(), "p" | "reel" | "tv") => Some(code.clone()),
        _ => None,
    }
}

fn handle_from_url(platform: Platform, raw: &str) -> Option<String> {
    let hosts: &[&str] = match platform {
        Platform::Instagram => &["instagram.com"],
        Platform::Youtube => &["youtube.com"],
        Platform::Tiktok => &["tiktok.com"],
        // x.com profile URLs carry the same path shape as twitter.com
        Platform::Twitter => &["twitter.com", "x.com"],
    };

    let segments = hosts
        .iter()
        .find_map(|host| url_path_segments(raw, host))?;

    match platform {
        Platform::Instagram | Platform::Twitter => segments.first().cloned(),
        Platform::Tiktok => segments
            .first()
            .map(|s| s.trim_start_matches('@').to_string()),
        Platform::Youtube => match segments.as_slice() {
            [kind, id, ..] if matches!(kind.as_str(), "channel" | "user" | "c") => {
                Some(id.clone())
            }
            [handle, ..] if handle.starts_with('@') => Some(handle.clone()),
            _ => None,
        },
    }
}

fn url_path_segments(raw: &str, host_suffix: &str) -> Option<Vec<String>> {
    let parsed = Url::parse(raw)
        .or_else(|_| Url::parse(&format!("https://{raw}")))
        .ok()?;
    let host = parsed.host_str()?;
    if host != host_suffix && !host.ends_with(&format!(".{host_suffix}")) {
        return None;
    }
    // A bare username parses as a host with no path; require a real path
    let segments: Vec<String> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_at_handles() {
        assert_eq!(
            canonical_handle(Platform::Instagram, "natgeo"),
            Some("natgeo".to_string())
        );
        assert_eq!(
            canonical_handle(Platform::Instagram, "@natgeo"),
            Some("natgeo".to_string())
        );
        assert_eq!(canonical_handle(Platform::Instagram, "   "), None);
    }

    #[test]
    fn test_instagram_profile_url() {
        assert_eq!(
            canonical_handle(Platform::Instagram, "https://www.instagram.com/natgeo/"),
            Some("natgeo".to_string())
        );
        assert_eq!(
            canonical_handle(Platform::Instagram, "instagram.com/natgeo?hl=en"),
            Some("natgeo".to_string())
        );
    }

    #[test]
    fn test_tiktok_profile_url() {
        assert_eq!(
            canonical_handle(Platform::Tiktok, "https://www.tiktok.com/@charlidamelio"),
            Some("charlidamelio".to_string())
        );
    }

    #[test]
    fn test_twitter_profile_urls() {
        assert_eq!(
            canonical_handle(Platform::Twitter, "https://twitter.com/nasa"),
            Some("nasa".to_string())
        );
        assert_eq!(
            canonical_handle(Platform::Twitter, "https://x.com/nasa"),
            Some("nasa".to_string())
        );
    }

    #[test]
    fn test_youtube_url_shapes() {
        assert_eq!(
            canonical_handle(Platform::Youtube, "https://youtube.com/channel/UCabc123"),
            Some("UCabc123".to_string())
        );
        assert_eq!(
            canonical_handle(Platform::Youtube, "https://youtube.com/user/someuser"),
            Some("someuser".to_string())
        );
        assert_eq!(
            canonical_handle(Platform::Youtube, "https://www.youtube.com/@somehandle"),
            Some("@somehandle".to_string())
        );
    }

    #[test]
    fn test_instagram_shortcode_extraction() {
        assert_eq!(
            instagram_shortcode("https://www.instagram.com/p/Cxyz123/"),
            Some("Cxyz123".to_string())
        );
        assert_eq!(
            instagram_shortcode("https://instagram.com/reel/AbC9/?igsh=1"),
            Some("AbC9".to_string())
        );
        assert_eq!(instagram_shortcode("https://instagram.com/natgeo"), None);
        assert_eq!(instagram_shortcode(""), None);
    }
}
