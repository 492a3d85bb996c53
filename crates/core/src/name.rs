use uuid::Uuid;

/// Maximum length of a retained filename extension, excluding the dot.
const MAX_EXTENSION_LEN: usize = 8;

/// Generate a collision-resistant stored name for an uploaded file.
///
/// The name combines a UUID v7 (time-ordered plus random, so concurrent
/// writers need no coordination) with the sanitized extension of the client
/// filename: `img-<uuid><ext>`. The extension is cosmetic — content-type
/// decisions never rely on it.
pub fn stored_name(original_name: &str) -> String {
    match sanitize_extension(original_name) {
        Some(ext) => format!("img-{}.{ext}", Uuid::now_v7()),
        None => format!("img-{}", Uuid::now_v7()),
    }
}

/// Extract a storage-safe extension from a client filename.
///
/// Returns the final dot-separated segment, lowercased, if it is non-empty,
/// purely ASCII-alphanumeric, and at most [`MAX_EXTENSION_LEN`] characters.
/// Anything else (no dot, trailing dot, traversal junk, absurd length) yields
/// `None` and the stored name carries no extension.
pub fn sanitize_extension(original_name: &str) -> Option<String> {
    let (stem, ext) = original_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn keeps_common_image_extensions() {
        assert_eq!(sanitize_extension("photo.png").as_deref(), Some("png"));
        assert_eq!(sanitize_extension("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(sanitize_extension("a.b.webp").as_deref(), Some("webp"));
    }

    #[test]
    fn drops_unusable_extensions() {
        assert_eq!(sanitize_extension("noext"), None);
        assert_eq!(sanitize_extension("trailing."), None);
        assert_eq!(sanitize_extension(".hidden"), None);
        assert_eq!(sanitize_extension("weird.p/ng"), None);
        assert_eq!(sanitize_extension("long.aaaaaaaaa"), None);
    }

    #[test]
    fn stored_name_retains_extension() {
        let name = stored_name("holiday.PNG");
        assert!(name.starts_with("img-"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn stored_name_without_extension_has_no_dot() {
        let name = stored_name("raw-upload");
        assert!(name.starts_with("img-"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn stored_names_are_unique_for_identical_input() {
        let names: HashSet<String> = (0..1000).map(|_| stored_name("same.png")).collect();
        assert_eq!(names.len(), 1000);
    }
}
