use crate::error::UploadError;

/// Default payload ceiling: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Default content-type allow-list.
pub const DEFAULT_ALLOWED_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Upload validation policy: content-type allow-list plus size ceiling.
///
/// The policy is pure and synchronous. It decides accept/reject before any
/// byte is written; a rejection has no side effects.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_types: Vec<String>,
    max_bytes: u64,
}

impl UploadPolicy {
    /// Create a policy from an explicit allow-list and size ceiling.
    pub fn new(allowed_types: Vec<String>, max_bytes: u64) -> Self {
        Self {
            allowed_types,
            max_bytes,
        }
    }

    /// The configured size ceiling in bytes.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Check a declared content type against the allow-list.
    ///
    /// The comparison ignores any `; charset=...` style parameters and is
    /// case-insensitive, per MIME type matching rules.
    pub fn check_content_type(&self, content_type: &str) -> Result<(), UploadError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if self.allowed_types.iter().any(|t| t == &essence) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedContentType(
                content_type.to_owned(),
            ))
        }
    }

    /// Check a payload size against the ceiling.
    pub fn check_size(&self, size: u64) -> Result<(), UploadError> {
        if size <= self.max_bytes {
            Ok(())
        } else {
            Err(UploadError::PayloadTooLarge {
                size,
                limit: self.max_bytes,
            })
        }
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(ToString::to_string).collect(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_accepts_all_image_types() {
        let policy = UploadPolicy::default();
        for ct in DEFAULT_ALLOWED_TYPES {
            assert!(policy.check_content_type(ct).is_ok(), "{ct} should pass");
        }
    }

    #[test]
    fn rejects_non_image_types() {
        let policy = UploadPolicy::default();
        for ct in ["text/plain", "application/pdf", "image/svg+xml", "video/mp4"] {
            let err = policy.check_content_type(ct).unwrap_err();
            assert!(matches!(err, UploadError::UnsupportedContentType(_)));
        }
    }

    #[test]
    fn content_type_matching_ignores_parameters_and_case() {
        let policy = UploadPolicy::default();
        assert!(policy.check_content_type("image/png; charset=binary").is_ok());
        assert!(policy.check_content_type("IMAGE/JPEG").is_ok());
    }

    #[test]
    fn size_at_ceiling_passes_and_over_fails() {
        let policy = UploadPolicy::new(vec!["image/png".into()], 1024);
        assert!(policy.check_size(1024).is_ok());

        let err = policy.check_size(1025).unwrap_err();
        assert_eq!(
            err,
            UploadError::PayloadTooLarge {
                size: 1025,
                limit: 1024
            }
        );
    }

    #[test]
    fn default_ceiling_is_five_mebibytes() {
        let policy = UploadPolicy::default();
        assert!(policy.check_size(5 * 1024 * 1024).is_ok());
        assert!(policy.check_size(6 * 1024 * 1024).is_err());
    }
}
