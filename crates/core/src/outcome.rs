use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::platform::Platform;

/// Uniform result of a publish attempt on any platform.
///
/// Exactly one of `post_id` / `error` is present, and `success` is `true`
/// iff `post_id` is present. The fields are private so the only way to build
/// an outcome is through [`PublishOutcome::published`] or
/// [`PublishOutcome::failed`]; deserialization re-checks the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome", rename_all = "camelCase")]
pub struct PublishOutcome {
    success: bool,
    platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PublishOutcome {
    /// A successful publish carrying the upstream post (or publish job) id.
    #[must_use]
    pub fn published(platform: Platform, post_id: impl Into<String>) -> Self {
        Self {
            success: true,
            platform,
            post_id: Some(post_id.into()),
            error: None,
        }
    }

    /// A failed publish carrying a human-readable diagnostic.
    #[must_use]
    pub fn failed(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            success: false,
            platform,
            post_id: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutcome {
    success: bool,
    platform: Platform,
    post_id: Option<String>,
    error: Option<String>,
}

impl TryFrom<RawOutcome> for PublishOutcome {
    type Error = CoreError;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        match (raw.success, raw.post_id, raw.error) {
            (true, Some(id), None) => Ok(Self::published(raw.platform, id)),
            (false, None, Some(err)) => Ok(Self::failed(raw.platform, err)),
            _ => Err(CoreError::InvalidOutcome(
                "exactly one of postId or error must be set, matching success".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_sets_only_post_id() {
        let outcome = PublishOutcome::published(Platform::Facebook, "123");
        assert!(outcome.is_success());
        assert_eq!(outcome.post_id(), Some("123"));
        assert!(outcome.error().is_none());
        assert_eq!(outcome.platform(), Platform::Facebook);
    }

    #[test]
    fn failed_sets_only_error() {
        let outcome = PublishOutcome::failed(Platform::Tiktok, "Token no configurado");
        assert!(!outcome.is_success());
        assert!(outcome.post_id().is_none());
        assert_eq!(outcome.error(), Some("Token no configurado"));
    }

    #[test]
    fn serializes_with_camel_case_and_omits_absent_side() {
        let json = serde_json::to_value(PublishOutcome::published(Platform::Linkedin, "urn:1"))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "platform": "linkedin", "postId": "urn:1"})
        );
    }

    #[test]
    fn deserialize_rejects_both_sides_set() {
        let json = r#"{"success":true,"platform":"facebook","postId":"1","error":"boom"}"#;
        assert!(serde_json::from_str::<PublishOutcome>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_success_without_id() {
        let json = r#"{"success":true,"platform":"facebook"}"#;
        assert!(serde_json::from_str::<PublishOutcome>(json).is_err());
    }

    #[test]
    fn deserialize_accepts_failure() {
        let json = r#"{"success":false,"platform":"instagram","error":"Error en paso 1"}"#;
        let outcome: PublishOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(outcome, PublishOutcome::failed(Platform::Instagram, "Error en paso 1"));
    }
}
