use crier_core::MediaKind;
use serde::{Deserialize, Serialize};

/// `GET /userinfo` (OpenID Connect) response.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub sub: String,
}

impl UserInfo {
    /// URN of the member, used as post author and asset owner.
    pub fn person_urn(&self) -> String {
        format!("urn:li:person:{}", self.sub)
    }
}

/// Digital media recipe for an asset of the given kind.
pub fn recipe_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "urn:li:digitalmediaRecipe:feedshare-image",
        MediaKind::Video => "urn:li:digitalmediaRecipe:feedshare-video",
    }
}

/// `shareMediaCategory` for a media kind.
pub fn category_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "IMAGE",
        MediaKind::Video => "VIDEO",
    }
}

/// Body of `POST /assets?action=registerUpload`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUploadRequest {
    pub register_upload_request: RegisterUpload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUpload {
    pub recipes: Vec<&'static str>,
    pub owner: String,
    pub service_relationships: Vec<ServiceRelationship>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRelationship {
    pub relationship_type: &'static str,
    pub identifier: &'static str,
}

impl RegisterUploadRequest {
    pub fn new(owner: String, kind: MediaKind) -> Self {
        Self {
            register_upload_request: RegisterUpload {
                recipes: vec![recipe_for(kind)],
                owner,
                service_relationships: vec![ServiceRelationship {
                    relationship_type: "OWNER",
                    identifier: "urn:li:userGeneratedContent",
                }],
            },
        }
    }
}

/// `registerUpload` response.
#[derive(Debug, Deserialize)]
pub struct RegisterUploadResponse {
    pub value: RegisteredAsset,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAsset {
    pub asset: String,
    pub upload_mechanism: UploadMechanism,
}

#[derive(Debug, Deserialize)]
pub struct UploadMechanism {
    #[serde(rename = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest")]
    pub http_request: UploadHttpRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadHttpRequest {
    pub upload_url: String,
}

/// Body of `POST /ugcPosts`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcPost {
    pub author: String,
    pub lifecycle_state: &'static str,
    pub specific_content: SpecificContent,
    pub visibility: Visibility,
}

#[derive(Debug, Serialize)]
pub struct SpecificContent {
    #[serde(rename = "com.linkedin.ugc.ShareContent")]
    pub share_content: ShareContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub share_commentary: Text,
    pub share_media_category: &'static str,
    pub media: Vec<ShareMedia>,
}

#[derive(Debug, Serialize)]
pub struct ShareMedia {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Text>,
    pub media: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Text>,
}

#[derive(Debug, Serialize)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct Visibility {
    #[serde(rename = "com.linkedin.ugc.MemberNetworkVisibility")]
    pub member_network: String,
}

/// `POST /ugcPosts` response.
#[derive(Debug, Default, Deserialize)]
pub struct UgcPostResponse {
    pub id: Option<String>,
}
