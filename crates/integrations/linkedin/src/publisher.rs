use crier_core::limits::LINKEDIN_COMMENTARY;
use crier_core::{MediaKind, MediaRequirement, Platform, StagedMedia, mime, truncate_chars};
use crier_publisher::http::{DEFAULT_TIMEOUT, JsonResponse, build_client, transfer_timeout};
use crier_publisher::{PublishError, Publisher};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument};

use crate::config::LinkedinConfig;
use crate::error::LinkedinError;
use crate::types::{
    RegisterUploadRequest, RegisterUploadResponse, ShareContent, ShareMedia, SpecificContent,
    Text, UgcPost, UgcPostResponse, UserInfo, Visibility, category_for,
};

const RESTLI_HEADER: &str = "X-Restli-Protocol-Version";
const RESTLI_VERSION: &str = "2.0.0";

/// Asset registered for upload.
#[derive(Debug)]
struct RegisteredUpload {
    asset: String,
    upload_url: String,
}

/// Publishes an image post to a LinkedIn member feed.
///
/// The four protocol steps run strictly in order; a failing step ends the
/// attempt and its error becomes the outcome.
pub struct LinkedinPublisher {
    config: LinkedinConfig,
    client: Client,
}

impl LinkedinPublisher {
    pub fn new(config: LinkedinConfig) -> Self {
        Self::with_client(config, build_client(DEFAULT_TIMEOUT))
    }

    pub fn with_client(config: LinkedinConfig, client: Client) -> Self {
        Self { config, client }
    }

    async fn user_info(&self, token: &str) -> Result<UserInfo, PublishError> {
        debug!("step 1/4: resolving member");
        let response = self
            .client
            .get(self.config.endpoint("userinfo"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        if !response.is_success() {
            return Err(response.into_error("No se pudo obtener la información del usuario"));
        }
        serde_json::from_value(response.body).map_err(|e| {
            LinkedinError::UnexpectedBody {
                step: "userinfo",
                detail: e.to_string(),
            }
            .into()
        })
    }

    async fn register_upload(
        &self,
        token: &str,
        owner: String,
        kind: MediaKind,
    ) -> Result<RegisteredUpload, PublishError> {
        debug!(%owner, "step 2/4: registering upload");
        let response = self
            .client
            .post(self.config.endpoint("assets?action=registerUpload"))
            .bearer_auth(token)
            .header(RESTLI_HEADER, RESTLI_VERSION)
            .json(&RegisterUploadRequest::new(owner, kind))
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        if !response.is_success() {
            return Err(response.into_error("No se pudo registrar la imagen"));
        }

        let body: RegisterUploadResponse =
            serde_json::from_value(response.body).map_err(|e| LinkedinError::UnexpectedBody {
                step: "registerUpload",
                detail: e.to_string(),
            })?;
        Ok(RegisteredUpload {
            asset: body.value.asset,
            upload_url: body.value.upload_mechanism.http_request.upload_url,
        })
    }

    async fn upload_media(
        &self,
        token: &str,
        media_url: &str,
        upload_url: &str,
    ) -> Result<(), PublishError> {
        debug!("step 3/4: transferring media bytes");
        let download = self.client.get(media_url).send().await?;
        let status = download.status();
        if !status.is_success() {
            return Err(PublishError::Api(format!(
                "No se pudo descargar la imagen: {status}"
            )));
        }
        let content_type = download
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .or_else(|| mime::content_type_for(media_path(media_url)).map(str::to_owned))
            .unwrap_or_else(|| mime::OCTET_STREAM.to_owned());
        let bytes = download.bytes().await?;
        debug!(size = bytes.len(), %content_type, "media downloaded");

        let response = self
            .client
            .put(upload_url)
            .timeout(transfer_timeout(bytes.len() as u64))
            .bearer_auth(token)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        if !response.status().is_success() {
            let response = JsonResponse::read(response).await?;
            return Err(response.into_error("No se pudo subir la imagen"));
        }
        Ok(())
    }

    async fn create_post(
        &self,
        token: &str,
        author: String,
        caption: &str,
        asset: String,
        kind: MediaKind,
    ) -> Result<String, PublishError> {
        debug!(%asset, "step 4/4: creating post");
        let post = UgcPost {
            author,
            lifecycle_state: "PUBLISHED",
            specific_content: SpecificContent {
                share_content: ShareContent {
                    share_commentary: Text::new(truncate_chars(caption, LINKEDIN_COMMENTARY)),
                    share_media_category: category_for(kind),
                    media: vec![ShareMedia {
                        status: "READY",
                        description: self.config.media_description.as_deref().map(Text::new),
                        media: asset,
                        title: self.config.media_title.as_deref().map(Text::new),
                    }],
                },
            },
            visibility: Visibility {
                member_network: self.config.visibility.clone(),
            },
        };

        let response = self
            .client
            .post(self.config.endpoint("ugcPosts"))
            .bearer_auth(token)
            .header(RESTLI_HEADER, RESTLI_VERSION)
            .json(&post)
            .send()
            .await?;
        let response = JsonResponse::read(response).await?;
        if !response.is_success() {
            return Err(response.into_error("No se pudo crear el post"));
        }

        let header_id = response
            .headers
            .get("x-restli-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body: UgcPostResponse = serde_json::from_value(response.body).unwrap_or_default();
        Ok(body
            .id
            .filter(|id| !id.is_empty())
            .or(header_id)
            .ok_or(LinkedinError::MissingPostId)?)
    }
}

/// Path part of a URL, for extension lookup.
fn media_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

impl Publisher for LinkedinPublisher {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn media_requirement(&self) -> MediaRequirement {
        MediaRequirement::PublicUrl
    }

    #[instrument(skip(self, caption, media), fields(platform = "linkedin"))]
    async fn try_publish(&self, caption: &str, media: &StagedMedia) -> Result<String, PublishError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(LinkedinError::MissingToken)?;
        let media_url = media.location.as_url().ok_or(LinkedinError::NotAUrl)?;

        let author = self.user_info(token).await?.person_urn();
        let upload = self
            .register_upload(token, author.clone(), media.kind)
            .await?;
        info!(asset = %upload.asset, "asset registered");
        self.upload_media(token, media_url, &upload.upload_url)
            .await?;
        self.create_post(token, author, caption, upload.asset, media.kind)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crier_core::PublishOutcome;
    use crier_publisher::DynPublisher;
    use crier_test_support::{MockHttpServer, MockResponse};
    use serde_json::json;

    use super::*;

    fn publisher(server: &MockHttpServer) -> LinkedinPublisher {
        LinkedinPublisher::new(
            LinkedinConfig::new()
                .with_access_token("li-token")
                .with_api_url(server.url("/v2")),
        )
    }

    fn register_body(server: &MockHttpServer) -> String {
        json!({
            "value": {
                "asset": "urn:li:digitalmediaAsset:C5",
                "uploadMechanism": {
                    "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest": {
                        "uploadUrl": server.url("/mediaUpload/C5")
                    }
                }
            }
        })
        .to_string()
    }

    fn image(server: &MockHttpServer) -> StagedMedia {
        StagedMedia::url(MediaKind::Image, server.url("/img/x.png"))
    }

    #[tokio::test]
    async fn four_steps_in_order() {
        let server = MockHttpServer::start(vec![]).await;
        server.enqueue(MockResponse::json(200, r#"{"sub":"abc"}"#));
        server.enqueue(MockResponse::json(200, &register_body(&server)));
        server.enqueue(MockResponse::bytes(200, "image/png", b"PNGDATA"));
        server.enqueue(MockResponse::text(201, ""));
        server.enqueue(MockResponse::json(201, r#"{"id":"urn:li:share:1"}"#));

        let outcome =
            DynPublisher::publish(&publisher(&server), "Hola LinkedIn", &image(&server)).await;

        assert_eq!(
            outcome,
            PublishOutcome::published(Platform::Linkedin, "urn:li:share:1")
        );
        let requests = server.requests();
        let calls: Vec<(&str, &str)> = requests
            .iter()
            .map(|r| (r.method.as_str(), r.path.as_str()))
            .collect();
        assert_eq!(
            calls,
            vec![
                ("GET", "/v2/userinfo"),
                ("POST", "/v2/assets?action=registerUpload"),
                ("GET", "/img/x.png"),
                ("PUT", "/mediaUpload/C5"),
                ("POST", "/v2/ugcPosts"),
            ]
        );

        assert_eq!(requests[0].header("authorization"), Some("Bearer li-token"));
        assert_eq!(
            requests[1].header("x-restli-protocol-version"),
            Some("2.0.0")
        );
        assert_eq!(
            requests[1].json()["registerUploadRequest"]["owner"],
            "urn:li:person:abc"
        );
        assert_eq!(requests[3].body, b"PNGDATA");
        assert_eq!(requests[3].header("content-type"), Some("image/png"));
        assert_eq!(requests[3].header("authorization"), Some("Bearer li-token"));

        let post = requests[4].json();
        assert_eq!(post["author"], "urn:li:person:abc");
        assert_eq!(post["lifecycleState"], "PUBLISHED");
        let share = &post["specificContent"]["com.linkedin.ugc.ShareContent"];
        assert_eq!(share["shareCommentary"]["text"], "Hola LinkedIn");
        assert_eq!(share["shareMediaCategory"], "IMAGE");
        assert_eq!(share["media"][0]["media"], "urn:li:digitalmediaAsset:C5");
        assert_eq!(
            post["visibility"]["com.linkedin.ugc.MemberNetworkVisibility"],
            "PUBLIC"
        );
    }

    #[tokio::test]
    async fn unauthorized_userinfo_stops_everything() {
        let server = MockHttpServer::start(vec![MockResponse::json(
            401,
            r#"{"serviceErrorCode":65600,"message":"Invalid access token","status":401}"#,
        )])
        .await;

        let outcome = DynPublisher::publish(&publisher(&server), "c", &image(&server)).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.platform(), Platform::Linkedin);
        assert!(outcome.error().unwrap().to_lowercase().contains("token"));
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn register_failure_skips_upload_and_post() {
        let server = MockHttpServer::start(vec![
            MockResponse::json(200, r#"{"sub":"abc"}"#),
            MockResponse::json(500, ""),
        ])
        .await;

        let outcome = DynPublisher::publish(&publisher(&server), "c", &image(&server)).await;

        assert_eq!(outcome.error(), Some("No se pudo registrar la imagen"));
        assert_eq!(server.hits(), 2);
    }

    #[tokio::test]
    async fn upload_failure_skips_post() {
        let server = MockHttpServer::start(vec![]).await;
        server.enqueue(MockResponse::json(200, r#"{"sub":"abc"}"#));
        server.enqueue(MockResponse::json(200, &register_body(&server)));
        server.enqueue(MockResponse::bytes(200, "image/png", b"PNG"));
        server.enqueue(MockResponse::text(400, ""));

        let outcome = DynPublisher::publish(&publisher(&server), "c", &image(&server)).await;

        assert_eq!(outcome.error(), Some("No se pudo subir la imagen"));
        assert_eq!(server.hits(), 4);
    }

    #[tokio::test]
    async fn unreachable_image_skips_put() {
        let server = MockHttpServer::start(vec![]).await;
        server.enqueue(MockResponse::json(200, r#"{"sub":"abc"}"#));
        server.enqueue(MockResponse::json(200, &register_body(&server)));
        server.enqueue(MockResponse::text(404, "gone"));

        let outcome = DynPublisher::publish(&publisher(&server), "c", &image(&server)).await;

        assert!(outcome.error().unwrap().starts_with("No se pudo descargar la imagen"));
        assert_eq!(server.hits(), 3);
    }

    #[tokio::test]
    async fn post_id_from_restli_header() {
        let server = MockHttpServer::start(vec![]).await;
        server.enqueue(MockResponse::json(200, r#"{"sub":"abc"}"#));
        server.enqueue(MockResponse::json(200, &register_body(&server)));
        server.enqueue(MockResponse::bytes(200, "application/octet-stream", b"JPG"));
        server.enqueue(MockResponse::text(201, ""));
        server.enqueue(
            MockResponse::text(201, "").with_header("x-restli-id", "urn:li:share:77"),
        );

        let media = StagedMedia::url(MediaKind::Image, server.url("/img/photo.jpg?v=2"));
        let post_id = publisher(&server).try_publish("c", &media).await.unwrap();

        assert_eq!(post_id, "urn:li:share:77");
        assert_eq!(
            server.requests()[3].header("content-type"),
            Some("application/octet-stream")
        );
    }

    #[tokio::test]
    async fn missing_token_fails_without_network() {
        let server = MockHttpServer::start(vec![]).await;
        let publisher =
            LinkedinPublisher::new(LinkedinConfig::new().with_api_url(server.url("/v2")));

        let outcome = DynPublisher::publish(&publisher, "c", &image(&server)).await;

        assert_eq!(
            outcome,
            PublishOutcome::failed(Platform::Linkedin, "Token no configurado")
        );
        assert_eq!(server.hits(), 0);
    }

    #[test]
    fn media_path_strips_query() {
        assert_eq!(media_path("https://x/a.png?sig=1"), "https://x/a.png");
        assert_eq!(media_path("https://x/a.png"), "https://x/a.png");
    }
}
