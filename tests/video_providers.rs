use ai_lesson_videos::api::deepbrain::DeepBrainClient;
use ai_lesson_videos::api::heygen::HeyGenClient;
use ai_lesson_videos::api::synthesia::SynthesiaClient;
use ai_lesson_videos::config::{DeepBrainSettings, HeyGenSettings, SynthesiaSettings};
use ai_lesson_videos::error::{ErrorKind, PipelineError};
use ai_lesson_videos::script::{Script, ScriptStyle};
use ai_lesson_videos::video::{RenderStatus, VideoProvider};
use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn script() -> Script {
    Script {
        content: "Plants turn light into sugar.".to_string(),
        title: "Plants".to_string(),
        generated_at: Utc::now(),
        estimated_duration_seconds: 3,
        style: ScriptStyle::Standard,
        requested_duration_seconds: 30,
    }
}

fn heygen(server: &MockServer) -> HeyGenClient {
    HeyGenClient::new(
        reqwest::Client::new(),
        HeyGenSettings {
            api_key: "hg-key".to_string(),
            base_url: server.uri(),
            ..HeyGenSettings::default()
        },
    )
}

fn synthesia(server: &MockServer) -> SynthesiaClient {
    SynthesiaClient::new(
        reqwest::Client::new(),
        SynthesiaSettings {
            api_key: "sy-key".to_string(),
            base_url: server.uri(),
            ..SynthesiaSettings::default()
        },
    )
}

fn deepbrain(server: &MockServer) -> DeepBrainClient {
    DeepBrainClient::new(
        reqwest::Client::new(),
        DeepBrainSettings {
            api_key: "db-key".to_string(),
            base_url: server.uri(),
            ..DeepBrainSettings::default()
        },
    )
}

#[tokio::test]
async fn heygen_create_sends_avatar_voice_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .and(header("X-Api-Key", "hg-key"))
        .and(body_partial_json(json!({
            "video_inputs": [ { "voice": { "type": "text", "input_text": "Plants turn light into sugar." } } ],
            "dimension": { "width": 1280, "height": 720 }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "error": null, "data": { "video_id": "vid-123" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let job = heygen(&server).create_video(&script()).await.unwrap();
    assert_eq!(job.id, "vid-123");
    assert_eq!(job.status, RenderStatus::Pending);
}

#[tokio::test]
async fn heygen_create_401_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/video/generate"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid key"}"#))
        .mount(&server)
        .await;

    let err = heygen(&server).create_video(&script()).await.unwrap_err();
    assert!(matches!(err, PipelineError::Provider { status: Some(401), .. }));
    assert_eq!(err.status_code(), 401);
    assert!(err.to_string().contains(r#"{"error":"invalid key"}"#));
}

#[tokio::test]
async fn heygen_envelope_error_fails_create() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": "avatar_not_found", "message": "Avatar not found" },
            "data": null
        })))
        .mount(&server)
        .await;

    let err = heygen(&server).create_video(&script()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert_eq!(err.to_string(), "HeyGen API returned error: Avatar not found");
}

#[tokio::test]
async fn heygen_status_normalizes_and_carries_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/video_status.get"))
        .and(query_param("video_id", "vid-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 100,
            "data": { "id": "vid-123", "status": "Completed", "video_url": "https://cdn.test/v.mp4" }
        })))
        .mount(&server)
        .await;

    let job = heygen(&server).get_status("vid-123").await.unwrap();
    assert_eq!(job.status, RenderStatus::Complete);
    assert_eq!(job.raw_status, "Completed");
    assert_eq!(job.download_url.as_deref(), Some("https://cdn.test/v.mp4"));
}

#[tokio::test]
async fn heygen_failed_status_keeps_error_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/video_status.get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 100,
            "data": { "status": "failed", "error": { "message": "script too long" } }
        })))
        .mount(&server)
        .await;

    let job = heygen(&server).get_status("vid-9").await.unwrap();
    assert_eq!(job.id, "vid-9");
    assert_eq!(job.status, RenderStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("script too long"));
}

#[tokio::test]
async fn download_returns_bytes_and_maps_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/ok.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 1, 2, 3]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/gone.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = heygen(&server);
    let bytes = client
        .download_artifact(&format!("{}/files/ok.mp4", server.uri()))
        .await
        .unwrap();
    assert_eq!(bytes, vec![0u8, 1, 2, 3]);

    let err = client
        .download_artifact(&format!("{}/files/gone.mp4", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert!(err.to_string().starts_with("Failed to download video: 404"));
}

#[tokio::test]
async fn synthesia_create_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .and(header("Authorization", "Bearer sy-key"))
        .and(body_partial_json(json!({
            "title": "Plants",
            "input": [ { "scriptText": "Plants turn light into sugar." } ]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "syn-1", "status": "in_progress" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos/syn-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "syn-1", "status": "complete", "download": "https://cdn.test/s.mp4"
        })))
        .mount(&server)
        .await;

    let client = synthesia(&server);
    let job = client.create_video(&script()).await.unwrap();
    assert_eq!(job.id, "syn-1");
    assert_eq!(job.status, RenderStatus::Processing);

    let job = client.get_status("syn-1").await.unwrap();
    assert_eq!(job.status, RenderStatus::Complete);
    assert_eq!(job.download_url.as_deref(), Some("https://cdn.test/s.mp4"));
}

#[tokio::test]
async fn synthesia_missing_id_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = synthesia(&server).create_video(&script()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyResponse);
}

#[tokio::test]
async fn deepbrain_create_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/simple/video"))
        .and(header("Authorization", "db-key"))
        .and(body_partial_json(json!({ "language": "en", "text": "Plants turn light into sugar." })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "key": "proj-7" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simple/video/proj-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "proj-7", "status": "queued"
        })))
        .mount(&server)
        .await;

    let client = deepbrain(&server);
    let job = client.create_video(&script()).await.unwrap();
    assert_eq!(job.id, "proj-7");

    let job = client.get_status("proj-7").await.unwrap();
    assert_eq!(job.status, RenderStatus::Pending);
    assert_eq!(job.download_url, None);
}

#[tokio::test]
async fn deepbrain_unsuccessful_envelope_is_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false, "message": "insufficient credits"
        })))
        .mount(&server)
        .await;

    let err = deepbrain(&server).create_video(&script()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Provider);
    assert!(err.to_string().contains("insufficient credits"));
}

#[tokio::test]
async fn missing_credentials_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = SynthesiaClient::new(
        reqwest::Client::new(),
        SynthesiaSettings {
            base_url: server.uri(),
            ..SynthesiaSettings::default()
        },
    );
    let err = client.create_video(&script()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
