//! Handler tests against an in-memory application.

use std::sync::{Arc, Mutex};

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use folio_core::PostRepository;
use folio_core::domain::{AuthUser, FormSubmission, PostForm};
use folio_core::ports::{
    FORM_SUCCESS_MESSAGE, FormError, FormReceipt, FormRelay, PasswordService,
};
use folio_infra::auth::AdminAccount;
use folio_infra::{
    Argon2PasswordService, CredentialIdentityProvider, InMemoryPostStore, InMemoryRateLimiter,
    JwtConfig, JwtTokenService, LocalObjectStorage, RateLimitConfig,
};

use super::{configure_media, configure_routes, page_shell};
use crate::state::AppState;

#[derive(Default)]
struct RecordingRelay {
    sent: Mutex<Vec<FormSubmission>>,
}

#[async_trait]
impl FormRelay for RecordingRelay {
    async fn submit(&self, submission: FormSubmission) -> Result<FormReceipt, FormError> {
        self.sent.lock().unwrap().push(submission);
        Ok(FormReceipt {
            message: FORM_SUCCESS_MESSAGE.to_string(),
        })
    }
}

struct Harness {
    state: AppState,
    relay: Arc<RecordingRelay>,
}

fn harness(forms_per_minute: u32) -> Harness {
    let passwords = Arc::new(Argon2PasswordService::new());
    let account = AdminAccount {
        uid: "admin".to_string(),
        email: "ada@example.com".to_string(),
        display_name: Some("Ada".to_string()),
        password_hash: passwords.hash("correct horse").unwrap(),
    };
    let relay = Arc::new(RecordingRelay::default());
    let uploads = std::env::temp_dir().join(format!("folio-handlers-{}", std::process::id()));

    let state = AppState {
        repo: PostRepository::new(Arc::new(InMemoryPostStore::new())),
        identity: Arc::new(CredentialIdentityProvider::new(vec![account], passwords)),
        tokens: Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-test-secret".to_string(),
            ..JwtConfig::default()
        })),
        storage: Arc::new(LocalObjectStorage::new(uploads, "/uploads")),
        forms: relay.clone(),
        form_limiter: Arc::new(InMemoryRateLimiter::new(RateLimitConfig {
            per_minute: forms_per_minute,
        })),
        trusted_proxies: Arc::from(Vec::new()),
        preview_chars: 120,
        store_kind: "memory",
    };
    Harness { state, relay }
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes(&$state))
                .default_service(page_shell()),
        )
        .await
    };
}

fn bearer(state: &AppState) -> (header::HeaderName, String) {
    let token = state
        .tokens
        .generate_token(&AuthUser {
            uid: "admin".to_string(),
            display_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
        })
        .unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

async fn seed(state: &AppState, title: &str, category: &str) -> String {
    let form = PostForm {
        title: title.to_string(),
        excerpt: format!("{title} excerpt"),
        content: format!("<p>{title}   <b>body</b></p>"),
        category: category.to_string(),
        tags: "rust, web".to_string(),
        ..PostForm::default()
    };
    state.repo.create_post(form, "Ada".to_string()).await.unwrap()
}

#[actix_web::test]
async fn test_list_filters_by_category_and_counts_all() {
    let h = harness(5);
    seed(&h.state, "one", "ai").await;
    seed(&h.state, "two", "mlops").await;
    seed(&h.state, "three", "ai").await;
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/posts?category=ai").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["category"], "ai");
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p["category"] == "ai"));
    let three = posts.iter().find(|p| p["title"] == "three").unwrap();
    assert_eq!(three["preview"], "three body");

    let counts: Vec<(String, u64)> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["category"].as_str().unwrap().to_string(),
                c["count"].as_u64().unwrap(),
            )
        })
        .collect();
    assert!(counts.contains(&("ai".to_string(), 2)));
    assert!(counts.contains(&("mlops".to_string(), 1)));
}

#[actix_web::test]
async fn test_missing_post_is_404() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/posts/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Blog post not found.");
}

#[actix_web::test]
async fn test_admin_writes_require_a_session() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/admin/posts")
        .set_json(json!({"title": "t", "excerpt": "e", "category": "c"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(h.state.repo.list_posts().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_then_read_back() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(bearer(&h.state))
        .set_json(json!({
            "title": "Hello",
            "excerpt": "Short",
            "content": "<p>Hi</p>",
            "category": "ai",
            "tags": " a, ,b ",
            "image": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Blog post published!");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["author"], "Ada");
    assert_eq!(post["tags"], json!(["a", "b"]));
    assert!(post.get("image").is_none());
}

#[actix_web::test]
async fn test_invalid_form_is_rejected() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/admin/posts")
        .insert_header(bearer(&h.state))
        .set_json(json!({"title": " ", "excerpt": "e", "category": "c"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.state.repo.list_posts().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_delete_requires_confirmation() {
    let h = harness(5);
    let id = seed(&h.state, "doomed", "ai").await;
    let app = app!(h.state);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/posts/{id}"))
        .insert_header(bearer(&h.state))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.state.repo.get_post(&id).await.unwrap().is_some());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/posts/{id}?confirm=true"))
        .insert_header(bearer(&h.state))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_of_missing_post_is_404() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::put()
        .uri("/api/admin/posts/missing")
        .insert_header(bearer(&h.state))
        .set_json(json!({"title": "t", "excerpt": "e", "category": "c"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_sign_in_with_credentials() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["author"], "Ada");

    let token = body["access_token"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["email"], "ada@example.com");
}

#[actix_web::test]
async fn test_sign_in_wrong_password() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"email": "ada@example.com", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Sign in failed: Invalid credentials");
}

#[actix_web::test]
async fn test_popup_blocked_sign_in_is_classified() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/auth/sign-in")
        .set_json(json!({"provider_error": {"code": "auth/popup-blocked"}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "auth/popup-blocked");
    assert_eq!(
        body["detail"],
        "Popup was blocked. Please allow popups for this site."
    );
}

#[actix_web::test]
async fn test_newsletter_is_relayed_then_rate_limited() {
    let h = harness(1);
    let app = app!(h.state);

    let signup = || {
        test::TestRequest::post()
            .uri("/api/forms/newsletter")
            .set_json(json!({"email": "reader@example.com"}))
            .to_request()
    };

    let body: Value = test::call_and_read_body_json(&app, signup()).await;
    assert_eq!(body["message"], FORM_SUCCESS_MESSAGE);
    {
        let sent = h.relay.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].get("subject"), Some("Newsletter Signup"));
    }

    let resp = test::call_service(&app, signup()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("Retry-After"));
    assert_eq!(h.relay.sent.lock().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_contact_form_validation() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/forms/contact")
        .set_json(json!({"name": "Ada", "email": "nope", "subject": "Hi", "message": "Hello"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.relay.sent.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_theme_toggle_round_trips_through_cookie() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::get().uri("/api/theme").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["theme"], "light");

    let req = test::TestRequest::post()
        .uri("/api/theme/toggle")
        .cookie(actix_web::cookie::Cookie::new("theme", "light"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "theme")
        .unwrap();
    assert_eq!(cookie.value(), "dark");
}

#[actix_web::test]
async fn test_page_shell_routes() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::get()
        .uri("/blog/abc")
        .cookie(actix_web::cookie::Cookie::new("theme", "dark"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("data-route=\"blog-detail\""));
    assert!(html.contains("data-post-id=\"abc\""));
    assert!(html.contains("data-theme=\"dark\""));

    let req = test::TestRequest::get().uri("/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_upload_returns_embeddable_url() {
    let h = harness(5);
    let app = app!(h.state);

    let req = test::TestRequest::post()
        .uri("/api/admin/uploads?filename=cat%20photo.png")
        .insert_header(bearer(&h.state))
        .insert_header((header::CONTENT_TYPE, "image/png"))
        .set_payload(&b"\x89PNG"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/blog-images/"));
    assert!(url.ends_with("-cat-photo.png"));
}

fn signup_from(peer: &str, forwarded_for: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/forms/newsletter")
        .peer_addr(peer.parse().unwrap())
        .insert_header(("X-Forwarded-For", forwarded_for))
        .set_json(json!({"email": "reader@example.com"}))
        .to_request()
}

#[actix_web::test]
async fn test_rotating_forwarded_for_does_not_reset_the_budget() {
    let h = harness(1);
    let app = app!(h.state);

    let resp = test::call_service(&app, signup_from("203.0.113.5:40000", "1.1.1.1")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, signup_from("203.0.113.5:40001", "2.2.2.2")).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(h.relay.sent.lock().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_trusted_proxy_keys_by_forwarded_client() {
    let mut h = harness(1);
    h.state.trusted_proxies = Arc::from(vec!["10.0.0.1".parse().unwrap()]);
    let app = app!(h.state);

    let resp = test::call_service(&app, signup_from("10.0.0.1:443", "198.51.100.1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, signup_from("10.0.0.1:443", "198.51.100.2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, signup_from("10.0.0.1:443", "198.51.100.1")).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_uploads_serve_raster_images_only() {
    let h = harness(5);
    let dir = std::env::temp_dir().join(format!("folio-media-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("blog-images")).unwrap();
    std::fs::write(dir.join("blog-images/cat.png"), b"\x89PNG").unwrap();
    std::fs::write(
        dir.join("blog-images/evil.svg"),
        b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>",
    )
    .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(h.state.clone()))
            .configure(configure_routes(&h.state))
            .configure(configure_media("/uploads".to_string(), dir.clone()))
            .default_service(page_shell()),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/uploads/blog-images/cat.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");

    let req = test::TestRequest::get()
        .uri("/uploads/blog-images/evil.svg")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&dir).ok();
}
