//! Integration tests for the MentorHub backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{
    init_database, ContactRepository, FileRepository, ProjectRepository, ReviewRepository,
    UserRepository,
};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");

        let config = Config {
            db_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            session_ttl_hours: 24,
            max_upload_bytes: 1024 * 1024,
        };

        let state = AppState {
            users: UserRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool.clone()),
            files: FileRepository::new(pool),
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a user and return its id.
    async fn signup(&self, email: &str, role: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/signup"))
            .json(&json!({
                "name": "Test User",
                "email": email,
                "password": "secret123",
                "role": role
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.unwrap();
        body["userId"].as_str().unwrap().to_string()
    }

    /// Log a registered user in and return the session token.
    async fn login(&self, email: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": "secret123" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a project as an authenticated user and return its id.
    async fn create_project(&self, token: &str, title: &str, domain: &str) -> String {
        let resp = self
            .client
            .post(self.url("/api/projects"))
            .bearer_auth(token)
            .json(&json!({ "title": title, "domain": domain }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.unwrap();
        body["projectId"].as_str().unwrap().to_string()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_signup_and_login() {
    let fixture = TestFixture::new().await;

    let user_id = fixture.signup("asha@example.com", "mentee").await;
    assert!(!user_id.is_empty());

    let resp = fixture
        .client
        .post(fixture.url("/api/login"))
        .json(&json!({ "email": "asha@example.com", "password": "secret123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "mentee");
    assert_eq!(body["userId"], user_id.as_str());
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflict() {
    let fixture = TestFixture::new().await;

    fixture.signup("dup@example.com", "mentor").await;

    // Same email, different case: still a conflict
    let resp = fixture
        .client
        .post(fixture.url("/api/signup"))
        .json(&json!({
            "email": "Dup@Example.com",
            "password": "other-password",
            "role": "mentee"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "CONFLICT");

    // No duplicate was created and the original credentials still work
    let token = fixture.login("dup@example.com").await;
    let resp = fixture
        .client
        .get(fixture.url("/api/mentors"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let fixture = TestFixture::new().await;

    fixture.signup("carol@example.com", "mentor").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/login"))
        .json(&json!({ "email": "carol@example.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let resp = fixture
        .client
        .post(fixture.url("/api/login"))
        .json(&json!({ "email": "nobody@example.com", "password": "secret123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_directories_filter_roles_and_exclude_password() {
    let fixture = TestFixture::new().await;

    fixture.signup("mentor1@example.com", "mentor").await;
    fixture.signup("mentee1@example.com", "mentee").await;

    // Unauthenticated access is rejected
    let resp = fixture
        .client
        .get(fixture.url("/api/mentors"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let token = fixture.login("mentee1@example.com").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/mentors"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let mentors = body["data"].as_array().unwrap();
    assert_eq!(mentors.len(), 1);
    assert_eq!(mentors[0]["email"], "mentor1@example.com");
    assert_eq!(mentors[0]["role"], "mentor");
    assert!(mentors[0].get("password").is_none());

    let resp = fixture
        .client
        .get(fixture.url("/api/mentees"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let mentees = body["data"].as_array().unwrap();
    assert_eq!(mentees.len(), 1);
    assert_eq!(mentees[0]["email"], "mentee1@example.com");
}

#[tokio::test]
async fn test_project_create_validation_and_policy() {
    let fixture = TestFixture::new().await;

    fixture.signup("mentee@example.com", "mentee").await;
    fixture.signup("mentor@example.com", "mentor").await;
    let mentee_token = fixture.login("mentee@example.com").await;
    let mentor_token = fixture.login("mentor@example.com").await;

    // Unauthenticated creation is rejected
    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .json(&json!({ "title": "Portal" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Mentors do not create projects
    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .bearer_auth(&mentor_token)
        .json(&json!({ "title": "Portal" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    // Title is required
    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .bearer_auth(&mentee_token)
        .json(&json!({ "title": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_project_search_matches_title_or_domain() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let token = fixture.login("coord@example.com").await;

    let portal_id = fixture
        .create_project(&token, "Portal", "Web Development")
        .await;
    fixture.create_project(&token, "Tracker", "IoT").await;

    // Case-insensitive substring against title or domain
    for term in ["Web", "web", "WEB"] {
        let resp = fixture
            .client
            .get(fixture.url(&format!("/api/projects?search={}", term)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1, "term {:?}", term);
        assert_eq!(data[0]["id"], portal_id.as_str());
        assert_eq!(data[0]["title"], "Portal");
    }

    // Title matches too
    let resp = fixture
        .client
        .get(fixture.url("/api/projects?search=track"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Tracker");

    // No term returns everything, newest first
    let resp = fixture
        .client
        .get(fixture.url("/api/projects"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "Tracker");
    assert_eq!(data[1]["title"], "Portal");
}

#[tokio::test]
async fn test_project_get_and_detail_alias() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let token = fixture.login("coord@example.com").await;
    let project_id = fixture.create_project(&token, "Portal", "Web").await;

    for path in [
        format!("/api/projects/{}", project_id),
        format!("/api/projects/{}/detail", project_id),
    ] {
        let resp = fixture.client.get(fixture.url(&path)).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["data"]["title"], "Portal");
        // A fresh project reports a zeroed aggregate
        assert_eq!(body["data"]["avgRating"].as_f64().unwrap(), 0.0);
        assert_eq!(body["data"]["ratingsCount"], 0);
    }

    let resp = fixture
        .client
        .get(fixture.url("/api/projects/no-such-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_review_sequence_aggregate() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let token = fixture.login("coord@example.com").await;
    let project_id = fixture.create_project(&token, "Portal", "Web").await;

    let ratings = [4_i64, 5, 3, 4, 2];
    for (i, rating) in ratings.iter().enumerate() {
        let resp = fixture
            .client
            .post(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
            .json(&json!({ "rating": rating, "comment": "ok" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["rating"], *rating);
        assert_eq!(body["ratingsCount"], (i + 1) as i64);
    }

    // Served aggregate equals the true mean of the sequence
    let sum: i64 = ratings.iter().sum();
    let mean = sum as f64 / ratings.len() as f64;
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}", project_id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["ratingsCount"], ratings.len() as i64);
    let served = body["data"]["avgRating"].as_f64().unwrap();
    assert!((served - mean).abs() < 0.005, "served {} mean {}", served, mean);

    // Reviews are listed newest first
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), ratings.len());
    assert_eq!(reviews[0]["rating"], 2);
}

#[tokio::test]
async fn test_review_validation_leaves_aggregate_untouched() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let token = fixture.login("coord@example.com").await;
    let project_id = fixture.create_project(&token, "Portal", "Web").await;

    for rating in [0, 6, -1] {
        let resp = fixture
            .client
            .post(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
            .json(&json!({ "rating": rating }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "rating {}", rating);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}", project_id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["avgRating"].as_f64().unwrap(), 0.0);
    assert_eq!(body["data"]["ratingsCount"], 0);
}

#[tokio::test]
async fn test_review_for_missing_project_creates_nothing() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/projects/no-such-id/reviews"))
        .json(&json!({ "rating": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    // Listing reviews for the same id is also a 404, not an empty list
    let resp = fixture
        .client
        .get(fixture.url("/api/projects/no-such-id/reviews"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_concurrent_reviews_no_lost_update() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let token = fixture.login("coord@example.com").await;
    let project_id = fixture.create_project(&token, "Portal", "Web").await;

    let first = fixture
        .client
        .post(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
        .json(&json!({ "rating": 3 }));
    let second = fixture
        .client
        .post(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
        .json(&json!({ "rating": 5 }));

    let (first, second) = tokio::join!(first.send(), second.send());
    assert_eq!(first.unwrap().status(), 201);
    assert_eq!(second.unwrap().status(), 201);

    // Both submissions must be reflected in the aggregate
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}", project_id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["ratingsCount"], 2);
    assert_eq!(body["data"]["avgRating"].as_f64().unwrap(), 4.0);
}

#[tokio::test]
async fn test_reviewer_identity_comes_from_session() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let coord_token = fixture.login("coord@example.com").await;
    let project_id = fixture.create_project(&coord_token, "Portal", "Web").await;

    let reviewer_id = fixture.signup("reviewer@example.com", "mentor").await;
    let reviewer_token = fixture.login("reviewer@example.com").await;

    // Anonymous review: no reviewer recorded, spoofed body field ignored
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
        .json(&json!({ "rating": 4, "reviewerId": "spoofed-id" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].get("reviewerId").is_none());

    // Authenticated review: reviewer derived from the session
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/projects/{}/reviews", project_id)))
        .bearer_auth(&reviewer_token)
        .json(&json!({ "rating": 5, "reviewerId": "spoofed-id" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["reviewerId"], reviewer_id.as_str());
}

#[tokio::test]
async fn test_invalid_session_token_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/mentors"))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_contact_form() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/contacts"))
        .json(&json!({
            "name": "Visitor",
            "email": "visitor@example.com",
            "message": "Hello there"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    // Every field is required
    let resp = fixture
        .client
        .post(fixture.url("/api/contacts"))
        .json(&json!({ "name": "Visitor", "email": "visitor@example.com", "message": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Listing is an oversight view
    fixture.signup("hod@example.com", "hod").await;
    fixture.signup("mentor@example.com", "mentor").await;
    let hod_token = fixture.login("hod@example.com").await;
    let mentor_token = fixture.login("mentor@example.com").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/contacts"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = fixture
        .client
        .get(fixture.url("/api/contacts"))
        .bearer_auth(&mentor_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .client
        .get(fixture.url("/api/contacts"))
        .bearer_auth(&hod_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["email"], "visitor@example.com");
}

#[tokio::test]
async fn test_file_upload_download_roundtrip() {
    let fixture = TestFixture::new().await;

    fixture.signup("mentee@example.com", "mentee").await;
    let token = fixture.login("mentee@example.com").await;
    let project_id = fixture.create_project(&token, "Portal", "Web").await;

    let payload = b"%PDF-1.4 milestone report".to_vec();
    let form = reqwest::multipart::Form::new()
        .text("projectId", project_id.clone())
        .part(
            "file",
            reqwest::multipart::Part::bytes(payload.clone())
                .file_name("report.pdf")
                .mime_str("application/pdf")
                .unwrap(),
        );

    // Uploads require a session
    let anon_form = reqwest::multipart::Form::new().text("projectId", project_id.clone());
    let resp = fixture
        .client
        .post(fixture.url("/api/files"))
        .multipart(anon_form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = fixture
        .client
        .post(fixture.url("/api/files"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let file_id = body["fileId"].as_str().unwrap().to_string();

    // Download returns the exact bytes with an attachment header
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/files/{}/download", file_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("report.pdf"));
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    assert_eq!(resp.bytes().await.unwrap().to_vec(), payload);

    // Metadata listings see the file without its payload
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/projects/{}/files", project_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["filename"], "report.pdf");
    assert_eq!(files[0]["fileId"], file_id.as_str());
    assert!(files[0].get("data").is_none());

    let resp = fixture
        .client
        .get(fixture.url("/api/files"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["files"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_upload_unknown_project() {
    let fixture = TestFixture::new().await;

    fixture.signup("mentee@example.com", "mentee").await;
    let token = fixture.login("mentee@example.com").await;

    let form = reqwest::multipart::Form::new()
        .text("projectId", "no-such-id")
        .part(
            "file",
            reqwest::multipart::Part::bytes(vec![1, 2, 3]).file_name("x.bin"),
        );

    let resp = fixture
        .client
        .post(fixture.url("/api/files"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Nothing was stored
    let resp = fixture
        .client
        .get(fixture.url("/api/files"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["files"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_mentor_projects_filter() {
    let fixture = TestFixture::new().await;

    fixture.signup("coord@example.com", "project_coordinator").await;
    let token = fixture.login("coord@example.com").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Portal",
            "domain": "Web",
            "mentorName": "Dr. Rao",
            "mentorEmail": "rao@example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    fixture.create_project(&token, "Tracker", "IoT").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/mentor-projects?mentorEmail=rao@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Portal");

    // The parameter is required
    let resp = fixture
        .client
        .get(fixture.url("/api/mentor-projects"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_hod_project_details_resolves_mentor() {
    let fixture = TestFixture::new().await;

    fixture.signup("rao@example.com", "mentor").await;
    fixture.signup("hod@example.com", "hod").await;
    fixture.signup("mentee@example.com", "mentee").await;
    let hod_token = fixture.login("hod@example.com").await;
    let mentee_token = fixture.login("mentee@example.com").await;

    let resp = fixture
        .client
        .post(fixture.url("/api/projects"))
        .bearer_auth(&mentee_token)
        .json(&json!({
            "title": "Portal",
            "domain": "Web",
            "mentorEmail": "rao@example.com",
            "teamMembers": [{ "name": "Asha", "role": "lead" }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    // Mentees cannot see the oversight view
    let resp = fixture
        .client
        .get(fixture.url("/api/hod/project-details"))
        .bearer_auth(&mentee_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = fixture
        .client
        .get(fixture.url("/api/hod/project-details"))
        .bearer_auth(&hod_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Portal");
    assert_eq!(data[0]["mentor"]["email"], "rao@example.com");
    assert!(data[0]["mentor"].get("password").is_none());
    assert_eq!(data[0]["teamMembers"][0]["name"], "Asha");

    // The registered mentor was linked by email
    assert!(data[0]["mentorId"].is_string());
}
