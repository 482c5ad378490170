//! Authentication and role checks at the HTTP boundary

mod support;

use api::error::{NOT_LINKED_NOTICE, PERMISSION_NOTICE};
use auth::{Role, SessionConfig, SessionManager, User};
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use support::TestApp;
use uuid::Uuid;

#[tokio::test]
async fn test_protected_routes_require_a_session() {
    let app = TestApp::offline();

    for uri in ["/dashboard", "/attendance", "/report", "/courses", "/students", "/logout"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(response.body["redirect"], "/login", "{}", uri);
    }

    let response = app
        .post("/courses/add", None, json!({ "code": "CS101", "title": "Intro" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_tokens_are_rejected() {
    let app = TestApp::offline();

    let response = app.get("/dashboard", Some("not-a-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // Token signed with a different secret
    let foreign = SessionManager::new(&SessionConfig {
        secret: "some-other-secret".to_string(),
        ttl_seconds: 3600,
    })
    .unwrap();
    let user = User {
        id: Uuid::new_v4(),
        username: "admin".to_string(),
        password_hash: String::new(),
        role: Role::Admin,
        student_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let token = foreign.issue(&user).unwrap();

    let response = app.get("/courses", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_validate_before_touching_the_database() {
    let app = TestApp::offline();

    let response = app.get("/register", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["roles"], json!(["student", "professor"]));

    let response = app.post("/login", None, json!({ "username": "admin" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Malformed or mistyped bodies get the same JSON error shape
    let response = app.post_raw("/login", None, "{not json").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let response = app
        .post("/register", None, json!({ "username": 42, "password": "secret123" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());

    let response = app.register("newuser", "short", "student").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.register("newuser", "secret123", "admin").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/register",
            None,
            json!({ "username": "newuser", "password": "secret123", "confirm": "secret124" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_is_denied_staff_routes_and_admin_is_allowed() {
    let Some(app) = TestApp::with_database("roles").await else {
        return;
    };

    assert_eq!(
        app.register("student1", "secret1", "student").await.status,
        StatusCode::CREATED
    );
    let student = app.login("student1", "secret1").await;

    for uri in ["/courses", "/students"] {
        let response = app.get(uri, Some(&student)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(response.body["error"], PERMISSION_NOTICE);
        assert_eq!(response.body["redirect"], "/dashboard");
    }
    let response = app
        .post(
            "/courses/add",
            Some(&student),
            json!({ "code": "CS101", "title": "Intro to Computer Science" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let admin = app.admin_token().await;
    assert_eq!(app.get("/courses", Some(&admin)).await.status, StatusCode::OK);
    let response = app
        .post(
            "/courses/add",
            Some(&admin),
            json!({ "code": "CS101", "title": "Intro to Computer Science" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(app.get("/report", Some(&admin)).await.status, StatusCode::OK);

    assert_eq!(
        app.register("prof1", "secret1", "professor").await.status,
        StatusCode::CREATED
    );
    let professor = app.login("prof1", "secret1").await;
    assert_eq!(app.get("/students", Some(&professor)).await.status, StatusCode::OK);

    let response = app.get("/dashboard", Some(&professor)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["view"], "staff");

    app.cleanup().await;
}

#[tokio::test]
async fn test_unlinked_student_sees_notice() {
    let Some(app) = TestApp::with_database("unlinked").await else {
        return;
    };

    app.register("loner", "secret1", "student").await;
    let token = app.login("loner", "secret1").await;

    let response = app.get("/dashboard", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["view"], "student");
    assert_eq!(response.body["notice"], NOT_LINKED_NOTICE);
    assert!(response.body["student"].is_null());

    for uri in ["/attendance", "/report"] {
        let response = app.get(uri, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(response.body["error"], NOT_LINKED_NOTICE);
    }

    app.cleanup().await;
}

#[tokio::test]
async fn test_login_sets_cookie_and_logout_clears_it() {
    let Some(app) = TestApp::with_database("cookie").await else {
        return;
    };

    let response = app
        .post("/login", None, json!({ "username": "admin", "password": "admin123" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.headers["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("attendify_session="));
    assert!(cookie.contains("HttpOnly"));

    let token = response.body["token"].as_str().unwrap().to_string();

    // The cookie alone authenticates
    let response = app.get_with_cookie("/dashboard", &token).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get_with_cookie("/logout", &token).await;
    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.headers["set-cookie"].to_str().unwrap();
    assert!(cleared.starts_with("attendify_session=;"));
    assert!(cleared.contains("Max-Age=0"));

    // Bearer clients get the expired cookie as well
    let response = app.get("/logout", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.headers["set-cookie"].to_str().unwrap();
    assert!(cleared.starts_with("attendify_session=;"));

    app.cleanup().await;
}
