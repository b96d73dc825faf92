use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use campusbridge::routes;
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;

async fn test_pool() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    campusbridge::db::ensure_schema(&pool)
        .await
        .expect("Failed to set up schema");
    pool
}

async fn delete_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM profile WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

// Requires a live database; run with `cargo test -- --ignored`.
#[ignore]
#[actix_rt::test]
async fn test_register_and_login_flow() {
    std::env::set_var("JWT_SECRET", "integration_test_secret");
    let pool = test_pool().await;
    delete_user(&pool, "integration@example.com").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await;

    // Register a new student
    let register_payload = json!({
        "name": "Integration Student",
        "email": "integration@example.com",
        "password": "Password123!",
        "role": "student",
        "pass_out_year": 2024,
        "college": "Test College"
    });
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["role"], "student");
    assert!(body["user"].get("password").is_none(), "password must not leak");

    // Registering the same email again must fail
    let req_conflict = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    assert_eq!(resp_conflict.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let conflict_body: serde_json::Value = test::read_body_json(resp_conflict).await;
    assert_eq!(conflict_body["error"], "Email already registered");

    // Login with the wrong password
    let bad_login = json!({
        "email": "integration@example.com",
        "password": "WrongPassword!"
    });
    let req_bad = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&bad_login)
        .to_request();
    let resp_bad = test::call_service(&app, req_bad).await;
    assert_eq!(resp_bad.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Login with the wrong role
    let wrong_role_login = json!({
        "email": "integration@example.com",
        "password": "Password123!",
        "role": "college"
    });
    let req_role = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&wrong_role_login)
        .to_request();
    let resp_role = test::call_service(&app, req_role).await;
    assert_eq!(resp_role.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Correct credentials
    let login_payload = json!({
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req_login = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), actix_web::http::StatusCode::OK);
    let login_body: serde_json::Value = test::read_body_json(resp_login).await;
    let token = login_body["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty(), "Token should be a non-empty string");
    let user_id = login_body["user"]["id"].as_i64().unwrap();

    // The issued token identifies the user via /auth/me
    let req_me = test::TestRequest::get()
        .uri("/auth/me")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp_me = test::call_service(&app, req_me).await;
    assert_eq!(resp_me.status(), actix_web::http::StatusCode::OK);
    let me_body: serde_json::Value = test::read_body_json(resp_me).await;
    assert_eq!(me_body["id"].as_i64().unwrap(), user_id);
    assert_eq!(me_body["email"], "integration@example.com");
    assert_eq!(me_body["role"], "student");

    // Profile lookup works and unknown ids are 404
    let req_profile = test::TestRequest::get()
        .uri(&format!("/profile/{}", user_id))
        .to_request();
    let resp_profile = test::call_service(&app, req_profile).await;
    assert_eq!(resp_profile.status(), actix_web::http::StatusCode::OK);

    let req_missing = test::TestRequest::get().uri("/profile/999999").to_request();
    let resp_missing = test::call_service(&app, req_missing).await;
    assert_eq!(resp_missing.status(), actix_web::http::StatusCode::NOT_FOUND);

    delete_user(&pool, "integration@example.com").await;
}

// Requires a live database; run with `cargo test -- --ignored`.
#[ignore]
#[actix_rt::test]
async fn test_role_specific_registration_requirements() {
    let pool = test_pool().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await;

    let test_cases = vec![
        (
            json!({
                "name": "No Year Student",
                "email": "noyear@example.com",
                "password": "Password123!",
                "role": "student"
            }),
            "Pass out year is required for students",
        ),
        (
            json!({
                "name": "No Dept College",
                "email": "nodept@example.com",
                "password": "Password123!",
                "role": "college"
            }),
            "Department is required for college users",
        ),
    ];

    for (payload, expected_error) in test_cases {
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            actix_web::http::StatusCode::BAD_REQUEST,
            "Expected 400 for: {}",
            expected_error
        );
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], expected_error);
    }

    // Unknown roles are rejected at deserialization
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Recruiter",
            "email": "recruiter@example.com",
            "password": "Password123!",
            "role": "recruiter"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}
