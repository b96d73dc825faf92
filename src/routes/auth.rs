use crate::{
    auth::{
        generate_token, hash_password, verify_password, verify_token, AuthResponse, LoginRequest,
        RegisterRequest,
    },
    error::AppError,
    models::profile::{Profile, ProfileCredentials, Role},
};
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const PROFILE_COLUMNS: &str =
    "id, name, email, role, college, pass_out_year, department, phone, created_at";

/// Register a new user
///
/// Creates a profile row with a bcrypt-hashed password. Students must supply
/// a pass-out year, college accounts a department.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    // Role-conditional requirements that Validate can't express
    match register_data.role {
        Role::Student if register_data.pass_out_year.is_none() => {
            return Err(AppError::BadRequest(
                "Pass out year is required for students".into(),
            ));
        }
        Role::College if register_data.department.is_none() => {
            return Err(AppError::BadRequest(
                "Department is required for college users".into(),
            ));
        }
        _ => {}
    }

    let password_hash = hash_password(&register_data.password)?;

    // The unique index on profile.email is the duplicate check; a racing
    // second insert surfaces here as the same 400.
    let user = sqlx::query_as::<_, Profile>(&format!(
        "INSERT INTO profile (name, email, role, college, pass_out_year, department, phone, password)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(&register_data.name)
    .bind(&register_data.email)
    .bind(register_data.role)
    .bind(&register_data.college)
    .bind(register_data.pass_out_year)
    .bind(&register_data.department)
    .bind(&register_data.phone)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await
    .map_err(|e| AppError::duplicate_key(e, "Email already registered"))?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "user": user
    })))
}

/// Login user
///
/// Verifies credentials (and the expected role, when the login page supplies
/// one) and issues a one-hour session token.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, ProfileCredentials>(
        "SELECT id, name, email, role, college, pass_out_year, department, phone, password, created_at
         FROM profile WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) => user,
        None => return Err(AppError::BadRequest("User not found".into())),
    };

    if let Some(expected_role) = login_data.role {
        if user.role != expected_role {
            return Err(AppError::BadRequest(format!(
                "Invalid credentials for {} login",
                expected_role
            )));
        }
    }

    if !verify_password(&login_data.password, &user.password)? {
        return Err(AppError::BadRequest("Incorrect password".into()));
    }

    let token = generate_token(user.id, &user.email, user.role)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Returns the identity bound into a session token.
///
/// Reads the `Authorization: Bearer` header; 401 when the token is missing,
/// forged, or past its one-hour expiry.
#[get("/me")]
pub async fn me(req: HttpRequest) -> Result<impl Responder, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

    let claims = verify_token(token)?;

    Ok(HttpResponse::Ok().json(json!({
        "id": claims.sub,
        "email": claims.email,
        "role": claims.role
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_me_without_token_is_unauthorized() {
        let app = test::init_service(actix_web::App::new().service(me)).await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_rt::test]
    async fn test_me_round_trips_token_claims() {
        let _guard = crate::auth::token::test_support::JWT_ENV_LOCK.lock().unwrap();
        std::env::set_var("JWT_SECRET", "me_endpoint_test_secret");
        let token = generate_token(42, "roundtrip@example.com", Role::College).unwrap();

        let app = test::init_service(actix_web::App::new().service(me)).await;
        let req = test::TestRequest::get()
            .uri("/me")
            .append_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], 42);
        assert_eq!(body["email"], "roundtrip@example.com");
        assert_eq!(body["role"], "college");
    }
}
