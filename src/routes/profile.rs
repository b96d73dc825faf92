use crate::{error::AppError, models::Profile};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Fetch a public profile by id. 404 when no such profile exists.
#[get("/{id}")]
pub async fn get_profile(
    pool: web::Data<PgPool>,
    profile_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let profile = sqlx::query_as::<_, Profile>(
        "SELECT id, name, email, role, college, pass_out_year, department, phone, created_at
         FROM profile WHERE id = $1",
    )
    .bind(profile_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match profile {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Err(AppError::NotFound("Profile not found".into())),
    }
}
