use crate::{
    error::AppError,
    models::profile::{StudentProfile, StudentProfileInput},
    policy,
};
use actix_web::{get, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const STUDENT_PROFILE_COLUMNS: &str =
    "id, student_id, resume_url, skills, course, completion_percentage, updated_at";

/// Fetch a student's extended profile, creating an empty one atomically if it
/// does not exist yet. The conflict-aware insert means two concurrent first
/// reads still produce a single row.
#[get("/{student_id}")]
pub async fn get_student_profile(
    pool: web::Data<PgPool>,
    student_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let student_id = student_id.into_inner();

    policy::load_actor(&pool, student_id).await?;

    let profile = sqlx::query_as::<_, StudentProfile>(&format!(
        "INSERT INTO student_profiles (student_id) VALUES ($1)
         ON CONFLICT (student_id) DO UPDATE SET student_id = EXCLUDED.student_id
         RETURNING {STUDENT_PROFILE_COLUMNS}"
    ))
    .bind(student_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Update a student's extended profile. Upserts in one statement: absent
/// fields keep their stored values (or the column defaults on first write).
#[put("/{student_id}")]
pub async fn update_student_profile(
    pool: web::Data<PgPool>,
    student_id: web::Path<i32>,
    profile_data: web::Json<StudentProfileInput>,
) -> Result<impl Responder, AppError> {
    profile_data.validate()?;
    let student_id = student_id.into_inner();

    policy::load_actor(&pool, student_id).await?;

    let profile = sqlx::query_as::<_, StudentProfile>(&format!(
        "INSERT INTO student_profiles (student_id, resume_url, skills, course, completion_percentage)
         VALUES ($1, $2, $3, $4, COALESCE($5, 0))
         ON CONFLICT (student_id) DO UPDATE SET
            resume_url = COALESCE($2, student_profiles.resume_url),
            skills = COALESCE($3, student_profiles.skills),
            course = COALESCE($4, student_profiles.course),
            completion_percentage = COALESCE($5, student_profiles.completion_percentage),
            updated_at = NOW()
         RETURNING {STUDENT_PROFILE_COLUMNS}"
    ))
    .bind(student_id)
    .bind(&profile_data.resume_url)
    .bind(&profile_data.skills)
    .bind(&profile_data.course)
    .bind(profile_data.completion_percentage)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}
