use crate::{
    error::AppError,
    models::placement::{Application, ApplicationInput, ApplicationStatusUpdate},
    policy,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const APPLICATION_COLUMNS: &str = "id, student_id, company_name, role, status, applied_at";

/// List every application, newest first.
#[get("")]
pub async fn list_applications(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let applications = sqlx::query_as::<_, Application>(&format!(
        "SELECT {APPLICATION_COLUMNS} FROM applications ORDER BY applied_at DESC"
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(applications))
}

/// List one student's applications, newest first.
#[get("/{student_id}")]
pub async fn list_student_applications(
    pool: web::Data<PgPool>,
    student_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let applications = sqlx::query_as::<_, Application>(&format!(
        "SELECT {APPLICATION_COLUMNS} FROM applications WHERE student_id = $1
         ORDER BY applied_at DESC"
    ))
    .bind(student_id.into_inner())
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(applications))
}

/// Record a new application. Status always starts at `applied`.
#[post("")]
pub async fn create_application(
    pool: web::Data<PgPool>,
    application_data: web::Json<ApplicationInput>,
) -> Result<impl Responder, AppError> {
    application_data.validate()?;

    policy::load_actor(&pool, application_data.student_id).await?;

    let application = sqlx::query_as::<_, Application>(&format!(
        "INSERT INTO applications (student_id, company_name, role)
         VALUES ($1, $2, $3)
         RETURNING {APPLICATION_COLUMNS}"
    ))
    .bind(application_data.student_id)
    .bind(&application_data.company_name)
    .bind(&application_data.role)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(application))
}

/// Advance an application through the pipeline. Backward or out-of-graph
/// moves are rejected with 400.
#[put("/{id}/status")]
pub async fn update_application_status(
    pool: web::Data<PgPool>,
    application_id: web::Path<i32>,
    update_data: web::Json<ApplicationStatusUpdate>,
) -> Result<impl Responder, AppError> {
    let application_id = application_id.into_inner();

    let current = sqlx::query_as::<_, Application>(&format!(
        "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
    ))
    .bind(application_id)
    .fetch_optional(&**pool)
    .await?;

    let current = match current {
        Some(application) => application,
        None => return Err(AppError::NotFound("Application not found".into())),
    };

    if !current.status.can_transition_to(update_data.status) {
        return Err(AppError::BadRequest(format!(
            "Invalid status transition from {} to {}",
            current.status, update_data.status
        )));
    }

    // Guarded on the status we validated against, so a concurrent writer
    // cannot slip an unchecked transition (e.g. past a terminal state)
    // between the read above and this write.
    let application = sqlx::query_as::<_, Application>(&format!(
        "UPDATE applications SET status = $1 WHERE id = $2 AND status = $3
         RETURNING {APPLICATION_COLUMNS}"
    ))
    .bind(update_data.status)
    .bind(application_id)
    .bind(current.status)
    .fetch_optional(&**pool)
    .await?;

    match application {
        Some(application) => Ok(HttpResponse::Ok().json(application)),
        None => Err(AppError::BadRequest(
            "Application status changed concurrently, retry".into(),
        )),
    }
}
