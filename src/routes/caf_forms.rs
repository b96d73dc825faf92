use crate::{
    error::AppError,
    models::placement::{CafForm, CafFormInput, CafFormQuery, CafFormUpdate},
    policy,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const CAF_COLUMNS: &str = "id, college_id, company_name, job_role, description, package, \
                           eligibility, drive_date, status, created_at";

/// List CAF forms, optionally filtered by submitting college and/or status.
/// Conditions are appended dynamically and bound in the same order.
#[get("")]
pub async fn list_caf_forms(
    pool: web::Data<PgPool>,
    query_params: web::Query<CafFormQuery>,
) -> Result<impl Responder, AppError> {
    let mut sql = format!("SELECT {CAF_COLUMNS} FROM caf_forms");
    let mut conditions: Vec<String> = Vec::new();
    let mut param_count = 1;

    if query_params.college_id.is_some() {
        conditions.push(format!("college_id = ${}", param_count));
        param_count += 1;
    }
    if query_params.status.is_some() {
        conditions.push(format!("status = ${}", param_count));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC");

    let mut query_builder = sqlx::query_as::<_, CafForm>(&sql);
    if let Some(college_id) = query_params.college_id {
        query_builder = query_builder.bind(college_id);
    }
    if let Some(status) = query_params.status {
        query_builder = query_builder.bind(status);
    }

    let forms = query_builder.fetch_all(&**pool).await?;
    Ok(HttpResponse::Ok().json(forms))
}

/// Submit a CAF form. Status always starts at `pending`.
#[post("")]
pub async fn create_caf_form(
    pool: web::Data<PgPool>,
    form_data: web::Json<CafFormInput>,
) -> Result<impl Responder, AppError> {
    form_data.validate()?;

    policy::load_actor(&pool, form_data.college_id).await?;

    let form = sqlx::query_as::<_, CafForm>(&format!(
        "INSERT INTO caf_forms (college_id, company_name, job_role, description, package, eligibility, drive_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {CAF_COLUMNS}"
    ))
    .bind(form_data.college_id)
    .bind(&form_data.company_name)
    .bind(&form_data.job_role)
    .bind(&form_data.description)
    .bind(&form_data.package)
    .bind(&form_data.eligibility)
    .bind(form_data.drive_date)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(form))
}

/// Update a CAF form. Absent fields keep their stored values; a status change
/// must follow the pending → approved/rejected transition set.
#[put("/{id}")]
pub async fn update_caf_form(
    pool: web::Data<PgPool>,
    form_id: web::Path<i32>,
    update_data: web::Json<CafFormUpdate>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;
    let form_id = form_id.into_inner();

    let current = sqlx::query_as::<_, CafForm>(&format!(
        "SELECT {CAF_COLUMNS} FROM caf_forms WHERE id = $1"
    ))
    .bind(form_id)
    .fetch_optional(&**pool)
    .await?;

    let current = match current {
        Some(form) => form,
        None => return Err(AppError::NotFound("CAF form not found".into())),
    };

    if let Some(next) = update_data.status {
        if !current.status.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "Invalid status transition from {} to {}",
                current.status, next
            )));
        }
    }

    // Guarded on the status the transition was validated against, so a
    // concurrent approval or rejection cannot be overwritten between the
    // read above and this write.
    let form = sqlx::query_as::<_, CafForm>(&format!(
        "UPDATE caf_forms SET
            company_name = COALESCE($1, company_name),
            job_role = COALESCE($2, job_role),
            description = COALESCE($3, description),
            package = COALESCE($4, package),
            eligibility = COALESCE($5, eligibility),
            drive_date = COALESCE($6, drive_date),
            status = COALESCE($7, status)
         WHERE id = $8 AND status = $9
         RETURNING {CAF_COLUMNS}"
    ))
    .bind(&update_data.company_name)
    .bind(&update_data.job_role)
    .bind(&update_data.description)
    .bind(&update_data.package)
    .bind(&update_data.eligibility)
    .bind(update_data.drive_date)
    .bind(update_data.status)
    .bind(form_id)
    .bind(current.status)
    .fetch_optional(&**pool)
    .await?;

    match form {
        Some(form) => Ok(HttpResponse::Ok().json(form)),
        None => Err(AppError::BadRequest(
            "CAF form changed concurrently, retry".into(),
        )),
    }
}

/// Delete a CAF form. 404 when it does not exist.
#[delete("/{id}")]
pub async fn delete_caf_form(
    pool: web::Data<PgPool>,
    form_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM caf_forms WHERE id = $1")
        .bind(form_id.into_inner())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("CAF form not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "CAF form deleted" })))
}
