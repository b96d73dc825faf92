//! Aggregate dashboards for the admin and college views. Each endpoint is a
//! handful of COUNT queries plus the placement-percentage ratio.

use crate::{
    error::AppError,
    models::placement::{ApplicationStatus, CafStatus},
    models::Role,
};
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Share of students with at least one `selected` application, as a
/// percentage rounded to two decimals. Zero when there are no students.
fn placement_percentage(selected_students: i64, total_students: i64) -> f64 {
    if total_students == 0 {
        return 0.0;
    }
    let ratio = selected_students as f64 / total_students as f64;
    (ratio * 100.0 * 100.0).round() / 100.0
}

async fn count(pool: &PgPool, sql: &str) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?)
}

async fn count_role(pool: &PgPool, role: Role) -> Result<i64, AppError> {
    Ok(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profile WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await?,
    )
}

async fn count_selected_students(pool: &PgPool) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT student_id) FROM applications WHERE status = $1",
    )
    .bind(ApplicationStatus::Selected)
    .fetch_one(pool)
    .await?)
}

/// Platform-wide totals for the admin dashboard.
#[get("/admin/stats")]
pub async fn admin_stats(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let total_students = count_role(&pool, Role::Student).await?;
    let total_colleges = count_role(&pool, Role::College).await?;
    let total_communities = count(&pool, "SELECT COUNT(*) FROM communities").await?;
    let total_companies = count(&pool, "SELECT COUNT(*) FROM companies").await?;
    let total_jobs = count(&pool, "SELECT COUNT(*) FROM jobs").await?;
    let total_applications = count(&pool, "SELECT COUNT(*) FROM applications").await?;
    let selected_students = count_selected_students(&pool).await?;

    let pending_caf_forms =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM caf_forms WHERE status = $1")
            .bind(CafStatus::Pending)
            .fetch_one(&**pool)
            .await?;

    Ok(HttpResponse::Ok().json(json!({
        "total_students": total_students,
        "total_colleges": total_colleges,
        "total_communities": total_communities,
        "total_companies": total_companies,
        "total_jobs": total_jobs,
        "total_applications": total_applications,
        "selected_applications": selected_students,
        "pending_caf_forms": pending_caf_forms,
        "placement_percentage": placement_percentage(selected_students, total_students),
    })))
}

/// Pipeline breakdown for the college dashboard: applications and CAF forms
/// per status, plus the placement percentage.
#[get("/college/analytics")]
pub async fn college_analytics(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let total_students = count_role(&pool, Role::Student).await?;
    let selected_students = count_selected_students(&pool).await?;

    let application_counts = sqlx::query_as::<_, (ApplicationStatus, i64)>(
        "SELECT status, COUNT(*) FROM applications GROUP BY status",
    )
    .fetch_all(&**pool)
    .await?;

    let caf_counts = sqlx::query_as::<_, (CafStatus, i64)>(
        "SELECT status, COUNT(*) FROM caf_forms GROUP BY status",
    )
    .fetch_all(&**pool)
    .await?;

    let mut applications_by_status = serde_json::Map::new();
    for status in [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Interview,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ] {
        let count = application_counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        applications_by_status.insert(status.as_str().to_string(), json!(count));
    }

    let mut caf_by_status = serde_json::Map::new();
    for status in [CafStatus::Pending, CafStatus::Approved, CafStatus::Rejected] {
        let count = caf_counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        caf_by_status.insert(status.as_str().to_string(), json!(count));
    }

    Ok(HttpResponse::Ok().json(json!({
        "total_students": total_students,
        "applications_by_status": applications_by_status,
        "caf_forms_by_status": caf_by_status,
        "placement_percentage": placement_percentage(selected_students, total_students),
    })))
}
