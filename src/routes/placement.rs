//! List/create endpoints for the simple placement records: companies, jobs,
//! events, documents, and placement events. Each is a single-table resource
//! with field-presence validation and no state machine.

use crate::{
    error::AppError,
    models::placement::{
        Company, CompanyInput, Document, DocumentInput, Event, EventInput, Job, JobInput,
        PlacementEvent, PlacementEventInput,
    },
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

#[get("")]
pub async fn list_companies(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let companies = sqlx::query_as::<_, Company>(
        "SELECT id, name, industry, website, description, created_at
         FROM companies ORDER BY name ASC",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(companies))
}

#[post("")]
pub async fn create_company(
    pool: web::Data<PgPool>,
    company_data: web::Json<CompanyInput>,
) -> Result<impl Responder, AppError> {
    company_data.validate()?;

    let company = sqlx::query_as::<_, Company>(
        "INSERT INTO companies (name, industry, website, description)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, industry, website, description, created_at",
    )
    .bind(&company_data.name)
    .bind(&company_data.industry)
    .bind(&company_data.website)
    .bind(&company_data.description)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(company))
}

#[get("")]
pub async fn list_jobs(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let jobs = sqlx::query_as::<_, Job>(
        "SELECT id, title, company_name, location, job_type, description, posted_by, created_at
         FROM jobs ORDER BY created_at DESC",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(jobs))
}

#[post("")]
pub async fn create_job(
    pool: web::Data<PgPool>,
    job_data: web::Json<JobInput>,
) -> Result<impl Responder, AppError> {
    job_data.validate()?;

    let job = sqlx::query_as::<_, Job>(
        "INSERT INTO jobs (title, company_name, location, job_type, description, posted_by)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, title, company_name, location, job_type, description, posted_by, created_at",
    )
    .bind(&job_data.title)
    .bind(&job_data.company_name)
    .bind(&job_data.location)
    .bind(&job_data.job_type)
    .bind(&job_data.description)
    .bind(job_data.posted_by)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(job))
}

#[delete("/{id}")]
pub async fn delete_job(
    pool: web::Data<PgPool>,
    job_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id.into_inner())
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Job not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Job deleted" })))
}

#[get("")]
pub async fn list_events(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT id, title, description, event_date, location, created_by, created_at
         FROM events ORDER BY event_date DESC NULLS LAST",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(events))
}

#[post("")]
pub async fn create_event(
    pool: web::Data<PgPool>,
    event_data: web::Json<EventInput>,
) -> Result<impl Responder, AppError> {
    event_data.validate()?;

    let event = sqlx::query_as::<_, Event>(
        "INSERT INTO events (title, description, event_date, location, created_by)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, title, description, event_date, location, created_by, created_at",
    )
    .bind(&event_data.title)
    .bind(&event_data.description)
    .bind(event_data.event_date)
    .bind(&event_data.location)
    .bind(event_data.created_by)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(event))
}

#[get("")]
pub async fn list_documents(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let documents = sqlx::query_as::<_, Document>(
        "SELECT id, title, file_url, doc_type, uploaded_by, created_at
         FROM documents ORDER BY created_at DESC",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(documents))
}

#[post("")]
pub async fn create_document(
    pool: web::Data<PgPool>,
    document_data: web::Json<DocumentInput>,
) -> Result<impl Responder, AppError> {
    document_data.validate()?;

    let document = sqlx::query_as::<_, Document>(
        "INSERT INTO documents (title, file_url, doc_type, uploaded_by)
         VALUES ($1, $2, $3, $4)
         RETURNING id, title, file_url, doc_type, uploaded_by, created_at",
    )
    .bind(&document_data.title)
    .bind(&document_data.file_url)
    .bind(&document_data.doc_type)
    .bind(document_data.uploaded_by)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(document))
}

#[get("")]
pub async fn list_placement_events(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let events = sqlx::query_as::<_, PlacementEvent>(
        "SELECT id, title, company_name, event_date, venue, description, created_by, created_at
         FROM placement_events ORDER BY event_date DESC NULLS LAST",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(events))
}

#[post("")]
pub async fn create_placement_event(
    pool: web::Data<PgPool>,
    event_data: web::Json<PlacementEventInput>,
) -> Result<impl Responder, AppError> {
    event_data.validate()?;

    let event = sqlx::query_as::<_, PlacementEvent>(
        "INSERT INTO placement_events (title, company_name, event_date, venue, description, created_by)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, title, company_name, event_date, venue, description, created_by, created_at",
    )
    .bind(&event_data.title)
    .bind(&event_data.company_name)
    .bind(event_data.event_date)
    .bind(&event_data.venue)
    .bind(&event_data.description)
    .bind(event_data.created_by)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(event))
}
