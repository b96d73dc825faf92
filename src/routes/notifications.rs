use crate::{
    error::AppError,
    models::notification::{Notification, NotificationInput},
    policy,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const NOTIFICATION_COLUMNS: &str = "id, user_id, title, message, is_read, created_at";

/// List a user's notifications, newest first.
#[get("/{user_id}")]
pub async fn list_notifications(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let notifications = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE user_id = $1
         ORDER BY created_at DESC"
    ))
    .bind(user_id.into_inner())
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(notifications))
}

/// Create a notification for a user.
#[post("")]
pub async fn create_notification(
    pool: web::Data<PgPool>,
    notification_data: web::Json<NotificationInput>,
) -> Result<impl Responder, AppError> {
    notification_data.validate()?;

    policy::load_actor(&pool, notification_data.user_id).await?;

    let notification = sqlx::query_as::<_, Notification>(&format!(
        "INSERT INTO notifications (user_id, title, message)
         VALUES ($1, $2, $3)
         RETURNING {NOTIFICATION_COLUMNS}"
    ))
    .bind(notification_data.user_id)
    .bind(&notification_data.title)
    .bind(&notification_data.message)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(notification))
}

/// Mark a notification as read and return the updated row.
#[put("/{id}/read")]
pub async fn mark_read(
    pool: web::Data<PgPool>,
    notification_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let notification = sqlx::query_as::<_, Notification>(&format!(
        "UPDATE notifications SET is_read = TRUE WHERE id = $1
         RETURNING {NOTIFICATION_COLUMNS}"
    ))
    .bind(notification_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match notification {
        Some(notification) => Ok(HttpResponse::Ok().json(notification)),
        None => Err(AppError::NotFound("Notification not found".into())),
    }
}
