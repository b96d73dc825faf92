use crate::{
    auth::{hash_password, verify_password},
    error::AppError,
    models::community::{
        Community, CommunityAdminInput, CommunityInput, CommunityPost, CommunityPostInput,
        JoinCommunityInput,
    },
    models::Profile,
    policy::{self, Action, Resource},
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

// The join-password hash never leaves the database.
const COMMUNITY_COLUMNS: &str =
    "id, name, description, category, cover_image, created_by, created_at";

/// List all communities, oldest first.
#[get("")]
pub async fn list_communities(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let communities = sqlx::query_as::<_, Community>(&format!(
        "SELECT {COMMUNITY_COLUMNS} FROM communities ORDER BY id ASC"
    ))
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(communities))
}

/// Create a community.
///
/// The join password is stored as a bcrypt hash and the creator is enrolled
/// as the first member in the same transaction.
#[post("")]
pub async fn create_community(
    pool: web::Data<PgPool>,
    community_data: web::Json<CommunityInput>,
) -> Result<impl Responder, AppError> {
    community_data.validate()?;

    // 404s cleanly when the creator id names no profile
    policy::load_actor(&pool, community_data.created_by).await?;

    let password_hash = hash_password(&community_data.password)?;

    let mut tx = pool.begin().await?;

    // The unique index on the name is the duplicate check; a racing second
    // create surfaces here as the same 400.
    let community = sqlx::query_as::<_, Community>(&format!(
        "INSERT INTO communities (name, description, category, password, cover_image, created_by)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {COMMUNITY_COLUMNS}"
    ))
    .bind(&community_data.name)
    .bind(&community_data.description)
    .bind(&community_data.category)
    .bind(&password_hash)
    .bind(&community_data.cover_image)
    .bind(community_data.created_by)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| AppError::duplicate_key(e, "Community already exists"))?;

    sqlx::query("INSERT INTO community_members (community_id, user_id) VALUES ($1, $2)")
        .bind(community.id)
        .bind(community_data.created_by)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(HttpResponse::Created().json(community))
}

/// Join a community by password.
///
/// The membership insert is conflict-aware, so two concurrent joins for the
/// same (community, user) pair resolve to exactly one success.
#[post("/{id}/join")]
pub async fn join_community(
    pool: web::Data<PgPool>,
    community_id: web::Path<i32>,
    join_data: web::Json<JoinCommunityInput>,
) -> Result<impl Responder, AppError> {
    join_data.validate()?;
    let community_id = community_id.into_inner();

    policy::load_actor(&pool, join_data.user_id).await?;

    let stored = sqlx::query_as::<_, (Option<String>,)>(
        "SELECT password FROM communities WHERE id = $1",
    )
    .bind(community_id)
    .fetch_optional(&**pool)
    .await?;

    let password_hash = match stored {
        Some((hash,)) => hash,
        None => return Err(AppError::NotFound("Community not found".into())),
    };

    let verified = match password_hash {
        Some(hash) => verify_password(&join_data.password, &hash)?,
        // Legacy rows created before join passwords existed are not joinable.
        None => false,
    };
    if !verified {
        return Err(AppError::BadRequest("Incorrect community password".into()));
    }

    let result = sqlx::query(
        "INSERT INTO community_members (community_id, user_id) VALUES ($1, $2)
         ON CONFLICT (community_id, user_id) DO NOTHING",
    )
    .bind(community_id)
    .bind(join_data.user_id)
    .execute(&**pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::BadRequest("Already a member".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Joined community successfully" })))
}

/// List a community's members (public profile fields), in join order.
#[get("/{id}/members")]
pub async fn list_members(
    pool: web::Data<PgPool>,
    community_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let community_id = community_id.into_inner();
    ensure_community_exists(&pool, community_id).await?;

    let members = sqlx::query_as::<_, Profile>(
        "SELECT p.id, p.name, p.email, p.role, p.college, p.pass_out_year,
                p.department, p.phone, p.created_at
         FROM community_members m
         JOIN profile p ON p.id = m.user_id
         WHERE m.community_id = $1
         ORDER BY m.joined_at ASC",
    )
    .bind(community_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(members))
}

/// Report whether a user belongs to a community.
#[get("/{id}/membership/{user_id}")]
pub async fn check_membership(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, AppError> {
    let (community_id, user_id) = path.into_inner();

    let is_member = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM community_members WHERE community_id = $1 AND user_id = $2)",
    )
    .bind(community_id)
    .bind(user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "is_member": is_member })))
}

/// List a community's posts, newest first.
#[get("/{id}/posts")]
pub async fn list_posts(
    pool: web::Data<PgPool>,
    community_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let community_id = community_id.into_inner();
    ensure_community_exists(&pool, community_id).await?;

    let posts = sqlx::query_as::<_, CommunityPost>(
        "SELECT id, community_id, user_id, content, post_type, created_at
         FROM community_posts WHERE community_id = $1
         ORDER BY created_at DESC",
    )
    .bind(community_id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post. The author must already be a member (403 otherwise).
#[post("/{id}/posts")]
pub async fn create_post(
    pool: web::Data<PgPool>,
    community_id: web::Path<i32>,
    post_data: web::Json<CommunityPostInput>,
) -> Result<impl Responder, AppError> {
    post_data.validate()?;
    let community_id = community_id.into_inner();
    ensure_community_exists(&pool, community_id).await?;

    let is_member = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM community_members WHERE community_id = $1 AND user_id = $2)",
    )
    .bind(community_id)
    .bind(post_data.user_id)
    .fetch_one(&**pool)
    .await?;

    if !is_member {
        return Err(AppError::Forbidden(
            "You must join the community before posting".into(),
        ));
    }

    let post = sqlx::query_as::<_, CommunityPost>(
        "INSERT INTO community_posts (community_id, user_id, content, post_type)
         VALUES ($1, $2, $3, $4)
         RETURNING id, community_id, user_id, content, post_type, created_at",
    )
    .bind(community_id)
    .bind(post_data.user_id)
    .bind(&post_data.content)
    .bind(post_data.post_type.as_deref().unwrap_or("discussion"))
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Delete a community. Creator or admin only; members and posts go with it
/// through the cascading foreign keys.
#[delete("/{id}")]
pub async fn delete_community(
    pool: web::Data<PgPool>,
    community_id: web::Path<i32>,
    admin_data: web::Json<CommunityAdminInput>,
) -> Result<impl Responder, AppError> {
    let community_id = community_id.into_inner();

    let created_by = fetch_creator(&pool, community_id).await?;
    let actor = policy::load_actor(&pool, admin_data.requester_id).await?;
    policy::authorize(
        &actor,
        Action::DeleteCommunity,
        &Resource::Community { created_by },
    )?;

    sqlx::query("DELETE FROM communities WHERE id = $1")
        .bind(community_id)
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Community deleted" })))
}

/// Remove a member from a community. Creator or admin only.
#[delete("/{id}/members/{user_id}")]
pub async fn remove_member(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
    admin_data: web::Json<CommunityAdminInput>,
) -> Result<impl Responder, AppError> {
    let (community_id, user_id) = path.into_inner();

    let created_by = fetch_creator(&pool, community_id).await?;
    let actor = policy::load_actor(&pool, admin_data.requester_id).await?;
    policy::authorize(
        &actor,
        Action::RemoveMember,
        &Resource::Community { created_by },
    )?;

    let result =
        sqlx::query("DELETE FROM community_members WHERE community_id = $1 AND user_id = $2")
            .bind(community_id)
            .bind(user_id)
            .execute(&**pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Membership not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Member removed" })))
}

async fn ensure_community_exists(pool: &PgPool, community_id: i32) -> Result<(), AppError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM communities WHERE id = $1)",
    )
    .bind(community_id)
    .fetch_one(pool)
    .await?;

    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound("Community not found".into()))
    }
}

async fn fetch_creator(pool: &PgPool, community_id: i32) -> Result<Option<i32>, AppError> {
    let row = sqlx::query_as::<_, (Option<i32>,)>(
        "SELECT created_by FROM communities WHERE id = $1",
    )
    .bind(community_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some((created_by,)) => Ok(created_by),
        None => Err(AppError::NotFound("Community not found".into())),
    }
}
