use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::application::PgSocialService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{LikeRequest, LikeResponse, ReceivedLikeResponse, UnlikeQuery};
use crate::presentation::handlers::request_id;

#[post("/like/{user_id}")]
pub(crate) async fn like(
    req: HttpRequest,
    service: web::Data<PgSocialService>,
    path: web::Path<Uuid>,
    payload: web::Json<LikeRequest>,
) -> Result<HttpResponse, DomainError> {
    let liked_id = path.into_inner();
    let like = service.like(payload.liker_id, liked_id).await?;

    info!(
        request_id = %request_id(&req),
        liker_id = %like.liker_id,
        liked_id = %like.liked_id,
        "user liked"
    );

    Ok(HttpResponse::Created().json(LikeResponse::from(like)))
}

#[delete("/like/{user_id}")]
pub(crate) async fn unlike(
    req: HttpRequest,
    service: web::Data<PgSocialService>,
    path: web::Path<Uuid>,
    query: web::Query<UnlikeQuery>,
) -> Result<HttpResponse, DomainError> {
    let liked_id = path.into_inner();
    service.unlike(query.liker_id, liked_id).await?;

    info!(
        request_id = %request_id(&req),
        liker_id = %query.liker_id,
        liked_id = %liked_id,
        "user unliked"
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "user unliked" })))
}

#[get("/likes/{user_id}")]
pub(crate) async fn list_likes(
    service: web::Data<PgSocialService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let likes = service.list_likes_received(path.into_inner()).await?;
    let response: Vec<ReceivedLikeResponse> =
        likes.into_iter().map(ReceivedLikeResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}
