use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, get, post, put, web};
use tracing::info;
use uuid::Uuid;

use crate::application::{PgAccountService, PgSocialService};
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::uploads::store_upload;
use crate::presentation::dto::{
    ListUsersQuery, ProfileResponse, ProfileViewResponse, UpdateProfileRequest, UpdateUserRequest,
    UploadPhotoResponse, UploadProfileIconResponse, UserResponse, UserSummaryResponse,
};
use crate::presentation::handlers::request_id;

#[get("/user-profile/{id}")]
pub(crate) async fn get_profile(
    service: web::Data<PgAccountService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let (user, profile) = service.get_profile_view(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProfileViewResponse::from_parts(user, profile)))
}

#[put("/user-profile/{id}")]
pub(crate) async fn update_profile(
    req: HttpRequest,
    service: web::Data<PgAccountService>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, DomainError> {
    let user_id = path.into_inner();
    let profile = service
        .update_profile(user_id, payload.into_inner().into())
        .await?;

    info!(request_id = %request_id(&req), user_id = %user_id, "profile updated");

    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

#[put("/user/{id}")]
pub(crate) async fn update_user(
    req: HttpRequest,
    service: web::Data<PgAccountService>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let user_id = path.into_inner();
    let user = service
        .update_account(user_id, payload.into_inner().into())
        .await?;

    info!(request_id = %request_id(&req), user_id = %user_id, "account updated");

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[post("/user-profile/{id}/upload-photo")]
pub(crate) async fn upload_photo(
    req: HttpRequest,
    service: web::Data<PgAccountService>,
    config: web::Data<AppConfig>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, DomainError> {
    let user_id = path.into_inner();
    let photo_url = store_upload(payload, "photo", &config.upload_dir).await?;
    let profile = service.add_photo(user_id, photo_url.clone()).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user_id,
        photo_url = %photo_url,
        "photo uploaded"
    );

    Ok(HttpResponse::Ok().json(UploadPhotoResponse {
        photo_url,
        photos: profile.photos,
    }))
}

#[post("/user-profile/{id}/upload-profile-icon")]
pub(crate) async fn upload_profile_icon(
    req: HttpRequest,
    service: web::Data<PgAccountService>,
    config: web::Data<AppConfig>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> Result<HttpResponse, DomainError> {
    let user_id = path.into_inner();
    let icon_url = store_upload(payload, "profileIcon", &config.upload_dir).await?;
    let profile = service.set_profile_icon(user_id, icon_url).await?;

    info!(request_id = %request_id(&req), user_id = %user_id, "profile icon uploaded");

    Ok(HttpResponse::Ok().json(UploadProfileIconResponse {
        profile_icon_url: profile.profile_icon.unwrap_or_default(),
    }))
}

#[get("/users")]
pub(crate) async fn list_users(
    service: web::Data<PgSocialService>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, DomainError> {
    let users = service.list_users(query.current_user_id).await?;
    let response: Vec<UserSummaryResponse> =
        users.into_iter().map(UserSummaryResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}
