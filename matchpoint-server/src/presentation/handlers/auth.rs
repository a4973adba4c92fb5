use actix_web::{HttpRequest, HttpResponse, post, web};
use tracing::info;

use crate::application::PgAccountService;
use crate::domain::error::DomainError;
use crate::infrastructure::security::TOKEN_TTL_SECS;
use crate::presentation::dto::{AuthResponse, LoginRequest, SignupRequest};
use crate::presentation::handlers::request_id;

#[post("/signup")]
pub(crate) async fn signup(
    req: HttpRequest,
    service: web::Data<PgAccountService>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, DomainError> {
    let payload = payload.into_inner();
    let user = service
        .create_account(
            payload.email,
            payload.password,
            payload.first_name,
            payload.gender,
            payload.birthday,
        )
        .await?;
    let token = service.issue_token(&user)?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        email = %user.email,
        "user signed up"
    );

    Ok(HttpResponse::Created().json(AuthResponse {
        id: user.id,
        email: user.email,
        access_token: token,
        expires_in: TOKEN_TTL_SECS,
        token_type: "Bearer".to_string(),
    }))
}

#[post("/login")]
pub(crate) async fn login(
    req: HttpRequest,
    service: web::Data<PgAccountService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let user = service
        .authenticate(&payload.email, &payload.password)
        .await?;
    let token = service.issue_token(&user)?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user logged in"
    );

    Ok(HttpResponse::Ok().json(AuthResponse {
        id: user.id,
        email: user.email,
        access_token: token,
        expires_in: TOKEN_TTL_SECS,
        token_type: "Bearer".to_string(),
    }))
}
