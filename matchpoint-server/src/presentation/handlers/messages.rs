use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;
use uuid::Uuid;

use crate::application::PgMessagingService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    ConversationResponse, ConversationsQuery, MessageResponse, SendMessageRequest, ThreadQuery,
};
use crate::presentation::handlers::request_id;

#[post("/messages")]
pub(crate) async fn send_message(
    req: HttpRequest,
    service: web::Data<PgMessagingService>,
    payload: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, DomainError> {
    let payload = payload.into_inner();
    let sent = service
        .send_message(payload.sender_id, payload.recipient_id, payload.content)
        .await?;

    info!(
        request_id = %request_id(&req),
        message_id = %sent.message.id,
        sender_id = %sent.message.sender_id,
        recipient_id = %sent.message.recipient_id,
        "message sent"
    );

    Ok(HttpResponse::Created().json(MessageResponse::from(sent)))
}

#[get("/messages/{user_id}")]
pub(crate) async fn list_messages(
    service: web::Data<PgMessagingService>,
    path: web::Path<Uuid>,
    query: web::Query<ThreadQuery>,
) -> Result<HttpResponse, DomainError> {
    let thread = service
        .list_messages(path.into_inner(), query.current_user_id)
        .await?;
    let response: Vec<MessageResponse> =
        thread.into_iter().map(MessageResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

#[get("/conversations")]
pub(crate) async fn list_conversations(
    service: web::Data<PgMessagingService>,
    query: web::Query<ConversationsQuery>,
) -> Result<HttpResponse, DomainError> {
    let conversations = service.list_conversations(query.user_id).await?;
    let response: Vec<ConversationResponse> = conversations
        .into_iter()
        .map(ConversationResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(response))
}
