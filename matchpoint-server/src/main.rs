mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer, web};
use application::account_service::AccountService;
use application::messaging_service::MessagingService;
use application::social_service::SocialService;
use data::like_repository::PostgresLikeRepository;
use data::message_repository::PostgresMessageRepository;
use data::profile_repository::PostgresProfileRepository;
use data::user_repository::PostgresUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::security::JwtKeys;
use presentation::handlers;
use presentation::middleware::{RequestIdMiddleware, TimingMiddleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let profile_repo = Arc::new(PostgresProfileRepository::new(pool.clone()));
    let like_repo = Arc::new(PostgresLikeRepository::new(pool.clone()));
    let message_repo = Arc::new(PostgresMessageRepository::new(pool.clone()));

    let account_service = AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&profile_repo),
        JwtKeys::new(config.jwt_secret.clone()),
    );
    let social_service = SocialService::new(
        like_repo,
        Arc::clone(&user_repo),
        Arc::clone(&profile_repo),
    );
    let messaging_service = MessagingService::new(message_repo, user_repo, profile_repo);

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::new(account_service.clone()))
            .app_data(web::Data::new(social_service.clone()))
            .app_data(web::Data::new(messaging_service.clone()))
            .service(actix_files::Files::new("/uploads", &config_data.upload_dir))
            .service(
                web::scope("/api")
                    .service(handlers::auth::signup)
                    .service(handlers::auth::login)
                    .service(handlers::users::get_profile)
                    .service(handlers::users::update_profile)
                    .service(handlers::users::update_user)
                    .service(handlers::users::upload_photo)
                    .service(handlers::users::upload_profile_icon)
                    .service(handlers::users::list_users)
                    .service(handlers::likes::like)
                    .service(handlers::likes::unlike)
                    .service(handlers::likes::list_likes)
                    .service(handlers::messages::send_message)
                    .service(handlers::messages::list_messages)
                    .service(handlers::messages::list_conversations),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    // a literal "*" means any origin; credentials are only allowed with an
    // explicit origin list
    if config.cors_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        cors = cors.supports_credentials();
        for origin in &config.cors_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
