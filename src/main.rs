use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use blog_service::handlers;
use blog_service::views::Templates;
use blog_service::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("failed to create database pool")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    tracing::info!("Connected to database, schema is up to date");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let pool_data = web::Data::new(pool);
    let templates = web::Data::new(Templates::new());

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(templates.clone())
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_summary))
            .service(
                web::scope("/posts")
                    .service(web::resource("").route(web::get().to(handlers::list_posts)))
                    .service(web::resource("/post").route(web::post().to(handlers::create_post)))
                    .service(
                        web::resource("/post/{id}")
                            .route(web::get().to(handlers::get_post))
                            .route(web::post().to(handlers::update_post))
                            .route(web::delete().to(handlers::delete_post)),
                    )
                    .service(
                        web::resource("/post/{id}/image").route(web::get().to(handlers::get_image)),
                    )
                    .service(
                        web::resource("/post/{id}/like").route(web::post().to(handlers::like_post)),
                    ),
            )
            .service(
                web::scope("/commentaries")
                    .service(
                        web::resource("/commentary")
                            .route(web::post().to(handlers::create_comment)),
                    )
                    .service(
                        web::resource("/commentary/{id}")
                            .route(web::put().to(handlers::update_comment))
                            .route(web::delete().to(handlers::delete_comment)),
                    ),
            )
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?
    .run()
    .await
    .context("HTTP server terminated with error")
}
