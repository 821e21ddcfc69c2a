use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use rust_learning_platform::config::{AppConfig, CorsConfig};
use rust_learning_platform::middlewares::require_session::SESSION_HEADER;
use rust_learning_platform::routes;
use rust_learning_platform::runtime::lifetime;

fn build_cors(cors: &CorsConfig) -> Cors {
    let mut builder = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allowed_header(SESSION_HEADER)
        .max_age(cors.max_age);

    for origin in &cors.allowed_origins {
        builder = if origin == "*" {
            builder.allow_any_origin()
        } else {
            builder.allowed_origin(origin)
        };
    }
    builder
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // 记录程序启动时间
    let app_start_time = chrono::Utc::now();

    // 启动前预处理 //

    // 初始化配置
    setup_panic!();
    AppConfig::init().map_err(std::io::Error::other)?;
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);

    if config.is_development() {
        let tracing_format = tracing_subscriber::fmt::format()
            .with_level(true)
            .with_ansi(true);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking_writer)
            .event_format(tracing_format)
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking_writer)
            .json()
            .flatten_event(true)
            .init();
    }

    // 打印信息
    warn!(
        "Starting pre-startup processing...
        Project: {}
        Version: {}
        System: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.system_name
    );

    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(startup.state.clone());

    // 输出预处理时间
    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time)
            .num_milliseconds()
    );

    // 预处理完成 //

    warn!("Using {} CPU cores for the server", config.server.workers);

    let bind_address = config.server_bind_address();
    warn!("Starting server at http://{}", bind_address);

    // Start the HTTP server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config.cors))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .add(("X-Content-Type-Options", "nosniff")),
            )
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            )) // 设置最大请求体大小
            .app_data(routes::json_config(
                config.server.limits.max_payload_size,
            )) // 设置JSON请求体大小与错误处理器
            .configure(routes::configure_app) // 配置全部路由
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    )) // 启用长连接
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    )) // 请求超时
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    )) // 断连超时
    .workers(config.server.workers)
    .disable_signals()
    .bind(bind_address)?
    .run();

    let handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    lifetime::shutdown::listen_for_shutdown().await;

    handle.stop(true).await;
    lifetime::shutdown::stop_background_tasks(startup.shutdown_tx, startup.dispatcher).await;

    match server_task.await {
        Ok(result) => result?,
        Err(e) => warn!("Server task ended abnormally: {}", e),
    }

    warn!("Graceful shutdown: all tasks completed");
    Ok(())
}
