//! # travel-ar 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성과 마이그레이션
//! 4. 앱 상태(AppState)와 라우터 조립
//! 5. HTTP 서버 시작 (Ctrl+C / SIGTERM 시 정상 종료)

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travel_ar::{build_app, config::Config, db, routes::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG가 없으면 travel_ar, tower_http, axum을 debug 레벨로
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_ar=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting travel-ar server on {}:{}", config.host, config.port);

    // ── 4단계: 데이터베이스 ──
    // 기본 연결 문자열은 data/ 아래 파일이므로 디렉토리를 먼저 만듭니다.
    if config.database_url.contains("data/") && !Path::new("data").exists() {
        tokio::fs::create_dir_all("data").await?;
        tracing::info!("Created data directory");
    }

    let pool = db::connect(&config.database_url).await?;

    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    // ── 5단계: 앱 상태와 라우터 ──
    let state = AppState::new(pool, &config)?;
    if state.oauth_client.is_none() {
        tracing::warn!("Google OAuth credentials not set, redirect login disabled");
    }
    let app = build_app(state, Some(&config.frontend_dist));

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ctrl+C 또는 (유닉스에서) SIGTERM을 기다립니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
