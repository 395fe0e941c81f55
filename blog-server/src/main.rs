use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use data::repositories::memory::seed::demo_tables;
use data::repositories::memory::store::MemoryStore;
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::password::PasswordService;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let passwords = PasswordService::new(settings.argon2_memory_kib, settings.argon2_iterations)?;
    let store = if settings.seed_demo_data {
        let hash = passwords.hash(&settings.seed_user_password)?;
        info!("seeding demo data");
        MemoryStore::with_tables(demo_tables(Utc::now(), &hash))
    } else {
        MemoryStore::new()
    };

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));
    let state = AppState::new(store, jwt, passwords, settings.max_image_bytes);

    server::run_http(&settings, state).await
}
