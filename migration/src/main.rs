//! Standalone migration CLI (`migration up`, `migration down`, `migration status`).
//!
//! The API server applies pending migrations on startup, so this is only
//! needed for manual rollbacks or inspecting the schema state.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(migration::Migrator).await;
}
