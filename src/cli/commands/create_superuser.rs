use anyhow::{Context, Result};
use model::entities::account;
use sea_orm::Database;
use tracing::{debug, info};

/// Create a staff superuser account.
pub async fn create_superuser(database_url: &str, email: &str, password: &str) -> Result<()> {
    debug!("Database URL: {}", database_url);
    let db = Database::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database '{}'", database_url))?;

    let account_model = account::create_super_account(&db, Some(email), Some(password))
        .await
        .with_context(|| format!("Failed to create superuser '{}'", email))?;

    info!(
        "Superuser {} created with ID: {}",
        account_model.email, account_model.id
    );
    Ok(())
}
