use anyhow::Result;
use config::{Config, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::photo::MediaStorage;
use crate::schemas::AppState;

const CONFIG_FILE: &str = "skillfolio";
const DEFAULT_DATABASE_URL: &str = "sqlite://skillfolio.db?mode=rwc";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MEDIA_ROOT: &str = "media";

/// Runtime settings.
///
/// Sources, lowest priority first: built-in defaults, an optional
/// `skillfolio.toml`, then `DATABASE_URL`, `BIND_ADDRESS` and `MEDIA_ROOT`
/// from the environment (a `.env` file is loaded first).
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub media_root: PathBuf,
}

impl Settings {
    /// Load settings from every configured source.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("media_root", DEFAULT_MEDIA_ROOT)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::default())
            .build()?
            .try_deserialize::<Settings>()?;

        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Replace loaded values with the ones given on the command line.
    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        bind_address: Option<String>,
        media_root: Option<PathBuf>,
    ) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        if let Some(media_root) = media_root {
            self.media_root = media_root;
        }
        self
    }
}

/// Connect to the database and build the shared application state.
pub async fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    info!("Connecting to database: {}", settings.database_url);
    let db = Database::connect(&settings.database_url).await?;

    let media = MediaStorage::new(&settings.media_root);
    info!("Storing uploaded media under {}", settings.media_root.display());

    Ok(AppState { db, media })
}
