use std::sync::Arc;

use crate::{
    client::UserDirectory,
    config::{Config, Storage},
    db::{Store, memory::MemoryStore, postgres::PostgresStore},
    error::Error,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub users: UserDirectory,
    pub config: Config,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn init(config: Config) -> Result<Self, Error> {
        let store: Arc<dyn Store> = match config.application.storage {
            Storage::Postgres => {
                let store = PostgresStore::connect_lazy(&config.database);
                if config.application.run_migration {
                    store.migrate().await?;
                }
                Arc::new(store)
            }
            Storage::Memory => {
                tracing::warn!("Using in-memory storage, data is lost on shutdown");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Self {
        let users = UserDirectory::new(config.user_service.base_url.clone());

        AppState {
            store,
            users,
            config,
        }
    }
}
