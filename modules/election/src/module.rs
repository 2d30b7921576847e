use std::sync::Arc;

use axum::Router;
use db::DbHandle;
use sqlx::migrate::Migrator;
use tracing::info;

use crate::api::rest::routes;
use crate::domain::service::Service;
use crate::infra::storage::{seed, SqlxCandidatesRepository, SqlxPartiesRepository};

/// Schema for `parties` and `candidates`, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone, Copy, Default)]
pub struct ElectionOptions {
    /// Insert demo parties and candidates into empty tables.
    pub seed: bool,
}

/// The election module: owns the domain service and contributes the REST routes.
#[derive(Clone)]
pub struct Election {
    service: Arc<Service>,
}

impl Election {
    /// Migrate the schema, optionally seed, and wire repositories to the service.
    pub async fn init(db: &DbHandle, opts: ElectionOptions) -> anyhow::Result<Self> {
        info!("Running election database migrations");
        db.migrate(&MIGRATOR).await?;
        info!("Election database migrations completed successfully");

        if opts.seed {
            seed::seed_demo_data(db.pool()).await?;
        }

        let pool = db.pool().clone();
        let service = Service::new(
            Arc::new(SqlxCandidatesRepository::new(pool.clone())),
            Arc::new(SqlxPartiesRepository::new(pool)),
        );
        Ok(Self {
            service: Arc::new(service),
        })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering election REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
