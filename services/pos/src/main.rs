//! POS Service - 校园咖啡销售点服务入口

use std::sync::Arc;

use campus_bootstrap::{Infrastructure, run_http_server};
use pos_service::api;
use pos_service::application::PosService;
use pos_service::infrastructure::osm::OsmApiClient;
use pos_service::infrastructure::persistence::{PostgresPosRepository, migrations};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    run_http_server(&config_dir, |infra: Arc<Infrastructure>| async move {
        info!("Initializing POS Service...");

        infra.run_migrations(&migrations()).await?;

        let config = infra.config();
        let repository = Arc::new(PostgresPosRepository::new(infra.postgres_pool()));
        let osm_fetcher = Arc::new(OsmApiClient::new(&config.osm)?);
        info!(base_url = %config.osm.base_url, "OSM client initialized");

        let service = Arc::new(PosService::new(repository, osm_fetcher));

        if config.server.enable_admin_routes {
            info!("Admin routes enabled");
        }

        Ok(api::router(service, config.server.enable_admin_routes))
    })
    .await
}
