mod config;
mod erp_mock;
mod logging;
mod routes;

use anyhow::Result;
use scm_calc::{DemandForecaster, InventoryOptimizer, SupplierRanker};
use scm_core::{ForecastConfig, OptimizerConfig};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::erp_mock::ErpMock;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = ServerConfig::from_env()?;

    let mut forecaster = DemandForecaster::new(ForecastConfig::default());
    match forecaster.load_csv(&config.demand_data_path) {
        Ok(count) => info!(
            "已從 {} 載入 {} 筆需求資料",
            config.demand_data_path.display(),
            count
        ),
        Err(_) => warn!("需求資料未載入，預測端點暫不可用"),
    }

    let state = AppState::new(
        InventoryOptimizer::new(OptimizerConfig::default()),
        SupplierRanker::with_sample_suppliers(),
        forecaster,
        ErpMock::new(),
    );
    let router = routes::router(state);

    info!("供應鏈服務監聽於 {}", config.http_addr);
    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
