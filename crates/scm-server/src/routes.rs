use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, Utc};
use scm_calc::{DemandForecaster, InventoryOptimizer, SupplierRanker};
use scm_core::{
    ForecastMethod, ForecastPoint, InventoryProfile, OptimizationInput, Priority, ScmError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::erp_mock::{ErpInventoryPosition, ErpMock, ErpProduct, ErpSupplier, SalesRecord};

const SERVICE_VERSION: &str = "1.0.0";

const REQUIRED_OPTIMIZE_FIELDS: [&str; 4] =
    ["item_id", "annual_demand", "ordering_cost", "holding_cost"];

const ENDPOINTS: [&str; 12] = [
    "GET /api/health",
    "GET /api/suppliers?priority=cost|quality|delivery|balanced",
    "POST /api/inventory/optimize",
    "GET /api/inventory/status?item_id=&current_stock=",
    "GET /api/inventory/profiles",
    "GET /api/forecast?method=moving_average|seasonal&periods=",
    "GET /api/erp/suppliers",
    "GET /api/erp/products",
    "GET /api/erp/inventory",
    "GET /api/erp/sales/{days}",
    "GET /api/erp/health",
    "GET /",
];

/// 共享狀態：三個計算元件各自以互斥鎖保護
#[derive(Clone)]
pub struct AppState {
    optimizer: Arc<Mutex<InventoryOptimizer>>,
    ranker: Arc<Mutex<SupplierRanker>>,
    forecaster: Arc<Mutex<DemandForecaster>>,
    erp: Arc<ErpMock>,
}

impl AppState {
    pub fn new(
        optimizer: InventoryOptimizer,
        ranker: SupplierRanker,
        forecaster: DemandForecaster,
        erp: ErpMock,
    ) -> Self {
        Self {
            optimizer: Arc::new(Mutex::new(optimizer)),
            ranker: Arc::new(Mutex::new(ranker)),
            forecaster: Arc::new(Mutex::new(forecaster)),
            erp: Arc::new(erp),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/api/suppliers", get(list_suppliers))
        .route("/api/inventory/optimize", post(optimize_inventory))
        .route("/api/inventory/status", get(inventory_status))
        .route("/api/inventory/profiles", get(inventory_profiles))
        .route("/api/forecast", get(forecast))
        .route("/api/erp/suppliers", get(erp_suppliers))
        .route("/api/erp/products", get(erp_products))
        .route("/api/erp/inventory", get(erp_inventory))
        .route("/api/erp/sales/{days}", get(erp_sales))
        .route("/api/erp/health", get(erp_health))
        .with_state(state)
}

/// 以 `{"error": "..."}` 回應的錯誤
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }

    fn internal(err: impl Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ScmError> for ApiError {
    fn from(err: ScmError) -> Self {
        match err {
            ScmError::Validation(_) | ScmError::InvalidDate(_) => {
                warn!("拒絕請求: {}", err);
                Self::bad_request(err.to_string())
            }
            ScmError::DataLoad(_) => Self::unavailable(err.to_string()),
            ScmError::Calculation(_) => {
                error!("計算失敗: {}", err);
                Self::internal(err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn home() -> Json<Value> {
    Json(json!({
        "message": "Supply Chain Optimization System",
        "status": "running",
        "version": SERVICE_VERSION,
        "endpoints": ENDPOINTS,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "system": "Supply Chain Optimization",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SupplierQuery {
    priority: Option<String>,
}

async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<SupplierQuery>,
) -> Json<Value> {
    let priority = query
        .priority
        .as_deref()
        .map(Priority::parse_or_default)
        .unwrap_or_default();

    let ranked: Vec<Value> = state
        .ranker
        .lock()
        .await
        .evaluate(priority)
        .into_iter()
        .map(|score| {
            json!({
                "id": score.supplier_id,
                "score": score.score,
                "details": score.source_record,
            })
        })
        .collect();

    Json(json!({
        "priority": priority.as_str(),
        "ranked_suppliers": ranked,
    }))
}

async fn optimize_inventory(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let payload: Value =
        serde_json::from_slice(&body).map_err(|_| ApiError::bad_request("未提供 JSON 資料"))?;
    let Some(fields) = payload.as_object() else {
        return Err(ApiError::bad_request("未提供 JSON 資料"));
    };

    if let Some(missing) = REQUIRED_OPTIMIZE_FIELDS
        .iter()
        .find(|field| !fields.contains_key(**field))
    {
        return Err(ApiError::bad_request(format!("缺少必要欄位: {missing}")));
    }

    let input: OptimizationInput = serde_json::from_value(payload)
        .map_err(|err| ApiError::bad_request(format!("欄位格式錯誤: {err}")))?;

    let profile = state.optimizer.lock().await.optimize(input)?;
    info!(
        "物料 {} 優化完成：EOQ {}，ROP {}",
        profile.item_id, profile.optimal_order_quantity, profile.reorder_point
    );

    Ok(Json(json!({
        "status": "success",
        "optimization_result": profile,
    })))
}

/// 查詢參數先以字串接收，缺漏或格式錯誤時回應 JSON 錯誤
#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    item_id: Option<String>,
    current_stock: Option<String>,
}

impl StatusQuery {
    fn parse(self) -> Result<(String, i64), ApiError> {
        let item_id = self
            .item_id
            .ok_or_else(|| ApiError::bad_request("缺少必要欄位: item_id"))?;
        let current_stock = self
            .current_stock
            .ok_or_else(|| ApiError::bad_request("缺少必要欄位: current_stock"))?
            .trim()
            .parse::<i64>()
            .map_err(|err| ApiError::bad_request(format!("欄位格式錯誤: current_stock ({err})")))?;

        Ok((item_id, current_stock))
    }
}

async fn inventory_status(
    State(state): State<AppState>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query.map_err(|err| ApiError::bad_request(err.body_text()))?;
    let (item_id, current_stock) = query.parse()?;
    let status = state
        .optimizer
        .lock()
        .await
        .check_status(&item_id, current_stock);

    let mut body = serde_json::to_value(status).map_err(ApiError::internal)?;
    body["item_id"] = json!(item_id);
    body["message"] = json!(status.to_string());

    Ok(Json(body))
}

async fn inventory_profiles(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, InventoryProfile>> {
    let profiles = state.optimizer.lock().await.all_profiles();
    Json(profiles.into_iter().collect())
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    method: Option<String>,
    periods: Option<String>,
}

async fn forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<Value>, ApiError> {
    let method = query
        .method
        .as_deref()
        .map(ForecastMethod::parse_or_default)
        .unwrap_or_default();

    let forecaster = state.forecaster.lock().await;
    // 無法解析的期數視同未提供
    let requested = query
        .periods
        .as_deref()
        .and_then(|p| p.trim().parse::<usize>().ok());
    let periods = forecaster.config().clamp_periods(requested);

    let result = forecaster
        .forecast(method, periods)?
        .ok_or_else(|| ApiError::unavailable("尚未載入需求資料"))?;
    let points: Vec<ForecastPoint> = result.points().collect();

    Ok(Json(json!({
        "method": method.as_str(),
        "periods": periods,
        "forecast": points,
        "trend_analysis": forecaster.trend_analysis(),
    })))
}

async fn erp_suppliers(State(state): State<AppState>) -> Json<BTreeMap<String, ErpSupplier>> {
    Json(state.erp.suppliers.clone())
}

async fn erp_products(State(state): State<AppState>) -> Json<BTreeMap<String, ErpProduct>> {
    Json(state.erp.products.clone())
}

async fn erp_inventory(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, ErpInventoryPosition>> {
    Json(state.erp.inventory.clone())
}

async fn erp_sales(
    State(state): State<AppState>,
    Path(days): Path<u32>,
) -> Json<Vec<SalesRecord>> {
    Json(state.erp.sales_data(days, Local::now().date_naive()))
}

async fn erp_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": SERVICE_VERSION,
    }))
}
