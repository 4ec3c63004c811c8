use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DEMAND_DATA_PATH: &str = "data/sample_data.csv";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub http_addr: SocketAddr,
    pub demand_data_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr =
            std::env::var("HTTP_ADDR").unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string());
        let demand_data_path = std::env::var("DEMAND_DATA_PATH")
            .unwrap_or_else(|_| DEFAULT_DEMAND_DATA_PATH.to_string());

        Self::from_parts(&http_addr, &demand_data_path)
    }

    fn from_parts(http_addr: &str, demand_data_path: &str) -> Result<Self> {
        let http_addr = http_addr
            .parse()
            .with_context(|| format!("HTTP_ADDR 不是有效的位址: {http_addr}"))?;

        Ok(Self {
            http_addr,
            demand_data_path: PathBuf::from(demand_data_path),
        })
    }
}
