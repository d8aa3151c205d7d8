use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on rows pulled from each catalog per search.
    pub scan_limit: i64,
    /// Edit-distance tolerance of the fuzzy matcher.
    pub fuzzy_max_distance: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub app_host: String,
    pub app_port: u16,
    pub search: SearchConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let app_host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let app_port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);
        let search = SearchConfig {
            scan_limit: std::env::var("SEARCH_SCAN_LIMIT")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(1000),
            fuzzy_max_distance: std::env::var("FUZZY_MAX_DISTANCE")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(2),
        };
        Ok(Self {
            database_url,
            app_host,
            app_port,
            search,
        })
    }
}
