use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the snapshot service; a trailing '/' is tolerated.
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Devices this installation may query. Selection-only, not enforced
    /// by the service.
    pub authorized_imeis: Vec<String>,
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Records per page request during full-history fetches.
    pub batch_size: u32,
    /// Ceiling on page requests per full-history fetch.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

fn default_max_pages() -> u32 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory the point-in-time export document is written to.
    pub dir: String,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.api.base_url.is_empty(), "api.base_url must be non-empty");
        anyhow::ensure!(
            !self.api.authorized_imeis.is_empty(),
            "api.authorized_imeis must list at least one device"
        );
        anyhow::ensure!(
            self.api.request_timeout_secs > 0,
            "api.request_timeout_secs must be > 0, got {}",
            self.api.request_timeout_secs
        );
        anyhow::ensure!(
            self.fetch.batch_size > 0,
            "fetch.batch_size must be > 0, got {}",
            self.fetch.batch_size
        );
        anyhow::ensure!(
            self.fetch.max_pages > 0,
            "fetch.max_pages must be > 0, got {}",
            self.fetch.max_pages
        );
        anyhow::ensure!(!self.export.dir.is_empty(), "export.dir must be non-empty");
        Ok(())
    }
}
