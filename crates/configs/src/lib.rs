use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Which of the three record services a process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Videos,
    Tasks,
    Cafes,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Videos => "videos",
            ServiceKind::Tasks => "tasks",
            ServiceKind::Cafes => "cafes",
        }
    }

    fn env_prefix(self) -> &'static str {
        match self {
            ServiceKind::Videos => "VIDEOS",
            ServiceKind::Tasks => "TASKS",
            ServiceKind::Cafes => "CAFES",
        }
    }

    fn default_port(self) -> u16 {
        match self {
            ServiceKind::Videos => 5001,
            ServiceKind::Tasks => 5002,
            ServiceKind::Cafes => 5003,
        }
    }

    fn default_database_url(self) -> &'static str {
        match self {
            ServiceKind::Videos => "sqlite://videos.db?mode=rwc",
            ServiceKind::Tasks => "sqlite://todo.db?mode=rwc",
            ServiceKind::Cafes => "sqlite://cafes.db?mode=rwc",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub videos: ServiceConfig,
    #[serde(default)]
    pub tasks: ServiceConfig,
    #[serde(default)]
    pub cafes: CafeConfig,
}

/// Empty by default; `normalize` fills host and worker threads from
/// `SERVER_HOST` / `TOKIO_WORKER_THREADS`, then from built-in defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

/// Connection pool settings shared by every service.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Per-service listener and store address.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CafeConfig {
    #[serde(flatten)]
    pub service: ServiceConfig,
    /// Shared secret required by the cafe delete route.
    #[serde(default)]
    pub api_key: String,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file is absent, then fill gaps from the environment and validate the
    /// sections `kind` needs.
    pub fn load_for(kind: ServiceKind) -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate(kind, |key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn normalize_and_validate<F>(&mut self, kind: ServiceKind, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 归一化 server
        self.server.normalize(&env)?;
        self.database.validate()?;
        // 各服务端口与数据库 URL 支持从环境变量填充
        for k in [ServiceKind::Videos, ServiceKind::Tasks, ServiceKind::Cafes] {
            self.service_mut(k).normalize_from_env(k, &env);
        }
        if self.cafes.api_key.trim().is_empty() {
            if let Some(key) = env("CAFES_API_KEY") {
                self.cafes.api_key = key;
            }
        }
        self.service(kind).validate(kind)?;
        if kind == ServiceKind::Cafes && self.cafes.api_key.trim().is_empty() {
            return Err(anyhow!("cafes.api_key is empty; set it in config.toml or CAFES_API_KEY"));
        }
        Ok(())
    }

    pub fn service(&self, kind: ServiceKind) -> &ServiceConfig {
        match kind {
            ServiceKind::Videos => &self.videos,
            ServiceKind::Tasks => &self.tasks,
            ServiceKind::Cafes => &self.cafes.service,
        }
    }

    fn service_mut(&mut self, kind: ServiceKind) -> &mut ServiceConfig {
        match kind {
            ServiceKind::Videos => &mut self.videos,
            ServiceKind::Tasks => &mut self.tasks,
            ServiceKind::Cafes => &mut self.cafes.service,
        }
    }

    /// `host:port` for the given service; call after normalization.
    pub fn bind_addr(&self, kind: ServiceKind) -> String {
        let port = self.service(kind).port.unwrap_or_else(|| kind.default_port());
        format!("{}:{}", self.server.host, port)
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize<F: Fn(&str) -> Option<String>>(&mut self, env: &F) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => {
                self.worker_threads = env("TOKIO_WORKER_THREADS")
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|w| *w > 0)
                    .or(Some(4));
            }
        }
        Ok(())
    }
}

impl ServiceConfig {
    fn normalize_from_env<F: Fn(&str) -> Option<String>>(&mut self, kind: ServiceKind, env: &F) {
        let prefix = kind.env_prefix();
        if self.port.is_none() {
            self.port = Some(
                env(&format!("{prefix}_PORT"))
                    .and_then(|p| p.parse::<u16>().ok())
                    .unwrap_or_else(|| kind.default_port()),
            );
        }
        if self.database_url.trim().is_empty() {
            self.database_url = env(&format!("{prefix}_DATABASE_URL"))
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| kind.default_database_url().to_string());
        }
    }

    fn validate(&self, kind: ServiceKind) -> Result<()> {
        let name = kind.name();
        if self.port == Some(0) {
            return Err(anyhow!("{name}.port must be within 1..=65535"));
        }
        let lower = self.database_url.to_lowercase();
        if lower.trim().is_empty() {
            return Err(anyhow!("{name}.database_url is empty"));
        }
        if !(lower.starts_with("sqlite:")
            || lower.starts_with("postgresql://")
            || lower.starts_with("postgres://"))
        {
            return Err(anyhow!("{name}.database_url must start with sqlite:, postgres:// or postgresql://"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_fill_every_service() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate(ServiceKind::Videos, env_from(&[])).unwrap();
        assert_eq!(cfg.bind_addr(ServiceKind::Videos), "127.0.0.1:5001");
        assert_eq!(cfg.bind_addr(ServiceKind::Tasks), "127.0.0.1:5002");
        assert_eq!(cfg.tasks.database_url, "sqlite://todo.db?mode=rwc");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn cafes_require_api_key() {
        let mut cfg = AppConfig::default();
        let err = cfg.normalize_and_validate(ServiceKind::Cafes, env_from(&[])).unwrap_err();
        assert!(err.to_string().contains("api_key"));

        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate(ServiceKind::Cafes, env_from(&[("CAFES_API_KEY", "s3cret")]))
            .unwrap();
        assert_eq!(cfg.cafes.api_key, "s3cret");
    }

    #[test]
    fn toml_sections_override_defaults() {
        let mut cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"

            [cafes]
            port = 7000
            database_url = "sqlite::memory:"
            api_key = "topsecret"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate(ServiceKind::Cafes, env_from(&[("CAFES_PORT", "9999")]))
            .unwrap();
        assert_eq!(cfg.bind_addr(ServiceKind::Cafes), "0.0.0.0:7000");
        assert_eq!(cfg.cafes.service.database_url, "sqlite::memory:");
        assert_eq!(cfg.cafes.api_key, "topsecret");
    }

    #[test]
    fn env_fills_missing_values() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate(
            ServiceKind::Videos,
            env_from(&[("VIDEOS_PORT", "8088"), ("VIDEOS_DATABASE_URL", "postgres://u:p@db/videos")]),
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(ServiceKind::Videos), "127.0.0.1:8088");
        assert_eq!(cfg.videos.database_url, "postgres://u:p@db/videos");
    }

    #[test]
    fn env_fills_server_section_without_config_file() {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate(
            ServiceKind::Videos,
            env_from(&[("SERVER_HOST", "0.0.0.0"), ("TOKIO_WORKER_THREADS", "8")]),
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.worker_threads, Some(8));
        assert_eq!(cfg.bind_addr(ServiceKind::Videos), "0.0.0.0:5001");

        // 文件中的值优先于环境变量
        let mut cfg = parse("[server]\nhost = \"10.0.0.1\"\nworker_threads = 2\n").unwrap();
        cfg.normalize_and_validate(
            ServiceKind::Videos,
            env_from(&[("SERVER_HOST", "0.0.0.0"), ("TOKIO_WORKER_THREADS", "8")]),
        )
        .unwrap();
        assert_eq!(cfg.server.host, "10.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(2));

        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate(ServiceKind::Videos, env_from(&[("TOKIO_WORKER_THREADS", "zero")]))
            .unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = parse("[tasks]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate(ServiceKind::Tasks, env_from(&[])).is_err());

        let mut cfg = parse("[tasks]\ndatabase_url = \"mysql://localhost/todo\"\n").unwrap();
        assert!(cfg.normalize_and_validate(ServiceKind::Tasks, env_from(&[])).is_err());

        let mut cfg = parse("[database]\nmin_connections = 4\nmax_connections = 2\n").unwrap();
        assert!(cfg.normalize_and_validate(ServiceKind::Tasks, env_from(&[])).is_err());
    }
}
