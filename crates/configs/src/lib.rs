use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where asset files and the settings map live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { assets_dir: default_assets_dir(), settings_path: default_settings_path() }
    }
}

fn default_assets_dir() -> String { "data/assets".into() }
fn default_settings_path() -> String { "data/settings.json".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_capacity: default_max_capacity(), ttl_secs: default_ttl_secs() }
    }
}

fn default_max_capacity() -> u64 { 1024 }
fn default_ttl_secs() -> u64 { 3600 }

/// One markdown section of the customize form.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionConfig {
    /// Empty means the section's default file, filled in by `normalize_and_validate`.
    #[serde(default)]
    pub file: String,
    /// Cache keys invalidated whenever the section is submitted.
    #[serde(default)]
    pub cache_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_about_us")]
    pub about_us: SectionConfig,
    #[serde(default = "default_custom_terms")]
    pub custom_terms: SectionConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { about_us: default_about_us(), custom_terms: default_custom_terms() }
    }
}

fn default_about_us() -> SectionConfig {
    SectionConfig {
        file: ABOUT_US_FILE.into(),
        cache_keys: vec!["content.about_us".into(), "content.about_us.exists".into()],
    }
}

fn default_custom_terms() -> SectionConfig {
    SectionConfig { file: CUSTOM_TERMS_FILE.into(), cache_keys: Vec::new() }
}

const ABOUT_US_FILE: &str = "about_us.md";
const CUSTOM_TERMS_FILE: &str = "custom_terms.md";

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
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.cache.normalize();
        self.content.about_us.normalize(ABOUT_US_FILE);
        self.content.custom_terms.normalize(CUSTOM_TERMS_FILE);
        self.content.about_us.validate("about_us")?;
        self.content.custom_terms.validate("custom_terms")?;
        if self.content.about_us.file == self.content.custom_terms.file {
            return Err(anyhow!("content sections must use distinct files"));
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.assets_dir.trim().is_empty() {
            return Err(anyhow!("storage.assets_dir is empty"));
        }
        if self.settings_path.trim().is_empty() {
            return Err(anyhow!("storage.settings_path is empty"));
        }
        Ok(())
    }
}

impl CacheConfig {
    fn normalize(&mut self) {
        if self.max_capacity == 0 {
            self.max_capacity = default_max_capacity();
        }
    }
}

impl SectionConfig {
    fn normalize(&mut self, default_file: &str) {
        let file = self.file.trim();
        self.file = if file.is_empty() { default_file.to_string() } else { file.to_string() };
    }

    fn validate(&self, section: &str) -> Result<()> {
        let file = self.file.as_str();
        if file.contains('/') || file.contains('\\') || file.contains("..") || file == "." {
            return Err(anyhow!("content.{section}.file must be a bare file name"));
        }
        if self.cache_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(anyhow!("content.{section}.cache_keys contains an empty key"));
        }
        Ok(())
    }
}
