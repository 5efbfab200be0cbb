use std::{sync::Arc, time::Duration};

use configs::{AppConfig, SectionConfig};
use service::{
    assets::{AssetStore, LocalAssetStore},
    cache::MemoryContentCache,
    content::{ContentReader, ContentSection, ContentSections, ABOUT_US, CUSTOM_TERMS},
    customize::CustomizeHandler,
    settings::JsonSettingsStore,
};

#[derive(Clone)]
pub struct AppState {
    pub customize: Arc<CustomizeHandler>,
    pub reader: Arc<ContentReader>,
}

fn section(id: &str, cfg: &SectionConfig) -> ContentSection {
    ContentSection::new(id, cfg.file.as_str(), cfg.cache_keys.clone())
}

pub fn sections_from(cfg: &AppConfig) -> ContentSections {
    ContentSections {
        about_us: section(ABOUT_US, &cfg.content.about_us),
        custom_terms: section(CUSTOM_TERMS, &cfg.content.custom_terms),
    }
}

impl AppState {
    /// Open the stores named by the config and wire them into the handler and reader.
    pub async fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let settings = JsonSettingsStore::new(&cfg.storage.settings_path).await?;
        let assets: Arc<dyn AssetStore> = Arc::new(LocalAssetStore::new(&cfg.storage.assets_dir).await?);
        let cache = Arc::new(MemoryContentCache::new(
            cfg.cache.max_capacity,
            Duration::from_secs(cfg.cache.ttl_secs),
        ));

        let customize = CustomizeHandler::new(settings, Arc::clone(&assets), cache.clone(), sections_from(cfg));
        let reader = ContentReader::new(assets, cache);

        Ok(Self { customize: Arc::new(customize), reader: Arc::new(reader) })
    }
}
