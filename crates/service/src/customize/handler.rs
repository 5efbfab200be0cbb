use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::assets::AssetStore;
use crate::cache::ContentCache;
use crate::content::{ContentSection, ContentSections};
use crate::customize::CustomizeFields;
use crate::errors::ServiceError;
use crate::settings::{SettingsStore, MOTTO_KEY};

/// What a submission did to a section's asset file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionOutcome {
    Written,
    Deleted,
    /// Disabled and already missing.
    Absent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub section: String,
    pub outcome: SectionOutcome,
    pub cache_keys_invalidated: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub about_us: SectionReport,
    pub custom_terms: SectionReport,
    pub motto_saved: bool,
}

/// Loads and applies the customize form against the three stores.
///
/// Sections are applied in order (about us, custom terms, motto) without
/// rollback: an error leaves the earlier sections applied.
#[derive(Clone)]
pub struct CustomizeHandler {
    settings: Arc<dyn SettingsStore>,
    assets: Arc<dyn AssetStore>,
    cache: Arc<dyn ContentCache>,
    sections: ContentSections,
}

impl CustomizeHandler {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        assets: Arc<dyn AssetStore>,
        cache: Arc<dyn ContentCache>,
        sections: ContentSections,
    ) -> Self {
        Self { settings, assets, cache, sections }
    }

    pub fn sections(&self) -> &ContentSections {
        &self.sections
    }

    /// Current form values. The motto stays `None` unless a non-empty value is stored.
    pub async fn populate_from_stores(&self) -> Result<CustomizeFields, ServiceError> {
        let (about_us, about_us_enabled) = self.load_section(&self.sections.about_us).await?;
        let (custom_terms, custom_terms_enabled) = self.load_section(&self.sections.custom_terms).await?;

        let motto = self.settings.get(MOTTO_KEY).await?.filter(|m| !m.is_empty());

        Ok(CustomizeFields { motto, about_us_enabled, about_us, custom_terms_enabled, custom_terms })
    }

    pub async fn apply_submission(&self, fields: &CustomizeFields) -> Result<SubmissionReport, ServiceError> {
        let about_us = self
            .submit_section(&self.sections.about_us, &fields.about_us, fields.about_us_enabled)
            .await?;
        let custom_terms = self
            .submit_section(&self.sections.custom_terms, &fields.custom_terms, fields.custom_terms_enabled)
            .await?;

        let motto_saved = match fields.motto.as_deref() {
            Some(motto) if !motto.is_empty() => {
                self.settings.set(MOTTO_KEY, motto).await?;
                self.settings.flush().await?;
                info!(event = "motto_saved", "motto updated");
                true
            }
            _ => false,
        };

        Ok(SubmissionReport { about_us, custom_terms, motto_saved })
    }

    async fn load_section(&self, section: &ContentSection) -> Result<(String, bool), ServiceError> {
        if self.assets.has(&section.filename).await? {
            let content = self.assets.read(&section.filename).await?;
            return Ok((content, true));
        }
        Ok((String::new(), false))
    }

    async fn submit_section(
        &self,
        section: &ContentSection,
        content: &str,
        enabled: bool,
    ) -> Result<SectionReport, ServiceError> {
        // blank content is never stored as enabled
        let enabled = enabled && !content.trim().is_empty();
        let exists = self.assets.has(&section.filename).await?;

        let outcome = match (enabled, exists) {
            (true, true) => {
                self.assets.update(&section.filename, content).await?;
                SectionOutcome::Written
            }
            (true, false) => {
                self.assets.write(&section.filename, content).await?;
                SectionOutcome::Written
            }
            (false, true) => {
                self.assets.delete(&section.filename).await?;
                SectionOutcome::Deleted
            }
            (false, false) => SectionOutcome::Absent,
        };
        info!(section = %section.id, file = %section.filename, ?outcome, "content section submitted");

        for key in &section.cache_keys {
            self.cache.delete(key).await?;
            debug!(section = %section.id, %key, event = "cache_invalidated", "cache key invalidated");
        }

        Ok(SectionReport {
            section: section.id.clone(),
            outcome,
            cache_keys_invalidated: section.cache_keys.len(),
        })
    }
}
