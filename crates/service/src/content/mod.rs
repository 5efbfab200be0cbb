//! Content sections edited by the customize form.

pub mod reader;

pub use reader::ContentReader;

/// One markdown section backed by an asset file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSection {
    pub id: String,
    pub filename: String,
    /// Invalidated on every submission of this section.
    pub cache_keys: Vec<String>,
}

impl ContentSection {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, cache_keys: Vec<String>) -> Self {
        Self { id: id.into(), filename: filename.into(), cache_keys }
    }

    pub fn about_us() -> Self {
        Self::new(
            ABOUT_US,
            "about_us.md",
            vec!["content.about_us".into(), "content.about_us.exists".into()],
        )
    }

    pub fn custom_terms() -> Self {
        Self::new(CUSTOM_TERMS, "custom_terms.md", Vec::new())
    }

    pub fn body_key(&self) -> String {
        format!("content.{}", self.id)
    }

    pub fn exists_key(&self) -> String {
        format!("content.{}.exists", self.id)
    }

    pub fn invalidates(&self, key: &str) -> bool {
        self.cache_keys.iter().any(|k| k == key)
    }
}

pub const ABOUT_US: &str = "about_us";
pub const CUSTOM_TERMS: &str = "custom_terms";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSections {
    pub about_us: ContentSection,
    pub custom_terms: ContentSection,
}

impl Default for ContentSections {
    fn default() -> Self {
        Self { about_us: ContentSection::about_us(), custom_terms: ContentSection::custom_terms() }
    }
}

impl ContentSections {
    pub fn get(&self, id: &str) -> Option<&ContentSection> {
        [&self.about_us, &self.custom_terms].into_iter().find(|s| s.id == id)
    }
}
