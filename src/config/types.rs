use crate::records::ProjectType;
use serde::{Deserialize, Serialize};

/// Main configuration structure for Paged-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    /// Next-page rule; falls back to the site default when omitted
    #[serde(default)]
    pub pagination: Option<PaginationConfig>,
    #[serde(default)]
    pub projects: ProjectSelectors,
    #[serde(default)]
    pub palettes: PaletteSelectors,
}

impl Config {
    /// Returns the pagination rule in effect for the configured site
    pub fn pagination_rule(&self) -> PaginationConfig {
        self.pagination
            .clone()
            .unwrap_or_else(|| PaginationConfig::default_for(self.crawler.site))
    }

    /// Returns the blob-store key the record collection lives under
    pub fn collection_key(&self) -> &str {
        self.output
            .collection_key
            .as_deref()
            .unwrap_or_else(|| self.crawler.site.default_collection_key())
    }
}

/// Which listing the crawler is pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Site {
    /// Branding-project archive pages
    Projects,
    /// Colour-palette listing pages
    Palettes,
}

impl Site {
    pub fn default_collection_key(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Palettes => "palettes",
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_collection_key())
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Record variant to extract
    pub site: Site,

    /// First listing page to load
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Fixed wait before reading each page (milliseconds)
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Stop after this many pages even if a next link exists
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,
}

fn default_settle_delay_ms() -> u64 {
    2000
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Overrides the site's default collection key
    #[serde(rename = "collection-key", default)]
    pub collection_key: Option<String>,

    /// Default destination for `--export`
    #[serde(rename = "export-path", default)]
    pub export_path: Option<String>,
}

/// How the next-page link is located
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PaginationConfig {
    /// First element matching a CSS selector
    Selector { selector: String },
    /// First link whose trimmed text equals the label exactly
    LinkText { label: String },
}

impl PaginationConfig {
    pub fn default_for(site: Site) -> Self {
        match site {
            Site::Projects => Self::LinkText {
                label: "Older Posts".to_string(),
            },
            Site::Palettes => Self::Selector {
                selector: ".paging a.pagination__next".to_string(),
            },
        }
    }
}

/// Where the project type comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectTypeMode {
    /// Scan the subtitle for a known type label
    #[default]
    Scan,
    /// Every record on this listing gets the default type
    Fixed,
}

/// Selectors for branding-project item blocks
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProjectSelectors {
    pub item_selector: String,
    pub link_selector: String,
    pub image_selector: String,
    pub image_fallback_selector: String,
    pub title_selector: String,
    pub subtitle_selector: String,
    pub status_selector: String,
    pub status_link_selector: String,
    pub favorites_selector: String,
    pub project_type: ProjectTypeMode,
    /// Fallback for `scan`, the constant for `fixed`
    pub default_project_type: Option<ProjectType>,
}

impl Default for ProjectSelectors {
    fn default() -> Self {
        Self {
            item_selector: ".grid-item".to_string(),
            link_selector: "a".to_string(),
            image_selector: ".lead_image_image".to_string(),
            image_fallback_selector: "img".to_string(),
            title_selector: ".title h1".to_string(),
            subtitle_selector: ".title h2".to_string(),
            status_selector: "h5".to_string(),
            status_link_selector: "h5 a".to_string(),
            favorites_selector: ".favorites_area_archive span".to_string(),
            project_type: ProjectTypeMode::Scan,
            default_project_type: None,
        }
    }
}

impl ProjectSelectors {
    /// All selector strings, paired with their config field names
    pub fn selector_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("projects.item-selector", &self.item_selector),
            ("projects.link-selector", &self.link_selector),
            ("projects.image-selector", &self.image_selector),
            (
                "projects.image-fallback-selector",
                &self.image_fallback_selector,
            ),
            ("projects.title-selector", &self.title_selector),
            ("projects.subtitle-selector", &self.subtitle_selector),
            ("projects.status-selector", &self.status_selector),
            ("projects.status-link-selector", &self.status_link_selector),
            ("projects.favorites-selector", &self.favorites_selector),
        ]
    }
}

/// Selectors for colour-palette item blocks
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PaletteSelectors {
    pub item_selector: String,
    pub favorites_selector: String,
    pub swatch_container_selector: String,
    pub swatch_selector: String,
}

impl Default for PaletteSelectors {
    fn default() -> Self {
        Self {
            item_selector: ".detail-row".to_string(),
            favorites_selector: ".meta .big-number-label h4".to_string(),
            swatch_container_selector: ".detail-row-overlay".to_string(),
            swatch_selector: ".c".to_string(),
        }
    }
}

impl PaletteSelectors {
    pub fn selector_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("palettes.item-selector", &self.item_selector),
            ("palettes.favorites-selector", &self.favorites_selector),
            (
                "palettes.swatch-container-selector",
                &self.swatch_container_selector,
            ),
            ("palettes.swatch-selector", &self.swatch_selector),
        ]
    }
}
