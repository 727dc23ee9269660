use super::document::{self, FieldRule, Page, Read};
use super::rules;
use super::{Extraction, Extractor};
use crate::config::{ProjectSelectors, ProjectTypeMode};
use crate::records::{ProjectRecord, ProjectType};
use crate::ConfigResult;
use scraper::{ElementRef, Selector};

/// Decides `projectType` for every record on a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectTypePolicy {
    /// Scan the subtitle; use `fallback` when no label is found
    Scan { fallback: Option<ProjectType> },
    /// Every record gets this type
    Fixed(ProjectType),
}

impl ProjectTypePolicy {
    pub fn from_config(mode: ProjectTypeMode, default: Option<ProjectType>) -> Self {
        match mode {
            ProjectTypeMode::Scan => Self::Scan { fallback: default },
            ProjectTypeMode::Fixed => Self::Fixed(default.unwrap_or(ProjectType::New)),
        }
    }

    fn resolve(&self, sub_title: &str) -> Option<ProjectType> {
        match *self {
            Self::Scan { fallback } => rules::infer_project_type(sub_title).or(fallback),
            Self::Fixed(kind) => Some(kind),
        }
    }
}

/// Extracts branding-project records from archive grid items
#[derive(Debug, Clone)]
pub struct ProjectExtractor {
    item: Selector,
    link: FieldRule,
    image: FieldRule,
    image_fallback: FieldRule,
    title: FieldRule,
    subtitle: FieldRule,
    status: FieldRule,
    status_link: FieldRule,
    favorites: FieldRule,
    type_policy: ProjectTypePolicy,
}

impl ProjectExtractor {
    pub fn new(selectors: &ProjectSelectors) -> ConfigResult<Self> {
        Ok(Self {
            item: document::compile(&selectors.item_selector)?,
            link: FieldRule::new(&selectors.link_selector, Read::Attr("href"))?,
            image: FieldRule::new(&selectors.image_selector, Read::Style("background-image"))?,
            image_fallback: FieldRule::new(&selectors.image_fallback_selector, Read::Attr("src"))?,
            title: FieldRule::new(&selectors.title_selector, Read::Text)?,
            subtitle: FieldRule::new(&selectors.subtitle_selector, Read::Text)?,
            status: FieldRule::new(&selectors.status_selector, Read::Text)?,
            status_link: FieldRule::new(&selectors.status_link_selector, Read::Text)?,
            favorites: FieldRule::new(&selectors.favorites_selector, Read::Text)?,
            type_policy: ProjectTypePolicy::from_config(
                selectors.project_type,
                selectors.default_project_type,
            ),
        })
    }

    fn extract_block(&self, block: ElementRef<'_>) -> ProjectRecord {
        let website_url = document::try_extract(block, &self.link).unwrap_or_default();

        let image_url = document::try_extract(block, &self.image)
            .map(|raw| rules::strip_css_url(&raw))
            .filter(|url| !url.is_empty())
            .or_else(|| document::try_extract(block, &self.image_fallback))
            .unwrap_or_default();

        let title = document::try_extract(block, &self.title).filter(|t| !t.is_empty());

        let sub_title = document::try_extract(block, &self.subtitle)
            .map(|raw| rules::clean_subtitle(&raw))
            .unwrap_or_default();

        let status_line = document::try_extract(block, &self.status).unwrap_or_default();
        let status_link = document::try_extract(block, &self.status_link);
        let (action, date) = rules::split_status_line(&status_line, status_link.as_deref());
        let comment_count = rules::parse_comment_count(status_link.as_deref());

        let favorite_count = document::try_extract(block, &self.favorites).filter(|f| !f.is_empty());

        ProjectRecord {
            website_url,
            image_url,
            title,
            project_type: self.type_policy.resolve(&sub_title),
            sub_title,
            action,
            date,
            comment_count,
            favorite_count,
        }
    }
}

impl Extractor for ProjectExtractor {
    type Record = ProjectRecord;

    fn extract(&self, page: &Page) -> Extraction<ProjectRecord> {
        let mut extraction = Extraction::default();

        for block in page.select_all(&self.item) {
            let record = self.extract_block(block);
            if record.website_url.is_empty() {
                tracing::debug!("Project block without a link on {}", page.url());
            }
            extraction.records.push(record);
        }

        extraction
    }
}
