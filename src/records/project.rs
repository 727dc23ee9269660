use crate::records::Keyed;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of project post on the branding archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    New,
    Spotted,
    Reviewed,
}

impl ProjectType {
    /// Scan order used when inferring the type from free text
    pub const SCAN_ORDER: [ProjectType; 3] = [Self::New, Self::Spotted, Self::Reviewed];

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Spotted => "Spotted",
            Self::Reviewed => "Reviewed",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A branding project extracted from one archive grid item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Link to the project post; the uniqueness key
    #[serde(rename = "websiteURL")]
    pub website_url: String,

    /// Lead image, absolute or relative as found in the page
    #[serde(rename = "imageURL")]
    pub image_url: String,

    pub title: Option<String>,

    #[serde(rename = "subTitle")]
    pub sub_title: String,

    #[serde(rename = "projectType")]
    pub project_type: Option<ProjectType>,

    /// First token of the status line (e.g. "Noted", "Reviewed")
    pub action: String,

    pub date: String,

    #[serde(rename = "commentCount")]
    pub comment_count: u32,

    #[serde(rename = "favoriteCount")]
    pub favorite_count: Option<String>,
}

impl Keyed for ProjectRecord {
    fn unique_key(&self) -> String {
        self.website_url.clone()
    }
}
