//! Portfolio content records.
//!
//! # Responsibility
//! - Define the static, hand-authored records the page renders.
//! - Load and validate the JSON content document.
//!
//! # Invariants
//! - Records are immutable values once loaded.
//! - Unknown JSON fields are rejected; the declared fields are the only
//!   recognized options.
//! - Skill categories keep document order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BUILTIN_CONTENT_JSON: &str = include_str!("../../assets/portfolio.json");

/// One work sample shown in the "Selected Work" grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Thumbnail path.
    pub image: String,
    /// Case-study link; empty when the project has none.
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    /// Short outcome statement; plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl Project {
    /// Images the gallery overlay opens with.
    ///
    /// Falls back to the thumbnail alone when no gallery is declared, so a
    /// project with a valid `image` always yields a non-empty sequence.
    pub fn gallery_images(&self) -> Vec<String> {
        if self.gallery.is_empty() {
            vec![self.image.clone()]
        } else {
            self.gallery.clone()
        }
    }
}

/// One entry of the education timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationItem {
    pub school: String,
    pub degree: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One entry of the experience timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceItem {
    pub company: String,
    pub role: String,
    pub start: String,
    /// Free text, e.g. `Present`.
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Named group of skills rendered as one chip row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Ordered mapping from skill category name to skill names.
///
/// Serialized as a JSON object; categories keep the order they appear in
/// the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillCatalog {
    categories: Vec<SkillCategory>,
}

impl SkillCatalog {
    pub fn new(categories: Vec<SkillCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.skills.as_slice())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for SkillCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.skills)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = SkillCatalog;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "a map of skill category to skill names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::<SkillCategory>::new();
                while let Some((name, skills)) = access.next_entry::<String, Vec<String>>()? {
                    if categories.iter().any(|category| category.name == name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate skill category `{name}`"
                        )));
                    }
                    categories.push(SkillCategory { name, skills });
                }
                Ok(SkillCatalog { categories })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Bio block for the "About Me" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutProfile {
    pub name: String,
    /// `None` renders [`DEFAULT_ABOUT_ROLE`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub main_photo: String,
    pub secondary_photo: String,
    /// `None` renders the default bio text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Flat chip list; ignored once `skills_by_category` is non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub skills_by_category: SkillCatalog,
}

pub const DEFAULT_ABOUT_ROLE: &str = "SEO & Web Development";

impl AboutProfile {
    pub fn role(&self) -> &str {
        match self.role.as_deref() {
            Some(role) if !role.trim().is_empty() => role,
            _ => DEFAULT_ABOUT_ROLE,
        }
    }

    /// Skills rendered as one ungrouped row; empty when categories exist.
    pub fn flat_skills(&self) -> &[String] {
        if self.skills_by_category.is_empty() {
            &self.skills
        } else {
            &[]
        }
    }
}

/// Whole-page content configuration supplied by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortfolioContent {
    pub about: AboutProfile,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_href: Option<String>,
}

impl PortfolioContent {
    /// Parses and validates one JSON content document.
    pub fn from_json_str(raw: &str) -> Result<Self, ContentLoadError> {
        let content: Self = serde_json::from_str(raw).map_err(ContentLoadError::Json)?;
        content.validate()?;
        Ok(content)
    }

    /// Content embedded in the binary at build time.
    pub fn builtin() -> Result<Self, ContentLoadError> {
        Self::from_json_str(BUILTIN_CONTENT_JSON)
    }

    /// Checks required-field presence across all records.
    pub fn validate(&self) -> Result<(), ContentValidationError> {
        let about = &self.about;
        require("about", "name", &about.name)?;
        require("about", "main_photo", &about.main_photo)?;
        require("about", "secondary_photo", &about.secondary_photo)?;
        if about.skills.iter().any(|skill| skill.trim().is_empty()) {
            return Err(ContentValidationError::BlankField {
                record: "about".to_string(),
                field: "skills",
            });
        }
        for category in about.skills_by_category.categories() {
            if category.name.trim().is_empty() {
                return Err(ContentValidationError::BlankSkillCategory);
            }
            if category.skills.iter().any(|skill| skill.trim().is_empty()) {
                return Err(ContentValidationError::BlankSkill {
                    category: category.name.clone(),
                });
            }
        }

        for (index, project) in self.projects.iter().enumerate() {
            let record = format!("projects[{index}]");
            require(&record, "title", &project.title)?;
            require(&record, "image", &project.image)?;
        }
        for (index, item) in self.education.iter().enumerate() {
            let record = format!("education[{index}]");
            require(&record, "school", &item.school)?;
            require(&record, "degree", &item.degree)?;
            require(&record, "start", &item.start)?;
            require(&record, "end", &item.end)?;
        }
        for (index, item) in self.experience.iter().enumerate() {
            let record = format!("experience[{index}]");
            require(&record, "company", &item.company)?;
            require(&record, "role", &item.role)?;
            require(&record, "start", &item.start)?;
            require(&record, "end", &item.end)?;
        }
        Ok(())
    }
}

fn require(record: &str, field: &'static str, value: &str) -> Result<(), ContentValidationError> {
    if value.trim().is_empty() {
        return Err(ContentValidationError::BlankField {
            record: record.to_string(),
            field,
        });
    }
    Ok(())
}

/// Required-field violations in a content document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentValidationError {
    BlankField { record: String, field: &'static str },
    BlankSkillCategory,
    BlankSkill { category: String },
}

impl Display for ContentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { record, field } => {
                write!(f, "{record}.{field} must not be blank")
            }
            Self::BlankSkillCategory => write!(f, "skill category name must not be blank"),
            Self::BlankSkill { category } => {
                write!(f, "skill category `{category}` contains a blank skill")
            }
        }
    }
}

impl Error for ContentValidationError {}

/// Content document load failures.
#[derive(Debug)]
pub enum ContentLoadError {
    Json(serde_json::Error),
    Validation(ContentValidationError),
}

impl Display for ContentLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid content document: {err}"),
            Self::Validation(err) => write!(f, "invalid content: {err}"),
        }
    }
}

impl Error for ContentLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<ContentValidationError> for ContentLoadError {
    fn from(value: ContentValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{PortfolioContent, Project};

    fn project(gallery: &[&str]) -> Project {
        Project {
            title: "Landing Page".to_string(),
            description: String::new(),
            image: "/landing-page.png".to_string(),
            href: String::new(),
            tags: vec![],
            gallery: gallery.iter().map(|value| value.to_string()).collect(),
            demo: None,
            github: None,
            impact: None,
        }
    }

    #[test]
    fn gallery_images_falls_back_to_thumbnail() {
        assert_eq!(project(&[]).gallery_images(), vec!["/landing-page.png"]);
        assert_eq!(project(&["/a.png", "/b.png"]).gallery_images().len(), 2);
    }

    #[test]
    fn builtin_content_loads_and_validates() {
        let content = PortfolioContent::builtin().expect("builtin content should load");
        assert_eq!(content.projects.len(), 4);
        assert_eq!(content.education.len(), 3);
        assert_eq!(content.experience.len(), 2);
        assert_eq!(
            content.projects[3].impact.as_deref(),
            Some("Improves clarity + user choice")
        );
    }

    #[test]
    fn builtin_skill_categories_keep_document_order() {
        let content = PortfolioContent::builtin().expect("builtin content should load");
        let names = content
            .about
            .skills_by_category
            .categories()
            .iter()
            .map(|category| category.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Frontend", "UX/UI", "Tools"]);
    }
}
