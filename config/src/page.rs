//! Page markup: the declarative document the overlay layer discovers its
//! modals, sections and nav buttons from.

use chrono::NaiveDate;
use serde::Deserialize;
use std::{collections::HashSet, fs, path::Path};
use thiserror::Error;

/// Markup of the built-in landing page.
pub const DEFAULT_PAGE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/page.toml"));

const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page markup at {}: {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse page markup: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("element id must not be empty or contain whitespace: {0:?}")]
    InvalidId(String),
    #[error("duplicate element id `{0}`")]
    DuplicateId(String),
    #[error("nav button `{label}` targets unknown element `{target}`")]
    UnknownTarget { label: String, target: String },
    #[error("page declares no modals and no sections")]
    Empty,
    #[error("invalid birth_date `{value}`: {source}")]
    InvalidBirthDate {
        value: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    /// `YYYY-MM-DD`; feeds the `{age}` placeholder.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Whether the page has a backdrop element.
    #[serde(default = "default_true")]
    pub backdrop: bool,
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default)]
    pub nav: Vec<NavSpec>,
    #[serde(default)]
    pub modals: Vec<ModalSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

/// A navigation trigger. Pressing it opens `target` and records it in the fragment.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavSpec {
    pub label: String,
    /// Section id, modal alias, or id of a modal without alias.
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModalSpec {
    pub id: String,
    /// Public fragment name, e.g. `projects` for `projects-modal`.
    #[serde(default)]
    pub alias: Option<String>,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
    /// Show the page backdrop while this modal is open.
    #[serde(default)]
    pub backdrop: bool,
}

impl ModalSpec {
    /// The name this modal is addressed by in the fragment.
    #[must_use]
    pub fn public_id(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSpec {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
    /// The collapsible marker. Only collapsible sections take part in overlay state.
    #[serde(default = "default_true")]
    pub collapsible: bool,
}

impl PageSpec {
    /// The built-in landing page.
    pub fn builtin() -> Result<Self, PageError> {
        Self::parse(DEFAULT_PAGE)
    }

    pub fn parse(markup: &str) -> Result<Self, PageError> {
        let spec: Self = toml::from_str(markup)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn load(path: &Path) -> Result<Self, PageError> {
        let markup = fs::read_to_string(path).map_err(|source| PageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = Self::parse(&markup)?;
        tracing::info!(
            path = %path.display(),
            modals = spec.modals.len(),
            sections = spec.sections.len(),
            "Page markup loaded"
        );
        Ok(spec)
    }

    pub fn birth_date(&self) -> Result<Option<NaiveDate>, PageError> {
        self.birth_date
            .as_deref()
            .map(|value| {
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
                    PageError::InvalidBirthDate {
                        value: value.to_owned(),
                        source,
                    }
                })
            })
            .transpose()
    }

    fn validate(&self) -> Result<(), PageError> {
        let mut names: HashSet<&str> = HashSet::new();
        let ids = self
            .modals
            .iter()
            .map(|modal| modal.id.as_str())
            .chain(self.sections.iter().map(|section| section.id.as_str()));
        let aliases = self.modals.iter().filter_map(|modal| modal.alias.as_deref());

        for name in ids.chain(aliases) {
            if name.is_empty() || name.contains(char::is_whitespace) || name.starts_with('#') {
                return Err(PageError::InvalidId(name.to_owned()));
            }
            if !names.insert(name) {
                return Err(PageError::DuplicateId(name.to_owned()));
            }
        }

        for nav in &self.nav {
            let target = nav.target.trim_start_matches('#');
            let opens_modal = self.modals.iter().any(|modal| modal.public_id() == target);
            let opens_section = self
                .sections
                .iter()
                .any(|section| section.collapsible && section.id == target);
            if !opens_modal && !opens_section {
                return Err(PageError::UnknownTarget {
                    label: nav.label.clone(),
                    target: nav.target.clone(),
                });
            }
        }

        self.birth_date()?;
        if self.modals.is_empty() && self.sections.is_empty() {
            return Err(PageError::Empty);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PageError, PageSpec};

    #[test]
    fn builtin_page_is_valid() {
        let spec = PageSpec::builtin().unwrap();
        assert_eq!(spec.title, "LYUBCHAK.COM");
        assert!(spec.backdrop);
        let projects = spec
            .modals
            .iter()
            .find(|modal| modal.id == "projects-modal")
            .unwrap();
        assert_eq!(projects.public_id(), "projects");
        assert!(spec.sections.iter().any(|section| section.id == "about"));
        assert!(spec.birth_date().unwrap().is_some());
    }

    #[test]
    fn minimal_page_uses_defaults() {
        let spec = PageSpec::parse(
            r#"
            title = "x"
            [[modals]]
            id = "gallery"
            title = "Gallery"
            "#,
        )
        .unwrap();
        assert!(spec.backdrop);
        assert!(spec.nav.is_empty());
        assert!(spec.sections.is_empty());
        assert!(spec.birth_date().unwrap().is_none());
    }

    #[test]
    fn rejects_page_without_overlays() {
        let err = PageSpec::parse("title = \"x\"\nblocks = [\"hello\"]").unwrap_err();
        assert!(matches!(err, PageError::Empty));

        let static_only = PageSpec::parse(
            r#"
            title = "x"
            [[sections]]
            id = "bio"
            title = "Bio"
            collapsible = false
            "#,
        );
        assert!(static_only.is_ok(), "a static section still counts as content");
    }

    #[test]
    fn section_defaults_to_collapsible() {
        let spec = PageSpec::parse(
            r#"
            title = "x"
            [[sections]]
            id = "about"
            title = "About"
            "#,
        )
        .unwrap();
        assert!(spec.sections[0].collapsible);
    }

    #[test]
    fn rejects_duplicate_ids_across_kinds() {
        let err = PageSpec::parse(
            r#"
            title = "x"
            [[modals]]
            id = "about"
            title = "A"
            [[sections]]
            id = "about"
            title = "B"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PageError::DuplicateId(id) if id == "about"));
    }

    #[test]
    fn rejects_alias_colliding_with_section() {
        let err = PageSpec::parse(
            r#"
            title = "x"
            [[modals]]
            id = "projects-modal"
            alias = "about"
            title = "P"
            [[sections]]
            id = "about"
            title = "A"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PageError::DuplicateId(id) if id == "about"));
    }

    #[test]
    fn rejects_nav_to_unknown_or_plain_element() {
        let unknown = PageSpec::parse(
            r#"
            title = "x"
            [[nav]]
            label = "Ghost"
            target = "ghost"
            "#,
        )
        .unwrap_err();
        assert!(matches!(unknown, PageError::UnknownTarget { .. }));

        let plain = PageSpec::parse(
            r#"
            title = "x"
            [[sections]]
            id = "footer"
            title = "F"
            collapsible = false
            [[nav]]
            label = "Footer"
            target = "footer"
            "#,
        )
        .unwrap_err();
        assert!(matches!(plain, PageError::UnknownTarget { .. }));
    }

    #[test]
    fn nav_to_aliased_modal_must_use_alias() {
        let err = PageSpec::parse(
            r#"
            title = "x"
            [[modals]]
            id = "projects-modal"
            alias = "projects"
            title = "P"
            [[nav]]
            label = "Projects"
            target = "projects-modal"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, PageError::UnknownTarget { .. }));
    }

    #[test]
    fn rejects_blank_ids_and_bad_dates() {
        let blank = PageSpec::parse(
            r#"
            title = "x"
            [[sections]]
            id = "with space"
            title = "A"
            "#,
        )
        .unwrap_err();
        assert!(matches!(blank, PageError::InvalidId(_)));

        let date = PageSpec::parse("title = \"x\"\nbirth_date = \"27.02.1999\"").unwrap_err();
        assert!(matches!(date, PageError::InvalidBirthDate { .. }));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = PageSpec::parse("title = \"x\"\ncolour = \"red\"").unwrap_err();
        assert!(matches!(err, PageError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageSpec::load(&dir.path().join("page.toml")).unwrap_err();
        assert!(matches!(err, PageError::Read { .. }));
    }
}
