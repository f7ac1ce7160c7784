//! The page document: every element the overlay layer can address by id.
//!
//! Built once from [`PageSpec`] markup and immutable afterwards. Lookups that
//! miss return `None`; callers treat a miss as a silent no-op.

use std::collections::HashMap;

use chrono::NaiveDate;
use folio_config::PageSpec;

use crate::age::calculate_age;

const AGE_PLACEHOLDER: &str = "{age}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Full-screen exclusive dialog. Owns one overlay-background and one
    /// close-control role.
    Modal {
        alias: Option<String>,
        requests_backdrop: bool,
    },
    /// In-page panel. Only collapsible sections take part in overlay state.
    Section { collapsible: bool },
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: String,
    pub title: String,
    pub body: Vec<String>,
    pub kind: ElementKind,
}

impl Element {
    /// The name this element is addressed by in the fragment.
    #[must_use]
    pub fn public_id(&self) -> &str {
        match &self.kind {
            ElementKind::Modal {
                alias: Some(alias), ..
            } => alias,
            _ => &self.id,
        }
    }

    #[must_use]
    pub fn is_modal(&self) -> bool {
        matches!(self.kind, ElementKind::Modal { .. })
    }

    #[must_use]
    pub fn is_collapsible_section(&self) -> bool {
        matches!(self.kind, ElementKind::Section { collapsible: true })
    }

    #[must_use]
    pub fn requests_backdrop(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Modal {
                requests_backdrop: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone)]
pub struct Document {
    title: String,
    tagline: Option<String>,
    blocks: Vec<String>,
    nav: Vec<NavButton>,
    elements: Vec<Element>,
    by_id: HashMap<String, usize>,
    by_fragment: HashMap<String, usize>,
    has_backdrop: bool,
}

impl Document {
    /// Build the document. `today` resolves the `{age}` placeholder.
    #[must_use]
    pub fn from_spec(spec: &PageSpec, today: NaiveDate) -> Self {
        let age = spec
            .birth_date()
            .ok()
            .flatten()
            .map(|birth| calculate_age(birth, today).to_string());
        let render = |lines: &[String]| -> Vec<String> {
            lines
                .iter()
                .map(|line| match &age {
                    Some(age) => line.replace(AGE_PLACEHOLDER, age),
                    None => line.clone(),
                })
                .collect()
        };

        let modals = spec.modals.iter().map(|modal| Element {
            id: modal.id.clone(),
            title: modal.title.clone(),
            body: render(&modal.body),
            kind: ElementKind::Modal {
                alias: modal.alias.clone(),
                requests_backdrop: modal.backdrop,
            },
        });
        let sections = spec.sections.iter().map(|section| Element {
            id: section.id.clone(),
            title: section.title.clone(),
            body: render(&section.body),
            kind: ElementKind::Section {
                collapsible: section.collapsible,
            },
        });
        let elements: Vec<Element> = modals.chain(sections).collect();

        let mut by_id = HashMap::with_capacity(elements.len());
        let mut by_fragment = HashMap::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            by_id.insert(element.id.clone(), index);
            if element.is_modal() || element.is_collapsible_section() {
                by_fragment.insert(element.public_id().to_owned(), index);
            }
        }

        Self {
            title: spec.title.clone(),
            tagline: spec.tagline.clone(),
            blocks: render(&spec.blocks),
            nav: spec
                .nav
                .iter()
                .map(|nav| NavButton {
                    label: nav.label.clone(),
                    target: nav.target.trim_start_matches('#').to_owned(),
                })
                .collect(),
            elements,
            by_id,
            by_fragment,
            has_backdrop: spec.backdrop,
        }
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.by_id.get(id).map(|&index| &self.elements[index])
    }

    #[must_use]
    pub fn modal(&self, id: &str) -> Option<&Element> {
        self.element(id).filter(|element| element.is_modal())
    }

    /// A section that carries the collapsible marker.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Element> {
        self.element(id)
            .filter(|element| element.is_collapsible_section())
    }

    /// The overlay a fragment value selects.
    ///
    /// Modals answer to their alias when they have one, otherwise to their id.
    /// Collapsible sections answer to their id.
    #[must_use]
    pub fn for_fragment(&self, fragment: &str) -> Option<&Element> {
        self.by_fragment
            .get(fragment)
            .map(|&index| &self.elements[index])
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    #[must_use]
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    #[must_use]
    pub fn nav(&self) -> &[NavButton] {
        &self.nav
    }

    /// Plain (non-collapsible) sections, rendered inline with the page body.
    pub fn static_sections(&self) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(|element| matches!(element.kind, ElementKind::Section { collapsible: false }))
    }

    #[must_use]
    pub fn has_backdrop(&self) -> bool {
        self.has_backdrop
    }
}
