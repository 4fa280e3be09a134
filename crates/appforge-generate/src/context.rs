//! Accumulated generation context
//!
//! Each builder stage is a pure function of the context assembled by the
//! stages before it: page construction needs the inferred entities, workflow
//! construction needs entities and pages, and so on.

use crate::kits::BehaviorKit;
use appforge_schema::{Entity, NavigationRule, Page, ProcessedIntent, Surface, Workflow};
use indexmap::IndexMap;

/// Partial schema accumulated across the builder stages
#[derive(Debug)]
pub struct GeneratorContext<'a> {
    /// The upstream intent
    pub intent: &'a ProcessedIntent,
    /// Resolved behavior kit, if the intent named a known one
    pub kit: Option<BehaviorKit>,
    /// Stage 1 output
    pub entities: Vec<Entity>,
    /// Stage 2 output
    pub pages: Vec<Page>,
    /// Stage 3 output
    pub workflows: Vec<Workflow>,
    /// Stage 4 output
    pub navigation: IndexMap<Surface, Vec<NavigationRule>>,
}

impl<'a> GeneratorContext<'a> {
    /// Start an empty context for an intent
    #[must_use]
    pub fn new(intent: &'a ProcessedIntent) -> Self {
        let kit = intent.behavior.as_deref().and_then(crate::kits::find);
        Self {
            intent,
            kit,
            entities: Vec::new(),
            pages: Vec::new(),
            workflows: Vec::new(),
            navigation: IndexMap::new(),
        }
    }

    /// Surfaces that appear on at least one page, admin first
    #[must_use]
    pub fn surfaces(&self) -> Vec<Surface> {
        let mut surfaces = vec![Surface::Admin];
        for page in &self.pages {
            if !surfaces.contains(&page.surface) {
                surfaces.push(page.surface);
            }
        }
        surfaces
    }
}
