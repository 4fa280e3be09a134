//! Stage 4: navigation construction
//!
//! Wires the standard flows per surface: dashboard → lists, list → detail
//! (carrying the row id), list → form, and form → list on submit. Rules only
//! connect pages of the same surface.

use crate::context::GeneratorContext;
use appforge_schema::{NavigationRule, NavigationTrigger, Page, PageType, Surface};
use indexmap::IndexMap;

/// Build per-surface navigation from the accumulated context
#[must_use]
pub(crate) fn build(ctx: &GeneratorContext<'_>) -> IndexMap<Surface, Vec<NavigationRule>> {
    let mut navigation = IndexMap::new();

    for surface in ctx.surfaces() {
        let pages: Vec<&Page> = ctx.pages.iter().filter(|p| p.surface == surface).collect();
        let mut rules = Vec::new();

        let home = pages
            .iter()
            .find(|p| p.page_type == PageType::Dashboard)
            .or_else(|| pages.first());

        for page in &pages {
            if page.page_type == PageType::List {
                if let Some(home) = home {
                    if home.id != page.id {
                        rules.push(NavigationRule::new(
                            home.id.clone(),
                            page.id.clone(),
                            NavigationTrigger::Click,
                        ));
                    }
                }
                if let Some(detail) = sibling(&pages, page, PageType::Detail) {
                    rules.push(
                        NavigationRule::new(
                            page.id.clone(),
                            detail.id.clone(),
                            NavigationTrigger::RowClick,
                        )
                        .with_param("id", "row.id"),
                    );
                }
                if let Some(form) = sibling(&pages, page, PageType::Form) {
                    rules.push(NavigationRule::new(
                        page.id.clone(),
                        form.id.clone(),
                        NavigationTrigger::Click,
                    ));
                    rules.push(NavigationRule::new(
                        form.id.clone(),
                        page.id.clone(),
                        NavigationTrigger::Submit,
                    ));
                }
            }
        }

        if !rules.is_empty() {
            navigation.insert(surface, rules);
        }
    }

    navigation
}

/// Another page of the same surface bound to the same entity
fn sibling<'a>(pages: &[&'a Page], of: &Page, page_type: PageType) -> Option<&'a Page> {
    let entity = of.entity.as_ref()?;
    pages
        .iter()
        .find(|p| p.page_type == page_type && p.entity.as_ref() == Some(entity))
        .copied()
}
