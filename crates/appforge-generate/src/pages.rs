//! Stage 2: page construction
//!
//! Builds a dashboard plus a list/detail/form page set for every inferred
//! entity, then merges any page hints the extractor produced. Binding pages
//! to entities requires stage 1 to have run.

use crate::context::GeneratorContext;
use crate::slug::{slugify, title_case};
use appforge_schema::{AppBlueprint, Component, Entity, Page, PageType};
use serde_json::json;

/// Build the page set from the accumulated context
#[must_use]
pub(crate) fn build(ctx: &GeneratorContext<'_>) -> Vec<Page> {
    let mut pages = vec![dashboard(&ctx.entities)];

    for entity in &ctx.entities {
        push_if_room(&mut pages, list_page(entity));
        push_if_room(&mut pages, detail_page(entity));
        push_if_room(&mut pages, form_page(entity));
    }

    for hint in &ctx.intent.details().pages {
        let id = slugify(&hint.name);
        if pages.iter().any(|p| p.id == id) {
            continue;
        }
        let mut page = Page::new(
            id.clone(),
            title_case(&hint.name),
            format!("/{id}"),
            hint.page_type.unwrap_or(PageType::Custom),
        );
        if let Some(surface) = hint.surface {
            page = page.with_surface(surface);
        }
        if let Some(entity_id) = &hint.entity {
            // Only bind when the entity actually exists; a dangling hint
            // would fail validation downstream.
            if ctx.entities.iter().any(|e| e.id == *entity_id) {
                page = page.with_entity(entity_id.clone());
            }
        }
        page = page.with_component(
            Component::new(format!("{id}-content"), "section")
                .with_prop("title", json!(title_case(&hint.name))),
        );
        push_if_room(&mut pages, page);
    }

    pages
}

fn push_if_room(pages: &mut Vec<Page>, page: Page) {
    if pages.len() < AppBlueprint::MAX_PAGES {
        pages.push(page);
    }
}

fn dashboard(entities: &[Entity]) -> Page {
    let stats = entities.iter().fold(
        Component::new("dashboard-stats", "statGrid"),
        |grid, entity| {
            grid.with_child(
                Component::new(format!("stat-{}", entity.id), "statCard")
                    .with_prop("label", json!(entity.plural_name))
                    .with_binding("value", format!("count({})", entity.id)),
            )
        },
    );

    Page::new("dashboard", "Dashboard", "/", PageType::Dashboard)
        .with_component(
            Component::new("dashboard-header", "header").with_prop("title", json!("Dashboard")),
        )
        .with_component(stats)
}

/// Id of the list page generated for an entity
#[must_use]
pub(crate) fn list_page_id(entity: &Entity) -> String {
    slugify(&entity.plural_name)
}

fn list_page(entity: &Entity) -> Page {
    let id = list_page_id(entity);
    let columns: Vec<_> = entity.fields.iter().take(5).map(|f| json!(f.id)).collect();
    Page::new(
        id.clone(),
        entity.plural_name.clone(),
        format!("/{id}"),
        PageType::List,
    )
    .with_entity(entity.id.clone())
    .with_component(
        Component::new(format!("{id}-header"), "header")
            .with_prop("title", json!(entity.plural_name)),
    )
    .with_component(
        Component::new(format!("{id}-table"), "table")
            .with_prop("entity", json!(entity.id))
            .with_prop("columns", json!(columns)),
    )
}

fn detail_page(entity: &Entity) -> Page {
    let list_id = list_page_id(entity);
    let id = format!("{}-detail", entity.id);
    Page::new(
        id.clone(),
        format!("{} Detail", entity.name),
        format!("/{list_id}/:id"),
        PageType::Detail,
    )
    .with_entity(entity.id.clone())
    .with_component(
        Component::new(format!("{id}-card"), "detailCard")
            .with_prop("entity", json!(entity.id))
            .with_prop(
                "fields",
                json!(entity.fields.iter().map(|f| &f.id).collect::<Vec<_>>()),
            ),
    )
}

fn form_page(entity: &Entity) -> Page {
    let list_id = list_page_id(entity);
    let id = format!("{}-form", entity.id);
    Page::new(
        id.clone(),
        format!("New {}", entity.name),
        format!("/{list_id}/new"),
        PageType::Form,
    )
    .with_entity(entity.id.clone())
    .with_component(
        Component::new(format!("{id}-form"), "form")
            .with_prop("entity", json!(entity.id))
            .with_prop(
                "fields",
                json!(entity.fields.iter().map(|f| &f.id).collect::<Vec<_>>()),
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_schema::{IntentType, ProcessedIntent, Surface};

    #[test]
    fn page_set_per_entity() {
        let intent = ProcessedIntent::new("", IntentType::CreateApp).with_behavior("booking");
        let mut ctx = GeneratorContext::new(&intent);
        ctx.entities = crate::entities::build(&ctx);

        let pages = build(&ctx);
        // dashboard + (list, detail, form) per entity
        assert_eq!(pages.len(), 1 + 3 * ctx.entities.len());
        assert!(pages.iter().any(|p| p.route == "/appointments/:id"));
        assert!(pages.iter().any(|p| p.route == "/customers/new"));
    }

    #[test]
    fn page_hints_are_merged_with_surface() {
        let intent = ProcessedIntent::new("", IntentType::CreateApp).with_details(
            appforge_schema::ExtractedDetails {
                entities: Vec::new(),
                pages: vec![appforge_schema::ExtractedPage {
                    name: "My Bookings".to_string(),
                    page_type: None,
                    entity: None,
                    surface: Some(Surface::Customer),
                }],
                features: Vec::new(),
            },
        );
        let mut ctx = GeneratorContext::new(&intent);
        ctx.entities = crate::entities::build(&ctx);

        let pages = build(&ctx);
        let hinted = pages.iter().find(|p| p.id == "my-bookings").unwrap();
        assert_eq!(hinted.surface, Surface::Customer);
        assert_eq!(hinted.route, "/my-bookings");
    }

    #[test]
    fn page_count_respects_the_limit() {
        let intent = ProcessedIntent::new("", IntentType::CreateApp);
        let mut ctx = GeneratorContext::new(&intent);
        for i in 0..AppBlueprint::MAX_ENTITIES {
            ctx.entities
                .push(Entity::new(format!("e{i}"), format!("E{i}"), format!("E{i}s")));
        }

        let pages = build(&ctx);
        assert!(pages.len() <= AppBlueprint::MAX_PAGES);
    }
}
