//! Stage 1: entity inference
//!
//! Extracted entity hints win over kit presets; with neither, a single
//! generic entity keeps the app renderable.

use crate::context::GeneratorContext;
use crate::slug::{field_id, pluralize, slugify, title_case};
use appforge_schema::{
    AppBlueprint, DisplayConfig, Entity, ExtractedEntity, Field, FieldType,
};
use serde_json::json;

/// Infer the blueprint's entities from the accumulated context
#[must_use]
pub(crate) fn build(ctx: &GeneratorContext<'_>) -> Vec<Entity> {
    let hints = ctx.intent.details().entities;

    let mut entities: Vec<Entity> = if !hints.is_empty() {
        hints.iter().map(from_hint).collect()
    } else if let Some(kit) = &ctx.kit {
        kit.entities.clone()
    } else {
        vec![generic_entity()]
    };

    // Dedup by id, first declaration wins, then clamp to the schema bound.
    let mut seen = std::collections::HashSet::new();
    entities.retain(|e| seen.insert(e.id.clone()));
    entities.truncate(AppBlueprint::MAX_ENTITIES);
    entities
}

fn from_hint(hint: &ExtractedEntity) -> Entity {
    let name = title_case(&hint.name);
    let plural = pluralize(&name);
    let mut entity = Entity::new(slugify(&hint.name), name, plural).with_timestamps();

    if hint.fields.is_empty() {
        entity = with_default_fields(entity);
    } else {
        for field_hint in &hint.fields {
            let id = field_id(&field_hint.name);
            if entity.has_field(&id) {
                continue;
            }
            let field_type = field_hint
                .field_type
                .unwrap_or_else(|| infer_field_type(&field_hint.name));
            let mut field = match field_type {
                FieldType::Enum => Field::enumeration(
                    id,
                    title_case(&field_hint.name),
                    default_enum_options(),
                ),
                _ => Field::new(id, title_case(&field_hint.name), field_type),
            };
            if field_hint.required {
                field = field.required();
            }
            entity = entity.with_field(field);
        }
        if entity.fields.is_empty() {
            entity = with_default_fields(entity);
        }
    }

    let title_field = entity
        .fields
        .iter()
        .find(|f| f.field_type == FieldType::String)
        .or_else(|| entity.fields.first())
        .map(|f| f.id.clone());
    if let Some(title_field) = title_field {
        entity = entity.with_display(DisplayConfig {
            title_field,
            subtitle_field: None,
            icon: None,
        });
    }
    entity
}

fn with_default_fields(entity: Entity) -> Entity {
    entity
        .with_field(Field::new("name", "Name", FieldType::String).required())
        .with_field(
            Field::enumeration("status", "Status", default_enum_options())
                .with_default(json!("active")),
        )
        .with_field(Field::new("notes", "Notes", FieldType::RichText))
}

fn default_enum_options() -> Vec<String> {
    vec![
        "active".to_string(),
        "pending".to_string(),
        "archived".to_string(),
    ]
}

/// The fallback entity used when the intent yields nothing usable
#[must_use]
pub(crate) fn generic_entity() -> Entity {
    with_default_fields(Entity::new("record", "Record", "Records").with_timestamps()).with_display(
        DisplayConfig {
            title_field: "name".to_string(),
            subtitle_field: None,
            icon: None,
        },
    )
}

/// Deterministic name-based type heuristic for untyped field hints
fn infer_field_type(name: &str) -> FieldType {
    let name = field_id(name);
    if name.contains("email") {
        FieldType::Email
    } else if name.contains("phone") {
        FieldType::Phone
    } else if name.contains("url") || name.contains("website") {
        FieldType::Url
    } else if name.contains("image") || name.contains("photo") || name.contains("avatar") {
        FieldType::Image
    } else if name.contains("price")
        || name.contains("total")
        || name.contains("amount")
        || name.contains("cost")
    {
        FieldType::Currency
    } else if name.contains("percent") || name.contains("rate") {
        FieldType::Percentage
    } else if name.ends_with("_at") || name.contains("date") {
        FieldType::Date
    } else if name.contains("count")
        || name.contains("quantity")
        || name.contains("qty")
        || name.contains("age")
    {
        FieldType::Number
    } else if name.starts_with("is_") || name.contains("enabled") || name.contains("active") {
        FieldType::Boolean
    } else if name.contains("status") {
        FieldType::Enum
    } else if name.contains("notes") || name.contains("description") {
        FieldType::RichText
    } else {
        FieldType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_schema::{ExtractedDetails, ExtractedField, IntentType, ProcessedIntent};

    fn ctx_for(intent: &ProcessedIntent) -> GeneratorContext<'_> {
        GeneratorContext::new(intent)
    }

    #[test]
    fn empty_intent_yields_generic_entity() {
        let intent = ProcessedIntent::new("", IntentType::Unknown);
        let entities = build(&ctx_for(&intent));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "record");
        assert!(entities[0].has_field("name"));
    }

    #[test]
    fn hints_win_over_kit() {
        let intent = ProcessedIntent::new("track gear", IntentType::CreateApp)
            .with_behavior("booking")
            .with_details(ExtractedDetails {
                entities: vec![appforge_schema::ExtractedEntity::new("Gear Item")],
                pages: Vec::new(),
                features: Vec::new(),
            });
        let entities = build(&ctx_for(&intent));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "gear-item");
        assert_eq!(entities[0].plural_name, "Gear Items");
    }

    #[test]
    fn field_hints_get_heuristic_types() {
        let hint = appforge_schema::ExtractedEntity::new("Contact")
            .with_field(ExtractedField::new("Email Address"))
            .with_field(ExtractedField::new("Phone"))
            .with_field(ExtractedField::new("Hourly Rate"));
        let intent = ProcessedIntent::new("contacts", IntentType::CreateApp).with_details(
            ExtractedDetails {
                entities: vec![hint],
                pages: Vec::new(),
                features: Vec::new(),
            },
        );

        let entities = build(&ctx_for(&intent));
        let contact = &entities[0];
        assert_eq!(
            contact.field("email_address").unwrap().field_type,
            FieldType::Email
        );
        assert_eq!(contact.field("phone").unwrap().field_type, FieldType::Phone);
        assert_eq!(
            contact.field("hourly_rate").unwrap().field_type,
            FieldType::Percentage
        );
    }

    #[test]
    fn duplicate_hints_collapse() {
        let intent = ProcessedIntent::new("x", IntentType::CreateApp).with_details(
            ExtractedDetails {
                entities: vec![
                    appforge_schema::ExtractedEntity::new("Task"),
                    appforge_schema::ExtractedEntity::new("task"),
                ],
                pages: Vec::new(),
                features: Vec::new(),
            },
        );
        assert_eq!(build(&ctx_for(&intent)).len(), 1);
    }

    #[test]
    fn generation_is_deterministic() {
        let intent = ProcessedIntent::new("book appointments", IntentType::CreateApp)
            .with_behavior("booking");
        assert_eq!(build(&ctx_for(&intent)), build(&ctx_for(&intent)));
    }
}
