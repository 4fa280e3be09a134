//! The generation pipeline
//!
//! Runs the builder stages in order, each a pure function of the context
//! accumulated so far, and assembles the resulting blueprint. The pipeline
//! never fails outward: sparse intent degrades to defaults, so the renderer
//! always receives a schema-valid blueprint.

use crate::context::GeneratorContext;
use crate::slug::{slugify, title_case};
use crate::{entities, navigation, pages, theme, workflows};
use appforge_schema::{AppBlueprint, IntentType, ProcessedIntent};

/// Deterministic intent → blueprint generator
#[derive(Debug, Default, Clone, Copy)]
pub struct BlueprintGenerator;

impl BlueprintGenerator {
    /// Create a generator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate a blueprint from a processed intent
    ///
    /// Identical intents yield byte-identical blueprints: every id derives
    /// from a stable slug, never from randomness or the clock.
    #[must_use]
    pub fn generate(&self, intent: &ProcessedIntent) -> AppBlueprint {
        let mut ctx = GeneratorContext::new(intent);
        tracing::debug!(intent_type = ?intent.intent_type, kit = ?ctx.kit.as_ref().map(|k| k.id), "generating blueprint");

        ctx.entities = entities::build(&ctx);
        tracing::debug!(count = ctx.entities.len(), "entities inferred");

        ctx.pages = pages::build(&ctx);
        tracing::debug!(count = ctx.pages.len(), "pages constructed");

        ctx.workflows = workflows::build(&ctx);
        ctx.navigation = navigation::build(&ctx);
        let theme = theme::build(&ctx);

        let name = app_name(&ctx);
        let mut blueprint = AppBlueprint::new(slugify(&name), name);
        blueprint.description = Some(description(intent));
        blueprint.behavior = ctx.kit.as_ref().map(|kit| kit.id.to_string());
        blueprint.surfaces = ctx.surfaces();
        blueprint.entities = ctx.entities;
        blueprint.pages = ctx.pages;
        blueprint.workflows = ctx.workflows;
        blueprint.navigation = ctx.navigation;
        blueprint.theme = theme;

        tracing::info!(
            id = %blueprint.id,
            entities = blueprint.entities.len(),
            pages = blueprint.pages.len(),
            workflows = blueprint.workflows.len(),
            "blueprint generated"
        );
        blueprint
    }
}

/// Derive the app name from the kit or the first words of the raw input
fn app_name(ctx: &GeneratorContext<'_>) -> String {
    if let Some(kit) = &ctx.kit {
        return kit.app_name.to_string();
    }
    let words: Vec<&str> = ctx.intent.raw_input.split_whitespace().take(4).collect();
    if words.is_empty() {
        "My App".to_string()
    } else {
        title_case(&words.join(" "))
    }
}

fn description(intent: &ProcessedIntent) -> String {
    match intent.intent_type {
        IntentType::CreateApp | IntentType::Unknown if !intent.raw_input.is_empty() => {
            format!("Generated from: {}", intent.raw_input)
        }
        _ => "Generated application".to_string(),
    }
}
