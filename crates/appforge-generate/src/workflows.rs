//! Stage 3: workflow construction
//!
//! Starts from the kit's presets, then materializes workflows for feature
//! keywords the extractor surfaced. Workflows reference entities from stage 1.

use crate::context::GeneratorContext;
use crate::slug::slugify;
use appforge_schema::{Action, AppBlueprint, Entity, FieldType, Trigger, Workflow};

/// Build the workflow set from the accumulated context
#[must_use]
pub(crate) fn build(ctx: &GeneratorContext<'_>) -> Vec<Workflow> {
    let mut workflows: Vec<Workflow> = ctx
        .kit
        .as_ref()
        .map(|kit| kit.workflows.clone())
        .unwrap_or_default();

    // Kit workflows only survive if their entities did (hints may have
    // replaced the kit's preset entities entirely).
    workflows.retain(|w| trigger_resolves(w, &ctx.entities));

    for feature in &ctx.intent.details().features {
        let feature = slugify(feature);
        let built = if feature.contains("notification") || feature.contains("email") {
            notification_workflow(&ctx.entities)
        } else if feature.contains("reminder") {
            reminder_workflow(&ctx.entities)
        } else if feature.contains("approval") {
            approval_workflow(&ctx.entities)
        } else {
            None
        };
        if let Some(workflow) = built {
            if !workflows.iter().any(|w| w.id == workflow.id) {
                workflows.push(workflow);
            }
        }
    }

    workflows.truncate(AppBlueprint::MAX_WORKFLOWS);
    workflows
}

fn trigger_resolves(workflow: &Workflow, entities: &[Entity]) -> bool {
    match &workflow.trigger {
        Trigger::RecordCreated { entity }
        | Trigger::RecordUpdated { entity }
        | Trigger::RecordDeleted { entity } => entities.iter().any(|e| e.id == *entity),
        Trigger::FormSubmitted { .. } | Trigger::Schedule { .. } | Trigger::Manual => true,
    }
}

fn notification_workflow(entities: &[Entity]) -> Option<Workflow> {
    let entity = entities.first()?;
    let email_field = entity
        .fields
        .iter()
        .find(|f| f.field_type == FieldType::Email);
    let action = match email_field {
        Some(field) => Action::SendEmail {
            to: format!("{{{{record.{}}}}}", field.id),
            subject: format!("New {}", entity.name),
            body: format!("A new {} was created.", entity.name.to_lowercase()),
        },
        None => Action::Notify {
            message: format!("A new {} was created.", entity.name.to_lowercase()),
        },
    };

    Some(
        Workflow::new(
            format!("notify-on-{}-created", entity.id),
            format!("Notify on new {}", entity.name.to_lowercase()),
            Trigger::RecordCreated {
                entity: entity.id.clone(),
            },
        )
        .with_action(action),
    )
}

fn reminder_workflow(entities: &[Entity]) -> Option<Workflow> {
    let entity = entities.first()?;
    Some(
        Workflow::new(
            "daily-reminder",
            "Daily reminder",
            Trigger::Schedule {
                cron: "0 9 * * *".to_string(),
            },
        )
        .with_action(Action::Notify {
            message: format!("You have open {} to review.", entity.plural_name.to_lowercase()),
        }),
    )
}

fn approval_workflow(entities: &[Entity]) -> Option<Workflow> {
    let entity = entities.first()?;
    let status = entity
        .fields
        .iter()
        .find(|f| f.field_type == FieldType::Enum)?;
    let first_option = status.options.as_ref()?.first()?.clone();

    Some(
        Workflow::new(
            format!("{}-approval", entity.id),
            format!("{} approval", entity.name),
            Trigger::RecordCreated {
                entity: entity.id.clone(),
            },
        )
        .with_action(Action::Condition {
            expression: format!("record.{} == '{first_option}'", status.id),
            then_actions: vec![Action::Notify {
                message: format!("{} awaiting approval", entity.name),
            }],
            else_actions: vec![],
        }),
    )
}
