//! Behavior kits
//!
//! A detected behavior id selects a curated preset — entities, workflows and
//! a theme tuned for a known application shape. Unknown ids fall back to the
//! generic generation path.

use crate::slug::slugify;
use appforge_schema::{
    Action, DisplayConfig, Entity, Field, FieldType, ReferenceDescriptor, Theme, Trigger, Workflow,
};
use serde_json::json;

/// A curated preset for a recognized application shape
#[derive(Debug, Clone)]
pub struct BehaviorKit {
    /// Kit id as detected by the upstream collaborator
    pub id: &'static str,
    /// Default application name
    pub app_name: &'static str,
    /// Preset entities
    pub entities: Vec<Entity>,
    /// Preset workflows (entity ids refer to the preset entities)
    pub workflows: Vec<Workflow>,
    /// Kit theme
    pub theme: Theme,
}

/// Look up a kit by behavior id
#[must_use]
pub fn find(behavior: &str) -> Option<BehaviorKit> {
    match slugify(behavior).as_str() {
        "booking" => Some(booking()),
        "inventory" => Some(inventory()),
        "helpdesk" => Some(helpdesk()),
        _ => None,
    }
}

fn status_field(options: &[&str]) -> Field {
    Field::enumeration(
        "status",
        "Status",
        options.iter().map(ToString::to_string).collect(),
    )
    .with_default(json!(options[0]))
}

fn booking() -> BehaviorKit {
    let customer = Entity::new("customer", "Customer", "Customers")
        .with_field(Field::new("name", "Name", FieldType::String).required())
        .with_field(Field::new("email", "Email", FieldType::Email).required().unique())
        .with_field(Field::new("phone", "Phone", FieldType::Phone))
        .with_display(DisplayConfig {
            title_field: "name".to_string(),
            subtitle_field: Some("email".to_string()),
            icon: Some("user".to_string()),
        })
        .with_timestamps();

    let appointment = Entity::new("appointment", "Appointment", "Appointments")
        .with_field(Field::new("title", "Title", FieldType::String).required())
        .with_field(Field::new("scheduled_at", "Scheduled At", FieldType::DateTime).required())
        .with_field(Field::reference(
            "customer",
            "Customer",
            ReferenceDescriptor::new("customer", "name"),
        ))
        .with_field(status_field(&["pending", "confirmed", "cancelled"]))
        .with_field(Field::new("notes", "Notes", FieldType::RichText))
        .with_timestamps();

    let confirmation = Workflow::new(
        "appointment-confirmation",
        "Appointment confirmation",
        Trigger::RecordCreated {
            entity: "appointment".to_string(),
        },
    )
    .with_action(Action::SendEmail {
        to: "{{record.customer.email}}".to_string(),
        subject: "Your appointment is booked".to_string(),
        body: "See you at {{record.scheduledAt}}.".to_string(),
    });

    BehaviorKit {
        id: "booking",
        app_name: "Booking Manager",
        entities: vec![customer, appointment],
        workflows: vec![confirmation],
        theme: Theme {
            primary_color: "#0d9488".to_string(),
            secondary_color: "#115e59".to_string(),
            ..Theme::default()
        },
    }
}

fn inventory() -> BehaviorKit {
    let product = Entity::new("product", "Product", "Products")
        .with_field(Field::new("name", "Name", FieldType::String).required())
        .with_field(Field::new("sku", "SKU", FieldType::String).required().unique())
        .with_field(Field::new("price", "Price", FieldType::Currency).required())
        .with_field(Field::new("quantity", "Quantity", FieldType::Number).with_default(json!(0)))
        .with_field(Field::new("image", "Image", FieldType::Image))
        .with_timestamps();

    let order = Entity::new("order", "Order", "Orders")
        .with_field(Field::new("total", "Total", FieldType::Currency).required())
        .with_field(Field::reference(
            "product",
            "Product",
            ReferenceDescriptor::new("product", "name"),
        ))
        .with_field(status_field(&["placed", "shipped", "delivered"]))
        .with_timestamps();

    let low_stock = Workflow::new(
        "low-stock-alert",
        "Low stock alert",
        Trigger::RecordUpdated {
            entity: "product".to_string(),
        },
    )
    .with_action(Action::Condition {
        expression: "record.quantity < 5".to_string(),
        then_actions: vec![Action::Notify {
            message: "{{record.name}} is running low".to_string(),
        }],
        else_actions: vec![],
    });

    BehaviorKit {
        id: "inventory",
        app_name: "Inventory Tracker",
        entities: vec![product, order],
        workflows: vec![low_stock],
        theme: Theme {
            primary_color: "#d97706".to_string(),
            secondary_color: "#92400e".to_string(),
            ..Theme::default()
        },
    }
}

fn helpdesk() -> BehaviorKit {
    let customer = Entity::new("customer", "Customer", "Customers")
        .with_field(Field::new("name", "Name", FieldType::String).required())
        .with_field(Field::new("email", "Email", FieldType::Email).required())
        .with_timestamps();

    let ticket = Entity::new("ticket", "Ticket", "Tickets")
        .with_field(Field::new("subject", "Subject", FieldType::String).required())
        .with_field(Field::new("body", "Body", FieldType::RichText))
        .with_field(Field::reference(
            "customer",
            "Customer",
            ReferenceDescriptor::new("customer", "name"),
        ))
        .with_field(status_field(&["open", "in-progress", "resolved"]))
        .with_field(
            Field::enumeration(
                "priority",
                "Priority",
                vec!["low".to_string(), "normal".to_string(), "urgent".to_string()],
            )
            .with_default(json!("normal")),
        )
        .with_timestamps();

    let triage = Workflow::new(
        "ticket-triage",
        "Ticket triage",
        Trigger::RecordCreated {
            entity: "ticket".to_string(),
        },
    )
    .with_action(Action::Condition {
        expression: "record.priority == 'urgent'".to_string(),
        then_actions: vec![Action::Notify {
            message: "Urgent ticket: {{record.subject}}".to_string(),
        }],
        else_actions: vec![],
    });

    BehaviorKit {
        id: "helpdesk",
        app_name: "Helpdesk",
        entities: vec![customer, ticket],
        workflows: vec![triage],
        theme: Theme {
            primary_color: "#7c3aed".to_string(),
            secondary_color: "#5b21b6".to_string(),
            ..Theme::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kits_resolve() {
        assert!(find("booking").is_some());
        assert!(find("Inventory").is_some());
        assert!(find("helpdesk").is_some());
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn kit_references_resolve_within_the_kit() {
        let kit = find("booking").unwrap();
        let appointment = kit
            .entities
            .iter()
            .find(|e| e.id == "appointment")
            .unwrap();
        let reference = appointment.field("customer").unwrap().reference.as_ref().unwrap();
        assert!(kit.entities.iter().any(|e| e.id == reference.target_entity));
    }
}
