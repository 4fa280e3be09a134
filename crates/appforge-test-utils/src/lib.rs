//! Testing utilities for the AppForge workspace
//!
//! Shared fixtures used by the other crates' tests.

#![allow(missing_docs)]

use appforge_schema::{
    Action, AppBlueprint, Component, Entity, Field, FieldType, Page, PageType, Record,
    ReferenceDescriptor, Trigger, Workflow,
};
use serde_json::json;

/// The `Order` entity from the type-change scenarios: `[id: string, total: number]`
pub fn order_entity() -> Entity {
    Entity::new("order", "Order", "Orders")
        .with_field(Field::new("id", "Id", FieldType::String))
        .with_field(Field::new("total", "Total", FieldType::Number))
}

/// A small CRM-shaped blueprint: customers, orders referencing them, a page
/// per entity with a component tree, and one workflow.
pub fn crm_blueprint() -> AppBlueprint {
    let mut blueprint = AppBlueprint::new("crm", "CRM");

    blueprint.entities.push(
        Entity::new("customer", "Customer", "Customers")
            .with_field(Field::new("name", "Name", FieldType::String).required())
            .with_field(Field::new("email", "Email", FieldType::Email).unique())
            .with_timestamps(),
    );
    blueprint.entities.push(
        order_entity().with_field(Field::reference(
            "customer",
            "Customer",
            ReferenceDescriptor::new("customer", "name"),
        )),
    );

    blueprint.pages.push(
        Page::new("customers", "Customers", "/customers", PageType::List)
            .with_entity("customer")
            .with_component(
                Component::new("customers-header", "header")
                    .with_prop("title", json!("Customers")),
            )
            .with_component(
                Component::new("customers-body", "container").with_child(
                    Component::new("customers-table", "table")
                        .with_prop("entity", json!("customer")),
                ),
            ),
    );
    blueprint.pages.push(
        Page::new("orders", "Orders", "/orders", PageType::List)
            .with_entity("order")
            .with_component(
                Component::new("orders-table", "table").with_prop("entity", json!("order")),
            ),
    );

    blueprint.workflows.push(
        Workflow::new(
            "welcome-email",
            "Welcome email",
            Trigger::RecordCreated {
                entity: "customer".to_string(),
            },
        )
        .with_action(Action::SendEmail {
            to: "{{record.email}}".to_string(),
            subject: "Welcome".to_string(),
            body: "Thanks for signing up.".to_string(),
        }),
    );

    blueprint
}

/// Stored order records shaped like the action executor would persist them
pub fn order_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let mut record = Record::new();
            record.insert("id".to_string(), json!(format!("order-{i}")));
            record.insert("total".to_string(), json!(i * 10));
            record
        })
        .collect()
}
