//! Cross-engine migration laws and the stored-data scenarios

use appforge_migrate::{
    apply_to_records, FieldEngine, Migration, MigrationEngine, MigrationOp,
};
use appforge_schema::{Component, Field, FieldType, Validator};
use appforge_test_utils::{crm_blueprint, order_entity, order_records};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn retyping_total_converts_stored_records() {
    // Entity `Order` has fields [id: string, total: number]; retype total to
    // string and the emitted transform must turn {total: 42} into {total: "42"}.
    let entity = order_entity();
    let migration = Migration::update_field_type("order", "total", FieldType::String);

    let (next, data) = FieldEngine::apply(&entity, &migration).unwrap();
    assert_eq!(next.field("total").unwrap().field_type, FieldType::String);

    let mut records = vec![{
        let mut record = appforge_schema::Record::new();
        record.insert("total".to_string(), json!(42));
        record
    }];
    apply_to_records(&data.unwrap(), &mut records);
    assert_eq!(records[0]["total"], json!("42"));
}

#[test]
fn add_field_backfills_existing_records() {
    let blueprint = crm_blueprint();
    let migration = Migration::add_field(
        "order",
        Field::new("discount", "Discount", FieldType::Number).with_default(json!(0)),
    );

    let (after, data) = MigrationEngine::apply(&blueprint, &migration).unwrap();
    assert!(Validator::validate(&after).is_ok());

    let mut records = order_records(4);
    apply_to_records(&data.unwrap(), &mut records);
    assert!(records.iter().all(|r| r["discount"] == json!(0)));
}

#[test]
fn migrated_blueprints_keep_validating() {
    let blueprint = crm_blueprint();
    let migrations = vec![
        Migration::add_field(
            "customer",
            Field::new("phone", "Phone", FieldType::Phone),
        ),
        Migration::rename_field("order", "total", "Order Total"),
        Migration::new(MigrationOp::AddComponent {
            page: "orders".to_string(),
            parent: None,
            index: Some(0),
            component: Component::new("orders-header", "header"),
        }),
        Migration::update_field_type("order", "total", FieldType::Currency),
    ];

    let mut current = blueprint;
    for migration in &migrations {
        let (next, _) = MigrationEngine::apply(&current, migration).unwrap();
        assert!(Validator::validate(&next).is_ok());
        current = next;
    }
    assert_eq!(current.version, 5);
}

fn field_id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}".prop_filter("must not collide with fixture fields", |id| {
        id != "id" && id != "total"
    })
}

proptest! {
    // Additive/subtractive inverse law: AddField(f) then RemoveField(f)
    // returns the field set to the original.
    #[test]
    fn add_then_remove_is_identity(field_id in field_id_strategy(), required in any::<bool>()) {
        let entity = order_entity();
        let mut field = Field::new(field_id.clone(), "Extra", FieldType::String);
        if required {
            field = field.required();
        }

        let (with_field, _) =
            FieldEngine::apply(&entity, &Migration::add_field("order", field)).unwrap();
        let (restored, _) =
            FieldEngine::apply(&with_field, &Migration::remove_field("order", field_id)).unwrap();

        prop_assert_eq!(restored.fields, entity.fields);
    }

    // Number -> String -> Number round-trips every numeric payload the
    // compatibility table can see.
    #[test]
    fn numeric_string_roundtrip(value in -1_000_000..1_000_000_i64) {
        let to_string =
            appforge_migrate::transform_for(FieldType::Number, FieldType::String).unwrap();
        let to_number =
            appforge_migrate::transform_for(FieldType::String, FieldType::Number).unwrap();

        let there = to_string(&json!(value));
        let back = to_number(&there);
        #[allow(clippy::cast_precision_loss)]
        let expected = value as f64;
        prop_assert_eq!(back, json!(expected));
    }
}
