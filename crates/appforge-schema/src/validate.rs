//! Blueprint validation
//!
//! All-or-nothing: [`Validator::parse`] either returns a fully valid
//! [`AppBlueprint`] or the complete list of `{path, message}` issues —
//! never a partially valid blueprint. Every producer re-validates through
//! here: the generation pipeline before handing a blueprint downstream, and
//! the migration engine after every structural edit.

use crate::blueprint::AppBlueprint;
use crate::entity::Entity;
use crate::field::FieldType;
use crate::page::Page;
use crate::workflow::Workflow;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// One validation problem, addressed by a JSON-path-like string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where in the blueprint the problem sits (e.g. `entities[1].fields[0]`)
    pub path: String,
    /// What is wrong
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validation failure — a non-empty list of issues
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("blueprint validation failed with {} issue(s)", issues.len())]
pub struct ValidationErrors {
    /// All issues found, in document order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    /// First issue, for quick diagnostics
    #[inline]
    #[must_use]
    pub fn first(&self) -> &ValidationIssue {
        &self.issues[0]
    }
}

/// Stateless blueprint validator
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    /// Parse raw JSON into a validated blueprint
    ///
    /// # Errors
    /// Returns every issue found; no blueprint is returned unless all
    /// invariants hold.
    pub fn parse(raw: Value) -> Result<AppBlueprint, ValidationErrors> {
        let blueprint: AppBlueprint = serde_json::from_value(raw).map_err(|e| {
            ValidationErrors {
                issues: vec![ValidationIssue::new("$", format!("malformed blueprint: {e}"))],
            }
        })?;
        Self::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Validate an already-typed blueprint
    ///
    /// # Errors
    /// Returns every issue found.
    pub fn validate(blueprint: &AppBlueprint) -> Result<(), ValidationErrors> {
        let mut issues = Vec::new();

        if blueprint.id.is_empty() {
            issues.push(ValidationIssue::new("id", "blueprint id must not be empty"));
        }
        if blueprint.name.is_empty() {
            issues.push(ValidationIssue::new("name", "blueprint name must not be empty"));
        }

        check_bounds(blueprint, &mut issues);
        check_entities(blueprint, &mut issues);
        check_pages(blueprint, &mut issues);
        check_workflows(blueprint, &mut issues);
        check_navigation(blueprint, &mut issues);

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { issues })
        }
    }
}

fn check_bounds(blueprint: &AppBlueprint, issues: &mut Vec<ValidationIssue>) {
    if blueprint.entities.len() > AppBlueprint::MAX_ENTITIES {
        issues.push(ValidationIssue::new(
            "entities",
            format!(
                "{} entities exceeds the limit of {}",
                blueprint.entities.len(),
                AppBlueprint::MAX_ENTITIES
            ),
        ));
    }
    if blueprint.pages.len() > AppBlueprint::MAX_PAGES {
        issues.push(ValidationIssue::new(
            "pages",
            format!(
                "{} pages exceeds the limit of {}",
                blueprint.pages.len(),
                AppBlueprint::MAX_PAGES
            ),
        ));
    }
    if blueprint.workflows.len() > AppBlueprint::MAX_WORKFLOWS {
        issues.push(ValidationIssue::new(
            "workflows",
            format!(
                "{} workflows exceeds the limit of {}",
                blueprint.workflows.len(),
                AppBlueprint::MAX_WORKFLOWS
            ),
        ));
    }
    let components = blueprint.total_component_count();
    if components > AppBlueprint::MAX_COMPONENTS {
        issues.push(ValidationIssue::new(
            "pages",
            format!(
                "{components} components across all pages exceeds the limit of {}",
                AppBlueprint::MAX_COMPONENTS
            ),
        ));
    }
}

fn check_entities(blueprint: &AppBlueprint, issues: &mut Vec<ValidationIssue>) {
    let mut entity_ids = HashSet::new();
    for (i, entity) in blueprint.entities.iter().enumerate() {
        let path = format!("entities[{i}]");
        if entity.id.is_empty() {
            issues.push(ValidationIssue::new(&path, "entity id must not be empty"));
        }
        if !entity_ids.insert(entity.id.as_str()) {
            issues.push(ValidationIssue::new(
                &path,
                format!("duplicate entity id '{}'", entity.id),
            ));
        }
        check_fields(blueprint, entity, &path, issues);
    }
}

fn check_fields(
    blueprint: &AppBlueprint,
    entity: &Entity,
    entity_path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut field_ids = HashSet::new();
    for (i, field) in entity.fields.iter().enumerate() {
        let path = format!("{entity_path}.fields[{i}]");
        if field.id.is_empty() {
            issues.push(ValidationIssue::new(&path, "field id must not be empty"));
        }
        if !field_ids.insert(field.id.as_str()) {
            issues.push(ValidationIssue::new(
                &path,
                format!("duplicate field id '{}'", field.id),
            ));
        }

        // reference descriptor present iff type is reference
        match (&field.reference, field.field_type) {
            (Some(descriptor), FieldType::Reference) => {
                match blueprint.entity(&descriptor.target_entity) {
                    None => issues.push(ValidationIssue::new(
                        format!("{path}.reference"),
                        format!("unknown target entity '{}'", descriptor.target_entity),
                    )),
                    Some(target) => {
                        if !target.has_field(&descriptor.display_field) {
                            issues.push(ValidationIssue::new(
                                format!("{path}.reference"),
                                format!(
                                    "display field '{}' does not exist on entity '{}'",
                                    descriptor.display_field, descriptor.target_entity
                                ),
                            ));
                        }
                    }
                }
            }
            (Some(_), _) => issues.push(ValidationIssue::new(
                &path,
                format!(
                    "field type '{}' must not carry a reference descriptor",
                    field.field_type
                ),
            )),
            (None, FieldType::Reference) => issues.push(ValidationIssue::new(
                &path,
                "reference field is missing its reference descriptor",
            )),
            (None, _) => {}
        }

        // enum options present iff type is enum
        match (&field.options, field.field_type) {
            (Some(options), FieldType::Enum) => {
                if options.is_empty() {
                    issues.push(ValidationIssue::new(
                        &path,
                        "enum field must declare at least one option",
                    ));
                }
            }
            (Some(_), _) => issues.push(ValidationIssue::new(
                &path,
                format!("field type '{}' must not declare options", field.field_type),
            )),
            (None, FieldType::Enum) => issues.push(ValidationIssue::new(
                &path,
                "enum field must declare its options",
            )),
            (None, _) => {}
        }
    }
}

fn check_pages(blueprint: &AppBlueprint, issues: &mut Vec<ValidationIssue>) {
    let mut page_ids = HashSet::new();
    for (i, page) in blueprint.pages.iter().enumerate() {
        let path = format!("pages[{i}]");
        if page.id.is_empty() {
            issues.push(ValidationIssue::new(&path, "page id must not be empty"));
        }
        if !page_ids.insert(page.id.as_str()) {
            issues.push(ValidationIssue::new(
                &path,
                format!("duplicate page id '{}'", page.id),
            ));
        }
        if !is_route_well_formed(&page.route) {
            issues.push(ValidationIssue::new(
                format!("{path}.route"),
                format!("route '{}' is not a well-formed URL path", page.route),
            ));
        }
        if let Some(entity_id) = &page.entity {
            if blueprint.entity(entity_id).is_none() {
                issues.push(ValidationIssue::new(
                    format!("{path}.entity"),
                    format!("unknown entity '{entity_id}'"),
                ));
            }
        }
        check_page_components(page, &path, issues);
    }
}

fn check_page_components(page: &Page, page_path: &str, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    let mut stack: Vec<&crate::component::Component> =
        page.components.iter().map(AsRef::as_ref).collect();
    while let Some(component) = stack.pop() {
        if component.id.is_empty() {
            issues.push(ValidationIssue::new(
                format!("{page_path}.components"),
                "component id must not be empty",
            ));
        }
        if !seen.insert(component.id.clone()) {
            issues.push(ValidationIssue::new(
                format!("{page_path}.components"),
                format!("duplicate component id '{}'", component.id),
            ));
        }
        stack.extend(component.children.iter().map(AsRef::as_ref));
    }
}

fn check_workflows(blueprint: &AppBlueprint, issues: &mut Vec<ValidationIssue>) {
    let mut workflow_ids = HashSet::new();
    for (i, workflow) in blueprint.workflows.iter().enumerate() {
        let path = format!("workflows[{i}]");
        if !workflow_ids.insert(workflow.id.as_str()) {
            issues.push(ValidationIssue::new(
                &path,
                format!("duplicate workflow id '{}'", workflow.id),
            ));
        }
        let count = workflow.actions.len();
        if !(Workflow::MIN_ACTIONS..=Workflow::MAX_ACTIONS).contains(&count) {
            issues.push(ValidationIssue::new(
                format!("{path}.actions"),
                format!(
                    "{count} actions outside the allowed range {}–{}",
                    Workflow::MIN_ACTIONS,
                    Workflow::MAX_ACTIONS
                ),
            ));
        }
    }
}

fn check_navigation(blueprint: &AppBlueprint, issues: &mut Vec<ValidationIssue>) {
    for (surface, rules) in &blueprint.navigation {
        for (i, rule) in rules.iter().enumerate() {
            let path = format!("navigation.{surface}[{i}]");
            if blueprint.page(&rule.from_page).is_none() {
                issues.push(ValidationIssue::new(
                    &path,
                    format!("unknown source page '{}'", rule.from_page),
                ));
            }
            if blueprint.page(&rule.to_page).is_none() {
                issues.push(ValidationIssue::new(
                    &path,
                    format!("unknown destination page '{}'", rule.to_page),
                ));
            }
        }
    }
}

/// Check route well-formedness: `/` or `/segment/:param/...` with
/// lowercase-alphanumeric, `-` and `_` segments, no empty segments.
fn is_route_well_formed(route: &str) -> bool {
    if route == "/" {
        return true;
    }
    let Some(rest) = route.strip_prefix('/') else {
        return false;
    };
    if rest.is_empty() || rest.ends_with('/') {
        return false;
    }
    rest.split('/').all(|segment| {
        let segment = segment.strip_prefix(':').unwrap_or(segment);
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::field::{Field, ReferenceDescriptor};
    use crate::page::PageType;
    use crate::workflow::{Action, Trigger};
    use serde_json::json;

    fn valid_blueprint() -> AppBlueprint {
        let mut blueprint = AppBlueprint::new("crm", "CRM");
        blueprint.entities.push(
            Entity::new("customer", "Customer", "Customers")
                .with_field(Field::new("name", "Name", FieldType::String).required()),
        );
        blueprint.entities.push(
            Entity::new("order", "Order", "Orders")
                .with_field(Field::new("total", "Total", FieldType::Currency))
                .with_field(Field::reference(
                    "customer",
                    "Customer",
                    ReferenceDescriptor::new("customer", "name"),
                )),
        );
        blueprint.pages.push(
            Page::new("orders", "Orders", "/orders", PageType::List)
                .with_entity("order")
                .with_component(Component::new("orders-table", "table")),
        );
        blueprint
    }

    #[test]
    fn valid_blueprint_passes() {
        assert!(Validator::validate(&valid_blueprint()).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = Validator::parse(json!({ "id": "x" })).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.first().path, "$");
    }

    #[test]
    fn parse_accepts_serialized_blueprint() {
        let raw = serde_json::to_value(valid_blueprint()).unwrap();
        let parsed = Validator::parse(raw).unwrap();
        assert_eq!(parsed.id, "crm");
    }

    #[test]
    fn reference_without_descriptor_is_rejected() {
        let mut blueprint = valid_blueprint();
        blueprint.entities[1].fields[1].reference = None;

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|i| i.message.contains("missing its reference descriptor")));
    }

    #[test]
    fn descriptor_on_non_reference_is_rejected() {
        let mut blueprint = valid_blueprint();
        blueprint.entities[0].fields[0].reference =
            Some(ReferenceDescriptor::new("order", "total"));

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|i| i.message.contains("must not carry a reference descriptor")));
    }

    #[test]
    fn unknown_reference_target_is_rejected() {
        let mut blueprint = valid_blueprint();
        blueprint.entities[1].fields[1].reference =
            Some(ReferenceDescriptor::new("supplier", "name"));

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|i| i.message.contains("unknown target entity 'supplier'")));
    }

    #[test]
    fn malformed_routes_are_rejected() {
        for route in ["orders", "/Orders", "/orders/", "//orders", "/orders//x", ""] {
            let mut blueprint = valid_blueprint();
            blueprint.pages[0].route = route.to_string();
            assert!(
                Validator::validate(&blueprint).is_err(),
                "route '{route}' should be rejected"
            );
        }
    }

    #[test]
    fn param_routes_are_accepted() {
        let mut blueprint = valid_blueprint();
        blueprint.pages[0].route = "/orders/:id".to_string();
        assert!(Validator::validate(&blueprint).is_ok());
    }

    #[test]
    fn workflow_action_bounds_enforced() {
        let mut blueprint = valid_blueprint();
        blueprint.workflows.push(Workflow::new(
            "empty",
            "Empty",
            Trigger::Manual,
        ));

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err.issues.iter().any(|i| i.path == "workflows[0].actions"));

        let mut workflow = Workflow::new(
            "busy",
            "Busy",
            Trigger::RecordCreated {
                entity: "order".to_string(),
            },
        );
        for _ in 0..11 {
            workflow = workflow.with_action(Action::Notify {
                message: "hi".to_string(),
            });
        }
        blueprint.workflows[0] = workflow;
        assert!(Validator::validate(&blueprint).is_err());
    }

    #[test]
    fn entity_limit_enforced() {
        let mut blueprint = valid_blueprint();
        for i in 0..AppBlueprint::MAX_ENTITIES {
            blueprint
                .entities
                .push(Entity::new(format!("extra-{i}"), "Extra", "Extras"));
        }

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err.issues.iter().any(|i| i.path == "entities"));
    }

    #[test]
    fn duplicate_field_ids_rejected() {
        let mut blueprint = valid_blueprint();
        let duplicate = blueprint.entities[0].fields[0].clone();
        blueprint.entities[0].fields.push(duplicate);

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|i| i.message.contains("duplicate field id 'name'")));
    }

    #[test]
    fn navigation_endpoints_must_exist() {
        let mut blueprint = valid_blueprint();
        blueprint.navigation.insert(
            crate::page::Surface::Admin,
            vec![crate::navigation::NavigationRule::new(
                "orders",
                "missing",
                crate::navigation::NavigationTrigger::Click,
            )],
        );

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|i| i.message.contains("unknown destination page 'missing'")));
    }

    #[test]
    fn all_issues_are_collected() {
        let mut blueprint = valid_blueprint();
        blueprint.pages[0].route = "bad".to_string();
        blueprint.entities[1].fields[1].reference = None;

        let err = Validator::validate(&blueprint).unwrap_err();
        assert!(err.issues.len() >= 2);
    }
}
