//! Component migration engine
//!
//! Applies one structural edit to a page's component tree using a
//! copy-on-write traversal: every node on the path from the page root to the
//! target is rebuilt (shallow copy with the mutation applied) while every
//! sibling subtree off that path is shared by `Arc` with the previous tree.
//! Any holder of the pre-mutation tree keeps observing the unmodified
//! structure, and no deep clone of the whole tree ever happens.

use crate::error::MigrationError;
use crate::migration::{DataMigration, Migration, MigrationOp};
use appforge_schema::{Component, Page};
use std::sync::Arc;

/// Stateless engine for component-tree edits on one page
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentEngine;

impl ComponentEngine {
    /// Apply a component migration to a page
    ///
    /// Component edits never reshape stored records, so the data-migration
    /// slot of the contract is always `None`.
    ///
    /// # Errors
    /// - [`MigrationError::ComponentNotFound`] when the target (or the named
    ///   parent of an insertion) is absent; the page is left byte-for-byte
    ///   unchanged
    /// - [`MigrationError::UnsupportedOperation`] for field operations
    pub fn apply(
        page: &Page,
        migration: &Migration,
    ) -> Result<(Page, Option<DataMigration>), MigrationError> {
        let next = match &migration.operation {
            MigrationOp::UpdateComponentProp {
                component,
                prop,
                value,
                ..
            } => Self::update_at(page, component, |c| {
                c.props.insert(prop.clone(), value.clone());
            })?,
            MigrationOp::UpdateComponentStyle {
                component,
                style,
                value,
                ..
            } => Self::update_at(page, component, |c| {
                c.styles.insert(style.clone(), value.clone());
            })?,
            MigrationOp::AddComponent {
                parent,
                index,
                component,
                ..
            } => Self::add(page, parent.as_deref(), *index, component)?,
            MigrationOp::RemoveComponent { component, .. } => Self::remove(page, component)?,
            other => {
                return Err(MigrationError::UnsupportedOperation(other.describe()));
            }
        };
        Ok((next, None))
    }

    fn update_at(
        page: &Page,
        component_id: &str,
        mutate: impl FnOnce(&mut Component),
    ) -> Result<Page, MigrationError> {
        let path = find_path(&page.components, component_id).ok_or_else(|| {
            MigrationError::ComponentNotFound {
                page: page.id.clone(),
                component: component_id.to_string(),
            }
        })?;

        let mut next = page.clone();
        next.components = rebuild_along(&page.components, &path, mutate);
        Ok(next)
    }

    fn add(
        page: &Page,
        parent: Option<&str>,
        index: Option<usize>,
        component: &Component,
    ) -> Result<Page, MigrationError> {
        let node = Arc::new(component.clone());
        match parent {
            None => {
                let mut next = page.clone();
                let at = index
                    .unwrap_or(next.components.len())
                    .min(next.components.len());
                next.components.insert(at, node);
                Ok(next)
            }
            Some(parent_id) => Self::update_at(page, parent_id, |parent| {
                let at = index
                    .unwrap_or(parent.children.len())
                    .min(parent.children.len());
                parent.children.insert(at, node);
            }),
        }
    }

    fn remove(page: &Page, component_id: &str) -> Result<Page, MigrationError> {
        let (components, removed) = prune(&page.components, component_id);
        if !removed {
            return Err(MigrationError::ComponentNotFound {
                page: page.id.clone(),
                component: component_id.to_string(),
            });
        }
        let mut next = page.clone();
        next.components = components;
        Ok(next)
    }
}

/// Child-index path from the root list to the component with `id`
fn find_path(roots: &[Arc<Component>], id: &str) -> Option<Vec<usize>> {
    for (i, root) in roots.iter().enumerate() {
        if let Some(mut path) = find_below(root, id) {
            path.insert(0, i);
            return Some(path);
        }
    }
    None
}

fn find_below(node: &Component, id: &str) -> Option<Vec<usize>> {
    if node.id == id {
        return Some(Vec::new());
    }
    for (i, child) in node.children.iter().enumerate() {
        if let Some(mut path) = find_below(child, id) {
            path.insert(0, i);
            return Some(path);
        }
    }
    None
}

/// Rebuild the nodes along `path`, sharing every sibling with the old tree
fn rebuild_along(
    roots: &[Arc<Component>],
    path: &[usize],
    mutate: impl FnOnce(&mut Component),
) -> Vec<Arc<Component>> {
    let mut next: Vec<Arc<Component>> = roots.iter().map(Arc::clone).collect();
    let index = path[0];
    next[index] = Arc::new(rebuild_node(&roots[index], &path[1..], mutate));
    next
}

fn rebuild_node(
    node: &Arc<Component>,
    path: &[usize],
    mutate: impl FnOnce(&mut Component),
) -> Component {
    // Shallow copy: child entries are Arc clones, so untouched subtrees are
    // shared, not duplicated.
    let mut copy = Component::clone(node);
    match path.split_first() {
        None => mutate(&mut copy),
        Some((&index, rest)) => {
            copy.children[index] = Arc::new(rebuild_node(&node.children[index], rest, mutate));
        }
    }
    copy
}

/// Recursive filter-and-prune; untouched subtrees are shared by reference
fn prune(roots: &[Arc<Component>], id: &str) -> (Vec<Arc<Component>>, bool) {
    let mut removed = false;
    let kept = roots
        .iter()
        .filter_map(|node| {
            if node.id == id {
                removed = true;
                return None;
            }
            if node.contains(id) {
                let mut copy = Component::clone(node);
                let (children, pruned) = prune(&node.children, id);
                copy.children = children;
                removed |= pruned;
                Some(Arc::new(copy))
            } else {
                Some(Arc::clone(node))
            }
        })
        .collect();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use appforge_schema::PageType;
    use serde_json::json;

    fn page() -> Page {
        Page::new("home", "Home", "/", PageType::Dashboard)
            .with_component(
                Component::new("header", "header").with_prop("title", json!("Home")),
            )
            .with_component(
                Component::new("body", "container")
                    .with_child(
                        Component::new("left", "column")
                            .with_child(Component::new("table", "table")),
                    )
                    .with_child(Component::new("right", "column")),
            )
    }

    #[test]
    fn update_prop_rebuilds_only_the_path() {
        let before = page();
        let migration = Migration::new(MigrationOp::UpdateComponentProp {
            page: "home".to_string(),
            component: "table".to_string(),
            prop: "dense".to_string(),
            value: json!(true),
        });

        let (after, data) = ComponentEngine::apply(&before, &migration).unwrap();
        assert!(data.is_none());
        assert_eq!(
            after.find_component("table").unwrap().props["dense"],
            json!(true)
        );

        // The pre-mutation tree is untouched.
        assert!(before.find_component("table").unwrap().props.get("dense").is_none());

        // Sibling subtrees off the path are shared, path nodes are not.
        assert!(Arc::ptr_eq(&before.components[0], &after.components[0]));
        assert!(!Arc::ptr_eq(&before.components[1], &after.components[1]));
        assert!(Arc::ptr_eq(
            &before.components[1].children[1],
            &after.components[1].children[1]
        ));
        assert!(!Arc::ptr_eq(
            &before.components[1].children[0],
            &after.components[1].children[0]
        ));
    }

    #[test]
    fn update_style_targets_styles() {
        let migration = Migration::new(MigrationOp::UpdateComponentStyle {
            page: "home".to_string(),
            component: "header".to_string(),
            style: "background".to_string(),
            value: json!("#fff"),
        });

        let (after, _) = ComponentEngine::apply(&page(), &migration).unwrap();
        assert_eq!(
            after.find_component("header").unwrap().styles["background"],
            json!("#fff")
        );
    }

    #[test]
    fn add_component_at_root_with_index() {
        let migration = Migration::new(MigrationOp::AddComponent {
            page: "home".to_string(),
            parent: None,
            index: Some(0),
            component: Component::new("banner", "banner"),
        });

        let (after, _) = ComponentEngine::apply(&page(), &migration).unwrap();
        assert_eq!(after.components[0].id, "banner");
        assert_eq!(after.components.len(), 3);
    }

    #[test]
    fn add_component_under_parent_appends() {
        let migration = Migration::new(MigrationOp::AddComponent {
            page: "home".to_string(),
            parent: Some("right".to_string()),
            index: None,
            component: Component::new("chart", "chart"),
        });

        let (after, _) = ComponentEngine::apply(&page(), &migration).unwrap();
        let right = after.find_component("right").unwrap();
        assert_eq!(right.children.len(), 1);
        assert_eq!(right.children[0].id, "chart");
    }

    #[test]
    fn add_under_missing_parent_leaves_tree_unchanged() {
        let before = page();
        let migration = Migration::new(MigrationOp::AddComponent {
            page: "home".to_string(),
            parent: Some("ghost".to_string()),
            index: None,
            component: Component::new("chart", "chart"),
        });

        let err = ComponentEngine::apply(&before, &migration).unwrap_err();
        assert!(matches!(err, MigrationError::ComponentNotFound { .. }));

        let reference = page();
        let a = serde_json::to_vec(&before).unwrap();
        let b = serde_json::to_vec(&reference).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn remove_component_prunes_at_depth() {
        let migration = Migration::new(MigrationOp::RemoveComponent {
            page: "home".to_string(),
            component: "table".to_string(),
        });

        let (after, _) = ComponentEngine::apply(&page(), &migration).unwrap();
        assert!(after.find_component("table").is_none());
        assert!(after.find_component("left").is_some());
        // The untouched sibling subtree is shared with the old tree.
        let before = page();
        assert_eq!(before.component_count(), after.component_count() + 1);
    }

    #[test]
    fn remove_missing_component_fails() {
        let migration = Migration::new(MigrationOp::RemoveComponent {
            page: "home".to_string(),
            component: "ghost".to_string(),
        });
        let err = ComponentEngine::apply(&page(), &migration).unwrap_err();
        assert!(matches!(err, MigrationError::ComponentNotFound { .. }));
    }

    #[test]
    fn field_operation_is_rejected_by_the_component_engine() {
        let migration = Migration::remove_field("order", "total");
        let err = ComponentEngine::apply(&page(), &migration).unwrap_err();
        assert!(matches!(err, MigrationError::UnsupportedOperation(_)));
    }
}
