//! Deterministic identifiers
//!
//! Every id a generated blueprint carries is derived from a stable slug of a
//! name — never from random or time-based sources — so two generations of
//! the same intent are byte-identical and diffable.

use convert_case::{Case, Casing};

/// Kebab-case slug for entity/page/workflow ids
///
/// Non-alphanumeric input collapses to single dashes; an input with no
/// usable characters falls back to `item`.
#[must_use]
pub fn slugify(input: &str) -> String {
    let slug: String = input
        .to_case(Case::Kebab)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();
    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}

/// Snake-case slug for field ids
#[must_use]
pub fn field_id(name: &str) -> String {
    let id: String = name
        .to_case(Case::Snake)
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();
    let id = id.trim_matches('_').to_string();
    if id.is_empty() {
        "field".to_string()
    } else {
        id
    }
}

/// Title-case display name
#[must_use]
pub fn title_case(input: &str) -> String {
    input.to_case(Case::Title)
}

/// Naive English pluralization, good enough for display names
#[must_use]
pub fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if let Some(stem) = name.strip_suffix('y') {
        let before_y = lower.chars().rev().nth(1);
        if !matches!(before_y, Some('a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{name}es");
    }
    format!("{name}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_is_stable_and_safe() {
        assert_eq!(slugify("Customer Order"), "customer-order");
        assert_eq!(slugify("  Café &  Bar!  "), "caf-bar");
        assert_eq!(slugify("***"), "item");
        assert_eq!(slugify("Customer Order"), slugify("Customer Order"));
    }

    #[test]
    fn field_ids_are_snake_case() {
        assert_eq!(field_id("Email Address"), "email_address");
        assert_eq!(field_id("dueDate"), "due_date");
        assert_eq!(field_id("!!!"), "field");
    }

    #[test]
    fn pluralize_covers_common_endings() {
        assert_eq!(pluralize("Customer"), "Customers");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Batch"), "Batches");
    }
}
