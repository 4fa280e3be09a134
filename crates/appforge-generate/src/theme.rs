//! Stage 5: theme construction

use crate::context::GeneratorContext;
use appforge_schema::Theme;

/// Pick the theme: the kit's preset when one resolved, else the neutral
/// default token set.
#[must_use]
pub(crate) fn build(ctx: &GeneratorContext<'_>) -> Theme {
    ctx.kit
        .as_ref()
        .map_or_else(Theme::default, |kit| kit.theme.clone())
}
