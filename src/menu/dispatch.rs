//! Attribute-scoped page callback invocation.
//!
//! Every real callback invocation is bracketed by the attribute save/restore
//! control sequences, so color or style changes a page makes while handling
//! an event cannot leak into the next page's rendering. A missing callback is
//! a no-op that leaves the session in menu-choice mode.

use super::view::View;
use super::{Error, Event, InputKind, Page};
use crate::console::labels;

/// Invoke `page` for `item` with `event`, attribute-bracketed.
pub(crate) fn invoke(
    view: &mut View<'_>,
    page: Option<&dyn Page>,
    item: usize,
    event: Event,
) -> Result<InputKind, Error> {
    let Some(page) = page else {
        return Ok(InputKind::Choice);
    };
    view.screen.control(labels::ATTR_SAVE, &[])?;
    let kind = page.invoke(view, item, event);
    view.screen.control(labels::ATTR_RESTORE, &[])?;
    Ok(kind)
}
