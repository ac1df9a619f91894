//! Gifts call-to-action and the letter modal.

use crate::presentation::Cx;
use crate::presentation::trace::TraceKind;
use crate::stage::control::ControlId;

/// Unhide the "see gifts" control and try to focus it. Returns `false` when it is not on the page.
pub(crate) fn reveal_cta(cx: &mut Cx<'_>) -> bool {
    if !cx.stage.set_hidden(ControlId::SeeGifts, false) {
        tracing::debug!("no gifts call-to-action on the page");
        return false;
    }
    cx.state.gift_cta_revealed = true;
    let focused = match cx.stage.focus_control(ControlId::SeeGifts) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "could not focus gifts call-to-action");
            false
        }
    };
    cx.record(TraceKind::GiftCtaRevealed { focused });
    true
}

/// Show the letter and move focus into it. No-op without a modal.
pub(crate) fn open_letter(cx: &mut Cx<'_>) -> bool {
    let Some(modal) = cx.stage.modal_mut() else {
        return false;
    };
    modal.open();
    if let Err(e) = cx.stage.focus_letter_inner() {
        tracing::debug!(error = %e, "could not focus letter content");
    }
    cx.record(TraceKind::LetterOpened);
    true
}

/// Hide the letter. Idempotent; returns `true` only if it was open.
pub(crate) fn close_letter(cx: &mut Cx<'_>) -> bool {
    let Some(modal) = cx.stage.modal_mut() else {
        return false;
    };
    let was_open = modal.close();
    cx.stage.blur_letter();
    if was_open {
        cx.record(TraceKind::LetterClosed);
    }
    was_open
}
