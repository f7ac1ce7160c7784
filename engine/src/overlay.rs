//! Modal and section coordination.
//!
//! The controller owns which overlays are active, whether the backdrop is
//! shown, and one lease on the shared scroll lock. Every operation is total:
//! ids that are not in the document, or not in the right state, are ignored.
//!
//! Exclusivity rules:
//! - opening a modal closes everything else first
//! - opening a section closes other sections but leaves an open modal alone
//!
//! Opens assign the fragment (one history entry each). Explicit closes clear
//! it in place when it names the closed overlay.

use std::{collections::BTreeSet, mem::take};

use folio_types::ui::{ScrollLease, ScrollLock};
use tracing::{debug, trace};

use crate::context::PageContext;

#[derive(Debug, Default)]
pub struct OverlayController {
    active_modal: Option<String>,
    active_sections: BTreeSet<String>,
    backdrop_visible: bool,
    lease: Option<ScrollLease>,
}

impl OverlayController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close every overlay, then open modal `id` and point the fragment at it.
    pub fn open_modal(&mut self, ctx: &mut PageContext, id: &str) {
        let Some(modal) = ctx.document.modal(id) else {
            trace!(id, "open_modal ignored: no such modal");
            return;
        };
        let id = modal.id.clone();
        let public_id = modal.public_id().to_owned();
        let requests_backdrop = modal.requests_backdrop() && ctx.document.has_backdrop();

        if self.active_modal.as_deref() == Some(id.as_str()) && self.active_sections.is_empty() {
            self.mark_fragment(ctx, &public_id);
            return;
        }

        self.reset(ctx, false);
        self.active_modal = Some(id);
        self.backdrop_visible = requests_backdrop;
        self.sync_scroll_lock(&ctx.scroll);
        self.mark_fragment(ctx, &public_id);
        debug!(modal = %public_id, "Modal opened");
    }

    /// Close modal `id` if it is the active one.
    pub fn close_modal(&mut self, ctx: &mut PageContext, id: &str) {
        if self.active_modal.as_deref() != Some(id) {
            trace!(id, "close_modal ignored: not the active modal");
            return;
        }
        self.active_modal = None;

        let modal = ctx.document.modal(id);
        let public_id = modal.map_or(id, |modal| modal.public_id()).to_owned();
        if modal.is_some_and(|modal| modal.requests_backdrop()) && self.active_sections.is_empty() {
            self.backdrop_visible = false;
        }
        clear_fragment_if(ctx, &[id, &public_id]);
        self.sync_scroll_lock(&ctx.scroll);
        debug!(modal = %public_id, "Modal closed");
    }

    /// Open section `id`, closing any other section. An open modal stays open.
    pub fn open_section(&mut self, ctx: &mut PageContext, id: &str) {
        let Some(section) = ctx.document.section(id) else {
            trace!(id, "open_section ignored: no such collapsible section");
            return;
        };
        let id = section.id.clone();

        let others: Vec<String> = self
            .active_sections
            .iter()
            .filter(|active| **active != id)
            .cloned()
            .collect();
        for other in &others {
            self.active_sections.remove(other);
        }

        self.active_sections.insert(id.clone());
        if ctx.document.has_backdrop() {
            self.backdrop_visible = true;
        }
        self.sync_scroll_lock(&ctx.scroll);
        self.mark_fragment(ctx, &id);
        debug!(section = %id, replaced = ?others, "Section opened");
    }

    /// Close section `id`.
    ///
    /// With `hide_backdrop_if_empty`, the backdrop goes away once no section
    /// is left, unless the open modal asked for it. The scroll lock always
    /// follows the remaining overlays.
    pub fn close_section(&mut self, ctx: &mut PageContext, id: &str, hide_backdrop_if_empty: bool) {
        if ctx.document.section(id).is_none() {
            trace!(id, "close_section ignored: no such collapsible section");
            return;
        }
        self.active_sections.remove(id);
        clear_fragment_if(ctx, &[id]);

        if hide_backdrop_if_empty && self.active_sections.is_empty() {
            self.backdrop_visible = self.modal_requests_backdrop(ctx);
        }
        self.sync_scroll_lock(&ctx.scroll);
        debug!(section = id, "Section closed");
    }

    /// Reset: no modal, no sections, no backdrop, and this controller's
    /// scroll lease dropped.
    pub fn close_all(&mut self, ctx: &mut PageContext) {
        self.reset(ctx, true);
        trace!("All overlays closed");
    }

    /// Open whatever overlay the current fragment names.
    ///
    /// Modals answer to their public alias, sections to their id. Anything
    /// else, including an empty fragment, is ignored.
    pub fn handle_fragment_change(&mut self, ctx: &mut PageContext) {
        let Some(fragment) = ctx.location.fragment().map(str::to_owned) else {
            return;
        };
        let Some(target) = ctx.document.for_fragment(&fragment) else {
            trace!(fragment = %fragment, "Fragment names no overlay");
            return;
        };
        let id = target.id.clone();
        if target.is_modal() {
            self.open_modal(ctx, &id);
        } else {
            self.open_section(ctx, &id);
        }
    }

    #[must_use]
    pub fn active_modal(&self) -> Option<&str> {
        self.active_modal.as_deref()
    }

    /// The active section, if any. There is never more than one.
    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.active_sections.iter().next().map(String::as_str)
    }

    pub fn active_sections(&self) -> impl Iterator<Item = &str> {
        self.active_sections.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_modal_active(&self, id: &str) -> bool {
        self.active_modal.as_deref() == Some(id)
    }

    #[must_use]
    pub fn is_section_active(&self, id: &str) -> bool {
        self.active_sections.contains(id)
    }

    #[must_use]
    pub fn is_backdrop_visible(&self) -> bool {
        self.backdrop_visible
    }

    #[must_use]
    pub fn has_open_overlay(&self) -> bool {
        self.active_modal.is_some() || !self.active_sections.is_empty()
    }

    /// Whether this controller currently holds a scroll lease.
    #[must_use]
    pub fn holds_scroll_lock(&self) -> bool {
        self.lease.is_some()
    }

    /// Drop every overlay. Opens pass `clear_fragment = false`: the fragment
    /// is about to be re-pointed and the previous history entry stays intact.
    fn reset(&mut self, ctx: &mut PageContext, clear_fragment: bool) {
        if let Some(id) = self.active_modal.take()
            && clear_fragment
        {
            let public_id = ctx
                .document
                .modal(&id)
                .map_or(id.as_str(), |modal| modal.public_id())
                .to_owned();
            clear_fragment_if(ctx, &[&id, &public_id]);
        }
        for id in take(&mut self.active_sections) {
            if clear_fragment {
                clear_fragment_if(ctx, &[&id]);
            }
        }
        self.backdrop_visible = false;
        self.lease = None;
    }

    fn modal_requests_backdrop(&self, ctx: &PageContext) -> bool {
        self.active_modal
            .as_deref()
            .and_then(|id| ctx.document.modal(id))
            .is_some_and(|modal| modal.requests_backdrop())
            && ctx.document.has_backdrop()
    }

    fn mark_fragment(&self, ctx: &mut PageContext, public_id: &str) {
        if ctx.location.assign(public_id) {
            trace!(fragment = public_id, "Fragment assigned");
        }
    }

    fn sync_scroll_lock(&mut self, scroll: &ScrollLock) {
        match (self.has_open_overlay(), self.lease.is_some()) {
            (true, false) => self.lease = Some(scroll.acquire()),
            (false, true) => self.lease = None,
            _ => {}
        }
    }
}

/// Drop the fragment, in place, when it names one of `names`.
fn clear_fragment_if(ctx: &mut PageContext, names: &[&str]) {
    if names.iter().any(|name| ctx.location.is(name)) {
        ctx.location.clear();
    }
}
