//! Effects the control has on the page around it.

use log::debug;

/// The environment hosting the control.
///
/// Full-screen mode asks the host to stop the page behind the control from
/// scrolling; nothing else reaches outside the control.
pub trait HostEnvironment {
    fn set_page_scroll_locked(&mut self, locked: bool);
}

/// A host with no page to affect.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl HostEnvironment for DetachedHost {
    fn set_page_scroll_locked(&mut self, locked: bool) {
        debug!("Page scroll lock requested ({}) with no page attached", locked);
    }
}
