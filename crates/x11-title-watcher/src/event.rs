//! Event types emitted by the title watcher.

/// A title-related change observed on the display.
///
/// Only the occurrence matters to consumers; neither variant carries the new
/// title, which is read back with [`crate::X11Inspector::active_window_title`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleEvent {
    /// A title property (`_NET_WM_NAME`, `WM_NAME` or `_WM_NAME`) changed on a
    /// watched window.
    TitleChanged,
    /// `_NET_ACTIVE_WINDOW` changed on the root window.
    ActiveWindowChanged,
}
