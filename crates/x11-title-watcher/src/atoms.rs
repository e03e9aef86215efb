//! Interned atoms and property classification.

use x11rb::{
    NONE,
    protocol::xproto::{Atom, ConnectionExt},
    rust_connection::RustConnection,
};

use crate::{Result, TitleEvent};

/// Atoms the inspector and watcher care about.
///
/// Atoms that the server has never seen intern as `NONE` and never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atoms {
    /// `_NET_ACTIVE_WINDOW` on the root window holds the focused window id.
    pub active_window: Atom,
    /// `_NET_WM_NAME`, the canonical UTF-8 title.
    pub net_wm_name: Atom,
    /// `WM_NAME`, the legacy ICCCM title.
    pub wm_name: Atom,
    /// `_WM_NAME`, set by a few older toolkits.
    pub wm_name_alt: Atom,
}

impl Atoms {
    /// Intern every atom up front.
    pub(crate) fn intern(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            active_window: fetch_atom(conn, "_NET_ACTIVE_WINDOW")?,
            net_wm_name: fetch_atom(conn, "_NET_WM_NAME")?,
            wm_name: fetch_atom(conn, "WM_NAME")?,
            wm_name_alt: fetch_atom(conn, "_WM_NAME")?,
        })
    }
}

/// Look up the id of an existing atom without creating it.
fn fetch_atom(conn: &RustConnection, name: &str) -> Result<Atom> {
    Ok(conn.intern_atom(true, name.as_bytes())?.reply()?.atom)
}

/// Map a changed property atom to the event it represents, if any.
pub fn classify(atom: Atom, atoms: &Atoms) -> Option<TitleEvent> {
    if atom == NONE {
        return None;
    }
    if atom == atoms.active_window {
        Some(TitleEvent::ActiveWindowChanged)
    } else if atom == atoms.net_wm_name || atom == atoms.wm_name || atom == atoms.wm_name_alt {
        Some(TitleEvent::TitleChanged)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms() -> Atoms {
        Atoms {
            active_window: 300,
            net_wm_name: 301,
            wm_name: 39,
            wm_name_alt: NONE,
        }
    }

    #[test]
    fn title_atoms_are_title_changes() {
        let a = atoms();
        assert_eq!(classify(301, &a), Some(TitleEvent::TitleChanged));
        assert_eq!(classify(39, &a), Some(TitleEvent::TitleChanged));
    }

    #[test]
    fn active_window_atom_is_focus_change() {
        assert_eq!(classify(300, &atoms()), Some(TitleEvent::ActiveWindowChanged));
    }

    #[test]
    fn unknown_and_missing_atoms_are_ignored() {
        let a = atoms();
        assert_eq!(classify(999, &a), None);
        // _WM_NAME was never interned on this server.
        assert_eq!(classify(NONE, &a), None);
    }
}
