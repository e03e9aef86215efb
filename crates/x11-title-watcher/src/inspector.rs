//! On-demand active window title lookup.

use x11rb::{
    NONE,
    connection::Connection,
    protocol::xproto::{Atom, AtomEnum, ConnectionExt, Window},
    rust_connection::RustConnection,
};
use tracing::{debug, trace};

use crate::{Error, Result, TitleWatcher, atoms::Atoms};

/// Open a connection and resolve the default screen's root window.
pub(crate) fn open(display: Option<&str>) -> Result<(RustConnection, Window)> {
    let (conn, screen) = x11rb::connect(display)?;
    let root = conn
        .setup()
        .roots
        .get(screen)
        .map(|s| s.root)
        .ok_or(Error::NoScreen(screen))?;
    Ok((conn, root))
}

/// Read the id of the currently active window from the root window.
///
/// Returns `None` when no window is active.
pub(crate) fn active_window(
    conn: &RustConnection,
    root: Window,
    atoms: &Atoms,
) -> Result<Option<Window>> {
    let reply = conn
        .get_property(false, root, atoms.active_window, AtomEnum::ANY, 0, 1)?
        .reply()?;
    Ok(reply
        .value32()
        .and_then(|mut ids| ids.next())
        .filter(|&id| id != NONE))
}

/// Active window title lookups against one X11 connection.
pub struct X11Inspector {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
    display: Option<String>,
}

impl X11Inspector {
    /// Connect to `display` (or `$DISPLAY` when `None`) and intern atoms.
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let (conn, root) = open(display)?;
        let atoms = Atoms::intern(&conn)?;
        debug!(root, ?atoms, "x11 inspector connected");
        Ok(Self {
            conn,
            root,
            atoms,
            display: display.map(str::to_owned),
        })
    }

    /// The atoms interned for this display.
    pub fn atoms(&self) -> &Atoms {
        &self.atoms
    }

    /// Open a second connection to the same display for the blocking event loop.
    pub fn watcher(&self) -> Result<TitleWatcher> {
        TitleWatcher::connect(self.display.as_deref())
    }

    /// Title of the active window, or an empty string when there is none or
    /// the server could not be queried.
    pub fn active_window_title(&self) -> String {
        match self.try_active_window_title() {
            Ok(title) => title,
            Err(e) => {
                trace!(error = %e, "active title lookup failed");
                String::new()
            }
        }
    }

    /// Fallible form of [`X11Inspector::active_window_title`].
    pub fn try_active_window_title(&self) -> Result<String> {
        let Some(window) = active_window(&self.conn, self.root, &self.atoms)? else {
            return Ok(String::new());
        };
        let title = self.text_property(window, self.atoms.net_wm_name)?;
        if !title.is_empty() {
            return Ok(title);
        }
        // Legacy clients only set WM_NAME.
        self.text_property(window, self.atoms.wm_name)
    }

    /// Read a text property in full, decoding it as (lossy) UTF-8.
    fn text_property(&self, window: Window, property: Atom) -> Result<String> {
        if property == NONE {
            return Ok(String::new());
        }
        let reply = self
            .conn
            .get_property(false, window, property, AtomEnum::ANY, 0, u32::MAX)?
            .reply()?;
        Ok(String::from_utf8_lossy(&reply.value).into_owned())
    }
}
