use x11rb::{
    connection::Connection,
    protocol::{
        Event,
        xproto::{ChangeWindowAttributesAux, ConnectionExt, EventMask, Window},
    },
    rust_connection::RustConnection,
};
use tracing::{debug, trace};

use crate::{
    Error, Result, TitleEvent,
    atoms::{Atoms, classify},
    inspector::{active_window, open},
};

/// Blocking X11 event loop that reports title changes.
pub struct TitleWatcher {
    conn: RustConnection,
    root: Window,
    atoms: Atoms,
}

impl TitleWatcher {
    /// Connect to `display` (or `$DISPLAY` when `None`).
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let (conn, root) = open(display)?;
        let atoms = Atoms::intern(&conn)?;
        Ok(Self { conn, root, atoms })
    }

    /// Ask the server for property and structure events on `window`.
    fn subscribe(&self, window: Window) -> Result<()> {
        let aux = ChangeWindowAttributesAux::new()
            .event_mask(EventMask::STRUCTURE_NOTIFY | EventMask::PROPERTY_CHANGE);
        // Unchecked: a window that vanished before we subscribed surfaces as
        // an error event, which the loop reports as non-fatal.
        drop(self.conn.change_window_attributes(window, &aux)?);
        self.conn.flush()?;
        Ok(())
    }

    /// Block forever, calling `on_change` for every title-related change.
    ///
    /// Each newly activated window is subscribed to as well, which is how
    /// tabbed applications that retitle themselves get noticed. Errors for
    /// individual requests go to `on_error` and the loop continues; only a
    /// broken connection ends it, with that error.
    pub fn run<C, E>(&self, mut on_change: C, mut on_error: E) -> Result<()>
    where
        C: FnMut(TitleEvent),
        E: FnMut(Error),
    {
        self.subscribe(self.root)?;
        debug!(root = self.root, "title watcher started");

        loop {
            let event = self.conn.wait_for_event()?;
            match event {
                Event::PropertyNotify(ev) => {
                    let Some(kind) = classify(ev.atom, &self.atoms) else {
                        continue;
                    };
                    trace!(?kind, window = ev.window, "title event");
                    on_change(kind);
                    if kind == TitleEvent::ActiveWindowChanged {
                        match active_window(&self.conn, self.root, &self.atoms) {
                            Ok(Some(window)) => {
                                if let Err(e) = self.subscribe(window) {
                                    on_error(e);
                                }
                            }
                            Ok(None) => {}
                            Err(e) => on_error(e),
                        }
                    }
                }
                Event::Error(err) => on_error(Error::Protocol(format!("{err:?}"))),
                _ => {}
            }
        }
    }
}
