//! Wires the watcher, sampler, notifier and status stream together.

use std::{io, thread};

use procsignal::Notifier;
use sampler::{Sampler, event_queue};
use tracing::{debug, error, info, trace, warn};
use x11_title_watcher::{TitleEvent, X11Inspector};

use crate::{
    cli::Cli,
    error::{Error, Result},
};

/// Run until stdin ends or something fatal happens.
///
/// Threads:
/// - `title-watcher` blocks in the X11 event loop and queues every title change.
/// - `title-sampler` coalesces those changes and signals the status process
///   at most once per sampling interval.
/// - The calling thread rewrites the status stream, pulling the current title
///   for each line.
pub fn run(cli: &Cli) -> Result<()> {
    // There should be only one status process, but nudge every match.
    let pids = procsignal::find_pids_by_name(&cli.process_name);
    if pids.is_empty() {
        return Err(Error::MissingStatusProcess(cli.process_name.clone()));
    }
    info!(process = %cli.process_name, ?pids, "status process found");

    let inspector = X11Inspector::connect(cli.display.as_deref())?;
    let watcher = inspector.watcher()?;

    let (events, queue) = event_queue::<TitleEvent>(cli.queue_capacity);
    let sampler = Sampler::new(queue, cli.sample_ms);
    let stop = sampler.stop_handle();
    let notifier = Notifier::new(pids);

    let sampler_thread = thread::Builder::new()
        .name("title-sampler".into())
        .spawn(move || {
            sampler.run(|event| {
                trace!(?event, "nudging status process");
                notifier.notify();
            });
        })
        .map_err(|source| Error::Spawn {
            name: "sampler",
            source,
        })?;

    // Never joined: the X11 event loop only returns when the connection breaks.
    thread::Builder::new()
        .name("title-watcher".into())
        .spawn(move || {
            let res = watcher.run(
                |event| {
                    if events.notify(event).is_err() {
                        trace!("title event after sampler stopped");
                    }
                },
                |e| warn!(error = %e, "title watcher"),
            );
            if let Err(e) = res {
                error!(error = %e, "title watcher stopped");
            }
        })
        .map_err(|source| Error::Spawn {
            name: "watcher",
            source,
        })?;

    let opts = cli.title_options();
    let result = i3bar::run(
        io::stdin().lock(),
        io::stdout().lock(),
        || inspector.active_window_title(),
        &opts,
    );

    stop.stop();
    if sampler_thread.join().is_err() {
        error!("sampler thread panicked");
    }
    debug!(ok = result.is_ok(), "status stream finished");
    result.map_err(Error::from)
}
