use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use chrono::Local;
use convert_core::{Notification, StatusView};
use convert_engine::StatusSink;
use convert_logging::convert_warn;

/// Prints the status line and result links as they change.
pub struct TerminalPresenter<W: Write + Send> {
    view: Mutex<StatusView>,
    out: Mutex<W>,
    timestamps: bool,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W, timestamps: bool) -> Self {
        Self {
            view: Mutex::new(StatusView::new()),
            out: Mutex::new(out),
            timestamps,
        }
    }

    #[cfg(test)]
    fn view(&self) -> StatusView {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(&self, view: &StatusView, show_links: bool) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if self.timestamps {
            write!(out, "[{}] ", Local::now().format("%H:%M:%S"))?;
        }
        writeln!(out, "{}", view.status_text)?;
        if show_links {
            for link in &view.links {
                writeln!(out, "  {}: {}", link.label, link.url)?;
            }
        }
        out.flush()
    }
}

impl<W: Write + Send> StatusSink for TerminalPresenter<W> {
    fn notify(&self, notification: Notification) {
        let snapshot = {
            let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
            if !view.apply(&notification) {
                return;
            }
            view.clone()
        };
        let show_links = matches!(notification, Notification::Completed { .. });
        if let Err(err) = self.render(&snapshot, show_links) {
            convert_warn!("Failed to print status: {}", err);
        }
    }
}
