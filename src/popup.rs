use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use tokio::signal;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::utilities::display::Region;
use crate::widget::{FetchAndRenderWidget, TRIGGER_ID};

#[derive(Clone, Copy, PartialEq, Eq)]
enum PopupState {
    Running,
    WaitingToClose,
}

/// Drives the widget from a stream of clicks and writes the result region's
/// outer HTML to `out` whenever it changed. Rapid changes collapse into the
/// latest one.
pub struct Popup<W: Write> {
    widget: Arc<FetchAndRenderWidget>,
    region: watch::Receiver<Region>,
    tasks: Vec<JoinHandle<()>>,
    out: W,
}

impl<W: Write> Popup<W> {
    pub fn new(widget: FetchAndRenderWidget, out: W) -> Self {
        let region = widget.display().subscribe();
        Self { widget: Arc::new(widget), region, tasks: Vec::new(), out }
    }

    pub async fn run(&mut self, mut clicks: mpsc::UnboundedReceiver<()>) {
        let mut state = PopupState::Running;
        self.print_region();

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        while state == PopupState::Running {
            tokio::select! {
                click = clicks.recv() => match click {
                    Some(()) => self.on_click(),
                    None => {
                        log::info!("no more clicks");
                        state = PopupState::WaitingToClose;
                    }
                },
                Ok(()) = self.region.changed() => self.print_region(),
                _ = &mut ctrl_c => {
                    log::warn!("Ctrl+C received");
                    state = PopupState::WaitingToClose;
                }
            }

            self.tasks.retain(|task| !task.is_finished());
        }

        self.close().await;
    }

    fn on_click(&mut self) {
        log::debug!("#{TRIGGER_ID} clicked");
        self.tasks.push(self.widget.click());
    }

    async fn close(&mut self) {
        let task_count = self.tasks.len();
        if task_count > 0 {
            log::info!("waiting for {task_count} task(s) to finish…");
        }

        let tasks = std::mem::take(&mut self.tasks);
        let finished = async {
            for task in tasks {
                if let Err(err) = task.await {
                    log::error!("fetch task failed: {err}");
                }
            }
        };
        tokio::pin!(finished);

        loop {
            tokio::select! {
                () = &mut finished => break,
                Ok(()) = self.region.changed() => self.print_region(),
            }
        }

        if self.region.has_changed().unwrap_or(false) {
            self.print_region();
        }

        log::debug!("final state: {:?}", self.widget.display().snapshot().state);
    }

    fn print_region(&mut self) {
        let html = self.region.borrow_and_update().outer_html();
        if let Err(err) = writeln!(self.out, "{html}").and_then(|()| self.out.flush()) {
            log::error!("cannot write region: {err}");
        }
    }
}

/// Every stdin line is one click. Blocking reads live on their own thread so
/// a pending read never holds up shutdown.
pub fn spawn_click_reader() -> mpsc::UnboundedReceiver<()> {
    let (sender, receiver) = mpsc::unbounded_channel();

    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if let Err(err) = line {
                log::error!("cannot read stdin: {err}");
                break;
            }
            if sender.send(()).is_err() {
                break;
            }
        }
    });

    receiver
}
