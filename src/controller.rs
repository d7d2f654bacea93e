use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;

use crate::fetcher::{FetchError, FetchResult};
use crate::output::console::Console;
use crate::output::PageView;
use crate::view::ViewModel;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Search(String),
    NextPage,
    PrevPage,
    Quit,
}

pub fn parse_event(line: &str) -> Result<Event, String> {
    let trimmed = line.trim();
    if let Some(term) = trimmed.strip_prefix('/') {
        return Ok(Event::Search(term.trim().to_string()));
    }
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };
    match head.to_lowercase().as_str() {
        "n" | "next" if rest.is_empty() => Ok(Event::NextPage),
        "p" | "prev" if rest.is_empty() => Ok(Event::PrevPage),
        "q" | "quit" | "exit" if rest.is_empty() => Ok(Event::Quit),
        "s" | "search" => Ok(Event::Search(rest.to_string())),
        "" => Err("empty command".to_string()),
        _ => Err(format!("unknown command '{trimmed}'")),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Pending,
    Loaded,
    Failed,
    Cancelled,
}

pub struct Controller {
    view: ViewModel,
    console: Console,
    pending: Option<oneshot::Receiver<FetchResult>>,
    task: Option<JoinHandle<()>>,
    state: FetchState,
    active: bool,
}

impl Controller {
    pub fn new(view: ViewModel, console: Console) -> Self {
        Self {
            view,
            console,
            pending: None,
            task: None,
            state: FetchState::Idle,
            active: true,
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn page_view(&self) -> PageView {
        PageView::from_view(&self.view)
    }

    pub fn attach(&mut self, receiver: oneshot::Receiver<FetchResult>) {
        if !self.active {
            return;
        }
        self.pending = Some(receiver);
        self.state = FetchState::Pending;
    }

    pub fn attach_task(&mut self, receiver: oneshot::Receiver<FetchResult>, task: JoinHandle<()>) {
        self.attach(receiver);
        if self.active {
            self.task = Some(task);
        } else {
            task.abort();
        }
    }

    pub fn poll_fetch(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(FetchError::Abandoned),
        };
        self.pending = None;
        self.task = None;
        self.apply(result);
        true
    }

    pub async fn await_fetch(&mut self) {
        let Some(rx) = self.pending.take() else {
            return;
        };
        let result = rx.await.unwrap_or(Err(FetchError::Abandoned));
        self.task = None;
        self.apply(result);
    }

    /// Records are replaced only while the controller is active; failures
    /// leave the current (empty) records in place.
    pub fn apply(&mut self, result: FetchResult) {
        if !self.active {
            self.console.debug("ignoring fetch result after teardown");
            return;
        }
        match result {
            Ok(records) => {
                self.console
                    .debug(&format!("loaded {} countries", records.len()));
                self.view.set_records(records);
                self.state = FetchState::Loaded;
            }
            Err(e) => {
                self.console.error(&format!("failed to load countries: {e}"));
                self.state = FetchState::Failed;
            }
        }
    }

    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Search(term) => {
                self.view.set_search_term(term);
                true
            }
            Event::NextPage => {
                if !self.view.next_page() {
                    self.console.debug("already on the last page");
                }
                true
            }
            Event::PrevPage => {
                if !self.view.prev_page() {
                    self.console.debug("already on the first page");
                }
                true
            }
            Event::Quit => false,
        }
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.view.go_to_page(page);
        self.view.page()
    }

    pub fn teardown(&mut self) {
        self.active = false;
        self.pending = None;
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if self.state == FetchState::Pending {
            self.state = FetchState::Cancelled;
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
