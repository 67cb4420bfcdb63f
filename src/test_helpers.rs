//! Fakes shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use crate::error::ApiError;
use crate::net::notify::{Navigator, Notifier};
use crate::net::transport::{HttpRequest, HttpResponse, Transport};
use crate::session::hooks::LogoutHooks;
use crate::session::token::MemoryTokenStore;

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub session_expired: Cell<usize>,
    pub timeouts: Cell<usize>,
}

impl Notifier for RecordingNotifier {
    fn notify_session_expired(&self) {
        self.session_expired.set(self.session_expired.get() + 1);
    }

    fn notify_timeout(&self) {
        self.timeouts.set(self.timeouts.get() + 1);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub routes: RefCell<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: &str) {
        self.routes.borrow_mut().push(route.to_owned());
    }
}

/// Transport that replays canned outcomes and records what was sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
    pub sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.outcomes.borrow_mut().push_back(Ok(HttpResponse { status, body }));
        self
    }

    pub fn fail(self, error: ApiError) -> Self {
        self.outcomes.borrow_mut().push_back(Err(error));
        self
    }

    pub fn sent_header(&self, index: usize, name: &str) -> Option<String> {
        self.sent
            .borrow()
            .get(index)
            .and_then(|req| req.header(name).map(ToOwned::to_owned))
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse { status: 200, body: Value::Null }))
    }
}

/// Everything the classifier touches, kept observable.
pub struct Fixture {
    pub tokens: Rc<MemoryTokenStore>,
    pub hooks: Rc<LogoutHooks>,
    pub notifier: Rc<RecordingNotifier>,
    pub navigator: Rc<RecordingNavigator>,
    pub hook_calls: Rc<Cell<usize>>,
}

impl Fixture {
    /// Fixture with a counting logout hook already registered.
    pub fn new() -> Self {
        let fixture = Self::without_hook();
        let calls = Rc::clone(&fixture.hook_calls);
        fixture.hooks.register(move || calls.set(calls.get() + 1));
        fixture
    }

    pub fn without_hook() -> Self {
        Self {
            tokens: Rc::new(MemoryTokenStore::new()),
            hooks: Rc::new(LogoutHooks::new()),
            notifier: Rc::new(RecordingNotifier::default()),
            navigator: Rc::new(RecordingNavigator::default()),
            hook_calls: Rc::new(Cell::new(0)),
        }
    }
}
