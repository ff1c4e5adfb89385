#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the landing screen.
//!
//! [`LandingApp`] owns a [`Host`] that turns the orchestrator's declared
//! subscriptions into browser timers and a window `resize` listener, and
//! re-renders the root element after every update. Only compiled on
//! `wasm32` targets.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

use js_sys::Reflect;
use landing_core::viewport::width_from_host;
use landing_core::{
    LandingConfig, LandingMsg, Model, Orchestrator, RandomSource, SubId, Subscription,
    SubscriptionLedger, TransitionPhase, View,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};
use web_time::Instant;

use crate::error::HostError;
use crate::markup::{Node, render_markup};

/// Report `msg` on the page's `console.error`, if the global has one.
///
/// Goes through `Reflect` so it still works when the panic hook fires
/// before (or without) any `web_sys::Window`.
fn report_to_console(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Some(error_fn) = Reflect::get(&console, &"error".into())
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
    else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(&format!("[landing] {msg}")));
}

/// Route panics to the console once per module instance. Both the start
/// hook and every `LandingApp` constructor call this.
fn install_panic_hook() {
    static INSTALLED: std::sync::Once = std::sync::Once::new();
    INSTALLED.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let at = info
                .location()
                .map(|loc| format!(" at {}:{}", loc.file(), loc.line()))
                .unwrap_or_default();
            report_to_console(&format!("panic{at}: {info}"));
        }));
    });
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(msg)
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// `Math.random()` as a [`RandomSource`].
struct BrowserRandom;

impl RandomSource for BrowserRandom {
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

fn millis(duration: core::time::Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

fn viewport_width(window: &Window) -> u32 {
    let raw = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    width_from_host(raw)
}

fn materialize(document: &Document, node: &Node) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Text(text) => Ok(document.create_text_node(text).into()),
        Node::Element(element) => {
            let el = document.create_element(element.tag)?;
            for (name, value) in &element.attrs {
                el.set_attribute(name, value)?;
            }
            for child in &element.children {
                el.append_child(&materialize(document, child)?)?;
            }
            Ok(el.into())
        }
    }
}

fn clear_children(root: &Element) -> Result<(), JsValue> {
    while let Some(child) = root.first_child() {
        root.remove_child(&child)?;
    }
    Ok(())
}

/// A live browser resource backing one subscription.
enum Registration {
    Interval {
        handle: i32,
        _callback: Closure<dyn FnMut()>,
    },
    Timeout {
        handle: i32,
        _callback: Closure<dyn FnMut()>,
    },
    Resize {
        callback: Closure<dyn FnMut()>,
    },
}

impl Registration {
    /// Detach from the browser. The closure itself stays alive until the
    /// registration is dropped.
    fn cancel(&self, window: &Window) {
        match self {
            Self::Interval { handle, .. } => window.clear_interval_with_handle(*handle),
            Self::Timeout { handle, .. } => window.clear_timeout_with_handle(*handle),
            Self::Resize { callback } => {
                if let Err(err) = window
                    .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
                {
                    tracing::debug!(
                        target: "landing.host",
                        error = ?err,
                        "resize listener removal failed"
                    );
                }
            }
        }
    }
}

struct Host {
    model: Orchestrator,
    ledger: SubscriptionLedger,
    registrations: HashMap<SubId, Registration>,
    /// Cancelled registrations whose callback may still be on the stack.
    retired: Vec<Registration>,
    window: Window,
    document: Document,
    root: Element,
    last_view: Option<View>,
    confirm_started: Option<Instant>,
    running: bool,
    destroyed: bool,
}

impl Host {
    fn start(cell: &Rc<RefCell<Self>>) -> Result<(), HostError> {
        let mut pending = VecDeque::new();
        {
            let mut host = cell.borrow_mut();
            if host.running || host.destroyed {
                return Ok(());
            }
            host.running = true;
            tracing::debug!(target: "landing.host", "landing mounted");
            host.reconcile(&Rc::downgrade(cell), &mut pending)?;
        }
        Self::run(cell, pending)
    }

    fn dispatch(cell: &Rc<RefCell<Self>>, msg: LandingMsg) -> Result<(), HostError> {
        Self::run(cell, VecDeque::from([msg]))
    }

    fn run(cell: &Rc<RefCell<Self>>, mut pending: VecDeque<LandingMsg>) -> Result<(), HostError> {
        while let Some(msg) = pending.pop_front() {
            let mut host = cell.borrow_mut();
            if !host.running {
                return Ok(());
            }
            tracing::trace!(target: "landing.host", msg = ?msg, "dispatch");
            let before = host.model.phase();
            host.model.update(msg);
            host.note_phase(before);
            host.reconcile(&Rc::downgrade(cell), &mut pending)?;
        }
        cell.borrow_mut().render()
    }

    /// Entry point for every browser callback.
    fn fire(weak: &Weak<RefCell<Self>>, msg: LandingMsg) {
        let Some(cell) = weak.upgrade() else {
            return;
        };
        // Everything in `retired` was cancelled before this callback began,
        // so the closure running now is not among them.
        cell.borrow_mut().retired.clear();
        if let Err(err) = Self::dispatch(&cell, msg) {
            tracing::error!(target: "landing.host", error = %err, "dispatch failed");
            report_to_console(&err.to_string());
        }
    }

    fn note_phase(&mut self, before: TransitionPhase) {
        let after = self.model.phase();
        if before == after {
            return;
        }
        match after {
            TransitionPhase::Confirming => self.confirm_started = Some(Instant::now()),
            TransitionPhase::Embedded => {
                if let Some(started) = self.confirm_started.take() {
                    tracing::debug!(
                        target: "landing.host",
                        dwell_ms = started.elapsed().as_millis() as u64,
                        "confirm dwell measured"
                    );
                }
            }
            TransitionPhase::Loading => {}
        }
    }

    fn reconcile(
        &mut self,
        weak: &Weak<RefCell<Self>>,
        pending: &mut VecDeque<LandingMsg>,
    ) -> Result<(), HostError> {
        let diff = self.ledger.reconcile(self.model.subscriptions());
        for id in diff.stop {
            self.retire(id);
        }
        for sub in diff.start {
            let id = sub.id();
            let registration = match sub {
                Subscription::Every {
                    interval, message, ..
                } => {
                    let weak = weak.clone();
                    let callback = Closure::<dyn FnMut()>::new(move || Self::fire(&weak, message));
                    let handle = self
                        .window
                        .set_interval_with_callback_and_timeout_and_arguments_0(
                            callback.as_ref().unchecked_ref(),
                            millis(interval),
                        )?;
                    Registration::Interval {
                        handle,
                        _callback: callback,
                    }
                }
                Subscription::After { delay, message, .. } => {
                    let weak = weak.clone();
                    let callback = Closure::<dyn FnMut()>::new(move || Self::fire(&weak, message));
                    let handle = self
                        .window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            callback.as_ref().unchecked_ref(),
                            millis(delay),
                        )?;
                    Registration::Timeout {
                        handle,
                        _callback: callback,
                    }
                }
                Subscription::Resize { on_resize, .. } => {
                    let weak = weak.clone();
                    let window = self.window.clone();
                    let callback = Closure::<dyn FnMut()>::new(move || {
                        Self::fire(&weak, on_resize(viewport_width(&window)));
                    });
                    self.window
                        .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
                    pending.push_back(on_resize(viewport_width(&self.window)));
                    Registration::Resize { callback }
                }
            };
            if let Some(previous) = self.registrations.insert(id, registration) {
                previous.cancel(&self.window);
                self.retired.push(previous);
            }
        }
        Ok(())
    }

    fn retire(&mut self, id: SubId) {
        if let Some(registration) = self.registrations.remove(&id) {
            registration.cancel(&self.window);
            self.retired.push(registration);
        }
    }

    fn render(&mut self) -> Result<(), HostError> {
        if !self.running {
            return Ok(());
        }
        let view = self.model.view();
        if self.last_view.as_ref() == Some(&view) {
            return Ok(());
        }
        let tree = materialize(&self.document, &render_markup(&view))?;
        clear_children(&self.root)?;
        self.root.append_child(&tree)?;
        self.last_view = Some(view);
        Ok(())
    }

    /// Stop every subscription. Safe to call repeatedly.
    fn teardown(&mut self) {
        if self.destroyed {
            return;
        }
        for id in self.ledger.drain() {
            self.retire(id);
        }
        for (_, registration) in self.registrations.drain() {
            registration.cancel(&self.window);
        }
        self.running = false;
        self.destroyed = true;
        tracing::debug!(
            target: "landing.host",
            phase = %self.model.phase(),
            "landing destroyed"
        );
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// The landing screen mounted into one DOM element.
#[wasm_bindgen]
pub struct LandingApp {
    host: Rc<RefCell<Host>>,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl LandingApp {
    /// Prepare the landing screen for the element with id `root_id`.
    ///
    /// `config_json` overrides any subset of the configuration fields.
    /// Nothing is scheduled until [`LandingApp::start`].
    #[wasm_bindgen(constructor)]
    pub fn new(root_id: &str, config_json: Option<String>) -> Result<LandingApp, JsValue> {
        install_panic_hook();
        Ok(Self::mount(root_id, config_json.as_deref())?)
    }

    fn mount(root_id: &str, config_json: Option<&str>) -> Result<LandingApp, HostError> {
        let config = match config_json {
            Some(json) => LandingConfig::from_json_str(json)?,
            None => LandingConfig::default(),
        };
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;
        let root = document
            .get_element_by_id(root_id)
            .ok_or_else(|| HostError::MissingRoot(root_id.to_owned()))?;
        let host = Host {
            model: Orchestrator::new(config, Box::new(BrowserRandom))?,
            ledger: SubscriptionLedger::new(),
            registrations: HashMap::new(),
            retired: Vec::new(),
            window,
            document,
            root,
            last_view: None,
            confirm_started: None,
            running: false,
            destroyed: false,
        };
        Ok(LandingApp {
            host: Rc::new(RefCell::new(host)),
        })
    }

    /// Measure the viewport, start loading and render the first frame.
    ///
    /// Calling `start` again, or after `destroy`, does nothing.
    pub fn start(&self) -> Result<(), JsValue> {
        Ok(Host::start(&self.host)?)
    }

    /// Cancel every timer and listener and clear the root element.
    pub fn destroy(&self) -> Result<(), JsValue> {
        let mut host = self.host.borrow_mut();
        host.teardown();
        host.retired.clear();
        host.last_view = None;
        clear_children(&host.root)
    }

    /// `"loading"`, `"confirming"` or `"embedded"`.
    pub fn phase(&self) -> String {
        self.host.borrow().model.phase().as_str().to_owned()
    }

    /// Current load progress in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.host.borrow().model.progress().value()
    }

    /// `"mobile"` or `"desktop"`.
    #[wasm_bindgen(js_name = viewportClass)]
    pub fn viewport_class(&self) -> String {
        self.host.borrow().model.viewport_class().as_str().to_owned()
    }

    /// The embedded URL once the screen has reached `"embedded"`.
    pub fn destination(&self) -> Option<String> {
        self.host
            .borrow()
            .model
            .destination()
            .map(|d| d.url().to_owned())
    }
}
