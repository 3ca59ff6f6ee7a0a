use std::cell::{Ref, RefCell};
use std::rc::Rc;

use common::{LocationOption, PriorityKey};
use gloo_timers::callback::Timeout;
use session::{AnalysisOrchestrator, SearchEffect, SearchSession, Slot};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api_client::{climate, location};
use crate::settings;

// ===================== Location search =====================

/// Executes the effects a [`SearchSession`] hands back.
#[derive(Clone)]
struct SearchRunner {
    session: Rc<RefCell<SearchSession>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    on_change: Callback<Option<LocationOption>>,
    redraw: UseForceUpdateHandle,
}

impl SearchRunner {
    fn dispatch(&self, event: impl FnOnce(&mut SearchSession) -> Vec<SearchEffect>) {
        let effects = event(&mut self.session.borrow_mut());
        self.run(effects);
        self.redraw.force_update();
    }

    fn cancel_timer(&self) {
        if let Some(timeout) = self.timer.borrow_mut().take() {
            timeout.cancel();
        }
    }

    fn run(&self, effects: Vec<SearchEffect>) {
        for effect in effects {
            match effect {
                SearchEffect::SelectionChanged(selected) => self.on_change.emit(selected),
                SearchEffect::CancelPendingSearch => self.cancel_timer(),
                SearchEffect::ScheduleSearch { token, delay } => {
                    let runner = self.clone();
                    let timeout = Timeout::new(delay.as_millis() as u32, move || {
                        log::trace!("Debounce timer {} fired", token);
                        runner.dispatch(|session| session.debounce_elapsed(token));
                    });
                    *self.timer.borrow_mut() = Some(timeout);
                }
                SearchEffect::IssueSearch { token, query, limit } => {
                    let runner = self.clone();
                    spawn_local(async move {
                        let result = location::search_locations(&query, limit).await;
                        let applied = runner.session.borrow_mut().search_completed(token, result);
                        if applied {
                            runner.redraw.force_update();
                        }
                    });
                }
            }
        }
    }
}

/// Render snapshot and callbacks of a location search widget.
pub struct LocationSearchHandle {
    pub query: String,
    pub suggestions: Vec<LocationOption>,
    pub loading: bool,
    pub open: bool,
    pub has_selection: bool,
    pub on_input: Callback<String>,
    pub on_select: Callback<LocationOption>,
    pub on_clear: Callback<()>,
    pub on_focus: Callback<()>,
    pub on_click_outside: Callback<()>,
}

/// Debounced, race-safe location search bound to a controlled `selected` value.
#[hook]
pub fn use_location_search(
    selected: Option<LocationOption>,
    on_change: Callback<Option<LocationOption>>,
) -> LocationSearchHandle {
    let session = use_mut_ref(|| SearchSession::new(settings::get_settings().search_config()));
    let timer = use_mut_ref(|| None::<Timeout>);
    let redraw = use_force_update();

    let runner = SearchRunner {
        session: session.clone(),
        timer: timer.clone(),
        on_change,
        redraw,
    };

    {
        let runner = runner.clone();
        use_effect_with(selected, move |selected| {
            runner.session.borrow_mut().sync_selection(selected.as_ref());
            runner.redraw.force_update();
            || ()
        });
    }

    {
        let runner = runner.clone();
        use_effect_with((), move |_| move || runner.cancel_timer());
    }

    let on_input = {
        let runner = runner.clone();
        Callback::from(move |text: String| runner.dispatch(|session| session.input(text)))
    };
    let on_select = {
        let runner = runner.clone();
        Callback::from(move |option: LocationOption| runner.dispatch(|session| session.select(option)))
    };
    let on_clear = {
        let runner = runner.clone();
        Callback::from(move |_| runner.dispatch(SearchSession::clear))
    };
    let on_focus = {
        let runner = runner.clone();
        Callback::from(move |_| {
            runner.dispatch(|session| {
                session.focus();
                Vec::new()
            })
        })
    };
    let on_click_outside = {
        let runner = runner.clone();
        Callback::from(move |_| {
            runner.dispatch(|session| {
                session.click_outside();
                Vec::new()
            })
        })
    };

    let snapshot = session.borrow();
    LocationSearchHandle {
        query: snapshot.query().to_string(),
        suggestions: snapshot.suggestions().to_vec(),
        loading: snapshot.is_loading(),
        open: snapshot.is_open(),
        has_selection: snapshot.selected().is_some(),
        on_input,
        on_select,
        on_clear,
        on_focus,
        on_click_outside,
    }
}

/// Emits `on_outside` for every mouse press outside the element behind `node`.
#[hook]
pub fn use_click_outside(node: NodeRef, on_outside: Callback<()>) {
    use_effect_with(node, move |node| {
        let node = node.clone();
        let document = web_sys::window().and_then(|window| window.document());

        let listener = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |event: web_sys::MouseEvent| {
            let Some(container) = node.get() else {
                return;
            };
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
            if !container.contains(target.as_ref()) {
                on_outside.emit(());
            }
        });

        if let Some(document) = &document {
            if let Err(e) = document
                .add_event_listener_with_callback("mousedown", listener.as_ref().unchecked_ref())
            {
                log::error!("Failed to register outside-click listener: {:?}", e);
            }
        }

        move || {
            if let Some(document) = &document {
                let _ = document.remove_event_listener_with_callback(
                    "mousedown",
                    listener.as_ref().unchecked_ref(),
                );
            }
            drop(listener);
        }
    });
}

// ===================== Analysis =====================

/// Shared handle to the page's [`AnalysisOrchestrator`].
#[derive(Clone)]
pub struct AnalysisHandle {
    orchestrator: Rc<RefCell<AnalysisOrchestrator>>,
    redraw: UseForceUpdateHandle,
}

impl PartialEq for AnalysisHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.orchestrator, &other.orchestrator)
    }
}

impl AnalysisHandle {
    pub fn state(&self) -> Ref<'_, AnalysisOrchestrator> {
        self.orchestrator.borrow()
    }

    pub fn set_location(&self, slot: Slot, location: Option<LocationOption>) {
        {
            let mut orchestrator = self.orchestrator.borrow_mut();
            match slot {
                Slot::Current => orchestrator.set_current_location(location),
                Slot::Target => orchestrator.set_target_location(location),
            }
        }
        self.redraw.force_update();
    }

    pub fn set_priority(&self, key: PriorityKey, value: u8) {
        self.orchestrator.borrow_mut().set_priority(key, value);
        self.redraw.force_update();
    }

    /// Starts a run; both slot requests are in flight at once.
    pub fn analyze(&self) {
        let requests = self.orchestrator.borrow_mut().start();
        if requests.is_empty() {
            log::debug!("Analysis run produced no requests");
        }
        self.redraw.force_update();

        for request in requests {
            let handle = self.clone();
            spawn_local(async move {
                let result = climate::analyze_location(&request.location).await;
                let applied = handle
                    .orchestrator
                    .borrow_mut()
                    .complete(request.slot, request.token, result);
                if applied {
                    handle.redraw.force_update();
                }
            });
        }
    }
}

/// Orchestrator for the advisor page; probes backend health on mount.
#[hook]
pub fn use_analysis() -> AnalysisHandle {
    let orchestrator = use_mut_ref(AnalysisOrchestrator::new);
    let redraw = use_force_update();
    let handle = AnalysisHandle { orchestrator, redraw };

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = climate::check_health().await;
                handle.orchestrator.borrow_mut().health_checked(result);
                handle.redraw.force_update();
            });
            || ()
        });
    }

    handle
}
