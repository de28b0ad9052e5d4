//! Turns controller bindings into real listeners and timers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use sitechrome::nav::Deferred;
use sitechrome::{
    Action, Binding, EventContext, FragmentCatalog, FragmentLoader, ListenTarget, NavController,
    SiteConfig, SlotSpec, Subscription, SubscriptionSet,
};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::dom::WebDom;
use crate::fetch::{BrowserFetcher, js_message};

type Controller = Rc<RefCell<NavController<WebDom>>>;

/// One page's loader, controller and live listeners.
pub struct Host {
    dom: WebDom,
    fetcher: BrowserFetcher,
    catalog: FragmentCatalog,
    slots: Vec<SlotSpec>,
    controller: Controller,
    page: RefCell<SubscriptionSet>,
    nav: RefCell<SubscriptionSet>,
}

impl Host {
    /// Host for `dom` with the given configuration and fragment catalog.
    pub fn new(dom: WebDom, config: SiteConfig, catalog: FragmentCatalog) -> Self {
        let fetcher = BrowserFetcher::new(dom.window().clone());
        let slots = config.slot_specs();
        let controller = Rc::new(RefCell::new(NavController::new(dom.clone(), config)));
        Self {
            dom,
            fetcher,
            catalog,
            slots,
            controller,
            page: RefCell::new(SubscriptionSet::new()),
            nav: RefCell::new(SubscriptionSet::new()),
        }
    }

    /// Bind page behaviors, then load fragments and attach navigation.
    pub async fn boot(&self) {
        let bindings = self.controller.borrow().page_bindings();
        let subscriptions: Vec<_> = bindings.into_iter().map(|b| self.listen(b)).collect();
        self.page.borrow_mut().extend(subscriptions);
        self.load_and_attach().await;
    }

    /// Drop navigation listeners, reload every slot and attach again.
    pub async fn reload(&self) {
        let dropped = self.nav.borrow().len();
        self.nav.borrow_mut().clear();
        self.controller.borrow_mut().detach();
        debug!(dropped, "Navigation listeners removed for reload");
        self.load_and_attach().await;
    }

    /// Live listeners: (page, navigation).
    pub fn listener_counts(&self) -> (usize, usize) {
        (self.page.borrow().len(), self.nav.borrow().len())
    }

    async fn load_and_attach(&self) {
        let report = FragmentLoader::new(&self.dom, &self.fetcher, &self.catalog)
            .load_all(&self.slots)
            .await;
        for (slot, state) in report.iter() {
            debug!(slot, state = %state, "Slot settled");
        }

        let mut bindings = self.controller.borrow_mut().attach(&report);
        bindings.extend(self.controller.borrow().fragment_bindings(&report));
        let subscriptions: Vec<_> = bindings.into_iter().map(|b| self.listen(b)).collect();
        info!(listeners = subscriptions.len(), "Page ready");
        self.nav.borrow_mut().extend(subscriptions);
    }

    fn listen(&self, binding: Binding<Element>) -> Subscription {
        let Binding {
            target,
            event,
            action,
        } = binding;
        let event_name = event.as_event_name();
        let label = format!("{event_name} on {}", describe(&target));
        let target: EventTarget = match target {
            ListenTarget::Window => self.dom.window().clone().into(),
            ListenTarget::Document => self.dom.document().clone().into(),
            ListenTarget::Element(element) => element.into(),
        };

        let controller = Rc::downgrade(&self.controller);
        let dom = self.dom.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&dom, &controller, &action, &event_context(&event), Some(&event));
        });

        if let Err(err) =
            target.add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
        {
            warn!(listener = %label, error = %js_message(&err), "Could not add listener");
            return Subscription::detached(label);
        }

        Subscription::new(label, move || {
            let removed = target
                .remove_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref());
            if let Err(err) = removed {
                debug!(error = %js_message(&err), "Could not remove listener");
            }
            drop(callback);
        })
    }
}

fn describe(target: &ListenTarget<Element>) -> String {
    match target {
        ListenTarget::Window => "window".into(),
        ListenTarget::Document => "document".into(),
        ListenTarget::Element(element) => match element.id().as_str() {
            "" => element.tag_name().to_lowercase(),
            id => format!("#{id}"),
        },
    }
}

fn event_context(event: &Event) -> EventContext<Element> {
    EventContext {
        target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
        key: event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
    }
}

/// Run one action and carry out its effects.
fn dispatch(
    dom: &WebDom,
    controller: &Weak<RefCell<NavController<WebDom>>>,
    action: &Action<Element>,
    context: &EventContext<Element>,
    event: Option<&Event>,
) {
    let Some(controller_rc) = controller.upgrade() else {
        return;
    };
    let effects = match controller_rc.try_borrow_mut() {
        Ok(mut nav) => nav.handle(action, context),
        Err(_) => {
            debug!(?action, "Controller busy, event skipped");
            return;
        }
    };

    if effects.prevent_default {
        if let Some(event) = event {
            event.prevent_default();
        }
    }
    for deferred in effects.deferred {
        schedule(dom, controller.clone(), deferred);
    }
}

fn schedule(dom: &WebDom, controller: Weak<RefCell<NavController<WebDom>>>, deferred: Deferred<Element>) {
    let Deferred { delay, action } = deferred;
    let timer_dom = dom.clone();
    let callback = Closure::once_into_js(move || {
        dispatch(&timer_dom, &controller, &action, &EventContext::none(), None);
    });
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let scheduled = dom
        .window()
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis);
    if let Err(err) = scheduled {
        warn!(error = %js_message(&err), "Could not schedule timer");
    }
}
