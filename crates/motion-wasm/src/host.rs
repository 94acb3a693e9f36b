use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use motion_core::config::RevealConfig;
use motion_core::host::{
    Component, ElementId, Event, EventKind, EventTarget, FrameId, Host, ListenerId, Mounted,
    TimerId, Viewport,
};
use motion_core::math::Rect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, MouseEvent, Window};

type Sink = Rc<dyn Fn(Event)>;

/// Browser handles of scheduled one-shot callbacks, removed as they fire.
type Pending<K> = Rc<RefCell<BTreeMap<K, i32>>>;

struct Listener {
    target: web_sys::EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

/// [`Host`] backed by the browser: DOM listeners, rAF, timers and an
/// IntersectionObserver. Events are forwarded to the owning component
/// through `sink`.
pub struct DomHost {
    window: Window,
    sink: Sink,
    next_id: u32,
    elements: BTreeMap<ElementId, Element>,
    listeners: BTreeMap<ListenerId, Listener>,
    frames: Pending<FrameId>,
    timers: Pending<TimerId>,
    observer: Option<Observer>,
}

impl DomHost {
    fn new(window: Window, sink: Sink) -> Self {
        Self {
            window,
            sink,
            next_id: 0,
            elements: BTreeMap::new(),
            listeners: BTreeMap::new(),
            frames: Rc::default(),
            timers: Rc::default(),
            observer: None,
        }
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Give an element a handle components can refer to.
    pub fn register(&mut self, element: Element) -> ElementId {
        if let Some((&id, _)) = self.elements.iter().find(|(_, e)| **e == element) {
            return id;
        }
        let id = ElementId(self.next());
        self.elements.insert(id, element);
        id
    }

    // The observer maps entries back to ids using the elements registered
    // when it was created; register every element before the first observe.
    fn ensure_observer(&mut self, options: &RevealConfig) -> Option<&IntersectionObserver> {
        if self.observer.is_none() {
            let sink = self.sink.clone();
            let elements: Vec<(ElementId, Element)> =
                self.elements.iter().map(|(id, e)| (*id, e.clone())).collect();
            let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        let target = entry.target();
                        let Some((id, _)) = elements.iter().find(|(_, e)| *e == target) else {
                            continue;
                        };
                        sink(Event::Intersection {
                            element: *id,
                            ratio: entry.intersection_ratio() as f32,
                            intersecting: entry.is_intersecting(),
                        });
                    }
                },
            );

            let init = web_sys::IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold as f64));
            init.set_root_margin(&options.root_margin());

            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => {
                    self.observer = Some(Observer {
                        observer,
                        _callback: callback,
                    })
                }
                Err(err) => {
                    log::warn!("IntersectionObserver unavailable: {:?}", err);
                    return None;
                }
            }
        }
        self.observer.as_ref().map(|o| &o.observer)
    }

    /// Drop everything still registered. Called after the component unmounts,
    /// and again when the host itself is dropped.
    fn shutdown(&mut self) {
        let ids: Vec<ListenerId> = self.listeners.keys().copied().collect();
        for id in ids {
            self.unlisten(id);
        }
        let frames: Vec<FrameId> = self.frames.borrow().keys().copied().collect();
        for id in frames {
            self.cancel_frame(id);
        }
        let timers: Vec<TimerId> = self.timers.borrow().keys().copied().collect();
        for id in timers {
            self.clear_timeout(id);
        }
        if let Some(o) = self.observer.take() {
            o.observer.disconnect();
        }
    }
}

impl Host for DomHost {
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next());
        let sink = self.sink.clone();
        let window = self.window.clone();

        let (js_target, local): (web_sys::EventTarget, Option<Element>) = match target {
            EventTarget::Window => (self.window.clone().into(), None),
            EventTarget::Element(el) => match self.elements.get(&el) {
                Some(e) => (e.clone().into(), Some(e.clone())),
                None => {
                    log::warn!("listen on unknown element {:?}", el);
                    return id;
                }
            },
        };

        let name = match kind {
            EventKind::PointerMove => "mousemove",
            EventKind::Resize => "resize",
            EventKind::Scroll => "scroll",
        };

        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            let event = match kind {
                EventKind::PointerMove => {
                    let Some(m) = e.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    let (mut x, mut y) = (m.client_x() as f32, m.client_y() as f32);
                    if let Some(el) = &local {
                        let rect = el.get_bounding_client_rect();
                        x -= rect.left() as f32;
                        y -= rect.top() as f32;
                    }
                    Event::PointerMove { x, y }
                }
                EventKind::Resize => Event::Resize {
                    width: dimension(window.inner_width()),
                    height: dimension(window.inner_height()),
                },
                EventKind::Scroll => Event::Scroll,
            };
            sink(event);
        });

        if js_target
            .add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("failed to add {} listener", name);
            return id;
        }
        self.listeners.insert(
            id,
            Listener {
                target: js_target,
                name,
                callback,
            },
        );
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        if let Some(l) = self.listeners.remove(&id) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.name, l.callback.as_ref().unchecked_ref());
        }
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next());
        let sink = self.sink.clone();
        let pending = self.frames.clone();
        let callback = Closure::once_into_js(move |time_ms: f64| {
            pending.borrow_mut().remove(&id);
            sink(Event::Frame { time_ms });
        });
        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(handle) => {
                self.frames.borrow_mut().insert(id, handle);
            }
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let handle = self.frames.borrow_mut().remove(&id);
        if let Some(handle) = handle {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
            scroll_y: self.window.scroll_y().unwrap_or(0.0) as f32,
        }
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        let el = self.elements.get(&element)?;
        if !el.is_connected() {
            return None;
        }
        let r = el.get_bounding_client_rect();
        Some(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }

    fn observe(&mut self, element: ElementId, options: &RevealConfig) {
        let Some(el) = self.elements.get(&element).cloned() else {
            return;
        };
        if let Some(observer) = self.ensure_observer(options) {
            observer.observe(&el);
        }
    }

    fn unobserve(&mut self, element: ElementId) {
        if let (Some(el), Some(o)) = (self.elements.get(&element), &self.observer) {
            o.observer.unobserve(el);
        }
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next());
        let sink = self.sink.clone();
        let pending = self.timers.clone();
        let callback = Closure::once_into_js(move || {
            pending.borrow_mut().remove(&id);
            sink(Event::Timeout(id));
        });
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms as i32,
            ) {
            Ok(handle) => {
                self.timers.borrow_mut().insert(id, handle);
            }
            Err(err) => log::warn!("setTimeout failed: {:?}", err),
        }
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        let handle = self.timers.borrow_mut().remove(&id);
        if let Some(handle) = handle {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.elements.get(&element) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.elements
            .get(&element)
            .map(|e| e.is_connected())
            .unwrap_or(false)
    }
}

// Closures still registered with the browser must be removed before they
// are freed, or later events call into dropped memory.
impl Drop for DomHost {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn dimension(value: Result<JsValue, JsValue>) -> f32 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
}

type Inner<C> = Mounted<C, DomHost>;

/// A component living in the page, reachable from its own DOM callbacks.
///
/// Callbacks only hold a weak reference, so dropping the last `Runtime`
/// drops the [`Mounted`] pair: the component unmounts, then the host
/// removes whatever is left.
pub struct Runtime<C: Component + 'static> {
    inner: Rc<RefCell<Inner<C>>>,
}

impl<C: Component + 'static> Runtime<C> {
    /// Wrap a component. `build` runs before mount, typically to register
    /// elements and build the component from their ids.
    pub fn new(window: Window, build: impl FnOnce(&mut DomHost) -> C) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Inner<C>>>| {
            let weak = weak.clone();
            let sink: Sink = Rc::new(move |event: Event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                // Callbacks can arrive while JS is inside one of our methods.
                let Ok(mut guard) = inner.try_borrow_mut() else {
                    log::debug!("event {:?} dropped: runtime busy", event);
                    return;
                };
                guard.handle(&event);
            });
            let mut host = DomHost::new(window, sink);
            let component = build(&mut host);
            RefCell::new(Mounted::new(component, host))
        });
        Self { inner }
    }

    pub fn mount(&self) {
        self.inner.borrow_mut().mount();
    }

    pub fn unmount(&self) {
        let mut guard = self.inner.borrow_mut();
        guard.unmount();
        guard.host.shutdown();
    }

    pub fn with<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.borrow().component)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.borrow_mut().component)
    }
}
