//! Event, listener and frame seam between components and their environment.
//!
//! A component never touches global listener state. Everything it registers
//! goes through a [`Host`] and is kept in its own [`Subscriptions`], which
//! gives it back on unmount.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::RevealConfig;
use crate::math::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u32);

/// Host-assigned handle for a DOM element (or anything observable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    Resize,
    Scroll,
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Element(ElementId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Pointer position in the listener target's local coordinates.
    PointerMove { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    Scroll,
    /// A previously requested animation frame is running.
    Frame { time_ms: f64 },
    Intersection { element: ElementId, ratio: f32, intersecting: bool },
    Timeout(TimerId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
}

pub trait Host {
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);

    /// Run a `Frame` event before the next repaint.
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);

    fn viewport(&self) -> Viewport;
    /// Bounding box relative to the viewport, `None` once detached.
    fn element_rect(&self, element: ElementId) -> Option<Rect>;

    fn element_top(&self, element: ElementId) -> Option<f32> {
        self.element_rect(element).map(|r| r.top)
    }

    fn observe(&mut self, element: ElementId, options: &RevealConfig);
    fn unobserve(&mut self, element: ElementId);

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId;
    fn clear_timeout(&mut self, id: TimerId);

    fn add_class(&mut self, element: ElementId, class: &str);
    fn is_attached(&self, element: ElementId) -> bool;
}

/// Something a host can mount, feed events to, and tear down.
pub trait Component {
    fn mount(&mut self, host: &mut dyn Host);
    fn handle(&mut self, event: &Event, host: &mut dyn Host);
    fn unmount(&mut self, host: &mut dyn Host);
    fn is_mounted(&self) -> bool;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        (**self).listen(target, kind)
    }

    fn unlisten(&mut self, id: ListenerId) {
        (**self).unlisten(id)
    }

    fn request_frame(&mut self) -> FrameId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameId) {
        (**self).cancel_frame(id)
    }

    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        (**self).element_rect(element)
    }

    fn observe(&mut self, element: ElementId, options: &RevealConfig) {
        (**self).observe(element, options)
    }

    fn unobserve(&mut self, element: ElementId) {
        (**self).unobserve(element)
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        (**self).set_timeout(delay_ms)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        (**self).clear_timeout(id)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        (**self).add_class(element, class)
    }

    fn is_attached(&self, element: ElementId) -> bool {
        (**self).is_attached(element)
    }
}

/// A component paired with the host it lives on.
///
/// Dropping a `Mounted` unmounts the component first, so a handle that is
/// discarded without an explicit unmount still gives back its listeners.
pub struct Mounted<C: Component, H: Host> {
    pub component: C,
    pub host: H,
}

impl<C: Component, H: Host> Mounted<C, H> {
    pub fn new(component: C, host: H) -> Self {
        Self { component, host }
    }

    pub fn mount(&mut self) {
        self.component.mount(&mut self.host);
    }

    pub fn handle(&mut self, event: &Event) {
        self.component.handle(event, &mut self.host);
    }

    pub fn unmount(&mut self) {
        if self.component.is_mounted() {
            self.component.unmount(&mut self.host);
        }
    }
}

impl<C: Component, H: Host> Drop for Mounted<C, H> {
    fn drop(&mut self) {
        if self.component.is_mounted() {
            log::debug!("component dropped while mounted; unmounting");
        }
        self.unmount();
    }
}

/// Listener and frame handles owned by one component instance.
#[derive(Debug, Default)]
pub struct Subscriptions {
    listeners: Vec<ListenerId>,
    frame: Option<FrameId>,
}

impl Subscriptions {
    pub fn listen(&mut self, host: &mut dyn Host, target: EventTarget, kind: EventKind) {
        let id = host.listen(target, kind);
        self.listeners.push(id);
    }

    /// Request a frame unless one is already pending. Returns true if a new
    /// request was made.
    pub fn request_frame(&mut self, host: &mut dyn Host) -> bool {
        if self.frame.is_some() {
            return false;
        }
        self.frame = Some(host.request_frame());
        true
    }

    /// Mark the pending frame as delivered.
    pub fn frame_ran(&mut self) {
        self.frame = None;
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Remove every listener and cancel the pending frame.
    pub fn release(&mut self, host: &mut dyn Host) {
        for id in self.listeners.drain(..) {
            host.unlisten(id);
        }
        if let Some(frame) = self.frame.take() {
            host.cancel_frame(frame);
        }
    }
}

/// In-memory [`Host`] for tests and non-browser drivers.
///
/// Records registrations and mutations; events are pushed in by the caller
/// through [`HeadlessHost::dispatch`] and friends.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_id: u32,
    pub viewport: Viewport,
    pub listeners: BTreeMap<ListenerId, (EventTarget, EventKind)>,
    pub frames: BTreeSet<FrameId>,
    pub timers: BTreeMap<TimerId, u32>,
    pub observed: BTreeSet<ElementId>,
    pub element_rects: BTreeMap<ElementId, Rect>,
    pub detached: BTreeSet<ElementId>,
    /// Every `add_class` call, in order.
    pub class_log: Vec<(ElementId, String)>,
    pub frame_requests: usize,
    pub observe_calls: usize,
    pub unobserve_calls: usize,
}

impl HeadlessHost {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport { width, height, scroll_y: 0.0 },
            ..Default::default()
        }
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn has_listener(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|(_, k)| *k == kind)
    }

    /// Deliver an event to `component` if a listener for it is registered,
    /// mirroring how a real host only calls back registered handlers.
    pub fn dispatch<C: Component + ?Sized>(&mut self, component: &mut C, event: Event) -> bool {
        let kind = match event {
            Event::PointerMove { .. } => Some(EventKind::PointerMove),
            Event::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                Some(EventKind::Resize)
            }
            Event::Scroll => Some(EventKind::Scroll),
            _ => None,
        };
        if let Some(kind) = kind {
            if !self.has_listener(kind) {
                return false;
            }
        }
        component.handle(&event, self);
        true
    }

    /// Run all pending frames once. Returns how many ran.
    pub fn run_frames<C: Component + ?Sized>(&mut self, component: &mut C, time_ms: f64) -> usize {
        let pending: Vec<FrameId> = std::mem::take(&mut self.frames).into_iter().collect();
        for _ in &pending {
            component.handle(&Event::Frame { time_ms }, self);
        }
        pending.len()
    }

    /// Fire every outstanding timer.
    pub fn run_timers<C: Component + ?Sized>(&mut self, component: &mut C) -> usize {
        let due: Vec<TimerId> = std::mem::take(&mut self.timers).into_keys().collect();
        for id in &due {
            component.handle(&Event::Timeout(*id), self);
        }
        due.len()
    }

    /// Scroll the page by `dy`, moving every tracked element up by the same amount.
    pub fn scroll_by(&mut self, dy: f32) {
        self.viewport.scroll_y += dy;
        for rect in self.element_rects.values_mut() {
            rect.top -= dy;
        }
    }

    pub fn classes_of(&self, element: ElementId) -> Vec<&str> {
        self.class_log
            .iter()
            .filter(|(e, _)| *e == element)
            .map(|(_, c)| c.as_str())
            .collect()
    }
}

impl Host for HeadlessHost {
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, (target, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next());
        self.frames.insert(id);
        self.frame_requests += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.remove(&id);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_rect(&self, element: ElementId) -> Option<Rect> {
        if self.detached.contains(&element) {
            return None;
        }
        self.element_rects.get(&element).copied()
    }

    fn observe(&mut self, element: ElementId, _options: &RevealConfig) {
        self.observe_calls += 1;
        self.observed.insert(element);
    }

    fn unobserve(&mut self, element: ElementId) {
        self.unobserve_calls += 1;
        self.observed.remove(&element);
    }

    fn set_timeout(&mut self, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next());
        self.timers.insert(id, delay_ms);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.class_log.push((element, class.to_string()));
    }

    fn is_attached(&self, element: ElementId) -> bool {
        !self.detached.contains(&element)
    }
}
