use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::interaction::SurfaceRect;

/// Pointer input delivered by a host surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    PointerMove {
        client_x: f64,
        client_y: f64,
        rect: SurfaceRect,
    },
    PointerLeave,
}

type SurfaceHandler = Box<dyn FnMut(&SurfaceEvent)>;

#[derive(Default)]
struct HandlerRegistry {
    next_id: u64,
    handlers: Vec<(u64, SurfaceHandler)>,
    cancelled_during_dispatch: Vec<u64>,
}

/// Single-threaded event source standing in for a host drawing surface.
///
/// Handlers stay registered for as long as their [`Subscription`] lives.
pub struct ChartSurface {
    rect: Cell<SurfaceRect>,
    registry: Rc<RefCell<HandlerRegistry>>,
}

impl ChartSurface {
    #[must_use]
    pub fn new(rect: SurfaceRect) -> Self {
        Self {
            rect: Cell::new(rect),
            registry: Rc::new(RefCell::new(HandlerRegistry::default())),
        }
    }

    #[must_use]
    pub fn rect(&self) -> SurfaceRect {
        self.rect.get()
    }

    /// Updates the displayed rectangle, e.g. after a host resize.
    pub fn set_rect(&self, rect: SurfaceRect) {
        self.rect.set(rect);
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    #[must_use]
    pub fn subscribe(&self, handler: impl FnMut(&SurfaceEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.handlers.push((id, Box::new(handler)));
        trace!(id, handlers = registry.handlers.len(), "surface handler subscribed");
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Dispatches a pointer move at client coordinates using the current rect.
    pub fn pointer_move(&self, client_x: f64, client_y: f64) {
        self.dispatch(&SurfaceEvent::PointerMove {
            client_x,
            client_y,
            rect: self.rect(),
        });
    }

    pub fn pointer_leave(&self) {
        self.dispatch(&SurfaceEvent::PointerLeave);
    }

    /// Calls every live handler in subscription order.
    ///
    /// Handlers may subscribe or drop subscriptions while being called.
    pub fn dispatch(&self, event: &SurfaceEvent) {
        let mut active = std::mem::take(&mut self.registry.borrow_mut().handlers);
        for (_, handler) in &mut active {
            handler(event);
        }

        let mut registry = self.registry.borrow_mut();
        let cancelled = std::mem::take(&mut registry.cancelled_during_dispatch);
        active.retain(|(id, _)| !cancelled.contains(id));
        active.append(&mut registry.handlers);
        registry.handlers = active;
    }
}

impl std::fmt::Debug for ChartSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartSurface")
            .field("rect", &self.rect.get())
            .field("handler_count", &self.handler_count())
            .finish()
    }
}

/// Registration guard returned by [`ChartSurface::subscribe`].
///
/// Dropping it removes the handler. Outliving the surface is harmless.
#[derive(Debug)]
#[must_use = "dropping a subscription unregisters its handler"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<HandlerRegistry>>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = registry.try_borrow_mut() else {
            return;
        };
        let before = registry.handlers.len();
        registry.handlers.retain(|(id, _)| *id != self.id);
        if registry.handlers.len() == before {
            registry.cancelled_during_dispatch.push(self.id);
        }
        trace!(id = self.id, "surface handler unsubscribed");
    }
}
