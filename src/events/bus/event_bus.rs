// events/bus/event_bus.rs
//
// In-process event bus.
//
// - Synchronous: handlers run immediately, in subscription order
// - Observable: every emission is logged; the most recent ones are kept
// - Type-safe: handlers subscribe to a concrete event type

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Emissions kept in the log before the oldest are dropped
pub const EVENT_LOG_CAPACITY: usize = 256;

/// Type-erased handler; downcasts to the concrete event inside
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Lets view-models announce what happened without knowing who listens.
///
/// Cloning shares the same subscribers and log.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// One recorded emission
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of type `E`.
    ///
    /// ```ignore
    /// bus.subscribe::<MessageSent, _>(|event| {
    ///     log::info!("new message in {}", event.conversation_id);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Record the event and run its handlers.
    ///
    /// A panicking handler is logged and does not stop the others.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        let event_handlers = handlers.get(&TypeId::of::<E>());

        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: event_handlers.map(Vec::len).unwrap_or(0),
        };

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            entry.event_type,
            entry.event_id,
            entry.handler_count
        );

        {
            let mut entries = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
            if entries.len() == EVENT_LOG_CAPACITY {
                entries.pop_front();
            }
            entries.push_back(entry);
        }

        if let Some(handlers) = event_handlers {
            for (idx, handler) in handlers.iter().enumerate() {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    handler(&event as &dyn Any);
                }));

                if result.is_err() {
                    log::error!("Handler {} for {} panicked", idx, event.event_type());
                }
            }
        }
    }

    /// Recent emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .map(Vec::len)
            .unwrap_or(0)
    }
}
