//! Mutating operations for the event store
//!
//! Each operation holds the write lock across the in-memory change and the
//! save, so on-disk snapshots follow the order of completed calls. When the
//! save fails the in-memory change is undone before the error is returned.

use crate::types::Event;

use super::{EventStore, EventStoreError, EventStoreResult};

/// Insert a new event (thread-safe: holds write lock during entire operation)
pub fn create(store: &EventStore, event: Event) -> EventStoreResult<()> {
    let mut events = store.events.write();

    if events.contains_key(&event.id) {
        return Err(EventStoreError::AlreadyExists(event.id));
    }

    let id = event.id.clone();
    events.insert(id.clone(), event);

    if let Err(e) = store.persist_to_file(&events) {
        events.remove(&id);
        return Err(e);
    }
    Ok(())
}

/// Replace an existing event (thread-safe: holds write lock during entire operation)
pub fn update(store: &EventStore, event: Event) -> EventStoreResult<()> {
    let mut events = store.events.write();

    let Some(slot) = events.get_mut(&event.id) else {
        return Err(EventStoreError::NotFound(event.id));
    };
    let previous = std::mem::replace(slot, event);

    if let Err(e) = store.persist_to_file(&events) {
        events.insert(previous.id.clone(), previous);
        return Err(e);
    }
    Ok(())
}

/// Remove an event by id (thread-safe: holds write lock during entire operation)
pub fn delete(store: &EventStore, id: &str) -> EventStoreResult<()> {
    let mut events = store.events.write();

    let Some(removed) = events.remove(id) else {
        return Err(EventStoreError::NotFound(id.to_string()));
    };

    if let Err(e) = store.persist_to_file(&events) {
        events.insert(removed.id.clone(), removed);
        return Err(e);
    }
    Ok(())
}
