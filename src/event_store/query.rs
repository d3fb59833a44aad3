//! Read-only queries over the event store

use chrono::NaiveDate;

use crate::types::Event;

use super::{EventStore, EventStoreError, EventStoreResult};

/// All events, sorted by id
pub fn get_all(store: &EventStore) -> Vec<Event> {
    let events = store.events.read();
    let mut all: Vec<Event> = events.values().cloned().collect();
    all.sort_by(|a, b| a.id.cmp(&b.id));
    all
}

pub fn get_by_id(store: &EventStore, id: &str) -> EventStoreResult<Event> {
    store
        .events
        .read()
        .get(id)
        .cloned()
        .ok_or_else(|| EventStoreError::NotFound(id.to_string()))
}

/// Events whose start falls on `date` in the store time zone, earliest first
///
/// Only the start time is considered: an event running past midnight is
/// listed under the day it starts.
pub fn get_by_date(store: &EventStore, date: NaiveDate) -> Vec<Event> {
    let tz = store.timezone;
    let events = store.events.read();

    let mut matched: Vec<Event> = events
        .values()
        .filter(|e| e.start_time.with_timezone(&tz).date_naive() == date)
        .cloned()
        .collect();
    drop(events);

    matched.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.id.cmp(&b.id))
    });
    matched
}

/// Events whose title contains `query`, ignoring case; sorted by id
///
/// An empty query matches every event.
pub fn search(store: &EventStore, query: &str) -> Vec<Event> {
    let needle = query.to_lowercase();
    let events = store.events.read();

    let mut matched: Vec<Event> = events
        .values()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    drop(events);

    matched.sort_by(|a, b| a.id.cmp(&b.id));
    matched
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono_tz::Tz;
    use tempfile::TempDir;

    use super::*;

    fn setup(tz: Tz) -> (EventStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = EventStore::open(temp_dir.path().join("events.json"), tz).unwrap();
        (store, temp_dir)
    }

    fn add(store: &EventStore, title: &str, start: &str, end: &str) -> Event {
        let event = Event::new(
            title.to_string(),
            DateTime::parse_from_rfc3339(start).unwrap(),
            DateTime::parse_from_rfc3339(end).unwrap(),
            vec![],
        );
        store.create(event.clone()).unwrap();
        event
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    #[test]
    fn test_get_all_sorted_by_id() {
        let (store, _dir) = setup(Tz::UTC);
        for title in ["a", "b", "c"] {
            add(&store, title, "2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z");
        }

        let ids: Vec<String> = get_all(&store).into_iter().map(|e| e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_get_by_date_sorted_by_start() {
        let (store, _dir) = setup(Tz::UTC);
        let late = add(&store, "Late", "2024-06-01T18:00:00Z", "2024-06-01T19:00:00Z");
        let early = add(&store, "Early", "2024-06-01T08:00:00Z", "2024-06-01T09:00:00Z");
        add(&store, "Other day", "2024-06-02T08:00:00Z", "2024-06-02T09:00:00Z");

        let found = get_by_date(&store, june(1));
        assert_eq!(found, vec![early, late]);
    }

    #[test]
    fn test_get_by_date_uses_start_only() {
        let (store, _dir) = setup(Tz::UTC);
        let overnight = add(&store, "Overnight", "2024-06-01T23:00:00Z", "2024-06-02T01:00:00Z");

        assert_eq!(get_by_date(&store, june(1)), vec![overnight]);
        assert!(get_by_date(&store, june(2)).is_empty());
    }

    #[test]
    fn test_get_by_date_in_store_timezone() {
        let (store, _dir) = setup(Tz::Asia__Tokyo);
        // 20:00 UTC on June 1st is 05:00 on June 2nd in Tokyo
        let event = add(&store, "Call", "2024-06-01T20:00:00Z", "2024-06-01T21:00:00Z");

        assert!(get_by_date(&store, june(1)).is_empty());
        assert_eq!(get_by_date(&store, june(2)), vec![event]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let (store, _dir) = setup(Tz::UTC);
        let meeting = add(&store, "Team Meeting", "2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z");
        add(&store, "Lunch", "2024-06-01T12:00:00Z", "2024-06-01T13:00:00Z");

        assert_eq!(search(&store, "meet"), vec![meeting]);
    }

    #[test]
    fn test_search_unicode() {
        let (store, _dir) = setup(Tz::UTC);
        let event = add(&store, "Встреча команды", "2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z");

        assert_eq!(search(&store, "ВСТРЕЧА"), vec![event]);
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let (store, _dir) = setup(Tz::UTC);
        add(&store, "One", "2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z");
        add(&store, "Two", "2024-06-01T12:00:00Z", "2024-06-01T13:00:00Z");

        assert_eq!(search(&store, "").len(), 2);
    }

    #[test]
    fn test_reads_are_idempotent() {
        let (store, _dir) = setup(Tz::UTC);
        add(&store, "One", "2024-06-01T10:00:00Z", "2024-06-01T11:00:00Z");
        add(&store, "Two", "2024-06-01T12:00:00Z", "2024-06-01T13:00:00Z");

        assert_eq!(get_all(&store), get_all(&store));
        assert_eq!(search(&store, "o"), search(&store, "o"));
        assert_eq!(get_by_date(&store, june(1)), get_by_date(&store, june(1)));
    }
}
