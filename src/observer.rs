// Pattern 1: Observer - event registry with non-owning subscriptions
//
// Observers are owned by whoever created them (`Rc`). The notifier only keeps
// `Weak` handles, so dropping an observer never leaves a dangling reference
// behind: it just stops being invoked and is pruned on the next pass.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PatternError;

// ============================================================================
// Events and observers
// ============================================================================

/// Identifies a kind of notification. Carries no meaning beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

/// The interface to update observers.
pub trait Observer {
    fn name(&self) -> &str;

    /// Handles `event`. An error is reported to the notifier's log but never
    /// stops the remaining observers from running.
    fn update(&self, event: EventId) -> Result<(), PatternError>;
}

/// Downgrades a concrete observer into the handle a [`Notifier`] stores.
pub fn observer_handle<O: Observer + 'static>(observer: &Rc<O>) -> Weak<dyn Observer> {
    Rc::downgrade(observer) as Weak<dyn Observer>
}

#[derive(Debug, Default)]
pub struct StockObserver {
    processed: Cell<usize>,
}

impl StockObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stock events handled so far.
    pub fn processed(&self) -> usize {
        self.processed.get()
    }
}

impl Observer for StockObserver {
    fn name(&self) -> &str {
        "stock"
    }

    fn update(&self, event: EventId) -> Result<(), PatternError> {
        self.processed.set(self.processed.get() + 1);
        debug!(%event, processed = self.processed.get(), "stock observer updated");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FoodObserver {
    processed: Cell<usize>,
}

impl FoodObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&self) -> usize {
        self.processed.get()
    }
}

impl Observer for FoodObserver {
    fn name(&self) -> &str {
        "food"
    }

    fn update(&self, event: EventId) -> Result<(), PatternError> {
        self.processed.set(self.processed.get() + 1);
        debug!(%event, processed = self.processed.get(), "food observer updated");
        Ok(())
    }
}

/// Names of the built-in observers, as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ObserverKind {
    Stock,
    Food,
}

impl ObserverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObserverKind::Stock => "stock",
            ObserverKind::Food => "food",
        }
    }
}

impl FromStr for ObserverKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(ObserverKind::Stock),
            "food" => Ok(ObserverKind::Food),
            _ => Err(PatternError::UnknownObserver(s.to_string())),
        }
    }
}

impl TryFrom<String> for ObserverKind {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObserverKind> for String {
    fn from(kind: ObserverKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Outcome of a single [`Notifier::notify`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyReport {
    pub event: EventId,
    /// Observers whose update succeeded.
    pub delivered: usize,
    /// Observers whose update returned an error.
    pub failed: usize,
    /// Handles dropped because their observer no longer exists.
    pub pruned: usize,
}

impl NotifyReport {
    fn empty(event: EventId) -> Self {
        Self {
            event,
            delivered: 0,
            failed: 0,
            pruned: 0,
        }
    }

    pub fn invoked(&self) -> usize {
        self.delivered + self.failed
    }
}

/// The interface to notify observers. A secretary is one notifier, but a
/// guard or a boss could be another.
pub trait Notifier {
    /// Subscribes `observer` to `event`. Dangling handles are ignored and
    /// registering twice has no further effect.
    fn register(&mut self, event: EventId, observer: Weak<dyn Observer>);

    /// Removes `observer` from every event it was registered for.
    fn unregister(&mut self, observer: &Weak<dyn Observer>);

    /// Invokes every observer currently registered for `event`.
    fn notify(&mut self, event: EventId) -> NotifyReport;
}

/// Set entry keyed by the observer's allocation address.
#[derive(Clone)]
struct ObserverRef(Weak<dyn Observer>);

impl ObserverRef {
    fn addr(&self) -> *const () {
        self.0.as_ptr() as *const ()
    }

    fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl PartialEq for ObserverRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ObserverRef {}

impl Hash for ObserverRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

#[derive(Default)]
pub struct Secretary {
    event_table: HashMap<EventId, HashSet<ObserverRef>>,
}

impl Secretary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live observers registered for `event`.
    pub fn observer_count(&self, event: EventId) -> usize {
        self.event_table
            .get(&event)
            .map(|observers| observers.iter().filter(|o| o.is_alive()).count())
            .unwrap_or(0)
    }

    pub fn is_registered(&self, event: EventId, observer: &Weak<dyn Observer>) -> bool {
        self.event_table
            .get(&event)
            .is_some_and(|observers| observers.contains(&ObserverRef(observer.clone())))
    }

    /// Events that have ever had a registration, in ascending order.
    pub fn events(&self) -> Vec<EventId> {
        let mut events: Vec<EventId> = self.event_table.keys().copied().collect();
        events.sort();
        events
    }
}

impl Notifier for Secretary {
    fn register(&mut self, event: EventId, observer: Weak<dyn Observer>) {
        let Some(live) = observer.upgrade() else {
            warn!(%event, "ignoring registration of a dropped observer");
            return;
        };

        let inserted = self
            .event_table
            .entry(event)
            .or_default()
            .insert(ObserverRef(observer));
        debug!(%event, observer = live.name(), inserted, "register");
    }

    fn unregister(&mut self, observer: &Weak<dyn Observer>) {
        let target = ObserverRef(observer.clone());
        let mut removed = 0;

        for (event, observers) in self.event_table.iter_mut() {
            if observers.remove(&target) {
                removed += 1;
                debug!(%event, "unregister");
            }
        }

        if removed == 0 {
            debug!("unregister: observer was not registered");
        }
    }

    fn notify(&mut self, event: EventId) -> NotifyReport {
        let mut report = NotifyReport::empty(event);

        let Some(observers) = self.event_table.get_mut(&event) else {
            return report;
        };

        observers.retain(|entry| {
            let Some(observer) = entry.0.upgrade() else {
                report.pruned += 1;
                return false;
            };

            match observer.update(event) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    report.failed += 1;
                    warn!(%event, observer = observer.name(), error = %err, "observer update failed");
                }
            }
            true
        });

        report
    }
}

impl fmt::Debug for Secretary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for event in self.events() {
            map.entry(&event, &self.observer_count(event));
        }
        map.finish()
    }
}
