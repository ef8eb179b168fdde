//! Generic async-resource slice: a list + optional current item, plus the
//! request status flag every consumer keys its rendering off.
//!
//! The status machine is idle → pending → (succeeded | failed), returning
//! to idle either on the next dispatch or via an explicit [`ResourceState::reset`]
//! once the consumer has acknowledged a terminal state. Data is mutated only
//! through the `complete_*` methods; a failed dispatch never touches data.
//!
//! Concurrency contract: at most one in-flight action per slice is assumed
//! by consumers. A second `begin` while pending reuses the pending state,
//! and whichever outcome lands last wins — last-write-wins is the policy,
//! not an accident of ordering.

/// Request status of a slice. Exactly one of these holds at any time, so
/// "succeeded and failed simultaneously" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// State container for one named resource (gigs, bids, auth).
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    items: Vec<T>,
    current: Option<T>,
    status: Status,
    error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            status: Status::Idle,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Items in server-assigned order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Mark a dispatch as started. Runs synchronously before any network
    /// await so consumers observe pending immediately.
    pub fn begin(&mut self) {
        self.status = Status::Pending;
    }

    /// Record a failed dispatch. Data is left exactly as it was.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = Status::Failed;
        self.error = Some(message.into());
    }

    /// Acknowledge a terminal status: back to idle, error cleared, data kept.
    pub fn reset(&mut self) {
        self.status = Status::Idle;
        self.error = None;
    }

    /// Fetch-all outcome: replace the whole list.
    pub fn complete_replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.succeed();
    }

    /// Create outcome: append the new item.
    pub fn complete_append(&mut self, item: T) {
        self.items.push(item);
        self.succeed();
    }

    /// Fetch-one outcome: set the current item.
    pub fn complete_current(&mut self, item: T) {
        self.current = Some(item);
        self.succeed();
    }

    /// Delete outcome: drop every item matching the predicate.
    pub fn complete_remove(&mut self, mut gone: impl FnMut(&T) -> bool) {
        self.items.retain(|it| !gone(it));
        self.succeed();
    }

    /// Arbitrary successful outcome (in-place updates, joint mutations).
    /// The closure gets the list and the current item together so a single
    /// response can update both without an observable intermediate state.
    pub fn complete_with(&mut self, f: impl FnOnce(&mut Vec<T>, &mut Option<T>)) {
        f(&mut self.items, &mut self.current);
        self.succeed();
    }

    /// Drop the current item (used when the session ends).
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    fn succeed(&mut self) {
        self.status = Status::Succeeded;
        self.error = None;
    }
}
