//! Record store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide create/lookup/update/delete and paged reads over one table.
//! - Guard rows and the id counter with a single reader/writer lock.
//!
//! # Invariants
//! - Rows are sorted by id ascending; ids are only ever appended.
//! - Ids start at 0, grow by one per create and are never reused.
//! - Reads return owned clones; no reference into the table escapes a lock.
//! - Absence is a value (`None`, `false`, empty `Vec`), never an error.

use crate::model::record::{Named, Record, RecordId};
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;

/// Repository interface for one in-memory table.
pub trait RecordRepository<P> {
    /// Returns the current row count.
    fn size(&self) -> usize;
    /// Appends a row with the next id and returns that id.
    fn create(&self, payload: P) -> RecordId;
    /// Gets a snapshot of one row by id.
    fn find_by_id(&self, id: RecordId) -> Option<Record<P>>;
    /// Replaces the payload of one row. Returns `false` when absent.
    fn update(&self, id: RecordId, payload: P) -> bool;
    /// Removes one row. Returns `false` when absent.
    fn delete(&self, id: RecordId) -> bool;
    /// Returns up to `page_size` rows starting at position `start_index`.
    fn page_by_range(&self, start_index: i64, page_size: i64) -> Vec<Record<P>>;
    /// Counts rows whose payload name equals `name`.
    fn count_by_name(&self, name: &str) -> usize
    where
        P: Named;
    /// Pages over rows whose payload name equals `name`, in id order.
    fn page_by_name(&self, name: &str, start_index: i64, page_size: i64) -> Vec<Record<P>>
    where
        P: Named;
    /// Runs several reads under one shared lock acquisition.
    ///
    /// `f` must only read through the `&Table` it is given and must never
    /// call back into the store (or a clone of it). The lock is fair: a nested
    /// read queues behind any waiting writer, and that writer waits for the
    /// outer read, so a re-entrant call deadlocks.
    fn read<T>(&self, f: impl FnOnce(&Table<P>) -> T) -> T;
}

/// Locked table state: id counter plus id-sorted rows.
///
/// Only reachable through [`RecordRepository::read`] (shared access) or the
/// store's own write paths, so holding `&Table` always means holding the lock.
/// While a `&Table` is held, read through it rather than through the store;
/// see [`RecordRepository::read`].
#[derive(Debug)]
pub struct Table<P> {
    next_id: RecordId,
    rows: Vec<Record<P>>,
}

impl<P> Table<P> {
    fn new() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }

    /// Current row count.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Id the next create will assign.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.rows.binary_search_by_key(&id, Record::id).ok()
    }

    fn insert(&mut self, payload: P) -> RecordId {
        let id = self.next_id;
        self.rows.push(Record::new(id, payload));
        self.next_id += 1;
        id
    }

    fn replace(&mut self, id: RecordId, payload: P) -> bool {
        match self.position(id) {
            Some(index) => {
                self.rows[index].replace_payload(payload);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: RecordId) -> bool {
        match self.position(id) {
            Some(index) => {
                // `Vec::remove` shifts the tail left, so id order is kept.
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<P: Clone> Table<P> {
    /// Gets a snapshot of one row by id using binary search.
    pub fn find_by_id(&self, id: RecordId) -> Option<Record<P>> {
        self.position(id).map(|index| self.rows[index].clone())
    }

    /// Returns up to `page_size` rows starting at position `start_index`.
    ///
    /// Negative starts read from 0; a start past the end or a non-positive
    /// size yields an empty page; a range running off the end is clipped.
    pub fn page_by_range(&self, start_index: i64, page_size: i64) -> Vec<Record<P>> {
        self.page_where(|_| true, start_index, page_size)
    }

    /// Counts rows whose payload matches `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&P) -> bool) -> usize {
        self.rows
            .iter()
            .filter(|record| predicate(&record.payload))
            .count()
    }

    /// Filters rows by `predicate` in id order, then applies the range rules
    /// of [`Table::page_by_range`] to the filtered sequence.
    pub fn page_where(
        &self,
        predicate: impl Fn(&P) -> bool,
        start_index: i64,
        page_size: i64,
    ) -> Vec<Record<P>> {
        let Some((skip, take)) = normalize_range(start_index, page_size) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|record| predicate(&record.payload))
            .skip(skip)
            .take(take)
            .cloned()
            .collect()
    }
}

impl<P: Clone + Named> Table<P> {
    pub fn count_by_name(&self, name: &str) -> usize {
        self.count_where(|payload| payload.name() == name)
    }

    pub fn page_by_name(&self, name: &str, start_index: i64, page_size: i64) -> Vec<Record<P>> {
        self.page_where(|payload| payload.name() == name, start_index, page_size)
    }
}

/// Converts a signed `(start, size)` request into `(skip, take)`.
///
/// Returns `None` when nothing can be returned.
fn normalize_range(start_index: i64, page_size: i64) -> Option<(usize, usize)> {
    if page_size <= 0 {
        return None;
    }
    let skip = usize::try_from(start_index.max(0)).unwrap_or(usize::MAX);
    let take = usize::try_from(page_size).unwrap_or(usize::MAX);
    Some((skip, take))
}

/// In-memory table guarded by one fair reader/writer lock.
///
/// Clone-friendly via `Arc`: clones share the same table.
#[derive(Debug)]
pub struct InMemoryRecordStore<P> {
    table: Arc<RwLock<Table<P>>>,
}

impl<P> Clone for InMemoryRecordStore<P> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<P> Default for InMemoryRecordStore<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> InMemoryRecordStore<P> {
    /// Creates an empty store whose first id will be 0.
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::new())),
        }
    }

    /// Creates a store pre-filled with `payloads`, ids assigned in order.
    pub fn with_seed(payloads: impl IntoIterator<Item = P>) -> Self {
        let mut table = Table::new();
        for payload in payloads {
            table.insert(payload);
        }
        info!(
            "event=store_seed module=store status=ok rows={}",
            table.len()
        );
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }
}

impl<P: Clone> RecordRepository<P> for InMemoryRecordStore<P> {
    fn size(&self) -> usize {
        let rows = self.table.read().len();
        debug!("event=record_size module=store status=ok rows={rows}");
        rows
    }

    fn create(&self, payload: P) -> RecordId {
        let id = self.table.write().insert(payload);
        info!("event=record_create module=store status=ok id={id}");
        id
    }

    fn find_by_id(&self, id: RecordId) -> Option<Record<P>> {
        let found = self.table.read().find_by_id(id);
        let status = if found.is_some() { "ok" } else { "not_found" };
        debug!("event=record_find module=store status={status} id={id}");
        found
    }

    fn update(&self, id: RecordId, payload: P) -> bool {
        let updated = self.table.write().replace(id, payload);
        if updated {
            info!("event=record_update module=store status=ok id={id}");
        } else {
            debug!("event=record_update module=store status=not_found id={id}");
        }
        updated
    }

    fn delete(&self, id: RecordId) -> bool {
        let removed = self.table.write().remove(id);
        if removed {
            info!("event=record_delete module=store status=ok id={id}");
        } else {
            debug!("event=record_delete module=store status=not_found id={id}");
        }
        removed
    }

    fn page_by_range(&self, start_index: i64, page_size: i64) -> Vec<Record<P>> {
        let page = self.table.read().page_by_range(start_index, page_size);
        debug!(
            "event=record_page module=store status=ok start={start_index} size={page_size} rows={}",
            page.len()
        );
        page
    }

    fn count_by_name(&self, name: &str) -> usize
    where
        P: Named,
    {
        let matches = self.table.read().count_by_name(name);
        debug!("event=record_count_by_name module=store status=ok matches={matches}");
        matches
    }

    fn page_by_name(&self, name: &str, start_index: i64, page_size: i64) -> Vec<Record<P>>
    where
        P: Named,
    {
        let page = self.table.read().page_by_name(name, start_index, page_size);
        debug!(
            "event=record_page_by_name module=store status=ok start={start_index} size={page_size} rows={}",
            page.len()
        );
        page
    }

    fn read<T>(&self, f: impl FnOnce(&Table<P>) -> T) -> T {
        let table = self.table.read();
        f(&table)
    }
}
