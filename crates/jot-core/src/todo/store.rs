use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::layout::{self, TODOS_KEY, URGENT_TODOS_KEY};
use super::{Clock, SystemClock, TodoId, TodoItem};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoStoreError {
    #[error("Index {index} is out of bounds for a list of {len} items")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// What [`TodoStore::hydrate`] found in storage. Informational only: every
/// variant other than `Restored` leaves the store empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateOutcome {
    Restored { todos: usize, urgent: usize },
    /// Nothing stored yet.
    Empty,
    Unavailable,
    /// Stored data was malformed and ignored.
    Discarded,
}

#[derive(Debug, Default)]
struct IdAllocator {
    last_issued: Option<TodoId>,
}

impl IdAllocator {
    /// Prefers `max(now, last + 1)`. Once `last` sits at `i64::MAX`, or the
    /// preferred id is taken, falls back to the lowest unused non-negative id.
    fn next(&mut self, now_millis: i64, live: &[TodoItem]) -> TodoId {
        let in_use = |id: TodoId| live.iter().any(|item| item.id == id);

        let preferred = match self.last_issued {
            Some(last) => last
                .as_i64()
                .checked_add(1)
                .map(|next| next.max(now_millis)),
            None => Some(now_millis),
        };
        let id = preferred
            .map(TodoId::new)
            .filter(|id| !in_use(*id))
            .unwrap_or_else(|| {
                let mut candidate = 0;
                while in_use(TodoId::new(candidate)) {
                    candidate += 1;
                }
                TodoId::new(candidate)
            });

        self.observe(id);
        id
    }

    fn observe(&mut self, id: TodoId) {
        if self.last_issued.is_none_or(|last| id > last) {
            self.last_issued = Some(id);
        }
    }
}

/// The to-do list, its urgent subset, and their persistence.
///
/// Every mutation writes the affected lists back to storage before
/// returning. Write failures are logged and otherwise ignored: the in-memory
/// lists stay authoritative and [`is_synced`](Self::is_synced) reports
/// `false` until a later write succeeds.
///
/// Callers address items by position; internally everything is keyed by
/// [`TodoId`].
pub struct TodoStore {
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    todos: Vec<TodoItem>,
    // Ids in the order they were flagged.
    urgent: Vec<TodoId>,
    pending_edit: Option<String>,
    ids: IdAllocator,
    todos_synced: bool,
    urgent_synced: bool,
}

impl TodoStore {
    /// An empty store. Call [`hydrate`](Self::hydrate) to load stored state.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            todos: Vec::new(),
            urgent: Vec::new(),
            pending_edit: None,
            ids: IdAllocator::default(),
            todos_synced: true,
            urgent_synced: true,
        }
    }

    /// Construct and hydrate.
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(storage);
        store.hydrate();
        store
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.todos.get(index)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn urgent_ids(&self) -> &[TodoId] {
        &self.urgent
    }

    /// Urgent items in the order they were flagged.
    pub fn urgent_items(&self) -> Vec<&TodoItem> {
        self.urgent
            .iter()
            .filter_map(|id| self.todos.iter().find(|item| item.id == *id))
            .collect()
    }

    pub fn pending_edit(&self) -> Option<&str> {
        self.pending_edit.as_deref()
    }

    pub fn take_pending_edit(&mut self) -> Option<String> {
        self.pending_edit.take()
    }

    /// Whether the last write of each list reached storage.
    pub fn is_synced(&self) -> bool {
        self.todos_synced && self.urgent_synced
    }

    pub fn add(&mut self, content: impl Into<String>) -> TodoItem {
        let id = self.ids.next(self.clock.now_millis(), &self.todos);
        let item = TodoItem::new(id, content);

        self.todos.push(item.clone());
        self.pending_edit = None;
        debug!(target: "jot::store", %id, len = self.todos.len(), "Added todo");

        self.persist_todos();
        item
    }

    /// Adds the staged edit back as a new item, if one is staged.
    pub fn resubmit_pending_edit(&mut self) -> Option<TodoItem> {
        let content = self.pending_edit.take()?;
        Some(self.add(content))
    }

    pub fn delete(&mut self, index: usize) -> Result<TodoItem, TodoStoreError> {
        let id = self.id_at(index)?;
        let removed = self
            .remove_by_id(id)
            .ok_or_else(|| self.out_of_bounds(index))?;
        debug!(target: "jot::store", %id, index, "Deleted todo");

        self.persist_todos();
        self.persist_urgent();
        Ok(removed)
    }

    /// Stages the item's content as the pending edit and removes the item.
    ///
    /// The item is gone until the caller adds the content back; an abandoned
    /// edit loses it.
    pub fn begin_edit(&mut self, index: usize) -> Result<String, TodoStoreError> {
        let content = self
            .todos
            .get(index)
            .map(|item| item.content.clone())
            .ok_or_else(|| self.out_of_bounds(index))?;

        self.pending_edit = Some(content.clone());
        self.delete(index)?;
        Ok(content)
    }

    /// Flips the urgent flag. Returns `true` if the item is now urgent.
    pub fn toggle_urgent(&mut self, index: usize) -> Result<bool, TodoStoreError> {
        let id = self.id_at(index)?;

        let now_urgent = match self.urgent.iter().position(|urgent| *urgent == id) {
            Some(position) => {
                self.urgent.remove(position);
                false
            }
            None => {
                self.urgent.push(id);
                true
            }
        };
        debug!(target: "jot::store", %id, index, now_urgent, "Toggled urgent");

        self.persist_urgent();
        Ok(now_urgent)
    }

    pub fn is_urgent(&self, index: usize) -> Result<bool, TodoStoreError> {
        let id = self.id_at(index)?;
        Ok(self.urgent.contains(&id))
    }

    /// Replaces in-memory state with what storage holds. Never fails:
    /// unreadable or malformed data leaves the store empty.
    pub fn hydrate(&mut self) -> HydrateOutcome {
        self.todos.clear();
        self.urgent.clear();

        let outcome = self.load();
        match outcome {
            HydrateOutcome::Restored { todos, urgent } => {
                info!(target: "jot::store", todos, urgent, "Hydrated from storage");
            }
            HydrateOutcome::Empty => {
                debug!(target: "jot::store", "Nothing stored; starting empty");
            }
            HydrateOutcome::Unavailable | HydrateOutcome::Discarded => {
                warn!(target: "jot::store", ?outcome, "Starting with an empty list");
            }
        }
        outcome
    }

    fn load(&mut self) -> HydrateOutcome {
        let raw = match self.storage.read(TODOS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HydrateOutcome::Empty,
            Err(e) => {
                warn!(target: "jot::store", key = TODOS_KEY, error = %e, "Failed to read stored todos");
                return HydrateOutcome::Unavailable;
            }
        };

        let todos = match layout::decode_todos(&raw) {
            Ok(todos) => todos,
            Err(e) => {
                warn!(target: "jot::store", key = TODOS_KEY, error = %e, "Discarding stored todos");
                return HydrateOutcome::Discarded;
            }
        };

        let known: HashSet<TodoId> = todos.iter().map(|item| item.id).collect();
        let mut urgent = Vec::new();
        for item in self.load_urgent() {
            if !known.contains(&item.id) {
                debug!(target: "jot::store", id = %item.id, "Dropping urgent entry with no matching todo");
                continue;
            }
            if !urgent.contains(&item.id) {
                urgent.push(item.id);
            }
        }

        for item in &todos {
            self.ids.observe(item.id);
        }
        self.todos = todos;
        self.urgent = urgent;

        HydrateOutcome::Restored {
            todos: self.todos.len(),
            urgent: self.urgent.len(),
        }
    }

    fn load_urgent(&self) -> Vec<TodoItem> {
        match self.storage.read(URGENT_TODOS_KEY) {
            Ok(Some(raw)) => layout::decode_urgent(&raw).unwrap_or_else(|e| {
                warn!(target: "jot::store", key = URGENT_TODOS_KEY, error = %e, "Discarding stored urgent todos");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(target: "jot::store", key = URGENT_TODOS_KEY, error = %e, "Failed to read stored urgent todos");
                Vec::new()
            }
        }
    }

    fn id_at(&self, index: usize) -> Result<TodoId, TodoStoreError> {
        self.todos
            .get(index)
            .map(|item| item.id)
            .ok_or_else(|| self.out_of_bounds(index))
    }

    fn out_of_bounds(&self, index: usize) -> TodoStoreError {
        TodoStoreError::IndexOutOfBounds {
            index,
            len: self.todos.len(),
        }
    }

    fn remove_by_id(&mut self, id: TodoId) -> Option<TodoItem> {
        let position = self.todos.iter().position(|item| item.id == id)?;
        let removed = self.todos.remove(position);
        self.urgent.retain(|urgent| *urgent != id);
        Some(removed)
    }

    fn persist_todos(&mut self) {
        self.todos_synced = match layout::encode_todos(&self.todos) {
            Ok(raw) => self.write(TODOS_KEY, &raw),
            Err(e) => {
                warn!(target: "jot::store", key = TODOS_KEY, error = %e, "Failed to encode todos");
                false
            }
        };
    }

    fn persist_urgent(&mut self) {
        let urgent: Vec<TodoItem> = self.urgent_items().into_iter().cloned().collect();
        self.urgent_synced = match layout::encode_urgent(&urgent) {
            Ok(raw) => self.write(URGENT_TODOS_KEY, &raw),
            Err(e) => {
                warn!(target: "jot::store", key = URGENT_TODOS_KEY, error = %e, "Failed to encode urgent todos");
                false
            }
        };
    }

    fn write(&self, key: &str, raw: &str) -> bool {
        match self.storage.write(key, raw) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "jot::store", key, error = %e, "Failed to persist; in-memory state kept");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::test_utils::{FlakyStorage, ManualClock};
    use proptest::prelude::*;

    const T0: i64 = 1_700_000_000_000;

    fn store_at(storage: Arc<dyn KeyValueStore>, clock: &Arc<ManualClock>) -> TodoStore {
        let clock: Arc<dyn Clock> = clock.clone();
        TodoStore::with_clock(storage, clock)
    }

    fn fresh() -> (TodoStore, Arc<MemoryStorage>, Arc<ManualClock>) {
        let storage = Arc::new(MemoryStorage::new());
        let clock = Arc::new(ManualClock::new(T0));
        let store = store_at(storage.clone(), &clock);
        (store, storage, clock)
    }

    fn contents(store: &TodoStore) -> Vec<&str> {
        store.items().iter().map(|i| i.content.as_str()).collect()
    }

    #[test]
    fn test_add_appends_with_clock_id() {
        let (mut store, _, clock) = fresh();

        let first = store.add("buy milk");
        clock.advance(5);
        let second = store.add("walk dog");

        assert_eq!(first.id, TodoId::new(T0));
        assert_eq!(second.id, TodoId::new(T0 + 5));
        assert_eq!(contents(&store), vec!["buy milk", "walk dog"]);
    }

    #[test]
    fn test_add_accepts_empty_content() {
        let (mut store, _, _) = fresh();
        let item = store.add("");
        assert_eq!(item.content, "");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_same_millisecond_adds_get_distinct_ids() {
        let (mut store, _, _) = fresh();

        let a = store.add("a");
        let b = store.add("b");
        let c = store.add("c");

        assert_eq!(a.id, TodoId::new(T0));
        assert_eq!(b.id, TodoId::new(T0 + 1));
        assert_eq!(c.id, TodoId::new(T0 + 2));
    }

    #[test]
    fn test_ids_keep_increasing_when_clock_steps_back() {
        let (mut store, _, clock) = fresh();

        let a = store.add("a");
        clock.set(T0 - 60_000);
        let b = store.add("b");

        assert!(b.id > a.id);
    }

    #[test]
    fn test_add_persists_todos() {
        let (mut store, storage, _) = fresh();

        store.add("buy milk");

        assert_eq!(
            storage.read(TODOS_KEY).unwrap().as_deref(),
            Some(format!(r#"{{"todos":[{{"id":{T0},"content":"buy milk"}}]}}"#).as_str())
        );
    }

    #[test]
    fn test_delete_removes_exact_item_and_urgent_flag() {
        let (mut store, storage, clock) = fresh();
        store.add("a");
        clock.advance(1);
        let b = store.add("b");
        clock.advance(1);
        store.add("c");
        store.toggle_urgent(1).unwrap();

        let removed = store.delete(1).unwrap();

        assert_eq!(removed, b);
        assert_eq!(contents(&store), vec!["a", "c"]);
        assert!(store.urgent_ids().is_empty());
        assert_eq!(
            storage.read(URGENT_TODOS_KEY).unwrap().as_deref(),
            Some(r#"{"urgentTodos":[]}"#)
        );
    }

    #[test]
    fn test_delete_keeps_other_urgent_flags() {
        let (mut store, _, clock) = fresh();
        let a = store.add("a");
        clock.advance(1);
        store.add("b");
        store.toggle_urgent(0).unwrap();
        store.toggle_urgent(1).unwrap();

        store.delete(1).unwrap();

        assert_eq!(store.urgent_ids(), &[a.id]);
    }

    #[test]
    fn test_out_of_bounds_index_is_an_error() {
        let (mut store, _, _) = fresh();
        store.add("only");

        let expected = TodoStoreError::IndexOutOfBounds { index: 1, len: 1 };
        assert_eq!(store.delete(1), Err(expected.clone()));
        assert_eq!(store.begin_edit(1), Err(expected.clone()));
        assert_eq!(store.toggle_urgent(1), Err(expected.clone()));
        assert_eq!(store.is_urgent(1), Err(expected));
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_edit(), None);
    }

    #[test]
    fn test_toggle_urgent_is_its_own_inverse() {
        let (mut store, _, _) = fresh();
        store.add("a");

        assert!(store.toggle_urgent(0).unwrap());
        assert!(store.is_urgent(0).unwrap());
        assert!(!store.toggle_urgent(0).unwrap());
        assert!(!store.is_urgent(0).unwrap());
        assert!(store.urgent_ids().is_empty());
    }

    #[test]
    fn test_urgent_items_follow_flag_order() {
        let (mut store, _, clock) = fresh();
        store.add("a");
        clock.advance(1);
        store.add("b");

        store.toggle_urgent(1).unwrap();
        store.toggle_urgent(0).unwrap();

        let urgent: Vec<&str> = store
            .urgent_items()
            .iter()
            .map(|i| i.content.as_str())
            .collect();
        assert_eq!(urgent, vec!["b", "a"]);
    }

    #[test]
    fn test_begin_edit_stages_content_and_removes_item() {
        let (mut store, _, clock) = fresh();
        store.add("a");
        clock.advance(1);
        store.add("fix bike");

        let staged = store.begin_edit(1).unwrap();

        assert_eq!(staged, "fix bike");
        assert_eq!(store.pending_edit(), Some("fix bike"));
        assert_eq!(contents(&store), vec!["a"]);
    }

    #[test]
    fn test_abandoned_edit_loses_the_item() {
        // Editing is delete-then-re-add; nothing restores the item if the
        // edit is never resubmitted.
        let (mut store, storage, _) = fresh();
        store.add("draft");
        store.begin_edit(0).unwrap();

        let reopened = TodoStore::open(storage);
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_resubmit_adds_new_item_without_urgency() {
        let (mut store, _, clock) = fresh();
        let original = store.add("draft");
        store.toggle_urgent(0).unwrap();
        store.begin_edit(0).unwrap();
        clock.advance(10);

        let restored = store.resubmit_pending_edit().unwrap();

        assert_eq!(restored.content, "draft");
        assert_ne!(restored.id, original.id);
        assert!(!store.is_urgent(0).unwrap());
        assert_eq!(store.pending_edit(), None);
        assert_eq!(store.resubmit_pending_edit(), None);
    }

    #[test]
    fn test_add_clears_pending_edit() {
        let (mut store, _, _) = fresh();
        store.add("old");
        store.begin_edit(0).unwrap();

        store.add("new");

        assert_eq!(store.pending_edit(), None);
        assert_eq!(contents(&store), vec!["new"]);
    }

    #[test]
    fn test_add_toggle_delete_scenario() {
        let (mut store, storage, clock) = fresh();

        let t1 = store.add("buy milk");
        assert_eq!(store.items(), &[TodoItem::new(t1.id, "buy milk")]);

        clock.advance(1);
        let t2 = store.add("walk dog");
        assert_eq!(store.len(), 2);

        store.toggle_urgent(0).unwrap();
        assert_eq!(store.urgent_ids(), &[t1.id]);

        store.delete(0).unwrap();
        assert_eq!(store.items(), &[TodoItem::new(t2.id, "walk dog")]);
        assert!(store.urgent_ids().is_empty());

        let reopened = TodoStore::open(storage);
        assert_eq!(reopened.items(), store.items());
        assert!(reopened.urgent_ids().is_empty());
    }

    #[test]
    fn test_hydrate_restores_lists_in_order() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (
                TODOS_KEY,
                r#"{"todos":[{"id":3,"content":"c"},{"id":1,"content":"a"},{"id":2,"content":"b"}]}"#,
            ),
            (
                URGENT_TODOS_KEY,
                r#"{"urgentTodos":[{"id":2,"content":"b"},{"id":3,"content":"c"}]}"#,
            ),
        ]));
        let mut store = TodoStore::new(storage);

        let outcome = store.hydrate();

        assert_eq!(outcome, HydrateOutcome::Restored { todos: 3, urgent: 2 });
        assert_eq!(contents(&store), vec!["c", "a", "b"]);
        assert_eq!(store.urgent_ids(), &[TodoId::new(2), TodoId::new(3)]);
        assert!(store.is_urgent(0).unwrap());
        assert!(!store.is_urgent(1).unwrap());
    }

    #[test]
    fn test_hydrate_rejects_nested_envelope() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            TODOS_KEY,
            r#"{"todos":{"todos":[{"id":5,"content":"x"}]}}"#,
        )]));
        let mut store = TodoStore::new(storage);

        assert_eq!(store.hydrate(), HydrateOutcome::Discarded);
        assert!(store.is_empty());
    }

    #[test]
    fn test_hydrate_rejects_duplicate_ids_entirely() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            TODOS_KEY,
            r#"{"todos":[{"id":5,"content":"a"},{"id":6,"content":"b"},{"id":5,"content":"c"}]}"#,
        )]));
        let mut store = TodoStore::new(storage);

        assert_eq!(store.hydrate(), HydrateOutcome::Discarded);
        assert!(store.is_empty());
    }

    #[test]
    fn test_hydrate_keeps_todos_when_only_urgent_is_malformed() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (TODOS_KEY, r#"{"todos":[{"id":1,"content":"a"}]}"#),
            (URGENT_TODOS_KEY, "{broken"),
        ]));
        let mut store = TodoStore::new(storage);

        assert_eq!(
            store.hydrate(),
            HydrateOutcome::Restored { todos: 1, urgent: 0 }
        );
        assert_eq!(contents(&store), vec!["a"]);
    }

    #[test]
    fn test_hydrate_drops_dangling_and_repeated_urgent_ids() {
        let storage = Arc::new(MemoryStorage::with_entries([
            (TODOS_KEY, r#"{"todos":[{"id":1,"content":"a"}]}"#),
            (
                URGENT_TODOS_KEY,
                r#"{"urgentTodos":[{"id":9,"content":"gone"},{"id":1,"content":"a"},{"id":1,"content":"a"}]}"#,
            ),
        ]));
        let mut store = TodoStore::new(storage);

        store.hydrate();

        assert_eq!(store.urgent_ids(), &[TodoId::new(1)]);
    }

    #[test]
    fn test_hydrate_with_nothing_stored_is_empty() {
        let (mut store, _, _) = fresh();
        assert_eq!(store.hydrate(), HydrateOutcome::Empty);
        assert!(store.is_empty());
    }

    #[test]
    fn test_hydrate_fails_open_when_storage_unavailable() {
        let storage = Arc::new(FlakyStorage::with_entries([(
            TODOS_KEY,
            r#"{"todos":[{"id":1,"content":"a"}]}"#,
        )]));
        storage.set_fail_reads(true);
        let mut store = TodoStore::new(storage);

        assert_eq!(store.hydrate(), HydrateOutcome::Unavailable);
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_ids_stay_above_hydrated_ids() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            TODOS_KEY,
            format!(r#"{{"todos":[{{"id":{},"content":"future"}}]}}"#, T0 + 1_000),
        )]));
        let clock = Arc::new(ManualClock::new(T0));
        let mut store = store_at(storage, &clock);
        store.hydrate();

        let item = store.add("now");

        assert_eq!(item.id, TodoId::new(T0 + 1_001));
    }

    #[test]
    fn test_ids_stay_unique_past_the_largest_id() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            TODOS_KEY,
            format!(r#"{{"todos":[{{"id":{},"content":"last"}}]}}"#, i64::MAX),
        )]));
        let clock = Arc::new(ManualClock::new(T0));
        let mut store = store_at(storage.clone(), &clock);
        store.hydrate();

        let first = store.add("next");
        let second = store.add("after");

        assert_eq!(first.id, TodoId::new(0));
        assert_eq!(second.id, TodoId::new(1));

        let mut reopened = TodoStore::new(storage);
        assert_eq!(
            reopened.hydrate(),
            HydrateOutcome::Restored { todos: 3, urgent: 0 }
        );
        assert_eq!(contents(&reopened), vec!["last", "next", "after"]);
    }

    #[test]
    fn test_failed_writes_keep_memory_authoritative() {
        let storage = Arc::new(FlakyStorage::new());
        let clock = Arc::new(ManualClock::new(T0));
        let mut store = store_at(storage.clone(), &clock);

        storage.set_fail_writes(true);
        store.add("unsaved");
        store.toggle_urgent(0).unwrap();

        assert_eq!(contents(&store), vec!["unsaved"]);
        assert!(store.is_urgent(0).unwrap());
        assert!(!store.is_synced());
        assert_eq!(storage.read(TODOS_KEY).unwrap(), None);

        storage.set_fail_writes(false);
        clock.advance(1);
        store.add("saved");
        assert!(!store.is_synced(), "urgent list has not been rewritten yet");

        store.toggle_urgent(1).unwrap();
        assert!(store.is_synced());

        let reopened = TodoStore::open(storage);
        assert_eq!(contents(&reopened), vec!["unsaved", "saved"]);
        assert_eq!(reopened.urgent_ids().len(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Delete(usize),
        Edit(usize),
        Toggle(usize),
        Tick(i64),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => "[a-z ]{0,12}".prop_map(Op::Add),
            1 => (0usize..8).prop_map(Op::Delete),
            1 => (0usize..8).prop_map(Op::Edit),
            2 => (0usize..8).prop_map(Op::Toggle),
            1 => (-5i64..5).prop_map(Op::Tick),
        ]
    }

    fn apply(store: &mut TodoStore, clock: &ManualClock, op: &Op) {
        match op {
            Op::Add(content) => {
                store.add(content.clone());
            }
            Op::Delete(index) => {
                let _ = store.delete(*index);
            }
            Op::Edit(index) => {
                let _ = store.begin_edit(*index);
            }
            Op::Toggle(index) => {
                let _ = store.toggle_urgent(*index);
            }
            Op::Tick(millis) => clock.advance(*millis),
        }
    }

    proptest! {
        #[test]
        fn prop_adds_under_frozen_clock_yield_unique_ids(
            contents in prop::collection::vec("[a-z]{0,8}", 0..40)
        ) {
            let (mut store, _, _) = fresh();
            for content in &contents {
                store.add(content.clone());
            }

            prop_assert_eq!(store.len(), contents.len());
            let ids: HashSet<TodoId> = store.items().iter().map(|i| i.id).collect();
            prop_assert_eq!(ids.len(), contents.len());
        }

        #[test]
        fn prop_delete_removes_exactly_one(
            count in 1usize..10,
            pick in any::<prop::sample::Index>(),
        ) {
            let (mut store, _, _) = fresh();
            for n in 0..count {
                store.add(format!("item {n}"));
            }
            let index = pick.index(count);
            let target = store.items()[index].clone();
            store.toggle_urgent(index).unwrap();

            let removed = store.delete(index).unwrap();

            prop_assert_eq!(&removed, &target);
            prop_assert_eq!(store.len(), count - 1);
            prop_assert!(!store.items().contains(&target));
            prop_assert!(!store.urgent_ids().contains(&target.id));
        }

        #[test]
        fn prop_urgent_ids_always_reference_live_items(
            ops in prop::collection::vec(arb_op(), 0..60)
        ) {
            let (mut store, _, clock) = fresh();
            for op in &ops {
                apply(&mut store, &clock, op);
                let live: HashSet<TodoId> = store.items().iter().map(|i| i.id).collect();
                prop_assert!(store.urgent_ids().iter().all(|id| live.contains(id)));
            }
        }

        #[test]
        fn prop_hydrate_reproduces_persisted_state(
            ops in prop::collection::vec(arb_op(), 0..60)
        ) {
            let (mut store, storage, clock) = fresh();
            for op in &ops {
                apply(&mut store, &clock, op);
            }

            let mut reopened = TodoStore::new(storage);
            reopened.hydrate();

            prop_assert_eq!(reopened.items(), store.items());
            prop_assert_eq!(reopened.urgent_ids(), store.urgent_ids());
        }
    }
}
