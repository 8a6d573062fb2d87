/// In-memory task store
///
/// A keyed collection from integer id to task with a monotonically
/// increasing next-id counter starting at 1. Ids are never reused, even
/// after deletion. All operations are synchronous and single-threaded;
/// nothing is persisted.
///
/// # Example
///
/// ```
/// use taskdeck_cli::store::TaskStore;
///
/// let mut store = TaskStore::new();
/// let first = store.add("Buy milk", "").unwrap().id;
/// let second = store.add("Call dentist", "").unwrap().id;
/// assert_eq!((first, second), (1, 2));
///
/// store.delete(1).unwrap();
/// // Deleted ids are not recycled
/// assert_eq!(store.add("Third", "").unwrap().id, 3);
/// ```

use std::collections::BTreeMap;

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Unique id, assigned sequentially, immutable
    pub id: u64,

    /// Title, non-empty
    pub title: String,

    /// Optional details; empty string when absent
    pub description: String,

    /// Completion flag
    pub completed: bool,
}

impl TodoItem {
    /// Renders the checkbox line used by list output
    pub fn summary(&self) -> String {
        let status = if self.completed { "✓" } else { " " };
        format!("[{}] {}. {}", status, self.id, self.title)
    }
}

/// Error type for store operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Title was empty or whitespace-only
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// No task with the given id exists
    #[error("Task {0} not found")]
    NotFound(u64),
}

/// In-memory collection of todo items keyed by id
///
/// The map is ordered by id, which doubles as insertion order because ids
/// only ever grow.
#[derive(Debug)]
pub struct TaskStore {
    tasks: BTreeMap<u64, TodoItem>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store; the first task gets id 1
    pub fn new() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Adds a new task and returns it
    ///
    /// The title is trimmed and must be non-empty; the description is
    /// stored as given (trimmed, possibly empty).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyTitle`] for a blank title.
    pub fn add(&mut self, title: &str, description: &str) -> Result<&TodoItem, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let id = self.next_id;
        self.next_id += 1;

        let item = TodoItem {
            id,
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
        };

        self.tasks.insert(id, item);
        Ok(&self.tasks[&id])
    }

    /// Returns all tasks in id order
    pub fn list(&self) -> Vec<&TodoItem> {
        self.tasks.values().collect()
    }

    /// Returns the task with the given id, if any
    pub fn get(&self, id: u64) -> Option<&TodoItem> {
        self.tasks.get(&id)
    }

    /// Number of tasks currently stored
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when no tasks are stored
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Partially updates a task
    ///
    /// Only provided fields change. A provided title is re-validated; a
    /// provided description may be empty (clears the old one).
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when the id does not exist
    /// - [`StoreError::EmptyTitle`] when the new title is blank
    pub fn update(
        &mut self,
        id: u64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<&TodoItem, StoreError> {
        // Validate before mutating so a bad title leaves the task untouched
        let new_title = match title {
            Some(t) => {
                let t = t.trim();
                if t.is_empty() {
                    return Err(StoreError::EmptyTitle);
                }
                Some(t.to_string())
            }
            None => None,
        };

        let item = self.tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(t) = new_title {
            item.title = t;
        }
        if let Some(d) = description {
            item.description = d.trim().to_string();
        }

        Ok(item)
    }

    /// Removes a task and returns it
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id does not exist.
    pub fn delete(&mut self, id: u64) -> Result<TodoItem, StoreError> {
        self.tasks.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// Flips a task's completion flag and returns the updated task
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id does not exist.
    pub fn toggle_complete(&mut self, id: u64) -> Result<&TodoItem, StoreError> {
        let item = self.tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.completed = !item.completed;
        Ok(item)
    }
}
