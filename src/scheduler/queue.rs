//! Ordered action queue. Index 0 is the current action; its progress timer lives here.

use crate::core::amount::Amount;
use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub action_id: String,
    pub amount: Amount,
}

impl QueueItem {
    pub fn new(action_id: impl Into<String>, amount: Amount) -> Self {
        Self {
            action_id: action_id.into(),
            amount,
        }
    }
}

/// Any mutation that changes which entry is current resets the progress timer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    entries: Vec<QueueItem>,
    progress_ms: f64,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.entries.first()
    }

    pub fn pending(&self) -> &[QueueItem] {
        self.entries.get(1..).unwrap_or(&[])
    }

    pub fn entries(&self) -> &[QueueItem] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn progress_ms(&self) -> f64 {
        self.progress_ms
    }

    pub(crate) fn add_progress(&mut self, elapsed_ms: f64) {
        self.progress_ms += elapsed_ms;
    }

    fn reset_progress(&mut self) {
        self.progress_ms = 0.0;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(EngineError::QueueIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    /// Appends an entry. On an empty queue it becomes current immediately.
    pub fn enqueue(&mut self, item: QueueItem) {
        if self.entries.is_empty() {
            self.reset_progress();
        }
        self.entries.push(item);
    }

    /// Puts an entry in front of the current one, interrupting it.
    pub fn start_immediately(&mut self, item: QueueItem) {
        self.entries.insert(0, item);
        self.reset_progress();
    }

    /// Removes an entry. Removing the current one discards its partial progress.
    pub fn remove_at(&mut self, index: usize) -> Result<QueueItem> {
        self.check_index(index)?;
        let item = self.entries.remove(index);
        if index == 0 {
            self.reset_progress();
        }
        Ok(item)
    }

    pub fn move_up(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(());
        }
        self.entries.swap(index, index - 1);
        if index == 1 {
            self.reset_progress();
        }
        Ok(())
    }

    pub fn move_down(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index + 1 == self.entries.len() {
            return Ok(());
        }
        self.entries.swap(index, index + 1);
        if index == 0 {
            self.reset_progress();
        }
        Ok(())
    }

    pub fn move_to_top(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(());
        }
        let item = self.entries.remove(index);
        self.entries.insert(0, item);
        self.reset_progress();
        Ok(())
    }

    pub fn move_to_bottom(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if index + 1 == self.entries.len() {
            return Ok(());
        }
        let item = self.entries.remove(index);
        self.entries.push(item);
        if index == 0 {
            self.reset_progress();
        }
        Ok(())
    }

    /// Drops the current entry (invalid or exhausted) and promotes the next.
    pub(crate) fn pop_current(&mut self) -> Option<QueueItem> {
        if self.entries.is_empty() {
            return None;
        }
        self.reset_progress();
        Some(self.entries.remove(0))
    }

    /// Records `count` completions of the current entry. Returns true if it left the queue.
    pub(crate) fn complete_current(&mut self, count: u64) -> bool {
        self.reset_progress();
        let Some(current) = self.entries.first_mut() else {
            return false;
        };
        current.amount = current.amount.decrement(count);
        if current.amount.is_exhausted() {
            self.entries.remove(0);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(ids: &[&str]) -> ActionQueue {
        let mut queue = ActionQueue::new();
        for id in ids {
            queue.enqueue(QueueItem::new(*id, Amount::Finite(5)));
        }
        queue
    }

    fn ids(queue: &ActionQueue) -> Vec<&str> {
        queue.entries().iter().map(|e| e.action_id.as_str()).collect()
    }

    #[test]
    fn test_first_enqueue_becomes_current() {
        let queue = queue_of(&["a", "b"]);
        assert_eq!(queue.current().unwrap().action_id, "a");
        assert_eq!(queue.pending().len(), 1);
    }

    #[test]
    fn test_enqueue_keeps_current_progress() {
        let mut queue = queue_of(&["a"]);
        queue.add_progress(300.0);
        queue.enqueue(QueueItem::new("b", Amount::Unbounded));
        assert_eq!(queue.progress_ms(), 300.0);
    }

    #[test]
    fn test_remove_current_discards_progress() {
        let mut queue = queue_of(&["a", "b"]);
        queue.add_progress(300.0);
        queue.remove_at(0).unwrap();
        assert_eq!(ids(&queue), vec!["b"]);
        assert_eq!(queue.progress_ms(), 0.0);
    }

    #[test]
    fn test_remove_pending_keeps_progress() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.add_progress(300.0);
        queue.remove_at(2).unwrap();
        assert_eq!(queue.progress_ms(), 300.0);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut queue = queue_of(&["a"]);
        assert!(matches!(
            queue.remove_at(3),
            Err(EngineError::QueueIndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(queue.move_up(1).is_err());
    }

    #[test]
    fn test_move_up_into_current_resets() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.add_progress(300.0);
        queue.move_up(2).unwrap();
        assert_eq!(ids(&queue), vec!["a", "c", "b"]);
        assert_eq!(queue.progress_ms(), 300.0);
        queue.move_up(1).unwrap();
        assert_eq!(ids(&queue), vec!["c", "a", "b"]);
        assert_eq!(queue.progress_ms(), 0.0);
    }

    #[test]
    fn test_move_down_out_of_current_resets() {
        let mut queue = queue_of(&["a", "b"]);
        queue.add_progress(300.0);
        queue.move_down(0).unwrap();
        assert_eq!(ids(&queue), vec!["b", "a"]);
        assert_eq!(queue.progress_ms(), 0.0);
    }

    #[test]
    fn test_boundary_moves_are_noops() {
        let mut queue = queue_of(&["a", "b"]);
        queue.add_progress(300.0);
        queue.move_up(0).unwrap();
        queue.move_down(1).unwrap();
        queue.move_to_top(0).unwrap();
        queue.move_to_bottom(1).unwrap();
        assert_eq!(ids(&queue), vec!["a", "b"]);
        assert_eq!(queue.progress_ms(), 300.0);
    }

    #[test]
    fn test_move_to_top_and_bottom() {
        let mut queue = queue_of(&["a", "b", "c"]);
        queue.move_to_top(2).unwrap();
        assert_eq!(ids(&queue), vec!["c", "a", "b"]);
        queue.add_progress(100.0);
        queue.move_to_bottom(0).unwrap();
        assert_eq!(ids(&queue), vec!["a", "b", "c"]);
        assert_eq!(queue.progress_ms(), 0.0);
    }

    #[test]
    fn test_start_immediately_interrupts() {
        let mut queue = queue_of(&["a"]);
        queue.add_progress(300.0);
        queue.start_immediately(QueueItem::new("urgent", Amount::Finite(1)));
        assert_eq!(ids(&queue), vec!["urgent", "a"]);
        assert_eq!(queue.progress_ms(), 0.0);
    }

    #[test]
    fn test_complete_current() {
        let mut queue = queue_of(&["a", "b"]);
        assert!(!queue.complete_current(3));
        assert_eq!(queue.current().unwrap().amount, Amount::Finite(2));
        assert!(queue.complete_current(2));
        assert_eq!(ids(&queue), vec!["b"]);
    }

    #[test]
    fn test_unbounded_entry_never_completes() {
        let mut queue = ActionQueue::new();
        queue.enqueue(QueueItem::new("a", Amount::Unbounded));
        assert!(!queue.complete_current(1_000_000));
        assert_eq!(queue.len(), 1);
    }
}
