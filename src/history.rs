//! Linear undo/redo history over whole-scene snapshots.
//!
//! The history owns the canonical live [`Scene`]. Gestures mutate the live
//! scene freely between commits; a commit stores a deep clone, so every
//! snapshot restores exactly. Snapshots beyond the cursor are discarded the
//! moment a new edit commits from a non-tip position — standard linear
//! truncation, no branching.
//!
//! The cursor is `None` before any snapshot exists (and after undoing past
//! the first one), which represents the empty-scene sentinel.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::doc::Scene;

/// Snapshot stack plus the live scene it governs.
#[derive(Debug, Default)]
pub struct History {
    snapshots: Vec<Scene>,
    cursor: Option<usize>,
    live: Scene,
}

impl History {
    /// An empty history: no snapshots, empty live scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.live
    }

    /// Mutable access to the live scene for transient gesture updates.
    /// Nothing is recorded until [`History::commit`].
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.live
    }

    /// Commit `scene` as the new live scene and snapshot it: discards any
    /// redoable snapshots beyond the cursor, appends, and advances the
    /// cursor to the new tip.
    pub fn commit(&mut self, scene: Scene) {
        let keep = self.cursor.map_or(0, |i| i + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(scene.clone());
        self.cursor = Some(self.snapshots.len() - 1);
        self.live = scene;
        log::debug!(
            "history commit: {} shapes, {} snapshots",
            self.live.len(),
            self.snapshots.len()
        );
    }

    /// Step back one snapshot. Undoing the first snapshot restores the
    /// empty scene; at the sentinel this is a no-op. Returns whether the
    /// live scene changed.
    pub fn undo(&mut self) -> bool {
        match self.cursor {
            None => false,
            Some(0) => {
                self.cursor = None;
                self.live = Scene::new();
                true
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                self.live = self.snapshots[i - 1].clone();
                true
            }
        }
    }

    /// Step forward one snapshot. No-op at the tip. Returns whether the
    /// live scene changed.
    pub fn redo(&mut self) -> bool {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.snapshots.len() {
            return false;
        }
        self.cursor = Some(next);
        self.live = self.snapshots[next].clone();
        true
    }

    /// Whether an undo would change the scene.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether a redo would change the scene.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |i| i + 1) < self.snapshots.len()
    }

    /// Snapshot cursor position; `None` is the empty-scene sentinel.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Replace all history with a single base snapshot of `scene` (host
    /// snapshot hydration). Undo from here yields the empty scene.
    pub fn reset(&mut self, scene: Scene) {
        self.snapshots.clear();
        self.snapshots.push(scene.clone());
        self.cursor = Some(0);
        self.live = scene;
    }
}
