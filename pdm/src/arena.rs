//! Index-stable task storage.
//!
//! Maps task names to integer slots. Predecessor and successor links are kept
//! as sorted `TaskId` lists on both ends, so a link is always stored twice and
//! removal only has to sweep id lists.
//!
//! Slots are never reused: ids increase with insertion, which makes id order
//! the insertion order. Once dead slots outnumber live tasks, removal compacts
//! the arena, renumbering the survivors in the same order. Ids are therefore
//! only stable between removals.

use rustc_hash::FxHashMap;

use crate::critical_path::TaskTiming;
use crate::models::TaskId;

/// A task as stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    pub name: String,
    pub duration: u64,
    /// Sorted ids of the tasks this one depends on.
    pub predecessors: Vec<TaskId>,
    /// Sorted ids of the tasks depending on this one.
    pub successors: Vec<TaskId>,
    /// Values written by the passes; only meaningful while the stage that
    /// wrote them is current.
    pub timing: TaskTiming,
}

impl TaskNode {
    fn new(name: String, duration: u64) -> Self {
        Self {
            name,
            duration,
            predecessors: Vec::new(),
            successors: Vec::new(),
            timing: TaskTiming::default(),
        }
    }
}

/// Arena of task nodes addressed by `TaskId`.
#[derive(Debug, Clone)]
pub struct TaskArena {
    to_id: FxHashMap<String, TaskId>,
    slots: Vec<Option<TaskNode>>,
    live: usize,
}

impl TaskArena {
    /// Create a new arena with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Insert a task, returning its new id.
    ///
    /// If the name is already present the existing id is returned and nothing
    /// changes; uniqueness errors are reported by the schedule.
    pub fn insert(&mut self, name: &str, duration: u64) -> TaskId {
        if let Some(&id) = self.to_id.get(name) {
            return id;
        }
        let id = self.slots.len() as TaskId;
        self.slots.push(Some(TaskNode::new(name.to_string(), duration)));
        self.to_id.insert(name.to_string(), id);
        self.live += 1;
        id
    }

    /// Remove a task and every link pointing at it.
    ///
    /// May compact the arena, invalidating every id handed out before.
    pub fn remove(&mut self, id: TaskId) -> Option<TaskNode> {
        let node = self.slots.get_mut(id as usize)?.take()?;
        self.to_id.remove(&node.name);
        self.live -= 1;

        for &pred in &node.predecessors {
            if let Some(pred_node) = self.get_mut(pred) {
                remove_sorted(&mut pred_node.successors, id);
            }
        }
        for &succ in &node.successors {
            if let Some(succ_node) = self.get_mut(succ) {
                remove_sorted(&mut succ_node.predecessors, id);
            }
        }

        if self.slots.len() - self.live > self.live {
            self.compact();
        }
        Some(node)
    }

    /// Drop empty slots and renumber live tasks densely, keeping their order.
    ///
    /// The renumbering is monotonic, so sorted link lists stay sorted.
    fn compact(&mut self) {
        let mut remap: Vec<Option<TaskId>> = vec![None; self.slots.len()];
        let mut next: TaskId = 0;
        for (idx, slot) in self.slots.iter().enumerate() {
            if slot.is_some() {
                remap[idx] = Some(next);
                next += 1;
            }
        }

        let slots = std::mem::take(&mut self.slots);
        self.slots = slots
            .into_iter()
            .flatten()
            .map(|mut node| {
                node.predecessors = node
                    .predecessors
                    .iter()
                    .filter_map(|&id| remap[id as usize])
                    .collect();
                node.successors = node
                    .successors
                    .iter()
                    .filter_map(|&id| remap[id as usize])
                    .collect();
                Some(node)
            })
            .collect();

        for id in self.to_id.values_mut() {
            if let Some(new_id) = remap[*id as usize] {
                *id = new_id;
            }
        }
    }

    /// Record that `succ` depends on `pred`. Returns false if the link existed.
    pub fn link(&mut self, pred: TaskId, succ: TaskId) -> bool {
        if self.get(pred).is_none() || self.get(succ).is_none() {
            return false;
        }
        let added = match self.get_mut(succ) {
            Some(node) => insert_sorted(&mut node.predecessors, pred),
            None => false,
        };
        if added {
            if let Some(node) = self.get_mut(pred) {
                insert_sorted(&mut node.successors, succ);
            }
        }
        added
    }

    /// Drop the link `pred -> succ`. Returns false if there was none.
    pub fn unlink(&mut self, pred: TaskId, succ: TaskId) -> bool {
        let removed = match self.get_mut(succ) {
            Some(node) => remove_sorted(&mut node.predecessors, pred),
            None => false,
        };
        if removed {
            if let Some(node) = self.get_mut(pred) {
                remove_sorted(&mut node.successors, succ);
            }
        }
        removed
    }

    /// Get the id for a name, if present.
    #[inline]
    pub fn get_id(&self, name: &str) -> Option<TaskId> {
        self.to_id.get(name).copied()
    }

    #[inline]
    pub fn get(&self, id: TaskId) -> Option<&TaskNode> {
        self.slots.get(id as usize).and_then(|slot| slot.as_ref())
    }

    #[inline]
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskNode> {
        self.slots.get_mut(id as usize).and_then(|slot| slot.as_mut())
    }

    /// Get the name for an id.
    #[inline]
    pub fn name(&self, id: TaskId) -> Option<&str> {
        self.get(id).map(|node| node.name.as_str())
    }

    /// Resolve a list of ids to names, skipping ids no longer present.
    pub fn names(&self, ids: &[TaskId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.name(id))
            .map(str::to_string)
            .collect()
    }

    /// Live task ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(idx, _)| idx as TaskId)
    }

    /// Live task nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &TaskNode)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|node| (idx as TaskId, node)))
    }

    /// Number of slots, live or dead; upper bound for id-indexed vectors.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl Default for TaskArena {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

fn insert_sorted(ids: &mut Vec<TaskId>, id: TaskId) -> bool {
    match ids.binary_search(&id) {
        Ok(_) => false,
        Err(pos) => {
            ids.insert(pos, id);
            true
        }
    }
}

fn remove_sorted(ids: &mut Vec<TaskId>, id: TaskId) -> bool {
    match ids.binary_search(&id) {
        Ok(pos) => {
            ids.remove(pos);
            true
        }
        Err(_) => false,
    }
}
