use std::collections::{HashMap, VecDeque};

use petstore_core::{Pet, PetId};

/// Request counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// `POST /pet` requests received
    pub creates: usize,
    /// `GET /pet/{id}` requests received
    pub fetches: usize,
    /// `PUT /pet` requests received
    pub replaces: usize,
    /// `DELETE /pet/{id}` requests received
    pub deletes: usize,
}

/// A write that readers cannot see yet. `pet: None` is a deletion.
#[derive(Debug, Clone)]
struct PendingWrite {
    id: PetId,
    pet: Option<Pet>,
    reads_remaining: u32,
}

/// Outcome of a write against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    /// Write staged or applied
    Accepted,
    /// The pet does not exist (replace/delete only)
    Missing,
    /// Rejected on request with this status
    Rejected(u16),
}

/// In-memory store with delayed visibility.
///
/// Writes are validated against the latest state, pending writes included,
/// while reads only see writes whose lag has elapsed. With a lag of `n`,
/// the first `n` fetches after a write still return the old state.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    visible: HashMap<PetId, Pet>,
    pending: VecDeque<PendingWrite>,
    read_lag: u32,
    rejections: VecDeque<u16>,
    stats: StoreStats,
}

impl StoreState {
    pub(crate) fn new(read_lag: u32) -> Self {
        Self {
            read_lag,
            ..Self::default()
        }
    }

    pub(crate) fn set_read_lag(&mut self, read_lag: u32) {
        self.read_lag = read_lag;
    }

    pub(crate) fn reject_next_write(&mut self, status: u16) {
        self.rejections.push_back(status);
    }

    pub(crate) fn stats(&self) -> StoreStats {
        self.stats
    }

    /// Puts a pet straight into the visible state.
    pub(crate) fn seed(&mut self, pet: Pet) {
        self.visible.insert(pet.id, pet);
    }

    pub(crate) fn visible(&self, id: PetId) -> Option<&Pet> {
        self.visible.get(&id)
    }

    pub(crate) fn create(&mut self, pet: Pet) -> WriteOutcome {
        self.stats.creates += 1;
        if let Some(status) = self.rejections.pop_front() {
            return WriteOutcome::Rejected(status);
        }
        self.stage(pet.id, Some(pet));
        WriteOutcome::Accepted
    }

    pub(crate) fn replace(&mut self, pet: Pet) -> WriteOutcome {
        self.stats.replaces += 1;
        if let Some(status) = self.rejections.pop_front() {
            return WriteOutcome::Rejected(status);
        }
        if !self.latest_exists(pet.id) {
            return WriteOutcome::Missing;
        }
        self.stage(pet.id, Some(pet));
        WriteOutcome::Accepted
    }

    pub(crate) fn delete(&mut self, id: PetId) -> WriteOutcome {
        self.stats.deletes += 1;
        if let Some(status) = self.rejections.pop_front() {
            return WriteOutcome::Rejected(status);
        }
        if !self.latest_exists(id) {
            return WriteOutcome::Missing;
        }
        self.stage(id, None);
        WriteOutcome::Accepted
    }

    /// Advances pending writes by one read, then answers from the visible state.
    pub(crate) fn fetch(&mut self, id: PetId) -> Option<Pet> {
        self.stats.fetches += 1;
        self.tick();
        self.visible.get(&id).cloned()
    }

    fn latest_exists(&self, id: PetId) -> bool {
        match self.pending.iter().rev().find(|write| write.id == id) {
            Some(write) => write.pet.is_some(),
            None => self.visible.contains_key(&id),
        }
    }

    fn stage(&mut self, id: PetId, pet: Option<Pet>) {
        if self.read_lag == 0 && self.pending.is_empty() {
            self.apply(id, pet);
        } else {
            self.pending.push_back(PendingWrite {
                id,
                pet,
                reads_remaining: self.read_lag,
            });
        }
    }

    fn tick(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        // Writes become visible in the order they were made.
        let mut blocked = false;
        for mut write in pending {
            if write.reads_remaining == 0 && !blocked {
                self.apply(write.id, write.pet);
            } else {
                write.reads_remaining = write.reads_remaining.saturating_sub(1);
                blocked = true;
                self.pending.push_back(write);
            }
        }
    }

    fn apply(&mut self, id: PetId, pet: Option<Pet>) {
        match pet {
            Some(pet) => {
                self.visible.insert(id, pet);
            }
            None => {
                self.visible.remove(&id);
            }
        }
    }
}
