//! Identifiers and a simple allocator for driven key instances.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DrivenKeyId(pub u32);

/// Monotonic allocator for DrivenKeyId. IDs are opaque externally and never reused
/// until `reset`.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_key: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_key(&mut self) -> DrivenKeyId {
        let id = DrivenKeyId(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        id
    }

    pub fn reset(&mut self) {
        self.next_key = 0;
    }
}
