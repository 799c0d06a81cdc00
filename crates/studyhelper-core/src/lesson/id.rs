use super::LessonId;

/// First id handed out by a fresh allocator.
pub const FIRST_LESSON_ID: LessonId = 100;

/// Monotonic lesson id generator.
///
/// Owned by the store; ids are never handed out twice and the high-water
/// mark never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: LessonId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: FIRST_LESSON_ID,
        }
    }

    /// Start at `next`, or at [`FIRST_LESSON_ID`] if that is higher.
    pub fn starting_at(next: LessonId) -> Self {
        Self {
            next: next.max(FIRST_LESSON_ID),
        }
    }

    /// Id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> LessonId {
        self.next
    }

    pub fn next_id(&mut self) -> LessonId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    /// Make sure `id` (already in use) is never handed out again.
    pub fn observe(&mut self, id: LessonId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
