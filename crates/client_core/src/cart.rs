use shared::domain::{CartEntry, Lesson, LessonId};

use crate::error::CartError;

/// Cart entries in booking order. Entries are keyed by lesson id; the first
/// match wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

/// What happened to the cart entry on removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Decremented { lesson_id: LessonId, quantity: u32 },
    Removed { lesson_id: LessonId },
}

impl Removal {
    pub fn lesson_id(&self) -> &LessonId {
        match self {
            Self::Decremented { lesson_id, .. } | Self::Removed { lesson_id } => lesson_id,
        }
    }
}

impl Cart {
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn quantity_of(&self, lesson_id: &LessonId) -> u32 {
        self.find(lesson_id).map_or(0, |entry| entry.quantity)
    }

    fn find(&self, lesson_id: &LessonId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id() == lesson_id)
    }

    /// Adds one unit of `lesson`, returning the resulting quantity.
    pub fn add(&mut self, lesson: &Lesson) -> u32 {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id() == &lesson.id)
        {
            entry.quantity += 1;
            return entry.quantity;
        }
        self.entries.push(CartEntry::from_lesson(lesson));
        1
    }

    /// Takes one unit off the entry at `index`, dropping it when it was the last.
    pub fn remove_at(&mut self, index: usize) -> Result<Removal, CartError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;

        if entry.quantity > 1 {
            entry.quantity -= 1;
            return Ok(Removal::Decremented {
                lesson_id: entry.id().clone(),
                quantity: entry.quantity,
            });
        }

        let entry = self.entries.remove(index);
        Ok(Removal::Removed {
            lesson_id: entry.lesson.id,
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
