use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(pub String);

impl LessonId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A bookable catalog entry as returned by the lesson catalog service.
///
/// The backend keys documents by `_id`, which is what carts match on and what
/// update requests address. Documents may also carry a separate `id` (often
/// numeric); it is kept verbatim in `catalog_id` so orders echo it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: LessonId,
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<Value>,
    pub subject: String,
    #[serde(default)]
    pub location: String,
    pub price: f64,
    pub spaces: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A lesson copied into the cart together with the booked quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub quantity: u32,
}

impl CartEntry {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            lesson: lesson.clone(),
            quantity: 1,
        }
    }

    pub fn id(&self) -> &LessonId {
        &self.lesson.id
    }

    pub fn line_total(&self) -> f64 {
        self.lesson.price * f64::from(self.quantity)
    }
}
