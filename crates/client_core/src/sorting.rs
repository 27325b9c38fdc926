use std::{cmp::Ordering, fmt, str::FromStr};

use shared::domain::Lesson;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAttribute {
    #[default]
    Subject,
    Location,
    Price,
    Spaces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort attribute '{0}' (expected subject, location, price or spaces)")]
pub struct UnknownSortAttribute(pub String);

impl FromStr for SortAttribute {
    type Err = UnknownSortAttribute;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "subject" => Ok(Self::Subject),
            "location" => Ok(Self::Location),
            "price" => Ok(Self::Price),
            "spaces" | "availability" => Ok(Self::Spaces),
            _ => Err(UnknownSortAttribute(raw.to_string())),
        }
    }
}

impl fmt::Display for SortAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Subject => "subject",
            Self::Location => "location",
            Self::Price => "price",
            Self::Spaces => "spaces",
        })
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare(a: &Lesson, b: &Lesson, attribute: SortAttribute) -> Ordering {
    match attribute {
        SortAttribute::Subject => compare_text(&a.subject, &b.subject),
        SortAttribute::Location => compare_text(&a.location, &b.location),
        SortAttribute::Price => a.price.total_cmp(&b.price),
        SortAttribute::Spaces => a.spaces.cmp(&b.spaces),
    }
}

/// Returns a sorted copy; the input order is left untouched. The sort is stable.
pub fn sort_lessons(lessons: &[Lesson], attribute: SortAttribute, order: SortOrder) -> Vec<Lesson> {
    let mut sorted = lessons.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare(a, b, attribute);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    sorted
}
