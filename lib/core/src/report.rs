use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type ReportId = Uuid;

/// Identity of an authenticated user, as resolved from a bearer credential
pub type UserId = String;

/// Which side of a reunion a report sits on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Lost,
    Found,
}

impl Category {
    /// True when `self` and `other` form a Lost/Found pair
    #[inline]
    pub fn is_counterpart_of(self, other: Category) -> bool {
        matches!(
            (self, other),
            (Category::Lost, Category::Found) | (Category::Found, Category::Lost)
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lost => write!(f, "Lost"),
            Category::Found => write!(f, "Found"),
        }
    }
}

/// Owner details carried alongside a report so candidates can show who to contact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Owner {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, contact: Option<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            contact,
        }
    }
}

/// A single lost-dog or found-dog submission
///
/// Read-only to the matching engine; created, reunited and deleted through
/// a [`ReportStore`](crate::ReportStore).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: ReportId,
    pub pet_id: u64,
    pub category: Category,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    pub owner: Owner,
    #[serde(default)]
    pub reunited: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(pet_id: u64, category: Category, owner: Owner) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            pet_id,
            category,
            breed: None,
            image_path: None,
            owner,
            reunited: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    #[inline]
    pub fn owner_id(&self) -> &str {
        &self.owner.id
    }

    /// Breed string, with a missing breed read as empty
    #[inline]
    pub fn breed_or_empty(&self) -> &str {
        self.breed.as_deref().unwrap_or("")
    }

    /// Stable iteration key: creation time, then id
    #[inline]
    pub fn ordering_key(&self) -> (DateTime<Utc>, ReportId) {
        (self.created_at, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_counterpart() {
        assert!(Category::Lost.is_counterpart_of(Category::Found));
        assert!(Category::Found.is_counterpart_of(Category::Lost));
        assert!(!Category::Lost.is_counterpart_of(Category::Lost));
        assert!(!Category::Found.is_counterpart_of(Category::Found));
    }

    #[test]
    fn test_missing_breed_reads_empty() {
        let report = Report::new(7, Category::Found, Owner::new("u2", "Jun", None));
        assert_eq!(report.breed_or_empty(), "");
        assert!(!report.reunited);
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = serde_json::json!({
            "id": "6f1c5a3e-2b6d-4c54-9a59-0d8a3b0f9e11",
            "pet_id": 3,
            "category": "Lost",
            "owner": { "id": "u1", "display_name": "Maria" }
        });
        let report: Report = serde_json::from_value(json).unwrap();
        assert_eq!(report.pet_id, 3);
        assert!(report.breed.is_none());
        assert!(report.image_path.is_none());
        assert!(report.owner.contact.is_none());
        assert!(!report.reunited);
    }
}
