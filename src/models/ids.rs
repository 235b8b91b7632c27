//! Strongly-typed ID wrappers for ledger entities
//!
//! Group and subcategory ids are slugs derived from the entity name plus a
//! creation timestamp. Slugs only ever contain `[a-z0-9-]`, which keeps them
//! free of the cell address separator.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate slug-backed ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate an id for `name` that does not collide with `taken`
            pub fn generate<'a>(name: &str, taken: impl IntoIterator<Item = &'a $name>) -> Self {
                let taken: Vec<&str> = taken.into_iter().map(|id| id.as_str()).collect();
                Self(unique_slug(name, Utc::now().timestamp_millis(), &taken))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

define_id!(GroupId);
define_id!(SubCategoryId);

/// Lowercase `name`, collapsing every run of non-alphanumerics into `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Slug of `name` suffixed with `stamp`, plus a counter if still taken
fn unique_slug(name: &str, stamp: i64, taken: &[&str]) -> String {
    let base = match slugify(name) {
        slug if slug.is_empty() => format!("item-{}", stamp),
        slug => format!("{}-{}", slug, stamp),
    };

    if !taken.contains(&base.as_str()) {
        return base;
    }

    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .unwrap_or(base)
}

/// Top-level section of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Income,
    Expenses,
}

impl SectionId {
    /// Both sections in display order
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expenses]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }

    /// Heading shown above the section
    pub fn title(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expenses => "Expenses",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expenses" | "expense" => Ok(Self::Expenses),
            other => Err(UnknownSection(other.to_string())),
        }
    }
}

/// A section name other than income or expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Cloud Hosting"), "cloud-hosting");
        assert_eq!(slugify("  Salaries & Wages "), "salaries-wages");
        assert_eq!(slugify("R&D: 2024"), "r-d-2024");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_unique_slug_appends_stamp() {
        assert_eq!(unique_slug("Office Rent", 1700, &[]), "office-rent-1700");
        assert_eq!(unique_slug("***", 1700, &[]), "item-1700");
    }

    #[test]
    fn test_unique_slug_avoids_collisions() {
        let taken = ["rent-5", "rent-5-2"];
        assert_eq!(unique_slug("Rent", 5, &taken), "rent-5-3");
    }

    #[test]
    fn test_generated_id_never_contains_separator() {
        let id = SubCategoryId::generate("Fees: monthly", std::iter::empty());
        assert!(!id.as_str().contains(':'));
        assert!(id.as_str().starts_with("fees-monthly-"));
    }

    #[test]
    fn test_section_parse_and_display() {
        assert_eq!("income".parse::<SectionId>().unwrap(), SectionId::Income);
        assert_eq!("Expenses".parse::<SectionId>().unwrap(), SectionId::Expenses);
        assert!("assets".parse::<SectionId>().is_err());
        assert_eq!(SectionId::Expenses.to_string(), "expenses");
    }

    #[test]
    fn test_id_serialization() {
        let id = GroupId::new("salaries-wages");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"salaries-wages\"");
        let back: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
