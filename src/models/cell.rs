//! Addresses of editable grid cells
//!
//! A cell is identified structurally by section, group, optional subcategory
//! and month. The textual form `section:group:sub:Month YYYY` is what the
//! presentation layer hands to the navigation grid; ids never contain `:`.

use std::fmt;
use std::str::FromStr;

use super::ids::{GroupId, SectionId, SubCategoryId};
use super::month::MonthKey;

/// Separator between address components
pub const SEPARATOR: char = ':';

/// The row a cell belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowAddress {
    pub section: SectionId,
    pub group: GroupId,
    /// `None` addresses the group's own values row (direct-value groups)
    pub sub_category: Option<SubCategoryId>,
}

impl RowAddress {
    pub fn new(section: SectionId, group: GroupId, sub_category: Option<SubCategoryId>) -> Self {
        Self {
            section,
            group,
            sub_category,
        }
    }

    /// Address of this row's cell in `month`
    pub fn cell(&self, month: MonthKey) -> CellAddress {
        CellAddress {
            row: self.clone(),
            month,
        }
    }
}

impl fmt::Display for RowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub = self.sub_category.as_ref().map(SubCategoryId::as_str).unwrap_or("");
        write!(f, "{}{sep}{}{sep}{}", self.section, self.group, sub, sep = SEPARATOR)
    }
}

impl FromStr for RowAddress {
    type Err = CellAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(SEPARATOR);
        let (Some(section), Some(group), Some(sub), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CellAddressError::WrongShape(s.to_string()));
        };

        let section = section
            .parse()
            .map_err(|_| CellAddressError::UnknownSection(section.to_string()))?;
        if group.is_empty() {
            return Err(CellAddressError::WrongShape(s.to_string()));
        }
        let sub_category = (!sub.is_empty()).then(|| SubCategoryId::new(sub));

        Ok(Self::new(section, GroupId::new(group), sub_category))
    }
}

/// One editable cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: RowAddress,
    pub month: MonthKey,
}

impl CellAddress {
    pub fn new(
        section: SectionId,
        group: GroupId,
        sub_category: Option<SubCategoryId>,
        month: MonthKey,
    ) -> Self {
        RowAddress::new(section, group, sub_category).cell(month)
    }

    /// The row this cell belongs to
    pub fn row_key(&self) -> &RowAddress {
        &self.row
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.row, SEPARATOR, self.month)
    }
}

impl FromStr for CellAddress {
    type Err = CellAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, month) = s
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| CellAddressError::WrongShape(s.to_string()))?;
        let month = month
            .parse()
            .map_err(|_| CellAddressError::BadMonth(month.to_string()))?;
        Ok(row.parse::<RowAddress>()?.cell(month))
    }
}

/// Row key of a textual cell id: everything before the last separator
pub fn row_key_of(cell_id: &str) -> &str {
    cell_id
        .rsplit_once(SEPARATOR)
        .map(|(row, _)| row)
        .unwrap_or(cell_id)
}

/// Error type for cell address parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellAddressError {
    WrongShape(String),
    UnknownSection(String),
    BadMonth(String),
}

impl fmt::Display for CellAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongShape(s) => write!(
                f,
                "Invalid cell address '{}' (expected section:group:sub:month)",
                s
            ),
            Self::UnknownSection(s) => write!(f, "Unknown section '{}'", s),
            Self::BadMonth(s) => write!(f, "Invalid month '{}'", s),
        }
    }
}

impl std::error::Error for CellAddressError {}
