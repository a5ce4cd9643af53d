//! Case-insensitive text sort on one record field

use partsort_core::{Error, PartRecord, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;

/// Record field used by the alphabetical orderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    ShortDescription,
    DimensionalDescription,
    /// Short and dimensional description joined
    Description,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::ShortDescription => "short_description",
            SortField::DimensionalDescription => "dimensional_description",
            SortField::Description => "description",
        }
    }

    pub fn value<'a>(self, record: &'a PartRecord) -> Cow<'a, str> {
        match self {
            SortField::Id => Cow::Borrowed(record.id.as_str()),
            SortField::ShortDescription => Cow::Borrowed(record.short_description.as_str()),
            SortField::DimensionalDescription => Cow::Borrowed(record.dimensional_description.as_str()),
            SortField::Description => Cow::Owned(record.description()),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "id" | "product_id" | "part_number" => Ok(SortField::Id),
            "short_description" | "short" | "family" => Ok(SortField::ShortDescription),
            "dimensional_description" | "dimensional" | "detail" => Ok(SortField::DimensionalDescription),
            "description" => Ok(SortField::Description),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}

pub fn alphabetical_order(records: &[PartRecord], field: SortField) -> Vec<usize> {
    let keys: Vec<String> = records.iter().map(|r| field.value(r).to_lowercase()).collect();

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        keys[a]
            .cmp(&keys[b])
            .then_with(|| records[a].id.cmp(&records[b].id))
            .then(a.cmp(&b))
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_id() {
        let records = vec![PartRecord::bare("91290A116"), PartRecord::bare("91290A115")];
        assert_eq!(alphabetical_order(&records, SortField::Id), vec![1, 0]);
    }

    #[test]
    fn test_case_insensitive() {
        let records = vec![
            PartRecord::new("1", "washer", ""),
            PartRecord::new("2", "Nut", ""),
            PartRecord::new("3", "Anchor", ""),
        ];
        assert_eq!(alphabetical_order(&records, SortField::ShortDescription), vec![2, 1, 0]);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let records = vec![
            PartRecord::new("b", "Hex Nut", "M4"),
            PartRecord::new("a", "hex nut", "M5"),
        ];
        assert_eq!(alphabetical_order(&records, SortField::ShortDescription), vec![1, 0]);
        assert_eq!(alphabetical_order(&records, SortField::DimensionalDescription), vec![0, 1]);
    }

    #[test]
    fn test_description_field() {
        let records = vec![
            PartRecord::new("1", "Screw", "M5"),
            PartRecord::new("2", "Screw", "M4"),
        ];
        assert_eq!(alphabetical_order(&records, SortField::Description), vec![1, 0]);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("short-description".parse::<SortField>().unwrap(), SortField::ShortDescription);
        assert_eq!("ID".parse::<SortField>().unwrap(), SortField::Id);
        assert!(matches!("color".parse::<SortField>(), Err(Error::UnknownField(_))));
    }
}
