//! Searchable record fields.
//!
//! Every query term either tests all text fields or is scoped to exactly one [`Field`]. The
//! text/numeric split decides which predicates and which autocomplete suggestions apply.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Whether a field holds free text or a nutrition number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar string field (`name`, `family`, `order`, `genus`).
    Text,
    /// Nutrition value (`calories`, `sugar`, `carbohydrates`, `protein`, `fat`).
    Numeric,
}

/// A searchable field of a fruit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Common name.
    Name,
    /// Botanical family.
    Family,
    /// Botanical order.
    Order,
    /// Botanical genus.
    Genus,
    /// Calories per 100g.
    Calories,
    /// Sugar per 100g.
    Sugar,
    /// Carbohydrates per 100g.
    Carbohydrates,
    /// Protein per 100g.
    Protein,
    /// Fat per 100g.
    Fat,
}

impl Field {
    /// All fields, in suggestion order.
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::Family,
        Self::Order,
        Self::Genus,
        Self::Calories,
        Self::Sugar,
        Self::Carbohydrates,
        Self::Protein,
        Self::Fat,
    ];

    /// The four text fields tested by unscoped terms.
    pub const TEXT: [Self; 4] = [Self::Name, Self::Family, Self::Order, Self::Genus];

    /// The identifier used in queries (`calories` in `calories: >= 50`).
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Family => "family",
            Self::Order => "order",
            Self::Genus => "genus",
            Self::Calories => "calories",
            Self::Sugar => "sugar",
            Self::Carbohydrates => "carbohydrates",
            Self::Protein => "protein",
            Self::Fat => "fat",
        }
    }

    /// Human-readable label shown next to suggestions and record cards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Family => "Family",
            Self::Order => "Order",
            Self::Genus => "Genus",
            Self::Calories => "Calories",
            Self::Sugar => "Sugar",
            Self::Carbohydrates => "Carbohydrates",
            Self::Protein => "Protein",
            Self::Fat => "Fat",
        }
    }

    /// Returns whether this field is a text or numeric field.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Name | Self::Family | Self::Order | Self::Genus => FieldKind::Text,
            Self::Calories | Self::Sugar | Self::Carbohydrates | Self::Protein | Self::Fat => {
                FieldKind::Numeric
            }
        }
    }

    /// Returns true for nutrition fields.
    pub fn is_numeric(self) -> bool {
        self.kind() == FieldKind::Numeric
    }

    /// Looks up a field by identifier, ignoring ASCII case and surrounding whitespace.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.identifier().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Field {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| QueryError::UnknownField {
            name: s.to_string(),
        })
    }
}
