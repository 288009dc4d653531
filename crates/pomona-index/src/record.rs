//! Fruit records and the total field accessor.
//!
//! Records are deserialized from the JSON published by the public fruit API. Every field may
//! be missing, and the nutrition group may be missing entirely; [`Record::field`] turns all of
//! that into an explicit [`FieldValue::Absent`] so matchers never have to care.

use std::{borrow::Cow, fmt};

use pomona_query::Field;
use serde::{Deserialize, Serialize};

/// One searchable fruit entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Record {
    /// Common name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Botanical family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Botanical order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Botanical genus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    /// Nutrition facts per 100g.
    #[serde(rename = "nutritions", alias = "nutrition")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
}

/// Nutrition facts of a record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Nutrition {
    /// Calories.
    pub calories: Option<NutritionValue>,
    /// Sugar in grams.
    pub sugar: Option<NutritionValue>,
    /// Carbohydrates in grams.
    pub carbohydrates: Option<NutritionValue>,
    /// Protein in grams.
    pub protein: Option<NutritionValue>,
    /// Fat in grams.
    pub fat: Option<NutritionValue>,
}

/// A nutrition value as found in the data.
///
/// Data sources normally publish numbers, but a quoted value is kept as text and only read as
/// a number when compared.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NutritionValue {
    /// A JSON number.
    Number(f64),
    /// Anything else that was quoted.
    Text(String),
}

impl NutritionValue {
    /// Reads the value as a float. Unparseable text yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for NutritionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `52.0` renders as `52`, `0.4` as `0.4`: the same text a user sees and types.
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for NutritionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// The value of one field of one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The field, or the group containing it, is missing.
    Absent,
    /// A text field value.
    Text(&'a str),
    /// A nutrition value.
    Number(&'a NutritionValue),
}

impl<'a> FieldValue<'a> {
    /// The value as text; absent values read as the empty string.
    pub fn as_text(&self) -> Cow<'a, str> {
        match *self {
            Self::Absent => Cow::Borrowed(""),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
        }
    }

    /// The value as a number; absent or unparseable values yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Absent => None,
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(n) => n.as_f64(),
        }
    }

    /// Returns true if the field is missing.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Wraps an optional text field.
fn text_value(value: Option<&str>) -> FieldValue<'_> {
    value.map_or(FieldValue::Absent, FieldValue::Text)
}

impl Record {
    /// Creates a record with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns the value of `field`, or [`FieldValue::Absent`].
    pub fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Name => text_value(self.name.as_deref()),
            Field::Family => text_value(self.family.as_deref()),
            Field::Order => text_value(self.order.as_deref()),
            Field::Genus => text_value(self.genus.as_deref()),
            _ => self.nutrition_value(field),
        }
    }

    /// Looks up a numeric field inside the nutrition group.
    fn nutrition_value(&self, field: Field) -> FieldValue<'_> {
        let Some(nutrition) = &self.nutrition else {
            return FieldValue::Absent;
        };
        let value = match field {
            Field::Calories => &nutrition.calories,
            Field::Sugar => &nutrition.sugar,
            Field::Carbohydrates => &nutrition.carbohydrates,
            Field::Protein => &nutrition.protein,
            Field::Fat => &nutrition.fat,
            Field::Name | Field::Family | Field::Order | Field::Genus => return FieldValue::Absent,
        };
        value.as_ref().map_or(FieldValue::Absent, FieldValue::Number)
    }

    /// Display name, falling back to a placeholder for unnamed records.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn apple() -> Record {
        serde_json::from_value(json!({
            "name": "Apple",
            "id": 6,
            "family": "Rosaceae",
            "order": "Rosales",
            "genus": "Malus",
            "nutritions": {
                "calories": 52,
                "fat": 0.4,
                "sugar": 10.3,
                "carbohydrates": 11.4,
                "protein": 0.3
            }
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_api_shape() {
        let record = apple();
        assert_eq!(record.name.as_deref(), Some("Apple"));
        assert_eq!(record.field(Field::Genus), FieldValue::Text("Malus"));
        assert_eq!(record.field(Field::Calories).as_number(), Some(52.0));
    }

    #[test]
    fn numbers_render_like_typed() {
        let record = apple();
        assert_eq!(record.field(Field::Calories).as_text(), "52");
        assert_eq!(record.field(Field::Fat).as_text(), "0.4");
    }

    #[test]
    fn missing_fields_are_absent() {
        let record = Record::named("Mystery");
        assert!(record.field(Field::Family).is_absent());
        assert!(record.field(Field::Sugar).is_absent());
        assert_eq!(record.field(Field::Family).as_text(), "");
        assert_eq!(record.field(Field::Sugar).as_number(), None);
    }

    #[test]
    fn missing_nutrition_entry_is_absent() {
        let record: Record =
            serde_json::from_value(json!({"name": "Odd", "nutritions": {"sugar": 2}})).unwrap();
        assert!(record.field(Field::Calories).is_absent());
        assert_eq!(record.field(Field::Sugar).as_number(), Some(2.0));
    }

    #[test]
    fn quoted_numbers_are_parsed_on_demand() {
        let record: Record = serde_json::from_value(json!({
            "name": "Quoted",
            "nutritions": {"calories": "61", "fat": "n/a"}
        }))
        .unwrap();
        assert_eq!(record.field(Field::Calories).as_number(), Some(61.0));
        assert_eq!(record.field(Field::Fat).as_number(), None);
        assert_eq!(record.field(Field::Fat).as_text(), "n/a");
    }

    #[test]
    fn display_name_placeholder() {
        assert_eq!(Record::default().display_name(), "(unnamed)");
    }
}
