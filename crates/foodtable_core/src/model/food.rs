//! Food payload and form input.
//!
//! # Responsibility
//! - Define the nutrient row stored in the food table.
//! - Parse string-typed form input into a validated payload.
//!
//! # Invariants
//! - Nutrient values are finite and non-negative once validated.
//! - Empty names are allowed.

use crate::model::record::Named;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Nutrient values per 100 grams of one food.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodData {
    pub name: String,
    /// Kilocalories per 100 g.
    pub kcal: f64,
    /// Grams of protein per 100 g.
    pub protein: f64,
    /// Grams of carbohydrates per 100 g.
    pub carbs: f64,
    /// Grams of fat per 100 g.
    pub fat: f64,
}

impl FoodData {
    pub fn new(
        name: impl Into<String>,
        kcal: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kcal,
            protein,
            carbs,
            fat,
        }
    }

    /// Checks that every nutrient is a finite, non-negative number.
    pub fn validate(&self) -> Result<(), FoodValidationError> {
        for (field, value) in self.nutrients() {
            if !value.is_finite() || value < 0.0 {
                return Err(FoodValidationError::NegativeNutrient { field, value });
            }
        }
        Ok(())
    }

    fn nutrients(&self) -> [(&'static str, f64); 4] {
        [
            ("kcal", self.kcal),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ]
    }
}

impl Named for FoodData {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Validation failure for food input.
#[derive(Debug, Clone, PartialEq)]
pub enum FoodValidationError {
    /// A nutrient field could not be parsed as a number.
    NotANumber { field: &'static str, value: String },
    /// A nutrient is negative, NaN or infinite.
    NegativeNutrient { field: &'static str, value: f64 },
}

impl Display for FoodValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber { field, value } => {
                write!(f, "{field} must be a number, got `{value}`")
            }
            Self::NegativeNutrient { field, value } => {
                write!(f, "{field} must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for FoodValidationError {}

/// String-typed food input as submitted by a form.
///
/// Every nutrient stays a `String` until [`FoodForm::parse`] so that the
/// caller can echo invalid input back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodForm {
    pub name: String,
    pub kcal: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

impl Default for FoodForm {
    /// Empty name and zeroed nutrients.
    fn default() -> Self {
        Self {
            name: String::new(),
            kcal: "0".to_string(),
            protein: "0".to_string(),
            carbs: "0".to_string(),
            fat: "0".to_string(),
        }
    }
}

impl FoodForm {
    pub fn new(
        name: impl Into<String>,
        kcal: impl Into<String>,
        protein: impl Into<String>,
        carbs: impl Into<String>,
        fat: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kcal: kcal.into(),
            protein: protein.into(),
            carbs: carbs.into(),
            fat: fat.into(),
        }
    }

    /// Fills a form from a stored payload, e.g. for an edit view.
    pub fn from_food(food: &FoodData) -> Self {
        Self {
            name: food.name.clone(),
            kcal: food.kcal.to_string(),
            protein: food.protein.to_string(),
            carbs: food.carbs.to_string(),
            fat: food.fat.to_string(),
        }
    }

    /// Resets every field to its default value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parses and validates the form into a payload.
    ///
    /// # Errors
    /// - `NotANumber` for the first nutrient that does not parse.
    /// - `NegativeNutrient` for the first nutrient below zero (or not finite).
    pub fn parse(&self) -> Result<FoodData, FoodValidationError> {
        let food = FoodData {
            name: self.name.clone(),
            kcal: parse_nutrient("kcal", &self.kcal)?,
            protein: parse_nutrient("protein", &self.protein)?,
            carbs: parse_nutrient("carbs", &self.carbs)?,
            fat: parse_nutrient("fat", &self.fat)?,
        };
        food.validate()?;
        Ok(food)
    }
}

fn parse_nutrient(field: &'static str, raw: &str) -> Result<f64, FoodValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FoodValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })
}
