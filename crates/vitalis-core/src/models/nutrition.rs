// ABOUTME: Nutrition tracking models for daily intake, meals, and food items
// ABOUTME: NutritionEntry, DailyTotals, Hydration, Meal, MealType, and FoodItem definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }
}

/// Macronutrient totals for one day (the food-diary roll-up)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct DailyTotals {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein: f64,
    /// Carbohydrates (grams)
    pub carbs: f64,
    /// Fats (grams)
    pub fats: f64,
    /// Fiber (grams)
    pub fiber: f64,
    /// Sugar (grams)
    pub sugar: f64,
    /// Sodium (milligrams)
    pub sodium: f64,
}

impl DailyTotals {
    /// Field-wise sum of two totals
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
            fiber: self.fiber + other.fiber,
            sugar: self.sugar + other.sugar,
            sodium: self.sodium + other.sodium,
        }
    }
}

/// Daily hydration tracking (liters)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Hydration {
    /// Water consumed
    pub water_intake: f64,
    /// Daily target
    pub target: f64,
}

/// Individual food item within a meal
///
/// This is also the response shape of the natural-language food parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food name
    pub name: String,
    /// Quantity consumed
    pub quantity: f64,
    /// Quantity unit (g, oz, cup, serving, ...)
    pub unit: String,
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein: f64,
    /// Carbohydrates (grams)
    pub carbs: f64,
    /// Fats (grams)
    pub fats: f64,
    /// Fiber (grams)
    pub fiber: f64,
    /// Sugar (grams)
    pub sugar: f64,
    /// Sodium (milligrams)
    pub sodium: f64,
    /// Micronutrient amounts keyed by nutrient id (e.g. `vitamin_c_mg`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub micronutrients: BTreeMap<String, f64>,
}

impl FoodItem {
    /// Macro contribution of this item as a [`DailyTotals`]
    #[must_use]
    pub fn as_totals(&self) -> DailyTotals {
        DailyTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            fiber: self.fiber,
            sugar: self.sugar,
            sodium: self.sodium,
        }
    }
}

/// A logged meal within a day's entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Meal id (uuid string)
    pub id: String,
    /// Meal slot
    pub meal_type: MealType,
    /// Meal description or name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Food items in the meal
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

/// One day of tracked nutrition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionEntry {
    /// Calendar date (natural key)
    pub date: NaiveDate,
    /// Macro totals for the day
    #[serde(default)]
    pub daily_totals: DailyTotals,
    /// Micronutrient totals keyed by nutrient id
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub micronutrients: BTreeMap<String, f64>,
    /// Hydration tracking
    #[serde(default)]
    pub hydration: Hydration,
    /// Logged meals
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl NutritionEntry {
    /// Create an empty entry for a date
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            daily_totals: DailyTotals::default(),
            micronutrients: BTreeMap::new(),
            hydration: Hydration::default(),
            meals: Vec::new(),
        }
    }

    /// Recompute `daily_totals` and `micronutrients` from the logged meals
    ///
    /// Called after adding or removing food items so the denormalized totals
    /// stay consistent with the meal list.
    pub fn recompute_totals(&mut self) {
        let mut totals = DailyTotals::default();
        let mut micros: BTreeMap<String, f64> = BTreeMap::new();
        for meal in &self.meals {
            for item in &meal.items {
                totals = totals.add(&item.as_totals());
                for (key, amount) in &item.micronutrients {
                    *micros.entry(key.clone()).or_insert(0.0) += amount;
                }
            }
        }
        self.daily_totals = totals;
        self.micronutrients = micros;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(calories: f64, protein: f64) -> FoodItem {
        FoodItem {
            name: "test".to_owned(),
            quantity: 1.0,
            unit: "serving".to_owned(),
            calories,
            protein,
            carbs: 0.0,
            fats: 0.0,
            fiber: 0.0,
            sugar: 0.0,
            sodium: 0.0,
            micronutrients: BTreeMap::from([("vitamin_c_mg".to_owned(), 30.0)]),
        }
    }

    #[test]
    fn test_recompute_totals_from_meals() {
        let mut entry = NutritionEntry::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        entry.meals.push(Meal {
            id: "m1".to_owned(),
            meal_type: MealType::Breakfast,
            name: None,
            items: vec![item(400.0, 20.0), item(250.0, 10.0)],
        });
        entry.recompute_totals();
        assert!((entry.daily_totals.calories - 650.0).abs() < f64::EPSILON);
        assert!((entry.daily_totals.protein - 30.0).abs() < f64::EPSILON);
        assert!((entry.micronutrients["vitamin_c_mg"] - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_meal_type_lossy_parse() {
        assert_eq!(MealType::from_str_lossy("Dinner"), MealType::Dinner);
        assert_eq!(MealType::from_str_lossy("brunch"), MealType::Other);
    }
}
