// ABOUTME: Natural-language food parser producing structured nutrition facts
// ABOUTME: One async method turning free text into a FoodItem via the LLM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitalis Health

use super::{extract_json_object, ChatMessage, ChatRequest, LlmProvider};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::FoodItem;

/// Deterministic-ish sampling for data extraction
const PARSER_TEMPERATURE: f32 = 0.1;

/// Completion cap for parse replies
const PARSER_MAX_TOKENS: u32 = 512;

const SYSTEM_PROMPT: &str = "You are a nutrition fact extractor. Given a free-text description \
of food, reply with ONLY a JSON object of this shape: {\"name\": string, \"quantity\": number, \
\"unit\": string, \"calories\": number, \"protein\": number, \"carbs\": number, \"fats\": number, \
\"fiber\": number, \"sugar\": number, \"sodium\": number, \"micronutrients\": {string: number}}. \
Macro amounts are grams, sodium is milligrams, micronutrient keys look like \"vitamin_c_mg\". \
Use your best estimate for the described portion.";

/// Lenient mirror of the parser response; absent fields default to zero
#[derive(Debug, Deserialize)]
struct ParsedFood {
    #[serde(default)]
    name: String,
    #[serde(default)]
    quantity: f64,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    fats: f64,
    #[serde(default)]
    fiber: f64,
    #[serde(default)]
    sugar: f64,
    #[serde(default)]
    sodium: f64,
    #[serde(default)]
    micronutrients: BTreeMap<String, f64>,
}

/// Natural-language food parser
pub struct FoodParser {
    provider: Arc<dyn LlmProvider>,
}

impl FoodParser {
    /// Create a parser over the given provider
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Parse a free-text food description into a structured item
    ///
    /// # Errors
    /// Returns an external-service error when the provider call fails or the
    /// reply carries no usable JSON object. Parsing failure never panics and
    /// never blocks any other write; the caller surfaces the error and the
    /// user can log the food manually.
    pub async fn parse(&self, description: &str) -> AppResult<FoodItem> {
        if description.trim().is_empty() {
            return Err(AppError::invalid_input("food description is empty"));
        }

        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(description),
        ])
        .with_temperature(PARSER_TEMPERATURE)
        .with_max_tokens(PARSER_MAX_TOKENS);

        let response = self.provider.complete(&request).await?;
        debug!(model = %response.model, "food parse reply received");
        Self::item_from_reply(&response.content)
    }

    fn item_from_reply(content: &str) -> AppResult<FoodItem> {
        let json = extract_json_object(content).ok_or_else(|| {
            AppError::external_service("food-parser", "reply contained no JSON object")
        })?;
        let parsed: ParsedFood = serde_json::from_str(json).map_err(|e| {
            AppError::external_service("food-parser", format!("malformed reply: {e}"))
        })?;

        if parsed.name.trim().is_empty() {
            return Err(AppError::external_service(
                "food-parser",
                "reply did not name the food",
            ));
        }

        Ok(FoodItem {
            name: parsed.name,
            quantity: if parsed.quantity > 0.0 {
                parsed.quantity
            } else {
                1.0
            },
            unit: if parsed.unit.is_empty() {
                "serving".to_owned()
            } else {
                parsed.unit
            },
            calories: parsed.calories.max(0.0),
            protein: parsed.protein.max(0.0),
            carbs: parsed.carbs.max(0.0),
            fats: parsed.fats.max(0.0),
            fiber: parsed.fiber.max(0.0),
            sugar: parsed.sugar.max(0.0),
            sodium: parsed.sodium.max(0.0),
            micronutrients: parsed.micronutrients,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_reply_parses() {
        let reply = "```json\n{\"name\": \"oatmeal with berries\", \"quantity\": 1, \
                     \"unit\": \"bowl\", \"calories\": 310, \"protein\": 9, \"carbs\": 55, \
                     \"fats\": 6, \"fiber\": 8, \"sugar\": 12, \"sodium\": 150, \
                     \"micronutrients\": {\"iron_mg\": 2.1}}\n```";
        let item = FoodParser::item_from_reply(reply).unwrap();
        assert_eq!(item.name, "oatmeal with berries");
        assert!((item.calories - 310.0).abs() < f64::EPSILON);
        assert!((item.micronutrients["iron_mg"] - 2.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let item = FoodParser::item_from_reply("{\"name\": \"black coffee\"}").unwrap();
        assert!((item.calories - 0.0).abs() < f64::EPSILON);
        assert_eq!(item.unit, "serving");
        assert!((item.quantity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_prose_reply_is_an_error() {
        assert!(FoodParser::item_from_reply("I couldn't identify that food.").is_err());
    }

    #[test]
    fn test_unnamed_food_is_an_error() {
        assert!(FoodParser::item_from_reply("{\"calories\": 100}").is_err());
    }
}
