// src/recipes/search.rs
//! Dynamic search-query construction
//!
//! Filters are modeled as discrete predicate kinds and AND-composed into a
//! single WHERE clause with bound placeholders.

use sqlx::SqlitePool;

use super::duration::parse_duration_seconds;
use super::models::{Recipe, RecipeResponse, SearchRecipesParams, SearchResponse};
use crate::common::ApiError;

pub const DEFAULT_LIMIT: i64 = 20;
pub const DEFAULT_OFFSET: i64 = 0;

/// A single search predicate
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeFilter {
    Category(String),
    Difficulty(String),
    /// The recipe's ingredient set must contain every listed token
    /// (exact string match)
    IngredientsContainAll(Vec<String>),
    CookTimeBetween { min_seconds: i64, max_seconds: i64 },
}

enum BindValue {
    Text(String),
    Int(i64),
}

impl RecipeFilter {
    fn predicate_sql(&self) -> &'static str {
        match self {
            RecipeFilter::Category(_) => "category = ?",
            RecipeFilter::Difficulty(_) => "difficulty = ?",
            // anti-join: no wanted token may be missing from the recipe's
            // ingredient array
            RecipeFilter::IngredientsContainAll(_) => {
                "NOT EXISTS (SELECT 1 FROM json_each(?) AS wanted \
                 WHERE wanted.value NOT IN (SELECT value FROM json_each(recipes.ingredients)))"
            }
            RecipeFilter::CookTimeBetween { .. } => "cook_time_seconds BETWEEN ? AND ?",
        }
    }

    fn bind_values(&self) -> Vec<BindValue> {
        match self {
            RecipeFilter::Category(category) => vec![BindValue::Text(category.clone())],
            RecipeFilter::Difficulty(difficulty) => vec![BindValue::Text(difficulty.clone())],
            RecipeFilter::IngredientsContainAll(tokens) => vec![BindValue::Text(
                serde_json::to_string(tokens).unwrap_or_else(|_| "[]".to_string()),
            )],
            RecipeFilter::CookTimeBetween {
                min_seconds,
                max_seconds,
            } => vec![BindValue::Int(*min_seconds), BindValue::Int(*max_seconds)],
        }
    }
}

/// AND-composed filter set plus pagination window
#[derive(Debug)]
pub struct RecipeQuery {
    pub filters: Vec<RecipeFilter>,
    pub limit: i64,
    pub offset: i64,
}

impl RecipeQuery {
    /// Build a query from raw search parameters.
    ///
    /// limit/offset bounds and category/difficulty membership are enforced
    /// upstream by SearchQueryValidator; this handles the cook-time range
    /// rule and duration parsing.
    pub fn from_params(params: &SearchRecipesParams) -> Result<Self, ApiError> {
        let mut filters = Vec::new();

        if params.min_cook_time.is_some() != params.max_cook_time.is_some() {
            return Err(ApiError::BadRequest(
                "If the maxCookTime or minCookTime field is specified, then the other field must also be specified"
                    .to_string(),
            ));
        }

        if let (Some(min), Some(max)) = (&params.min_cook_time, &params.max_cook_time) {
            filters.push(RecipeFilter::CookTimeBetween {
                min_seconds: parse_duration_seconds(min)?,
                max_seconds: parse_duration_seconds(max)?,
            });
        }

        if let Some(category) = &params.category {
            filters.push(RecipeFilter::Category(category.clone()));
        }

        if let Some(difficulty) = &params.difficulty {
            filters.push(RecipeFilter::Difficulty(difficulty.clone()));
        }

        if let Some(ingredients) = &params.ingredients {
            let tokens: Vec<String> = ingredients
                .split_whitespace()
                .map(|token| token.to_string())
                .collect();
            if !tokens.is_empty() {
                filters.push(RecipeFilter::IngredientsContainAll(tokens));
            }
        }

        Ok(Self {
            filters,
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
            offset: params.offset.unwrap_or(DEFAULT_OFFSET),
        })
    }

    /// Render the AND-composed WHERE clause ("" when no filters apply)
    pub fn where_clause(&self) -> String {
        if self.filters.is_empty() {
            return String::new();
        }

        let predicates: Vec<&str> = self
            .filters
            .iter()
            .map(|filter| filter.predicate_sql())
            .collect();

        format!(" WHERE {}", predicates.join(" AND "))
    }

    /// Count matches and fetch one page. Result order is whatever the
    /// storage returns; no sort key is applied.
    pub async fn execute(&self, pool: &SqlitePool) -> Result<SearchResponse, ApiError> {
        let where_clause = self.where_clause();

        let count_sql = format!("SELECT COUNT(*) FROM recipes{}", where_clause);
        let mut count_query = sqlx::query_scalar::<sqlx::Sqlite, i64>(&count_sql);
        for value in self.filters.iter().flat_map(|filter| filter.bind_values()) {
            count_query = match value {
                BindValue::Text(text) => count_query.bind(text),
                BindValue::Int(number) => count_query.bind(number),
            };
        }
        let total = count_query
            .fetch_one(pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        let rows_sql = format!("SELECT * FROM recipes{} LIMIT ? OFFSET ?", where_clause);
        let mut rows_query = sqlx::query_as::<_, Recipe>(&rows_sql);
        for value in self.filters.iter().flat_map(|filter| filter.bind_values()) {
            rows_query = match value {
                BindValue::Text(text) => rows_query.bind(text),
                BindValue::Int(number) => rows_query.bind(number),
            };
        }
        let recipes = rows_query
            .bind(self.limit)
            .bind(self.offset)
            .fetch_all(pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(SearchResponse {
            current_page: current_page(self.offset),
            total_pages: total_pages(total, self.limit),
            recipes: recipes.into_iter().map(RecipeResponse::from).collect(),
        })
    }
}

/// Pages needed to cover `total` matches at `limit` per page
pub fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// The reported page number is the raw offset plus one
pub fn current_page(offset: i64) -> i64 {
    offset + 1
}
