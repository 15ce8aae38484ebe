//! Field rules shared by the category and product write paths.
//!
//! Rules run sequentially and stop at the first violated constraint, so the
//! caller always gets a single, specific message. Every rule is a pure
//! function; nothing here touches the store.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::entities::product::ProductVariant;
use crate::errors::ServiceError;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// The first constraint a candidate record violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct RuleViolation(pub String);

impl From<RuleViolation> for ServiceError {
    fn from(violation: RuleViolation) -> Self {
        ServiceError::Validation(violation.0)
    }
}

fn violation(message: impl Into<String>) -> RuleViolation {
    RuleViolation(message.into())
}

/// Raw variant fields as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct VariantFields {
    pub name: Option<String>,
    pub additional_price: Option<Decimal>,
}

/// An accepted, normalized category record awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// An accepted, normalized product record awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Uuid,
    pub stock: i32,
    pub variants: Vec<ProductVariant>,
}

pub fn normalize_string(value: &str) -> String {
    value.trim().to_string()
}

pub fn normalize_optional_string(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .and_then(|v| if v.is_empty() { None } else { Some(v) })
}

pub fn name_rule(value: Option<&str>) -> Result<String, RuleViolation> {
    let raw = value.ok_or_else(|| violation("name is required"))?;
    let name = normalize_string(raw);
    let chars = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        return Err(violation(format!(
            "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
        )));
    }
    Ok(name)
}

pub fn description_rule(value: Option<&str>) -> Result<Option<String>, RuleViolation> {
    let description = normalize_optional_string(value);
    if let Some(ref text) = description {
        if text.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(violation(format!(
                "description must be at most {DESCRIPTION_MAX_CHARS} characters"
            )));
        }
    }
    Ok(description)
}

pub fn price_rule(value: Option<Decimal>) -> Result<Decimal, RuleViolation> {
    let price = value.ok_or_else(|| violation("price is required"))?;
    if price <= Decimal::ZERO {
        return Err(violation("price must be greater than 0"));
    }
    Ok(price)
}

pub fn category_ref_rule(value: Option<&str>) -> Result<Uuid, RuleViolation> {
    let raw = value.ok_or_else(|| violation("category is required"))?;
    Uuid::parse_str(raw.trim()).map_err(|_| violation("category must be a valid category id"))
}

/// Absent stock falls back to the record default of zero.
pub fn stock_rule(value: Option<i64>) -> Result<i32, RuleViolation> {
    let stock = value.unwrap_or(0);
    if stock < 0 || stock > i64::from(i32::MAX) {
        return Err(violation("stock must be a non-negative integer"));
    }
    Ok(stock as i32)
}

pub fn variants_rule(values: Option<&[VariantFields]>) -> Result<Vec<ProductVariant>, RuleViolation> {
    let Some(values) = values else {
        return Ok(Vec::new());
    };

    let mut variants = Vec::with_capacity(values.len());
    for (index, fields) in values.iter().enumerate() {
        let name = fields
            .name
            .as_deref()
            .map(normalize_string)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| violation(format!("variants[{index}].name is required")))?;

        if let Some(additional_price) = fields.additional_price {
            if additional_price < Decimal::ZERO {
                return Err(violation(format!(
                    "variants[{index}].additionalPrice must be at least 0"
                )));
            }
        }

        variants.push(ProductVariant {
            name,
            additional_price: fields.additional_price,
        });
    }
    Ok(variants)
}

/// Validate a candidate category, reporting the first violated constraint.
pub fn validate_category(
    name: Option<&str>,
    description: Option<&str>,
) -> Result<CategoryDraft, RuleViolation> {
    let name = name_rule(name)?;
    let description = description_rule(description)?;
    Ok(CategoryDraft { name, description })
}

/// Validate a candidate product, reporting the first violated constraint.
pub fn validate_product(
    name: Option<&str>,
    description: Option<&str>,
    price: Option<Decimal>,
    category: Option<&str>,
    stock: Option<i64>,
    variants: Option<&[VariantFields]>,
) -> Result<ProductDraft, RuleViolation> {
    let name = name_rule(name)?;
    let description = description_rule(description)?;
    let price = price_rule(price)?;
    let category_id = category_ref_rule(category)?;
    let stock = stock_rule(stock)?;
    let variants = variants_rule(variants)?;

    Ok(ProductDraft {
        name,
        description,
        price,
        category_id,
        stock,
        variants,
    })
}
