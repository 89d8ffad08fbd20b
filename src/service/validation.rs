//! Request validation: field bounds for horse payloads and list parameters.
//! Every failing field is reported, and nothing here touches the database.

use crate::error::{AppError, FieldError};
use crate::model::{HorseChanges, HorseFilter, HorsePatch, ListParams, ListQuery, NewHorse, Sort, MAX_LIMIT};

/// Length bounds in characters, not bytes.
#[derive(Clone, Copy, Debug)]
struct TextRule {
    min_length: usize,
    max_length: usize,
}

const NAME_RULE: TextRule = TextRule {
    min_length: 1,
    max_length: 255,
};

const COLOR_RULE: TextRule = TextRule {
    min_length: 1,
    max_length: 100,
};

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_create(body: &NewHorse) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "name", &body.name, NAME_RULE);
        check_positive(&mut errors, "radius", body.radius);
        check_text(&mut errors, "color", &body.color, COLOR_RULE);
        finish(errors)
    }

    /// Validate only the fields present in the patch. Explicit nulls are rejected.
    pub fn validate_patch(patch: HorsePatch) -> Result<HorseChanges, AppError> {
        let mut errors = Vec::new();
        let name = present(&mut errors, "name", patch.name);
        let radius = present(&mut errors, "radius", patch.radius);
        let color = present(&mut errors, "color", patch.color);
        if let Some(name) = &name {
            check_text(&mut errors, "name", name, NAME_RULE);
        }
        if let Some(radius) = radius {
            check_positive(&mut errors, "radius", radius);
        }
        if let Some(color) = &color {
            check_text(&mut errors, "color", color, COLOR_RULE);
        }
        finish(errors)?;
        Ok(HorseChanges { name, radius, color })
    }

    /// Range-check list parameters, then resolve `sort_by` against the allow-list.
    pub fn validate_list(params: ListParams) -> Result<ListQuery, AppError> {
        let mut errors = Vec::new();
        if params.skip < 0 {
            errors.push(FieldError::new("skip", "must be greater than or equal to 0"));
        }
        if !(1..=MAX_LIMIT).contains(&params.limit) {
            errors.push(FieldError::new(
                "limit",
                format!("must be between 1 and {}", MAX_LIMIT),
            ));
        }
        if params.name.as_deref().is_some_and(|n| n.contains('\0')) {
            errors.push(nul_error("name"));
        }
        if let Some(min) = params.min_radius {
            check_positive(&mut errors, "min_radius", min);
        }
        if let Some(max) = params.max_radius {
            check_positive(&mut errors, "max_radius", max);
        }
        finish(errors)?;

        let field = params.sort_by.parse()?;
        Ok(ListQuery {
            skip: params.skip,
            limit: params.limit,
            filter: HorseFilter {
                name_contains: params.name.filter(|n| !n.is_empty()),
                min_radius: params.min_radius,
                max_radius: params.max_radius,
            },
            sort: Sort {
                field,
                order: params.sort_order,
            },
        })
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn present<T>(errors: &mut Vec<FieldError>, field: &str, value: Option<Option<T>>) -> Option<T> {
    match value {
        Some(None) => {
            errors.push(FieldError::new(field, "must not be null"));
            None
        }
        Some(v) => v,
        None => None,
    }
}

fn check_text(errors: &mut Vec<FieldError>, field: &str, value: &str, rule: TextRule) {
    let len = value.chars().count();
    if value.contains('\0') {
        errors.push(nul_error(field));
    } else if len < rule.min_length {
        errors.push(FieldError::new(
            field,
            format!("must be at least {} characters", rule.min_length),
        ));
    } else if len > rule.max_length {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", rule.max_length),
        ));
    }
}

/// PostgreSQL text cannot hold U+0000.
fn nul_error(field: &str) -> FieldError {
    FieldError::new(field, "must not contain NUL characters")
}

fn check_positive(errors: &mut Vec<FieldError>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(FieldError::new(field, "must be a finite number"));
    } else if value <= 0.0 {
        errors.push(FieldError::new(field, "must be greater than 0"));
    }
}
