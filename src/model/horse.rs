use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted spherical horse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Horse {
    pub id: Uuid,
    #[schema(example = "Буцефал")]
    pub name: String,
    /// Sphere radius in meters.
    #[schema(example = 1.5)]
    pub radius: f64,
    #[schema(example = "white")]
    pub color: String,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "super::timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /horses/`. Bounds are checked by `RequestValidator::validate_create`.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct NewHorse {
    #[schema(min_length = 1, max_length = 255, example = "Буцефал")]
    pub name: String,
    #[schema(exclusive_minimum = 0.0, example = 1.5)]
    pub radius: f64,
    #[schema(min_length = 1, max_length = 100, example = "white")]
    pub color: String,
}

/// Body of `PATCH /horses/{id}`.
///
/// Absent keys are left untouched. An explicit `null` is kept apart from an absent key
/// (`Some(None)`) so it can be rejected: none of the columns are nullable.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct HorsePatch {
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, min_length = 1, max_length = 255)]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<f64>, exclusive_minimum = 0.0)]
    pub radius: Option<Option<f64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, min_length = 1, max_length = 100)]
    pub color: Option<Option<String>>,
}

/// Validated subset of fields to overwrite.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorseChanges {
    pub name: Option<String>,
    pub radius: Option<f64>,
    pub color: Option<String>,
}

impl HorseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.radius.is_none() && self.color.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn patch_tells_null_from_absent() {
        let patch: HorsePatch = serde_json::from_str(r#"{"name": null, "radius": 2.0}"#).unwrap();
        assert_eq!(patch.name, Some(None));
        assert_eq!(patch.radius, Some(Some(2.0)));
        assert_eq!(patch.color, None);
    }

    #[test]
    fn horse_serializes_with_string_id_and_offset_timestamps() {
        let t = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let horse = Horse {
            id: Uuid::nil(),
            name: "X".into(),
            radius: 1.5,
            color: "white".into(),
            created_at: t,
            updated_at: t,
        };
        let v = serde_json::to_value(&horse).unwrap();
        assert_eq!(v["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(v["radius"], 1.5);
        assert_eq!(v["created_at"], "2025-01-02T03:04:05.000000+00:00");

        let back: Horse = serde_json::from_value(v).unwrap();
        assert_eq!(back, horse);
    }
}
