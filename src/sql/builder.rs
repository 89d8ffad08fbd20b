//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for the horses table.

use super::PgBindValue;
use crate::model::{HorseChanges, NewHorse};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const HORSES_TABLE: &str = "spherical_horses";

/// Column order of every statement that returns a horse row.
pub const HORSE_COLUMNS: [&str; 6] = ["id", "name", "radius", "color", "created_at", "updated_at"];

/// Quote identifier for PostgreSQL (safe: only from constants and the sort allow-list).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub(crate) fn horses_table() -> String {
    quoted(HORSES_TABLE)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    pub(crate) fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Appends a value and returns its `$n` placeholder.
    pub(crate) fn push_param(&mut self, v: impl Into<PgBindValue>) -> String {
        self.params.push(v.into());
        format!("${}", self.params.len())
    }
}

pub(crate) fn select_column_list() -> String {
    HORSE_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT one horse by id.
pub fn select_by_id(id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(),
        horses_table(),
        quoted("id"),
        ph
    );
    q
}

/// INSERT a new horse. `created_at` and `updated_at` share one parameter so they are equal.
pub fn insert(id: Uuid, horse: &NewHorse, now: DateTime<Utc>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = [
        q.push_param(id),
        q.push_param(horse.name.clone()),
        q.push_param(horse.radius),
        q.push_param(horse.color.clone()),
    ];
    let ts = q.push_param(now);
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}, {}, {}) RETURNING {}",
        horses_table(),
        select_column_list(),
        placeholders.join(", "),
        ts,
        ts,
        select_column_list()
    );
    q
}

/// UPDATE by id: SET only the supplied fields, always refresh `updated_at`.
/// `updated_at` moves forward by at least one microsecond even if the clock has not.
pub fn update(id: Uuid, changes: &HorseChanges, now: DateTime<Utc>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(name) = &changes.name {
        let ph = q.push_param(name.clone());
        sets.push(format!("{} = {}", quoted("name"), ph));
    }
    if let Some(radius) = changes.radius {
        let ph = q.push_param(radius);
        sets.push(format!("{} = {}", quoted("radius"), ph));
    }
    if let Some(color) = &changes.color {
        let ph = q.push_param(color.clone());
        sets.push(format!("{} = {}", quoted("color"), ph));
    }
    let ts = q.push_param(now);
    let updated_at = quoted("updated_at");
    sets.push(format!(
        "{} = GREATEST({}, {} + INTERVAL '1 microsecond')",
        updated_at, ts, updated_at
    ));
    let id_ph = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        horses_table(),
        sets.join(", "),
        quoted("id"),
        id_ph,
        select_column_list()
    );
    q
}

/// DELETE by id, returning the id when a row was removed.
pub fn delete(id: Uuid) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        horses_table(),
        quoted("id"),
        ph,
        quoted("id")
    );
    q
}
