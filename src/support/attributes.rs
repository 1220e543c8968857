//! Attribute storage, casting and dirty tracking.
//!
//! Models keep the JSON exactly as the API sent it and only cast on read.
//! The one exception is date-time fields: values written into them are
//! normalised to the integer epoch the API expects.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Number, Value as Json};

use crate::support::collection::Collection;
use crate::support::model::Model;

/// Epoch precision of a timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Epoch milliseconds (the ClickUp default).
    Milliseconds,
    /// Epoch seconds.
    Seconds,
}

/// Read-time conversion applied to a raw attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cast {
    Boolean,
    Integer,
    Float,
    String,
    DateTime(Precision),
}

impl Cast {
    /// Convert a raw JSON value into its cast form.
    ///
    /// Values that cannot be converted read as [`Value::Null`].
    #[must_use]
    pub fn apply(self, raw: &Json) -> Value {
        if raw.is_null() {
            return Value::Null;
        }

        match self {
            Self::Boolean => Value::Bool(to_bool(raw)),
            Self::Integer => to_i64(raw).map_or(Value::Null, Value::Integer),
            Self::Float => to_f64(raw).map_or(Value::Null, Value::Float),
            Self::String => Value::String(to_string(raw)),
            Self::DateTime(precision) => to_datetime(raw, precision).map_or(Value::Null, Value::DateTime),
        }
    }

    /// Convert a value into its storage form before it is written.
    #[must_use]
    pub fn store(self, value: Value) -> Json {
        match (self, value) {
            (Self::DateTime(precision), Value::DateTime(dt)) => epoch(dt, precision),
            (Self::DateTime(precision), Value::String(s)) => match DateTime::parse_from_rfc3339(&s) {
                Ok(dt) => epoch(dt.with_timezone(&Utc), precision),
                Err(_) => Json::String(s),
            },
            (_, value) => value.into_json(),
        }
    }

    /// Whether two raw values are the same once cast.
    #[must_use]
    pub fn equivalent(self, a: &Json, b: &Json) -> bool {
        a == b || (!a.is_null() && !b.is_null() && self.apply(a) == self.apply(b))
    }
}

fn epoch(dt: DateTime<Utc>, precision: Precision) -> Json {
    match precision {
        Precision::Milliseconds => Json::from(dt.timestamp_millis()),
        Precision::Seconds => Json::from(dt.timestamp()),
    }
}

fn to_bool(raw: &Json) -> bool {
    match raw {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Json::String(s) => !matches!(s.as_str(), "" | "0" | "false"),
        Json::Array(items) => !items.is_empty(),
        Json::Object(_) => true,
    }
}

fn to_i64(raw: &Json) -> Option<i64> {
    match raw {
        Json::Bool(b) => Some(i64::from(*b)),
        Json::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Json::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn to_f64(raw: &Json) -> Option<f64> {
    match raw {
        Json::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_string(raw: &Json) -> String {
    match raw {
        Json::String(s) => s.clone(),
        Json::Bool(true) => "1".to_string(),
        Json::Bool(false) | Json::Null => String::new(),
        other => other.to_string(),
    }
}

fn to_datetime(raw: &Json, precision: Precision) -> Option<DateTime<Utc>> {
    let from_epoch = |value: i64| match precision {
        Precision::Milliseconds => Utc.timestamp_millis_opt(value).single(),
        Precision::Seconds => Utc.timestamp_opt(value, 0).single(),
    };

    match raw {
        Json::Number(n) => n.as_i64().and_then(from_epoch),
        Json::String(s) => match s.trim().parse::<i64>() {
            Ok(value) => from_epoch(value),
            Err(_) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        },
        _ => None,
    }
}

/// The value as a path segment, or `None` when it is null, empty, zero
/// or false.
pub(crate) fn key_segment(raw: &Json) -> Option<String> {
    match raw {
        Json::Null | Json::Bool(false) => None,
        Json::String(s) if s.is_empty() || s == "0" => None,
        Json::Number(n) if n.as_f64() == Some(0.0) => None,
        Json::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// An attribute as seen by callers: cast, materialised or raw.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    /// Uncast arrays and objects.
    Json(Json),
    Model(Box<Model>),
    Collection(Collection),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Convert into the JSON shape the API speaks.
    ///
    /// Date-times become epoch milliseconds.
    #[must_use]
    pub fn into_json(self) -> Json {
        match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(b),
            Self::Integer(i) => Json::from(i),
            Self::Float(f) => Number::from_f64(f).map_or(Json::Null, Json::Number),
            Self::String(s) => Json::String(s),
            Self::DateTime(dt) => Json::from(dt.timestamp_millis()),
            Self::Json(json) => json,
            Self::Model(model) => model.to_json(),
            Self::Collection(collection) => collection.into(),
        }
    }
}

impl From<Json> for Value {
    fn from(raw: Json) -> Self {
        match raw {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or(Self::Null, Self::Float),
            },
            Json::String(s) => Self::String(s),
            other => Self::Json(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        Self::Model(Box::new(model))
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Self::Collection(collection)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Raw attribute storage with a synced snapshot for dirty tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    current: Map<String, Json>,
    original: Map<String, Json>,
    changes: Map<String, Json>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Json> {
        self.current.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.current.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Json) {
        self.current.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Json> {
        self.current.remove(key)
    }

    pub fn current(&self) -> &Map<String, Json> {
        &self.current
    }

    pub fn original(&self) -> &Map<String, Json> {
        &self.original
    }

    /// Fields sent by the last successful update.
    pub fn changes(&self) -> &Map<String, Json> {
        &self.changes
    }

    /// Replace every attribute, optionally making them the new baseline.
    pub fn replace(&mut self, attributes: Map<String, Json>, sync: bool) {
        self.current = attributes;
        if sync {
            self.sync_original();
        }
    }

    pub fn sync_original(&mut self) {
        self.original = self.current.clone();
    }

    /// Record the dirty fields as the latest changes.
    pub fn sync_changes(&mut self, cast: impl Fn(&str) -> Option<Cast>) {
        self.changes = self.dirty(cast);
    }

    /// Attributes whose current value differs from the synced snapshot.
    pub fn dirty(&self, cast: impl Fn(&str) -> Option<Cast>) -> Map<String, Json> {
        self.current
            .iter()
            .filter(|(key, value)| match self.original.get(key.as_str()) {
                None => true,
                Some(original) => match cast(key) {
                    Some(cast) => !cast.equivalent(value, original),
                    None => *value != original,
                },
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_cast() {
        assert_eq!(Cast::Boolean.apply(&json!(true)), Value::Bool(true));
        assert_eq!(Cast::Boolean.apply(&json!(0)), Value::Bool(false));
        assert_eq!(Cast::Boolean.apply(&json!("1")), Value::Bool(true));
        assert_eq!(Cast::Boolean.apply(&json!("")), Value::Bool(false));
        assert_eq!(Cast::Boolean.apply(&Json::Null), Value::Null);
    }

    #[test]
    fn test_numeric_casts_accept_strings() {
        assert_eq!(Cast::Integer.apply(&json!("123")), Value::Integer(123));
        assert_eq!(Cast::Integer.apply(&json!(4.9)), Value::Integer(4));
        assert_eq!(Cast::Integer.apply(&json!("abc")), Value::Null);
        assert_eq!(Cast::Float.apply(&json!("1.50")), Value::Float(1.5));
        assert_eq!(Cast::Float.apply(&json!(2)), Value::Float(2.0));
    }

    #[test]
    fn test_string_cast() {
        assert_eq!(Cast::String.apply(&json!(42)), Value::String("42".into()));
        assert_eq!(Cast::String.apply(&json!("x")), Value::String("x".into()));
    }

    #[test]
    fn test_datetime_cast_from_epoch_millis() {
        let value = Cast::DateTime(Precision::Milliseconds).apply(&json!("1567780450202"));
        let dt = value.as_datetime().expect("datetime");
        assert_eq!(dt.timestamp_millis(), 1_567_780_450_202);

        let value = Cast::DateTime(Precision::Milliseconds).apply(&json!(1_567_780_450_202_i64));
        assert_eq!(value.as_datetime().unwrap().timestamp(), 1_567_780_450);
    }

    #[test]
    fn test_datetime_cast_from_epoch_seconds() {
        let value = Cast::DateTime(Precision::Seconds).apply(&json!(1_567_780_450));
        assert_eq!(value.as_datetime().unwrap().timestamp(), 1_567_780_450);
    }

    #[test]
    fn test_datetime_cast_from_rfc3339() {
        let value = Cast::DateTime(Precision::Milliseconds).apply(&json!("2019-09-06T14:34:10Z"));
        assert_eq!(value.as_datetime().unwrap().timestamp(), 1_567_780_450);
    }

    #[test]
    fn test_datetime_store_normalises_to_epoch() {
        let dt = Utc.timestamp_millis_opt(1_567_780_450_202).unwrap();
        assert_eq!(
            Cast::DateTime(Precision::Milliseconds).store(Value::DateTime(dt)),
            json!(1_567_780_450_202_i64)
        );
        assert_eq!(
            Cast::DateTime(Precision::Seconds).store(Value::DateTime(dt)),
            json!(1_567_780_450)
        );
        assert_eq!(
            Cast::DateTime(Precision::Seconds).store(Value::from("2019-09-06T14:34:10Z")),
            json!(1_567_780_450)
        );
    }

    #[test]
    fn test_dirty_tracking() {
        let mut attributes = Attributes::new();
        attributes.set("name", json!("first"));
        attributes.set("count", json!(1));
        attributes.sync_original();
        assert!(attributes.dirty(|_| None).is_empty());

        attributes.set("name", json!("second"));
        let dirty = attributes.dirty(|_| None);
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty["name"], json!("second"));
    }

    #[test]
    fn test_dirty_tracking_is_cast_aware() {
        let mut attributes = Attributes::new();
        attributes.set("count", json!("1"));
        attributes.sync_original();

        attributes.set("count", json!(1));
        assert!(attributes
            .dirty(|key| (key == "count").then_some(Cast::Integer))
            .is_empty());
        assert_eq!(attributes.dirty(|_| None).len(), 1);
    }

    #[test]
    fn test_sync_changes_records_dirty_fields() {
        let mut attributes = Attributes::new();
        attributes.set("a", json!(1));
        attributes.sync_original();
        attributes.set("a", json!(2));
        attributes.set("b", json!(3));

        attributes.sync_changes(|_| None);
        assert_eq!(attributes.changes().len(), 2);
    }

    #[test]
    fn test_value_from_json() {
        assert_eq!(Value::from(json!(1)), Value::Integer(1));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!("s")), Value::String("s".into()));
        assert_eq!(Value::from(json!([1])), Value::Json(json!([1])));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }
}
