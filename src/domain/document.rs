//! Collection-oriented document model.
//!
//! Every resource lives in a named collection as a flat JSON object addressed
//! by a generated id. Queries support equality filters and a single ordering
//! field, which is all the resource handlers need.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::error::AppError;

/// Field map of a stored document (everything except its id).
pub type Fields = Map<String, Value>;

/// Named collections known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Institutions,
    Faculties,
    Courses,
    Companies,
    Jobs,
    JobApplications,
    Applications,
    Admissions,
    Admins,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 10] = [
        Collection::Institutions,
        Collection::Faculties,
        Collection::Courses,
        Collection::Companies,
        Collection::Jobs,
        Collection::JobApplications,
        Collection::Applications,
        Collection::Admissions,
        Collection::Admins,
        Collection::Users,
    ];

    /// Wire name of the collection as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Institutions => "institutions",
            Collection::Faculties => "faculties",
            Collection::Courses => "courses",
            Collection::Companies => "companies",
            Collection::Jobs => "jobs",
            Collection::JobApplications => "jobApplications",
            Collection::Applications => "applications",
            Collection::Admissions => "admissions",
            Collection::Admins => "admins",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: generated id plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Renders the document as `{ "id": ..., ...fields }`.
    pub fn into_value(self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert("id".to_string(), Value::String(self.id));
        map.extend(self.fields);
        Value::Object(map)
    }

    /// Decodes the document (id included) into a typed entity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the stored shape does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, AppError> {
        let id = self.id.clone();
        serde_json::from_value(self.into_value()).map_err(|e| {
            AppError::internal(
                format!("Malformed document {id}: {e}"),
                Value::Null,
            )
        })
    }

    /// Field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Serializes an entity or patch into storable fields, dropping `id`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if `value` does not serialize to an object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, AppError> {
    match serde_json::to_value(value)? {
        Value::Object(mut map) => {
            map.remove("id");
            Ok(map)
        }
        other => Err(AppError::internal(
            format!("Expected a JSON object, got {other}"),
            Value::Null,
        )),
    }
}

/// Equality filter on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        fields.get(&self.field) == Some(&self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Filters plus optional single-field ordering and limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(field, value));
        self
    }

    /// Adds the filter only when `value` is present.
    pub fn filter_opt(self, field: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.filter(field, value),
            None => self,
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        self.filters.iter().all(|f| f.matches(fields))
    }
}

/// Numeric counter on a parent document.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRef {
    pub collection: Collection,
    pub id: String,
    pub field: String,
}

/// Insert that must be unique on `unique_on` and bumps a parent counter.
///
/// Existence of the parent, the uniqueness check, the insert and the counter
/// increment happen as one atomic unit.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardedInsert {
    pub collection: Collection,
    pub data: Fields,
    pub unique_on: Vec<Filter>,
    pub counter: CounterRef,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardedOutcome {
    Inserted(Document),
    Duplicate,
    ParentMissing,
}

/// Total order over JSON values used for document ordering.
///
/// Nulls sort first, then booleans, numbers, strings; arrays and objects are
/// compared by their serialized form.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_collection_wire_names() {
        assert_eq!(Collection::JobApplications.as_str(), "jobApplications");
        assert_eq!(Collection::Institutions.to_string(), "institutions");
        assert_eq!(Collection::ALL.len(), 10);
    }

    #[test]
    fn test_into_value_puts_id_first() {
        let doc = Document::new("abc", fields(json!({"name": "NUL"})));
        assert_eq!(doc.into_value(), json!({"id": "abc", "name": "NUL"}));
    }

    #[test]
    fn test_decode_typed() {
        #[derive(Deserialize)]
        struct Named {
            id: String,
            name: String,
        }

        let doc = Document::new("abc", fields(json!({"name": "NUL"})));
        let named: Named = doc.decode().unwrap();
        assert_eq!(named.id, "abc");
        assert_eq!(named.name, "NUL");
    }

    #[test]
    fn test_decode_mismatch_is_internal() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            capacity: u32,
        }

        let doc = Document::new("abc", fields(json!({"capacity": "lots"})));
        let err = doc.decode::<Needs>().unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_to_fields_drops_id() {
        let map = to_fields(&json!({"id": "x", "title": "Engineer"})).unwrap();
        assert!(!map.contains_key("id"));
        assert_eq!(map["title"], "Engineer");
    }

    #[test]
    fn test_to_fields_rejects_non_objects() {
        assert!(to_fields(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_query_matches_all_filters() {
        let query = Query::new()
            .filter("jobId", "job-1")
            .filter("studentId", "stu-1");

        assert!(query.matches(&fields(json!({"jobId": "job-1", "studentId": "stu-1"}))));
        assert!(!query.matches(&fields(json!({"jobId": "job-1", "studentId": "stu-2"}))));
        assert!(!query.matches(&fields(json!({"jobId": "job-1"}))));
    }

    #[test]
    fn test_filter_opt_skips_none() {
        let query = Query::new().filter_opt("status", None::<String>);
        assert!(query.filters.is_empty());

        let query = Query::new().filter_opt("status", Some("active"));
        assert_eq!(query.filters, vec![Filter::eq("status", "active")]);
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(1), &json!(2.5)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&Value::Null, &json!(false)), Ordering::Less);
        assert_eq!(compare_values(&json!(10), &json!("1")), Ordering::Less);
    }
}
