//! # Selector Predicates
//!
//! A small subset of the Mango selector language understood by document
//! ledgers:
//!
//! ```text
//! {"selector": {"docType": "unit", "currentOwnerOrg": {"$in": ["Org1", "Org2"]}}}
//! ```
//!
//! Supported forms:
//!
//! | Form | Meaning |
//! |------|---------|
//! | `"field": value` | equality |
//! | `"field": {"$eq": v}` / `{"$ne": v}` | equality / inequality |
//! | `"field": {"$in": [..]}` | membership |
//! | `"field": {"$exists": bool}` | presence |
//! | `"$and": [sel, ..]` / `"$or": [sel, ..]` | combinators |
//!
//! Dotted field names (`"a.b"`) address nested objects.

use serde_json::{Map, Value};
use shared_types::LedgerError;

/// A parsed selector, ready to match documents.
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    root: Map<String, Value>,
}

impl Selector {
    /// Parse a predicate string of the form `{"selector": {...}}`.
    pub fn parse(predicate: &str) -> Result<Self, LedgerError> {
        let value: Value = serde_json::from_str(predicate)
            .map_err(|e| LedgerError::InvalidPredicate(e.to_string()))?;

        let root = match value {
            Value::Object(mut outer) => match outer.remove("selector") {
                Some(Value::Object(selector)) => selector,
                Some(_) => {
                    return Err(LedgerError::InvalidPredicate(
                        "\"selector\" must be an object".to_string(),
                    ))
                }
                None => {
                    return Err(LedgerError::InvalidPredicate(
                        "missing \"selector\"".to_string(),
                    ))
                }
            },
            _ => {
                return Err(LedgerError::InvalidPredicate(
                    "predicate must be a JSON object".to_string(),
                ))
            }
        };

        validate_clauses(&root)?;
        Ok(Self { root })
    }

    /// True if `document` satisfies every clause.
    pub fn matches(&self, document: &Value) -> bool {
        matches_clauses(&self.root, document)
    }
}

fn validate_clauses(clauses: &Map<String, Value>) -> Result<(), LedgerError> {
    for (field, condition) in clauses {
        match field.as_str() {
            "$and" | "$or" => {
                let Value::Array(branches) = condition else {
                    return Err(LedgerError::InvalidPredicate(format!(
                        "{field} expects an array"
                    )));
                };
                for branch in branches {
                    let Value::Object(branch) = branch else {
                        return Err(LedgerError::InvalidPredicate(format!(
                            "{field} branches must be objects"
                        )));
                    };
                    validate_clauses(branch)?;
                }
            }
            other if other.starts_with('$') => {
                return Err(LedgerError::InvalidPredicate(format!(
                    "unsupported combinator {other}"
                )));
            }
            _ => {
                if let Value::Object(ops) = condition {
                    for (op, operand) in ops {
                        match op.as_str() {
                            "$eq" | "$ne" => {}
                            "$in" if operand.is_array() => {}
                            "$exists" if operand.is_boolean() => {}
                            _ => {
                                return Err(LedgerError::InvalidPredicate(format!(
                                    "unsupported operator {op} on {field}"
                                )))
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn matches_clauses(clauses: &Map<String, Value>, document: &Value) -> bool {
    clauses.iter().all(|(field, condition)| match field.as_str() {
        "$and" => branches(condition).all(|branch| matches_clauses(branch, document)),
        "$or" => branches(condition).any(|branch| matches_clauses(branch, document)),
        _ => matches_condition(lookup(document, field), condition),
    })
}

fn branches(condition: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    condition
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn matches_condition(actual: Option<&Value>, condition: &Value) -> bool {
    match condition {
        Value::Object(ops) => ops.iter().all(|(op, operand)| match op.as_str() {
            "$eq" => actual == Some(operand),
            "$ne" => actual != Some(operand),
            "$in" => actual.is_some_and(|value| {
                operand
                    .as_array()
                    .is_some_and(|candidates| candidates.contains(value))
            }),
            "$exists" => operand.as_bool() == Some(actual.is_some()),
            _ => false,
        }),
        literal => actual == Some(literal),
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}
