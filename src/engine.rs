use crate::{
    ast::{NodeList, Query},
    env::Environment,
    errors::JSONPathError,
    value::Value,
};
use lazy_static::lazy_static;

lazy_static! {
    static ref ENV: Environment = Environment::new();
}

/// Evaluate `query` against a document in the ordered pair representation,
/// using the standard function environment.
pub fn execute<'a>(query: &Query, document: &'a Value) -> Result<NodeList<'a>, JSONPathError> {
    query.resolve(document, &ENV)
}

pub fn execute_with_environment<'a>(
    query: &Query,
    document: &'a Value,
    env: &Environment,
) -> Result<NodeList<'a>, JSONPathError> {
    query.resolve(document, env)
}

/// Same as `execute`, but accepts a document in the unordered mapping
/// representation and converts every result back to it.
pub fn execute_json(
    query: &Query,
    document: &serde_json::Value,
) -> Result<Vec<serde_json::Value>, JSONPathError> {
    execute_json_with_environment(query, document, &ENV)
}

pub fn execute_json_with_environment(
    query: &Query,
    document: &serde_json::Value,
    env: &Environment,
) -> Result<Vec<serde_json::Value>, JSONPathError> {
    let document = Value::from(document);
    let nodes = query.resolve(&document, env)?;
    Ok(nodes.into_iter().map(serde_json::Value::from).collect())
}
