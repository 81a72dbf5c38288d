//! A JSONPath query evaluation engine, walking an in-memory JSON document
//! with an already-parsed query syntax tree and producing the ordered list
//! of matching nodes.
//!
//! Lexing and parsing are external concerns: a [`Query`] is built from
//! [`Step`]s and [`Predicate`]s by whatever parser produced it, and the
//! engine trusts its structure.
//!
//! ## Evaluating a query
//!
//! Documents are accepted in either of two object representations: the
//! crate's own [`Value`], which keeps object members as an ordered pair
//! sequence (duplicate keys allowed, first match wins), or a
//! [`serde_json::Value`] mapping, which is normalized into the ordered form
//! on the way in and denormalized on the way out.
//!
//! ```
//! use jsonpath_exec::{execute_json, JSONPathError, Predicate, Query, Step};
//! use serde_json::json;
//!
//! fn main() -> Result<(), JSONPathError> {
//!     let document = json!({"users": [{"name": "Sue"}, {"name": "John"}]});
//!
//!     let query = Query::new(vec![
//!         Step::Child(Predicate::Key("users".to_string())),
//!         Step::Child(Predicate::Wildcard),
//!         Step::Child(Predicate::Key("name".to_string())),
//!     ]);
//!
//!     let rv = execute_json(&query, &document)?;
//!     assert_eq!(rv, vec![json!("Sue"), json!("John")]);
//!     Ok(())
//! }
//! ```
//!
//! ## Filters and scripts
//!
//! Computed predicates embed a [`Script`]: literals, comparisons, calls into
//! a caller-supplied function register and re-entrant relative paths.
//!
//! ```
//! use jsonpath_exec::{execute_json, JSONPathError, Predicate, Query, Script, Step};
//! use serde_json::json;
//!
//! fn main() -> Result<(), JSONPathError> {
//!     let query = Query::new(vec![Step::Child(Predicate::FilterExpr(
//!         Script::Comparison {
//!             left: Box::new(Script::CurrentNode),
//!             operator: ">".to_string(),
//!             right: Box::new(Script::Int { value: 2 }),
//!         },
//!     ))]);
//!
//!     let rv = execute_json(&query, &json!([1, 2, 3, 4]))?;
//!     assert_eq!(rv, vec![json!(3), json!(4)]);
//!     Ok(())
//! }
//! ```
//!
//! A query is displayed in its canonical form when printed.

pub mod ast;
pub mod engine;
pub mod env;
pub mod errors;
pub mod function;
pub mod standard_functions;
pub mod value;

pub use ast::{NodeList, Predicate, Query, Script, ScriptResult, Step};
pub use engine::{execute, execute_json, execute_json_with_environment, execute_with_environment};
pub use env::Environment;
pub use errors::{JSONPathError, JSONPathErrorType};
pub use function::{FunctionRegister, FunctionResult, PathFunction};
pub use value::{is_truthy, Kind, Lookup, Number, Value};
