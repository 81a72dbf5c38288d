//! Structs and enums that make up a JSONPath query syntax tree, and the
//! evaluation of such a tree against a document.
//!
//! A [`Query`] contains zero or more [`Step`]s, and each step carries one
//! [`Predicate`]. Computed predicates (indexes, filters and index lists)
//! embed a [`Script`], a small expression tree with its own recursive
//! evaluator.
//!
//! Queries arrive here already parsed. The engine trusts the tree's
//! structure and does not re-validate it, though a query may still name an
//! unregistered function, an operator or a slice step outside the supported
//! set; those fail the whole evaluation. Implementers of external parsers
//! are expected to bound expression depth, as evaluation recurses through
//! nested relative paths.

use itertools::Itertools;
use std::{
    cmp,
    fmt::{self, Write},
};

use crate::{
    env::Environment,
    errors::JSONPathError,
    function::FunctionResult,
    value::{is_truthy, Lookup, Number, Value},
};

pub type NodeList<'a> = Vec<&'a Value>;

struct EvalContext<'a, 'b> {
    root: &'a Value,
    env: &'b Environment,
}

#[derive(Debug)]
pub struct Query {
    pub steps: Vec<Step>,
}

impl Query {
    pub fn new(steps: Vec<Step>) -> Self {
        Query { steps }
    }

    /// Evaluate this query against `document`, returning matched nodes in
    /// order. Multiple branches matching the same node yield duplicates.
    pub fn resolve<'a>(
        &self,
        document: &'a Value,
        env: &Environment,
    ) -> Result<NodeList<'a>, JSONPathError> {
        let context = EvalContext {
            root: document,
            env,
        };

        resolve_steps(&self.steps, vec![document], &context)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}",
            self.steps
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>()
                .join("")
        )
    }
}

/// Fold `steps` over `nodes`, one step at a time. Outer order follows the
/// incoming node order and inner order follows each predicate's own result
/// order. An empty set propagates through all remaining steps.
fn resolve_steps<'a>(
    steps: &[Step],
    nodes: NodeList<'a>,
    context: &EvalContext<'a, '_>,
) -> Result<NodeList<'a>, JSONPathError> {
    steps
        .iter()
        .try_fold(nodes, |nodes, step| step.resolve(nodes, context))
}

#[derive(Debug)]
pub enum Step {
    Child(Predicate),
}

impl Step {
    fn resolve<'a>(
        &self,
        nodes: NodeList<'a>,
        context: &EvalContext<'a, '_>,
    ) -> Result<NodeList<'a>, JSONPathError> {
        match self {
            Step::Child(predicate) => nodes
                .into_iter()
                .map(|node| predicate.resolve(node, context))
                .flatten_ok()
                .filter_map_ok(|lookup| match lookup {
                    Lookup::Found(value) => Some(value),
                    Lookup::Missing => None,
                })
                .collect(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Child(predicate) => write!(f, "[{predicate}]"),
        }
    }
}

#[derive(Debug)]
pub enum Predicate {
    Key(String),
    IndexExpr(Script),
    FilterExpr(Script),
    IndexList(Vec<Script>),
    Slice { begin: i64, end: i64, step: i64 },
    Wildcard,
}

impl Predicate {
    /// Apply this predicate to a single node, producing its matched
    /// children. `Missing` entries mark index-list keys that found nothing;
    /// the step fold filters them out.
    fn resolve<'a>(
        &self,
        node: &'a Value,
        context: &EvalContext<'a, '_>,
    ) -> Result<Vec<Lookup<'a>>, JSONPathError> {
        match self {
            Predicate::Key(key) => Ok(match node.get_key(key) {
                found @ Lookup::Found(..) => vec![found],
                Lookup::Missing => Vec::new(),
            }),
            Predicate::IndexExpr(script) => match node {
                Value::Object(..) => {
                    let computed = script.evaluate(node, context)?;
                    Ok(match computed.as_singular().and_then(Value::as_str) {
                        Some(key) => match node.get_key(key) {
                            found @ Lookup::Found(..) => vec![found],
                            Lookup::Missing => Vec::new(),
                        },
                        None => Vec::new(),
                    })
                }
                Value::Array(elements) => {
                    select_elements(elements, std::slice::from_ref(script), node, context)
                }
                _ => Ok(Vec::new()),
            },
            Predicate::FilterExpr(script) => match node {
                Value::Object(members) => members
                    .iter()
                    .map(|(_, value)| script.evaluate(value, context).map(|rv| (value, rv)))
                    .filter_ok(|(_, rv)| rv.is_truthy())
                    .map_ok(|(value, _)| Lookup::Found(value))
                    .collect(),
                Value::Array(elements) => elements
                    .iter()
                    .map(|element| script.evaluate(element, context).map(|rv| (element, rv)))
                    .filter_ok(|(_, rv)| rv.is_truthy())
                    .map_ok(|(element, _)| Lookup::Found(element))
                    .collect(),
                _ => Ok(Vec::new()),
            },
            Predicate::IndexList(scripts) => match node {
                Value::Object(..) => {
                    let mut selected = Vec::with_capacity(scripts.len());
                    for script in scripts {
                        let computed = script.evaluate(node, context)?;
                        // A key that finds nothing contributes a sentinel,
                        // not an empty list.
                        selected.push(match computed.as_singular().and_then(Value::as_str) {
                            Some(key) => node.get_key(key),
                            None => Lookup::Missing,
                        });
                    }
                    Ok(selected)
                }
                Value::Array(elements) => select_elements(elements, scripts, node, context),
                _ => Ok(Vec::new()),
            },
            Predicate::Slice { begin, end, step } => match node {
                Value::Array(elements) => {
                    if *step != 1 {
                        return Err(JSONPathError::unsupported_slice(*step));
                    }

                    let length = elements.len() as i64;
                    let begin = if *begin < 0 {
                        cmp::max(length + begin, 0)
                    } else {
                        *begin
                    };
                    let end = if *end < 0 {
                        cmp::min(length + end, length)
                    } else {
                        *end
                    };

                    // The resolved end is a count of elements, not an
                    // endpoint.
                    Ok(elements
                        .iter()
                        .skip(begin as usize)
                        .take(cmp::max(end, 0) as usize)
                        .map(Lookup::Found)
                        .collect())
                }
                _ => Ok(Vec::new()),
            },
            Predicate::Wildcard => match node {
                Value::Object(members) => {
                    Ok(members.iter().map(|(_, value)| Lookup::Found(value)).collect())
                }
                Value::Array(elements) => {
                    Ok(elements.iter().map(Lookup::Found).collect())
                }
                _ => Ok(Vec::new()),
            },
        }
    }
}

/// Select array elements by computed index, resolving negative indexes from
/// the end. Any index without a corresponding element empties the whole
/// selection, unlike the per-key sentinels of an object index list.
fn select_elements<'a>(
    elements: &'a [Value],
    scripts: &[Script],
    node: &'a Value,
    context: &EvalContext<'a, '_>,
) -> Result<Vec<Lookup<'a>>, JSONPathError> {
    let mut selected = Vec::with_capacity(scripts.len());

    for script in scripts {
        let computed = script.evaluate(node, context)?;
        let index = match computed.as_singular().and_then(Value::as_index) {
            Some(index) => index,
            None => return Ok(Vec::new()),
        };

        let resolved = if index < 0 {
            elements.len() as i64 + index
        } else {
            index
        };

        match usize::try_from(resolved).ok().and_then(|i| elements.get(i)) {
            Some(element) => selected.push(Lookup::Found(element)),
            None => return Ok(Vec::new()),
        }
    }

    Ok(selected)
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Key(key) => write!(f, "'{key}'"),
            Predicate::IndexExpr(script) => write!(f, "({script})"),
            Predicate::FilterExpr(script) => write!(f, "?{script}"),
            Predicate::IndexList(scripts) => {
                write!(
                    f,
                    "{}",
                    scripts
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
            Predicate::Slice { begin, end, step } => write!(f, "{begin}:{end}:{step}"),
            Predicate::Wildcard => f.write_char('*'),
        }
    }
}

#[derive(Debug)]
pub enum Script {
    String {
        value: String,
    },
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    /// A call into the function register. Arguments are opaque values
    /// carried by the query and passed through verbatim.
    Function {
        name: String,
        args: Vec<Value>,
    },
    /// The operator is carried as the parser's surface text. Exactly six are
    /// supported; anything else fails evaluation.
    Comparison {
        left: Box<Script>,
        operator: String,
        right: Box<Script>,
    },
    RelativePath {
        steps: Vec<Step>,
    },
    CurrentNode,
}

impl Script {
    fn evaluate<'a>(
        &self,
        current: &'a Value,
        context: &EvalContext<'a, '_>,
    ) -> Result<ScriptResult<'a>, JSONPathError> {
        match self {
            Script::String { value } => Ok(ScriptResult::Value(Value::String(value.clone()))),
            Script::Int { value } => Ok(ScriptResult::Value(Value::Number(Number::Int(*value)))),
            Script::Float { value } => {
                Ok(ScriptResult::Value(Value::Number(Number::Float(*value))))
            }
            Script::CurrentNode => Ok(ScriptResult::Nodes(vec![current])),
            Script::Function { name, args } => {
                let function = context
                    .env
                    .function_register
                    .get(name)
                    .ok_or_else(|| JSONPathError::unknown_function(name))?;

                Ok(match function.call(current, context.root, args) {
                    FunctionResult::Value(value) => ScriptResult::Value(value),
                    FunctionResult::Values(values) => ScriptResult::Values(values),
                })
            }
            Script::Comparison {
                left,
                operator,
                right,
            } => {
                let left = left.evaluate(current, context)?;
                let right = right.evaluate(current, context)?;
                Ok(ScriptResult::Value(Value::Bool(compare(
                    &left, operator, &right,
                )?)))
            }
            Script::RelativePath { steps } => Ok(ScriptResult::Nodes(resolve_steps(
                steps,
                vec![current],
                context,
            )?)),
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::String { value } => write!(f, "\"{value}\""),
            Script::Int { value } => write!(f, "{value}"),
            Script::Float { value } => write!(f, "{value}"),
            Script::Function { name, args } => {
                write!(
                    f,
                    "{}({})",
                    name,
                    args.iter()
                        .map(|a| a.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
            Script::Comparison {
                left,
                operator,
                right,
            } => write!(f, "{left} {operator} {right}"),
            Script::RelativePath { steps } => {
                write!(
                    f,
                    "@{}",
                    steps
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<String>>()
                        .join("")
                )
            }
            Script::CurrentNode => f.write_char('@'),
        }
    }
}

/// The result of evaluating a [`Script`]: a computed value, a computed
/// sequence from a function, or nodes borrowed from the document.
#[derive(Debug)]
pub enum ScriptResult<'a> {
    Value(Value),
    Values(Vec<Value>),
    Nodes(NodeList<'a>),
}

impl ScriptResult<'_> {
    /// The single value this result unwraps to, if any. Single-element
    /// sequences unwrap to their element; empty and multi-element sequences
    /// do not unwrap.
    fn as_singular(&self) -> Option<&Value> {
        match self {
            ScriptResult::Value(value) => Some(value),
            ScriptResult::Values(values) if values.len() == 1 => values.first(),
            ScriptResult::Nodes(nodes) if nodes.len() == 1 => nodes.first().copied(),
            _ => None,
        }
    }

    fn elements(&self) -> Vec<&Value> {
        match self {
            ScriptResult::Value(value) => vec![value],
            ScriptResult::Values(values) => values.iter().collect(),
            ScriptResult::Nodes(nodes) => nodes.iter().copied().collect(),
        }
    }

    /// Truthiness for filters: a singular result coerces by value, an empty
    /// sequence is false and a multi-element sequence is true.
    fn is_truthy(&self) -> bool {
        match self.as_singular() {
            Some(value) => is_truthy(value),
            None => !self.elements().is_empty(),
        }
    }
}

fn compare(
    left: &ScriptResult,
    operator: &str,
    right: &ScriptResult,
) -> Result<bool, JSONPathError> {
    match operator {
        "==" => Ok(eq(left, right)),
        "!=" => Ok(!eq(left, right)),
        "<" => Ok(lt(left, right)),
        ">" => Ok(lt(right, left)),
        ">=" => Ok(lt(right, left) || eq(left, right)),
        "<=" => Ok(lt(left, right) || eq(left, right)),
        _ => Err(JSONPathError::unsupported_operator(operator)),
    }
}

fn eq(left: &ScriptResult, right: &ScriptResult) -> bool {
    match (left.as_singular(), right.as_singular()) {
        (Some(left), Some(right)) => left == right,
        // Two sequences that do not unwrap compare as whole aggregates.
        (None, None) => {
            let left = left.elements();
            let right = right.elements();
            left.len() == right.len() && left.into_iter().zip(right).all(|(l, r)| l == r)
        }
        _ => false,
    }
}

fn lt(left: &ScriptResult, right: &ScriptResult) -> bool {
    match (left.as_singular(), right.as_singular()) {
        (Some(Value::Number(left)), Some(Value::Number(right))) => left < right,
        (Some(Value::String(left)), Some(Value::String(right))) => left < right,
        _ => false,
    }
}
