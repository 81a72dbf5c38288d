use std::{num::NonZeroUsize, sync::Mutex};

use lru::LruCache;
use regex::Regex;

use crate::{
    function::{FunctionResult, PathFunction},
    value::{Number, Value},
};

/// Number of child values of the current node.
pub struct Count;

impl Count {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Count {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFunction for Count {
    fn call(&self, current: &Value, _root: &Value, _args: &[Value]) -> FunctionResult {
        let count = match current {
            Value::Array(elements) => elements.len(),
            Value::Object(members) => members.len(),
            _ => 0,
        };

        FunctionResult::Value(Value::Number(Number::Int(count as i64)))
    }
}

/// The keys of the current object, in member order. Duplicate keys appear
/// as often as they occur.
pub struct Keys;

impl Keys {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFunction for Keys {
    fn call(&self, current: &Value, _root: &Value, _args: &[Value]) -> FunctionResult {
        match current {
            Value::Object(members) => FunctionResult::Values(
                members
                    .iter()
                    .map(|(key, _)| Value::String(key.clone()))
                    .collect(),
            ),
            _ => FunctionResult::Values(Vec::new()),
        }
    }
}

pub struct Length;

impl Length {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFunction for Length {
    fn call(&self, current: &Value, _root: &Value, _args: &[Value]) -> FunctionResult {
        match current {
            Value::String(s) => {
                FunctionResult::Value(Value::Number(Number::Int(s.chars().count() as i64)))
            }
            Value::Array(elements) => {
                FunctionResult::Value(Value::Number(Number::Int(elements.len() as i64)))
            }
            Value::Object(members) => {
                FunctionResult::Value(Value::Number(Number::Int(members.len() as i64)))
            }
            _ => FunctionResult::Value(Value::Null),
        }
    }
}

/// Whether the whole of the current string matches the pattern given as the
/// first argument.
pub struct Match {
    cache: Mutex<LruCache<String, Regex>>,
}

impl Match {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(LruCache::new(NonZeroUsize::new(100).unwrap())),
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFunction for Match {
    fn call(&self, current: &Value, _root: &Value, args: &[Value]) -> FunctionResult {
        let rv = match (current, args.first()) {
            (Value::String(s), Some(Value::String(pattern))) => {
                regex_is_match(&self.cache, pattern, &full_match(pattern), s)
            }
            _ => false,
        };

        FunctionResult::Value(Value::Bool(rv))
    }
}

/// Whether any part of the current string matches the pattern given as the
/// first argument.
pub struct Search {
    cache: Mutex<LruCache<String, Regex>>,
}

impl Search {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(LruCache::new(NonZeroUsize::new(100).unwrap())),
        }
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFunction for Search {
    fn call(&self, current: &Value, _root: &Value, args: &[Value]) -> FunctionResult {
        let rv = match (current, args.first()) {
            (Value::String(s), Some(Value::String(pattern))) => {
                regex_is_match(&self.cache, pattern, pattern, s)
            }
            _ => false,
        };

        FunctionResult::Value(Value::Bool(rv))
    }
}

// `pattern` is the surface pattern used for the I-Regexp check and as the
// cache key; `compiled` is what actually gets compiled.
fn regex_is_match(
    cache: &Mutex<LruCache<String, Regex>>,
    pattern: &str,
    compiled: &str,
    s: &str,
) -> bool {
    let mut cache = cache.lock().unwrap();

    match cache.get(pattern) {
        Some(re) => re.is_match(s),
        None => {
            if !iregexp::check(pattern) {
                return false;
            }

            if let Ok(re) = Regex::new(compiled) {
                let rv = re.is_match(s);
                cache.push(pattern.to_owned(), re);
                rv
            } else {
                false
            }
        }
    }
}

fn full_match(pattern: &str) -> String {
    if !pattern.starts_with('^') && !pattern.ends_with('$') {
        format!("^(?:{})$", pattern)
    } else {
        pattern.to_owned()
    }
}
