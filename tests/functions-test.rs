use jsonpath_exec::{
    execute_json, execute_json_with_environment, Environment, FunctionResult, Number, PathFunction,
    Predicate, Query, Script, Step, Value,
};
use serde_json::json;

fn filter(script: Script) -> Query {
    Query::new(vec![Step::Child(Predicate::FilterExpr(script))])
}

fn call(name: &str, args: Vec<Value>) -> Script {
    Script::Function {
        name: name.to_string(),
        args,
    }
}

fn compare(left: Script, operator: &str, right: Script) -> Script {
    Script::Comparison {
        left: Box::new(left),
        operator: operator.to_string(),
        right: Box::new(right),
    }
}

mod standard {
    use super::*;

    #[test]
    fn length_of_strings() {
        let doc = json!(["a", "abc", "ab"]);
        let query = filter(compare(
            call("length", vec![]),
            ">",
            Script::Int { value: 1 },
        ));
        assert_eq!(
            execute_json(&query, &doc).unwrap(),
            vec![json!("abc"), json!("ab")]
        );
    }

    #[test]
    fn length_of_a_scalar_is_null() {
        // Null never satisfies an ordering comparison.
        let doc = json!([1, 2, 3]);
        let query = filter(compare(
            call("length", vec![]),
            ">",
            Script::Int { value: 0 },
        ));
        assert!(execute_json(&query, &doc).unwrap().is_empty());
    }

    #[test]
    fn count_of_children() {
        let doc = json!([[1], [1, 2], [], {"a": 1, "b": 2}]);
        let query = filter(compare(
            call("count", vec![]),
            ">=",
            Script::Int { value: 2 },
        ));
        assert_eq!(
            execute_json(&query, &doc).unwrap(),
            vec![json!([1, 2]), json!({"a": 1, "b": 2})]
        );
    }

    #[test]
    fn keys_of_a_single_member_object_unwrap_for_comparison() {
        let doc = json!([{"a": 1}, {"b": 2}]);
        let query = filter(compare(
            call("keys", vec![]),
            "==",
            Script::String {
                value: "a".to_string(),
            },
        ));
        assert_eq!(execute_json(&query, &doc).unwrap(), vec![json!({"a": 1})]);
    }

    #[test]
    fn keys_of_a_non_object_are_an_empty_falsy_sequence() {
        let doc = json!([{"a": 1, "b": 2}, 3, "x"]);
        let query = filter(call("keys", vec![]));
        assert_eq!(
            execute_json(&query, &doc).unwrap(),
            vec![json!({"a": 1, "b": 2})]
        );
    }

    #[test]
    fn match_requires_the_whole_string() {
        let doc = json!(["foo", "foobar", 7]);
        let query = filter(call("match", vec![Value::String("fo+".to_string())]));
        assert_eq!(execute_json(&query, &doc).unwrap(), vec![json!("foo")]);
    }

    #[test]
    fn search_matches_anywhere() {
        let doc = json!(["foo", "foobar", "bar"]);
        let query = filter(call("search", vec![Value::String("fo+".to_string())]));
        assert_eq!(
            execute_json(&query, &doc).unwrap(),
            vec![json!("foo"), json!("foobar")]
        );
    }

    #[test]
    fn invalid_patterns_never_match() {
        let doc = json!(["foo"]);
        let query = filter(call("match", vec![Value::String("(".to_string())]));
        assert!(execute_json(&query, &doc).unwrap().is_empty());
    }

    #[test]
    fn missing_pattern_argument_never_matches() {
        let doc = json!(["foo"]);
        let query = filter(call("search", vec![]));
        assert!(execute_json(&query, &doc).unwrap().is_empty());
    }
}

mod custom {
    use super::*;

    struct FirstArg;

    impl PathFunction for FirstArg {
        fn call(&self, _current: &Value, _root: &Value, args: &[Value]) -> FunctionResult {
            FunctionResult::Value(args.first().cloned().unwrap_or(Value::Null))
        }
    }

    struct RootElementCount;

    impl PathFunction for RootElementCount {
        fn call(&self, _current: &Value, root: &Value, _args: &[Value]) -> FunctionResult {
            let count = match root {
                Value::Array(elements) => elements.len(),
                Value::Object(members) => members.len(),
                _ => 0,
            };
            FunctionResult::Value(Value::Number(Number::Int(count as i64)))
        }
    }

    #[test]
    fn arguments_pass_through_verbatim() {
        let mut env = Environment::empty();
        env.register("first_arg", Box::new(FirstArg));

        let doc = json!([1, 2]);
        let query = filter(compare(
            call("first_arg", vec![Value::Number(Number::Int(5))]),
            "==",
            Script::Int { value: 5 },
        ));
        assert_eq!(
            execute_json_with_environment(&query, &doc, &env).unwrap(),
            vec![json!(1), json!(2)]
        );
    }

    #[test]
    fn functions_see_the_document_root() {
        let mut env = Environment::new();
        env.register("root_count", Box::new(RootElementCount));

        let doc = json!([10, 20, 30]);
        let query = filter(compare(
            call("root_count", vec![]),
            "==",
            Script::Int { value: 3 },
        ));
        assert_eq!(
            execute_json_with_environment(&query, &doc, &env).unwrap(),
            vec![json!(10), json!(20), json!(30)]
        );
    }
}
