use jsonpath_exec::{
    execute_json, execute_json_with_environment, Environment, JSONPathErrorType, Predicate, Query,
    Script, Step,
};
use serde_json::json;

fn comparison(operator: &str) -> Script {
    Script::Comparison {
        left: Box::new(Script::CurrentNode),
        operator: operator.to_string(),
        right: Box::new(Script::Int { value: 1 }),
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_function() {
        let query = Query::new(vec![Step::Child(Predicate::FilterExpr(Script::Function {
            name: "nosuchthing".to_string(),
            args: vec![],
        }))]);

        let err = execute_json(&query, &json!([1, 2])).unwrap_err();
        assert_eq!(err.error, JSONPathErrorType::UnknownFunction);
        assert_eq!(
            err.to_string(),
            "unknown function: no function named 'nosuchthing' is registered"
        );
    }

    #[test]
    fn standard_function_missing_from_an_empty_environment() {
        let query = Query::new(vec![Step::Child(Predicate::FilterExpr(Script::Function {
            name: "length".to_string(),
            args: vec![],
        }))]);

        let err = execute_json_with_environment(&query, &json!(["ab"]), &Environment::empty())
            .unwrap_err();
        assert_eq!(err.error, JSONPathErrorType::UnknownFunction);
    }

    #[test]
    fn unsupported_operator() {
        let query = Query::new(vec![Step::Child(Predicate::FilterExpr(comparison("~=")))]);

        let err = execute_json(&query, &json!([1, 2])).unwrap_err();
        assert_eq!(err.error, JSONPathErrorType::UnsupportedOperator);
    }

    #[test]
    fn no_partial_result_on_a_failing_operator() {
        // The first element would match a supported comparison; the whole
        // call still fails.
        let query = Query::new(vec![Step::Child(Predicate::FilterExpr(comparison("===")))]);
        assert!(execute_json(&query, &json!([1, 2, 3])).is_err());
    }

    #[test]
    fn unsupported_slice_step() {
        for step in [0, 2, -1] {
            let query = Query::new(vec![Step::Child(Predicate::Slice {
                begin: 0,
                end: 3,
                step,
            })]);

            let err = execute_json(&query, &json!([1, 2, 3])).unwrap_err();
            assert_eq!(err.error, JSONPathErrorType::UnsupportedSlice);
        }
    }

    #[test]
    fn slice_step_is_only_checked_against_arrays() {
        let query = Query::new(vec![Step::Child(Predicate::Slice {
            begin: 0,
            end: 3,
            step: 2,
        })]);

        assert!(execute_json(&query, &json!({"a": 1})).unwrap().is_empty());
    }

    #[test]
    fn errors_propagate_out_of_nested_relative_paths() {
        let query = Query::new(vec![Step::Child(Predicate::FilterExpr(
            Script::RelativePath {
                steps: vec![Step::Child(Predicate::FilterExpr(comparison("in")))],
            },
        ))]);

        let err = execute_json(&query, &json!([[1], [2]])).unwrap_err();
        assert_eq!(err.error, JSONPathErrorType::UnsupportedOperator);
    }
}
