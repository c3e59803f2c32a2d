//! Integration tests for the `apply` entry point, operator by operator.

use json_logic::{apply, default_operators, evaluate, Error, EvalCtx};
use serde_json::{json, Value};

fn check(rule: Value, data: Value, expected: Value) {
    let result =
        apply(&rule, &data).unwrap_or_else(|e| panic!("apply({}) failed: {}", rule, e));
    assert_eq!(result, expected, "rule: {} data: {}", rule, data);
}

fn check_err(rule: Value, data: Value) -> Error {
    apply(&rule, &data)
        .err()
        .unwrap_or_else(|| panic!("expected error for {}", rule))
}

// ------------------------------------------------------------------ Literals

#[test]
fn test_literal_pass_through() {
    check(json!(5), json!(null), json!(5));
    check(json!("x"), json!({"a": 1}), json!("x"));
    check(json!(true), json!(null), json!(true));
    check(json!(null), json!(42), json!(null));
}

#[test]
fn test_array_literals_evaluate_element_wise() {
    check(json!([1, 2, {"var": "a"}]), json!({"a": 9}), json!([1, 2, 9]));
    check(json!([]), json!(null), json!([]));
    check(
        json!([[{"var": "a"}]]),
        json!({"a": "deep"}),
        json!([["deep"]]),
    );
}

#[test]
fn test_multi_key_objects_are_literal_data() {
    check(
        json!({"a": 1, "b": 2}),
        json!(null),
        json!({"a": 1, "b": 2}),
    );
    // Operator-looking keys included: two keys means data, not a rule.
    check(
        json!({"var": "a", "cat": "b"}),
        json!({"a": 1}),
        json!({"var": "a", "cat": "b"}),
    );
    check(json!({}), json!(null), json!({}));
}

#[test]
fn test_objects_inside_literal_data_are_not_evaluated() {
    // A multi-key object passes through wholesale; nothing inside it runs.
    check(
        json!({"a": {"var": "x"}, "b": 2}),
        json!({"x": 1}),
        json!({"a": {"var": "x"}, "b": 2}),
    );
}

#[test]
fn test_unknown_operator() {
    let err = check_err(json!({"fubar": [1, 2]}), json!(null));
    assert_eq!(err, Error::UnknownOperator("fubar".to_string()));
}

// --------------------------------------------------------------------- Logic

#[test]
fn test_and_returns_operand_values() {
    check(json!({"and": [true, true]}), json!(null), json!(true));
    check(json!({"and": [true, false]}), json!(null), json!(false));
    check(json!({"and": [1, 3]}), json!(null), json!(3));
    check(json!({"and": [3, false]}), json!(null), json!(false));
    check(json!({"and": [false, 3]}), json!(null), json!(false));
    check(json!({"and": [""]}), json!(null), json!(""));
}

#[test]
fn test_or_returns_operand_values() {
    check(json!({"or": [false, 3]}), json!(null), json!(3));
    check(json!({"or": [1, 3]}), json!(null), json!(1));
    check(json!({"or": [false, 0]}), json!(null), json!(0));
    check(json!({"or": [false, "", null]}), json!(null), json!(null));
}

#[test]
fn test_and_short_circuits() {
    // The second operand is an unknown operator; it must never run.
    check(
        json!({"and": [false, {"missing_operator_marker": 1}]}),
        json!(null),
        json!(false),
    );
}

#[test]
fn test_or_short_circuits() {
    check(
        json!({"or": [42, {"missing_operator_marker": 1}]}),
        json!(null),
        json!(42),
    );
}

#[test]
fn test_not() {
    check(json!({"!": [true]}), json!(null), json!(false));
    check(json!({"!": true}), json!(null), json!(false));
    check(json!({"!": [0]}), json!(null), json!(true));
    check(json!({"!": [[]]}), json!(null), json!(true));
    check(json!({"!": [{"var": "absent"}]}), json!(null), json!(true));
}

#[test]
fn test_not_not() {
    check(json!({"!!": [[]]}), json!(null), json!(false));
    check(json!({"!!": ["0"]}), json!(null), json!(true));
    check(json!({"!!": [{}]}), json!(null), json!(true));
}

#[test]
fn test_if_basic() {
    check(json!({"if": [true, "yes", "no"]}), json!(null), json!("yes"));
    check(json!({"if": [false, "yes", "no"]}), json!(null), json!("no"));
}

#[test]
fn test_if_chain() {
    let rule = json!({"if": [
        {"<": [{"var": "temp"}, 0]}, "freezing",
        {"<": [{"var": "temp"}, 100]}, "liquid",
        "gas"
    ]});
    check(rule.clone(), json!({"temp": -5}), json!("freezing"));
    check(rule.clone(), json!({"temp": 55}), json!("liquid"));
    check(rule, json!({"temp": 200}), json!("gas"));
}

#[test]
fn test_if_degenerate_argument_counts() {
    check(json!({"if": []}), json!(null), json!(null));
    check(json!({"if": [true]}), json!(null), json!(true));
    check(json!({"if": [false, "yes"]}), json!(null), json!(null));
    check(json!({"if": [true, "yes"]}), json!(null), json!("yes"));
}

#[test]
fn test_if_does_not_evaluate_untaken_branches() {
    check(
        json!({"if": [true, "taken", {"missing_operator_marker": 1}]}),
        json!(null),
        json!("taken"),
    );
    check(
        json!({"if": [false, {"missing_operator_marker": 1}, "else"]}),
        json!(null),
        json!("else"),
    );
}

#[test]
fn test_ternary_alias() {
    check(json!({"?:": [true, 1, 2]}), json!(null), json!(1));
    check(json!({"?:": [false, 1, 2]}), json!(null), json!(2));
}

// ---------------------------------------------------------------- Comparison

#[test]
fn test_loose_equality() {
    check(json!({"==": [1, 1]}), json!(null), json!(true));
    check(json!({"==": [1, "1"]}), json!(null), json!(true));
    check(json!({"==": [0, false]}), json!(null), json!(true));
    check(json!({"==": [1, 2]}), json!(null), json!(false));
    check(json!({"==": [null, null]}), json!(null), json!(true));
    check(json!({"==": [null, 0]}), json!(null), json!(false));
    check(json!({"==": [[1, 2], [1, 2]]}), json!(null), json!(true));
}

#[test]
fn test_strict_equality() {
    check(json!({"===": [1, 1]}), json!(null), json!(true));
    check(json!({"===": [1, 1.0]}), json!(null), json!(true));
    check(json!({"===": [0, false]}), json!(null), json!(false));
    check(json!({"===": [1, "1"]}), json!(null), json!(false));
}

#[test]
fn test_inequality() {
    check(json!({"!=": [1, 2]}), json!(null), json!(true));
    check(json!({"!=": [1, "1"]}), json!(null), json!(false));
    check(json!({"!==": [1, "1"]}), json!(null), json!(true));
    check(json!({"!==": [1, 1.0]}), json!(null), json!(false));
}

#[test]
fn test_ordered_comparison() {
    check(json!({"<": [1, 2]}), json!(null), json!(true));
    check(json!({"<": [2, 1]}), json!(null), json!(false));
    check(json!({"<=": [1, 1]}), json!(null), json!(true));
    check(json!({">": [2, 1]}), json!(null), json!(true));
    check(json!({">=": [1, 2]}), json!(null), json!(false));
    // Numeric coercion of strings and booleans.
    check(json!({"<": ["1", 2]}), json!(null), json!(true));
    check(json!({">": [true, 0]}), json!(null), json!(true));
    // Two strings compare lexicographically.
    check(json!({"<": ["apple", "banana"]}), json!(null), json!(true));
    check(json!({"<": ["10", "9"]}), json!(null), json!(true));
}

#[test]
fn test_between() {
    check(json!({"<": [1, 2, 3]}), json!(null), json!(true));
    check(json!({"<": [1, 1, 3]}), json!(null), json!(false));
    check(json!({"<=": [1, 1, 3]}), json!(null), json!(true));
    check(json!({">": [3, 2, 1]}), json!(null), json!(true));
    check(json!({">=": [3, 3, 1]}), json!(null), json!(true));
    let rule = json!({"<": [0, {"var": "x"}, 10]});
    check(rule.clone(), json!({"x": 5}), json!(true));
    check(rule, json!({"x": 15}), json!(false));
}

#[test]
fn test_between_lazy_upper_bound() {
    // The failed lower bound means the third operand never runs.
    check(
        json!({"<": [2, 1, {"missing_operator_marker": 1}]}),
        json!(null),
        json!(false),
    );
}

#[test]
fn test_comparison_coercion_failure() {
    let err = check_err(json!({"<": [{}, 1]}), json!(null));
    assert!(matches!(err, Error::CoercionError(_)), "got: {:?}", err);
}

// ---------------------------------------------------------------- Arithmetic

#[test]
fn test_add() {
    check(json!({"+": [1, 2]}), json!(null), json!(3));
    check(json!({"+": [2, 2, 2, 2]}), json!(null), json!(8));
    check(json!({"+": [1, "1"]}), json!(null), json!(2));
    check(json!({"+": [0.5, 0.75]}), json!(null), json!(1.25));
    check(json!({"+": []}), json!(null), json!(0));
}

#[test]
fn test_unary_plus_casts() {
    check(json!({"+": "3.14"}), json!(null), json!(3.14));
    check(json!({"+": ["7"]}), json!(null), json!(7));
    check(json!({"+": true}), json!(null), json!(1));
}

#[test]
fn test_subtract() {
    check(json!({"-": [5, 2]}), json!(null), json!(3));
    check(json!({"-": [2, 5]}), json!(null), json!(-3));
    check(json!({"-": [3]}), json!(null), json!(-3));
    check(json!({"-": ["-4"]}), json!(null), json!(4));
}

#[test]
fn test_multiply_divide_modulo() {
    check(json!({"*": [3, 4]}), json!(null), json!(12));
    check(json!({"*": [2, 2, 2]}), json!(null), json!(8));
    check(json!({"/": [10, 4]}), json!(null), json!(2.5));
    check(json!({"%": [101, 2]}), json!(null), json!(1));
    check(json!({"%": [7, 3]}), json!(null), json!(1));
}

#[test]
fn test_division_by_zero_is_null() {
    // Non-finite results have no JSON encoding.
    check(json!({"/": [1, 0]}), json!(null), json!(null));
    check(json!({"%": [0, 0]}), json!(null), json!(null));
}

#[test]
fn test_min_max() {
    check(json!({"min": [3, 1, 2]}), json!(null), json!(1));
    check(json!({"max": [3, 1, 2]}), json!(null), json!(3));
    check(json!({"min": [1.5]}), json!(null), json!(1.5));
}

#[test]
fn test_arithmetic_coercion_failure() {
    for rule in [
        json!({"+": [1, "banana"]}),
        json!({"+": [1, {}]}),
        json!({"-": [[1, 2]]}),
        json!({"*": [2, [1, 2]]}),
    ] {
        let err = check_err(rule.clone(), json!(null));
        assert!(
            matches!(err, Error::CoercionError(_)),
            "rule {} got: {:?}",
            rule,
            err
        );
    }
}

#[test]
fn test_arity_errors() {
    for rule in [
        json!({"-": []}),
        json!({"/": [1]}),
        json!({"==": [1]}),
        json!({"<": [1, 2, 3, 4]}),
        json!({"reduce": [[1], {"var": ""}]}),
        json!({"substr": ["x"]}),
    ] {
        let err = check_err(rule.clone(), json!(null));
        assert!(
            matches!(err, Error::ArityError(_)),
            "rule {} got: {:?}",
            rule,
            err
        );
    }
}

// ----------------------------------------------------------------- Variables

#[test]
fn test_var() {
    check(json!({"var": "a"}), json!({"a": 1}), json!(1));
    check(json!({"var": ["a"]}), json!({"a": 1}), json!(1));
    check(json!({"var": "a.b"}), json!({"a": {"b": "c"}}), json!("c"));
    check(json!({"var": "absent"}), json!({"a": 1}), json!(null));
}

#[test]
fn test_var_whole_data() {
    check(json!({"var": ""}), json!({"a": 1}), json!({"a": 1}));
    check(json!({"var": null}), json!([1, 2]), json!([1, 2]));
    check(json!({"var": []}), json!("ctx"), json!("ctx"));
}

#[test]
fn test_var_default() {
    check(json!({"var": ["a", 26]}), json!({"a": 1}), json!(1));
    check(json!({"var": ["absent", 26]}), json!(null), json!(26));
    check(json!({"var": ["a.b", "fallback"]}), json!({"a": {}}), json!("fallback"));
    // The default is itself a rule.
    check(
        json!({"var": ["absent", {"+": [1, 1]}]}),
        json!(null),
        json!(2),
    );
}

#[test]
fn test_var_default_is_lazy() {
    // On a hit the default rule must never run.
    check(
        json!({"var": ["a", {"missing_operator_marker": 1}]}),
        json!({"a": 7}),
        json!(7),
    );
}

#[test]
fn test_var_numeric_index() {
    check(json!({"var": 1}), json!(["apple", "banana"]), json!("banana"));
    check(json!({"var": -1}), json!(["apple", "banana"]), json!("banana"));
    check(json!({"var": -2}), json!(["apple", "banana"]), json!("apple"));
    check(json!({"var": "1"}), json!(["apple", "banana"]), json!("banana"));
    check(json!({"var": 0}), json!("abc"), json!("a"));
}

#[test]
fn test_var_computed_key() {
    check(
        json!({"var": [{"cat": ["a", ".b"]}]}),
        json!({"a": {"b": 9}}),
        json!(9),
    );
}

#[test]
fn test_var_invalid_key_shape() {
    let err = check_err(json!({"var": true}), json!({}));
    assert!(matches!(err, Error::InvalidRuleShape(_)), "got: {:?}", err);
}

#[test]
fn test_missing() {
    check(json!({"missing": ["a", "b"]}), json!({"a": 1}), json!(["b"]));
    check(
        json!({"missing": ["a", "b"]}),
        json!({"a": 1, "b": 2}),
        json!([]),
    );
    check(json!({"missing": "a"}), json!(null), json!(["a"]));
    check(json!({"missing": []}), json!(null), json!([]));
    check(
        json!({"missing": ["a.b"]}),
        json!({"a": {"c": 1}}),
        json!(["a.b"]),
    );
}

#[test]
fn test_missing_first_argument_array_collapse() {
    check(
        json!({"missing": [["a", "b"], "ignored"]}),
        json!({"a": 1}),
        json!(["b"]),
    );
}

#[test]
fn test_missing_computed_key_list() {
    check(
        json!({"missing": {"merge": [["a"], ["b"]]}}),
        json!({"a": 1}),
        json!(["b"]),
    );
}

#[test]
fn test_missing_some() {
    check(
        json!({"missing_some": [1, ["a", "b", "c"]]}),
        json!({"a": 1}),
        json!([]),
    );
    check(
        json!({"missing_some": [2, ["a", "b", "c"]]}),
        json!({"a": 1}),
        json!(["b", "c"]),
    );
    check(
        json!({"missing_some": [2, ["a", "b", "c"]]}),
        json!({"a": 1, "b": 2}),
        json!([]),
    );
}

#[test]
fn test_missing_some_invalid_threshold() {
    let err = check_err(json!({"missing_some": ["x", ["a"]]}), json!(null));
    assert!(matches!(err, Error::InvalidRuleShape(_)), "got: {:?}", err);
}

// --------------------------------------------------------------- Collections

#[test]
fn test_merge() {
    check(
        json!({"merge": [[1, 2], [3, [4]]]}),
        json!(null),
        json!([1, 2, 3, [4]]),
    );
    check(json!({"merge": [1, 2, [3]]}), json!(null), json!([1, 2, 3]));
    check(json!({"merge": []}), json!(null), json!([]));
    check(json!({"merge": "scalar"}), json!(null), json!(["scalar"]));
}

#[test]
fn test_in_substring() {
    check(json!({"in": ["cat", "concatenate"]}), json!(null), json!(true));
    check(json!({"in": ["dog", "concatenate"]}), json!(null), json!(false));
    check(json!({"in": ["", "anything"]}), json!(null), json!(true));
    // Non-string needles stringify against string haystacks.
    check(json!({"in": [1, "a1b"]}), json!(null), json!(true));
}

#[test]
fn test_in_membership() {
    check(json!({"in": [2, [1, 2, 3]]}), json!(null), json!(true));
    check(json!({"in": [4, [1, 2, 3]]}), json!(null), json!(false));
    // Membership uses loose equality.
    check(json!({"in": ["2", [1, 2, 3]]}), json!(null), json!(true));
    check(json!({"in": [null, []]}), json!(null), json!(false));
}

#[test]
fn test_in_null_haystack() {
    check(json!({"in": ["a", null]}), json!(null), json!(false));
}

#[test]
fn test_in_invalid_haystack() {
    let err = check_err(json!({"in": ["a", 42]}), json!(null));
    assert!(matches!(err, Error::InvalidRuleShape(_)), "got: {:?}", err);
}

#[test]
fn test_map() {
    check(
        json!({"map": [{"var": "integers"}, {"*": [{"var": ""}, 2]}]}),
        json!({"integers": [1, 2, 3]}),
        json!([2, 4, 6]),
    );
    check(
        json!({"map": [{"var": "absent"}, {"*": [{"var": ""}, 2]}]}),
        json!(null),
        json!([]),
    );
}

#[test]
fn test_filter() {
    check(
        json!({"filter": [{"var": "integers"}, {"%": [{"var": ""}, 2]}]}),
        json!({"integers": [1, 2, 3, 4, 5]}),
        json!([1, 3, 5]),
    );
    check(
        json!({"filter": [{"var": "integers"}, {">": [{"var": ""}, 10]}]}),
        json!({"integers": [1, 2, 3]}),
        json!([]),
    );
}

#[test]
fn test_reduce() {
    check(
        json!({"reduce": [
            {"var": "arr"},
            {"+": [{"var": "current"}, {"var": "accumulator"}]},
            0
        ]}),
        json!({"arr": [1, 2, 3]}),
        json!(6),
    );
    check(
        json!({"reduce": [
            {"var": "arr"},
            {"*": [{"var": "current"}, {"var": "accumulator"}]},
            1
        ]}),
        json!({"arr": [1, 2, 3, 4]}),
        json!(24),
    );
}

#[test]
fn test_reduce_empty_returns_initial() {
    check(
        json!({"reduce": [[], {"+": [{"var": "current"}, {"var": "accumulator"}]}, 9]}),
        json!(null),
        json!(9),
    );
    // The initial value is itself a rule, evaluated against the outer data.
    check(
        json!({"reduce": [[], {"var": "current"}, {"var": "seed"}]}),
        json!({"seed": "s"}),
        json!("s"),
    );
}

#[test]
fn test_all() {
    check(
        json!({"all": [[1, 2, 3], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(true),
    );
    check(
        json!({"all": [[1, -2, 3], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(false),
    );
    // Empty collections are false, not vacuously true.
    check(
        json!({"all": [[], {"==": [{"var": ""}, 1]}]}),
        json!(null),
        json!(false),
    );
}

#[test]
fn test_some() {
    check(
        json!({"some": [[-1, 0, 2], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(true),
    );
    check(
        json!({"some": [[-1, 0], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(false),
    );
    check(
        json!({"some": [[], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(false),
    );
}

#[test]
fn test_none() {
    check(
        json!({"none": [[-3, -2], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(true),
    );
    check(
        json!({"none": [[-3, 2], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(false),
    );
    check(
        json!({"none": [[], {">": [{"var": ""}, 0]}]}),
        json!(null),
        json!(true),
    );
}

#[test]
fn test_scan_short_circuits() {
    // `some` must stop at the first truthy element: the trailing object
    // element would fail the numeric comparison if the predicate ran on it.
    check(
        json!({"some": [[1, {"k": 1, "v": 2}], {"<": [0, {"var": ""}]}]}),
        json!(null),
        json!(true),
    );
    // Same for `all` and the first falsy element.
    check(
        json!({"all": [[0, {"k": 1, "v": 2}], {"<": [0, {"var": ""}]}]}),
        json!(null),
        json!(false),
    );
}

#[test]
fn test_scans_over_strings() {
    check(
        json!({"some": ["abc", {"==": [{"var": ""}, "b"]}]}),
        json!(null),
        json!(true),
    );
    check(
        json!({"all": ["aaa", {"==": [{"var": ""}, "a"]}]}),
        json!(null),
        json!(true),
    );
    check(
        json!({"none": ["abc", {"==": [{"var": ""}, "z"]}]}),
        json!(null),
        json!(true),
    );
}

#[test]
fn test_combinators_see_outer_data_in_collection_operand() {
    check(
        json!({"map": [{"var": "list"}, {"+": [{"var": ""}, 10]}]}),
        json!({"list": [1, 2]}),
        json!([11, 12]),
    );
    check(
        json!({"filter": [{"var": "users"}, {"var": "admin"}]}),
        json!({"users": [{"name": "a", "admin": true}, {"name": "b", "admin": false}]}),
        json!([{"name": "a", "admin": true}]),
    );
}

// ------------------------------------------------------------------- Strings

#[test]
fn test_cat() {
    check(json!({"cat": ["I love", " pie"]}), json!(null), json!("I love pie"));
    check(
        json!({"cat": ["I love ", {"var": "filling"}, " pie"]}),
        json!({"filling": "apple"}),
        json!("I love apple pie"),
    );
    check(json!({"cat": []}), json!(null), json!(""));
    check(json!({"cat": [1, 2, null, true]}), json!(null), json!("12nulltrue"));
    check(json!({"cat": [1.5, "x"]}), json!(null), json!("1.5x"));
}

#[test]
fn test_substr() {
    check(json!({"substr": ["jsonlogic", 4]}), json!(null), json!("logic"));
    check(json!({"substr": ["jsonlogic", -5]}), json!(null), json!("logic"));
    check(json!({"substr": ["jsonlogic", 1, 3]}), json!(null), json!("son"));
    check(json!({"substr": ["jsonlogic", 4, -2]}), json!(null), json!("log"));
    check(json!({"substr": ["jsonlogic", 0, 0]}), json!(null), json!(""));
    check(json!({"substr": ["jsonlogic", 50]}), json!(null), json!(""));
}

// ---------------------------------------------------------------------- Misc

#[test]
fn test_log_passes_through() {
    check(json!({"log": "apple"}), json!(null), json!("apple"));
    check(json!({"log": [{"+": [1, 2]}]}), json!(null), json!(3));
}

#[test]
fn test_depth_bound() {
    let mut rule = json!(1);
    for _ in 0..600 {
        rule = json!({"!!": [rule]});
    }
    let err = check_err(rule, json!(null));
    assert!(matches!(err, Error::DepthExceeded(_)), "got: {:?}", err);
}

#[test]
fn test_custom_depth_limit() {
    let data = json!(null);
    let ctx = EvalCtx::new(&data, default_operators()).with_max_depth(2);
    assert!(evaluate(&json!({"+": [1, 2]}), &ctx).is_ok());
    let err = evaluate(&json!({"+": [1, {"+": [1, {"+": [1, 1]}]}]}), &ctx);
    assert_eq!(err, Err(Error::DepthExceeded(2)));
}

#[test]
fn test_apply_str_boundary() {
    assert_eq!(
        json_logic::apply_str(r#"{"+": [1, 2]}"#, Some("null")).unwrap(),
        "3"
    );
    assert_eq!(
        json_logic::apply_str(r#"{"var": "a"}"#, Some(r#"{"a": [1, 2]}"#)).unwrap(),
        "[1,2]"
    );
    // Absent data is null data.
    assert_eq!(json_logic::apply_str(r#"{"var": "a"}"#, None).unwrap(), "null");
    let err = json_logic::apply_str("{not json", None).unwrap_err();
    assert!(matches!(err, Error::InvalidJson(_)), "got: {:?}", err);
}

#[test]
fn test_purity() {
    let rule = json!({"map": [{"var": "xs"}, {"+": [{"var": ""}, 1]}]});
    let data = json!({"xs": [1, 2, 3]});
    let first = apply(&rule, &data).unwrap();
    let second = apply(&rule, &data).unwrap();
    assert_eq!(first.to_string(), second.to_string());
}
