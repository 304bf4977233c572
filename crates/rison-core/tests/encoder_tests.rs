use rison_core::json::dismantle;
use rison_core::{encode, encode_from_json, EncodeError, Mode};
use serde_json::json;

fn rison(value: serde_json::Value) -> String {
    encode(&value, Mode::Full).unwrap()
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn encode_literals() {
    assert_eq!(rison(json!(null)), "!n");
    assert_eq!(rison(json!(true)), "!t");
    assert_eq!(rison(json!(false)), "!f");
}

#[test]
fn encode_integers() {
    assert_eq!(rison(json!(0)), "0");
    assert_eq!(rison(json!(42)), "42");
    assert_eq!(rison(json!(-33)), "-33");
    assert_eq!(rison(json!(u64::MAX)), "18446744073709551615");
    assert_eq!(rison(json!(i64::MIN)), "-9223372036854775808");
}

#[test]
fn encode_floats() {
    assert_eq!(rison(json!(1.5)), "1.5");
    assert_eq!(rison(json!(99.99)), "99.99");
    assert_eq!(rison(json!(0.42)), "0.42");
    assert_eq!(rison(json!(-0.0)), "0");
}

#[test]
fn encode_float_exponents() {
    assert_eq!(rison(json!(1e30)), "1e30");
    assert_eq!(rison(json!(1e-30)), "1e-30");
    assert_eq!(rison(json!(12e40)), "1.2e41");
    assert_eq!(rison(json!(-2.5e-7)), "-2.5e-7");
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn encode_bare_strings() {
    assert_eq!(rison(json!("a")), "a");
    assert_eq!(rison(json!("G.")), "G.");
    assert_eq!(rison(json!("a-z")), "a-z");
    assert_eq!(rison(json!("domain.com")), "domain.com");
    assert_eq!(rison(json!("/common/document")), "/common/document");
    assert_eq!(rison(json!("true")), "true");
    assert_eq!(rison(json!("上野")), "上野");
}

#[test]
fn encode_quoted_strings() {
    assert_eq!(rison(json!("")), "''");
    assert_eq!(rison(json!("0a")), "'0a'");
    assert_eq!(rison(json!("-h")), "'-h'");
    assert_eq!(rison(json!("abc def")), "'abc def'");
    assert_eq!(rison(json!("user@domain.com")), "'user@domain.com'");
    assert_eq!(rison(json!("US $10")), "'US $10'");
    assert_eq!(rison(json!("a*b")), "'a*b'");
    assert_eq!(rison(json!("k:v")), "'k:v'");
}

#[test]
fn encode_quoted_escapes() {
    assert_eq!(rison(json!("wow!")), "'wow!!'");
    assert_eq!(rison(json!("can't")), "'can!'t'");
    assert_eq!(rison(json!("!'!")), "'!!!'!!'");
}

#[test]
fn encode_control_characters_verbatim() {
    assert_eq!(rison(json!("Control-F: \u{6}")), "'Control-F: \u{6}'");
    assert_eq!(rison(json!("tab\there")), "tab\there");
}

// ============================================================================
// Objects and Arrays
// ============================================================================

#[test]
fn encode_empty_containers() {
    assert_eq!(rison(json!({})), "()");
    assert_eq!(rison(json!([])), "!()");
}

#[test]
fn encode_object_keys_sorted() {
    assert_eq!(
        rison(json!({"s": "str", "i": 1, "f": 2.3, "b": true, "p": null, "a": [7, 8, 9], "x": {"y": "Y"}})),
        "(a:!(7,8,9),b:!t,f:2.3,i:1,p:!n,s:str,x:(y:Y))"
    );
}

#[test]
fn encode_keys_sort_bytewise() {
    assert_eq!(
        rison(json!({"b": 1, "B": 2, "a": 3, "1": 4, "é": 5})),
        "('1':4,B:2,a:3,b:1,é:5)"
    );
}

#[test]
fn encode_quoted_keys() {
    assert_eq!(
        rison(json!({"a": true, "0": false, "1": null, "x y": 1})),
        "('0':!f,'1':!n,a:!t,'x y':1)"
    );
}

#[test]
fn encode_array_mixed() {
    assert_eq!(
        rison(json!([1, 2.3, "str", "-ing", "true", "nil", {"a": "b"}, [7, 8, 9]])),
        "!(1,2.3,str,'-ing',true,nil,(a:b),!(7,8,9))"
    );
}

#[test]
fn encode_nested_objects() {
    assert_eq!(
        rison(json!({"A": {"H": {"I": {"L": "M", "J": "K"}}, "B": {"C": {"F": "G", "D": "E"}}}})),
        "(A:(B:(C:(D:E,F:G)),H:(I:(J:K,L:M))))"
    );
}

// ============================================================================
// Modes
// ============================================================================

#[test]
fn encode_object_only() {
    let value = json!({"b": false, "a": 1});
    assert_eq!(encode(&value, Mode::ObjectOnly).unwrap(), "a:1,b:!f");
    assert_eq!(encode(&json!({}), Mode::ObjectOnly).unwrap(), "");
}

#[test]
fn encode_array_only() {
    let value = json!(["a", 2, true]);
    assert_eq!(encode(&value, Mode::ArrayOnly).unwrap(), "a,2,!t");
    assert_eq!(encode(&json!([]), Mode::ArrayOnly).unwrap(), "");
}

#[test]
fn object_only_rejects_non_objects() {
    for value in [json!(1), json!("a"), json!(null), json!(true), json!([]), json!([null])] {
        let err = encode(&value, Mode::ObjectOnly).unwrap_err();
        assert!(
            matches!(err, EncodeError::ModeMismatch { mode: Mode::ObjectOnly, .. }),
            "{value} should not encode as O-Rison"
        );
    }
}

#[test]
fn array_only_rejects_non_arrays() {
    for value in [json!(1), json!("a"), json!(null), json!(true), json!({})] {
        let err = encode(&value, Mode::ArrayOnly).unwrap_err();
        assert!(
            matches!(err, EncodeError::ModeMismatch { mode: Mode::ArrayOnly, .. }),
            "{value} should not encode as A-Rison"
        );
    }
}

#[test]
fn mode_mismatch_names_the_found_kind() {
    let err = encode(&json!("a"), Mode::ObjectOnly).unwrap_err();
    assert_eq!(
        err.to_string(),
        "only an object can be encoded to the O-Rison, found string"
    );
}

// ============================================================================
// From JSON text
// ============================================================================

#[test]
fn encode_from_json_text() {
    let json = r#"[1,2.3,"str","-ing","true","nil",{"a":"b"},[7,8,9]]"#;
    assert_eq!(
        encode_from_json(json, Mode::Full).unwrap(),
        "!(1,2.3,str,'-ing',true,nil,(a:b),!(7,8,9))"
    );
}

#[test]
fn encode_from_json_errors() {
    assert!(matches!(
        encode_from_json("[", Mode::Full),
        Err(EncodeError::Json(_))
    ));
    assert!(matches!(
        encode_from_json("[]", Mode::ObjectOnly),
        Err(EncodeError::ModeMismatch { .. })
    ));
    assert!(matches!(
        encode_from_json("{}", Mode::ArrayOnly),
        Err(EncodeError::ModeMismatch { .. })
    ));
}

// ============================================================================
// Deep nesting
// ============================================================================

#[test]
fn encode_deep_nested_array() {
    let depth = 10_000;
    let mut value = json!([]);
    for _ in 0..depth {
        value = json!([value]);
    }
    let encoded = encode(&value, Mode::Full).unwrap();
    assert_eq!(encoded, format!("{}!(){}", "!(".repeat(depth), ")".repeat(depth)));
    dismantle(value);
}

#[test]
fn encode_deep_nested_object() {
    let depth = 10_000;
    let mut value = json!(null);
    for _ in 0..depth {
        value = json!({ "k": value });
    }
    let encoded = encode(&value, Mode::ObjectOnly).unwrap();
    assert_eq!(
        encoded,
        format!("k:{}!n{}", "(k:".repeat(depth - 1), ")".repeat(depth - 1))
    );
    dismantle(value);
}
