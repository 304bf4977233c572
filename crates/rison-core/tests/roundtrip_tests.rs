/// Roundtrip tests: decode(encode(v)) == v, and encode(decode(r)) == r for
/// canonical Rison in every mode that fits it.
use rison_core::{decode_str, encode, Mode, Value};

/// Canonical Rison paired with the JSON it stands for.
const CASES: &[(&str, &str)] = &[
    ("''", r#""""#),
    ("'0a'", r#""0a""#),
    ("'abc def'", r#""abc def""#),
    ("'-h'", r#""-h""#),
    ("'user@domain.com'", r#""user@domain.com""#),
    ("'US $10'", r#""US $10""#),
    ("'wow!!'", r#""wow!""#),
    ("'can!'t'", r#""can't""#),
    ("G.", r#""G.""#),
    ("a", r#""a""#),
    ("a-z", r#""a-z""#),
    ("domain.com", r#""domain.com""#),
    ("0", "0"),
    ("1", "1"),
    ("42", "42"),
    ("1.5", "1.5"),
    ("99.99", "99.99"),
    ("-3", "-3"),
    ("-33", "-33"),
    ("1e30", "1e+30"),
    ("1e-30", "1e-30"),
    ("!t", "true"),
    ("!f", "false"),
    ("!n", "null"),
    ("()", "{}"),
    ("(a:0)", r#"{"a":0}"#),
    ("(a:0,b:1)", r#"{"a":0,"b":1}"#),
    ("(a:0,b:foo,c:'23skidoo')", r#"{"a":0,"b":"foo","c":"23skidoo"}"#),
    ("(a:!n)", r#"{"a":null}"#),
    ("(id:!n,type:/common/document)", r#"{"id":null,"type":"/common/document"}"#),
    ("(any:json,yes:!t)", r#"{"any":"json","yes":true}"#),
    ("!()", "[]"),
    ("!(!n)", "[null]"),
    ("!(1,2,3)", "[1,2,3]"),
    ("!(foo,bar)", r#"["foo","bar"]"#),
    ("!(!t,!f,!n,'')", r#"[true,false,null,""]"#),
    (
        "(A:(B:(C:(D:E,F:G)),H:(I:(J:K,L:M))))",
        r#"{"A":{"B":{"C":{"D":"E","F":"G"}},"H":{"I":{"J":"K","L":"M"}}}}"#,
    ),
    ("!(A,B,(supportsObjects:!t))", r#"["A","B",{"supportsObjects":true}]"#),
    (
        "(baz:!(1,1.2e41,0.42,('0':!f,'1':!n,a:!t)),foo:bar)",
        r#"{"foo":"bar","baz":[1,12e40,0.42,{"a":true,"0":false,"1":null}]}"#,
    ),
    ("'Control-F: \u{6}'", r#""Control-F: \u0006""#),
    ("'Null \u{0} character'", r#""Null \u0000 character""#),
    ("'Unicode: ௫'", r#""Unicode: ௫""#),
    ("(月:隅田,柳:銀座,花:上野)", r#"{"花":"上野","柳":"銀座","月":"隅田"}"#),
    ("(🍔:🐂,🍛:🌶,🍣:🐟)", r#"{"🍣":"🐟","🍛":"🌶","🍔":"🐂"}"#),
];

/// Modes whose implicit delimiters match the shape of `rison`.
fn modes_for(rison: &str) -> Vec<(Mode, &str)> {
    let mut modes = vec![(Mode::Full, rison)];
    if let Some(body) = rison.strip_prefix("!(").and_then(|r| r.strip_suffix(')')) {
        modes.push((Mode::ArrayOnly, body));
    } else if let Some(body) = rison.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        modes.push((Mode::ObjectOnly, body));
    }
    modes
}

#[test]
fn decode_matches_json() {
    for (rison, json) in CASES {
        let expected: Value = serde_json::from_str(json).unwrap();
        for (mode, text) in modes_for(rison) {
            let decoded = decode_str(text, mode)
                .unwrap_or_else(|e| panic!("decoding {text} ({mode}): {e}"));
            assert_eq!(decoded, expected, "decoding {text} ({mode})");
        }
    }
}

#[test]
fn encode_is_canonical() {
    for (rison, json) in CASES {
        let value: Value = serde_json::from_str(json).unwrap();
        for (mode, text) in modes_for(rison) {
            assert_eq!(
                encode(&value, mode).unwrap(),
                text,
                "encoding {json} ({mode})"
            );
        }
    }
}

#[test]
fn encode_then_decode_is_identity() {
    for (_, json) in CASES {
        let value: Value = serde_json::from_str(json).unwrap();
        let encoded = encode(&value, Mode::Full).unwrap();
        assert_eq!(
            decode_str(&encoded, Mode::Full).unwrap(),
            value,
            "roundtrip of {json} via {encoded}"
        );
    }
}

#[test]
fn non_canonical_input_reencodes_canonically() {
    let cases = [
        ("(b:1,a:2)", "(a:2,b:1)"),
        ("'abc'", "abc"),
        ("1.5e2", "150"),
        ("-0", "0"),
        ("0.50", "0.5"),
        ("(a:1,a:2)", "(a:2)"),
    ];
    for (input, canonical) in cases {
        let value = decode_str(input, Mode::Full).unwrap();
        assert_eq!(encode(&value, Mode::Full).unwrap(), canonical, "{input}");
    }
}
