use proptest::prelude::*;
use schemaseed_woql::{Query, Term};
use serde_json::Value;

fn ident() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,10}").unwrap()
}

fn leaf() -> impl Strategy<Value = Query> {
    prop_oneof![
        Just(Query::True),
        (ident(), ident(), ident()).prop_map(|(s, p, o)| Query::schema_quad(
            Term::node(s),
            p,
            Term::node(o)
        )),
        (ident(), ident()).prop_map(|(code, out)| Query::cast(
            Term::string(code),
            "xsd:string",
            Term::var(out)
        )),
    ]
}

fn query() -> impl Strategy<Value = Query> {
    leaf().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Query::And),
            (inner.clone(), inner).prop_map(|(c, q)| Query::when(c, q)),
        ]
    })
}

fn count_json_quads(v: &Value) -> usize {
    match v {
        Value::Object(map) => {
            let own = usize::from(map.get("@type").and_then(Value::as_str) == Some("AddQuad"));
            own + map.values().map(count_json_quads).sum::<usize>()
        }
        Value::Array(items) => items.iter().map(count_json_quads).sum(),
        _ => 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn json_encoding_preserves_every_quad_write(q in query()) {
        let v = q.to_json();
        prop_assert_eq!(count_json_quads(&v), q.write_count());
    }

    #[test]
    fn json_encoding_is_deterministic(q in query()) {
        prop_assert_eq!(q.to_json_string(), q.clone().to_json_string());
    }
}
