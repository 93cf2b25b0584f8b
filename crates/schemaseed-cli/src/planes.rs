//! Airline tutorial: a small hand-written schema and a handful of airports.

use schemaseed_woql::{
    ClassBuilder, NamedQuery, PrimitiveKind, PropertyBuilder, PropertyRange, Query, Term,
};

pub const DEFAULT_DB: &str = "pyplane2";
pub const DEFAULT_LABEL: &str = "Airplane Graph";
pub const AIRPORT_CODES: [&str; 4] = ["DUB", "LHR", "ETC", "XXX"];

const SCHEMA_PREFIX: &str = "scm:";
const DOCUMENT_PREFIX: &str = "doc:";

fn scm(name: &str) -> String {
    format!("{SCHEMA_PREFIX}{name}")
}

fn property(name: &str, range: impl Into<PropertyRange>, label: &str) -> PropertyBuilder {
    PropertyBuilder::new(scm(name), range).label(label)
}

fn entity(name: &str, label: &str, description: &str) -> ClassBuilder {
    ClassBuilder::document(scm(name))
        .label(label)
        .description(description)
        .parent(scm("EphemeralEntity"))
}

pub fn schema_query() -> Query {
    let base = ClassBuilder::document(scm("EphemeralEntity"))
        .label("Ephemeral Entity")
        .description("An entity that has a lifespan")
        .property(property("lifespan_start", PrimitiveKind::DateTime, "Existed From"))
        .property(property("lifespan_end", PrimitiveKind::DateTime, "Existed To"));

    let country = entity("Country", "Country", "A nation state")
        .property(property("iso_code", PrimitiveKind::String, "ISO Code"))
        .property(property("fip_code", PrimitiveKind::String, "FIP Code"));

    let airline = entity("Airline", "Airline", "An operator of airplane flights")
        .property(property("registered_in", scm("Country").as_str(), "Registered In"));

    let airport = entity("Airport", "Airport", "An airport where flights terminate")
        .property(property("situated_in", scm("Country").as_str(), "Situated In"));

    let flight = entity("Flight", "Flight", "A flight between airports")
        .property(property("departs", scm("Airport").as_str(), "Departs"))
        .property(property("arrives", scm("Airport").as_str(), "Arrives"))
        .property(property("operated_by", scm("Airline").as_str(), "Operated By"));

    Query::when(
        Query::True,
        Query::and([base, country, airline, airport, flight].map(Query::from)),
    )
}

fn match_clause(code: &str, class: &str, i: usize) -> Query {
    Query::and([
        Query::idgen(
            format!("{DOCUMENT_PREFIX}{class}"),
            vec![Term::string(code)],
            Term::var(format!("ID_{i}")),
        ),
        Query::cast(
            Term::string(code),
            PrimitiveKind::String.xsd_type(),
            Term::var(format!("Label_{i}")),
        ),
    ])
}

fn insert_clause(class: &str, i: usize) -> Query {
    Query::insert(
        Term::var(format!("ID_{i}")),
        scm(class),
        Some(Term::var(format!("Label_{i}"))),
    )
}

/// One instance per code, ids derived from the code and labelled with it.
pub fn multi_insert_query(codes: &[&str], class: &str) -> Query {
    let matches = codes
        .iter()
        .enumerate()
        .map(|(i, code)| match_clause(code, class, i));
    let inserts = (0..codes.len()).map(|i| insert_clause(class, i));
    Query::when(Query::and(matches), Query::and(inserts))
}

pub fn data_query() -> Query {
    multi_insert_query(&AIRPORT_CODES, "Airport")
}

pub fn batches() -> Vec<NamedQuery> {
    vec![
        NamedQuery::new("planes-schema", schema_query()),
        NamedQuery::new("planes-data", data_query()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaseed_woql::Graph;

    #[test]
    fn schema_declares_five_classes_under_true() {
        let Query::When { condition, consequent } = schema_query() else {
            panic!("expected When");
        };
        assert_eq!(*condition, Query::True);
        let Query::And(classes) = *consequent else {
            panic!("expected And");
        };
        assert_eq!(classes.len(), 5);
        let flight = &classes[4];
        assert!(matches!(flight, Query::And(parts) if parts.contains(
            &Query::schema_quad("scm:operated_by", "rdfs:range", "scm:Airline")
        )));
    }

    #[test]
    fn country_inherits_from_ephemeral_entity() {
        let q = schema_query();
        let json = q.to_json_string();
        assert!(json.contains("scm:EphemeralEntity"));
        let Query::When { consequent, .. } = q else {
            unreachable!()
        };
        let Query::And(classes) = *consequent else {
            unreachable!()
        };
        assert!(matches!(&classes[1], Query::And(parts) if parts.contains(
            &Query::schema_quad("scm:Country", "rdfs:subClassOf", "scm:EphemeralEntity")
        )));
    }

    #[test]
    fn data_query_binds_one_id_and_label_per_code() {
        let Query::When { condition, consequent } = data_query() else {
            panic!("expected When");
        };
        let Query::And(matches) = *condition else {
            panic!("expected And");
        };
        assert_eq!(matches.len(), AIRPORT_CODES.len());
        for (i, m) in matches.iter().enumerate() {
            let Query::And(parts) = m else { panic!() };
            let code = Term::string(AIRPORT_CODES[i]);
            assert_eq!(
                parts[0],
                Query::idgen("doc:Airport", vec![code.clone()], Term::var(format!("ID_{i}")))
            );
            assert_eq!(
                parts[1],
                Query::cast(code, "xsd:string", Term::var(format!("Label_{i}")))
            );
        }
        let Query::And(inserts) = *consequent else {
            panic!("expected And");
        };
        assert_eq!(
            inserts[3],
            Query::And(vec![
                Query::add_quad(
                    Term::var("ID_3"),
                    "rdf:type",
                    Term::node("scm:Airport"),
                    Graph::Instance
                ),
                Query::add_quad(
                    Term::var("ID_3"),
                    "rdfs:label",
                    Term::var("Label_3"),
                    Graph::Instance
                ),
            ])
        );
    }
}
