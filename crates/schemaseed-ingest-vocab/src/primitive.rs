//! Mapping from vocabulary scalar types to native primitive kinds.

use schemaseed_woql::PrimitiveKind;

pub const SCHEMA_ORG_NS: &str = "http://schema.org/";

/// Fixed, ordered mapping from a vocabulary's scalar type ids to the target
/// schema's primitive kinds.
///
/// Two entries are distinguished as roots: every other `string` entry is a
/// subclass of the text root and every other `datetime` entry a subclass of
/// the datetime root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimitiveTypeMap {
    entries: Vec<(String, PrimitiveKind)>,
    text_root: String,
    datetime_root: String,
}

impl PrimitiveTypeMap {
    /// Build a map from ordered entries. A repeated key keeps its first
    /// position and its last kind, so every key maps to exactly one kind.
    pub fn new(
        entries: impl IntoIterator<Item = (String, PrimitiveKind)>,
        text_root: impl Into<String>,
        datetime_root: impl Into<String>,
    ) -> Self {
        let mut out: Vec<(String, PrimitiveKind)> = Vec::new();
        for (key, kind) in entries {
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = kind,
                None => out.push((key, kind)),
            }
        }
        Self {
            entries: out,
            text_root: text_root.into(),
            datetime_root: datetime_root.into(),
        }
    }

    /// The schema.org scalar types.
    pub fn schema_org() -> Self {
        let table = [
            ("Boolean", PrimitiveKind::Boolean),
            ("Text", PrimitiveKind::String),
            ("Date", PrimitiveKind::DateTime),
            ("DateTime", PrimitiveKind::DateTime),
            ("URL", PrimitiveKind::String),
            ("XPathType", PrimitiveKind::String),
            // Integer is also a subType of Number in the types table.
            ("Integer", PrimitiveKind::Integer),
            ("Number", PrimitiveKind::Integer),
            ("Float", PrimitiveKind::Decimal),
            ("Thing", PrimitiveKind::String),
        ];
        Self::new(
            table
                .into_iter()
                .map(|(local, kind)| (format!("{SCHEMA_ORG_NS}{local}"), kind)),
            format!("{SCHEMA_ORG_NS}Thing"),
            format!("{SCHEMA_ORG_NS}DateTime"),
        )
    }

    pub fn get(&self, id: &str) -> Option<PrimitiveKind> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, kind)| *kind)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PrimitiveKind)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn text_root(&self) -> &str {
        &self.text_root
    }

    pub fn datetime_root(&self) -> &str {
        &self.datetime_root
    }
}

impl Default for PrimitiveTypeMap {
    fn default() -> Self {
        Self::schema_org()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_org_table_covers_scalar_types() {
        let map = PrimitiveTypeMap::schema_org();
        assert_eq!(map.len(), 10);
        assert_eq!(map.get("http://schema.org/Date"), Some(PrimitiveKind::DateTime));
        assert_eq!(map.get("http://schema.org/Float"), Some(PrimitiveKind::Decimal));
        assert_eq!(map.get("http://schema.org/Person"), None);
        assert_eq!(map.text_root(), "http://schema.org/Thing");
        assert_eq!(map.datetime_root(), "http://schema.org/DateTime");
    }

    #[test]
    fn repeated_key_keeps_one_kind_and_first_position() {
        let map = PrimitiveTypeMap::new(
            [
                ("A".to_string(), PrimitiveKind::String),
                ("B".to_string(), PrimitiveKind::Integer),
                ("A".to_string(), PrimitiveKind::Boolean),
            ],
            "A",
            "B",
        );
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(map.get("A"), Some(PrimitiveKind::Boolean));
    }
}
