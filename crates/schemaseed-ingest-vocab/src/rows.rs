//! Typed vocabulary rows.

use std::collections::HashSet;

/// A comma-separated list of identifiers as found in a vocabulary table cell.
///
/// Tokens are trimmed and empty tokens dropped, so an absent cell, a blank
/// cell and `" , "` all yield an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierList(Vec<String>);

impl IdentifierList {
    pub fn parse(cell: &str) -> Self {
        Self(
            cell.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn from_cell(cell: Option<&str>) -> Self {
        cell.map(Self::parse).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// More than one identifier: modelled as a union placeholder.
    pub fn is_union(&self) -> bool {
        self.0.len() > 1
    }

    /// The sole identifier, if there is exactly one.
    pub fn single(&self) -> Option<&str> {
        match self.0.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One vocabulary type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRow {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub sub_types: IdentifierList,
    pub sub_type_of: IdentifierList,
}

impl TypeRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            description: None,
            sub_types: IdentifierList::default(),
            sub_type_of: IdentifierList::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_sub_types(mut self, cell: &str) -> Self {
        self.sub_types = IdentifierList::parse(cell);
        self
    }

    pub fn with_sub_type_of(mut self, cell: &str) -> Self {
        self.sub_type_of = IdentifierList::parse(cell);
        self
    }
}

/// One vocabulary property definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub id: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub domain_includes: IdentifierList,
    pub range_includes: IdentifierList,
}

impl PropertyRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            description: None,
            domain_includes: IdentifierList::default(),
            range_includes: IdentifierList::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_domain(mut self, cell: &str) -> Self {
        self.domain_includes = IdentifierList::parse(cell);
        self
    }

    pub fn with_range(mut self, cell: &str) -> Self {
        self.range_includes = IdentifierList::parse(cell);
        self
    }

    /// Synthetic union class standing in for a multi-class domain.
    pub fn domain_placeholder(&self) -> String {
        format!("{}Domain", self.id)
    }

    /// Synthetic union class standing in for a multi-class range.
    pub fn range_placeholder(&self) -> String {
        format!("{}Range", self.id)
    }
}

/// Every known type id; references outside this set are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeIdentifierSet(HashSet<String>);

impl TypeIdentifierSet {
    pub fn from_rows(rows: &[TypeRow]) -> Self {
        rows.iter().map(|row| row.id.clone()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TypeIdentifierSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
