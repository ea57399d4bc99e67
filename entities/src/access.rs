use serde::Serialize;
use shared_kernel::string_key;
use std::cmp::Ordering;

string_key!(AccessId);

const PLACEHOLDERS: [&str; 2] = ["null", "undefined"];

impl AccessId {
    /// Blank values and the `null`/`undefined` placeholders written by older clients are not ids.
    pub fn parse(raw: Option<String>) -> Option<AccessId> {
        let raw = raw?;
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || PLACEHOLDERS
                .iter()
                .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
        {
            return None;
        }
        Some(AccessId(raw))
    }

    fn collation_order(&self, other: &AccessId) -> Ordering {
        self.0
            .to_lowercase()
            .cmp(&other.0.to_lowercase())
            .then_with(|| self.0.cmp(&other.0))
    }
}

/// Distinct access ids, ordered case-insensitively with exact byte order breaking ties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessIds(Vec<AccessId>);

impl AccessIds {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessId> {
        self.0.iter()
    }
}

impl FromIterator<Option<String>> for AccessIds {
    fn from_iter<T: IntoIterator<Item = Option<String>>>(iter: T) -> Self {
        let mut ids: Vec<AccessId> = iter.into_iter().filter_map(AccessId::parse).collect();
        ids.sort_by(AccessId::collation_order);
        ids.dedup();
        AccessIds(ids)
    }
}
