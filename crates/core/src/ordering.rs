//! `?ordering=` parameter parsing shared by the list endpoints.
//!
//! The value is a comma-separated list of field names, each optionally
//! prefixed with `-` for descending order (e.g. `-year,title`). Unknown
//! fields are dropped; if nothing valid remains the caller's default
//! ordering applies.

/// One `ORDER BY` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub descending: bool,
}

/// Parse a raw ordering value, keeping only fields `parse_field` accepts.
///
/// Repeated fields keep their first occurrence.
pub fn parse_ordering<F, P>(raw: Option<&str>, parse_field: P) -> Vec<SortKey<F>>
where
    F: Copy + PartialEq,
    P: Fn(&str) -> Option<F>,
{
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut keys: Vec<SortKey<F>> = Vec::new();
    for term in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (name, descending) = match term.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (term, false),
        };
        let Some(field) = parse_field(name) else {
            continue;
        };
        if keys.iter().any(|k| k.field == field) {
            continue;
        }
        keys.push(SortKey { field, descending });
    }
    keys
}
