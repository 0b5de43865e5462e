use super::fragment::PredicateSet;
use crate::constants::sql::FRAGMENT_SEPARATOR;

/// Joins compiled fragments into one boolean expression
///
/// No parentheses are added around the result or around individual fragments.
/// Callers embedding the output in a larger expression must group it themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlFragmentJoiner;

impl SqlFragmentJoiner {
    pub fn join<I, S>(fragments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sql = String::new();
        for (index, fragment) in fragments.into_iter().enumerate() {
            if index > 0 {
                sql.push_str(FRAGMENT_SEPARATOR);
            }
            sql.push_str(fragment.as_ref());
        }
        sql
    }

    /// Ordinary fragments followed by JSON fragments
    pub fn join_set(set: &PredicateSet) -> String {
        Self::join(set.iter())
    }
}
