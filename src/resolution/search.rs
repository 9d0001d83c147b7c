use icu_collator::{Collator, CollatorOptions};

use crate::errors::{MetanavError, Result};
use crate::types::*;

use super::PathResolver;

/// Builds the collator used to order names shown to a user.
///
/// Root locale, default (tertiary) strength: punctuation sorts before digits,
/// digits before letters, and lowercase before uppercase on otherwise equal
/// names.
pub(super) fn name_collator() -> Result<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new()).map_err(|e| {
        MetanavError::Collation {
            message: e.to_string(),
        }
    })
}

impl PathResolver<'_> {
    /// Searches entity types by case-insensitive substring of their full name.
    ///
    /// Internal/system types are never returned. Plain types come first, then
    /// collection types, each group sorted by name. `None` or an empty query
    /// matches every remaining type.
    pub fn search_entities(&self, query: Option<&str>) -> Vec<EntityType> {
        let needle = query.unwrap_or_default().to_lowercase();

        let (mut collections, mut plain): (Vec<&EntityType>, Vec<&EntityType>) = self
            .metadata
            .entities
            .values()
            .filter(|e| !self.config.is_hidden(&e.full_name))
            .filter(|e| e.full_name.to_lowercase().contains(&needle))
            .partition(|e| self.config.is_collection(&e.full_name));

        plain.sort_by(|a, b| self.collator.compare(&a.full_name, &b.full_name));
        collections.sort_by(|a, b| self.collator.compare(&a.full_name, &b.full_name));

        tracing::debug!(
            query = %needle,
            plain = plain.len(),
            collections = collections.len(),
            "entity search"
        );

        plain.into_iter().chain(collections).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let collator = name_collator().unwrap();
        let mut names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        names.sort_by(|a, b| collator.compare(a, b));
        names
    }

    #[test]
    fn punctuation_sorts_before_digits() {
        assert_eq!(
            sorted(&["SP1", "SP_X", "SP.X", "SP(X", "SP-X"]),
            vec!["SP_X", "SP-X", "SP.X", "SP(X", "SP1"]
        );
    }

    #[test]
    fn digits_sort_before_letters() {
        assert_eq!(
            sorted(&["SP.List", "SP.2", "SP.10", "SP._Hidden"]),
            vec!["SP._Hidden", "SP.10", "SP.2", "SP.List"]
        );
    }

    #[test]
    fn case_is_a_tie_breaker() {
        let collator = name_collator().unwrap();
        assert_eq!(collator.compare("apple", "Banana"), Ordering::Less);
        assert_eq!(collator.compare("Zebra", "apple"), Ordering::Greater);
        assert_eq!(collator.compare("SP.Web", "SP.web"), Ordering::Greater);
        assert_eq!(collator.compare("SP.List", "SP.ListItem"), Ordering::Less);
    }
}
