//! Fallback merging of per-locale tables.

use crate::types::{
    EffectiveTable,
    Locale,
    TablesByLocale,
    TranslationTable,
};

/// Flattens the tables of `locales` (most-preferred first) into one table.
///
/// Folds least-preferred first so more-preferred locales overwrite. Locales
/// without a table contribute nothing.
#[must_use]
pub fn merge(locales: &[Locale], tables: &TablesByLocale) -> EffectiveTable {
    let mut merged = TranslationTable::new();

    for locale in locales.iter().rev() {
        if let Some(table) = tables.get(locale) {
            merged.extend(table.iter().map(|(key, value)| (key.clone(), value.clone())));
        }
    }

    EffectiveTable::from(merged)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn tables() -> TablesByLocale {
        let table = |entries: &[(&str, &str)]| {
            Arc::new(
                entries
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect::<TranslationTable>(),
            )
        };
        TablesByLocale::from([
            (Locale::from("en"), table(&[("hello", "Hello"), ("bye", "Bye"), ("only.en", "E")])),
            (Locale::from("fr"), table(&[("hello", "Bonjour"), ("bye", "Au revoir")])),
            (Locale::from("fr-CA"), table(&[("hello", "Allô")])),
        ])
    }

    fn locales(codes: &[&str]) -> Vec<Locale> {
        codes.iter().copied().map(Locale::from).collect()
    }

    #[googletest::test]
    fn more_preferred_locales_win() {
        let merged = merge(&locales(&["fr-CA", "fr", "en"]), &tables());

        expect_that!(merged.get("hello"), some(eq("Allô")));
        expect_that!(merged.get("bye"), some(eq("Au revoir")));
        expect_that!(merged.get("only.en"), some(eq("E")));
        expect_that!(merged.len(), eq(3));
    }

    #[rstest]
    fn single_locale_is_unchanged() {
        let merged = merge(&locales(&["fr"]), &tables());

        assert_eq!(
            merged,
            [("hello", "Bonjour"), ("bye", "Au revoir")].into_iter().collect::<EffectiveTable>()
        );
    }

    #[rstest]
    fn missing_tables_are_empty() {
        let merged = merge(&locales(&["de", "fr-CA"]), &tables());

        assert_eq!(merged, [("hello", "Allô")].into_iter().collect::<EffectiveTable>());
    }

    #[rstest]
    fn empty_locale_list_is_empty() {
        assert!(merge(&[], &tables()).is_empty());
    }

    #[rstest]
    #[case(&["fr", "en", "fr"], &["fr", "en"])]
    #[case(&["en", "en"], &["en"])]
    #[case(&["fr-CA", "fr", "fr-CA", "en", "fr"], &["fr-CA", "fr", "en"])]
    fn duplicate_locales_keep_first_occurrence(
        #[case] with_duplicates: &[&str],
        #[case] deduplicated: &[&str],
    ) {
        assert_eq!(
            merge(&locales(with_duplicates), &tables()),
            merge(&locales(deduplicated), &tables())
        );
    }
}
