//! `{{key}}` placeholder expansion.
//!
//! A placeholder is resolved against the element's arguments first, then
//! against the effective table. Expansion is a single left-to-right pass:
//! text coming from a substituted value is never scanned again, so a value
//! containing a literal `{{...}}` ends up in the output verbatim.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{
    Arguments,
    EffectiveTable,
};

/// `{{ key }}` where the key is ASCII letters and dots, with optional inner whitespace.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z.]+)\s*\}\}").expect("placeholder pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    /// No argument or translation named `key`.
    ///
    /// `partial` holds what was substituted before the failing placeholder,
    /// followed by the rest of the input untouched.
    #[error("Could not find argument {{{{{key}}}}}")]
    Missing { key: String, partial: String },
}

/// Expands every placeholder in `raw`, failing on the first unknown key.
pub fn try_resolve(
    raw: &str,
    args: &Arguments,
    table: &EffectiveTable,
) -> Result<String, SubstitutionError> {
    let mut output = String::with_capacity(raw.len());
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(raw) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let key = key.as_str();

        let Some(value) = args.get(key).or_else(|| table.get(key)) else {
            output.push_str(raw.get(cursor..).unwrap_or_default());
            return Err(SubstitutionError::Missing { key: key.to_string(), partial: output });
        };

        output.push_str(raw.get(cursor..whole.start()).unwrap_or_default());
        output.push_str(value);
        cursor = whole.end();
    }

    output.push_str(raw.get(cursor..).unwrap_or_default());
    Ok(output)
}

/// Like [`try_resolve`], but logs a missing key and returns the partial result.
#[must_use]
pub fn resolve(raw: &str, args: &Arguments, table: &EffectiveTable) -> String {
    try_resolve(raw, args, table).unwrap_or_else(|error| {
        tracing::warn!("{error}");
        let SubstitutionError::Missing { partial, .. } = error;
        partial
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{
        arguments as args,
        effective_table as table,
    };

    #[rstest]
    fn cross_key_fallback_into_the_table() {
        let table = table(&[("greeting", "Hello {{name}}"), ("name", "World")]);

        // The referenced value is not expanded again; an element keyed `greeting` still reads
        // "Hello World", see `binding::applier::tests::table_entry_referenced_by_key_is_expanded`.
        assert_that!(resolve("{{greeting}}", &Arguments::new(), &table), eq("Hello {{name}}"));
        assert_that!(resolve("Hello {{name}}", &Arguments::new(), &table), eq("Hello World"));
    }

    #[rstest]
    fn arguments_take_precedence_over_table_keys() {
        let table = table(&[("greeting", "Hi {{name}}"), ("name", "World")]);

        assert_that!(resolve("Hi {{name}}", &args(&[("name", "Ana")]), &table), eq("Hi Ana"));
    }

    #[rstest]
    fn missing_key_leaves_placeholder_untouched() {
        let result = try_resolve("{{missing}}", &Arguments::new(), &EffectiveTable::default());

        assert_that!(
            result,
            err(eq(&SubstitutionError::Missing {
                key: "missing".to_string(),
                partial: "{{missing}}".to_string(),
            }))
        );
        assert_that!(
            resolve("{{missing}}", &Arguments::new(), &EffectiveTable::default()),
            eq("{{missing}}")
        );
    }

    #[rstest]
    fn missing_key_keeps_earlier_substitutions_and_stops() {
        let args = args(&[("a", "1"), ("c", "3")]);

        assert_that!(
            resolve("{{a}} {{b}} {{c}}", &args, &EffectiveTable::default()),
            eq("1 {{b}} {{c}}")
        );
    }

    #[rstest]
    fn substituted_placeholder_text_is_not_expanded() {
        let table = table(&[("name", "World")]);

        assert_that!(
            resolve("Hi {{user}}", &args(&[("user", "{{name}}")]), &table),
            eq("Hi {{name}}")
        );
    }

    #[rstest]
    #[case::plain("no placeholders", "no placeholders")]
    #[case::inner_whitespace("{{ name }}!", "Ana!")]
    #[case::dotted_key("{{user.first}}", "Ana")]
    #[case::repeated("{{name}}/{{name}}", "Ana/Ana")]
    #[case::digits_are_not_keys("{{name2}}", "{{name2}}")]
    #[case::unclosed("{{name", "{{name")]
    #[case::empty("{{}}", "{{}}")]
    fn placeholder_grammar(#[case] raw: &str, #[case] expected: &str) {
        let args = args(&[("name", "Ana"), ("user.first", "Ana")]);

        assert_that!(resolve(raw, &args, &EffectiveTable::default()), eq(expected));
    }

    #[rstest]
    fn error_message_names_the_placeholder() {
        let error = try_resolve("{{who}}", &Arguments::new(), &EffectiveTable::default()).unwrap_err();

        assert_that!(error.to_string(), eq("Could not find argument {{who}}"));
    }
}
