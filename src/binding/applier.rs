//! Writes resolved strings into marked elements.

use thiserror::Error;

use super::target::TargetProperty;
use crate::config::LocalizerSettings;
use crate::document::Document;
use crate::substitution::{
    SubstitutionError,
    try_resolve,
};
use crate::types::{
    Arguments,
    EffectiveTable,
};

/// A marked element for one localization pass.
///
/// Rediscovered on every pass because argument bags may change between passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding<N> {
    pub node: N,
    pub key: String,
    pub args: Arguments,
    pub target: TargetProperty,
}

/// A per-element problem that did not stop the pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingWarning {
    #[error("Couldn't parse args for {key}: {message}")]
    ArgumentParse { key: String, message: String },

    #[error("Could not find argument {{{{{placeholder}}}}} while translating {key}")]
    MissingArgumentOrKey { key: String, placeholder: String },

    #[error("Could not translate element content for {key}: no text node to write")]
    NoTranslatableTextFound { key: String },
}

/// Outcome of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Elements written.
    pub translated: usize,
    /// Marked elements whose key is not in the table.
    pub skipped: usize,
    pub warnings: Vec<BindingWarning>,
}

impl ApplyReport {
    fn warn(&mut self, warning: BindingWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Applies an effective table to the elements marked with the key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingApplier {
    key_attribute: String,
    args_attribute: String,
}

impl Default for BindingApplier {
    fn default() -> Self {
        Self::new(&LocalizerSettings::default())
    }
}

impl BindingApplier {
    #[must_use]
    pub fn new(settings: &LocalizerSettings) -> Self {
        Self {
            key_attribute: settings.key_attribute.clone(),
            args_attribute: settings.args_attribute.clone(),
        }
    }

    /// Translates the marked descendants of `root`, then `root` itself.
    ///
    /// Elements are independent: a problem with one is recorded in the report
    /// and never prevents the others from being translated.
    pub fn apply<D: Document>(
        &self,
        table: &EffectiveTable,
        document: &mut D,
        root: D::Node,
    ) -> ApplyReport {
        let (bindings, mut report) = self.collect_bindings(table, &*document, root);

        for binding in bindings {
            let Some(raw) = table.get(&binding.key) else {
                continue;
            };
            let value = match try_resolve(raw, &binding.args, table) {
                Ok(value) => value,
                Err(SubstitutionError::Missing { key: placeholder, partial }) => {
                    report.warn(BindingWarning::MissingArgumentOrKey {
                        key: binding.key.clone(),
                        placeholder,
                    });
                    partial
                }
            };
            if write(document, &binding, &value, &mut report) {
                report.translated += 1;
            }
        }

        tracing::debug!(
            translated = report.translated,
            skipped = report.skipped,
            warnings = report.warnings.len(),
            "Applied translations"
        );
        report
    }

    /// [`apply`](Self::apply) over `root`, or over the whole document when `None`.
    pub fn translate_element<D: Document>(
        &self,
        table: &EffectiveTable,
        document: &mut D,
        root: Option<D::Node>,
    ) -> ApplyReport {
        let root = root.unwrap_or_else(|| document.root());
        self.apply(table, document, root)
    }

    /// Finds the bindings under `root` (inclusive) whose key is in `table`.
    ///
    /// The returned report counts skipped elements and argument parse warnings.
    pub fn collect_bindings<D: Document>(
        &self,
        table: &EffectiveTable,
        document: &D,
        root: D::Node,
    ) -> (Vec<Binding<D::Node>>, ApplyReport) {
        let mut report = ApplyReport::default();
        let mut nodes = document.find_marked(root, &self.key_attribute);
        nodes.push(root);

        let bindings = nodes
            .into_iter()
            .filter_map(|node| {
                let key = document.attribute(node, &self.key_attribute)?;
                if key.is_empty() {
                    return None;
                }
                if !table.contains_key(&key) {
                    report.skipped += 1;
                    return None;
                }

                let args = match document.attribute(node, &self.args_attribute) {
                    None => Arguments::new(),
                    Some(text) => Arguments::from_json(&text).unwrap_or_else(|error| {
                        report.warn(BindingWarning::ArgumentParse {
                            key: key.clone(),
                            message: error.to_string(),
                        });
                        Arguments::new()
                    }),
                };
                let target = TargetProperty::from_key(&key);

                Some(Binding { node, key, args, target })
            })
            .collect();

        (bindings, report)
    }
}

/// Writes `value` for `binding`. Returns whether anything was written.
///
/// Text content of an element with child elements goes into its first
/// non-blank text node; other non-blank text nodes are emptied and the child
/// elements are left alone.
fn write<D: Document>(
    document: &mut D,
    binding: &Binding<D::Node>,
    value: &str,
    report: &mut ApplyReport,
) -> bool {
    if binding.target != TargetProperty::TextContent || !document.has_element_children(binding.node)
    {
        document.set_property(binding.node, binding.target, value);
        return true;
    }

    let mut found = false;
    for (text_node, text) in document.text_children(binding.node) {
        if text.trim().is_empty() {
            continue;
        }
        if found {
            document.set_text(text_node, "");
        } else {
            document.set_text(text_node, value);
            found = true;
        }
    }

    if !found {
        report.warn(BindingWarning::NoTranslatableTextFound { key: binding.key.clone() });
    }
    found
}

/// [`BindingApplier::translate_element`] with the default marker attributes.
pub fn translate_element<D: Document>(
    table: &EffectiveTable,
    document: &mut D,
    root: Option<D::Node>,
) -> ApplyReport {
    BindingApplier::default().translate_element(table, document, root)
}
