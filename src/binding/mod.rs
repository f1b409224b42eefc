//! Binding of document elements to translation keys.
mod applier;
mod target;

pub use applier::{
    ApplyReport,
    Binding,
    BindingApplier,
    BindingWarning,
    translate_element,
};
pub use target::TargetProperty;
