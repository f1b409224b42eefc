/// Where a resolved string is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetProperty {
    /// The element's text, the default when the key names no attribute.
    #[default]
    TextContent,
    InnerHtml,
    Title,
    Alt,
}

impl TargetProperty {
    /// Name as it appears in a key suffix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TextContent => "textContent",
            Self::InnerHtml => "innerHTML",
            Self::Title => "title",
            Self::Alt => "alt",
        }
    }

    /// Whitelisted suffix names, exact match only.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::TextContent, Self::InnerHtml, Self::Title, Self::Alt]
            .into_iter()
            .find(|property| property.name() == name)
    }

    /// Target for a translation key.
    ///
    /// `btn.title` writes the `title` attribute; anything else, including a
    /// key that starts with the dot (`.title`), writes the text content.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.rfind('.') {
            Some(index) if index > 0 => {
                key.get(index + 1..).and_then(Self::from_name).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }
}
