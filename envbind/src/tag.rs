//! Parsing of raw `#[env = "NAME[,option...]"]` tags.

/// Options that follow the name in a raw tag, stored verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions<'a>(&'a str);

impl<'a> TagOptions<'a> {
    /// Whether `opt` is one of the comma-separated options.
    pub fn contains(&self, opt: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|token| token == opt)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The options exactly as written after the first comma.
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Split a raw tag into its name and options.
///
/// Everything before the first comma is the name, everything after it is
/// kept verbatim as the options. An empty tag yields an empty name, in which
/// case the caller derives a default key.
pub fn parse_tag(raw: &str) -> (&str, TagOptions<'_>) {
    match raw.split_once(',') {
        Some((name, options)) => (name, TagOptions(options)),
        None => (raw, TagOptions::default()),
    }
}
