#![forbid(unsafe_code)]

//! Minimal `tag.class.class` selectors.
//!
//! Renderers only ever look elements up by tag name and class list
//! (`ul.error-list`, `span.form-control-feedback`, `.form-group`), so the
//! selector language is limited to exactly that: an optional tag followed by
//! zero or more `.class` segments. Every class must be present for a match.

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    /// Parse `tag`, `.class`, or `tag.class1.class2`.
    ///
    /// Empty segments are ignored; an empty input matches every element.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut segments = input.trim().split('.');
        let tag = segments
            .next()
            .filter(|tag| !tag.is_empty())
            .map(str::to_ascii_lowercase);
        let classes = segments
            .filter(|class| !class.is_empty())
            .map(str::to_owned)
            .collect();
        Self { tag, classes }
    }

    /// Selector matching any element of `tag`.
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            classes: Vec::new(),
        }
    }

    /// Selector matching any element carrying every class of `class_list`.
    #[must_use]
    pub fn class(class_list: &str) -> Self {
        Self {
            tag: None,
            classes: class_list.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Add the classes of a whitespace-separated list.
    #[must_use]
    pub fn and_class(mut self, class_list: &str) -> Self {
        self.classes
            .extend(class_list.split_whitespace().map(str::to_owned));
        self
    }

    /// Whether an element with `tag` and `class_name` matches.
    #[must_use]
    pub fn matches(&self, tag: &str, class_name: &str) -> bool {
        if let Some(expected) = &self.tag
            && !expected.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.classes
            .iter()
            .all(|class| class_name.split_whitespace().any(|have| have == class))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tag, self.classes.is_empty()) {
            (None, true) => f.write_str("*")?,
            (Some(tag), _) => f.write_str(tag)?,
            (None, false) => {}
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}
