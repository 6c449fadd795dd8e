//! Two-column label/value tables for the profile and diagnostic pages.

use maud::{html, Markup, Render};

#[derive(Debug)]
pub struct KeyValueTable<'a> {
    class: &'static str,
    rows: Vec<(&'a str, Markup)>,
}

impl<'a> KeyValueTable<'a> {
    const fn with_class(class: &'static str) -> Self {
        Self {
            class,
            rows: Vec::new(),
        }
    }

    /// Account details (`.profile-table`).
    #[must_use]
    pub const fn profile() -> Self {
        Self::with_class("profile-table")
    }

    /// Request/response dumps (`.debug-table`).
    #[must_use]
    pub const fn debug() -> Self {
        Self::with_class("debug-table")
    }

    #[must_use]
    pub fn row(mut self, label: &'a str, value: impl Render) -> Self {
        self.rows.push((label, value.render()));
        self
    }

    /// Adds the row only when there is something to show.
    #[must_use]
    pub fn row_if(self, label: &'a str, value: Option<impl Render>) -> Self {
        match value {
            Some(value) => self.row(label, value),
            None => self,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Render for KeyValueTable<'_> {
    fn render(&self) -> Markup {
        html! {
            table class=(self.class) {
                tbody {
                    @for (label, value) in &self.rows {
                        tr {
                            th scope="row" { (label) }
                            td { (value) }
                        }
                    }
                }
            }
        }
    }
}
