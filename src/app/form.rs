//! Add-book form state.
//!
//! The form collects raw text for title and author plus a category chosen
//! from the fixed list. Nothing is trimmed or checked until submission, where
//! [`AddForm::submit`] hands back a validated [`NewBook`] or keeps the form
//! open with an error message.

use super::modes::FormField;
use crate::domain::{Category, NewBook, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub focus: FormField,
    /// Message from the last rejected submission, cleared on the next edit.
    pub error: Option<String>,
}

impl AddForm {
    /// Appends a character to the focused text field.
    ///
    /// On the category field, typing does nothing; categories are picked with
    /// [`AddForm::cycle_category`].
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Title => self.title.push(c),
            FormField::Author => self.author.push(c),
            FormField::Category => return,
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Title => {
                self.title.pop();
            }
            FormField::Author => {
                self.author.pop();
            }
            FormField::Category => return,
        }
        self.error = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Moves the category selection forward or backward through the fixed list.
    pub fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.next()
        } else {
            self.category.previous()
        };
        self.error = None;
    }

    /// Validates the current input.
    ///
    /// On success the form is reset to its initial state and the trimmed book is
    /// returned. On failure the input is kept, the error message is stored for
    /// display, and focus jumps to the offending field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::BookshelfError::Validation`] when title or author is blank.
    pub fn submit(&mut self) -> Result<NewBook> {
        let candidate = NewBook::new(self.title.clone(), self.author.clone(), self.category);

        match candidate.validate() {
            Ok(book) => {
                *self = Self::default();
                Ok(book)
            }
            Err(err) => {
                self.focus = if self.title.trim().is_empty() {
                    FormField::Title
                } else {
                    FormField::Author
                };
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Current text of a field, for rendering.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Category => self.category.label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut AddForm, s: &str) {
        for c in s.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut form = AddForm::default();
        type_str(&mut form, "Dune");
        form.focus_next();
        type_str(&mut form, "Frank Herbert");
        form.focus_next();
        type_str(&mut form, "ignored");

        assert_eq!(form.title, "Dune");
        assert_eq!(form.author, "Frank Herbert");
        assert_eq!(form.value(FormField::Category), "Fiction");
    }

    #[test]
    fn successful_submit_resets_the_form() {
        let mut form = AddForm::default();
        type_str(&mut form, "  Dune ");
        form.focus_next();
        type_str(&mut form, "Frank Herbert");
        form.cycle_category(true);
        form.cycle_category(true);

        let book = form.submit().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.category, Category::Technical);
        assert_eq!(form, AddForm::default());
    }

    #[test]
    fn rejected_submit_keeps_input_and_focuses_blank_field() {
        let mut form = AddForm::default();
        type_str(&mut form, "Dune");
        form.focus_next();
        type_str(&mut form, "   ");
        form.focus_next();

        assert!(form.submit().is_err());
        assert_eq!(form.title, "Dune");
        assert_eq!(form.focus, FormField::Author);
        assert_eq!(form.error.as_deref(), Some("Author is required"));

        form.push_char('X');
        assert!(form.error.is_none());
    }

    #[test]
    fn backspace_edits_only_text_fields() {
        let mut form = AddForm::default();
        type_str(&mut form, "Dunes");
        form.backspace();
        assert_eq!(form.title, "Dune");

        form.focus_previous();
        assert_eq!(form.focus, FormField::Category);
        form.backspace();
        assert_eq!(form.category, Category::Fiction);
    }
}
