use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::media::QuickContent;
use crate::models::Hymn;
use crate::parse::parse_hymn_text;

/// Internal representation of the "add hymn" form fields.
#[derive(Default, Clone)]
pub(crate) struct HymnForm {
    pub(crate) number: String,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) active: HymnField,
    pub(crate) error: Option<String>,
    /// Display label of the hymn being edited, with the number it belongs to.
    pub(crate) label: Option<(i64, String)>,
}

/// Fields available within the hymn form.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum HymnField {
    Number,
    Title,
    #[default]
    Text,
}

impl HymnForm {
    /// Populate the form from a stored hymn so it can be edited and saved
    /// back under the same number.
    pub(crate) fn from_hymn(hymn: &Hymn) -> Self {
        let mut text = String::new();
        for (index, verse) in hymn.verses.iter().enumerate() {
            text.push_str(&format!("{}. {verse}\n", index + 1));
            if index == 0 {
                if let Some(refrain) = hymn.refrain_text() {
                    text.push_str(&format!("Refrain:\n{refrain}\n"));
                }
            }
        }
        Self {
            number: hymn.number.to_string(),
            title: hymn.title.clone(),
            text,
            active: HymnField::Text,
            error: None,
            label: hymn
                .display_number
                .clone()
                .map(|label| (hymn.number, label)),
        }
    }

    /// Cycle focus number -> title -> text.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            HymnField::Number => HymnField::Title,
            HymnField::Title => HymnField::Text,
            HymnField::Text => HymnField::Number,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            HymnField::Number => HymnField::Text,
            HymnField::Title => HymnField::Number,
            HymnField::Text => HymnField::Title,
        };
    }

    /// Append a character to the active field, validating allowed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            HymnField::Number => {
                if ch.is_ascii_digit() {
                    self.number.push(ch);
                    true
                } else {
                    false
                }
            }
            HymnField::Title => {
                if !ch.is_control() {
                    self.title.push(ch);
                    true
                } else {
                    false
                }
            }
            HymnField::Text => {
                if !ch.is_control() {
                    self.text.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Enter breaks the line in the text area and advances focus elsewhere.
    pub(crate) fn enter(&mut self) {
        match self.active {
            HymnField::Text => self.text.push('\n'),
            _ => self.next_field(),
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            HymnField::Number => {
                self.number.pop();
            }
            HymnField::Title => {
                self.title.pop();
            }
            HymnField::Text => {
                self.text.pop();
            }
        }
    }

    /// Insert pasted text. Single-line fields keep only what they accept.
    pub(crate) fn paste(&mut self, pasted: &str) {
        match self.active {
            HymnField::Number => self
                .number
                .extend(pasted.chars().filter(|ch| ch.is_ascii_digit())),
            HymnField::Title => {
                if let Some(line) = pasted.lines().map(str::trim).find(|line| !line.is_empty()) {
                    self.title.push_str(line);
                }
            }
            HymnField::Text => self.text.push_str(&normalize_newlines(pasted)),
        }
    }

    /// Validate the inputs and build the hymn ready for persistence.
    pub(crate) fn parse_inputs(&self) -> Result<Hymn> {
        let parsed = parse_hymn_text(&self.text)?;
        let number_raw = self.number.trim();
        let number = if number_raw.is_empty() {
            None
        } else {
            Some(
                number_raw
                    .parse::<i64>()
                    .context("Hymn number must be an integer.")?,
            )
        };
        let mut hymn = parsed.into_hymn(number, Some(self.title.as_str()))?;
        // A label only describes the number it was stored under.
        if let Some((labelled, label)) = &self.label {
            if *labelled == hymn.number {
                hymn.display_number = Some(label.clone());
            }
        }
        Ok(hymn)
    }

    /// Render a single-line field for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: HymnField) -> Line<'static> {
        let (value, placeholder) = match field {
            HymnField::Number => (&self.number, "<from text>"),
            HymnField::Title => (&self.title, "<from text>"),
            HymnField::Text => (&self.text, "<paste hymn text>"),
        };
        let is_active = self.active == field;

        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: HymnField) -> usize {
        match field {
            HymnField::Number => self.number.chars().count(),
            HymnField::Title => self.title.chars().count(),
            HymnField::Text => self.text.lines().last().map_or(0, |line| line.chars().count()),
        }
    }
}

/// Multi-line text entered for the quick display.
#[derive(Default, Clone)]
pub(crate) struct QuickForm {
    pub(crate) text: String,
    pub(crate) error: Option<String>,
}

impl QuickForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub(crate) fn newline(&mut self) {
        self.text.push('\n');
    }

    pub(crate) fn backspace(&mut self) {
        self.text.pop();
    }

    pub(crate) fn paste(&mut self, pasted: &str) {
        self.text.push_str(&normalize_newlines(pasted));
    }

    pub(crate) fn parse_inputs(&self) -> Result<QuickContent> {
        if self.text.trim().is_empty() {
            return Err(anyhow!("Nothing to display."));
        }
        Ok(QuickContent::classify(&self.text))
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmHymnDelete {
    pub(crate) number: i64,
    pub(crate) title: String,
}

impl ConfirmHymnDelete {
    /// Build the confirmation state from the hymn being considered.
    pub(crate) fn from(hymn: &Hymn) -> Self {
        Self {
            number: hymn.number,
            title: hymn.title.clone(),
        }
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn number_field_only_accepts_digits() {
        let mut form = HymnForm {
            active: HymnField::Number,
            ..HymnForm::default()
        };
        assert!(form.push_char('4'));
        assert!(!form.push_char('x'));
        form.paste("1a2");
        assert_eq!(form.number, "412");
    }

    #[test]
    fn enter_moves_focus_outside_text_area() {
        let mut form = HymnForm {
            active: HymnField::Number,
            ..HymnForm::default()
        };
        form.enter();
        assert_eq!(form.active, HymnField::Title);
        form.enter();
        assert_eq!(form.active, HymnField::Text);
        form.enter();
        assert_eq!(form.text, "\n");
        form.previous_field();
        assert_eq!(form.active, HymnField::Title);
    }

    #[test]
    fn parse_inputs_applies_overrides() {
        let mut form = HymnForm::default();
        form.paste("Old Title\r\n1. verse one\r\nRefrain:\r\nchorus\r\n2. verse two");
        form.number = "88".into();

        let hymn = form.parse_inputs().unwrap();
        assert_eq!(hymn.number, 88);
        assert_eq!(hymn.title, "Old Title");
        assert_eq!(hymn.verses, vec!["verse one".to_string(), "verse two".to_string()]);
        assert_eq!(hymn.refrain.as_deref(), Some("chorus"));
    }

    #[test]
    fn parse_inputs_surfaces_parser_errors() {
        let form = HymnForm {
            text: "1. verse".into(),
            title: "Title".into(),
            ..HymnForm::default()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Please provide a hymn number.");
    }

    #[test]
    fn form_from_hymn_round_trips() {
        let hymn = Hymn::new(42, "Round", vec!["a\nb".into(), "c".into()]).with_refrain("r");
        let form = HymnForm::from_hymn(&hymn);
        assert_eq!(form.parse_inputs().unwrap(), hymn);
    }

    #[test]
    fn editing_keeps_display_label_for_same_number() {
        let hymn = Hymn::new(9003, "Youth", vec!["a".into()]).with_display_number("YS3");
        let mut form = HymnForm::from_hymn(&hymn);
        assert_eq!(form.parse_inputs().unwrap().display_number.as_deref(), Some("YS3"));

        form.number = "9004".into();
        assert_eq!(form.parse_inputs().unwrap().display_number, None);
    }

    #[test]
    fn quick_form_requires_text() {
        let mut form = QuickForm::default();
        assert!(form.parse_inputs().is_err());
        form.paste("1. One\n2. Two");
        assert!(form.parse_inputs().unwrap().is_paginated());
    }
}
