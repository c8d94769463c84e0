use std::mem;

use anyhow::{anyhow, Result};
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::catalog::Hymnal;
use crate::db::HymnRepository;
use crate::liturgy::Liturgy;
use crate::media::QuickContent;
use crate::models::{Hymn, ItemKind};
use crate::scripture::{
    fetch_passage, format_reference, parse_reference, ScriptureReference, VerseSource,
};

use super::forms::{ConfirmHymnDelete, HymnField, HymnForm, QuickForm};
use super::helpers::{centered_rect, key_hints, progress_label, slide_lines, surface_error};
use super::screens::{
    HymnScreen, LiturgyScreen, LookupScreen, ManagerScreen, Origin, QuickScreen, ScriptureScreen,
};

/// Rows kept for the status line and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown in list views.
const PAGE_STEP: isize = 5;

/// What fills the main area.
enum Screen {
    Lookup(LookupScreen),
    Hymn(HymnScreen),
    Scripture(ScriptureScreen),
    Liturgy(LiturgyScreen),
    Quick(QuickScreen),
    Manager(ManagerScreen),
}

/// Fine-grained modes layered over the current screen.
enum Mode {
    Normal,
    /// `editing` holds the stored number when an existing hymn is edited.
    EditingHymn {
        editing: Option<i64>,
        form: HymnForm,
    },
    EnteringQuick(QuickForm),
    ConfirmHymnDelete(ConfirmHymnDelete),
    /// Highlighted row of the liturgy picker.
    PickingLiturgy(usize),
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Presenter state: the merged hymnal, the custom store and what is on screen.
pub struct App {
    repo: Box<dyn HymnRepository>,
    builtin: Hymnal,
    hymnal: Hymnal,
    custom: Vec<Hymn>,
    liturgy: Liturgy,
    verses: Box<dyn VerseSource>,
    search_limit: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the presenter over the base hymnal, the custom hymn store, the
    /// liturgy items and a verse source for scripture lookups.
    pub fn new(
        repo: Box<dyn HymnRepository>,
        builtin: Hymnal,
        liturgy: Liturgy,
        verses: Box<dyn VerseSource>,
        search_limit: usize,
    ) -> Result<Self> {
        let custom = repo.load()?;
        let mut hymnal = builtin.clone();
        hymnal.merge_custom(custom.clone());
        info!(
            builtin = builtin.len(),
            custom = custom.len(),
            "hymnal ready"
        );

        Ok(Self {
            repo,
            builtin,
            hymnal,
            custom,
            liturgy,
            verses,
            search_limit,
            screen: Screen::Lookup(LookupScreen::default()),
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Dispatch a key press. Returns `true` when the operator asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::EditingHymn { editing, form } => self.handle_hymn_form(code, editing, form),
            Mode::EnteringQuick(form) => self.handle_quick_form(code, form),
            Mode::ConfirmHymnDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::PickingLiturgy(selected) => self.handle_liturgy_picker(code, selected),
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Ctrl+S submits whichever form is open.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        let mode = mem::replace(&mut self.mode, Mode::Normal);
        self.mode = match mode {
            Mode::EditingHymn { editing, mut form } => match self.save_hymn(editing, &form) {
                Ok(()) => Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    warn!(error = %message, "hymn not saved");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                    Mode::EditingHymn { editing, form }
                }
            },
            Mode::EnteringQuick(mut form) => match form.parse_inputs() {
                Ok(content) => {
                    self.open_quick(content);
                    Mode::Normal
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                    Mode::EnteringQuick(form)
                }
            },
            other => other,
        };
        Ok(())
    }

    /// Ctrl+T opens the quick display editor from any screen.
    pub(crate) fn handle_ctrl_t(&mut self) {
        if matches!(self.mode, Mode::Normal) {
            self.clear_status();
            self.mode = Mode::EnteringQuick(QuickForm::default());
        }
    }

    /// Ctrl+L opens the liturgy picker.
    pub(crate) fn handle_ctrl_l(&mut self) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        if self.liturgy.is_empty() {
            self.set_status("No liturgy items loaded.", StatusKind::Error);
        } else {
            self.clear_status();
            self.mode = Mode::PickingLiturgy(0);
        }
    }

    /// Bracketed paste lands in the focused text input.
    pub(crate) fn handle_paste(&mut self, text: &str) {
        match &mut self.mode {
            Mode::EditingHymn { form, .. } => {
                form.paste(text);
                form.error = None;
            }
            Mode::EnteringQuick(form) => {
                form.paste(text);
                form.error = None;
            }
            Mode::ConfirmHymnDelete(_) | Mode::PickingLiturgy(_) => {}
            Mode::Normal => {
                if let Screen::Lookup(lookup) = &mut self.screen {
                    if let Some(line) = text.lines().map(str::trim).find(|line| !line.is_empty()) {
                        for ch in line.chars() {
                            lookup.query.push(ch);
                        }
                        lookup.refresh(&self.hymnal, self.search_limit);
                    }
                }
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Lookup(ref mut lookup) => {
                let mut submit = false;
                match code {
                    KeyCode::Esc => {
                        if lookup.query.is_empty() {
                            *exit = true;
                        } else {
                            lookup.clear();
                        }
                    }
                    KeyCode::Up => lookup.move_selection(-1),
                    KeyCode::Down => lookup.move_selection(1),
                    KeyCode::Backspace => lookup.backspace(&self.hymnal, self.search_limit),
                    KeyCode::Tab => {
                        self.clear_status();
                        self.open_manager();
                    }
                    KeyCode::Enter => submit = true,
                    KeyCode::Char(ch) if !ch.is_control() => {
                        lookup.push_char(ch, &self.hymnal, self.search_limit);
                    }
                    _ => {}
                }
                if submit {
                    self.submit_lookup();
                }
                Ok(Mode::Normal)
            }
            Screen::Scripture(ref mut scripture) => {
                let mut status_to_set: Option<(String, StatusKind)> = None;
                let mut back = false;
                let stepped = match code {
                    KeyCode::Char('q') => {
                        *exit = true;
                        None
                    }
                    KeyCode::Esc => {
                        back = true;
                        None
                    }
                    KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('n') => {
                        Some((scripture.next(&*self.verses), "No further verse available."))
                    }
                    KeyCode::Left | KeyCode::PageUp | KeyCode::Backspace | KeyCode::Char('p') => {
                        Some((scripture.previous(&*self.verses), "No earlier verse available."))
                    }
                    _ => None,
                };

                match stepped {
                    Some((Ok(true), _)) => self.clear_status(),
                    Some((Ok(false), edge)) => {
                        status_to_set = Some((edge.to_string(), StatusKind::Info));
                    }
                    Some((Err(err), _)) => {
                        warn!(error = %err, "verse source failed");
                        status_to_set = Some((surface_error(&err), StatusKind::Error));
                    }
                    None => {}
                }

                if back {
                    self.clear_status();
                    self.screen = Screen::Lookup(LookupScreen::default());
                } else if let Some((text, kind)) = status_to_set {
                    self.set_status(text, kind);
                }
                Ok(Mode::Normal)
            }
            Screen::Liturgy(ref mut liturgy) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => {
                        self.screen = Screen::Lookup(LookupScreen::default());
                    }
                    KeyCode::Up | KeyCode::Char('k') => liturgy.scroll_by(-1),
                    KeyCode::Down | KeyCode::Char('j') => liturgy.scroll_by(1),
                    KeyCode::PageUp => liturgy.scroll_by(-PAGE_STEP),
                    KeyCode::PageDown | KeyCode::Char(' ') => liturgy.scroll_by(PAGE_STEP),
                    KeyCode::Home => liturgy.scroll_home(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
            Screen::Hymn(ref mut slides) => {
                let mut back_to: Option<Origin> = None;
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => back_to = Some(slides.origin),
                    KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('n') => {
                        slides.cursor.next();
                    }
                    KeyCode::Left | KeyCode::PageUp | KeyCode::Backspace | KeyCode::Char('p') => {
                        slides.cursor.previous();
                    }
                    KeyCode::Home => slides.cursor.first(),
                    KeyCode::End => slides.cursor.last(),
                    _ => {}
                }

                if let Some(origin) = back_to {
                    self.clear_status();
                    match origin {
                        Origin::Lookup => self.screen = Screen::Lookup(LookupScreen::default()),
                        Origin::Manager => self.open_manager(),
                    }
                }
                Ok(Mode::Normal)
            }
            Screen::Quick(ref mut quick) => {
                let mut status_to_set: Option<(String, StatusKind)> = None;
                let mut back = false;
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc => back = true,
                    KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('n') => {
                        quick.next();
                    }
                    KeyCode::Left | KeyCode::PageUp | KeyCode::Backspace | KeyCode::Char('p') => {
                        quick.previous();
                    }
                    KeyCode::Enter => {
                        if let Some(link) = quick.content.link() {
                            status_to_set = Some(match open_link(link) {
                                Ok(()) => (format!("Opened {link}."), StatusKind::Info),
                                Err(err) => {
                                    (format!("Failed to open link: {err}"), StatusKind::Error)
                                }
                            });
                        }
                    }
                    _ => {}
                }

                if back {
                    self.clear_status();
                    self.screen = Screen::Lookup(LookupScreen::default());
                } else if let Some((text, kind)) = status_to_set {
                    self.set_status(text, kind);
                }
                Ok(Mode::Normal)
            }
            Screen::Manager(ref mut manager) => {
                let mut status_to_set: Option<(String, StatusKind)> = None;
                let mut back = false;
                let mut present: Option<Hymn> = None;
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc | KeyCode::Tab => back = true,
                    KeyCode::Up => manager.move_selection(-1),
                    KeyCode::Down => manager.move_selection(1),
                    KeyCode::PageUp => manager.move_selection(-PAGE_STEP),
                    KeyCode::PageDown => manager.move_selection(PAGE_STEP),
                    KeyCode::Home => manager.select_first(),
                    KeyCode::End => manager.select_last(),
                    KeyCode::Enter => present = manager.current_hymn().cloned(),
                    KeyCode::Char('+') => {
                        self.clear_status();
                        return Ok(Mode::EditingHymn {
                            editing: None,
                            form: HymnForm::default(),
                        });
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        if let Some(hymn) = manager.current_hymn() {
                            let form = HymnForm::from_hymn(hymn);
                            return Ok(Mode::EditingHymn {
                                editing: Some(hymn.number),
                                form,
                            });
                        }
                        status_to_set =
                            Some(("No hymn selected to edit.".to_string(), StatusKind::Error));
                    }
                    KeyCode::Char('-') => {
                        if let Some(hymn) = manager.current_hymn() {
                            return Ok(Mode::ConfirmHymnDelete(ConfirmHymnDelete::from(hymn)));
                        }
                        status_to_set =
                            Some(("No hymn selected to delete.".to_string(), StatusKind::Error));
                    }
                    _ => {}
                }

                if back {
                    self.clear_status();
                    self.screen = Screen::Lookup(LookupScreen::default());
                } else if let Some(hymn) = present {
                    self.clear_status();
                    self.open_hymn(hymn, Origin::Manager);
                } else if let Some((text, kind)) = status_to_set {
                    self.set_status(text, kind);
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_hymn_form(&mut self, code: KeyCode, editing: Option<i64>, mut form: HymnForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Hymn entry cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::BackTab => form.previous_field(),
            KeyCode::Enter => form.enter(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EditingHymn { editing, form }
    }

    fn handle_quick_form(&mut self, code: KeyCode, mut form: QuickForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Quick display cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Enter => form.newline(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EnteringQuick(form)
    }

    fn handle_liturgy_picker(&mut self, code: KeyCode, selected: usize) -> Mode {
        let len = self.liturgy.len();
        if len == 0 {
            return Mode::Normal;
        }
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Up => Mode::PickingLiturgy((selected + len - 1) % len),
            KeyCode::Down | KeyCode::Tab => Mode::PickingLiturgy((selected + 1) % len),
            KeyCode::Enter => {
                if let Some(item) = self.liturgy.items().get(selected).cloned() {
                    info!(id = %item.id, "presenting liturgy");
                    self.clear_status();
                    self.screen = Screen::Liturgy(LiturgyScreen::new(item));
                }
                Mode::Normal
            }
            _ => Mode::PickingLiturgy(selected),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmHymnDelete) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(err) = self.perform_delete(&confirm) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmHymnDelete(confirm)),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Lookup(lookup) => self.draw_lookup(frame, content_area, lookup),
            Screen::Hymn(slides) => self.draw_hymn(frame, content_area, slides),
            Screen::Scripture(scripture) => self.draw_scripture(frame, content_area, scripture),
            Screen::Liturgy(liturgy) => self.draw_liturgy(frame, content_area, liturgy),
            Screen::Quick(quick) => self.draw_quick(frame, content_area, quick),
            Screen::Manager(manager) => self.draw_manager(frame, content_area, manager),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::EditingHymn { editing, form } => {
                let title = if editing.is_some() { "Edit Hymn" } else { "Add Hymn" };
                self.draw_hymn_form(frame, area, title, form);
            }
            Mode::EnteringQuick(form) => self.draw_quick_form(frame, area, form),
            Mode::ConfirmHymnDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::PickingLiturgy(selected) => self.draw_liturgy_picker(frame, area, *selected),
            Mode::Normal => {}
        }
    }

    fn draw_lookup(&self, frame: &mut Frame, area: Rect, lookup: &LookupScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let prompt = "Hymn: ";
        let input = Paragraph::new(Line::from(vec![
            Span::raw(prompt),
            Span::styled(lookup.query.clone(), Style::default().fg(Color::Yellow)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Hymn number, YS id or title; scripture like John 3:16"),
        );
        frame.render_widget(input, chunks[0]);
        frame.set_cursor_position((
            chunks[0].x + 1 + prompt.len() as u16 + lookup.query.chars().count() as u16,
            chunks[0].y + 1,
        ));

        if lookup.results.is_empty() {
            let hint = if lookup.query.trim().is_empty() {
                format!("{} hymns available. Start typing to search.", self.hymnal.len())
            } else {
                "No matching hymns.".to_string()
            };
            let message = Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = lookup
            .results
            .iter()
            .map(|hit| ListItem::new(hit.display_title()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Suggestions"))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default();
        list_state.select(Some(lookup.selected));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn draw_hymn(&self, frame: &mut Frame, area: Rect, slides: &HymnScreen) {
        let Some(item) = slides.current_item() else {
            let message = Paragraph::new("This hymn has nothing to display.")
                .alignment(Alignment::Center);
            frame.render_widget(message, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(item.heading())
            .title_alignment(Alignment::Center);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let text_style = match item.kind {
            ItemKind::Verse => Style::default(),
            ItemKind::Refrain => Style::default().add_modifier(Modifier::ITALIC),
        };
        let text = Paragraph::new(slide_lines(&item.text))
            .style(text_style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(text, chunks[0]);

        let caption_style = match item.kind {
            ItemKind::Verse => Style::default().fg(Color::Gray),
            ItemKind::Refrain => Style::default().fg(Color::Cyan),
        };
        let caption = Paragraph::new(vec![
            Line::from(Span::styled(item.caption(), caption_style)),
            Line::from(Span::styled(
                progress_label(&slides.cursor),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(caption, chunks[1]);
    }

    fn draw_scripture(&self, frame: &mut Frame, area: Rect, scripture: &ScriptureScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format_reference(&scripture.verse))
            .title_alignment(Alignment::Center);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let text = Paragraph::new(slide_lines(&scripture.verse.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(text, chunks[0]);

        let caption = Paragraph::new(Line::from(Span::styled(
            format!("Requested: {}", scripture.requested),
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(caption, chunks[1]);
    }

    fn draw_liturgy(&self, frame: &mut Frame, area: Rect, liturgy: &LiturgyScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(liturgy.item.title.clone())
            .title_alignment(Alignment::Center);

        let mut lines: Vec<Line> = Vec::with_capacity(liturgy.line_count());
        for (index, section) in liturgy.sections.iter().enumerate() {
            if index > 0 {
                lines.push(Line::from(""));
            }
            if let Some(caption) = &section.caption {
                lines.push(Line::from(Span::styled(
                    caption.clone(),
                    Style::default().fg(Color::Gray),
                )));
            }
            let style = if section.is_refrain {
                Style::default().add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };
            for line in &section.lines {
                lines.push(Line::from(Span::styled(line.clone(), style)));
            }
        }

        // Creeds and prayers read as prose.
        let alignment = if liturgy.item.is_sung() {
            Alignment::Center
        } else {
            Alignment::Left
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(alignment)
            .wrap(Wrap { trim: true })
            .scroll((liturgy.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_quick(&self, frame: &mut Frame, area: Rect, quick: &QuickScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Quick Display")
            .title_alignment(Alignment::Center);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        match &quick.content {
            QuickContent::Text(_) => {
                let Some(page) = quick.current_page() else {
                    frame.render_widget(
                        Paragraph::new("Nothing to display.").alignment(Alignment::Center),
                        inner,
                    );
                    return;
                };
                let lines: Vec<Line> = page
                    .lines
                    .iter()
                    .map(|line| Line::from(line.clone()))
                    .collect();

                if !quick.content.is_paginated() {
                    let text = Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true });
                    frame.render_widget(text, inner);
                    return;
                }

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(inner);
                let text = Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                frame.render_widget(text, chunks[0]);

                let caption = Paragraph::new(vec![
                    Line::from(Span::styled(
                        page.caption(quick.cursor.index()),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(Span::styled(
                        progress_label(&quick.cursor),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(Alignment::Center);
                frame.render_widget(caption, chunks[1]);
            }
            QuickContent::Video { source, embed } => {
                let lines = vec![
                    Line::from(Span::styled(
                        "Video",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(source.clone()),
                    Line::from(Span::styled(embed.clone(), Style::default().fg(Color::Cyan))),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press Enter to open it on the display.",
                        Style::default().fg(Color::Gray),
                    )),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    inner,
                );
            }
            QuickContent::Image(url) => {
                let lines = vec![
                    Line::from(Span::styled(
                        "Image",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(url.clone(), Style::default().fg(Color::Cyan))),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press Enter to open it on the display.",
                        Style::default().fg(Color::Gray),
                    )),
                ];
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    inner,
                );
            }
        }
    }

    fn draw_manager(&self, frame: &mut Frame, area: Rect, manager: &ManagerScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("My Hymns ({})", manager.hymns.len()));

        if manager.hymns.is_empty() {
            let message = Paragraph::new("No custom hymns added yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = manager
            .hymns
            .iter()
            .map(|hymn| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("#{} ", hymn.label()),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(hymn.title.clone()),
                    Span::styled(
                        format!("  ({})", hymn.shape()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default();
        list_state.select(Some(manager.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.screen, &self.mode) {
            (_, Mode::EditingHymn { .. }) => key_hints(&[
                ("Tab", "Next Field"),
                ("Ctrl+S", "Save"),
                ("Esc", "Cancel"),
            ]),
            (_, Mode::EnteringQuick(_)) => key_hints(&[("Ctrl+S", "Display"), ("Esc", "Cancel")]),
            (_, Mode::ConfirmHymnDelete(_)) => key_hints(&[("y", "Delete"), ("n", "Keep")]),
            (_, Mode::PickingLiturgy(_)) => {
                key_hints(&[("↑↓", "Select"), ("Enter", "Show"), ("Esc", "Cancel")])
            }
            (Screen::Lookup(_), _) => key_hints(&[
                ("↑↓", "Select"),
                ("Enter", "Present"),
                ("Tab", "My Hymns"),
                ("Ctrl+L", "Liturgy"),
                ("Ctrl+T", "Quick Display"),
                ("Esc", "Clear/Quit"),
            ]),
            (Screen::Scripture(_), _) => key_hints(&[
                ("←", "Previous Verse"),
                ("→", "Next Verse"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]),
            (Screen::Liturgy(_), _) => key_hints(&[
                ("↑↓", "Scroll"),
                ("Home", "Top"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]),
            (Screen::Hymn(_), _) => key_hints(&[
                ("←", "Previous"),
                ("→", "Next"),
                ("Home/End", "First/Last"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]),
            (Screen::Quick(quick), _) => {
                if quick.content.link().is_some() {
                    key_hints(&[("Enter", "Open"), ("Esc", "Back"), ("q", "Quit")])
                } else if quick.content.is_paginated() {
                    key_hints(&[
                        ("←", "Previous"),
                        ("→", "Next"),
                        ("Esc", "Back"),
                        ("q", "Quit"),
                    ])
                } else {
                    key_hints(&[("Esc", "Back"), ("q", "Quit")])
                }
            }
            (Screen::Manager(_), _) => key_hints(&[
                ("Enter", "Present"),
                ("+", "Add"),
                ("e", "Edit"),
                ("-", "Delete"),
                ("Esc", "Back"),
                ("q", "Quit"),
            ]),
        }
    }

    fn draw_hymn_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &HymnForm) {
        let popup_area = centered_rect(80, 80, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let fields = Paragraph::new(vec![
            form.build_line("Number", HymnField::Number),
            form.build_line("Title", HymnField::Title),
        ]);
        frame.render_widget(fields, chunks[0]);

        let text_style = if form.active == HymnField::Text {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text_block = Block::default()
            .borders(Borders::ALL)
            .title("Text: 1. verse ... Refrain: ... 2. verse")
            .border_style(text_style);
        let text_inner = text_block.inner(chunks[1]);
        let text_lines: Vec<Line> = form.text.split('\n').map(|line| Line::from(line.to_string())).collect();
        let visible = text_inner.height as usize;
        let skip = text_lines.len().saturating_sub(visible);
        let text_height = text_lines.len().saturating_sub(skip);
        let text = Paragraph::new(text_lines.into_iter().skip(skip).collect::<Vec<_>>())
            .block(text_block);
        frame.render_widget(text, chunks[1]);

        let hint = if let Some(error) = &form.error {
            Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
        } else {
            Line::from(Span::styled(
                "Ctrl+S to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            ))
        };
        frame.render_widget(Paragraph::new(hint), chunks[2]);

        let (cursor_x, cursor_y) = match form.active {
            HymnField::Number => (
                chunks[0].x + "Number: ".len() as u16 + form.value_len(HymnField::Number) as u16,
                chunks[0].y,
            ),
            HymnField::Title => (
                chunks[0].x + "Title: ".len() as u16 + form.value_len(HymnField::Title) as u16,
                chunks[0].y + 1,
            ),
            HymnField::Text => {
                let last_len = form.text.split('\n').last().map_or(0, |line| line.chars().count());
                (
                    text_inner.x + last_len as u16,
                    text_inner.y + text_height.saturating_sub(1) as u16,
                )
            }
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_quick_form(&self, frame: &mut Frame, area: Rect, form: &QuickForm) {
        let popup_area = centered_rect(80, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Quick Display: text, or a video/image link")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let lines: Vec<Line> = form.text.split('\n').map(|line| Line::from(line.to_string())).collect();
        let skip = lines.len().saturating_sub(chunks[0].height as usize);
        let shown = lines.len() - skip;
        frame.render_widget(
            Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()),
            chunks[0],
        );

        let hint = if let Some(error) = &form.error {
            Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
        } else {
            Line::from(Span::styled(
                "Number sections \"1.\", \"2.\" to page through them • Ctrl+S to display",
                Style::default().fg(Color::Gray),
            ))
        };
        frame.render_widget(Paragraph::new(hint), chunks[1]);

        let last_len = form.text.split('\n').last().map_or(0, |line| line.chars().count());
        frame.set_cursor_position((
            chunks[0].x + last_len as u16,
            chunks[0].y + shown.saturating_sub(1) as u16,
        ));
    }

    fn draw_liturgy_picker(&self, frame: &mut Frame, area: Rect, selected: usize) {
        let popup_area = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = self
            .liturgy
            .items()
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::raw(item.short_title.clone()),
                    Span::styled(
                        format!("  {}", item.title),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Liturgy").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        frame.render_stateful_widget(list, popup_area, &mut list_state);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmHymnDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete hymn \"{}\" (#{})?",
                confirm.title, confirm.number
            )),
            Line::from("A built-in hymn with the same number will show again."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn save_hymn(&mut self, editing: Option<i64>, form: &HymnForm) -> Result<()> {
        let hymn = form.parse_inputs()?;
        let taken = editing != Some(hymn.number)
            && self.custom.iter().any(|other| other.number == hymn.number);
        if taken {
            return Err(anyhow!(
                "Hymn #{} already exists. Delete it first or pick another number.",
                hymn.number
            ));
        }
        match editing {
            Some(previous) => self.repo.rename(previous, &hymn)?,
            None => self.repo.upsert(&hymn)?,
        }
        self.reload_custom(Some(hymn.number))?;
        self.set_status(
            format!("Hymn \"{}\" (#{}) saved.", hymn.title, hymn.number),
            StatusKind::Info,
        );
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmHymnDelete) -> Result<()> {
        self.repo.delete(confirm.number)?;
        self.reload_custom(None)?;
        self.set_status(
            format!("Hymn \"{}\" deleted.", confirm.title),
            StatusKind::Info,
        );
        Ok(())
    }

    /// Re-read the store and rebuild the merged hymnal.
    fn reload_custom(&mut self, focus: Option<i64>) -> Result<()> {
        self.custom = self.repo.load()?;
        let mut hymnal = self.builtin.clone();
        hymnal.merge_custom(self.custom.clone());
        self.hymnal = hymnal;

        match &mut self.screen {
            Screen::Manager(manager) => manager.set_hymns(self.custom.clone(), focus),
            Screen::Lookup(lookup) => lookup.refresh(&self.hymnal, self.search_limit),
            Screen::Hymn(_) | Screen::Scripture(_) | Screen::Liturgy(_) | Screen::Quick(_) => {}
        }
        debug!(custom = self.custom.len(), "reloaded custom hymns");
        Ok(())
    }

    /// Enter on the lookup: a scripture reference, else a hymn.
    fn submit_lookup(&mut self) {
        let Screen::Lookup(lookup) = &mut self.screen else {
            return;
        };
        let query = lookup.query.trim().to_string();
        if query.is_empty() {
            return;
        }

        let reference_error = match parse_reference(&query) {
            Ok(reference) => {
                self.open_scripture(&reference);
                return;
            }
            Err(err) => err,
        };

        if let Some(hymn) = lookup.resolve(&self.hymnal).cloned() {
            lookup.clear();
            self.clear_status();
            self.open_hymn(hymn, Origin::Lookup);
        } else if query.contains(':') {
            self.set_status(reference_error.to_string(), StatusKind::Error);
        } else {
            self.set_status(format!("No hymn matches '{query}'."), StatusKind::Error);
        }
    }

    fn open_scripture(&mut self, reference: &ScriptureReference) {
        match fetch_passage(&*self.verses, reference).map(ScriptureScreen::new) {
            Ok(Some(screen)) => {
                info!(%reference, "presenting scripture");
                self.clear_status();
                self.screen = Screen::Scripture(screen);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%reference, error = %err, "scripture not shown");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    fn open_manager(&mut self) {
        self.screen = Screen::Manager(ManagerScreen::new(self.custom.clone()));
    }

    fn open_hymn(&mut self, hymn: Hymn, origin: Origin) {
        info!(number = hymn.number, title = %hymn.title, "presenting hymn");
        self.screen = Screen::Hymn(HymnScreen::new(hymn, origin));
    }

    fn open_quick(&mut self, content: QuickContent) {
        info!(pages = content.page_count(), "presenting quick display");
        self.screen = Screen::Quick(QuickScreen::new(content));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::db::{open_in_memory, SqliteHymnRepository};
    use crate::scripture::JsonVerseSource;

    fn app() -> App {
        let repo = SqliteHymnRepository::new(open_in_memory().unwrap());
        App::new(
            Box::new(repo),
            Hymnal::builtin().unwrap(),
            Liturgy::builtin().unwrap(),
            Box::new(JsonVerseSource::builtin().unwrap()),
            10,
        )
        .unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn current_slide(app: &App) -> (usize, ItemKind) {
        match &app.screen {
            Screen::Hymn(slides) => (
                slides.cursor.index(),
                slides.current_item().unwrap().kind,
            ),
            _ => panic!("not presenting a hymn"),
        }
    }

    #[test]
    fn lookup_and_navigate_hymn_with_refrain() {
        let mut app = app();
        type_text(&mut app, "369");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(current_slide(&app), (0, ItemKind::Verse));

        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(current_slide(&app), (1, ItemKind::Refrain));

        app.handle_key(KeyCode::End).unwrap();
        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(current_slide(&app), (5, ItemKind::Refrain));

        app.handle_key(KeyCode::Home).unwrap();
        app.handle_key(KeyCode::Left).unwrap();
        assert_eq!(current_slide(&app), (0, ItemKind::Verse));

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.screen, Screen::Lookup(_)));
        assert!(app.handle_key(KeyCode::Esc).unwrap());
    }

    #[test]
    fn scripture_lookup_steps_verse_by_verse() {
        let mut app = app();
        type_text(&mut app, "john 3:16-17");
        app.handle_key(KeyCode::Enter).unwrap();

        let shown = |app: &App| match &app.screen {
            Screen::Scripture(scripture) => format_reference(&scripture.verse),
            _ => panic!("not showing scripture"),
        };
        assert_eq!(shown(&app), "John 3:16");
        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(shown(&app), "John 3:17");
        app.handle_key(KeyCode::Right).unwrap();
        assert_eq!(shown(&app), "John 3:17");
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "No further verse available."
        );

        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.screen, Screen::Lookup(_)));
    }

    #[test]
    fn bad_scripture_references_report_why() {
        let mut app = app();
        type_text(&mut app, "Hezekiah 1:1");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.status.as_ref().unwrap().text, "Unknown book \"Hezekiah\".");

        app.handle_key(KeyCode::Esc).unwrap();
        type_text(&mut app, "Jude 1:25");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.screen, Screen::Lookup(_)));
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Scripture not found. Please check the reference and try again."
        );
    }

    #[test]
    fn liturgy_picker_opens_selected_item() {
        let mut app = app();
        app.handle_ctrl_l();
        app.handle_key(KeyCode::Up).unwrap();
        assert!(matches!(app.mode, Mode::PickingLiturgy(5)));
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();

        match &app.screen {
            Screen::Liturgy(liturgy) => {
                assert_eq!(liturgy.item.id, "nicene-creed");
                assert_eq!(liturgy.scroll, 0);
            }
            _ => panic!("not showing liturgy"),
        }
        app.handle_key(KeyCode::Down).unwrap();
        match &app.screen {
            Screen::Liturgy(liturgy) => assert_eq!(liturgy.scroll, 1),
            _ => panic!("not showing liturgy"),
        }
        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.screen, Screen::Lookup(_)));
    }

    #[test]
    fn unknown_lookup_sets_error_status() {
        let mut app = app();
        type_text(&mut app, "zzz");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.screen, Screen::Lookup(_)));
        assert_eq!(app.status.as_ref().unwrap().text, "No hymn matches 'zzz'.");
    }

    #[test]
    fn add_hymn_through_manager_and_present_it() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_paste("777 Evening Hymn\n1. Now the day is over\nRefrain:\nAmen\n2. Night is drawing nigh");
        app.handle_ctrl_s().unwrap();

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.custom.len(), 1);
        assert_eq!(app.hymnal.get(777).unwrap().title, "Evening Hymn");

        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(current_slide(&app), (0, ItemKind::Verse));
        app.handle_key(KeyCode::Esc).unwrap();
        assert!(matches!(app.screen, Screen::Manager(_)));
    }

    #[test]
    fn invalid_hymn_keeps_form_open() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_paste("no numbered verses here");
        app.handle_ctrl_s().unwrap();

        match &app.mode {
            Mode::EditingHymn { form, .. } => assert_eq!(
                form.error.as_deref(),
                Some("Could not parse hymn. Make sure verses start with \"1.\", \"2.\", etc.")
            ),
            _ => panic!("form should stay open"),
        }
    }

    #[test]
    fn editing_under_new_number_moves_the_hymn() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_paste("800 First\n1. verse");
        app.handle_ctrl_s().unwrap();

        app.handle_key(KeyCode::Char('e')).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Backspace).unwrap();
        app.handle_key(KeyCode::Char('1')).unwrap();
        app.handle_ctrl_s().unwrap();

        let numbers: Vec<i64> = app.custom.iter().map(|hymn| hymn.number).collect();
        assert_eq!(numbers, vec![801]);
    }

    #[test]
    fn renumbering_onto_another_custom_hymn_is_refused() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        for text in ["800 First\n1. one", "801 Second\n1. two"] {
            app.handle_key(KeyCode::Char('+')).unwrap();
            app.handle_paste(text);
            app.handle_ctrl_s().unwrap();
        }

        app.handle_key(KeyCode::Home).unwrap();
        app.handle_key(KeyCode::Char('e')).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Backspace).unwrap();
        app.handle_key(KeyCode::Char('1')).unwrap();
        app.handle_ctrl_s().unwrap();

        assert!(matches!(app.mode, Mode::EditingHymn { editing: Some(800), .. }));
        assert_eq!(
            app.status.as_ref().unwrap().text,
            "Hymn #801 already exists. Delete it first or pick another number."
        );
        let stored: Vec<(i64, &str)> = app
            .custom
            .iter()
            .map(|hymn| (hymn.number, hymn.title.as_str()))
            .collect();
        assert_eq!(stored, vec![(800, "First"), (801, "Second")]);
    }

    #[test]
    fn adding_a_taken_number_is_refused() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_paste("800 First\n1. one");
        app.handle_ctrl_s().unwrap();

        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_paste("800 Again\n1. two");
        app.handle_ctrl_s().unwrap();
        assert!(matches!(app.mode, Mode::EditingHymn { editing: None, .. }));
        assert_eq!(app.custom[0].title, "First");
    }

    #[test]
    fn delete_restores_builtin_hymn() {
        let mut app = app();
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char('+')).unwrap();
        app.handle_paste("378 Local Grace\n1. verse");
        app.handle_ctrl_s().unwrap();
        assert_eq!(app.hymnal.get(378).unwrap().title, "Local Grace");

        app.handle_key(KeyCode::Char('-')).unwrap();
        app.handle_key(KeyCode::Char('y')).unwrap();
        assert!(app.custom.is_empty());
        assert_eq!(app.hymnal.get(378).unwrap().title, "Amazing Grace");
    }

    #[test]
    fn quick_display_pages_through_sections() {
        let mut app = app();
        app.handle_ctrl_t();
        app.handle_paste("1. Welcome\n2. Offering\n3. Blessing");
        app.handle_ctrl_s().unwrap();

        let page_number = |app: &App| match &app.screen {
            Screen::Quick(quick) => quick.current_page().and_then(|page| page.number),
            _ => panic!("not on quick display"),
        };
        assert_eq!(page_number(&app), Some(1));
        app.handle_key(KeyCode::Char('n')).unwrap();
        app.handle_key(KeyCode::Char('n')).unwrap();
        app.handle_key(KeyCode::Char('n')).unwrap();
        assert_eq!(page_number(&app), Some(3));
        app.handle_key(KeyCode::Char('p')).unwrap();
        assert_eq!(page_number(&app), Some(2));
    }

    #[test]
    fn empty_quick_text_is_rejected() {
        let mut app = app();
        app.handle_ctrl_t();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_ctrl_s().unwrap();
        assert!(matches!(app.mode, Mode::EnteringQuick(_)));
        assert_eq!(app.status.as_ref().unwrap().text, "Nothing to display.");
    }
}
