use navflow::{AnyIntent, IntentChannel, NavigationEventSource, NavigationIntent, View};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct MenuEntry {
    pub label: &'static str,
    pub description: &'static str,
    name: &'static str,
    intent: AnyIntent,
}

/// A screen's controller: a list of destinations, each bound to an intent.
///
/// Activating an entry only emits its intent; where it leads is up to the
/// coordinator listening to this view.
pub struct MenuView {
    title: &'static str,
    body: Vec<&'static str>,
    entries: Vec<MenuEntry>,
    selected: AtomicUsize,
    intents: IntentChannel,
}

impl MenuView {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            body: Vec::new(),
            entries: Vec::new(),
            selected: AtomicUsize::new(0),
            intents: IntentChannel::new(),
        }
    }

    /// Add a destination.
    pub fn entry<I: NavigationIntent>(mut self, intent: I, label: &'static str, description: &'static str) -> Self {
        self.entries.push(MenuEntry {
            label,
            description,
            name: intent.name(),
            intent: Arc::new(intent),
        });
        self
    }

    /// Add a line of body text shown above the entries.
    pub fn line(mut self, text: &'static str) -> Self {
        self.body.push(text);
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected.load(Ordering::Relaxed)
    }

    pub fn select_next(&self) {
        let len = self.entries.len();
        if len > 0 {
            let next = (self.selected() + 1) % len;
            self.selected.store(next, Ordering::Relaxed);
        }
    }

    pub fn select_previous(&self) {
        let len = self.entries.len();
        if len > 0 {
            let previous = (self.selected() + len - 1) % len;
            self.selected.store(previous, Ordering::Relaxed);
        }
    }

    /// Emit the selected entry's intent. Returns false on an empty menu.
    pub fn activate(&self) -> bool {
        match self.entries.get(self.selected()) {
            Some(entry) => {
                tracing::debug!(screen = self.title, intent = entry.name, "activate");
                self.intents.emit_any(Arc::clone(&entry.intent));
                true
            }
            None => false,
        }
    }

    // Body lines plus the two border rows.
    fn info_height(&self) -> u16 {
        u16::try_from(self.body.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.info_height()),
                Constraint::Min(0),
            ])
            .split(area);

        let body: Vec<Line> = self
            .body
            .iter()
            .map(|text| Line::styled(*text, Style::default().fg(Color::Gray)))
            .collect();
        let info = Paragraph::new(body).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(format!(" {} ", self.title))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent)),
        );
        frame.render_widget(info, chunks[0]);

        let selected = self.selected();
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_selected = i == selected;
                let prefix = if is_selected { "▶ " } else { "  " };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(prefix, Style::default().fg(accent)),
                        Span::styled(
                            entry.label,
                            Style::default()
                                .fg(if is_selected { accent } else { Color::White })
                                .add_modifier(if is_selected { Modifier::BOLD } else { Modifier::empty() }),
                        ),
                    ]),
                    Line::from(vec![
                        Span::raw("    "),
                        Span::styled(
                            entry.description,
                            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                        ),
                    ]),
                ])
            })
            .collect();

        let title = if self.entries.is_empty() { " Nowhere to go " } else { " Go to " };
        let list = List::new(items).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(list, chunks[1]);
    }
}

impl View for MenuView {
    fn title(&self) -> &str {
        self.title
    }

    fn event_source(&self) -> Option<&dyn NavigationEventSource> {
        Some(&self.intents)
    }
}
