//! Terminal host: owns the navigation stack and the root coordinator, turns
//! key presses into selections and back gestures, and redraws on every
//! surface change.

use crate::factory::Factory;
use crate::model::RootIntent;
use crate::pages::MenuView;
use crossterm::{
    event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use navflow::{
    AnyCoordinator, Coordinator, CoordinatorConfig, DisplayUnit, HostedScreen, NavigationStack,
    NavigationSurface, Screen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use std::io::{self, stdout};
use std::ops::ControlFlow;
use std::sync::Arc;

pub struct Application {
    config: CoordinatorConfig,
}

impl Application {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let home = Factory::home_screen();
        let stack = Arc::new(NavigationStack::new(home.display_unit()));
        let factory = Factory::new(stack.clone(), self.config);
        let session = Session {
            root: factory.root_coordinator(&home),
            stack,
        };

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = session.run_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

struct Session {
    stack: Arc<NavigationStack>,
    root: Coordinator<RootIntent>,
}

impl Session {
    async fn run_loop(&self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        let mut input = EventStream::new();
        let mut surface = self.stack.subscribe();
        let mut children = self.root.watch_children();

        loop {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                event = input.next() => match event {
                    Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key).is_break() {
                            tracing::info!("quit");
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                },
                event = surface.recv() => match event {
                    Some(event) => tracing::trace!(?event, "redraw"),
                    None => return Ok(()),
                },
                Ok(()) = children.changed() => {}
            }
        }
    }

    fn handle_key(&self, key: KeyEvent) -> ControlFlow<()> {
        match key.code {
            KeyCode::Char('q') => return ControlFlow::Break(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ControlFlow::Break(());
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.with_top_menu(MenuView::select_previous);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.with_top_menu(MenuView::select_next);
            }
            KeyCode::Enter => {
                self.with_top_menu(MenuView::activate);
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => self.back(),
            _ => {}
        }
        ControlFlow::Continue(())
    }

    // Nobody asks the coordinators; they find out from the surface.
    fn back(&self) {
        if !self.stack.presented().is_empty() {
            self.stack.dismiss();
        } else if self.stack.pop().is_none() {
            tracing::debug!("already at the root");
        }
    }

    fn with_top_menu<R>(&self, f: impl FnOnce(&MenuView) -> R) -> Option<R> {
        let top = self.stack.top()?;
        as_menu(&top).map(f)
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let screens = self.stack.screens();
        let trail: Vec<&str> = screens.iter().map(|unit| unit.title()).collect();
        let header = Paragraph::new(trail.join(" › "))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(header, chunks[0]);

        if let Some(menu) = screens.last().and_then(as_menu) {
            menu.render(frame, chunks[1], Color::Yellow);
        }

        let modals = self.stack.presented();
        if let Some(menu) = modals.last().and_then(as_menu) {
            let area = centered_rect(60, 50, chunks[1]);
            frame.render_widget(Clear, area);
            menu.render(frame, area, Color::Magenta);
        }

        let footer = Paragraph::new(format!(
            " depth {} | modals {} | live children {} | ↑↓ select  Enter open  Esc back  q quit",
            self.stack.depth(),
            modals.len(),
            self.root.child_count(),
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, chunks[2]);
    }
}

fn as_menu(unit: &Arc<dyn DisplayUnit>) -> Option<&MenuView> {
    unit.as_any()
        .downcast_ref::<HostedScreen<MenuView>>()
        .map(HostedScreen::view)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn session() -> Session {
        let home = Factory::home_screen();
        let stack = Arc::new(NavigationStack::new(home.display_unit()));
        let factory = Factory::new(stack.clone(), CoordinatorConfig::default());
        Session {
            root: factory.root_coordinator(&home),
            stack,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn wait_for(mut done: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !done() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition never held");
    }

    #[tokio::test]
    async fn test_enter_then_escape() {
        let session = session();

        assert!(session.handle_key(press(KeyCode::Enter)).is_continue());
        wait_for(|| session.stack.depth() == 2).await;
        assert_eq!(session.root.child_count(), 1);

        let _ = session.handle_key(press(KeyCode::Esc));
        assert_eq!(session.stack.depth(), 1);
        wait_for(|| session.root.child_count() == 0).await;
    }

    #[tokio::test]
    async fn test_escape_dismisses_modal_first() {
        let session = session();

        let _ = session.handle_key(press(KeyCode::Down));
        let _ = session.handle_key(press(KeyCode::Enter));
        wait_for(|| session.stack.presented().len() == 1).await;

        let _ = session.handle_key(press(KeyCode::Backspace));
        assert!(session.stack.presented().is_empty());
        assert_eq!(session.stack.depth(), 1);
        wait_for(|| session.root.child_count() == 0).await;
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let session = session();
        assert!(session.handle_key(press(KeyCode::Char('q'))).is_break());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(session.handle_key(ctrl_c).is_break());
        assert!(session.handle_key(press(KeyCode::Char('c'))).is_continue());
    }

    #[tokio::test]
    async fn test_render_shows_breadcrumb() {
        let session = session();
        let _ = session.handle_key(press(KeyCode::Enter));
        wait_for(|| session.stack.depth() == 2).await;

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| session.render(frame)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Radio › Stations"));
        assert!(text.contains("Now playing"));
    }
}
