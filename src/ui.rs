use std::path::PathBuf;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, WhichUse};

use crate::app::{ADD_ACCOUNT_LABEL, App};
use crate::model::{AppScreen, FormField, Status, StatusKind};

/// Colors and frame options for every screen.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    pub border: BorderType,
    pub padding: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0x25, 0xA0, 0x65),
            highlight: Color::Indexed(39),
            success: Color::Rgb(0x25, 0xA0, 0x65),
            error: Color::Rgb(0xFF, 0x00, 0x00),
            muted: Color::Indexed(240),
            border: BorderType::Rounded,
            padding: 1,
        }
    }
}

impl Theme {
    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(self.border)
            .border_style(Style::default().fg(self.highlight))
            .padding(Padding::uniform(self.padding))
    }

    fn status_style(&self, status: &Status) -> Style {
        match status.kind {
            StatusKind::Info => Style::default().fg(Color::Yellow),
            StatusKind::Success => Style::default().fg(self.success),
            StatusKind::Error => Style::default().fg(self.error),
        }
    }
}

pub struct Ui {
    theme: Theme,
    develop_dir: Option<PathBuf>,
}

impl Ui {
    pub fn new(theme: Theme, develop_dir: Option<PathBuf>) -> Self {
        Self { theme, develop_dir }
    }

    /// Draw router
    pub fn draw(&self, f: &mut Frame<'_>, app: &mut App) {
        match app.screen {
            AppScreen::AccountPicker => self.draw_accounts_screen(f, app),
            AppScreen::Repositories => self.draw_repos_screen(f, app),
            AppScreen::AddAccount => self.draw_add_account_screen(f, app),
        }
    }

    fn status_line(&self, app: &App) -> Paragraph<'static> {
        match &app.status {
            Some(status) => Paragraph::new(status.text.clone()).style(self.theme.status_style(status)),
            None => Paragraph::new(""),
        }
    }

    fn help_line(&self, text: &'static str) -> Paragraph<'static> {
        Paragraph::new(text).style(
            Style::default()
                .fg(self.theme.muted)
                .add_modifier(Modifier::ITALIC),
        )
    }

    fn draw_accounts_screen(&self, f: &mut Frame<'_>, app: &App) {
        let theme = &self.theme;
        let block = theme
            .block()
            .title(Span::styled(
                " GitHub Account Manager ",
                Style::default()
                    .fg(Color::Rgb(0xFF, 0xFD, 0xF5))
                    .bg(theme.accent),
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(f.area());
        f.render_widget(block, f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut items: Vec<ListItem> = app
            .accounts
            .iter()
            .map(|account| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        account.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        account.description(),
                        Style::default().fg(theme.muted),
                    )),
                ])
            })
            .collect();
        items.push(ListItem::new(Span::styled(
            ADD_ACCOUNT_LABEL,
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        )));

        let mut state = ListState::default();
        state.select(Some(app.selected));
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        f.render_stateful_widget(list, chunks[0], &mut state);

        f.render_widget(self.status_line(app).alignment(Alignment::Center), chunks[1]);
        f.render_widget(
            self.help_line("Use ↑/↓ to navigate, Enter to select, q to quit")
                .alignment(Alignment::Center),
            chunks[2],
        );
    }

    fn draw_repos_screen(&self, f: &mut Frame<'_>, app: &mut App) {
        let theme = &self.theme;
        let title = if app.search_mode {
            format!(" 🔍 Search: {}_ ", app.search_query)
        } else if !app.search_query.is_empty() {
            format!(" Repositories (Filter: {}) ", app.search_query)
        } else {
            " Repositories ".to_string()
        };
        let block = theme.block().title(Span::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        let inner = block.inner(f.area());
        f.render_widget(block, f.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let account = app
            .active_account()
            .map(|a| a.name.clone())
            .unwrap_or_default();
        let develop = match &self.develop_dir {
            Some(dir) => {
                let marker = if dir.is_dir() { "✅" } else { "❌" };
                format!("Develop directory: {} {}", dir.display(), marker)
            }
            None => "Develop directory: unavailable ❌".to_string(),
        };
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Account: {}", account),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(develop),
        ]);
        f.render_widget(header, chunks[0]);

        if app.loading {
            let throbber = Throbber::default()
                .label(" Loading repositories...")
                .style(Style::default().fg(Color::Indexed(205)))
                .throbber_set(BRAILLE_SIX)
                .use_type(WhichUse::Spin);
            let area = Rect { height: 1, ..chunks[1] };
            f.render_stateful_widget(throbber, area, &mut app.throbber_state);
        } else {
            let items: Vec<ListItem> = if app.displayed.is_empty() {
                let empty = if app.repos.is_empty() {
                    "No repositories loaded"
                } else {
                    "No matching repositories..."
                };
                vec![ListItem::new(Span::styled(empty, Style::default().fg(theme.muted)))]
            } else {
                app.displayed
                    .iter()
                    .filter_map(|&i| app.repos.get(i))
                    .map(|repo| {
                        ListItem::new(vec![
                            Line::from(Span::styled(
                                repo.title(),
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            Line::from(Span::styled(
                                repo.summary(),
                                Style::default().fg(theme.muted),
                            )),
                        ])
                    })
                    .collect()
            };
            let list = List::new(items)
                .highlight_style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");
            f.render_stateful_widget(list, chunks[1], &mut app.list_state);
        }

        f.render_widget(self.status_line(app), chunks[2]);
        f.render_widget(
            self.help_line("Press c to clone, r to refresh, / to filter, esc to back, q to quit"),
            chunks[3],
        );
    }

    fn draw_add_account_screen(&self, f: &mut Frame<'_>, app: &App) {
        let theme = &self.theme;
        let area = centered_rect(60, 50, f.area());
        f.render_widget(Clear, area);
        let block = theme
            .block()
            .title(Span::styled(
                " Add GitHub Account ",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name
                Constraint::Length(3), // Token
                Constraint::Length(1), // Status
                Constraint::Min(1),    // Help text
            ])
            .split(inner);

        let field_style = |field: FormField| {
            if app.form.focus == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(theme.muted)
            }
        };
        let masked = "*".repeat(app.form.token.chars().count());

        let name = Paragraph::new(app.form.name.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border)
                    .title("Account Name"),
            )
            .style(field_style(FormField::Name));
        let token = Paragraph::new(masked)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border)
                    .title("GitHub Personal Access Token"),
            )
            .style(field_style(FormField::Token));
        f.render_widget(name, chunks[0]);
        f.render_widget(token, chunks[1]);
        f.render_widget(self.status_line(app), chunks[2]);

        let help = match app.form.focus {
            FormField::Name => "Enter: Continue | Tab: Switch field | Esc: Cancel",
            FormField::Token => "Enter: Save | Tab: Switch field | Esc: Cancel",
        };
        f.render_widget(self.help_line(help).alignment(Alignment::Center), chunks[3]);
    }
}

/// Helper to center a rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
