use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use ratatui::widgets::ListState;
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info, warn};

use crate::model::{
    Account, AddAccountForm, AppEvent, AppScreen, Effect, FormField, Repository, Status,
};
use crate::store::AccountStore;

pub const ADD_ACCOUNT_LABEL: &str = "+ Add Account";

pub struct App {
    pub screen: AppScreen,
    pub accounts: Vec<Account>,
    /// Cursor over the accounts plus the trailing "add account" entry.
    pub selected: usize,
    pub form: AddAccountForm,
    pub repos: Vec<Repository>,
    /// Indices into `repos` after filtering.
    pub displayed: Vec<usize>,
    pub list_state: ListState,
    pub loading: bool,
    pub active_account: Option<usize>,
    pub status: Option<Status>,
    pub search_mode: bool,
    pub search_query: String,
    pub throbber_state: ThrobberState,
    list_seq: u64,
    store: AccountStore,
}

impl App {
    pub fn new(accounts: Vec<Account>, store: AccountStore) -> Self {
        Self {
            screen: AppScreen::AccountPicker,
            accounts,
            selected: 0,
            form: AddAccountForm::default(),
            repos: Vec::new(),
            displayed: Vec::new(),
            list_state: ListState::default(),
            loading: false,
            active_account: None,
            status: None,
            search_mode: false,
            search_query: String::new(),
            throbber_state: ThrobberState::default(),
            list_seq: 0,
            store,
        }
    }

    /// Number of selectable entries on the picker, the synthetic one included.
    pub fn entry_count(&self) -> usize {
        self.accounts.len() + 1
    }

    pub fn is_add_entry(&self, index: usize) -> bool {
        index == self.accounts.len()
    }

    pub fn active_account(&self) -> Option<&Account> {
        self.active_account.and_then(|i| self.accounts.get(i))
    }

    pub fn selected_repo(&self) -> Option<&Repository> {
        let pos = self.list_state.selected()?;
        self.displayed.get(pos).and_then(|&i| self.repos.get(i))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Effect::Quit);
        }
        match self.screen {
            AppScreen::AccountPicker => self.handle_picker_key(key.code),
            AppScreen::Repositories if self.search_mode => {
                self.handle_search_key(key.code);
                None
            }
            AppScreen::Repositories => self.handle_repos_key(key.code),
            AppScreen::AddAccount => {
                self.handle_form_key(key);
                None
            }
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode) -> Option<Effect> {
        match code {
            KeyCode::Char('q') => return Some(Effect::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(self.entry_count() - 1);
            }
            KeyCode::Enter => {
                if self.is_add_entry(self.selected) {
                    self.screen = AppScreen::AddAccount;
                    self.form = AddAccountForm::default();
                } else if self.selected < self.accounts.len() {
                    if self.active_account != Some(self.selected) {
                        self.repos.clear();
                        self.search_query.clear();
                        apply_search(self);
                    }
                    self.active_account = Some(self.selected);
                    self.screen = AppScreen::Repositories;
                    return Some(self.request_listing());
                }
            }
            _ => {}
        }
        None
    }

    fn handle_repos_key(&mut self, code: KeyCode) -> Option<Effect> {
        match code {
            KeyCode::Char('q') => return Some(Effect::Quit),
            KeyCode::Esc | KeyCode::Backspace => {
                self.screen = AppScreen::AccountPicker;
                self.status = None;
                self.search_mode = false;
                if !self.search_query.is_empty() {
                    self.search_query.clear();
                    apply_search(self);
                }
            }
            KeyCode::Char('r') => return Some(self.request_listing()),
            KeyCode::Char('c') => {
                let repo = self.selected_repo()?.clone();
                let token = self
                    .active_account()
                    .map(|a| a.token.clone())
                    .unwrap_or_default();
                self.loading = true;
                self.status = Some(Status::info(format!("Cloning {}...", repo.title())));
                info!("Cloning {}", repo.title());
                return Some(Effect::Clone { repo, token });
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.displayed.is_empty() {
                    let next = self
                        .list_state
                        .selected()
                        .map_or(0, |i| (i + 1).min(self.displayed.len() - 1));
                    self.list_state.select(Some(next));
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.displayed.is_empty() {
                    let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
                    self.list_state.select(Some(prev));
                }
            }
            KeyCode::Char('/') => {
                self.search_mode = true;
                self.search_query.clear();
                apply_search(self);
            }
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search_mode = false;
                self.search_query.clear();
                apply_search(self);
            }
            KeyCode::Enter => self.search_mode = false,
            KeyCode::Backspace => {
                self.search_query.pop();
                apply_search(self);
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                apply_search(self);
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen = AppScreen::AccountPicker;
                self.form = AddAccountForm::default();
            }
            KeyCode::Tab => {
                self.form.focus = match self.form.focus {
                    FormField::Name => FormField::Token,
                    FormField::Token => FormField::Name,
                };
            }
            KeyCode::Enter => match self.form.focus {
                FormField::Name => self.form.focus = FormField::Token,
                FormField::Token => {
                    if !self.form.name.is_empty() && !self.form.token.is_empty() {
                        self.submit_form();
                    }
                }
            },
            KeyCode::Backspace => {
                self.form.focused_buffer().pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.focused_buffer().push(c);
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let form = std::mem::take(&mut self.form);
        let account = Account::new(form.name, form.token);
        info!("Adding account '{}'", account.name);
        self.accounts.push(account);

        self.status = Some(match self.store.save(&self.accounts) {
            Ok(()) => Status::success("Account added successfully"),
            Err(e) => {
                warn!("Failed to save accounts: {}", e);
                Status::error(format!("Error saving account: {}", e))
            }
        });
        self.selected = self.accounts.len() - 1;
        self.screen = AppScreen::AccountPicker;
    }

    fn request_listing(&mut self) -> Effect {
        self.list_seq += 1;
        self.loading = true;
        self.status = Some(Status::info("Loading repositories..."));
        let client = self.active_account().and_then(|a| a.client.clone());
        Effect::ListRepositories {
            seq: self.list_seq,
            client,
        }
    }

    /// Fold a background result into the session.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReposLoaded { seq, result } => {
                if seq != self.list_seq {
                    debug!("Dropping stale listing #{} (latest is #{})", seq, self.list_seq);
                    return;
                }
                self.loading = false;
                match result {
                    Ok(repos) => {
                        self.status =
                            Some(Status::success(format!("Loaded {} repositories", repos.len())));
                        self.repos = repos;
                        apply_search(self);
                    }
                    Err(e) => {
                        self.status =
                            Some(Status::error(format!("Error loading repositories: {}", e)));
                    }
                }
            }
            AppEvent::Cloned { repo, result } => {
                self.loading = false;
                self.status = Some(match result {
                    Ok(path) => Status::success(format!(
                        "✅ Cloned {} into {}",
                        repo.title(),
                        path.display()
                    )),
                    Err(e) => Status::error(format!("❌ Error cloning repository: {}", e)),
                });
            }
        }
    }
}

/// Recompute `displayed` from the fuzzy query over repository names.
pub fn apply_search(app: &mut App) {
    if app.search_query.is_empty() {
        app.displayed = (0..app.repos.len()).collect();
    } else {
        let matcher = SkimMatcherV2::default();
        let mut results: Vec<(i64, usize)> = app
            .repos
            .iter()
            .enumerate()
            .filter_map(|(i, r)| {
                matcher
                    .fuzzy_match(&r.name, &app.search_query)
                    .map(|score| (score, i))
            })
            .collect();
        results.sort_by(|a, b| b.0.cmp(&a.0));
        app.displayed = results.into_iter().map(|(_, i)| i).collect();
    }
    if app.displayed.is_empty() {
        app.list_state.select(None);
    } else {
        app.list_state.select(Some(0));
    }
}
