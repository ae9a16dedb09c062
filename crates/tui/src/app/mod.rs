mod form_input;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use pfm_engine::{Change, Engine, FieldValue, Intent, TransactionId};

use crate::{
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use form_input::FormInput;

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// Presentation state that the engine does not own.
#[derive(Debug, Default)]
pub struct AppState {
    /// Row under the cursor, an index into the transaction list.
    pub selected: usize,
    pub form: FormInput,
    pub toast: Option<ToastState>,
    pub last_change: Option<DateTime<Local>>,
}

impl AppState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }
}

pub struct App {
    engine: Engine,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            state: AppState::default(),
            should_quit: false,
        }
    }

    #[cfg(test)]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[cfg(test)]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, self.engine.view(), &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
            self.state.expire_toast(Instant::now());
        }

        tracing::info!("quitting");
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.engine.form().is_open() {
            self.handle_dialog_action(action);
        } else {
            self.handle_list_action(action);
        }
    }

    fn handle_list_action(&mut self, action: AppAction) {
        let len = self.engine.store().len();
        match action {
            AppAction::Up | AppAction::Input('k') => self.state.select_prev(),
            AppAction::Down | AppAction::Input('j') => self.state.select_next(len),
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('a') => {
                self.dispatch(Intent::Add);
                self.state.form.reset(None);
            }
            AppAction::Submit | AppAction::Input('e') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Intent::Edit(id));
                    self.state.form.reset(self.engine.form().draft());
                }
            }
            AppAction::Delete | AppAction::Input('d') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Intent::Delete(id));
                }
            }
            _ => {}
        }
    }

    fn handle_dialog_action(&mut self, action: AppAction) {
        let Some(draft) = self.engine.form().draft() else {
            return;
        };
        let categories = self.engine.categories();

        let value = match action {
            AppAction::Cancel => {
                self.dispatch(Intent::Cancel);
                return;
            }
            AppAction::Submit => {
                self.dispatch(Intent::Submit);
                if self.engine.form().is_open() {
                    self.state
                        .show_toast("Not saved: no transaction id left", ToastLevel::Error);
                }
                return;
            }
            AppAction::NextField | AppAction::Down => {
                self.state.form.focus_next();
                return;
            }
            AppAction::PrevField | AppAction::Up => {
                self.state.form.focus_prev();
                return;
            }
            AppAction::Left => self.state.form.cycle(false, draft, categories),
            AppAction::Right => self.state.form.cycle(true, draft, categories),
            AppAction::Backspace => self.state.form.backspace(draft),
            AppAction::Input(ch) => self.state.form.type_char(ch, draft, categories),
            AppAction::Delete | AppAction::Quit | AppAction::None => None,
        };

        if let Some(value) = value {
            self.set_field(value);
        }
    }

    fn set_field(&mut self, value: FieldValue) {
        self.dispatch(Intent::FieldChange(value));
    }

    fn dispatch(&mut self, intent: Intent) {
        let Some(change) = self.engine.dispatch(intent) else {
            return;
        };

        self.state.last_change = Some(Local::now());
        let len = self.engine.store().len();
        match change {
            Change::Added(id) => {
                if let Some(index) = self.index_of(id) {
                    self.state.selected = index;
                }
                self.state.show_toast("Transaction added", ToastLevel::Success);
            }
            Change::Updated(_) => {
                self.state.show_toast("Transaction updated", ToastLevel::Success);
            }
            Change::Removed(_) => {
                self.state.clamp_selection(len);
                self.state.show_toast("Transaction deleted", ToastLevel::Info);
            }
        }
    }

    fn selected_id(&self) -> Option<TransactionId> {
        self.engine
            .store()
            .transactions()
            .get(self.state.selected)
            .map(|tx| tx.id)
    }

    fn index_of(&self, id: TransactionId) -> Option<usize> {
        self.engine
            .store()
            .transactions()
            .iter()
            .position(|tx| tx.id == id)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use pfm_engine::{Amount, FormState, TransactionField, TransactionKind};

    use super::*;

    fn app() -> App {
        let engine = Engine::builder()
            .seed(pfm_engine::default_seed())
            .build()
            .unwrap();
        App::new(engine)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn add_dialog_round_trip() {
        let mut app = app();

        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(
            app.engine().form().state(),
            FormState::Create { .. }
        ));

        type_text(&mut app, "2023-04-03");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12,5");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);

        let transactions = app.engine().store().transactions();
        assert_eq!(transactions.len(), 3);
        let added = &transactions[2];
        assert_eq!(added.date(), Some("2023-04-03"));
        assert_eq!(added.amount(), Some(Amount::new(1250)));
        assert_eq!(added.kind(), Some(TransactionKind::Expense));
        assert_eq!(added.category(), Some("Salary"));
        assert_eq!(app.state.selected, 2);
        assert!(!app.engine().form().is_open());
        assert!(app.state.toast.is_some());
        assert!(app.state.last_change.is_some());
    }

    #[test]
    fn q_types_inside_dialog_but_quits_from_list() {
        let mut app = app();

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(
            app.engine().form().draft().and_then(|d| d.date.as_deref()),
            Some("q")
        );

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_dialog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.should_quit());
    }

    #[test]
    fn edit_selected_and_cancel_keeps_list() {
        let mut app = app();
        let before = app.engine().store().transactions().to_vec();

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.engine().form().editing_id(),
            Some(before[1].id)
        );
        assert_eq!(app.state.form.amount_text, "50");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);

        assert!(!app.engine().form().is_open());
        assert_eq!(app.engine().store().transactions(), before.as_slice());
        assert!(app.state.toast.is_none());
    }

    #[test]
    fn edit_updates_amount_in_place() {
        let mut app = app();

        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "600");
        press(&mut app, KeyCode::Enter);

        let first = &app.engine().store().transactions()[0];
        assert_eq!(first.amount(), Some(Amount::from_whole(600)));
        assert_eq!(first.date(), Some("2023-04-01"));
        assert_eq!(app.engine().store().len(), 2);
    }

    #[test]
    fn delete_clamps_selection() {
        let mut app = app();

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.engine().store().len(), 1);
        assert_eq!(app.state.selected, 0);

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.engine().store().is_empty());
        assert_eq!(app.state.selected, 0);

        press(&mut app, KeyCode::Char('e'));
        assert!(!app.engine().form().is_open());
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut app = app();

        press(&mut app, KeyCode::Up);
        assert_eq!(app.state.selected, 0);
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.state.selected, 1);
    }

    #[test]
    fn focus_moves_with_tab_and_backtab() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.state.form.focus, TransactionField::Category);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.form.focus, TransactionField::Date);
    }

    #[test]
    fn toast_expires() {
        let mut state = AppState::default();
        state.show_toast("hello", ToastLevel::Info);

        state.expire_toast(Instant::now());
        assert!(state.toast.is_some());

        state.expire_toast(Instant::now() + TOAST_TTL + Duration::from_millis(1));
        assert!(state.toast.is_none());
    }

    #[test]
    fn clearing_fields_in_edit_is_saved() {
        let mut app = app();

        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."2023-04-01".len() {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "x");
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Backspace);
        let draft = app.engine().form().draft().cloned().unwrap();
        press(&mut app, KeyCode::Enter);

        let first = &app.engine().store().transactions()[0];
        assert_eq!(first.fields, draft);
        assert_eq!(first.date(), None);
        assert_eq!(first.amount(), None);
        assert_eq!(first.category(), None);
        assert_eq!(first.kind(), Some(TransactionKind::Income));
    }

    #[test]
    fn add_without_free_id_keeps_dialog_open() {
        let seed: Vec<pfm_engine::Transaction> =
            serde_json::from_str(r#"[{"id": 18446744073709551614}]"#).unwrap();
        let mut app = App::new(Engine::builder().seed(seed).build().unwrap());

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine().store().len(), 2);
        assert!(!app.engine().form().is_open());

        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "2023-05-01");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.engine().store().len(), 2);
        assert_eq!(
            app.engine().form().draft().and_then(|d| d.date.as_deref()),
            Some("2023-05-01")
        );
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
    }
}
