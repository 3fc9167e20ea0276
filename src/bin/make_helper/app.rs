//! Application state and key handling
//!
//! The picker has three modes:
//! - Typing: navigation, with an optional numeric count prefix (`5j`)
//! - TypeSearchText: the search text is being typed after `/`
//! - SearchText: a search is active and `n`/`N` cycle through matches

use crate::runner::Runner;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which keys the picker is currently interpreting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Typing,
    TypeSearchText,
    SearchText,
}

impl Mode {
    /// Whether the search text should be shown
    pub fn is_search(self) -> bool {
        matches!(self, Mode::TypeSearchText | Mode::SearchText)
    }
}

pub struct App<R> {
    /// Target names, in makefile order
    pub choices: Vec<String>,
    /// Index of the selected target
    pub selected: usize,
    /// Output of the last target that was run
    pub output: String,
    /// Count prefix or search text, depending on the mode
    pub buffer: String,
    pub mode: Mode,
    pub should_quit: bool,
    runner: R,
}

impl<R: Runner> App<R> {
    /// `choices` must not be empty.
    pub fn new(choices: Vec<String>, runner: R) -> Self {
        App {
            choices,
            selected: 0,
            output: String::new(),
            buffer: String::new(),
            mode: Mode::default(),
            should_quit: false,
            runner,
        }
    }

    pub fn selected_target(&self) -> &str {
        &self.choices[self.selected]
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Esc {
            self.mode = Mode::Typing;
            self.buffer.clear();
            return;
        }

        match self.mode {
            Mode::Typing => self.handle_typing(key),
            Mode::TypeSearchText => self.handle_type_search_text(key),
            Mode::SearchText => self.handle_search_text(key),
        }
    }

    fn handle_typing(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(self.count());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.choices.len() - 1;
                self.selected = last.min(self.selected.saturating_add(self.count()));
            }
            KeyCode::Char('r') => self.output.clear(),
            KeyCode::Enter => self.run_selected(),
            KeyCode::Char('/') => self.mode = Mode::TypeSearchText,
            KeyCode::Char(c) => {
                self.buffer.push(c);
                return;
            }
            _ => return,
        }
        self.buffer.clear();
    }

    fn handle_type_search_text(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.mode = Mode::SearchText;
                self.selected = self.next_match();
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Char(c) => self.buffer.push(c),
            _ => {}
        }
    }

    fn handle_search_text(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => self.selected = self.next_match(),
            KeyCode::Char('N') => self.selected = self.previous_match(),
            KeyCode::Char('/') => {
                self.mode = Mode::TypeSearchText;
                self.buffer.clear();
            }
            KeyCode::Enter => self.run_selected(),
            _ => {}
        }
    }

    /// The count prefix typed before a movement key, 1 if there is none.
    fn count(&self) -> usize {
        self.buffer.parse().unwrap_or(1)
    }

    fn run_selected(&mut self) {
        let target = self.selected_target().to_string();
        log::info!("running target {}", target);
        self.output = self.runner.run(&target);
    }

    fn matches(&self, idx: usize) -> bool {
        self.choices[idx].contains(self.buffer.as_str())
    }

    /// The first matching target after the selected one, wrapping around.
    fn next_match(&self) -> usize {
        let len = self.choices.len();
        (1..len)
            .map(|step| (self.selected + step) % len)
            .find(|&idx| self.matches(idx))
            .unwrap_or(self.selected)
    }

    /// The first matching target before the selected one, wrapping around.
    fn previous_match(&self) -> usize {
        let len = self.choices.len();
        (1..len)
            .map(|step| (self.selected + len - step) % len)
            .find(|&idx| self.matches(idx))
            .unwrap_or(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeRunner {
        runs: RefCell<Vec<String>>,
    }

    impl Runner for &FakeRunner {
        fn run(&self, target: &str) -> String {
            self.runs.borrow_mut().push(target.to_string());
            format!("ran {}", target)
        }
    }

    fn app(runner: &FakeRunner) -> App<&FakeRunner> {
        let choices = ["all", "build", "test", "clean", "build-docs"];
        App::new(choices.iter().map(|c| c.to_string()).collect(), runner)
    }

    fn press(app: &mut App<&FakeRunner>, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn key(app: &mut App<&FakeRunner>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "q");
        assert!(app.should_quit);

        let mut app = app_with_search(&runner);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    fn app_with_search(runner: &FakeRunner) -> App<&FakeRunner> {
        let mut app = app(runner);
        press(&mut app, "/bu");
        app
    }

    #[test]
    fn test_move() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "j");
        assert_eq!(app.selected, 1);
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 2);
        press(&mut app, "k");
        assert_eq!(app.selected, 1);
        key(&mut app, KeyCode::Up);
        key(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_count_prefix() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "3j");
        assert_eq!(app.selected, 3);
        assert_eq!(app.buffer, "");
        press(&mut app, "10j");
        assert_eq!(app.selected, 4);
        press(&mut app, "2k");
        assert_eq!(app.selected, 2);
        press(&mut app, "99k");
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_escape_clears_count() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "3");
        key(&mut app, KeyCode::Esc);
        press(&mut app, "j");
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_run_and_drop_output() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "j");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.output, "ran build");
        assert_eq!(*runner.runs.borrow(), vec!["build"]);
        press(&mut app, "r");
        assert_eq!(app.output, "");
    }

    #[test]
    fn test_search() {
        let runner = FakeRunner::default();
        let mut app = app_with_search(&runner);
        assert_eq!(app.mode, Mode::TypeSearchText);
        assert_eq!(app.buffer, "bu");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::SearchText);
        assert_eq!(app.selected, 1);

        press(&mut app, "n");
        assert_eq!(app.selected, 4);
        press(&mut app, "n");
        assert_eq!(app.selected, 1);
        press(&mut app, "N");
        assert_eq!(app.selected, 4);

        key(&mut app, KeyCode::Enter);
        assert_eq!(*runner.runs.borrow(), vec!["build-docs"]);
    }

    #[test]
    fn test_search_without_match_stays() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "j/zzz");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.selected, 1);
        press(&mut app, "N");
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_search_backspace_and_restart() {
        let runner = FakeRunner::default();
        let mut app = app(&runner);
        press(&mut app, "/tx");
        key(&mut app, KeyCode::Backspace);
        assert_eq!(app.buffer, "t");
        key(&mut app, KeyCode::Enter);
        assert_eq!(app.selected, 2);

        press(&mut app, "/");
        assert_eq!(app.mode, Mode::TypeSearchText);
        assert_eq!(app.buffer, "");

        // q is search text here, not quit
        press(&mut app, "q");
        assert!(!app.should_quit);

        key(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Typing);
        assert_eq!(app.buffer, "");
    }
}
