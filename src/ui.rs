// UI layer: a plain line-oriented console plus the menu loop that drives it.
// `Console` is generic over its reader and writer so the whole flow can run
// against stdin/stdout or against in-memory buffers.

use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Stdout, StdinLock, Write};
use std::path::Path;

use anyhow::Result;
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::error::{Field, ValidationError};
use crate::model::{self, Student};
use crate::storage::FileProcessor;

pub const MENU: &str = "\
---- Course Registration Program ----
  Select from the following menu:
    1. Register a Student for a Course.
    2. Show current data.
    3. Save data to a file.
    4. Exit the program.
-----------------------------------------";

pub const MENU_PROMPT: &str = "Enter your menu choice:  ";
pub const FIRST_NAME_PROMPT: &str = "Enter the student's first name: ";
pub const LAST_NAME_PROMPT: &str = "Enter the student's last name: ";
pub const COURSE_PROMPT: &str = "Enter the student's course: ";
pub const INVALID_CHOICE: &str = "Please only choose option 1, 2, 3, or 4";
pub const PROGRAM_ENDED: &str = "Program Ended";

const SEPARATOR_WIDTH: usize = 50;

/// Where error messages and roster listings go. The file processor talks to
/// the console only through this trait.
pub trait Reporter {
    /// Print `message`, followed by a technical block when `error` is given.
    fn report_error(&mut self, message: &str, error: Option<&dyn Error>) -> io::Result<()>;

    /// Print every student between two separator lines.
    fn display_roster(&mut self, roster: &[Student]) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    ShowData,
    Save,
    Exit,
    Invalid(String),
}

impl MenuChoice {
    /// Only the exact strings "1" to "4" are accepted.
    pub fn parse(input: &str) -> Self {
        match input {
            "1" => MenuChoice::Register,
            "2" => MenuChoice::ShowData,
            "3" => MenuChoice::Save,
            "4" => MenuChoice::Exit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

/// Reasons a registration is abandoned.
#[derive(Debug, thiserror::Error)]
enum RegistrationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Input ended before the student was registered")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub struct Console<R, W> {
    input: R,
    output: W,
    // ANSI styling, only when writing to a terminal
    styled: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        let styled = io::stdout().is_terminal();
        Console::new(io::stdin().lock(), io::stdout()).with_style(styled)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Plain console; no escape codes are written.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            styled: false,
        }
    }

    pub fn with_style(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `text` without a newline and read one line back, without its
    /// line terminator. `None` means the input is closed.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn prompt_field(&mut self, text: &str, field: Field) -> Result<String, RegistrationError> {
        let value = self.prompt(text)?.ok_or(RegistrationError::Closed)?;
        model::validate(field, &value)?;
        Ok(value)
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "{MENU}")
    }

    /// Read one menu choice. Anything other than "1".."4" is reported here
    /// and handed back as `Invalid`; the caller just shows the menu again.
    /// Closed input counts as "4".
    pub fn read_menu_choice(&mut self) -> io::Result<MenuChoice> {
        let Some(input) = self.prompt(MENU_PROMPT)? else {
            log::debug!("input closed at menu prompt, exiting");
            return Ok(MenuChoice::Exit);
        };
        let choice = MenuChoice::parse(&input);
        if let MenuChoice::Invalid(_) = choice {
            self.report_error(INVALID_CHOICE, None)?;
        }
        Ok(choice)
    }

    /// Ask for first name, last name and course in turn. The first invalid
    /// field ends the registration with an error and nothing is appended.
    pub fn read_new_student(&mut self, roster: &mut Vec<Student>) -> io::Result<()> {
        match self.collect_student() {
            Ok(student) => {
                writeln!(
                    self.output,
                    "You have registered {} {} for {}",
                    student.first_name(),
                    student.last_name(),
                    student.course_name()
                )?;
                log::info!("registered {student}");
                roster.push(student);
                Ok(())
            }
            Err(RegistrationError::Io(err)) => Err(err),
            Err(err) => {
                log::warn!("registration abandoned: {err}");
                self.report_error(&err.to_string(), None)
            }
        }
    }

    fn collect_student(&mut self) -> Result<Student, RegistrationError> {
        let first_name = self.prompt_field(FIRST_NAME_PROMPT, Field::FirstName)?;
        let last_name = self.prompt_field(LAST_NAME_PROMPT, Field::LastName)?;
        let course_name = self.prompt_field(COURSE_PROMPT, Field::CourseName)?;
        Ok(Student::new(&first_name, &last_name, &course_name)?)
    }
}

impl<R: BufRead, W: Write> Reporter for Console<R, W> {
    fn report_error(&mut self, message: &str, error: Option<&dyn Error>) -> io::Result<()> {
        writeln!(self.output, "{message}")?;
        if let Some(err) = error {
            let header = "--Technical Error--";
            if self.styled {
                writeln!(self.output, "{}", header.red())?;
            } else {
                writeln!(self.output, "{header}")?;
            }
            writeln!(self.output, "{err}")?;
            writeln!(self.output, "{err:?}")?;
            let mut source = err.source();
            while let Some(cause) = source {
                writeln!(self.output, "caused by: {cause}")?;
                source = cause.source();
            }
        }
        Ok(())
    }

    fn display_roster(&mut self, roster: &[Student]) -> io::Result<()> {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        writeln!(self.output, "{separator}")?;
        for student in roster {
            writeln!(
                self.output,
                "Student: {} {} is enrolled in {}",
                student.first_name(),
                student.last_name(),
                student.course_name()
            )?;
        }
        writeln!(self.output, "{separator}")
    }
}

/// Save the roster while `spinner` is shown. The spinner is suspended while
/// the file processor prints, so its line never shares a row with the roster.
fn save_with_spinner<Rep: Reporter + ?Sized>(
    spinner: &ProgressBar,
    path: &Path,
    students: &[Student],
    reporter: &mut Rep,
) -> io::Result<()> {
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Saving to {}...", path.display()));
    let result = spinner.suspend(|| FileProcessor::write(path, students, reporter));
    spinner.finish_and_clear();
    result
}

/// Main menu loop. Loads the roster from the configured file, then shows
/// the menu and dispatches on each choice until the user picks "4".
/// Returns the final roster; only console I/O failures are propagated.
pub fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<Vec<Student>> {
    let mut students: Vec<Student> = Vec::new();
    FileProcessor::read(config.data_file(), &mut students, console)?;

    loop {
        console.display_menu()?;
        let choice = console.read_menu_choice()?;
        log::debug!("menu choice {choice:?}");
        match choice {
            MenuChoice::Register => console.read_new_student(&mut students)?,
            MenuChoice::ShowData => console.display_roster(&students)?,
            MenuChoice::Save => {
                // spinner goes to stderr and stays hidden when it is not a terminal
                let spinner = ProgressBar::new_spinner();
                save_with_spinner(&spinner, config.data_file(), &students, console)?;
            }
            MenuChoice::Exit => break,
            // already reported by read_menu_choice
            MenuChoice::Invalid(_) => {}
        }
    }

    console.say(PROGRAM_ENDED)?;
    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::{InMemoryTerm, ProgressDrawTarget};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_console<F>(input: &str, f: F) -> String
    where
        F: FnOnce(&mut Console<Cursor<Vec<u8>>, &mut Vec<u8>>),
    {
        let mut out = Vec::new();
        {
            let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), &mut out);
            f(&mut console);
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_accepts_exactly_one_to_four() {
        assert_eq!(MenuChoice::parse("1"), MenuChoice::Register);
        assert_eq!(MenuChoice::parse("2"), MenuChoice::ShowData);
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Save);
        assert_eq!(MenuChoice::parse("4"), MenuChoice::Exit);
        assert_eq!(MenuChoice::parse(" 1"), MenuChoice::Invalid(" 1".into()));
        assert_eq!(MenuChoice::parse("5"), MenuChoice::Invalid("5".into()));
        assert_eq!(MenuChoice::parse(""), MenuChoice::Invalid(String::new()));
    }

    #[test]
    fn menu_is_printed_verbatim() {
        let out = run_console("", |c| c.display_menu().unwrap());
        assert_eq!(out, format!("{MENU}\n"));
        assert!(out.starts_with("---- Course Registration Program ----\n"));
        assert!(out.contains("    4. Exit the program.\n"));
    }

    #[test]
    fn invalid_choice_is_reported_once() {
        let mut choice = None;
        let out = run_console("7\n", |c| choice = Some(c.read_menu_choice().unwrap()));
        assert_eq!(choice, Some(MenuChoice::Invalid("7".into())));
        assert_eq!(out.matches(INVALID_CHOICE).count(), 1);
        assert!(out.starts_with(MENU_PROMPT));
    }

    #[test]
    fn closed_input_means_exit() {
        let mut choice = None;
        run_console("", |c| choice = Some(c.read_menu_choice().unwrap()));
        assert_eq!(choice, Some(MenuChoice::Exit));
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let mut choice = None;
        run_console("2\r\n", |c| choice = Some(c.read_menu_choice().unwrap()));
        assert_eq!(choice, Some(MenuChoice::ShowData));
    }

    #[test]
    fn registers_a_valid_student() {
        let mut roster = Vec::new();
        let out = run_console("jane\ndoe\nHistory\n", |c| {
            c.read_new_student(&mut roster).unwrap()
        });

        assert_eq!(roster, vec![Student::new("Jane", "Doe", "History").unwrap()]);
        assert!(out.contains(FIRST_NAME_PROMPT));
        assert!(out.contains(LAST_NAME_PROMPT));
        assert!(out.contains(COURSE_PROMPT));
        assert!(out.contains("You have registered Jane Doe for History"));
    }

    #[test]
    fn invalid_first_name_stops_the_prompts() {
        let mut roster = Vec::new();
        let out = run_console("j4ne\nDoe\nHistory\n", |c| {
            c.read_new_student(&mut roster).unwrap()
        });

        assert!(roster.is_empty());
        assert!(out.contains("First name must be alphabetic"));
        assert!(!out.contains(LAST_NAME_PROMPT));
    }

    #[test]
    fn invalid_course_discards_the_names() {
        let mut roster = Vec::new();
        let out = run_console("Jane\nDoe\nPython 101\n", |c| {
            c.read_new_student(&mut roster).unwrap()
        });

        assert!(roster.is_empty());
        assert!(out.contains("Course name must be alphabetic"));
        assert!(!out.contains("You have registered"));
    }

    #[test]
    fn closed_input_abandons_registration() {
        let mut roster = Vec::new();
        let out = run_console("Jane\n", |c| c.read_new_student(&mut roster).unwrap());

        assert!(roster.is_empty());
        assert!(out.contains("Input ended before the student was registered"));
    }

    #[test]
    fn roster_lines_sit_between_separators() {
        let roster = vec![
            Student::new("jane", "doe", "History").unwrap(),
            Student::new("Bob", "Smith", "Math").unwrap(),
        ];
        let out = run_console("", |c| c.display_roster(&roster).unwrap());

        let separator = "-".repeat(50);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                separator.as_str(),
                "Student: Jane Doe is enrolled in History",
                "Student: Bob Smith is enrolled in Math",
                separator.as_str(),
            ]
        );
    }

    #[test]
    fn report_error_without_detail_prints_only_message() {
        let out = run_console("", |c| c.report_error("Something failed", None).unwrap());
        assert_eq!(out, "Something failed\n");
    }

    #[test]
    fn plain_console_writes_no_escape_codes() {
        let err = ValidationError::new(Field::LastName, "D0e");
        let out = run_console("", |c| c.report_error("Bad input", Some(&err)).unwrap());
        assert!(out.contains("\n--Technical Error--\n"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn styled_console_colors_the_header() {
        let err = ValidationError::new(Field::LastName, "D0e");
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new()).with_style(true);
        console.report_error("Bad input", Some(&err)).unwrap();

        let (_, out) = console.into_inner();
        let out = String::from_utf8(out).unwrap();
        let styled = format!("{}", "--Technical Error--".red());
        assert!(out.contains(&format!("{styled}\n")));
    }

    #[test]
    fn into_inner_returns_unread_input() {
        let mut console = Console::new(Cursor::new(b"2\nleftover\n".to_vec()), Vec::new());
        assert_eq!(console.read_menu_choice().unwrap(), MenuChoice::ShowData);

        let (mut input, out) = console.into_inner();
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "leftover\n");
        assert_eq!(String::from_utf8(out).unwrap(), MENU_PROMPT);
    }

    // Captures what the spinner terminal shows at the moment the roster is printed.
    struct SpinnerWatch {
        term: InMemoryTerm,
        seen: Option<String>,
    }

    impl Reporter for SpinnerWatch {
        fn report_error(&mut self, _: &str, _: Option<&dyn Error>) -> io::Result<()> {
            Ok(())
        }

        fn display_roster(&mut self, _: &[Student]) -> io::Result<()> {
            self.seen = Some(self.term.contents());
            Ok(())
        }
    }

    #[test]
    fn spinner_is_off_screen_while_roster_prints() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Enrollments.json");
        let term = InMemoryTerm::new(10, 80);
        let spinner = ProgressBar::with_draw_target(
            None,
            ProgressDrawTarget::term_like(Box::new(term.clone())),
        );
        let mut watch = SpinnerWatch {
            term: term.clone(),
            seen: None,
        };

        let roster = vec![Student::new("Jane", "Doe", "History").unwrap()];
        save_with_spinner(&spinner, &path, &roster, &mut watch).unwrap();

        assert_eq!(watch.seen.as_deref().map(str::trim), Some(""));
        assert!(spinner.is_finished());
        assert_eq!(term.contents().trim(), "");
        assert!(path.exists());
    }

    #[test]
    fn report_error_with_detail_prints_technical_block() {
        let err = ValidationError::new(Field::FirstName, "j4ne");
        let out = run_console("", |c| {
            c.report_error("Bad input", Some(&err)).unwrap()
        });

        assert!(out.starts_with("Bad input\n"));
        assert!(out.contains("--Technical Error--"));
        assert!(out.contains("First name must be alphabetic"));
        assert!(out.contains("ValidationError"));
    }
}
