use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::application::{AppError, ExpenseTracker, MonthReport};
use crate::domain::{format_cents, parse_cents, Cents, ExpenseId, ExpenseRecord, YearMonth};

/// Expense Tracker - in-memory personal expense ledger
#[derive(Parser, Debug)]
#[command(name = "expense-tracker")]
#[command(about = "Record, total and export personal expenses from a text menu")]
#[command(version)]
pub struct Cli {
    /// File written by "Save to file" when no filename is entered
    #[arg(
        short,
        long,
        env = "EXPENSE_TRACKER_EXPORT_PATH",
        default_value = "expenses.csv"
    )]
    pub export_path: PathBuf,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_logging(&self) {
        let default_level = if self.verbose { "debug" } else { "error" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    }

    pub fn run(self) -> Result<()> {
        let mut tracker = ExpenseTracker::new();
        let stdin = io::stdin();
        let stdout = io::stdout();

        Menu::new(stdin.lock(), stdout.lock(), self.export_path).run(&mut tracker)
    }
}

/// Entries of the main menu, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    DisplayAll,
    ShowTotal,
    ShowMonth,
    Save,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Add,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::DisplayAll,
        MenuChoice::ShowTotal,
        MenuChoice::ShowMonth,
        MenuChoice::Save,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> usize {
        match self {
            MenuChoice::Add => 1,
            MenuChoice::Update => 2,
            MenuChoice::Delete => 3,
            MenuChoice::DisplayAll => 4,
            MenuChoice::ShowTotal => 5,
            MenuChoice::ShowMonth => 6,
            MenuChoice::Save => 7,
            MenuChoice::Exit => 8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Expense",
            MenuChoice::Update => "Update Expense",
            MenuChoice::Delete => "Delete Expense",
            MenuChoice::DisplayAll => "Display All Expenses",
            MenuChoice::ShowTotal => "Show Total Expense",
            MenuChoice::ShowMonth => "Show Specific Month Expense",
            MenuChoice::Save => "Save Expenses to file",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: usize = s.trim().parse().map_err(|_| s.trim().to_string())?;
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.number() == number)
            .ok_or_else(|| s.trim().to_string())
    }
}

/// Interactive read-eval loop over the expense tracker.
///
/// Generic over its input and output so it can be driven from a script.
pub struct Menu<R, W> {
    input: R,
    output: W,
    default_export_path: PathBuf,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, default_export_path: PathBuf) -> Self {
        Self {
            input,
            output,
            default_export_path,
        }
    }

    /// Run until Exit is chosen or input ends.
    pub fn run(&mut self, tracker: &mut ExpenseTracker) -> Result<()> {
        loop {
            self.print_menu()?;

            let line = match self.read_line()? {
                Input::Line(line) => line,
                Input::Undecodable => {
                    self.report(&AppError::InvalidInput)?;
                    continue;
                }
                Input::End => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting...")?;
                    break;
                }
                Ok(choice) => self.dispatch(choice, tracker)?,
                Err(_) => writeln!(self.output, "Invalid choice, please try again.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice, tracker: &mut ExpenseTracker) -> Result<()> {
        match choice {
            MenuChoice::Add => self.run_add(tracker),
            MenuChoice::Update => self.run_update(tracker),
            MenuChoice::Delete => self.run_delete(tracker),
            MenuChoice::DisplayAll => self.run_display(tracker),
            MenuChoice::ShowTotal => self.run_total(tracker),
            MenuChoice::ShowMonth => self.run_month(tracker),
            MenuChoice::Save => self.run_save(tracker),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Personal Expense Tracker ---")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        write!(self.output, "Choose an option: ")?;
        self.output.flush()?;
        Ok(())
    }

    // ========================
    // Handlers
    // ========================

    fn run_add(&mut self, tracker: &mut ExpenseTracker) -> Result<()> {
        let Some(amount) = self.prompt_amount()? else {
            return Ok(());
        };
        let Some(category) = self.prompt_category()? else {
            return Ok(());
        };

        let record = tracker.add_expense(amount, &category);
        writeln!(self.output, "Expense added with ID {}.", record.id)?;
        Ok(())
    }

    fn run_update(&mut self, tracker: &mut ExpenseTracker) -> Result<()> {
        let Some(id) = self.prompt_id("Enter Expense ID to update: ")? else {
            return Ok(());
        };
        let Some(amount) = self.prompt_amount()? else {
            return Ok(());
        };
        let Some(category) = self.prompt_category()? else {
            return Ok(());
        };

        match tracker.update_expense(id, amount, &category) {
            Ok(record) => writeln!(self.output, "Expense {} updated.", record.id)?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn run_delete(&mut self, tracker: &mut ExpenseTracker) -> Result<()> {
        let Some(id) = self.prompt_id("Enter Expense ID to delete: ")? else {
            return Ok(());
        };

        match tracker.delete_expense(id) {
            Ok(record) => writeln!(self.output, "Expense {} deleted.", record.id)?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    fn run_display(&mut self, tracker: &ExpenseTracker) -> Result<()> {
        let expenses = tracker.list_expenses();
        if expenses.is_empty() {
            writeln!(self.output, "No expenses recorded.")?;
        } else {
            self.print_table(expenses.iter())?;
        }
        Ok(())
    }

    fn run_total(&mut self, tracker: &ExpenseTracker) -> Result<()> {
        let Some(category) = self.prompt("Filter by category (leave empty for all): ")? else {
            return Ok(());
        };

        if category.is_empty() {
            match tracker.total_expenses() {
                Ok(total) => writeln!(self.output, "Total Expenses: {}", format_cents(total))?,
                Err(err) => self.report(&err)?,
            }
        } else {
            match tracker.category_total(&category) {
                Ok(total) => writeln!(
                    self.output,
                    "Total Expenses for '{}': {}",
                    category,
                    format_cents(total)
                )?,
                Err(err) => self.report(&err)?,
            }
        }
        Ok(())
    }

    fn run_month(&mut self, tracker: &ExpenseTracker) -> Result<()> {
        let Some(input) = self.prompt("Enter Specific Month (YYYY-MM): ")? else {
            return Ok(());
        };

        // A malformed month goes straight back to the menu.
        let month = match input.parse::<YearMonth>() {
            Ok(month) => month,
            Err(err) => {
                self.report(&AppError::from(err))?;
                writeln!(self.output, "Please use YYYY-MM format.")?;
                return Ok(());
            }
        };

        match tracker.month_report(month) {
            Ok(report) => self.print_month_report(&report),
            Err(err) => self.report(&err),
        }
    }

    fn run_save(&mut self, tracker: &ExpenseTracker) -> Result<()> {
        let prompt = format!(
            "Enter filename (default: {}): ",
            self.default_export_path.display()
        );
        let Some(filename) = self.prompt(&prompt)? else {
            return Ok(());
        };

        let path = if filename.is_empty() {
            self.default_export_path.clone()
        } else {
            PathBuf::from(filename)
        };

        match tracker.export(&path) {
            Ok(result) => writeln!(
                self.output,
                "Saved {} expense(s) to {} ({}).",
                result.count,
                path.display(),
                result.format.as_str()
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(())
    }

    // ========================
    // Output helpers
    // ========================

    fn report(&mut self, err: &AppError) -> Result<()> {
        writeln!(self.output, "Error: {}", err)?;
        Ok(())
    }

    fn print_table<'a>(&mut self, expenses: impl Iterator<Item = &'a ExpenseRecord>) -> Result<()> {
        writeln!(
            self.output,
            "{:<6} {:>10} {:<20} {:<10}",
            "ID", "AMOUNT", "CATEGORY", "DATE"
        )?;
        writeln!(self.output, "{}", "-".repeat(49))?;
        for expense in expenses {
            writeln!(
                self.output,
                "{:<6} {:>10} {:<20} {:<10}",
                expense.id,
                expense.formatted_amount(),
                truncate(&expense.category, 20),
                expense.formatted_date()
            )?;
        }
        Ok(())
    }

    fn print_month_report(&mut self, report: &MonthReport) -> Result<()> {
        let title = format!("{} {}", report.month.month_name(), report.month.year());

        if report.is_empty() {
            writeln!(self.output, "No expenses recorded in {}.", title)?;
        } else {
            writeln!(self.output, "Expenses for {}:", title)?;
            self.print_table(report.expenses.iter())?;
        }
        writeln!(
            self.output,
            "Total for {}: {}",
            title,
            format_cents(report.month_total)
        )?;
        writeln!(
            self.output,
            "Total across all months: {}",
            format_cents(report.overall_total)
        )?;
        Ok(())
    }

    // ========================
    // Input helpers
    // ========================

    /// Read one line without its line ending.
    fn read_line(&mut self) -> Result<Input> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(Input::End);
        }
        match String::from_utf8(buf) {
            Ok(line) => Ok(Input::Line(line.trim().to_string())),
            Err(_) => Ok(Input::Undecodable),
        }
    }

    /// Undecodable input is reported and yields `None`, as does end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        match self.read_line()? {
            Input::Line(line) => Ok(Some(line)),
            Input::Undecodable => {
                self.report(&AppError::InvalidInput)?;
                Ok(None)
            }
            Input::End => Ok(None),
        }
    }

    /// Prompt for a non-negative amount. Bad input is reported and yields `None`.
    fn prompt_amount(&mut self) -> Result<Option<Cents>> {
        let Some(input) = self.prompt("Enter Amount: ")? else {
            return Ok(None);
        };

        match parse_cents(&input) {
            Ok(amount) if amount < 0 => {
                self.report(&AppError::NegativeAmount(amount))?;
                Ok(None)
            }
            Ok(amount) => Ok(Some(amount)),
            Err(err) => {
                self.report(&AppError::from(err))?;
                Ok(None)
            }
        }
    }

    fn prompt_category(&mut self) -> Result<Option<String>> {
        let Some(category) = self.prompt("Enter Category: ")? else {
            return Ok(None);
        };

        if category.is_empty() {
            self.report(&AppError::EmptyCategory)?;
            return Ok(None);
        }
        Ok(Some(category))
    }

    fn prompt_id(&mut self, label: &str) -> Result<Option<ExpenseId>> {
        let Some(input) = self.prompt(label)? else {
            return Ok(None);
        };

        match input.parse::<ExpenseId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                self.report(&AppError::InvalidId(input))?;
                Ok(None)
            }
        }
    }
}

/// One line of menu input.
enum Input {
    Line(String),
    Undecodable,
    End,
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
