use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use expense_tracker::{
    Category, CategoryFilter, Config, CurrencyFormatter, Error, Expense, ExpenseForm, ExpenseId,
    ExpenseStore, logging::init_logging,
};

/// Track where your money goes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = Config::DEFAULT_DB_PATH)]
    db_path: PathBuf,

    /// Save expenses as JSON files in this directory instead of SQLite.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Canonical timezone name used to date new expenses, e.g. "Asia/Kolkata".
    #[arg(long, default_value = Config::DEFAULT_TIMEZONE)]
    timezone: String,

    /// Symbol placed before displayed amounts.
    #[arg(long = "currency", default_value = Config::DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,

    /// The most verbose log level to print. Overridden by `RUST_LOG`.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show saved expenses, most recent first.
    List {
        /// Only show expenses in this category, or "All".
        #[arg(long, default_value_t = CategoryFilter::All)]
        category: CategoryFilter,
    },
    /// Record a new expense dated today.
    Add {
        /// What you bought.
        #[arg(long)]
        title: String,

        /// How much it cost.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// The kind of purchase.
        #[arg(long, default_value_t = Category::default())]
        category: Category,
    },
    /// Remove an expense by its ID.
    Delete {
        /// The ID shown by `list`.
        id: ExpenseId,
    },
    /// Show the total and the breakdown by category.
    Summary,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            db_path: self.db_path.clone(),
            data_dir: self.data_dir.clone(),
            timezone: self.timezone.clone(),
            currency_symbol: self.currency_symbol.clone(),
            log_level: self.log_level,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();

    init_logging(config.log_level);

    match run(&config, args.command) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, command: Command) -> Result<ExitCode, Error> {
    let local_offset = config.local_offset()?;
    let formatter = config.currency_formatter()?;
    let mut store = ExpenseStore::load(config.open_storage()?, local_offset);

    match command {
        Command::List { category } => {
            print_expenses(&store.filtered(category), &formatter);
        }
        Command::Add {
            title,
            amount,
            category,
        } => {
            let mut form = ExpenseForm {
                title,
                amount,
                category,
                ..Default::default()
            };

            match form.submit(&mut store) {
                Ok(expense) => {
                    println!("Added expense {}:", expense.id);
                    print_expenses(&[&expense], &formatter);
                    println!();
                    print_summary(&store, &formatter);
                }
                Err(error) => {
                    eprintln!("Could not add expense: {error}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Delete { id } => {
            if store.delete(id) {
                println!("Deleted expense {id}.");
            } else {
                println!("No expense with ID {id}, nothing deleted.");
            }
            println!();
            print_summary(&store, &formatter);
        }
        Command::Summary => print_summary(&store, &formatter),
    }

    if store.has_unsaved_changes() {
        eprintln!("Your changes could not be saved, check the logs for details.");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_expenses(expenses: &[&Expense], formatter: &CurrencyFormatter) {
    if expenses.is_empty() {
        println!("No expenses yet. Start tracking your spending with `add`.");
        return;
    }

    for expense in expenses {
        println!(
            "{:>14}  {}  {:<13}  {:<30}  {:>14}",
            expense.id.to_string(),
            expense.date,
            expense.category.to_string(),
            expense.title.to_string(),
            formatter.format(expense.amount)
        );
    }
}

fn print_summary<S>(store: &ExpenseStore<S>, formatter: &CurrencyFormatter) {
    println!("Total spending: {}", formatter.format(store.total()));
    println!("{} transactions", store.len());

    let totals = store.category_totals();
    if totals.is_empty() {
        return;
    }

    println!();
    println!("Category breakdown:");
    for (category, amount) in totals {
        println!(
            "  {:<13}  {:>14}",
            category.to_string(),
            formatter.format(amount)
        );
    }
}
