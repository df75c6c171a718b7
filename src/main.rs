//! patterns - runs the observer, abstract factory and template method demos.

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use design_patterns::factory::open_database;
use design_patterns::logging::init_logging;
use design_patterns::observer::{FoodObserver, StockObserver};
use design_patterns::{
    factory_for, observer_handle, DatabaseKind, DemoConfig, Exam, ExamA, ExamB, Notifier,
    ObserverKind, Secretary, User,
};

#[derive(Parser, Debug)]
#[command(name = "patterns", version, about = "Design pattern demos")]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted.
    #[arg(long, short, global = true, env = "PATTERNS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Register observers and fire the configured events.
    Observer,
    /// Build user stores through the abstract factory.
    Factory {
        /// Overrides the configured backend (mysql, postgresql).
        #[arg(long)]
        database: Option<DatabaseKind>,
    },
    /// Sit both exams through the template method.
    Exam,
    /// Run every demo.
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DemoConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    init_logging(&config.log_level);

    info!(
        config = ?cli.config,
        database = %config.database,
        subscriptions = config.subscriptions.len(),
        "configuration loaded"
    );

    match cli.command.unwrap_or(Command::All) {
        Command::Observer => run_observer(&config),
        Command::Factory { database } => run_factory(database.unwrap_or(config.database)),
        Command::Exam => run_exam(),
        Command::All => {
            run_observer(&config)?;
            println!();
            run_factory(config.database)?;
            println!();
            run_exam()
        }
    }
}

fn heading(title: &str) {
    println!("{}", format!("=== {title} ===").bold().cyan());
}

fn run_observer(config: &DemoConfig) -> Result<()> {
    heading("Observer Pattern");

    let stock = Rc::new(StockObserver::new());
    let food = Rc::new(FoodObserver::new());
    let mut secretary = Secretary::new();

    for subscription in &config.subscriptions {
        let handle = match subscription.observer {
            ObserverKind::Stock => observer_handle(&stock),
            ObserverKind::Food => observer_handle(&food),
        };
        secretary.register(subscription.event, handle);
        println!("  {} -> {}", subscription.observer, subscription.event);
    }

    for &event in &config.notify {
        let report = secretary.notify(event);
        info!(
            %event,
            delivered = report.delivered,
            failed = report.failed,
            pruned = report.pruned,
            "notified"
        );
        println!(
            "  notify {}: {} delivered, {} failed",
            event,
            report.delivered.to_string().green(),
            report.failed.to_string().red()
        );
    }

    println!(
        "  stock processed {}, food processed {}",
        stock.processed(),
        food.processed()
    );
    Ok(())
}

fn run_factory(kind: DatabaseKind) -> Result<()> {
    heading("Abstract Factory Pattern");

    let user = User::new(open_database(kind));
    let id = user.insert_name("ada");
    println!("  [{}] aggregated interface: {}", kind, user.get_name(id));

    let factory = factory_for(kind);
    let name = factory.create_user_name();
    let email = factory.create_user_email();
    println!("  [{}] user name store:  {}", factory.kind(), name.get(id));
    println!("  [{}] user email store: {}", factory.kind(), email.get(id));
    Ok(())
}

fn run_exam() -> Result<()> {
    heading("Template Method Pattern");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let students: [(&str, &dyn Exam); 2] = [("A", &ExamA), ("B", &ExamB)];
    for (student, exam) in students {
        writeln!(out, "{}", format!("Student {student}").bold())?;
        exam.sit(&mut out)
            .with_context(|| format!("failed to print exam for student {student}"))?;
    }
    Ok(())
}
