use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use loan_risk::applicant::{
    AccountType, AgeGroup, BankName, ClampNote, EmploymentStatus, RawInputRecord,
};
use loan_risk::model::ScoringEngine;

const EXIT_SUCCESS: i32 = 0;
const EXIT_CONFIG: i32 = 4;
const EXIT_MODEL: i32 = 5;
const EXIT_SCORING: i32 = 6;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive applicant form (default if no subcommand)
    Form,
    /// Score one applicant from flags and print the result
    Score(ScoreArgs),
    /// Run interactive configuration wizard
    Init,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Requested loan amount (₦)
    #[arg(long, default_value_t = 50_000.0, allow_negative_numbers = true)]
    loan_amount: f64,

    /// Loan term in days
    #[arg(long, default_value_t = 90.0, allow_negative_numbers = true)]
    term_days: f64,

    /// Current repayment ratio
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    repayment_ratio: f64,

    /// Number of previous loans
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    prev_loans: f64,

    /// Average repayment delay in days
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    repay_delay: f64,

    /// Number of previous loans first repaid late
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    first_repaid_late: f64,

    /// Average repayment ratio over previous loans
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    prev_repayment_ratio: f64,

    /// Average duration of previous loans in days
    #[arg(long, default_value_t = 180.0, allow_negative_numbers = true)]
    duration_days: f64,

    /// Average interest paid on previous loans (₦)
    #[arg(long, default_value_t = 5000.0, allow_negative_numbers = true)]
    prev_interest: f64,

    /// Applicant age in years
    #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
    age: f64,

    /// Age group label, e.g. "Young adults"
    #[arg(long, default_value_t = AgeGroup::YoungAdults)]
    age_group: AgeGroup,

    /// Bank name, e.g. "GT Bank"
    #[arg(long, default_value_t = BankName::GtBank)]
    bank: BankName,

    /// Bank account type
    #[arg(long, default_value_t = AccountType::Other)]
    account_type: AccountType,

    /// Employment status
    #[arg(long, default_value_t = EmploymentStatus::Permanent)]
    employment_status: EmploymentStatus,

    /// Print the assessment as JSON
    #[arg(long)]
    json: bool,
}

impl ScoreArgs {
    /// Build the record from the flags, pulling each number into its domain.
    fn to_record(&self) -> (RawInputRecord, Vec<ClampNote>) {
        RawInputRecord {
            loanamount: self.loan_amount,
            termdays: self.term_days,
            repayment_curr_ratio: self.repayment_ratio,
            num_prev_loans: self.prev_loans,
            avg_repay_delay_days: self.repay_delay,
            total_firstrepaid_late: self.first_repaid_late,
            avg_prev_repayment_ratio: self.prev_repayment_ratio,
            avg_duration_days: self.duration_days,
            avg_prev_interest: self.prev_interest,
            // Float to int casts saturate, so negative ages land on 0 and get clamped
            age: self.age.round() as u32,
            age_group: self.age_group,
            bank_name_clients: self.bank,
            bank_account_type: self.account_type,
            employment_status_clients: self.employment_status,
        }
        .clamped()
    }
}

#[derive(Parser, Debug)]
#[command(name = "loan-risk")]
#[command(about = "Loan applicant risk scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/loan-risk/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Model artifact to load instead of the configured one
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Form);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        if let Err(e) = loan_risk::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match loan_risk::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = loan_risk::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Load the model once; every submission shares this handle
    let model_path = cli.model.unwrap_or_else(|| config.model_path.clone());
    let load_start = Instant::now();
    let engine = match ScoringEngine::load(&model_path) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Model error: {}", e);
            std::process::exit(EXIT_MODEL);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded model '{}' from {} in {:?}",
            engine.model_name(),
            model_path.display(),
            load_start.elapsed()
        );
    }

    let asset_status = loan_risk::assets::probe_banner(&config.asset_path);

    match command {
        Commands::Form => {
            let theme = loan_risk::tui::resolve_theme(config.theme);
            let app = loan_risk::tui::App::new(engine, asset_status, theme, cli.verbose);
            if let Err(e) = loan_risk::tui::run_tui(app).await {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_SCORING);
            }
        }
        Commands::Score(args) => {
            if let Some(warning) = asset_status.warning() {
                eprintln!("Warning: {}", warning);
            }

            let (record, notes) = args.to_record();
            for note in &notes {
                eprintln!(
                    "Warning: {} {} is outside its allowed range; using {}",
                    note.field.label(),
                    note.requested,
                    note.stored
                );
            }

            let assessment = match loan_risk::pipeline::assess(&engine, &record) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Error: prediction failed: {}", e);
                    std::process::exit(EXIT_SCORING);
                }
            };

            if cli.verbose {
                eprintln!("{}", loan_risk::output::format_features(&assessment));
            }

            if args.json {
                match loan_risk::output::format_json(&assessment) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize assessment: {}", e);
                        std::process::exit(EXIT_SCORING);
                    }
                }
            } else {
                let use_colors = loan_risk::output::should_use_colors();
                println!(
                    "{}",
                    loan_risk::output::format_assessment(&assessment, use_colors)
                );
            }
        }
        // Handled before the config is loaded
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
