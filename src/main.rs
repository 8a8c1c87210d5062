use chrono::{Local, NaiveDate};
use civic_registry::calendar::{DAY_FIRST, ISO};
use civic_registry::config::AppConfig;
use civic_registry::error::AppError;
use civic_registry::programs::declarations::{
    validate_declaration_date, DeclarationAssessment, DeclarationDetails, TaxOffice,
    WithholdingCategory,
};
use civic_registry::programs::internships::PlacementRegistry;
use civic_registry::programs::vehicles::{
    assess, render_tax_report, Vehicle, VehicleDraft, VehicleSpec,
};
use civic_registry::shell::{DeclarationShell, InternshipShell, Prompter, VehicleShell};
use civic_registry::telemetry;
use civic_registry::ValidationError;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "civic-registry",
    about = "Vehicle tax, tax declaration enforcement, and internship placement consoles",
    version
)]
struct Cli {
    /// Evaluation date for ages, penalties, and log entries (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true, value_parser = parse_iso_date)]
    today: Option<NaiveDate>,
    /// Override APP_LOG_LEVEL for this run
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Start with empty registries instead of the sample taxpayers, officers, and students
    #[arg(long, global = true)]
    no_sample_data: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Vehicle tax calculator (interactive unless a subcommand is given)
    Vehicles {
        #[command(subcommand)]
        command: Option<VehicleCommand>,
    },
    /// Tax declaration and enforcement tracker (interactive unless a subcommand is given)
    Declarations {
        #[command(subcommand)]
        command: Option<DeclarationCommand>,
    },
    /// Internship placement tracker
    Internships,
}

#[derive(Subcommand, Debug)]
enum VehicleCommand {
    /// Print the tax report for one vehicle without registering it
    Quote(VehicleQuoteArgs),
}

#[derive(Subcommand, Debug)]
enum DeclarationCommand {
    /// Compute tax and late-payment penalty for one declaration without filing it
    Quote(DeclarationQuoteArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VehicleKindArg {
    Car,
    Truck,
    Motorcycle,
    Bus,
    Suv,
}

#[derive(Args, Debug)]
struct VehicleQuoteArgs {
    #[arg(long, value_enum)]
    kind: VehicleKindArg,
    #[arg(long, default_value = "QUOTE")]
    id: String,
    #[arg(long, default_value = "Walk-in owner")]
    owner: String,
    #[arg(long, default_value = "UNREGISTERED")]
    registration: String,
    /// Year of fabrication
    #[arg(long)]
    year: i32,
    /// Base annual tax rate in dollars
    #[arg(long)]
    base_rate: f64,
    #[arg(long)]
    electric: bool,
    /// Load capacity in tons (trucks)
    #[arg(long)]
    load_capacity: Option<f64>,
    /// Engine capacity in cc (motorcycles)
    #[arg(long)]
    engine_cc: Option<u32>,
    /// Passenger capacity (buses)
    #[arg(long)]
    passengers: Option<u32>,
    #[arg(long)]
    four_wheel_drive: bool,
    /// Emit the assessment as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DeclarationKindArg {
    Paye,
    Vat,
    Withholding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    Rent,
    Dividends,
    Interest,
    ProfessionalServices,
    Imports,
    PublicTender,
}

impl From<CategoryArg> for WithholdingCategory {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Rent => Self::Rent,
            CategoryArg::Dividends => Self::Dividends,
            CategoryArg::Interest => Self::Interest,
            CategoryArg::ProfessionalServices => Self::ProfessionalServices,
            CategoryArg::Imports => Self::Imports,
            CategoryArg::PublicTender => Self::PublicTender,
        }
    }
}

#[derive(Args, Debug)]
struct DeclarationQuoteArgs {
    #[arg(long, value_enum)]
    kind: DeclarationKindArg,
    /// Declaration date (DD/MM/YYYY)
    #[arg(long, value_parser = parse_day_first_date)]
    declared_on: NaiveDate,
    #[arg(long)]
    gross_salary: Option<f64>,
    #[arg(long, default_value_t = 0)]
    dependents: u32,
    #[arg(long)]
    sales: Option<f64>,
    #[arg(long)]
    purchases: Option<f64>,
    #[arg(long, value_enum)]
    category: Option<CategoryArg>,
    #[arg(long)]
    base_amount: Option<f64>,
    /// Emit the assessment as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(level) = cli.log_level {
        config.telemetry.log_level = level;
    }
    if cli.no_sample_data {
        config.session.seed_sample_data = false;
    }

    telemetry::init(&config.telemetry)?;

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    info!(?config.environment, %today, "civic registry starting");

    let program = match &cli.command {
        Command::Vehicles { .. } => "vehicles",
        Command::Declarations { .. } => "declarations",
        Command::Internships => "internships",
    };
    let _session = telemetry::session_span(program, today).entered();

    match cli.command {
        Command::Vehicles {
            command: Some(VehicleCommand::Quote(args)),
        } => run_vehicle_quote(args, today),
        Command::Vehicles { command: None } => {
            let mut shell = VehicleShell::new(today);
            shell.run(&mut console())?;
            Ok(())
        }
        Command::Declarations {
            command: Some(DeclarationCommand::Quote(args)),
        } => run_declaration_quote(args, today),
        Command::Declarations { command: None } => {
            let office = if config.session.seed_sample_data {
                TaxOffice::with_sample_data()?
            } else {
                TaxOffice::new()
            };
            DeclarationShell::new(office, today).run(&mut console())?;
            Ok(())
        }
        Command::Internships => {
            let registry = if config.session.seed_sample_data {
                PlacementRegistry::with_sample_data()?
            } else {
                PlacementRegistry::new()
            };
            InternshipShell::new(registry, today).run(&mut console())?;
            Ok(())
        }
    }
}

fn console() -> Prompter<io::StdinLock<'static>, io::Stdout> {
    Prompter::new(io::stdin().lock(), io::stdout())
}

fn parse_iso_date(raw: &str) -> Result<NaiveDate, String> {
    ISO.parse(raw).map_err(|err| err.to_string())
}

fn parse_day_first_date(raw: &str) -> Result<NaiveDate, String> {
    DAY_FIRST.parse(raw).map_err(|err| err.to_string())
}

fn required<T>(value: Option<T>, flag: &str, kind: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::rejected(format!("{flag} is required for {kind}")))
}

fn vehicle_spec(args: &VehicleQuoteArgs) -> Result<VehicleSpec, ValidationError> {
    Ok(match args.kind {
        VehicleKindArg::Car => VehicleSpec::Car {
            electric: args.electric,
        },
        VehicleKindArg::Truck => VehicleSpec::Truck {
            load_capacity_tons: required(args.load_capacity, "--load-capacity", "trucks")?,
        },
        VehicleKindArg::Motorcycle => VehicleSpec::Motorcycle {
            engine_capacity_cc: required(args.engine_cc, "--engine-cc", "motorcycles")?,
        },
        VehicleKindArg::Bus => VehicleSpec::Bus {
            passenger_capacity: required(args.passengers, "--passengers", "buses")?,
        },
        VehicleKindArg::Suv => VehicleSpec::Suv {
            four_wheel_drive: args.four_wheel_drive,
        },
    })
}

fn declaration_details(args: &DeclarationQuoteArgs) -> Result<DeclarationDetails, ValidationError> {
    let details = match args.kind {
        DeclarationKindArg::Paye => DeclarationDetails::Paye {
            gross_salary: required(args.gross_salary, "--gross-salary", "PAYE")?,
            dependents: args.dependents,
        },
        DeclarationKindArg::Vat => DeclarationDetails::Vat {
            taxable_sales: required(args.sales, "--sales", "VAT")?,
            taxable_purchases: required(args.purchases, "--purchases", "VAT")?,
        },
        DeclarationKindArg::Withholding => DeclarationDetails::Withholding {
            category: required(args.category, "--category", "withholding tax")?.into(),
            base_amount: required(args.base_amount, "--base-amount", "withholding tax")?,
        },
    };
    details.validate()?;
    Ok(details)
}

fn run_vehicle_quote(args: VehicleQuoteArgs, today: NaiveDate) -> Result<(), AppError> {
    let spec = vehicle_spec(&args)?;
    let vehicle = Vehicle::new(
        VehicleDraft {
            id: args.id,
            owner_name: args.owner,
            year_of_fabrication: args.year,
            registration_number: args.registration,
            base_tax_rate: args.base_rate,
            spec,
        },
        today,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assess(&vehicle, today))?);
    } else {
        print!("{}", render_tax_report(&vehicle, today));
    }
    Ok(())
}

fn run_declaration_quote(args: DeclarationQuoteArgs, today: NaiveDate) -> Result<(), AppError> {
    let details = declaration_details(&args)?;
    let declared_on = validate_declaration_date(args.declared_on, today)?;
    let assessment = DeclarationAssessment::quote(details, declared_on, today);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("Declaration type: {}", assessment.kind.label());
    println!("Declared on: {}", DAY_FIRST.render(assessment.declaration_date));
    if let Some(due) = assessment.due_date {
        println!("Due date: {}", DAY_FIRST.render(due));
    }
    println!("Tax Due: RWF {:.2}", assessment.tax_amount);
    println!(
        "Penalty ({:.1}%): RWF {:.2}",
        assessment.penalty_percent, assessment.penalty
    );
    println!("Total Due: RWF {:.2}", assessment.total_due);
    Ok(())
}
