use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use serde_json::json;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use snake::predictor::{LogisticModel, Passenger, Port, Sex};

#[derive(Parser)]
#[command(name = "titanic")]
#[command(version, about = "Predict whether a Titanic passenger would survive")]
struct Cli {
    /// Path to the trained logistic-regression model (JSON)
    #[arg(long)]
    model: PathBuf,

    /// Passenger class (1-3)
    #[arg(long, default_value = "1")]
    pclass: u8,

    /// Sex (male or female)
    #[arg(long, default_value = "male")]
    sex: Sex,

    /// Age in years (1-80)
    #[arg(long, default_value = "25")]
    age: u8,

    /// Siblings/spouses aboard (0-8)
    #[arg(long, default_value = "0")]
    sibsp: u8,

    /// Parents/children aboard (0-6)
    #[arg(long, default_value = "0")]
    parch: u8,

    /// Fare paid (0.0-500.0)
    #[arg(long, default_value = "50.0")]
    fare: f64,

    /// Port of embarkation (C, Q or S)
    #[arg(long, default_value = "C")]
    embarked: Port,

    /// Print the passenger and prediction as JSON
    #[arg(long)]
    json: bool,

    /// Log more (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn passenger(&self) -> Passenger {
        Passenger {
            pclass: self.pclass,
            sex: self.sex,
            age: self.age,
            sibsp: self.sibsp,
            parch: self.parch,
            fare: self.fare,
            embarked: self.embarked,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("Failed to initialize logger")?;

    let passenger = cli.passenger();
    passenger.validate().context("Invalid passenger")?;

    let model = LogisticModel::load(&cli.model)?;
    let prediction = model.predict(&passenger);
    info!("{:?} -> {:?}", passenger, prediction);

    if cli.json {
        let out = json!({ "passenger": passenger, "prediction": prediction });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if prediction.survived {
        println!("The passenger would SURVIVE! (Probability: {:.2}%)", prediction.probability * 100.0);
    } else {
        println!("The passenger would NOT survive. (Probability: {:.2}%)", prediction.probability * 100.0);
    }

    Ok(())
}
