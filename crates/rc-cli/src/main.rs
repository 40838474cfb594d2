//! Rigged configuration inspector
//!
//! ```text
//! rc-infinity <cartan-type> [partitions-json] [riggings-json]
//!             [--horizontal] [--french] [--virtual]
//! ```
//!
//! Prints the element built from the given partitions (the highest weight
//! vector when none are given), its weight and, with `--virtual`, its image
//! in the virtual crystal.

use std::env;
use std::error::Error;
use std::process::ExitCode;

use rc_cartan::CartanType;
use rc_infinity::{DisplayOptions, InfinityCrystal, Rational, RiggedCrystal, RowValues};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: rc-infinity <cartan-type> [partitions-json] [riggings-json] \
                     [--horizontal] [--french] [--virtual]";

#[derive(Debug, Default)]
struct Args {
    cartan_type: String,
    partitions: Option<String>,
    riggings: Option<String>,
    display: DisplayOptions,
    show_virtual: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--horizontal" => parsed.display = parsed.display.horizontal(),
            "--french" => parsed.display = parsed.display.french(),
            "--virtual" => parsed.show_virtual = true,
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    parsed.cartan_type = positional.next().ok_or_else(|| USAGE.to_string())?;
    parsed.partitions = positional.next();
    parsed.riggings = positional.next();
    if positional.next().is_some() {
        return Err(USAGE.to_string());
    }
    Ok(parsed)
}

/// A rigging on the command line: an integer or a fraction such as `"-1/2"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RiggingValue {
    Integer(i64),
    Text(String),
}

impl RiggingValue {
    fn to_rational(&self) -> Result<Rational, Box<dyn Error>> {
        match self {
            Self::Integer(value) => Ok(Rational::from_integer(*value)),
            Self::Text(text) => text
                .trim()
                .parse::<Rational>()
                .map_err(|e| format!("bad rigging {:?}: {}", text, e).into()),
        }
    }
}

fn parse_riggings(json: &str) -> Result<RowValues, Box<dyn Error>> {
    let raw: Vec<Vec<RiggingValue>> = serde_json::from_str(json)?;
    raw.iter()
        .map(|row| row.iter().map(RiggingValue::to_rational).collect::<Result<Vec<_>, _>>())
        .collect()
}

fn run(args: &Args) -> Result<String, Box<dyn Error>> {
    let cartan_type: CartanType = args.cartan_type.parse()?;
    let crystal = InfinityCrystal::new(cartan_type)?;
    tracing::info!(%cartan_type, kind = crystal.kind(), "crystal ready");

    let element = match &args.partitions {
        Some(json) => {
            let partitions: Vec<Vec<u64>> = serde_json::from_str(json)?;
            let riggings = args.riggings.as_deref().map(parse_riggings).transpose()?;
            crystal.construct_element(partitions, riggings, None)?
        }
        None => crystal.highest_weight_vector().clone(),
    };

    let mut out = vec![
        crystal.to_string(),
        String::new(),
        element.display(args.display).to_string(),
        String::new(),
        format!("weight: {}", element.weight()),
    ];
    if !element.is_valid() {
        tracing::warn!("a rigging exceeds its vacancy number");
        out.push("warning: a rigging exceeds its vacancy number".to_string());
    }

    if args.show_virtual {
        let image = crystal.to_virtual(&element)?;
        let round_trip = crystal.from_virtual(&image)?;
        out.push(String::new());
        out.push(format!("virtual image in {}:", image.cartan_type()));
        out.push(String::new());
        out.push(image.display(args.display).to_string());
        out.push(String::new());
        out.push(format!("round trip recovers element: {}", round_trip == element));
    }
    Ok(out.join("\n"))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rc_infinity=warn,rc_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
