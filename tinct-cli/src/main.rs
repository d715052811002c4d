//! Tinct CLI
//!
//! Inspect CSS values from the terminal: tokenize, translate, match against
//! a grammar, evaluate math and convert colors.
//!
//! Set `RUST_LOG=tinct_css=debug` to trace translation and evaluation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tinct_css::color::D50;
use tinct_css::{
    AbsoluteEvaluator, ContextEvaluator, CssUnit, Evaluator, Match, PercentageEvaluator,
    PrimitiveValue, ResolutionContext, SerializeMode, Syntax, Value, parse_color, parse_units,
};
use tracing_subscriber::EnvFilter;

/// Tinct: CSS value inspector
#[derive(Parser, Debug)]
#[command(name = "tinct")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show how a value is typed and serialized
    tinct parse 'calc((1px + 2em) * 3)'

    # Check a value against a grammar
    tinct match '10px 50%' '<length-percentage>+'

    # Evaluate against a percentage basis
    tinct eval 'calc(50% - 10px)' --percent-base 400

    # Convert a wide-gamut color to sRGB
    tinct convert 'color(display-p3 1 0 0)'
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a value and print its kind, type and serializations
    Parse {
        /// The value text
        value: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the lexical units of a value
    Tokens {
        /// The value text
        value: String,
    },

    /// Match a value against a syntax string
    Match {
        /// The value text
        value: String,

        /// A syntax string such as `<length> | auto`
        syntax: String,
    },

    /// Evaluate a number, dimension or math function
    Eval {
        /// The expression, e.g. `calc(1em + 4px)`
        expression: String,

        /// Resolve percentages against this many pixels
        #[arg(long, value_name = "PX")]
        percent_base: Option<f64>,

        /// Load font sizes and viewport from a JSON file
        #[arg(long, value_name = "FILE")]
        context: Option<PathBuf>,

        /// Convert the result to this unit
        #[arg(long)]
        unit: Option<String>,

        /// Only accept percentages and numbers
        #[arg(long, conflicts_with_all = ["context", "percent_base"])]
        percentage_only: bool,
    },

    /// Convert a color to sRGB, XYZ (D50) and Lab
    Convert {
        /// The color, e.g. `#663399` or `oklch(0.7 0.1 200)`
        color: String,

        /// Keep out-of-gamut sRGB components instead of mapping them
        #[arg(long)]
        no_clamp: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Parse { value, json } => parse(&value, json),
        Command::Tokens { value } => tokens(&value),
        Command::Match { value, syntax } => match_value(&value, &syntax),
        Command::Eval {
            expression,
            percent_base,
            context,
            unit,
            percentage_only,
        } => eval(
            &expression,
            percent_base,
            context.as_deref(),
            unit.as_deref(),
            percentage_only,
        ),
        Command::Convert { color, no_clamp } => convert(&color, !no_clamp),
    }
}

fn parse(text: &str, json: bool) -> anyhow::Result<()> {
    let value = Value::parse(text).with_context(|| format!("failed to parse '{text}'"))?;
    let type_name = value
        .primitive_type()
        .map_or_else(|| "-".to_string(), |t| t.to_string());

    if json {
        let summary = serde_json::json!({
            "kind": value.css_kind(),
            "type": value.primitive_type(),
            "canonical": value.css_text(),
            "minified": value.minified_text(),
            "pending": value.contains_proxy(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{:>10}  {}", "kind".dimmed(), value.css_kind().cyan());
    println!("{:>10}  {}", "type".dimmed(), type_name.cyan());
    println!("{:>10}  {}", "canonical".dimmed(), value.css_text());
    println!("{:>10}  {}", "minified".dimmed(), value.minified_text());
    if value.contains_proxy() {
        println!("{:>10}  {}", "note".dimmed(), "contains var()/attr()".yellow());
    }
    Ok(())
}

fn tokens(text: &str) -> anyhow::Result<()> {
    let units = parse_units(text).with_context(|| format!("failed to tokenize '{text}'"))?;
    for unit in &units {
        println!(
            "{}  {:?}",
            unit.css_text(SerializeMode::Canonical).bold(),
            unit.dimmed()
        );
    }
    Ok(())
}

fn match_value(text: &str, syntax_text: &str) -> anyhow::Result<()> {
    let value = Value::parse(text).with_context(|| format!("failed to parse '{text}'"))?;
    let syntax =
        Syntax::parse(syntax_text).with_context(|| format!("invalid syntax '{syntax_text}'"))?;
    match value.matches(&syntax) {
        Match::True => println!("{}", "true".green()),
        Match::False => println!("{}", "false".red()),
        Match::Pending => println!("{} (re-validate after substitution)", "pending".yellow()),
    }
    Ok(())
}

fn eval(
    text: &str,
    percent_base: Option<f64>,
    context: Option<&Path>,
    unit: Option<&str>,
    percentage_only: bool,
) -> anyhow::Result<()> {
    let value = Value::parse(text).with_context(|| format!("failed to parse '{text}'"))?;
    let Some(primitive) = value.as_primitive() else {
        bail!("'{text}' is not a single number, dimension or math function");
    };

    let evaluator: Box<dyn Evaluator> = if percentage_only {
        Box::new(PercentageEvaluator)
    } else if context.is_some() || percent_base.is_some() {
        let mut ctx = match context {
            Some(path) => load_context(path)?,
            None => ResolutionContext::default(),
        };
        if let Some(basis) = percent_base {
            ctx = ctx.with_percentage_basis(basis);
        }
        Box::new(ContextEvaluator::new(ctx))
    } else {
        Box::new(AbsoluteEvaluator)
    };

    let result = evaluator
        .evaluate(primitive)
        .with_context(|| format!("failed to evaluate '{text}'"))?;
    let (number, unit) = match unit {
        Some(name) => {
            let target = CssUnit::from_unit_text(name);
            if target == CssUnit::Invalid {
                bail!("unknown unit '{name}'");
            }
            (evaluator.evaluate_as(primitive, target)?, target)
        }
        None => (result.value, result.unit),
    };
    let text = PrimitiveValue::dimension(number, unit).css_text(SerializeMode::Canonical);
    println!("{}", text.green());
    Ok(())
}

fn load_context(path: &Path) -> anyhow::Result<ResolutionContext> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid context in {}", path.display()))
}

fn convert(text: &str, clamp: bool) -> anyhow::Result<()> {
    let color = parse_color(text).with_context(|| format!("failed to parse color '{text}'"))?;
    let srgb = color.to_srgb(clamp)?;
    let xyz = color.to_xyz(D50)?;
    let lab = color.to_lab()?;
    let alpha = color.alpha()?;

    println!("{:>8}  {}", "input".dimmed(), color.css_text(SerializeMode::Canonical));
    println!(
        "{:>8}  {:.4} {:.4} {:.4}",
        "srgb".dimmed(),
        srgb[0],
        srgb[1],
        srgb[2]
    );
    if clamp {
        let [r, g, b, a] = color.to_rgba8()?;
        let hex = if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        };
        println!("{:>8}  {}", "hex".dimmed(), hex.truecolor(r, g, b));
    }
    println!(
        "{:>8}  {:.4} {:.4} {:.4}",
        "xyz-d50".dimmed(),
        xyz[0],
        xyz[1],
        xyz[2]
    );
    println!(
        "{:>8}  {:.2} {:.2} {:.2}",
        "lab".dimmed(),
        lab[0],
        lab[1],
        lab[2]
    );
    println!("{:>8}  {alpha}", "alpha".dimmed());
    Ok(())
}
