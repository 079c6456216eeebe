use anyhow::{Context, Result, anyhow, bail};
use log::{LevelFilter, info};

use curvecross::report;
use curvecross::sampling::{DomainPolicy, SolveSettings, solve};

const USAGE: &str = "Find where two functions of x intersect

USAGE:
    curvecross [OPTIONS] <F1> <F2>

OPTIONS:
    --start=<X>          Domain start (default -10)
    --end=<X>            Domain end (default 10)
    --points=<N>         Number of samples (default 1000)
    --precision=<N>      Decimal places in the output (default 2)
    --tolerance=<T>      Largest difference treated as equal (default 1e-6)
    --restrict           Drop samples outside the functions' domain (default)
    --no-restrict        Keep the full grid when a domain restriction is found
    --log-level=<LEVEL>  off, error, warn, info, debug or trace (default warn)
    -h, --help           Show this message

FUNCTIONS:
    Built from x, numbers, + - * / ^, parentheses, sqrt() and log10().
    Example: curvecross \"x^2\" \"2*x + 3\"";

#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    functions: Vec<String>,
    settings: SolveSettings,
    policy: DomainPolicy,
    log_level: LevelFilter,
    help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            functions: Vec::new(),
            settings: SolveSettings::default(),
            policy: DomainPolicy::RestrictToValid,
            log_level: LevelFilter::Warn,
            help: false,
        }
    }
}

fn parse_value<T>(flag: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid value '{}' for {}", value, flag))
}

fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut cli_args = CliArgs::default();

    for arg in args {
        if let Some((flag, value)) = arg.split_once('=').filter(|(f, _)| f.starts_with("--")) {
            let settings = &mut cli_args.settings;
            match flag {
                "--start" => settings.start = parse_value(flag, value)?,
                "--end" => settings.end = parse_value(flag, value)?,
                "--points" => settings.points = parse_value(flag, value)?,
                "--precision" => settings.precision = parse_value(flag, value)?,
                "--tolerance" => settings.tolerance = parse_value(flag, value)?,
                "--log-level" => {
                    cli_args.log_level = value
                        .parse()
                        .map_err(|_| anyhow!("Invalid log level '{}'", value))?
                }
                _ => bail!("Unknown option '{}'", flag),
            }
            continue;
        }

        match arg.as_str() {
            "--restrict" => cli_args.policy = DomainPolicy::RestrictToValid,
            "--no-restrict" => cli_args.policy = DomainPolicy::Unrestricted,
            "--help" | "-h" => cli_args.help = true,
            flag if flag.starts_with("--") => bail!("Unknown option '{}'", flag),
            _ => cli_args.functions.push(arg),
        }
    }

    Ok(cli_args)
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let cli_args = parse_args(std::env::args().skip(1))?;
    init_logger(cli_args.log_level);

    if cli_args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let [first, second] = cli_args.functions.as_slice() else {
        bail!(
            "Expected two functions, got {}\n\n{}",
            cli_args.functions.len(),
            USAGE
        );
    };

    let settings = &cli_args.settings;
    let solution = solve(first, second, settings, cli_args.policy)?;

    if let Some((x, restriction)) = solution.restriction {
        info!("restricted at x = {}", x);
        eprintln!("{}", restriction.describe());
    }

    if solution.intersections.is_empty() {
        println!("No intersections found in [{}, {}]", settings.start, settings.end);
    } else {
        print!("{}", report::render(&solution.intersections, settings.precision));
    }

    Ok(())
}
