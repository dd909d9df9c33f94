use chartjs_adapter::api::{ChartAdapter, ChartRequest, ChartType};
use chartjs_adapter::render::NullRenderer;
use chartjs_adapter::telemetry;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: chart_config_tool [line|area|column|bar|pie|scatter|bubble] --input <path> [--output <path>] [--width <px>] [--contract]";
const DEFAULT_WIDTH_PX: f64 = 800.0;

#[derive(Debug)]
struct CliArgs {
    chart_type: Option<ChartType>,
    input: PathBuf,
    output: Option<PathBuf>,
    width: f64,
    contract: bool,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let (request, envelope_type) =
        ChartRequest::from_json_compat_str(&raw).map_err(|err| err.to_string())?;
    let chart_type = args
        .chart_type
        .or(envelope_type)
        .ok_or_else(|| format!("missing chart type\n{USAGE}"))?;

    let mut adapter = ChartAdapter::new(NullRenderer::new(args.width));
    adapter
        .render(chart_type, &request)
        .map_err(|err| err.to_string())?;
    let config = adapter
        .renderer()
        .last_config()
        .ok_or_else(|| "renderer did not record a chart".to_owned())?;

    let payload = if args.contract {
        config.to_json_contract_v1_pretty()
    } else {
        config.to_json_pretty()
    }
    .map_err(|err| err.to_string())?;

    match &args.output {
        Some(path) => fs::write(path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut chart_type = None::<ChartType>;
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut width = DEFAULT_WIDTH_PX;
    let mut contract = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--width" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --width".to_owned())?;
                width = value
                    .parse()
                    .map_err(|err| format!("invalid --width `{value}`: {err}"))?;
            }
            "--contract" => contract = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            flag if flag.starts_with("--") => return Err(format!("unknown argument `{flag}`")),
            name if chart_type.is_none() => {
                let parsed = name
                    .parse::<ChartType>()
                    .map_err(|_| format!("unknown chart type `{name}`\n{USAGE}"))?;
                chart_type = Some(parsed);
            }
            other => return Err(format!("unexpected argument `{other}`")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(CliArgs {
        chart_type,
        input,
        output,
        width,
        contract,
    })
}
