use csv::Reader;
use risk_core::config::engine_config::EngineConfig;
use risk_core::convert::denominator::convert;
use risk_core::math::log_regression::{band_series, fit, valuation};
use risk_core::risk::band_aggregator::aggregate;
use risk_core::risk::risk_score::risk_series;
use risk_core::series::normalizer::normalize;
use risk_core::series::price_point::{RawDate, RawTick, RawValue};
use risk_core::{MetricException, PriceSeries};
use serde_json::Value;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let mut inputs: Vec<PathBuf> = Vec::new();
    let mut denominator_path: Option<PathBuf> = None;
    let mut overrides: HashMap<String, Value> = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--denominator" => {
                denominator_path = Some(PathBuf::from(
                    args.next().ok_or("--denominator needs a path")?,
                ));
            }
            "--band-width" => {
                let w: f64 = args.next().ok_or("--band-width needs a value")?.parse()?;
                overrides.insert("band_width".to_string(), Value::from(w));
            }
            _ => inputs.push(PathBuf::from(arg)),
        }
    }
    if inputs.is_empty() {
        eprintln!("usage: risk_cli <price-file-or-dir>... [--denominator FILE] [--band-width W]");
        std::process::exit(2);
    }

    let config = EngineConfig::new(Some(overrides))?;

    let denominator = match &denominator_path {
        Some(path) => Some(load_series(path)?),
        None => None,
    };

    for input in inputs {
        if input.is_dir() {
            for entry in std::fs::read_dir(&input)? {
                let path = entry?.path();
                if matches!(
                    path.extension().and_then(|s| s.to_str()),
                    Some("csv") | Some("json")
                ) {
                    process_file(&path, &config, denominator.as_ref())?;
                }
            }
        } else {
            process_file(&input, &config, denominator.as_ref())?;
        }
    }

    Ok(())
}

fn process_file(
    path: &Path,
    config: &EngineConfig,
    denominator: Option<&PriceSeries>,
) -> Result<(), Box<dyn Error>> {
    println!("Processing file: {:?}", path);
    let series = load_series(path)?;
    report(&series, config)?;

    if let Some(denom) = denominator {
        let converted = convert(&series, denom);
        if converted.is_empty() {
            println!("  denominated: no overlapping dates");
        } else {
            println!("  denominated series:");
            report(&converted, config)?;
        }
    }
    Ok(())
}

fn report(series: &PriceSeries, config: &EngineConfig) -> Result<(), Box<dyn Error>> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => {
            println!("  no usable data");
            return Ok(());
        }
    };
    println!(
        "  {} points, {} .. {}, latest price {}",
        series.len(),
        first.time,
        last.time,
        last.value
    );

    let risk = risk_series(series, &config.risk)?;
    match risk.last() {
        Some(latest) => {
            println!("  latest risk: {:.4}", latest.risk);
            println!("  time in band (width {}):", config.band_width);
            for bucket in aggregate(&risk, config.band_width)? {
                println!(
                    "    {:.2} - {:.2}  {:5} days  {:6.2}%",
                    bucket.range_start, bucket.range_end, bucket.day_count, bucket.percentage
                );
            }
        }
        None => println!("  not enough data for risk scoring"),
    }

    if let Some(coeffs) = fit(series)? {
        println!(
            "  log regression: slope {:.4}, intercept {:.4}",
            coeffs.slope, coeffs.intercept
        );
        if let Some(mid) = config.regression.band("mid") {
            let band = band_series(series, coeffs, &config.regression, mid);
            match valuation(series, &band) {
                Some(v) => println!("  {}: {:.2}%", v.kind, v.percent.abs()),
                None => println!("  fair-value band has no point at the latest date"),
            }
        }
    } else {
        println!("  not enough data for regression");
    }
    Ok(())
}

fn load_series(path: &Path) -> Result<PriceSeries, Box<dyn Error>> {
    let ticks = match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => load_csv(path)?,
        Some("json") => serde_json::from_reader(File::open(path)?)?,
        _ => {
            return Err(Box::new(MetricException::new(
                format!("unsupported file type: {:?}", path),
                risk_core::ErrCode::SrcDataFormatError,
            )))
        }
    };
    Ok(normalize(ticks))
}

fn load_csv(path: &Path) -> Result<Vec<RawTick>, Box<dyn Error>> {
    let mut rdr = Reader::from_reader(File::open(path)?);
    let mut ticks = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // rows with missing columns are dropped like any other bad entry
        if let (Some(date), Some(close)) = (record.get(0), record.get(1)) {
            ticks.push(RawTick {
                date: RawDate::Text(date.to_string()),
                close: RawValue::Text(close.to_string()),
            });
        }
    }
    Ok(ticks)
}
