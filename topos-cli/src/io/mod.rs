use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use jiff::Timestamp;
use log::{LevelFilter, info};
use serde::Serialize;
use svg::Document;

use crate::EPOCH;
use crate::io::ext_repr::{ExtInstance, ExtItem, ExtSPolygon};

pub mod cli;
pub mod export;
pub mod ext_repr;
pub mod import;
pub mod output;
pub mod svg_export;

/// Reads an instance, JSON or CSV depending on the extension of `path`.
pub fn read_instance(path: &Path) -> Result<ExtInstance> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => read_json_instance(path),
        Some("csv") => read_csv_instance(path),
        _ => bail!("unsupported instance format: {}", path.display()),
    }
}

pub fn read_json_instance(path: &Path) -> Result<ExtInstance> {
    let file = File::open(path).context("could not open instance file")?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("not a valid instance file: {}", path.display()))
}

/// Reads an instance from a CSV file with one polygon per row, its vertices in the first field
/// as a quoted list of coordinate pairs: `"[[0, 0], [1, 0], [1, 1]]"`. Further fields are ignored.
/// The container width is not part of the format.
pub fn read_csv_instance(path: &Path) -> Result<ExtInstance> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("could not open instance file")?;

    let mut items = vec![];
    for record in reader.records() {
        let record = record.with_context(|| format!("malformed CSV in {}", path.display()))?;
        let line = record.position().map_or(0, |p| p.line());
        let field = record.get(0).unwrap_or_default();
        if field.trim().is_empty() {
            continue;
        }
        let shape = parse_polygon_field(field)
            .with_context(|| format!("invalid polygon on line {} of {}", line, path.display()))?;
        items.push(ExtItem {
            id: items.len() as u64,
            shape,
        });
    }
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string();

    Ok(ExtInstance {
        name,
        container_width: None,
        items,
    })
}

fn parse_polygon_field(field: &str) -> Result<ExtSPolygon> {
    //tuples are accepted in place of lists
    let normalized = field.replace('(', "[").replace(')', "]");
    let points: Vec<(f64, f64)> = serde_json::from_str(&normalized)?;
    Ok(ExtSPolygon(points))
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)?;
    info!(
        "[IO] solution JSON written to file://{}",
        fs::canonicalize(path)?.to_str().unwrap_or_default()
    );
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)?;
    info!(
        "[IO] solution SVG written to file://{}",
        fs::canonicalize(path)?.to_str().unwrap_or_default()
    );
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("[EPOCH]: {}", Timestamp::now());
    Ok(())
}
