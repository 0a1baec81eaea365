use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use thousands::Separable;
use topos::placement::pack;
use topos_cli::config::ToposConfig;
use topos_cli::io::cli::Cli;
use topos_cli::io::export::export;
use topos_cli::io::import::import_instance;
use topos_cli::io::output::ToposOutput;
use topos_cli::io::svg_export::arrangement_to_svg;
use topos_cli::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            ToposConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    info!("[MAIN] Successfully parsed ToposConfig: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let ext_instance = io::read_instance(&args.input_file)?;
    let (polygons, container_width) = import_instance(&ext_instance, args.container_width)?;

    let start = EPOCH.elapsed();
    let arrangement = pack(&polygons, container_width, config.pack)?;
    let run_time = EPOCH.elapsed() - start;
    info!(
        "[MAIN] packed {} items in {}ms, arrangement {:.3} x {:.3}",
        arrangement.placed.len(),
        run_time.as_millis().separate_with_commas(),
        arrangement.width(),
        arrangement.height()
    );

    {
        let output = ToposOutput {
            solution: export(&ext_instance, &arrangement, container_width, *EPOCH),
            instance: ext_instance,
            config,
        };
        let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, Path::new(&solution_path))?;
    }

    {
        let svg_path = args.solution_folder.join(format!("sol_{input_stem}.svg"));
        let svg = arrangement_to_svg(
            &arrangement,
            container_width,
            config.svg_draw_options,
            input_stem,
        );
        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}
