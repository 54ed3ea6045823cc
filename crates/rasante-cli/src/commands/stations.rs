//! Stations command - per-station volumetric table.

use std::path::PathBuf;

use colored::Colorize;
use rasante::EvaluatorConfig;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let evaluation = super::load_and_evaluate(&file, None, EvaluatorConfig::default())?;

    println!("{}", "Station volumetrics".yellow().bold());
    println!(
        "  {:>10} {:>5} {:>10} {:>10} {:>12} {:>12}",
        "km", "n", "esp.prom", "area", "vol.parcial", "vol.acum"
    );
    for row in &evaluation.stations {
        println!(
            "  {:>10.3} {:>5} {:>10.4} {:>10.2} {:>12.3} {:>12.3}",
            row.estacion_km,
            row.num_lecturas,
            row.espesor_promedio,
            row.area,
            row.volumen_parcial_real,
            row.volumen_acumulado_real
        );
    }

    if verbose && !evaluation.warnings.is_empty() {
        println!();
        for w in &evaluation.warnings {
            println!("  {}", w.message().yellow());
        }
    }

    if let Some(path) = output {
        let mut writer = csv::Writer::from_path(&path)?;
        for row in &evaluation.stations {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!(
            "{} {}",
            "Wrote station rows to".cyan(),
            path.display().to_string().white()
        );
    }

    Ok(())
}
