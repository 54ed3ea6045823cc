//! Anomalies command - advisory field-quality findings.

use std::path::PathBuf;

use colored::Colorize;
use rasante::{AnomalySeverity, EvaluatorConfig};

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let evaluation = super::load_and_evaluate(&file, None, EvaluatorConfig::default())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation.anomalies)?);
        return Ok(());
    }

    if evaluation.anomalies.is_empty() {
        println!("{}", "No anomalies detected".green());
        return Ok(());
    }

    println!(
        "{} {}",
        evaluation.anomalies.len().to_string().white().bold(),
        "anomalies detected".yellow().bold()
    );
    for a in &evaluation.anomalies {
        let severity = match a.severity {
            AnomalySeverity::Critica => a.severity.label().red().bold(),
            AnomalySeverity::Alerta => a.severity.label().yellow(),
            AnomalySeverity::Info => a.severity.label().blue(),
        };
        println!(
            "  [{severity}] {} km {:.3} div {:+.3}: {}",
            a.kind.label(),
            a.estacion_km,
            a.division_transversal,
            a.descripcion
        );
        if verbose {
            println!("      lectura_mira = {:.3}", a.lectura_mira);
        }
    }

    Ok(())
}
