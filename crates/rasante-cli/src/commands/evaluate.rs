//! Evaluate command - run the full pipeline and print the summary.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use rasante::{AnomalySeverity, EstadoInspeccion, EvaluatorConfig};

pub fn run(
    file: PathBuf,
    readings: Option<PathBuf>,
    output: Option<PathBuf>,
    ancho: f64,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} {}",
        "Evaluating".cyan().bold(),
        file.display().to_string().white()
    );

    let config = EvaluatorConfig {
        ancho_pavimento: ancho,
        ..EvaluatorConfig::default()
    };
    let evaluation = super::load_and_evaluate(&file, readings, config)?;
    let summary = &evaluation.summary;

    if verbose {
        println!();
        println!("{}", "Readings:".yellow().bold());
        for r in &evaluation.readings {
            println!(
                "  km {:>9.3}  div {:>7.3}  real {:>9.3}  proyecto {:>9.3}  dif {:>7.4}  {:10} {}",
                r.estacion_km,
                r.division_transversal,
                r.elv_base_real,
                r.elv_base_proyecto,
                r.diferencia,
                r.clasificacion.label(),
                r.calidad.label()
            );
        }
    }

    println!();
    println!("{}", "Summary".yellow().bold());
    println!("  determinaciones      {}", summary.num_determinaciones);
    println!(
        "  promedio / min / max {:.4} / {:.4} / {:.4}",
        summary.dato_promedio, summary.dato_minimo, summary.dato_maximo
    );
    println!("  desviacion estandar  {:.4}", summary.desviacion_estandar);
    println!(
        "  criterio promedio    {}",
        pass_fail(summary.cumple_promedio)
    );
    println!(
        "  criterio desviacion  {}",
        pass_fail(summary.cumple_desviacion)
    );
    println!(
        "  zonas (exceso/ok/insuf) {} / {} / {}",
        summary.zona_relleno_excesivo,
        summary.zona_dentro_tolerancia,
        summary.zona_espesor_insuficiente
    );
    println!(
        "  volumen proyecto     {:.2} m3",
        summary.volumen_proyecto
    );
    println!("  volumen real         {:.2} m3", summary.volumen_real);
    println!(
        "  volumen excedente    {:.2} m3",
        summary.volumen_excedente
    );

    let estado = match summary.estado_inspeccion {
        EstadoInspeccion::Conforme => summary.estado_inspeccion.label().green().bold(),
        EstadoInspeccion::NoConforme => summary.estado_inspeccion.label().red().bold(),
    };
    println!("  estado de inspeccion {}", estado);

    if !evaluation.warnings.is_empty() {
        println!();
        println!("{}", "Warnings".yellow().bold());
        for w in &evaluation.warnings {
            println!("  {}", w.message().yellow());
        }
    }

    let critical = evaluation
        .anomalies
        .iter()
        .filter(|a| a.severity == AnomalySeverity::Critica)
        .count();
    if !evaluation.anomalies.is_empty() {
        println!(
            "Found {} anomalies ({} critical) - run `rasante anomalies` for details",
            evaluation.anomalies.len().to_string().white().bold(),
            critical.to_string().red()
        );
    }

    if let Some(path) = output {
        fs::write(&path, serde_json::to_string_pretty(&evaluation)?)?;
        println!(
            "{} {}",
            "Wrote evaluation to".cyan(),
            path.display().to_string().white()
        );
    }

    Ok(())
}

fn pass_fail(ok: bool) -> colored::ColoredString {
    if ok {
        "CUMPLE".green()
    } else {
        "NO CUMPLE".red()
    }
}
