//! Property-based tests for the QA engine.
//!
//! These use proptest to generate random field data and verify that the
//! pipeline maintains its invariants under all conditions:
//!
//! 1. **No panics**: the engine never crashes on in-range input
//! 2. **Determinism**: the same input always produces the same output
//! 3. **Partition**: every reading gets exactly one conformance class
//! 4. **Consistency**: cumulative volumes are exact running sums

use proptest::prelude::*;

use rasante::{
    Calidad, Clasificacion, Evaluator, Measurement, Project, ProjectData, Reading,
    TheoreticalStation, classify,
};

fn small_project() -> Project {
    Project {
        nombre: "prop".to_string(),
        km_inicial: 0.0,
        km_final: 400.0,
        intervalo: 20.0,
        espesor: 0.25,
        tolerancia_sct: 0.005,
        divisiones_izquierdas: vec![-3.75],
        divisiones_derechas: vec![0.0, 3.75],
    }
}

/// Rod readings within the sane instrument range.
fn lectura() -> impl Strategy<Value = f64> {
    0.1f64..9.5
}

/// A full station visit: benchmark config plus three captured readings.
fn station_visit(km: f64) -> impl Strategy<Value = (Measurement, Vec<Reading>)> {
    (lectura(), lectura(), lectura(), 1880.0f64..1890.0, 2.0f64..4.0).prop_map(
        move |(l1, l2, l3, bn_altura, bn_lectura)| {
            let measurement = Measurement {
                estacion_km: km,
                bn_altura,
                bn_lectura,
            };
            let readings = vec![
                Reading {
                    estacion_km: km,
                    division_transversal: -3.75,
                    lectura_mira: Some(l1),
                },
                Reading {
                    estacion_km: km,
                    division_transversal: 0.0,
                    lectura_mira: Some(l2),
                },
                Reading {
                    estacion_km: km,
                    division_transversal: 3.75,
                    lectura_mira: Some(l3),
                },
            ];
            (measurement, readings)
        },
    )
}

fn project_data() -> impl Strategy<Value = ProjectData> {
    let visits = (1usize..=10).prop_flat_map(|n| {
        let kms: Vec<f64> = (0..n).map(|i| i as f64 * 20.0).collect();
        kms.into_iter().map(station_visit).collect::<Vec<_>>()
    });
    (visits, -0.03f64..0.03).prop_map(|(visits, pendiente)| {
        let stations = visits
            .iter()
            .map(|(m, _)| TheoreticalStation {
                km: m.estacion_km,
                base_cl: 1883.180,
                pendiente_derecha: pendiente,
                pendiente_izquierda: None,
            })
            .collect();
        let (measurements, readings): (Vec<Measurement>, Vec<Vec<Reading>>) =
            visits.into_iter().unzip();
        ProjectData {
            project: small_project(),
            stations,
            measurements,
            readings: readings.into_iter().flatten().collect(),
        }
    })
}

proptest! {
    /// Classification always lands in exactly one class, consistent with
    /// the sign and magnitude of the difference.
    #[test]
    fn classification_partitions_the_real_line(
        real in 1870.0f64..1890.0,
        proyecto in 1870.0f64..1890.0,
        tolerancia in 0.001f64..0.05,
    ) {
        let c = classify(real, proyecto, tolerancia);
        let diferencia = real - proyecto;
        prop_assert_eq!(c.diferencia, diferencia);

        match c.clasificacion {
            Clasificacion::Cumple => {
                prop_assert!(diferencia.abs() <= tolerancia);
                prop_assert!(c.cumple_tolerancia);
            }
            Clasificacion::Corte => {
                prop_assert!(diferencia > tolerancia);
                prop_assert!(!c.cumple_tolerancia);
            }
            Clasificacion::Terraplen => {
                prop_assert!(diferencia < -tolerancia);
                prop_assert!(!c.cumple_tolerancia);
            }
        }
    }

    /// Quality grades are monotone in |diferencia|.
    #[test]
    fn quality_is_monotone_in_magnitude(
        a in -0.1f64..0.1,
        b in -0.1f64..0.1,
        tolerancia in 0.001f64..0.05,
    ) {
        let ca = classify(a, 0.0, tolerancia);
        let cb = classify(b, 0.0, tolerancia);
        if a.abs() <= b.abs() {
            prop_assert!(ca.calidad <= cb.calidad);
        }
    }

    /// An in-tolerance reading is never graded worse than BUENA, and an
    /// out-of-tolerance reading never better than REGULAR.
    #[test]
    fn quality_and_conformance_axes_agree_at_the_boundary(
        diferencia in -0.1f64..0.1,
        tolerancia in 0.001f64..0.05,
    ) {
        let c = classify(diferencia, 0.0, tolerancia);
        if c.cumple_tolerancia {
            prop_assert!(c.calidad <= Calidad::Buena);
        } else {
            prop_assert!(c.calidad >= Calidad::Regular);
        }
    }

    /// The full pipeline never panics and is deterministic on valid
    /// generated field data.
    #[test]
    fn pipeline_is_total_and_deterministic(data in project_data()) {
        let evaluator = Evaluator::new();
        let first = evaluator.evaluate(&data);
        let second = evaluator.evaluate(&data);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "evaluation was not deterministic"),
        }
    }

    /// Cumulative volumes are exact running sums in ascending km order.
    #[test]
    fn cumulative_volumes_are_prefix_sums(data in project_data()) {
        let evaluation = Evaluator::new().evaluate(&data).unwrap();
        let rows = &evaluation.stations;
        let mut previous_km = f64::NEG_INFINITY;
        let mut running = 0.0;
        for row in rows {
            prop_assert!(row.estacion_km > previous_km);
            previous_km = row.estacion_km;
            running += row.volumen_parcial_real;
            prop_assert!((row.volumen_acumulado_real - running).abs() < 1e-9);
        }
        if let Some(last) = rows.last() {
            let total: f64 = rows.iter().map(|r| r.volumen_parcial_real).sum();
            prop_assert!((last.volumen_acumulado_real - total).abs() < 1e-9);
        }
    }

    /// Every enriched reading satisfies the elevation identities exactly.
    #[test]
    fn elevation_identities_hold(data in project_data()) {
        let evaluation = Evaluator::new().evaluate(&data).unwrap();
        for r in &evaluation.readings {
            prop_assert_eq!(r.elv_base_real, r.altura_aparato - r.lectura_mira);
            prop_assert_eq!(r.diferencia, r.elv_base_real - r.elv_base_proyecto);
            prop_assert_eq!(
                r.elv_concreto_proyecto,
                r.elv_base_proyecto + data.project.espesor
            );
        }
    }
}
