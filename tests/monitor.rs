//! 在临时目录中对合成的 CFOUR 输出运行完整的 monitor 流程

use c4mon::cli::monitor::MonitorArgs;
use c4mon::commands::monitor::{execute, harvest, render_report};
use c4mon::export::{energies_to_csv, write_opt_trajectory, write_vib_trajectory, WriteOutcome};
use c4mon::models::RunKind;
use c4mon::parsers::quadrature::QUADRATURE_FILE;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn header(level: &str, geo_method: &str, vibration: &str) -> String {
    format!(
        r#"
  --------------------------------------------------------------------
        External           Internal           Value            Units
  --------------------------------------------------------------------
       ANHARMONIC         IANHAR          OFF
       BASIS              IBASIS          PVDZ
       CALCLEVEL          ICLLVL          {level}
       CHARGE             ICHRGE          0
       DROPMO             IDRPMO          NONE
       FROZEN_CORE        IFROCO          ON
       GEO_CONV           ICONTL          7
       GEO_METHOD         INR             {geo_method}
       MULTIPLICTY        IMULTP          1
       REFERENCE          IREFNC          RHF
       VIBRATION          IVIB            {vibration}
  --------------------------------------------------------------------
   Job Title : water
"#
    )
}

fn geometry_block(r: f64) -> String {
    format!(
        r#" Z-matrix   Atomic            Coordinates (in bohr)
  Symbol    Number           X              Y              Z
 ----------------------------------------------------------------
     O         8         0.00000000     0.00000000    -0.12947689
     H         1         0.00000000    -{r:.8}     1.02744642
     H         1         0.00000000     {r:.8}     1.02744642
 ----------------------------------------------------------------
   Interatomic distance matrix (Angstroms)
"#
    )
}

fn iteration(scf: f64, ccsd: f64, grad: &str, r_old: f64, r_new: f64) -> String {
    format!(
        r#"     SCF has converged.
  E(SCF)=       {scf:.10}              0.1000D-07
  Total CCSD energy        :   {ccsd:.10}
  Molecular gradient norm  {grad}
   Parameter     dV/dR           Step          Rold            Rnew
   ----------------------------------------------------------------
     R       -0.0100000000   -0.0100000000    {r_old:.10}    {r_new:.10}
     A        0.0010000000    0.0200000000  104.0000000000  104.0200000000
   ----------------------------------------------------------------
   Minimum force:  0.001000000 / RMS force:  0.008500000
{geom}"#,
        geom = geometry_block(1.49 - (1.82 - r_old) * 0.1)
    )
}

fn optimisation_log() -> String {
    let mut log = header("CCSD", "NR", "NO");
    log.push_str(&iteration(-76.02, -76.23, "0.120000E-01", 1.82, 1.81));
    log.push_str(&iteration(-76.021, -76.2301, "0.210000E-02", 1.81, 1.805));
    log.push_str(&iteration(-76.0211, -76.23011, "0.300000E-04", 1.805, 1.8049));
    log
}

fn frequency_log() -> String {
    let mut log = header("CCSD", "SINGLE_POINT", "EXACT");
    log.push_str(
        r#"     SCF has converged.
  E(SCF)=       -76.0211000000              0.1000D-07
  Total CCSD energy        :   -76.2301100000
"#,
    );
    log.push_str(&geometry_block(1.49418533));
    log.push_str("  CPHF coefficients computed\n  CPHF coefficients computed\n");
    log.push_str("  Zero-point energy:    0.0212345 (au)  =    55.7512 kJ/mol\n");
    log.push_str("  xprops finished\n");
    log
}

const QUADRATURE: &str = "    1648.1234
  0.0000000000   0.0000000000  -0.0690000000
  0.0000000000   0.4290000000   0.5480000000
  0.0000000000  -0.4290000000   0.5480000000
    3832.5000
  0.0000000000   0.0000000000   0.0490000000
  0.0000000000   0.5800000000  -0.3900000000
  0.0000000000  -0.5800000000  -0.3900000000
";

fn write_log(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("OUT");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_optimisation_run_is_harvested() {
    let dir = TempDir::new().unwrap();
    let data = harvest(&optimisation_log(), dir.path()).unwrap();

    assert_eq!(data.kind, RunKind::Optimization);
    assert_eq!(data.energies.len(), 3);
    assert_eq!(data.energies[1].values(), &[Some(-76.021), Some(-76.2301)]);
    assert_eq!(data.gradients.len(), 3);
    assert_eq!(data.steps.len(), 4);
    assert_eq!(data.geometries.len(), 3);
    assert!(data.vibrations.is_empty());
    assert!(!data.finished);

    let report = render_report(&data, false);
    assert!(report.contains("E(CCSD)/a.u."));
    assert!(report.contains("Change of geometry during the optimisation:"));
    assert!(report.contains("Calculation is not finished yet..."));
}

#[test]
fn test_rescanning_a_growing_log() {
    let dir = TempDir::new().unwrap();
    let full = optimisation_log();
    let cut = full.rfind("     SCF has converged.").unwrap();

    let partial = harvest(&full[..cut], dir.path()).unwrap();
    let complete = harvest(&full, dir.path()).unwrap();
    let again = harvest(&full, dir.path()).unwrap();

    assert_eq!(complete.energies, again.energies);
    assert_eq!(complete.geometries, again.geometries);
    assert_eq!(partial.energies[..], complete.energies[..partial.energies.len()]);
    assert_eq!(
        partial.geometries[..],
        complete.geometries[..partial.geometries.len()]
    );
}

#[test]
fn test_unfinished_last_line_is_ignored() {
    let dir = TempDir::new().unwrap();
    let complete = harvest(&optimisation_log(), dir.path()).unwrap();

    let gradient_cut = format!("{}  Molecular gradient norm", optimisation_log());
    let data = harvest(&gradient_cut, dir.path()).unwrap();
    assert_eq!(data.gradients, complete.gradients);

    let energy_cut = format!(
        "{}     SCF has converged.\n  E(SCF)=       -76.02",
        optimisation_log()
    );
    let data = harvest(&energy_cut, dir.path()).unwrap();
    assert_eq!(data.energies, complete.energies);
    assert_eq!(data.energies.len(), 3);
}

#[test]
fn test_opt_trajectory_written_beside_log() {
    let dir = TempDir::new().unwrap();
    let data = harvest(&optimisation_log(), dir.path()).unwrap();

    let outcome = write_opt_trajectory(dir.path(), &data.energies, &data.geometries).unwrap();
    let path = dir.path().join("opt.xyz");
    assert_eq!(
        outcome,
        WriteOutcome::Written {
            path: path.clone(),
            frames: 3
        }
    );

    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3 * 5);
    assert_eq!(lines[0], "3");
    assert_eq!(lines[1], "E = -76.230000000 Hartree");
    assert!(lines[2].starts_with("O "));
    assert_eq!(lines[11], "E = -76.230110000 Hartree");
}

#[test]
fn test_energy_csv_export() {
    let dir = TempDir::new().unwrap();
    let data = harvest(&optimisation_log(), dir.path()).unwrap();
    let csv_path = dir.path().join("energies.csv");

    energies_to_csv(&data.energies, &data.gradients, &csv_path).unwrap();

    let text = fs::read_to_string(csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("iteration,scf,level2,level3,gradient_norm"));
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_frequency_run_without_quadrature() {
    let dir = TempDir::new().unwrap();
    let data = harvest(&frequency_log(), dir.path()).unwrap();

    assert_eq!(data.kind, RunKind::Frequency);
    assert!(data.vibrations.is_empty());
    assert_eq!(data.displacements, 2);
    assert!(data.finished);

    let outcome = write_vib_trajectory(dir.path(), &data.vibrations).unwrap();
    assert_eq!(outcome, WriteOutcome::NothingWritten);
    assert!(!dir.path().join("vib.xyz").exists());

    let report = render_report(&data, false);
    assert!(report.contains("Energies:"));
    assert!(report.contains("2 displacements were done."));
    assert!(!report.contains("Vibrations:"));
}

#[test]
fn test_frequency_run_with_quadrature() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(QUADRATURE_FILE), QUADRATURE).unwrap();
    let data = harvest(&frequency_log(), dir.path()).unwrap();

    assert_eq!(data.vibrations.len(), 2);
    assert_eq!(data.vibrations[&1].atoms.len(), 3);

    let report = render_report(&data, false);
    assert!(report.contains("Vibrations:"));
    assert!(report.contains("Zero-point Energy: 55.75 kJ/mol"));
    assert!(report.contains("Calculation terminated successfully."));

    let outcome = write_vib_trajectory(dir.path(), &data.vibrations).unwrap();
    assert!(matches!(outcome, WriteOutcome::Written { frames: 2, .. }));
    let text = fs::read_to_string(dir.path().join("vib.xyz")).unwrap();
    assert!(text.contains("v1 = 1648.12 cm**-1"));
}

#[test]
fn test_execute_writes_requested_outputs() {
    let dir = TempDir::new().unwrap();
    let log = write_log(dir.path(), &optimisation_log());
    let csv_path = dir.path().join("e.csv");

    execute(MonitorArgs {
        output: log,
        short: true,
        opt: true,
        vib: false,
        csv: Some(csv_path.clone()),
        plot: None,
    })
    .unwrap();

    assert!(dir.path().join("opt.xyz").exists());
    assert!(csv_path.exists());
    assert!(!dir.path().join("vib.xyz").exists());
}

#[test]
fn test_execute_missing_log() {
    let dir = TempDir::new().unwrap();
    let err = execute(MonitorArgs {
        output: dir.path().join("OUT"),
        short: false,
        opt: false,
        vib: false,
        csv: None,
        plot: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("No output file to process"));
}
