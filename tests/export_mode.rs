//! Integration tests for export mode (-o/--output flag)

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const MAPPINGS: &str = r#"[
    {"code": "LandingGearToggle", "area": "Ship", "category": "Flight", "action": "Toggle Landing Gear"},
    {"code": "YawLeftButton", "area": "Ship", "category": "Flight Rotation", "action": "Yaw Left"},
    {"code": "HeadLookToggle", "area": "General", "category": "Head Look", "action": ""},
    {"code": "UIFocus", "area": "", "category": "", "action": "UI Focus"}
]"#;

const BINDS: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<Root PresetName="Custom" MajorVersion="4" MinorVersion="0">
    <KeyboardLayout>en-US</KeyboardLayout>
    <LandingGearToggle>
        <Primary Device="Keyboard" Key="Key_L" />
        <Secondary Device="{NoDevice}" Key="" />
    </LandingGearToggle>
    <YawLeftButton>
        <Primary Device="{NoDevice}" Key="" />
        <Secondary Device="{NoDevice}" Key="" />
    </YawLeftButton>
    <HeadLookToggle>
        <Primary Device="Mouse" Key="Mouse_3" />
        <Secondary Device="{NoDevice}" Key="" />
    </HeadLookToggle>
    <UIFocus>
        <Primary Device="Keyboard" Key="Key_LeftShift" />
        <Secondary Device="{NoDevice}" Key="" />
    </UIFocus>
</Root>"#;

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("mappings.edbv"), MAPPINGS).unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();
        fs::create_dir(dir.path().join("Bindings")).unwrap();
        fs::write(dir.path().join("Bindings").join("Custom.4.0.binds"), BINDS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn binds(&self) -> PathBuf {
        self.path("Bindings").join("Custom.4.0.binds")
    }
}

fn run_edbv(cwd: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_edbv"))
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute edbv");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn export(fx: &Fixture, output: &str, extra: &[&str]) -> (String, String, i32) {
    let binds = fx.binds();
    let out = fx.path(output);
    let config = fx.path("config.toml");
    let mut args = vec![
        "--config",
        config.to_str().unwrap(),
        "--no-update-check",
        "-o",
        out.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    args.push(binds.to_str().unwrap());
    run_edbv(fx.dir.path(), &args)
}

#[test]
fn test_export_csv() {
    let fx = Fixture::new();
    let (stdout, stderr, code) = export(&fx, "out.csv", &[]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout.trim(),
        format!("Exported 3 rows to {}", fx.path("out.csv").display())
    );

    let csv = fs::read_to_string(fx.path("out.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Area,Category,Action,Primary,Secondary");
    assert_eq!(
        lines[1],
        "Ship,Flight,Toggle Landing Gear,Keyboard - Key_L,{NoDevice} - "
    );
    assert_eq!(
        lines[3],
        "General,Head Look,HeadLookToggle,Mouse - Mouse_3,{NoDevice} - "
    );
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_export_markdown_with_filter_and_unbound() {
    let fx = Fixture::new();
    let (_, stderr, code) = export(&fx, "out.md", &["-f", "FLIGHT", "-u"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let md = fs::read_to_string(fx.path("out.md")).unwrap();
    assert!(md.starts_with("# Bindings\n\n| Area | Category | Action | Primary | Secondary |"));
    assert!(md.contains("| Ship | Flight | Toggle Landing Gear |"));
    assert!(md.contains("| Ship | Flight Rotation | **Yaw Left** |"));
    assert!(!md.contains("Head Look"));
}

#[test]
fn test_export_explicit_mappings() {
    let fx = Fixture::new();
    fs::write(
        fx.path("other.json"),
        r#"[{"code": "UIFocus", "area": "UI", "category": "Focus", "action": "UI Focus"}]"#,
    )
    .unwrap();
    let mappings = fx.path("other.json");
    let (stdout, _, code) = export(&fx, "out.csv", &["-m", mappings.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Exported 1 rows"));
}

#[test]
fn test_broken_binding_file_fails() {
    let fx = Fixture::new();
    fs::write(fx.binds(), "<Root><LandingGearToggle></Root>").unwrap();
    let (_, stderr, code) = export(&fx, "out.csv", &[]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: Failed to load"), "stderr: {}", stderr);
    assert!(!fx.path("out.csv").exists());
}

#[test]
fn test_unknown_option_fails() {
    let fx = Fixture::new();
    let (_, stderr, code) = run_edbv(fx.dir.path(), &["--bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --bogus"));
    assert!(stderr.contains("Usage: edbv"));
}

#[test]
fn test_help_and_version() {
    let fx = Fixture::new();
    let (stdout, _, code) = run_edbv(fx.dir.path(), &["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("--output"));

    let (stdout, _, code) = run_edbv(fx.dir.path(), &["-V"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), format!("edbv {}", env!("CARGO_PKG_VERSION")));
}
