use std::fs;
use std::process::{Command, Output};

fn run_dry(folder: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_invoice-renamer"))
        .arg("--no-witness")
        .arg("--dry-run")
        .arg(folder)
        .args(["--name", "ME"])
        .output()
        .expect("run invoice-renamer binary")
}

#[test]
fn dry_run_output_is_deterministic_for_same_folder() {
    let dir = tempfile::tempdir().expect("create temp folder");
    for (name, issuer, total) in [
        ("z.xml", "Globex Corp", "10.00"),
        ("a.xml", "Acme", "10.00"),
        ("m.xml", "Acme", "10.00"),
    ] {
        fs::write(
            dir.path().join(name),
            format!(
                r#"<Comprobante Total="{total}"><Emisor Nombre="{issuer}"/><Receptor Nombre="ME"/></Comprobante>"#
            ),
        )
        .expect("write invoice");
    }

    let first = run_dry(dir.path());
    let second = run_dry(dir.path());

    assert_eq!(first.status.code(), Some(0));
    assert_eq!(second.status.code(), Some(0));
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8(first.stdout).expect("stdout utf8");
    let targets: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("parse JSON line");
            value["target"].as_str().expect("target").to_owned()
        })
        .collect();
    assert_eq!(
        targets,
        vec![
            dir.path().join("$10.00_Acme.xml").display().to_string(),
            dir.path().join("$10.00_Acme_1.xml").display().to_string(),
            dir.path().join("$10.00_Globex Corp.xml").display().to_string(),
        ]
    );
}
