use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use invoice_renamer::invoice::{extract_fields, first_two_words, target_base_name};
use invoice_renamer::rename::{RenameOptions, rename_all};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
}

/// CFDI with `concepts` line items, to scale document size.
fn synthetic_invoice(concepts: usize) -> String {
    let mut xml = String::from(
        r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Total="11600.00">
  <cfdi:Emisor Nombre="MI EMPRESA SA DE CV"/>
  <cfdi:Receptor Nombre="COMERCIALIZADORA DEL NORTE SA DE CV"/>
  <cfdi:Conceptos>
"#,
    );
    for index in 0..concepts {
        xml.push_str(&format!(
            "    <cfdi:Concepto Descripcion=\"Item {index}\" Importe=\"10.00\"/>\n"
        ));
    }
    xml.push_str("  </cfdi:Conceptos>\n</cfdi:Comprobante>\n");
    xml
}

fn bench_extraction(c: &mut Criterion) {
    let fixture_xml = fs::read_to_string(fixture("tests/fixtures/invoices/issued_to_client.xml"))
        .expect("read fixture invoice");

    let mut group = c.benchmark_group("extraction");

    group.bench_function("cfdi40_fixture", |b| {
        b.iter(|| black_box(extract_fields(black_box(&fixture_xml))));
    });

    for concepts in [10usize, 100, 1_000] {
        let xml = synthetic_invoice(concepts);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::new("concepts", concepts), &xml, |b, xml| {
            b.iter(|| black_box(extract_fields(black_box(xml))));
        });
    }

    group.finish();
}

fn bench_naming(c: &mut Criterion) {
    let mut group = c.benchmark_group("naming");

    group.bench_function("first_two_words", |b| {
        b.iter(|| black_box(first_two_words(black_box("COMERCIALIZADORA DEL NORTE SA DE CV"))));
    });
    group.bench_function("target_base_name", |b| {
        b.iter(|| {
            black_box(target_base_name(
                black_box("11600.00"),
                black_box("COMERCIALIZADORA DEL NORTE SA DE CV"),
            ))
        });
    });

    group.finish();
}

fn bench_dry_run_folder(c: &mut Criterion) {
    let mut group = c.benchmark_group("dry_run_folder");
    let options = RenameOptions {
        dry_run: true,
        ..RenameOptions::default()
    };

    for files in [10usize, 100] {
        let dir = tempfile::tempdir().expect("create bench folder");
        let xml = synthetic_invoice(5);
        for index in 0..files {
            fs::write(dir.path().join(format!("{index:04}.xml")), &xml).expect("write invoice");
        }

        group.throughput(Throughput::Elements(files as u64));
        group.bench_with_input(BenchmarkId::new("files", files), &files, |b, _| {
            b.iter(|| black_box(rename_all(dir.path(), "MI EMPRESA SA DE CV", &options)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_naming, bench_dry_run_folder);
criterion_main!(benches);
