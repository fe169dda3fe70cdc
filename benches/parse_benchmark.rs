use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use libmsh::{
    ChunkTag, Document, Material, NullSink, ParserConfig, Polygon, Record, Segment, Vector2,
    Vector3, Vertex,
};
use std::fs::File;
use std::hint::black_box;
use std::io::{BufReader, Write};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Generate a document with one grid segment of `vertices` vertices
fn generate_document(vertices: usize) -> Document {
    let mut document = Document::new();
    let material = document.add_material(Material::new("grid"));

    let mut segment = Segment::new();
    segment.set_material(material);
    segment.has_uvs = true;

    // Vertices in a grid pattern, 100 per row
    for i in 0..vertices {
        let x = (i % 100) as f32;
        let z = (i / 100) as f32;
        segment.vertices.push(Vertex::new(
            Vector3::new(x, 0.0, z),
            Vector3::new(0.0, 1.0, 0.0),
            Vector2::new(x / 100.0, z / 100.0),
        ));
    }

    // One quad per grid cell
    let rows = vertices / 100;
    for row in 0..rows.saturating_sub(1) {
        for col in 0..99 {
            let i = (row * 100 + col) as u16;
            segment
                .polygons
                .push(Polygon::from(vec![i, i + 1, i + 101, i + 100]));
        }
    }

    document.records.push(Record::Container {
        tag: ChunkTag::HEDR,
        children: vec![Record::Container {
            tag: ChunkTag::MSH2,
            children: vec![
                Record::MaterialList,
                Record::Container {
                    tag: ChunkTag::GEOM,
                    children: vec![Record::Segment(segment)],
                },
            ],
        }],
    });
    document
}

fn quiet() -> ParserConfig {
    ParserConfig::new().with_log_sink(Arc::new(NullSink))
}

fn bench_parse_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bytes");
    let config = quiet();

    for &vertices in &[1000, 10000, 30000] {
        let bytes = generate_document(vertices).to_bytes().unwrap();

        group.bench_with_input(
            BenchmarkId::new("vertices", vertices),
            &bytes,
            |b, bytes| {
                b.iter(|| black_box(Document::from_bytes_with_config(bytes, &config).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_file");
    group.sample_size(20);
    let config = quiet();

    for &vertices in &[10000, 30000] {
        let mut temp_file = NamedTempFile::new().unwrap();
        let bytes = generate_document(vertices).to_bytes().unwrap();
        temp_file.write_all(&bytes).unwrap();
        let path = temp_file.path();

        group.bench_with_input(
            BenchmarkId::new("vertices", vertices),
            &path,
            |b, &path| {
                b.iter(|| {
                    let file = BufReader::new(File::open(path).unwrap());
                    black_box(Document::from_reader_with_config(file, &config).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for &vertices in &[1000, 10000, 30000] {
        let document = generate_document(vertices);

        group.bench_with_input(
            BenchmarkId::new("vertices", vertices),
            &document,
            |b, document| {
                b.iter(|| black_box(document.to_bytes().unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_bytes, bench_parse_file, bench_write);
criterion_main!(benches);
