use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use schematic_editor::{parse_schema, route, write_schema, DeviceKind, Orientation, Schema};
use std::hint::black_box;

fn bench_xml_parsing(c: &mut Criterion) {
    let xml_content = include_str!("../tests/fixtures/simple_schema.xml");

    c.bench_function("xml_parse_simple_schema", |b| {
        b.iter(|| {
            let schema = parse_schema(black_box(xml_content)).expect("XML parse failed");
            black_box(schema.conductor_count())
        })
    });
}

fn bench_routing(c: &mut Criterion) {
    let ends = [
        (Vec2::new(0.0, 0.0), Vec2::new(100.0, 50.0)),
        (Vec2::new(0.0, 50.0), Vec2::new(100.0, 0.0)),
        (Vec2::new(0.0, 0.0), Vec2::new(0.0, 80.0)),
    ];

    c.bench_function("route_all_orientation_pairs", |b| {
        b.iter(|| {
            let mut points = 0usize;
            for (a, z) in ends {
                for oa in Orientation::ALL {
                    for oz in Orientation::ALL {
                        points += route(black_box(a), oa, black_box(z), oz).len();
                    }
                }
            }
            black_box(points)
        })
    });
}

/// Raster aus Schützen, jede untere Klemme mit der oberen des rechten Nachbarn verbunden.
fn build_wired_grid(columns: usize, rows: usize) -> Schema {
    let mut schema = Schema::default();
    for row in 0..rows {
        for column in 0..columns {
            schema.add_device(
                DeviceKind::Contactor,
                Vec2::new(column as f32 * 40.0, row as f32 * 100.0),
            );
        }
    }
    let terminals: Vec<_> = schema
        .devices()
        .map(|d| d.terminals().to_vec())
        .collect();
    for pair in terminals.windows(2) {
        let _ = schema.connect(pair[0][1], pair[1][0]);
    }
    schema
}

fn bench_connection_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("connection_graph");

    for &columns in &[10usize, 50usize] {
        let schema = build_wired_grid(columns, 10);

        group.bench_with_input(
            BenchmarkId::new("move_all_devices", columns * 10),
            &schema,
            |b, schema| {
                b.iter_batched(
                    || schema.clone(),
                    |mut schema| {
                        let devices: Vec<_> = schema.devices().map(|d| d.id).collect();
                        for device in devices {
                            schema.translate_device(device, Vec2::new(1.5, -0.5));
                        }
                        black_box(schema.conductor_count())
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("pick_batch", columns * 10),
            &schema,
            |b, schema| {
                b.iter(|| {
                    let mut hits = 0usize;
                    for i in 0..1024 {
                        let point = Vec2::new((i % 400) as f32 + 0.3, ((i * 7) % 1000) as f32);
                        if schema.pick(black_box(point)).terminal().is_some() {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("write_schema", columns * 10),
            &schema,
            |b, schema| {
                b.iter(|| {
                    let xml = write_schema(black_box(schema)).expect("XML write failed");
                    black_box(xml.len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_xml_parsing,
    bench_routing,
    bench_connection_graph
);
criterion_main!(benches);
