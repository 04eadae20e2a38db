//! Benchmark for one full collect pass over a mock snapshot.

use criterion::{criterion_group, criterion_main, Criterion};
use prometheus::core::Collector;
use sensor_exporter::exporter::SensorsCollector;
use sensor_exporter::sensors::{Chip, Feature, MockSensors};

fn mock_chips() -> Vec<Chip> {
    (0..8)
        .map(|i| {
            Chip::new(
                format!("chip{i}"),
                "ISA adapter",
                vec![
                    Feature::new("temp1", "Core 0", 45.0),
                    Feature::new("temp2", "Core 1", 47.0),
                    Feature::new("fan1", "fan1", 1200.0),
                    Feature::new("in0", "Vcore", 1.05),
                    Feature::new("power1", "power1", 15.0),
                    Feature::new("curr1", "curr1", 2.4),
                ],
            )
        })
        .collect()
}

fn bench_collect(c: &mut Criterion) {
    let collector = SensorsCollector::new(MockSensors::with_chips(mock_chips())).unwrap();

    c.bench_function("collect_8_chips", |b| b.iter(|| collector.collect()));
}

criterion_group!(benches, bench_collect);
criterion_main!(benches);
