//! 디스커버리 필터 벤치마크
//!
//! 컨테이너 수에 따른 필터 처리량과 제목 포맷팅 비용을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mission_control_discovery::{
    ContainerRecord, DiscoveryFilter, FilterConfig, PortBinding, TitleFormatter, Transport,
};

fn create_records(count: usize) -> Vec<ContainerRecord> {
    (0..count)
        .map(|i| {
            let name = match i % 4 {
                0 => format!("/lavin-worker-{i}"),
                1 => format!("/svc-{i}-api"),
                2 => format!("/apollo-mission-control-{i}"),
                _ => format!("/Data-PIPELINE-stage-{i}"),
            };
            ContainerRecord::named(format!("{i:012x}"), name)
                .with_port(PortBinding {
                    transport: Transport::Udp,
                    public_port: Some(5000),
                    private_port: Some(5000),
                })
                .with_port(PortBinding::tcp(8503))
                .with_port(PortBinding::tcp(10_000 + (i % 1000) as u16))
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let filter = DiscoveryFilter::new(&FilterConfig::default());
    let mut group = c.benchmark_group("filter_select");

    for count in [10usize, 100, 1000] {
        let records = create_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| filter.select(black_box(records)))
        });
    }

    group.finish();
}

fn bench_title(c: &mut Criterion) {
    let formatter = TitleFormatter::new(["api", "ui", "db"]);
    c.bench_function("title_format", |b| {
        b.iter(|| formatter.format(black_box("customer-API-gateway-admin-ui-db-replica")))
    });
}

criterion_group!(benches, bench_select, bench_title);
criterion_main!(benches);
