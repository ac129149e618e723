#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use mission_control_discovery::{
    ContainerRecord, DiscoveryFilter, FilterConfig, PortBinding, Transport,
};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzContainer {
    names: Vec<String>,
    ports: Vec<FuzzPort>,
}

#[derive(Arbitrary, Debug)]
struct FuzzPort {
    transport: u8,
    public_port: Option<u16>,
    private_port: Option<u16>,
}

fn to_record(index: usize, input: FuzzContainer) -> ContainerRecord {
    ContainerRecord {
        id: index.to_string(),
        names: input.names,
        ports: input
            .ports
            .into_iter()
            .take(16)
            .map(|p| PortBinding {
                transport: match p.transport % 4 {
                    0 => Transport::Tcp,
                    1 => Transport::Udp,
                    2 => Transport::Sctp,
                    _ => Transport::Unknown,
                },
                public_port: p.public_port,
                private_port: p.private_port,
            })
            .collect(),
    }
}

fuzz_target!(|input: Vec<FuzzContainer>| {
    let config = FilterConfig::default();
    let filter = DiscoveryFilter::new(&config);
    let records: Vec<ContainerRecord> = input
        .into_iter()
        .take(64)
        .enumerate()
        .map(|(i, c)| to_record(i, c))
        .collect();

    let entries = filter.select(&records);

    assert!(entries.len() <= records.len());
    for entry in &entries {
        assert_ne!(entry.docker_public_port, config.self_port);
    }
});
