use criterion::{black_box, criterion_group, criterion_main, Criterion};
use energy_extract::{
    host::integrate_host,
    process::{integrate_process, CmdlineFilter},
};

const RECORDS: usize = 10_000;
const CONSUMERS: usize = 32;

fn scaphandre_stream() -> String {
    let mut out = String::new();
    for i in 0..RECORDS {
        let consumers: Vec<String> = (0..CONSUMERS)
            .map(|pid| {
                let cmdline = if pid % 4 == 0 {
                    "chia plots create -k 32"
                } else {
                    "/usr/lib/systemd/systemd-journald"
                };
                format!(
                    r#"{{"exe":"","cmdline":"{}","pid":{},"consumption":{}.0,"timestamp":{}}}"#,
                    cmdline,
                    pid,
                    1000 + pid,
                    i * 2
                )
            })
            .collect();
        out.push_str(&format!(
            r#"{{"host":{{"consumption":41000000.0,"timestamp":{}.0}},"consumers":[{}]}}"#,
            i * 2,
            consumers.join(",")
        ));
        out.push('\n');
    }
    out
}

pub fn b(c: &mut Criterion) {
    let stream = scaphandre_stream();

    c.bench_function("host_integrate", |b| {
        b.iter(|| integrate_host(black_box(stream.as_bytes())).unwrap());
    });

    c.bench_function("process_filter", |b| {
        let filter = CmdlineFilter::new("chia");
        b.iter(|| integrate_process(black_box(stream.as_bytes()), &filter, 2.0).unwrap());
    });
}

criterion_group!(benches, b);
criterion_main!(benches);
