use criterion::{black_box, criterion_group, criterion_main, Criterion};

use crach_mocap_core::{interpolate, sample_capture, Config, Session};

fn bench_interpolate(c: &mut Criterion) {
    let capture = sample_capture();
    c.bench_function("interpolate_sample_mid_frame", |b| {
        b.iter(|| {
            let frame = interpolate(black_box(&capture), black_box(57), black_box(0.5));
            black_box(frame.joints.len())
        })
    });
}

fn bench_session_tick(c: &mut Criterion) {
    let mut session = match Session::new(Config::default()) {
        Ok(s) => s,
        Err(e) => panic!("default session: {e}"),
    };
    session.play();
    session.tick(0.0);
    c.bench_function("session_tick_and_pose", |b| {
        b.iter(|| {
            session.tick(black_box(1.0 / 60.0));
            black_box(session.default_pose().bones.len())
        })
    });
}

criterion_group!(benches, bench_interpolate, bench_session_tick);
criterion_main!(benches);
