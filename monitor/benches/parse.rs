use criterion::{black_box, criterion_group, criterion_main, Criterion};
use monitor::parse;
use monitor::state::State;

fn benchmark(c: &mut Criterion) {
    let lines: Vec<_> = include_str!("./parse.txt").lines().collect();

    c.bench_function("parse_report", |b| {
        b.iter(|| {
            for &line in &lines {
                let _ = black_box(parse::parse_report(black_box(line)));
            }
        })
    });

    c.bench_function("handle_line full history", |b| {
        // fill the chart first, so samples are scrolling off
        let mut state = State::default();
        while state.chart().coords.len() < monitor::config::HISTORY {
            for &line in &lines {
                parse::handle_line(&mut state, line);
            }
        }

        b.iter(|| {
            for &line in &lines {
                black_box(parse::handle_line(&mut state, line));
            }
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
