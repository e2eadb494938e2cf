use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vtty_term::Terminal;

fn scrolling_text() -> Vec<u8> {
    let mut bytes = Vec::new();
    for i in 0..200 {
        bytes.extend_from_slice(
            format!("line {i} with some ordinary text\r\n").as_bytes(),
        );
    }
    bytes
}

fn colored_text() -> Vec<u8> {
    let mut bytes = Vec::new();
    for i in 0..200 {
        bytes.extend_from_slice(
            format!(
                "\x1b[3{};4{}mline {i}\x1b[0m\x1b[38;2;10;20;30m!\r\n",
                i % 8,
                (i + 1) % 8
            )
            .as_bytes(),
        );
    }
    bytes
}

fn bench_advance(c: &mut Criterion) {
    let plain = scrolling_text();
    let colored = colored_text();

    c.bench_function("advance_plain_scroll", |b| {
        b.iter(|| {
            let mut terminal = Terminal::new(80, 24);
            terminal.advance(black_box(&plain));
            terminal
        })
    });

    c.bench_function("advance_sgr_heavy", |b| {
        b.iter(|| {
            let mut terminal = Terminal::new(80, 24);
            terminal.advance(black_box(&colored));
            terminal
        })
    });
}

criterion_group!(benches, bench_advance);
criterion_main!(benches);
