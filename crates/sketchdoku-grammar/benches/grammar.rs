//! Benchmarks for constraint expression encoding and decoding.
//!
//! # Benchmarks
//!
//! - **`decode`**: Parses representative expressions, from a bare kind up to a
//!   full-box cage and a long numpad chain.
//! - **`encode`**: Renders the decoded specs again, in canonical and compact
//!   form.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench grammar
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sketchdoku_core::GridSize;
use sketchdoku_grammar::{Compiler, EncodeOptions};

const EXPRESSIONS: [(&str, &str); 5] = [
    ("king", "king"),
    ("killer_list", "killer:45;R1C1R1C2R1C3R2C1R2C2R2C3R3C1R3C2R3C3"),
    ("killer_range", "killer:45;R1-3C1-3"),
    ("lk", "lk:23;R0C3;DR"),
    ("thermo_chain", "thermo:R9C1D99999999R1C8D1111111"),
];

fn bench_decode(c: &mut Criterion) {
    let compiler = Compiler::default();
    for (param, text) in EXPRESSIONS {
        c.bench_with_input(BenchmarkId::new("decode", param), text, |b, text| {
            b.iter(|| compiler.decode(hint::black_box(text)));
        });
    }
}

fn bench_encode(c: &mut Criterion) {
    for compact in [false, true] {
        let compiler = Compiler::new(GridSize::NINE, EncodeOptions { compact });
        for (param, text) in EXPRESSIONS {
            let spec = compiler.decode(text).unwrap();
            let id = format!("{param}_{}", if compact { "compact" } else { "canonical" });
            c.bench_with_input(BenchmarkId::new("encode", id), &spec, |b, spec| {
                b.iter(|| compiler.encode(hint::black_box(spec)));
            });
        }
    }
}

criterion_group!(benches, bench_decode, bench_encode);
criterion_main!(benches);
