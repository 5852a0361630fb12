#[macro_use]
extern crate criterion;

use bytes::Bytes;
use criterion::{black_box, Criterion};

use lich::{
    encoding::{decode_full, encode_full, lex_full},
    *,
};

const N_BIG_ARR: usize = 100;
const N_CHARS: usize = 100_000;

fn big_str() -> Bytes { Bytes::from(&[0u8; N_CHARS] as &[u8]) }

fn big_arr() -> Element {
    let v: Vec<Element> = (0..N_BIG_ARR).map(|_| Element::from(big_str())).collect();
    Element::from(v)
}

fn bench_enc(c: &mut Criterion) {
    let big_arr = big_arr();
    c.bench_function(
        &format!(
            "Encoding a lich array of {} {}-byte strings",
            N_BIG_ARR, N_CHARS
        ),
        move |b| b.iter(|| encode_full(black_box(&big_arr))),
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = Bytes::from(encode_full(&big_arr()));
    c.bench_function(
        &format!(
            "Decoding a lich array of {} {}-byte strings",
            N_BIG_ARR, N_CHARS
        ),
        move |b| b.iter(|| decode_full(black_box(&enc))),
    );
}

fn bench_lex(c: &mut Criterion) {
    let enc = Bytes::from(encode_full(&big_arr()));
    c.bench_function(
        &format!(
            "Lexing a lich array of {} {}-byte strings",
            N_BIG_ARR, N_CHARS
        ),
        move |b| b.iter(|| lex_full(black_box(&enc))),
    );
}

criterion_group!(benches, bench_enc, bench_dec, bench_lex);
criterion_main!(benches);
