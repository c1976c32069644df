//! Criterion benchmarks for the settings registry core.
//!
//! Three benchmark groups:
//! - `set_pipeline`: the full clamp -> validate -> commit -> notify path
//! - `text_codec`: config text decode for the common kinds
//! - `table_transfer`: whole-table binary save and load

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use magnate_settings::stream::{StreamReader, StreamWriter};
use magnate_settings::test_utils::*;
use magnate_settings::value::SettingValue;

fn bench_set_pipeline(c: &mut Criterion) {
    let table = test_table();
    let mut state = TestState::default();
    let desc = table.lookup("economy.max_loan").unwrap();

    c.bench_function("set_clamped_scalar", |b| {
        b.iter(|| {
            desc.set(&mut state, None, SettingValue::Int(black_box(9_999_999)))
                .unwrap()
        })
    });

    let mask = table.lookup("gui.display_options").unwrap();
    c.bench_function("set_masked_bitset", |b| {
        b.iter(|| mask.set(&mut state, None, SettingValue::Int(black_box(-1))).unwrap())
    });
}

fn bench_text_codec(c: &mut Criterion) {
    let table = test_table();
    let loan = table.lookup("economy.max_loan").unwrap();
    let climate = table.lookup("creation.landscape").unwrap();
    let options = table.lookup("gui.display_options").unwrap();

    c.bench_function("decode_decimal", |b| {
        b.iter(|| loan.decode_text(black_box("450000")).unwrap())
    });
    c.bench_function("decode_token", |b| {
        b.iter(|| climate.decode_text(black_box("toyland")).unwrap())
    });
    c.bench_function("decode_token_set", |b| {
        b.iter(|| options.decode_text(black_box("town_names|signs|full_detail")).unwrap())
    });
}

fn bench_table_transfer(c: &mut Criterion) {
    let table = test_table();
    let state = TestState::default();
    let block = TestBlock::default();

    c.bench_function("table_save", |b| {
        b.iter(|| {
            let mut w = StreamWriter::new();
            table.save(&mut w, TEST_VERSION, &state, Some(&block)).unwrap();
            w.into_bytes()
        })
    });

    let mut w = StreamWriter::new();
    table.save(&mut w, TEST_VERSION, &state, Some(&block)).unwrap();
    let bytes = w.into_bytes();

    c.bench_function("table_load", |b| {
        b.iter(|| {
            let mut restored = TestState::default();
            let mut restored_block = TestBlock::default();
            let mut r = StreamReader::new(black_box(&bytes));
            table
                .load(&mut r, TEST_VERSION, &mut restored, Some(&mut restored_block))
                .unwrap();
            restored
        })
    });
}

criterion_group!(benches, bench_set_pipeline, bench_text_codec, bench_table_transfer);
criterion_main!(benches);
