//! Criterion benchmarks for cardgen critical paths
//!
//! Benchmarks the per-card operations a deck render repeats:
//! - Format: resolving a card's layout format
//! - Layout: building the full instruction list
//! - Fit: wrapping and shrinking text into a box
//! - Deck: parsing a CSV deck table
//! - Color: text fill parsing

use cardgen::color::parse_color;
use cardgen::deck::read_delimited;
use cardgen::fit::{fit_text, wrap_lines, FitPolicy, MonoMeasure};
use cardgen::format::{classify, resolve, Presence};
use cardgen::layout::layout_card;
use cardgen::stats::CardStats;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// =============================================================================
// Test Data Generators
// =============================================================================

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// A card with a named ability and three named modes (the busiest layout)
fn busy_card() -> CardStats {
    CardStats {
        pokedex_number: text("150"),
        pokedex_name: text("Mewtwo"),
        tags: text("Legendary, Psychic"),
        cost: Some(8.0),
        attack: Some(7.0),
        health: Some(6.0),
        ability_name: text("Psystrike"),
        ability: text("Choose one when this enters play."),
        mode_1_name: text("Barrier"),
        mode_1_ability: text("Gain three shields until your next turn."),
        mode_2_name: text("Recover"),
        mode_2_ability: text("Heal all damage from this creature."),
        mode_3_name: text("Pressure"),
        mode_3_ability: text("Your opponent discards a card at random."),
        ..Default::default()
    }
}

/// A card with only an ability description
fn plain_card() -> CardStats {
    CardStats {
        pokedex_name: text("Magikarp"),
        ability: text("Does nothing at all."),
        ..Default::default()
    }
}

/// Generate a CSV deck with n rows
fn make_deck_csv(rows: usize) -> String {
    let mut csv = String::from(
        "pokedex_number,pokedex_name,cost,attack,health,ability_name,ability,mode_1_ability,mode_2_ability\n",
    );
    for i in 0..rows {
        csv.push_str(&format!(
            "{i:03},Card {i},{},{},{},Name {i},Deal {i} damage.,Mode one,Mode two\n",
            i % 10,
            i % 7,
            i % 5
        ));
    }
    csv
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let busy = busy_card();
    let plain = plain_card();
    group.bench_function("classify_busy", |b| b.iter(|| classify(black_box(&busy))));
    group.bench_function("classify_plain", |b| b.iter(|| classify(black_box(&plain))));

    // Every presence vector
    group.throughput(Throughput::Elements(256));
    group.bench_function("resolve_all_256", |b| {
        b.iter(|| {
            for bits in 0..=255u8 {
                black_box(resolve(&Presence::from_bits(bits)));
            }
        })
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    let busy = busy_card();
    let plain = plain_card();
    group.bench_function("layout_busy", |b| b.iter(|| layout_card(black_box(&busy))));
    group.bench_function("layout_plain", |b| b.iter(|| layout_card(black_box(&plain))));

    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    let measure = MonoMeasure::default();

    for words in [8usize, 32, 128].iter() {
        let text: String = (0..*words).map(|i| format!("word{i} ")).collect();
        group.throughput(Throughput::Elements(*words as u64));
        group.bench_with_input(BenchmarkId::new("wrap", words), &text, |b, text| {
            b.iter(|| wrap_lines(&measure, black_box(text), 25.0, 896.0))
        });
        // A 14 x 2 unit box at 64px per unit forces shrinking for longer texts
        group.bench_with_input(BenchmarkId::new("fit_14x2", words), &text, |b, text| {
            b.iter(|| fit_text(&measure, black_box(text), 30.0, 896.0, 128.0, FitPolicy::default()))
        });
    }

    group.finish();
}

fn bench_deck(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck");

    for rows in [10usize, 100, 1000].iter() {
        let csv = make_deck_csv(*rows);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::new("read_csv", rows), &csv, |b, csv| {
            b.iter(|| read_delimited(black_box(csv.as_bytes()), b','))
        });
    }

    group.finish();
}

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("parse_hex_6", |b| b.iter(|| parse_color(black_box("#252532"))));
    group.bench_function("parse_rgb", |b| b.iter(|| parse_color(black_box("rgb(37, 37, 50)"))));
    group.bench_function("parse_named", |b| b.iter(|| parse_color(black_box("black"))));

    group.finish();
}

criterion_group!(benches, bench_format, bench_layout, bench_fit, bench_deck, bench_color);
criterion_main!(benches);
