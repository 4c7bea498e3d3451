// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for chorale
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Roman numeral parsing and template resolution
//! - Functional progression generation
//! - SATB voice-leading search
//! - Melody generation throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chorale::harmony::functional;
use chorale::harmony::templates::TEMPLATES;
use chorale::{Cadence, Contour, Key, MelodyGenerator, PitchClass, Progression, ScaleType, VoiceLeader};

fn c_major() -> Key {
    Key::new(PitchClass::C, ScaleType::Major)
}

/// Parse every template's numerals in a major and a minor key
fn bench_roman_parsing(c: &mut Criterion) {
    let keys = [c_major(), Key::new(PitchClass::A, ScaleType::HarmonicMinor)];

    c.bench_function("parse_templates", |b| {
        b.iter(|| {
            let mut chords = 0;
            for key in &keys {
                for template in TEMPLATES.iter() {
                    if let Ok(progression) = Progression::from_roman(black_box(template.roman), key) {
                        chords += progression.len();
                    }
                }
            }
            black_box(chords)
        })
    });
}

fn bench_functional(c: &mut Criterion) {
    let mut group = c.benchmark_group("functional");
    let key = c_major();

    for length in [8usize, 32, 128].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(length), length, |b, &length| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(functional(&key, length, Cadence::Authentic, &mut rng).ok()))
        });
    }

    group.finish();
}

/// Voice-lead each template end to end
fn bench_voice_leading(c: &mut Criterion) {
    let mut group = c.benchmark_group("voice_lead_progression");
    let leader = VoiceLeader::default();
    let key = c_major();

    for template in TEMPLATES.iter() {
        let Ok(progression) = Progression::from_template(template.name, &key) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(template.name),
            &progression,
            |b, progression| {
                let mut rng = StdRng::seed_from_u64(42);
                b.iter(|| {
                    let voiced = match leader.voice_lead_progression(progression, &mut rng) {
                        Ok(voiced) => voiced,
                        Err(failure) => failure.partial,
                    };
                    black_box(voiced.total_motion)
                })
            },
        );
    }

    group.finish();
}

fn bench_melody(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_melody");
    let generator = MelodyGenerator::default();
    let progression = match Progression::from_template("circle", &c_major()) {
        Ok(progression) => progression,
        Err(_) => return,
    };

    for length in [8usize, 32, 128].iter() {
        group.bench_with_input(BenchmarkId::new("arch", length), length, |b, &length| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| {
                let melody = generator.generate_melody(
                    &progression,
                    Contour::Arch,
                    black_box(0.5),
                    length,
                    &mut rng,
                );
                black_box(melody.len())
            })
        });
    }

    group.bench_function("period_32", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| {
            let period = generator.generate_period(&progression, Contour::Wave, 0.7, 32, &mut rng);
            black_box(period.len())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_roman_parsing,
    bench_functional,
    bench_voice_leading,
    bench_melody,
);

criterion_main!(benches);
