use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use ewts_engine::{ewts_to_unicode, parse_syllable, unicode_to_ewts, validate};

const VERSE: &str = "bsgrubs pa'i dge ba gang thob des | 'gro ba kun gyi sdug bsngal sel | \
                     sangs rgyas bstan pa rin po che | phyogs bcur rgyas par smon lam 'debs |";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_syllable");
    for token in ["ka", "bla", "bsgrubs", "grwa"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), token, |b, token| {
            b.iter(|| parse_syllable(token).unwrap());
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    c.bench_function("ewts_to_unicode/verse", |b| {
        b.iter(|| ewts_to_unicode(VERSE));
    });
    let unicode = ewts_to_unicode(VERSE);
    c.bench_function("unicode_to_ewts/verse", |b| {
        b.iter(|| unicode_to_ewts(&unicode));
    });
}

fn bench_validate(c: &mut Criterion) {
    c.bench_function("validate/verse", |b| {
        b.iter(|| validate(VERSE));
    });
}

criterion_group!(benches, bench_parse, bench_convert, bench_validate);
criterion_main!(benches);
