use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rs_poker_tracker::parse::{ErrorPolicy, ImportConfig, Importer};

const HAND: &str = "PokerStars Hand #{ID}:  Hold'em No Limit ($0.05/$0.10 USD) - 2023/05/14 13:24:56 CET [2023/05/14 7:24:56 ET]
Table 'Bench' 6-max Seat #2 is the button
Seat 1: ada ($10 in chips)
Seat 2: ben ($10 in chips)
Seat 3: cy ($10 in chips)
Seat 4: dee ($10 in chips)
cy: posts small blind $0.05
dee: posts big blind $0.10
*** HOLE CARDS ***
Dealt to ada [Ah Kd]
ada: raises $0.20 to $0.30
ben: calls $0.30
cy: folds
dee: calls $0.20
*** FLOP *** [2c 7d Jh]
dee: checks
ada: bets $0.50
ben: calls $0.50
dee: raises $1 to $1.50
ada: folds
ben: calls $1
*** TURN *** [2c 7d Jh] [Qs]
dee: bets $2
ben: folds
Uncalled bet ($2) returned to dee
dee collected $4.22 from pot
*** SUMMARY ***
Total pot $4.45 | Rake $0.23
Board [2c 7d Jh Qs]
Seat 1: ada folded on the Flop
Seat 2: ben (button) folded on the Turn
Seat 3: cy (small blind) folded before Flop
Seat 4: dee (big blind) collected ($4.22)";

fn session(hands: usize) -> String {
    (0..hands)
        .map(|i| HAND.replace("{ID}", &(240_000_000_000u64 + i as u64).to_string()))
        .collect::<Vec<_>>()
        .join("\n\n\n")
}

fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");
    for hands in [100, 1000] {
        let text = session(hands);
        for parallel in [false, true] {
            let name = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(name, hands), &text, |b, text| {
                b.iter(|| {
                    let config = ImportConfig {
                        error_policy: ErrorPolicy::Abort,
                        parallel,
                        ..Default::default()
                    };
                    let mut importer = Importer::new(config).unwrap();
                    std::hint::black_box(importer.import_str(text).unwrap())
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_import);
criterion_main!(benches);
