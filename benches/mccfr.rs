use abstracted_holdem_cfr::mccfr::{Engine, Profile};
use abstracted_holdem_cfr::tables::OpponentType;
use rand::rngs::SmallRng;
use rand::SeedableRng;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        training_one_iteration,
        classifying_a_random_hand,
        synthesizing_a_target_grade,
}

fn training_one_iteration(c: &mut criterion::Criterion) {
    let profile = Profile::new();
    let rng = SmallRng::seed_from_u64(0);
    let mut engine = Engine::new(profile, rng, OpponentType::Neutral);
    c.bench_function("one MCCFR iteration", |b| {
        b.iter(|| engine.iterate(6));
    });
}

fn classifying_a_random_hand(c: &mut criterion::Criterion) {
    use abstracted_holdem_cfr::cards::Hand;
    use abstracted_holdem_cfr::classify::classify;
    use abstracted_holdem_cfr::Arbitrary;
    c.bench_function("classify a 7-card hand", |b| {
        let hand = Hand::random();
        b.iter(|| classify(&hand));
    });
}

fn synthesizing_a_target_grade(c: &mut criterion::Criterion) {
    use abstracted_holdem_cfr::classify::{synthesize, Grade};
    let mut rng = SmallRng::seed_from_u64(1);
    c.bench_function("synthesize a one-pair hand", |b| {
        b.iter(|| synthesize(Grade::F, &mut rng));
    });
}
