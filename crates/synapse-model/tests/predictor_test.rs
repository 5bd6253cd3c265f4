use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use synapse_core::config::PredictorConfig;
use synapse_core::traits::ILinkPredictor;
use synapse_embeddings::Vocabulary;
use synapse_model::{load_artifact, save_artifact, LinkPredictor};

fn random_vec(rng: &mut StdRng, dim: usize) -> Vec<f32> {
    (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect()
}

#[test]
fn saved_and_loaded_models_predict_identically_on_100_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let model = LinkPredictor::new(PredictorConfig::default(), 23).unwrap();
    let vocabulary = Vocabulary::build(["attention graph concepts"]);
    save_artifact(&path, &model, &vocabulary).unwrap();
    let (loaded, _) = load_artifact(&path).unwrap();

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        let a = random_vec(&mut rng, 64);
        let b = random_vec(&mut rng, 64);
        let ctx = random_vec(&mut rng, 32);
        let before = model.predict_strength(&a, &b, &ctx).unwrap();
        let after = loaded.predict_strength(&a, &b, &ctx).unwrap();
        assert_eq!(before, after);
    }
}

#[test]
fn parameter_count_survives_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let model = LinkPredictor::new(PredictorConfig::default(), 31).unwrap();
    save_artifact(&path, &model, &Vocabulary::default()).unwrap();
    let (loaded, _) = load_artifact(&path).unwrap();
    assert_eq!(loaded.count_parameters(), model.count_parameters());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn predictions_are_always_bounded(
        a in prop::collection::vec(-10.0f32..10.0, 64),
        b in prop::collection::vec(-10.0f32..10.0, 64),
        ctx in prop::collection::vec(-10.0f32..10.0, 32),
        seed in 0u64..1000,
    ) {
        let model = LinkPredictor::new(PredictorConfig::default(), seed).unwrap();
        let strength = model.predict_strength(&a, &b, &ctx).unwrap();
        prop_assert!((0.0..=1.0).contains(&strength));
    }
}
