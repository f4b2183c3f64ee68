use super::{dss34, dss65, init_logger, simulators, tabulated};
use approx::assert_abs_diff_eq;
use nyx_obs_sim::linalg::{DVector, Vector1, Vector3};
use nyx_obs_sim::od::prelude::*;
use rstest::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn all_observables() -> Vec<ObservableType> {
    vec![
        ObservableType::OneWayRange,
        ObservableType::AngularPosition,
        ObservableType::Position,
    ]
}

#[rstest]
fn constant_noise_is_additive(simulators: SimulatorMap<f64>, dss65: LinkEnds, dss34: LinkEnds) {
    init_logger();

    let epochs: Vec<f64> = (0..50).map(|k| k as f64 * 0.1).collect();
    let specs = tabulated(&[ObservableType::AngularPosition], &epochs);

    let mut per_link = BTreeMap::new();
    let angles = per_link
        .entry(ObservableType::AngularPosition)
        .or_insert_with(BTreeMap::new);
    angles.insert(
        dss65.clone(),
        NoiseFunction::vector(|_t: f64| DVector::from_vec(vec![0.5, -0.5])),
    );
    angles.insert(
        dss34.clone(),
        NoiseFunction::vector(|t: f64| DVector::from_vec(vec![t, 2.0 * t])),
    );

    let arc = ObservationArcSim::new(simulators);
    let noise_free = arc.simulate(&specs).unwrap();
    let noisy = arc
        .simulate_with_noise(&specs, &NoiseConfig::PerLink(per_link))
        .unwrap();

    let free = &noise_free[&ObservableType::AngularPosition];
    let with_noise = &noisy[&ObservableType::AngularPosition];

    for (i, epoch) in epochs.iter().enumerate() {
        let expected = free[&dss65].observation(i).unwrap() + DVector::from_vec(vec![0.5, -0.5]);
        assert_abs_diff_eq!(
            with_noise[&dss65].observation(i).unwrap().clone_owned(),
            expected,
            epsilon = 1e-12
        );

        let expected =
            free[&dss34].observation(i).unwrap() + DVector::from_vec(vec![*epoch, 2.0 * epoch]);
        assert_abs_diff_eq!(
            with_noise[&dss34].observation(i).unwrap().clone_owned(),
            expected,
            epsilon = 1e-12
        );
    }

    // Epochs and references pass through unchanged
    assert_eq!(with_noise[&dss65].epochs(), free[&dss65].epochs());
    assert_eq!(with_noise[&dss65].reference(), free[&dss65].reference());
}

#[rstest]
#[case::nominal(0.25)]
#[case::negative(-1.0e3)]
fn scalar_noise_is_broadcast(simulators: SimulatorMap<f64>, #[case] c: f64) {
    let specs = tabulated(&[ObservableType::Position], &[0.0, 1.0, 2.0]);
    let arc = ObservationArcSim::new(simulators);

    let noise_free = arc.simulate(&specs).unwrap();
    let noisy = arc
        .simulate_with_noise(
            &specs,
            &NoiseConfig::Global(NoiseFunction::scalar(move |_t: f64| c)),
        )
        .unwrap();

    for (link_ends, batch) in &noisy[&ObservableType::Position] {
        let free = &noise_free[&ObservableType::Position][link_ends];
        assert_eq!(batch.observations().len(), 9);
        assert_abs_diff_eq!(
            batch.observations().clone(),
            free.observations().add_scalar(c),
            epsilon = 1e-12
        );
    }
}

#[rstest]
fn dimension_mismatch(simulators: SimulatorMap<f64>) {
    let specs = tabulated(&[ObservableType::Position], &[0.0, 1.0]);

    let noise = NoiseConfig::Global(NoiseFunction::vector(|_t: f64| {
        DVector::from_vec(vec![1.0, 1.0])
    }));

    assert_eq!(
        simulate_with_noise(&specs, &simulators, &noise),
        Err(SimulationError::NoiseDimensionMismatch {
            observable: ObservableType::Position,
            expected: 3,
            got: 2
        })
    );
}

#[rstest]
fn per_observable_noise(simulators: SimulatorMap<f64>, dss65: LinkEnds, dss34: LinkEnds) {
    let specs = tabulated(
        &[ObservableType::OneWayRange, ObservableType::AngularPosition],
        &[0.0, 10.0],
    );

    let mut noise = BTreeMap::new();
    noise.insert(
        ObservableType::OneWayRange,
        NoiseFunction::scalar(|_t: f64| 5.0),
    );
    noise.insert(
        ObservableType::AngularPosition,
        NoiseFunction::scalar(|_t: f64| 0.0),
    );

    let noisy = simulate_with_noise(&specs, &simulators, &NoiseConfig::PerObservable(noise))
        .unwrap();

    // The same noise is shared across the link ends of an observable
    assert_eq!(
        noisy[&ObservableType::OneWayRange][&dss65]
            .observations()
            .as_slice(),
        &[5.0, 25.0]
    );
    assert_eq!(
        noisy[&ObservableType::OneWayRange][&dss34]
            .observations()
            .as_slice(),
        &[5.0, 35.0]
    );
}

#[rstest]
fn missing_noise_generator(simulators: SimulatorMap<f64>, dss34: LinkEnds) {
    let specs = tabulated(&all_observables(), &[0.0]);

    let mut noise = BTreeMap::new();
    noise.insert(
        ObservableType::OneWayRange,
        NoiseFunction::scalar(|_t: f64| 1.0),
    );

    assert_eq!(
        simulate_with_noise(&specs, &simulators, &NoiseConfig::PerObservable(noise)),
        Err(SimulationError::MissingNoiseGenerator {
            observable: ObservableType::AngularPosition,
            link_ends: dss34
        })
    );
}

#[rstest]
fn inconsistent_batch(dss65: LinkEnds) {
    let mut results = ObservationResultMap::new();
    results.entry(ObservableType::AngularPosition).or_default().insert(
        dss65.clone(),
        ObservationBatch::new(
            DVector::from_vec(vec![1.0, 2.0, 3.0]),
            vec![0.0, 1.0],
            LinkEndType::Receiver,
            2,
        ),
    );

    let lookup = NoiseLookup::global(
        &NoiseFunction::scalar(|_t: f64| 1.0),
        vec![(ObservableType::AngularPosition, dss65)],
    );

    assert_eq!(
        add_noise(&results, &lookup),
        Err(SimulationError::InconsistentBatchShape {
            observable: ObservableType::AngularPosition,
            epochs: 2,
            observations: 3,
            size: 2
        })
    );
}

fn seeded_noise() -> NoiseConfig<f64> {
    let model = StochasticNoise {
        white_noise: Some(WhiteNoise::constant_white_noise(1.0)),
        bias: Some(GaussMarkov::default_range_km()),
    };
    NoiseConfig::Global(NoiseFunction::scalar(SeededNoise::new(model, 7)))
}

#[rstest]
fn seeded_noise_is_repeatable(simulators: SimulatorMap<f64>) {
    let epochs: Vec<f64> = (0..200).map(|k| k as f64 * 60.0).collect();
    let specs = tabulated(&all_observables(), &epochs);

    let arc = ObservationArcSim::new(simulators);
    let first = arc.simulate_with_noise(&specs, &seeded_noise()).unwrap();
    let second = arc.simulate_with_noise(&specs, &seeded_noise()).unwrap();
    assert_eq!(first, second);

    let noise_free = arc.simulate(&specs).unwrap();
    assert_ne!(first, noise_free);
}

#[rstest]
fn independent_components(simulators: SimulatorMap<f64>, dss65: LinkEnds) {
    let specs = tabulated(&[ObservableType::Position], &[0.0, 60.0]);

    let model = StochasticNoise {
        white_noise: Some(WhiteNoise::constant_white_noise(1.0)),
        bias: None,
    };
    let iid = IidNoise::new(Arc::new(SeededNoise::<f64>::new(model, 3)), 3);

    let arc = ObservationArcSim::new(simulators);
    let noise_free = arc.simulate(&specs).unwrap();
    let noisy = arc
        .simulate_with_noise(
            &specs,
            &NoiseConfig::Global(NoiseFunction::vector(iid)),
        )
        .unwrap();

    let noise = noisy[&ObservableType::Position][&dss65].observations()
        - noise_free[&ObservableType::Position][&dss65].observations();
    // Each component is sampled separately
    assert_ne!(noise[0], noise[1]);
    assert_ne!(noise[1], noise[2]);
}

#[rstest]
fn noise_on_link_specific_size(dss65: LinkEnds, dss34: LinkEnds) {
    // Range observed as a three component observation on DSS-65 only
    let range = LinkModels::new(ObservableType::OneWayRange)
        .with_model3(dss65.clone(), |t: f64| Vector3::new(t, t, t))
        .with_model1(dss34.clone(), |t: f64| Vector1::new(t));
    let mut simulators: SimulatorMap<f64> = SimulatorMap::new();
    simulators.insert(ObservableType::OneWayRange, Arc::new(range));

    let specs = tabulated(&[ObservableType::OneWayRange], &[0.0, 1.0]);
    let noise_free = simulate(&specs, &simulators).unwrap();
    assert_eq!(noise_free[&ObservableType::OneWayRange][&dss65].size(), 3);
    assert_eq!(noise_free[&ObservableType::OneWayRange][&dss34].size(), 1);

    let mut per_link = BTreeMap::new();
    let ranges = per_link
        .entry(ObservableType::OneWayRange)
        .or_insert_with(BTreeMap::new);
    ranges.insert(
        dss65.clone(),
        NoiseFunction::vector(|_t: f64| DVector::from_vec(vec![0.1, 0.2, 0.3])),
    );
    ranges.insert(dss34.clone(), NoiseFunction::scalar(|_t: f64| 0.5));

    let noisy = simulate_with_noise(&specs, &simulators, &NoiseConfig::PerLink(per_link)).unwrap();
    assert_abs_diff_eq!(
        noisy[&ObservableType::OneWayRange][&dss65].observations().clone(),
        DVector::from_vec(vec![0.1, 0.2, 0.3, 1.1, 1.2, 1.3]),
        epsilon = 1e-12
    );
    assert_eq!(
        noisy[&ObservableType::OneWayRange][&dss34]
            .observations()
            .as_slice(),
        &[0.5, 1.5]
    );

    // Scalar noise is broadcast over the size of each link ends
    let noisy = simulate_with_noise(
        &specs,
        &simulators,
        &NoiseConfig::Global(NoiseFunction::scalar(|_t: f64| 1.0)),
    )
    .unwrap();
    assert_eq!(
        noisy[&ObservableType::OneWayRange][&dss65]
            .observations()
            .as_slice(),
        &[1.0, 1.0, 1.0, 2.0, 2.0, 2.0]
    );
}
