use super::{dss34, dss65, init_logger, simulators, tabulated};
use nyx_obs_sim::od::prelude::*;
use rstest::*;
use std::sync::Arc;

#[rstest]
fn range_example(simulators: SimulatorMap<f64>, dss65: LinkEnds) {
    init_logger();

    let mut times = TabulatedTimesMap::new();
    times
        .entry(ObservableType::OneWayRange)
        .or_default()
        .insert(dss65.clone(), (vec![0.0, 10.0, 20.0], LinkEndType::Receiver));

    let arc = ObservationArcSim::new(simulators);
    let noise_free = arc.simulate_tabulated(&times).unwrap();
    let batch = &noise_free[&ObservableType::OneWayRange][&dss65];
    assert_eq!(batch.observations().as_slice(), &[0.0, 20.0, 40.0]);
    assert_eq!(batch.epochs(), &[0.0, 10.0, 20.0]);
    assert_eq!(batch.reference(), LinkEndType::Receiver);

    let noisy = arc
        .simulate_with_noise(
            &tabulated_time_specs(&times),
            &NoiseConfig::Global(NoiseFunction::scalar(|_t: f64| 1.0)),
        )
        .unwrap();
    let batch = &noisy[&ObservableType::OneWayRange][&dss65];
    assert_eq!(batch.observations().as_slice(), &[1.0, 21.0, 41.0]);
    assert_eq!(batch.epochs(), &[0.0, 10.0, 20.0]);
}

#[rstest]
#[case::sorted(vec![0.0, 60.0, 120.0])]
#[case::unsorted(vec![120.0, 0.0, 60.0])]
#[case::duplicated(vec![60.0, 60.0, 0.0, 60.0])]
#[case::single(vec![3600.0])]
fn epochs_are_preserved(simulators: SimulatorMap<f64>, #[case] epochs: Vec<f64>) {
    let specs = tabulated(
        &[
            ObservableType::OneWayRange,
            ObservableType::AngularPosition,
            ObservableType::Position,
        ],
        &epochs,
    );

    let results = simulate(&specs, &simulators).unwrap();
    assert_eq!(results.len(), 3);
    for (observable, per_link) in &results {
        assert_eq!(per_link.len(), 2);
        for (link_ends, batch) in per_link {
            assert_eq!(batch.epochs(), epochs.as_slice(), "{observable} {link_ends}");
            // One full observation per epoch
            assert_eq!(
                batch.observations().len(),
                batch.epochs().len() * observable.observation_size()
            );
        }
    }
}

#[rstest]
fn observations_in_epoch_order(simulators: SimulatorMap<f64>, dss34: LinkEnds) {
    let specs = tabulated(&[ObservableType::Position], &[2.0, 1.0]);
    let results = simulate(&specs, &simulators).unwrap();
    let batch = &results[&ObservableType::Position][&dss34];

    assert_eq!(
        batch.observations().as_slice(),
        &[-2.0, -4.0, -6.0, -1.0, -2.0, -3.0]
    );
    assert_eq!(batch.observation(1).unwrap().as_slice(), &[-1.0, -2.0, -3.0]);
    assert!(batch.observation(2).is_none());
}

#[rstest]
fn idempotent(simulators: SimulatorMap<f64>) {
    let epochs: Vec<f64> = (0..100).map(|k| k as f64 * 30.0).collect();
    let specs = tabulated(
        &[ObservableType::OneWayRange, ObservableType::AngularPosition],
        &epochs,
    );

    let arc = ObservationArcSim::new(simulators);
    assert_eq!(arc.simulate(&specs).unwrap(), arc.simulate(&specs).unwrap());
}

#[rstest]
fn parallel_matches_sequential(simulators: SimulatorMap<f64>) {
    init_logger();

    let epochs: Vec<f64> = (0..5000).map(|k| k as f64).collect();
    let specs = tabulated(
        &[
            ObservableType::OneWayRange,
            ObservableType::AngularPosition,
            ObservableType::Position,
        ],
        &epochs,
    );

    let sequential = ObservationArcSim::new(simulators.clone())
        .simulate(&specs)
        .unwrap();
    let parallel = ObservationArcSim::builder()
        .simulators(simulators)
        .parallel(true)
        .build()
        .simulate(&specs)
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[rstest]
fn empty_epochs(simulators: SimulatorMap<f64>, dss65: LinkEnds) {
    let specs = tabulated(&[ObservableType::Position], &[]);
    let results = simulate(&specs, &simulators).unwrap();

    let batch = &results[&ObservableType::Position][&dss65];
    assert!(batch.is_empty());
    assert_eq!(batch.observations().len(), 0);
    assert_eq!(batch.reference(), LinkEndType::Receiver);

    // Noise is never evaluated on an empty batch, so even a mismatched generator is accepted
    let noisy = simulate_with_noise(
        &specs,
        &simulators,
        &NoiseConfig::Global(NoiseFunction::vector(|_t: f64| {
            nyx_obs_sim::linalg::DVector::zeros(5)
        })),
    )
    .unwrap();
    assert!(noisy[&ObservableType::Position][&dss65].is_empty());
}

/// Reports an unsupported observation size for every link ends.
struct FourDimensional;

impl ObservationSimulator<f64> for FourDimensional {
    fn observable_type(&self) -> ObservableType {
        ObservableType::EulerAngle313
    }

    fn observation_size(&self, _link_ends: &LinkEnds) -> usize {
        4
    }

    fn observation_model(&self, _link_ends: &LinkEnds) -> Option<SizedModel<f64>> {
        None
    }
}

#[rstest]
#[case::sequential(false)]
#[case::parallel(true)]
fn unsupported_size(
    mut simulators: SimulatorMap<f64>,
    dss65: LinkEnds,
    #[case] parallel: bool,
) {
    init_logger();

    simulators.insert(ObservableType::EulerAngle313, Arc::new(FourDimensional));
    let specs = tabulated(
        &[ObservableType::OneWayRange, ObservableType::EulerAngle313],
        &[0.0, 1.0],
    );

    let arc = ObservationArcSim::builder()
        .simulators(simulators)
        .parallel(parallel)
        .build();

    assert_eq!(
        arc.simulate(&specs),
        Err(SimulationError::UnsupportedObservationSize {
            observable: ObservableType::EulerAngle313,
            size: 4
        })
    );

    // No batch is produced for the unsupported observable, the others are unaffected
    let each = arc.simulate_each(&specs);
    assert!(each[&ObservableType::OneWayRange]
        .values()
        .all(|outcome| outcome.is_ok()));
    assert!(each[&ObservableType::EulerAngle313]
        .values()
        .all(|outcome| outcome.is_err()));
    assert!(each[&ObservableType::EulerAngle313][&dss65].is_err());
}

#[rstest]
fn unregistered_link_ends(simulators: SimulatorMap<f64>) {
    let madrid = LinkEnds::one_way(LinkEndId::new("Earth", "DSS-63"), LinkEndId::body("LRO"));

    let mut specs = TimeSpecMap::new();
    specs
        .entry(ObservableType::OneWayRange)
        .or_default()
        .insert(
            madrid.clone(),
            TimeSampleSpecification::tabulated(LinkEndType::Receiver, vec![0.0]),
        );

    assert_eq!(
        simulate(&specs, &simulators),
        Err(SimulationError::ModelUnavailable {
            observable: ObservableType::OneWayRange,
            link_ends: madrid
        })
    );
}

#[rstest]
fn sampled_schedule(simulators: SimulatorMap<f64>, dss65: LinkEnds) {
    let sampling = Sampling::builder()
        .start(0.0)
        .end(3600.0)
        .step(1.minutes())
        .cadence(Cadence::Intermittent {
            on: 10.minutes(),
            off: 20.minutes(),
        })
        .build();

    let mut specs = TimeSpecMap::new();
    specs.entry(ObservableType::OneWayRange).or_default().insert(
        dss65.clone(),
        TimeSampleSpecification::sampled(LinkEndType::Transmitter, sampling),
    );

    let results = simulate(&specs, &simulators).unwrap();
    let batch = &results[&ObservableType::OneWayRange][&dss65];
    // Two on periods of ten samples, plus the final epoch at the start of the third period
    assert_eq!(batch.len(), 21);
    assert_eq!(batch.reference(), LinkEndType::Transmitter);
    assert_eq!(batch.epochs()[10], 1800.0);
    assert_eq!(batch.observations()[10], 3600.0);
}
