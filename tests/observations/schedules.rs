use super::{dss34, dss65, init_logger};
use crate::test_config;
use nyx_obs_sim::io::ConfigRepr;
use nyx_obs_sim::linalg::{Vector1, Vector2};
use nyx_obs_sim::od::prelude::*;
use nyx_obs_sim::time::TimeScale;
use rstest::*;
use std::sync::Arc;

#[fixture]
fn start() -> Epoch {
    Epoch::from_gregorian_at_midnight(2023, 2, 22, TimeScale::UTC)
}

#[fixture]
fn epoch_simulators(start: Epoch, dss65: LinkEnds, dss34: LinkEnds) -> SimulatorMap<Epoch> {
    let range = LinkModels::new(ObservableType::OneWayRange)
        .with_model1(dss65, move |epoch: Epoch| {
            Vector1::new(384_400.0 + (epoch - start).to_seconds())
        })
        .with_model1(dss34, move |epoch: Epoch| {
            Vector1::new(384_500.0 + (epoch - start).to_seconds())
        });

    let lro_to_dss65 = LinkEnds::new()
        .with(LinkEndType::Transmitter, LinkEndId::body("LRO"))
        .with(LinkEndType::Receiver, LinkEndId::new("Earth", "DSS-65"));
    let angles = LinkModels::new(ObservableType::AngularPosition).with_model2(
        lro_to_dss65,
        move |epoch: Epoch| {
            let minutes = (epoch - start).to_unit(Unit::Minute);
            Vector2::new(minutes.to_radians(), -minutes.to_radians())
        },
    );

    let mut simulators: SimulatorMap<Epoch> = SimulatorMap::new();
    simulators.insert(ObservableType::OneWayRange, Arc::new(range));
    simulators.insert(ObservableType::AngularPosition, Arc::new(angles));
    simulators
}

#[rstest]
fn load_schedules() {
    let schedules =
        ObservationScheduleCfg::load_many(test_config("observation_schedules.yaml")).unwrap();
    assert_eq!(schedules.len(), 3);
    assert_eq!(schedules[0].seed, Some(1));
    assert!(schedules[1].noise.is_none());
    assert_eq!(schedules[2].reference, LinkEndType::Receiver);
    assert_eq!(
        schedules[0].noise.unwrap().bias.unwrap().tau,
        5.minutes()
    );
}

#[rstest]
fn simulate_plan(
    epoch_simulators: SimulatorMap<Epoch>,
    start: Epoch,
    dss65: LinkEnds,
    dss34: LinkEnds,
) {
    init_logger();

    let plan = ObservationPlan::load(test_config("observation_schedules.yaml")).unwrap();
    let results = plan.simulate(&epoch_simulators).unwrap();

    // Two hours sampled every minute, alternating thirty minutes on and off
    let dss65_range = &results[&ObservableType::OneWayRange][&dss65];
    assert_eq!(dss65_range.len(), 61);
    assert_eq!(dss65_range.epochs()[0], start);
    assert_eq!(dss65_range.epochs()[30], start + 1.hours());

    // Noise-free schedule
    let dss34_range = &results[&ObservableType::OneWayRange][&dss34];
    assert_eq!(
        dss34_range.observations().as_slice(),
        &[384_500.0, 384_530.0, 384_560.0]
    );

    let angles = results[&ObservableType::AngularPosition]
        .values()
        .next()
        .unwrap();
    assert_eq!(angles.len(), 6);
    assert_eq!(angles.observations().len(), 12);

    // Loading the same seeded plan again yields the same noise
    let again = ObservationPlan::load(test_config("observation_schedules.yaml"))
        .unwrap()
        .simulate(&epoch_simulators)
        .unwrap();
    assert_eq!(results, again);
}

#[rstest]
fn missing_file() {
    assert!(matches!(
        ObservationPlan::load(test_config("no_such_schedules.yaml")),
        Err(SimulationError::SimConfigError { .. })
    ));
}
