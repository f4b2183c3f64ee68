extern crate nyx_obs_sim as nyx;

use self::nyx::linalg::{Vector1, Vector2, Vector3};
use self::nyx::od::prelude::*;
use rstest::*;
use std::sync::Arc;

mod arc;
mod noise;
mod schedules;

#[fixture]
pub fn dss65() -> LinkEnds {
    LinkEnds::one_way(LinkEndId::new("Earth", "DSS-65"), LinkEndId::body("LRO"))
}

#[fixture]
pub fn dss34() -> LinkEnds {
    LinkEnds::one_way(LinkEndId::new("Earth", "DSS-34"), LinkEndId::body("LRO"))
}

/// Simple deterministic models of a range, angles, and position, for both DSS-65 and DSS-34.
#[fixture]
pub fn simulators(dss65: LinkEnds, dss34: LinkEnds) -> SimulatorMap<f64> {
    let range = LinkModels::new(ObservableType::OneWayRange)
        .with_model1(dss65.clone(), |t: f64| Vector1::new(t * 2.0))
        .with_model1(dss34.clone(), |t: f64| Vector1::new(t * 3.0));

    let angles = LinkModels::new(ObservableType::AngularPosition)
        .with_model2(dss65.clone(), |t: f64| Vector2::new(t.sin(), t.cos()))
        .with_model2(dss34.clone(), |t: f64| Vector2::new(t.cos(), t.sin()));

    let position = LinkModels::new(ObservableType::Position)
        .with_model3(dss65, |t: f64| Vector3::new(t, 2.0 * t, 3.0 * t))
        .with_model3(dss34, |t: f64| Vector3::new(-t, -2.0 * t, -3.0 * t));

    let mut simulators: SimulatorMap<f64> = SimulatorMap::new();
    simulators.insert(ObservableType::OneWayRange, Arc::new(range));
    simulators.insert(ObservableType::AngularPosition, Arc::new(angles));
    simulators.insert(ObservableType::Position, Arc::new(position));
    simulators
}

/// Tabulated time specifications of each observable for both DSS-65 and DSS-34, referenced to the receiver.
pub fn tabulated(observables: &[ObservableType], epochs: &[f64]) -> TimeSpecMap<f64> {
    let mut times = TabulatedTimesMap::new();
    for observable in observables {
        for link_ends in [dss65(), dss34()] {
            times
                .entry(*observable)
                .or_default()
                .insert(link_ends, (epochs.to_vec(), LinkEndType::Receiver));
        }
    }
    tabulated_time_specs(&times)
}

pub fn init_logger() {
    if pretty_env_logger::try_init().is_err() {
        println!("could not init env_logger");
    }
}
