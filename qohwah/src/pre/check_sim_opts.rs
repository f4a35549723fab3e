use crate::core::race_catalog::RaceCatalog;
use crate::pre::read_scenario::Scenario;
use crate::pre::sim_opts::SimOpts;
use anyhow::Context;
use helpers::general::InputValueError;

/// check_sim_opts assures that the inserted options and the scenario are within reasonable limits
/// and fit the loaded race catalog, and raises an error if not.
pub fn check_sim_opts(
    sim_opts: &SimOpts,
    scenario: &Scenario,
    catalog: &RaceCatalog,
) -> anyhow::Result<()> {
    // PART 1: SIMULATION OPTIONS
    if !(0.001 <= sim_opts.timestep_size && sim_opts.timestep_size <= 1.0) {
        return Err(InputValueError).context(format!(
            "timestep_size is {:.3}s, which is not within the reasonable range of [0.001, 1.0]s!",
            sim_opts.timestep_size
        ));
    }

    if sim_opts.no_frames < 1 {
        return Err(InputValueError).context(format!(
            "no_frames must be at least equal to one, but is {}!",
            sim_opts.no_frames
        ));
    }

    if sim_opts.gui && !(0.1 <= sim_opts.realtime_factor && sim_opts.realtime_factor <= 100.0) {
        return Err(InputValueError).context(format!(
            "realtime_factor is {:.3}, which is not within the reasonable range of [0.1, 100.0]!",
            sim_opts.realtime_factor
        ));
    }

    if catalog.is_empty() {
        return Err(InputValueError).context(format!(
            "No races could be loaded from {}, there is nothing to simulate!",
            sim_opts.scripts_dir.display()
        ));
    }

    if !catalog.contains_idx(sim_opts.race_idx) {
        return Err(InputValueError).context(format!(
            "race_idx is {}, but only {} races were loaded!",
            sim_opts.race_idx,
            catalog.len()
        ));
    }

    // PART 2: SCENARIO
    if !(scenario.driver_speed >= 0.0 && scenario.driver_speed.is_finite()) {
        return Err(InputValueError).context(format!(
            "driver_speed is {:.3}m/s, but must be finite and non-negative!",
            scenario.driver_speed
        ));
    }

    if !(scenario.max_health > 0.0 && scenario.max_health.is_finite()) {
        return Err(InputValueError).context(format!(
            "max_health is {:.1}, but must be finite and positive!",
            scenario.max_health
        ));
    }

    if let Some(key_press) = scenario.key_presses.iter().find(|kp| kp.key.trim().is_empty()) {
        return Err(InputValueError).context(format!(
            "The key press in frame {} has no key name!",
            key_press.frame
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::race_catalog::{Pose, RaceDef};
    use clap::Parser;

    fn catalog() -> RaceCatalog {
        RaceCatalog::new(vec![RaceDef {
            name: String::from("Sprint"),
            start: Pose::new(0.0, 0.0, 0.0, 0.0),
            finish: Pose::new(100.0, 0.0, 0.0, 0.0),
        }])
    }

    fn opts(args: &[&str]) -> SimOpts {
        SimOpts::parse_from(std::iter::once("qohwah").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(check_sim_opts(&opts(&[]), &Scenario::default(), &catalog()).is_ok());
    }

    #[test]
    fn test_invalid_options() {
        let scenario = Scenario::default();
        assert!(check_sim_opts(&opts(&["-t", "2.0"]), &scenario, &catalog()).is_err());
        assert!(check_sim_opts(&opts(&["-n", "0"]), &scenario, &catalog()).is_err());
        assert!(check_sim_opts(&opts(&["-i", "1"]), &scenario, &catalog()).is_err());
        assert!(check_sim_opts(&opts(&["-g", "-r", "500"]), &scenario, &catalog()).is_err());
        assert!(check_sim_opts(&opts(&[]), &scenario, &RaceCatalog::default()).is_err());
    }

    #[test]
    fn test_invalid_scenario() {
        let scenario = Scenario {
            max_health: 0.0,
            ..Scenario::default()
        };
        assert!(check_sim_opts(&opts(&[]), &scenario, &catalog()).is_err());
    }
}
