use anyhow::Context;
use serde::Deserialize;
use std::fs::OpenOptions;
use std::path::Path;

/// * `frame` - Frame in which the key goes down
/// * `key` - Key name, e.g. F6
/// * `hold_frames` - Number of frames the key stays pressed
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct KeyPress {
    pub frame: u32,
    pub key: String,
    #[serde(default = "default_hold_frames")]
    pub hold_frames: u32,
}

fn default_hold_frames() -> u32 {
    1
}

/// * `frame` - Frame in which the player is displaced
/// * `dx`, `dy`, `dz` - (m) Displacement, e.g. being pushed off course by traffic
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Push {
    pub frame: u32,
    #[serde(default)]
    pub dx: f64,
    #[serde(default)]
    pub dy: f64,
    #[serde(default)]
    pub dz: f64,
}

/// Scenario describes the simulated player for a headless session.
///
/// * `driver_speed` - (m/s) Speed the simulated driver heads toward the route target with
/// * `max_health` - Maximum player health
/// * `vehicle_available` - If false, the host fails to spawn vehicles
/// * `death_frames` - Frames in which the player dies
/// * `key_presses` - Scripted key presses
/// * `pushes` - Scripted displacements of the player
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Scenario {
    pub driver_speed: f64,
    pub max_health: f64,
    pub vehicle_available: bool,
    pub death_frames: Vec<u32>,
    pub key_presses: Vec<KeyPress>,
    pub pushes: Vec<Push>,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            driver_speed: 30.0,
            max_health: 200.0,
            vehicle_available: true,
            death_frames: vec![],
            key_presses: vec![],
            pushes: vec![],
        }
    }
}

/// read_scenario reads the JSON file and decodes the JSON string into the scenario struct.
pub fn read_scenario(filepath: &Path) -> anyhow::Result<Scenario> {
    // open file
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open scenario file {}!",
            filepath.display()
        ))?;

    // read and parse scenario file content
    let scenario = serde_json::from_reader(&fh).context(format!(
        "Failed to parse scenario file {}!",
        filepath.display()
    ))?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;
    use std::io::Write;

    #[test]
    fn test_read_scenario_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"death_frames": [120], "key_presses": [{{"frame": 5, "key": "F6"}}]}}"#
        )
        .unwrap();

        let scenario = read_scenario(file.path()).unwrap();
        assert_eq!(scenario.death_frames, vec![120]);
        assert_eq!(scenario.key_presses[0].hold_frames, 1);
        assert_ulps_eq!(scenario.driver_speed, 30.0);
        assert!(scenario.vehicle_available);
    }

    #[test]
    fn test_read_scenario_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_scenario(&dir.path().join("missing.json")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(read_scenario(file.path()).is_err());
    }
}
