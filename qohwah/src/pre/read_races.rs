use crate::core::race_catalog::{Pose, RaceDef};
use crate::error::{PersistError, PersistResult};
use crate::pre::read_text::read_text;
use std::path::Path;

/// Number of `|` separated fields of a race line: name, start x/y/z/yaw, finish x/y/z/yaw.
pub const NO_RACE_FIELDS: usize = 9;

/// parse_races decodes the content of a race file. Lines with a field count other than nine are
/// skipped, numeric fields that cannot be parsed are taken as 0.0.
pub fn parse_races(content: &str) -> Vec<RaceDef> {
    content.lines().filter_map(parse_race_line).collect()
}

/// parse_race_line decodes a single race line or returns None if it does not have the required
/// number of fields.
pub fn parse_race_line(line: &str) -> Option<RaceDef> {
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    let fields: Vec<&str> = line.split('|').collect();

    if fields.len() != NO_RACE_FIELDS {
        return None;
    }

    let vals: Vec<f64> = fields[1..].iter().map(|field| parse_float_or_zero(field)).collect();

    Some(RaceDef {
        name: fields[0].to_owned(),
        start: Pose::new(vals[0], vals[1], vals[2], vals[3]),
        finish: Pose::new(vals[4], vals[5], vals[6], vals[7]),
    })
}

fn parse_float_or_zero(field: &str) -> f64 {
    match field.trim().parse::<f64>() {
        Ok(val) if val.is_finite() => val,
        _ => 0.0,
    }
}

/// try_read_races reads and decodes the race file.
pub fn try_read_races(filepath: &Path) -> PersistResult<Vec<RaceDef>> {
    let content = read_text(filepath)?;
    Ok(parse_races(&content))
}

/// read_races reads the race file on a best-effort basis: a missing or unreadable file results in
/// an empty race list.
pub fn read_races(filepath: &Path) -> Vec<RaceDef> {
    match try_read_races(filepath) {
        Ok(races) => {
            tracing::info!(path = %filepath.display(), no_races = races.len(), "Loaded races");
            races
        }
        Err(PersistError::Missing(_)) => {
            tracing::info!(path = %filepath.display(), "No race file found, race list is empty");
            vec![]
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read race file, race list is empty");
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_ulps_eq;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_parse_race_line_field_order() {
        let race = parse_race_line("Airport Dash|1.5|-2|3|90|10|20|30.25|180").unwrap();

        assert_eq!(race.name, "Airport Dash");
        assert_ulps_eq!(race.start.position.x, 1.5);
        assert_ulps_eq!(race.start.position.y, -2.0);
        assert_ulps_eq!(race.start.position.z, 3.0);
        assert_ulps_eq!(race.start.heading, 90.0);
        assert_ulps_eq!(race.finish.position.x, 10.0);
        assert_ulps_eq!(race.finish.position.y, 20.0);
        assert_ulps_eq!(race.finish.position.z, 30.25);
        assert_ulps_eq!(race.finish.heading, 180.0);
    }

    #[test]
    fn test_parse_race_line_bad_numbers_default_to_zero() {
        let race = parse_race_line("Broken|abc|2||4|x|6|7e|NaN").unwrap();

        assert_ulps_eq!(race.start.position.x, 0.0);
        assert_ulps_eq!(race.start.position.y, 2.0);
        assert_ulps_eq!(race.start.position.z, 0.0);
        assert_ulps_eq!(race.start.heading, 4.0);
        assert_ulps_eq!(race.finish.position.x, 0.0);
        assert_ulps_eq!(race.finish.position.y, 6.0);
        assert_ulps_eq!(race.finish.position.z, 0.0);
        assert_ulps_eq!(race.finish.heading, 0.0);
    }

    #[test]
    fn test_parse_race_line_wrong_field_count() {
        assert!(parse_race_line("").is_none());
        assert!(parse_race_line("Short|1|2|3|4|5|6|7").is_none());
        assert!(parse_race_line("Long|1|2|3|4|5|6|7|8|9").is_none());
    }

    #[test]
    fn test_parse_races_skips_malformed_lines() {
        let content = "A|0|0|0|0|100|0|0|0\r\n\
                       not a race\r\n\
                       B|1|1|1|1|2|2|2|2\r\n\
                       C|1|2\n";
        let races = parse_races(content);

        assert_eq!(races.len(), 2);
        assert_eq!(races[0].name, "A");
        assert_eq!(races[1].name, "B");
        assert_ulps_eq!(races[1].finish.heading, 2.0);
    }

    #[test]
    fn test_read_races_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_races(&dir.path().join("QohwahRaces.ini")).is_empty());
        assert!(matches!(
            try_read_races(&dir.path().join("QohwahRaces.ini")),
            Err(PersistError::Missing(_))
        ));
    }

    #[test]
    fn test_read_races_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Docks|5|5|0|0|-5|-5|0|45\nPier|0|0|0|0|0|50|0|0\n").unwrap();

        let races = read_races(file.path());
        assert_eq!(races.len(), 2);
        assert_eq!(races[1].name, "Pier");
        assert_ulps_eq!(races[1].course_length(), 50.0);
    }

    #[test]
    fn test_read_races_with_bom_and_windows_1252_name() {
        let dir = tempfile::tempdir().unwrap();
        let filepath = dir.path().join("QohwahRaces.ini");
        fs::write(
            &filepath,
            b"\xef\xbb\xbfDocks|0|0|0|0|1|1|1|0\r\nCaf\xe9 Run|0|0|0|0|2|2|2|0\r\nPier|0|0|0|0|3|3|3|0\r\n",
        )
        .unwrap();

        let races = read_races(&filepath);
        assert_eq!(races.len(), 3);
        assert_eq!(races[0].name, "Docks");
        assert!(races[1].name.starts_with("Caf"));
        assert_eq!(races[2].name, "Pier");
    }
}
