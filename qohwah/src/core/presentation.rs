use crate::core::race_catalog::RaceCatalog;
use crate::core::state_handler::{Phase, StateHandler};
use crate::interfaces::gui_interface::{DrawCmd, RgbaColor, ScreenRect, TextLabel};
use helpers::general::clamp_unit;

pub const MENU_TITLE: &str = "Qohwah";
pub const MENU_SUBTITLE: &str = "Race System";
pub const MENU_STOP_ITEM: &str = "Stop Race";

const HUD_FONT: u8 = 7;

// health bar geometry (normalized screen coordinates, center based)
const BAR_X: f64 = 0.5;
const BAR_Y: f64 = 0.94;
const BAR_WIDTH: f64 = 0.1;
const BAR_HEIGHT: f64 = 0.03;

const COLOR_BAR_BACKGROUND: RgbaColor = RgbaColor::new(50, 50, 50, 200);
const COLOR_BAR_HEALTH: RgbaColor = RgbaColor::opaque(0, 200, 0);
const COLOR_WHITE: RgbaColor = RgbaColor::opaque(255, 255, 255);
const COLOR_WINS: RgbaColor = RgbaColor::opaque(255, 165, 0);
const COLOR_PROGRESS: RgbaColor = RgbaColor::opaque(0, 255, 100);
const COLOR_COUNTDOWN: RgbaColor = RgbaColor::opaque(255, 0, 0);
const COLOR_FINISH_MARKER: RgbaColor = RgbaColor::opaque(0, 0, 255);

const FINISH_MARKER_SCALE: f64 = 2.0;

/// PlayerVitals contains the player values shown on the HUD.
#[derive(Debug, Clone, Copy)]
pub struct PlayerVitals {
    pub health: f64,
    pub max_health: f64,
}

impl PlayerVitals {
    /// health_frac returns health / max_health restricted to [0.0, 1.0] (0.0 for a non-positive
    /// max health).
    pub fn health_frac(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        clamp_unit(self.health / self.max_health)
    }
}

/// build_hud derives the draw commands of the current frame from the race state. It has no side
/// effects, the caller replays the commands onto the host.
pub fn build_hud(
    sh: &StateHandler,
    catalog: &RaceCatalog,
    wins: i32,
    vitals: &PlayerVitals,
) -> Vec<DrawCmd> {
    let mut draw_cmds = build_health_bar(vitals.health_frac());

    draw_cmds.push(DrawCmd::Text(hud_text(
        format!("Wins: {}", wins),
        0.05,
        1.0,
        COLOR_WINS,
    )));

    let race = match sh.get_current_race_idx().and_then(|idx| catalog.get(idx)) {
        Some(race) if sh.get_phase().is_active() => race,
        _ => return draw_cmds,
    };

    draw_cmds.push(DrawCmd::Text(hud_text(
        format!("{:.0}%", (sh.get_progress() * 100.0).round()),
        0.11,
        1.0,
        COLOR_PROGRESS,
    )));

    draw_cmds.push(DrawCmd::Marker {
        at: race.finish.position,
        scale: FINISH_MARKER_SCALE,
        color: COLOR_FINISH_MARKER,
    });

    match sh.get_phase() {
        Phase::FinishCountdown => draw_cmds.push(DrawCmd::Text(hud_text(
            format!("{:.0}", sh.get_countdown_remaining().max(0.0).ceil()),
            0.17,
            1.2,
            COLOR_COUNTDOWN,
        ))),
        Phase::DeathCooldown => draw_cmds.push(DrawCmd::Text(hud_text(
            format!("Respawn in {}", sh.get_death_cooldown_frames_remaining()),
            0.17,
            1.0,
            COLOR_COUNTDOWN,
        ))),
        _ => {}
    }

    draw_cmds
}

/// build_health_bar returns the background and the left-aligned foreground of the health bar
/// together with the centred percentage text.
fn build_health_bar(health_frac: f64) -> Vec<DrawCmd> {
    let text_scale = (BAR_HEIGHT * 15.0).min(1.0);

    vec![
        DrawCmd::Rect {
            rect: ScreenRect {
                x: BAR_X,
                y: BAR_Y,
                width: BAR_WIDTH,
                height: BAR_HEIGHT,
            },
            color: COLOR_BAR_BACKGROUND,
        },
        DrawCmd::Rect {
            rect: ScreenRect {
                x: BAR_X - BAR_WIDTH / 2.0 * (1.0 - health_frac),
                y: BAR_Y,
                width: BAR_WIDTH * health_frac,
                height: BAR_HEIGHT,
            },
            color: COLOR_BAR_HEALTH,
        },
        DrawCmd::Text(TextLabel {
            text: format!("{:.0}%", (health_frac * 100.0).round()),
            x: BAR_X,
            y: BAR_Y - text_scale * 0.03,
            scale: text_scale,
            color: COLOR_WHITE,
            font: HUD_FONT,
            centre: true,
            outline: true,
            wrap: Some([BAR_X - BAR_WIDTH / 2.0, BAR_X + BAR_WIDTH / 2.0]),
        }),
    ]
}

fn hud_text(text: String, y: f64, scale: f64, color: RgbaColor) -> TextLabel {
    TextLabel {
        text,
        x: 0.5,
        y,
        scale,
        color,
        font: HUD_FONT,
        centre: true,
        outline: true,
        wrap: None,
    }
}

/// menu_items returns the menu labels: one entry per race in catalog order, followed by the entry
/// that stops the current race.
pub fn menu_items(catalog: &RaceCatalog) -> Vec<String> {
    let mut items: Vec<String> = catalog.names().iter().map(|&name| name.to_owned()).collect();
    items.push(String::from(MENU_STOP_ITEM));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::race_catalog::{Pose, RaceDef};
    use crate::core::state_handler::FrameInput;
    use crate::pre::read_config::Config;
    use approx::assert_ulps_eq;
    use helpers::geometry::Point3d;

    fn catalog() -> RaceCatalog {
        RaceCatalog::new(vec![RaceDef {
            name: String::from("Sprint"),
            start: Pose::new(0.0, 100.0, 0.0, 0.0),
            finish: Pose::new(0.0, 0.0, 0.0, 0.0),
        }])
    }

    fn vitals(health: f64) -> PlayerVitals {
        PlayerVitals {
            health,
            max_health: 200.0,
        }
    }

    fn texts(draw_cmds: &[DrawCmd]) -> Vec<String> {
        draw_cmds
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text(label) => Some(label.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_health_frac_is_clamped() {
        assert_ulps_eq!(vitals(100.0).health_frac(), 0.5);
        assert_ulps_eq!(vitals(250.0).health_frac(), 1.0);
        assert_ulps_eq!(vitals(-10.0).health_frac(), 0.0);
        assert_ulps_eq!(
            PlayerVitals {
                health: 10.0,
                max_health: 0.0
            }
            .health_frac(),
            0.0
        );
    }

    #[test]
    fn test_health_bar_is_left_aligned() {
        let draw_cmds = build_health_bar(0.5);

        match &draw_cmds[1] {
            DrawCmd::Rect { rect, .. } => {
                assert_ulps_eq!(rect.width, 0.05);
                assert_ulps_eq!(rect.x - rect.width / 2.0, BAR_X - BAR_WIDTH / 2.0);
            }
            other => panic!("Expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_health_text_rounds_half_up() {
        assert_eq!(texts(&build_health_bar(vitals(125.0).health_frac())), vec!["63%"]);
        assert_eq!(texts(&build_health_bar(0.005)), vec!["1%"]);
    }

    #[test]
    fn test_idle_hud_shows_health_and_wins_only() {
        let draw_cmds = build_hud(&StateHandler::default(), &catalog(), -2, &vitals(200.0));

        assert_eq!(texts(&draw_cmds), vec!["100%", "Wins: -2"]);
        assert!(!draw_cmds
            .iter()
            .any(|cmd| matches!(cmd, DrawCmd::Marker { .. })));
    }

    #[test]
    fn test_racing_hud_shows_progress_and_marker() {
        let catalog = catalog();
        let mut sh = StateHandler::default();
        sh.select_race(0, &catalog);
        sh.update(
            &FrameInput {
                player_position: Point3d::new(0.0, 60.0, 0.0),
                player_dead: false,
                frame_time: 0.016,
            },
            &catalog,
            &Config::default(),
        );
        let draw_cmds = build_hud(&sh, &catalog, 3, &vitals(150.0));

        assert_eq!(texts(&draw_cmds), vec!["75%", "Wins: 3", "40%"]);
        assert!(draw_cmds.iter().any(|cmd| matches!(
            cmd,
            DrawCmd::Marker { at, .. } if *at == Point3d::new(0.0, 0.0, 0.0)
        )));
    }

    #[test]
    fn test_countdown_hud_shows_ceiled_seconds() {
        let catalog = catalog();
        let mut sh = StateHandler::default();
        sh.select_race(0, &catalog);
        let input = FrameInput {
            player_position: Point3d::new(0.0, 1.0, 0.0),
            player_dead: false,
            frame_time: 0.3,
        };
        sh.update(&input, &catalog, &Config::default());
        sh.update(&input, &catalog, &Config::default());

        let draw_cmds = build_hud(&sh, &catalog, 0, &vitals(200.0));
        assert_eq!(texts(&draw_cmds).last().unwrap(), "10");
    }

    #[test]
    fn test_menu_items_follow_catalog_order() {
        assert_eq!(menu_items(&catalog()), vec!["Sprint", "Stop Race"]);
    }
}
