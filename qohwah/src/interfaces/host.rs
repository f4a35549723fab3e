use crate::core::race_catalog::Pose;
use crate::interfaces::gui_interface::{RgbaColor, ScreenRect, TextLabel};
use crate::pre::read_config::Key;
use helpers::geometry::Point3d;

/// Model every race vehicle is spawned with.
pub const RACE_VEHICLE_MODEL: &str = "Sultan";

/// Opaque handle of a vehicle spawned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleHandle(pub u32);

/// Opaque handle of a map blip created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlipHandle(pub u32);

/// * `name` - Label shown for the blip on the map
/// * `color` - Blip color
/// * `show_route` - Whether the host draws the GPS route toward the blip
#[derive(Debug, Clone, PartialEq)]
pub struct BlipStyle {
    pub name: String,
    pub color: RgbaColor,
    pub show_route: bool,
}

impl BlipStyle {
    pub fn race_finish() -> BlipStyle {
        BlipStyle {
            name: String::from("Race Finish"),
            color: RgbaColor::opaque(93, 182, 229),
            show_route: true,
        }
    }
}

/// Host is the game engine as seen by the mod: the local player, world entities, on-screen
/// drawing and raw input. All calls happen from within the host's frame callback.
pub trait Host {
    // player
    fn player_position(&self) -> Point3d;
    fn set_player_pose(&mut self, pose: &Pose);
    fn player_health(&self) -> f64;
    fn player_max_health(&self) -> f64;
    fn set_player_health(&mut self, health: f64);
    fn set_player_armor(&mut self, armor: f64);
    fn is_player_dead(&self) -> bool;
    fn resurrect_player(&mut self);
    fn clear_player_tasks(&mut self);

    // world
    /// spawn_vehicle returns None if the model could not be loaded in time.
    fn spawn_vehicle(&mut self, model: &str, pose: &Pose) -> Option<VehicleHandle>;
    fn delete_vehicle(&mut self, vehicle: VehicleHandle);
    fn set_player_into_vehicle(&mut self, vehicle: VehicleHandle);
    fn create_blip(&mut self, at: &Point3d, style: &BlipStyle) -> BlipHandle;
    fn delete_blip(&mut self, blip: BlipHandle);

    // drawing, only valid for the current frame
    fn draw_marker(&mut self, at: &Point3d, scale: f64, color: RgbaColor);
    fn draw_rect(&mut self, rect: &ScreenRect, color: RgbaColor);
    fn draw_text(&mut self, label: &TextLabel);
    fn show_subtitle(&mut self, text: &str, duration_ms: u32);

    // timing and input
    /// last_frame_time returns the duration of the previous frame in seconds.
    fn last_frame_time(&self) -> f64;
    fn is_key_pressed(&self, key: &Key) -> bool;
}

/// MenuUi is the host's menu widget. Instead of activation callbacks, the activated item index
/// is returned by `process`, which must be called once per frame.
pub trait MenuUi {
    fn set_title(&mut self, title: &str, subtitle: &str);
    fn add_item(&mut self, label: &str);
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    fn process(&mut self) -> Option<usize>;
}
