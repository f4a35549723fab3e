use crate::core::race_catalog::Pose;
use crate::interfaces::gui_interface::{DrawCmd, HudFrame, MapState, RgbaColor, ScreenRect, TextLabel};
use crate::interfaces::host::{BlipHandle, BlipStyle, Host, VehicleHandle};
use crate::pre::read_config::Key;
use crate::pre::read_scenario::Scenario;
use helpers::geometry::Point3d;
use std::collections::{BTreeMap, HashSet};

/// SimSubtitle is a subtitle together with the frame it was shown in.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSubtitle {
    pub frame_idx: u32,
    pub text: String,
    pub duration_ms: u32,
}

/// SimHost is a minimal stand-in for the game: a single player that drives straight toward the
/// current route target, a table of vehicles and blips, a fixed frame time and scripted events
/// (deaths, key presses, pushes) taken from a scenario. Everything drawn during a frame is
/// collected and handed out as a HudFrame by `end_frame`.
#[derive(Debug)]
pub struct SimHost {
    scenario: Scenario,
    frame_time: f64,
    frame_idx: u32,
    // player
    player: Pose,
    health: f64,
    armor: f64,
    dead: bool,
    occupied_vehicle: Option<VehicleHandle>,
    no_task_clears: u32,
    // world
    vehicles: BTreeMap<VehicleHandle, Pose>,
    blips: BTreeMap<BlipHandle, (Point3d, BlipStyle)>,
    next_handle: u32,
    no_vehicles_spawned: u32,
    route_target: Option<Point3d>,
    // input and output
    pressed_keys: HashSet<Key>,
    subtitles: Vec<SimSubtitle>,
    draw_cmds: Vec<DrawCmd>,
}

impl SimHost {
    pub fn new(scenario: Scenario, frame_time: f64) -> SimHost {
        let health = scenario.max_health;

        SimHost {
            scenario,
            frame_time,
            frame_idx: 0,
            player: Pose::default(),
            health,
            armor: 0.0,
            dead: false,
            occupied_vehicle: None,
            no_task_clears: 0,
            vehicles: BTreeMap::new(),
            blips: BTreeMap::new(),
            next_handle: 1,
            no_vehicles_spawned: 0,
            route_target: None,
            pressed_keys: HashSet::new(),
            subtitles: vec![],
            draw_cmds: vec![],
        }
    }

    // ---------------------------------------------------------------------------------------------
    // FRAME HANDLING ------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// begin_frame applies the scripted events of the given frame and lets the simulated driver
    /// move for one frame time.
    pub fn begin_frame(&mut self, frame_idx: u32) {
        self.frame_idx = frame_idx;
        self.draw_cmds.clear();

        if self.scenario.death_frames.contains(&frame_idx) {
            self.kill_player();
        }

        let pushes: Vec<_> = self
            .scenario
            .pushes
            .iter()
            .filter(|push| push.frame == frame_idx)
            .cloned()
            .collect();
        for push in pushes {
            self.move_player(Point3d::new(
                self.player.position.x + push.dx,
                self.player.position.y + push.dy,
                self.player.position.z + push.dz,
            ));
        }

        self.pressed_keys = self
            .scenario
            .key_presses
            .iter()
            .filter(|press| {
                press.frame <= frame_idx && frame_idx < press.frame.saturating_add(press.hold_frames)
            })
            .map(|press| Key::new(&press.key))
            .collect();

        self.drive();
    }

    /// end_frame returns everything that was drawn in the current frame together with a map
    /// snapshot.
    pub fn end_frame(&mut self, menu: Option<Vec<String>>) -> HudFrame {
        let markers = self
            .draw_cmds
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Marker { at, .. } => Some(*at),
                _ => None,
            })
            .collect();

        HudFrame {
            frame_idx: self.frame_idx,
            draw_cmds: std::mem::take(&mut self.draw_cmds),
            subtitle: self.get_active_subtitle().map(|subtitle| subtitle.text.clone()),
            menu,
            map: MapState {
                player: self.player.position,
                player_heading: self.player.heading,
                vehicles: self.vehicles.values().map(|pose| pose.position).collect(),
                beacons: self.blips.values().map(|(at, _)| *at).collect(),
                markers,
            },
        }
    }

    pub fn kill_player(&mut self) {
        self.dead = true;
        self.health = 0.0;
    }

    fn drive(&mut self) {
        if self.dead {
            return;
        }
        let target = match self.route_target {
            Some(target) => target,
            None => return,
        };

        let max_step = self.scenario.driver_speed * self.frame_time;
        let direction = self.player.position.vector_to(&target);
        if direction.abs() > f64::EPSILON {
            self.player.heading = direction.heading_deg();
        }
        self.move_player(self.player.position.step_toward(&target, max_step));
    }

    fn move_player(&mut self, position: Point3d) {
        self.player.position = position;

        if let Some(vehicle) = self.occupied_vehicle {
            if let Some(pose) = self.vehicles.get_mut(&vehicle) {
                *pose = self.player;
            }
        }
    }

    fn next_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    // ---------------------------------------------------------------------------------------------
    // GETTERS -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn get_player_pose(&self) -> Pose {
        self.player
    }

    pub fn get_armor(&self) -> f64 {
        self.armor
    }

    pub fn get_occupied_vehicle(&self) -> Option<VehicleHandle> {
        self.occupied_vehicle
    }

    pub fn get_vehicle_pose(&self, vehicle: VehicleHandle) -> Option<Pose> {
        self.vehicles.get(&vehicle).copied()
    }

    pub fn get_no_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    pub fn get_no_vehicles_spawned(&self) -> u32 {
        self.no_vehicles_spawned
    }

    pub fn get_no_blips(&self) -> usize {
        self.blips.len()
    }

    pub fn get_blip_positions(&self) -> Vec<Point3d> {
        self.blips.values().map(|(at, _)| *at).collect()
    }

    pub fn get_no_task_clears(&self) -> u32 {
        self.no_task_clears
    }

    pub fn get_subtitles(&self) -> &[SimSubtitle] {
        &self.subtitles
    }

    pub fn get_draw_cmds(&self) -> &[DrawCmd] {
        &self.draw_cmds
    }

    /// get_active_subtitle returns the latest subtitle if it is still on screen.
    pub fn get_active_subtitle(&self) -> Option<&SimSubtitle> {
        let subtitle = self.subtitles.last()?;
        let t_shown_ms =
            (self.frame_idx.saturating_sub(subtitle.frame_idx)) as f64 * self.frame_time * 1000.0;

        if t_shown_ms < subtitle.duration_ms as f64 {
            Some(subtitle)
        } else {
            None
        }
    }
}

impl Host for SimHost {
    fn player_position(&self) -> Point3d {
        self.player.position
    }

    fn set_player_pose(&mut self, pose: &Pose) {
        // teleporting leaves the current vehicle behind
        self.occupied_vehicle = None;
        self.player = *pose;
    }

    fn player_health(&self) -> f64 {
        self.health
    }

    fn player_max_health(&self) -> f64 {
        self.scenario.max_health
    }

    fn set_player_health(&mut self, health: f64) {
        self.health = health.min(self.scenario.max_health);
    }

    fn set_player_armor(&mut self, armor: f64) {
        self.armor = armor;
    }

    fn is_player_dead(&self) -> bool {
        self.dead
    }

    fn resurrect_player(&mut self) {
        self.dead = false;
        self.health = self.scenario.max_health;
    }

    fn clear_player_tasks(&mut self) {
        self.no_task_clears += 1;
    }

    fn spawn_vehicle(&mut self, _model: &str, pose: &Pose) -> Option<VehicleHandle> {
        if !self.scenario.vehicle_available {
            return None;
        }

        let vehicle = VehicleHandle(self.next_handle());
        self.vehicles.insert(vehicle, *pose);
        self.no_vehicles_spawned += 1;
        Some(vehicle)
    }

    fn delete_vehicle(&mut self, vehicle: VehicleHandle) {
        self.vehicles.remove(&vehicle);

        if self.occupied_vehicle == Some(vehicle) {
            self.occupied_vehicle = None;
        }
    }

    fn set_player_into_vehicle(&mut self, vehicle: VehicleHandle) {
        if let Some(pose) = self.vehicles.get(&vehicle) {
            self.player = *pose;
            self.occupied_vehicle = Some(vehicle);
        }
    }

    fn create_blip(&mut self, at: &Point3d, style: &BlipStyle) -> BlipHandle {
        let blip = BlipHandle(self.next_handle());
        self.blips.insert(blip, (*at, style.clone()));

        if style.show_route {
            self.route_target = Some(*at);
        }
        blip
    }

    fn delete_blip(&mut self, blip: BlipHandle) {
        self.blips.remove(&blip);
    }

    fn draw_marker(&mut self, at: &Point3d, scale: f64, color: RgbaColor) {
        self.draw_cmds.push(DrawCmd::Marker {
            at: *at,
            scale,
            color,
        });
    }

    fn draw_rect(&mut self, rect: &ScreenRect, color: RgbaColor) {
        self.draw_cmds.push(DrawCmd::Rect { rect: *rect, color });
    }

    fn draw_text(&mut self, label: &TextLabel) {
        self.draw_cmds.push(DrawCmd::Text(label.clone()));
    }

    fn show_subtitle(&mut self, text: &str, duration_ms: u32) {
        self.subtitles.push(SimSubtitle {
            frame_idx: self.frame_idx,
            text: text.to_owned(),
            duration_ms,
        });
    }

    fn last_frame_time(&self) -> f64 {
        self.frame_time
    }

    fn is_key_pressed(&self, key: &Key) -> bool {
        self.pressed_keys.contains(key)
    }
}
