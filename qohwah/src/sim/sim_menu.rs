use crate::interfaces::host::MenuUi;

/// SimMenu is a scripted menu. Item activations are scheduled for a frame and only take effect if
/// the menu is visible in that frame, just as a player can only click into an open menu.
#[derive(Debug, Clone, Default)]
pub struct SimMenu {
    title: String,
    subtitle: String,
    items: Vec<String>,
    visible: bool,
    frame_idx: u32,
    activations: Vec<(u32, usize)>,
}

impl SimMenu {
    pub fn new() -> SimMenu {
        SimMenu::default()
    }

    pub fn set_frame(&mut self, frame_idx: u32) {
        self.frame_idx = frame_idx;
    }

    /// activate_at schedules a click on the item with the given index.
    pub fn activate_at(&mut self, frame_idx: u32, item_idx: usize) {
        self.activations.push((frame_idx, item_idx));
    }

    pub fn get_title(&self) -> (&str, &str) {
        (&self.title, &self.subtitle)
    }

    pub fn get_items(&self) -> &[String] {
        &self.items
    }
}

impl MenuUi for SimMenu {
    fn set_title(&mut self, title: &str, subtitle: &str) {
        self.title = title.to_owned();
        self.subtitle = subtitle.to_owned();
    }

    fn add_item(&mut self, label: &str) {
        self.items.push(label.to_owned());
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn process(&mut self) -> Option<usize> {
        let frame_idx = self.frame_idx;
        let pos = self
            .activations
            .iter()
            .position(|&(frame, _)| frame == frame_idx)?;
        let (_, item_idx) = self.activations.remove(pos);

        if !self.visible || item_idx >= self.items.len() {
            tracing::debug!(frame_idx, item_idx, "Menu activation had no effect");
            return None;
        }
        Some(item_idx)
    }
}
