use crate::pre::read_config::{Config, Key};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    ToggleMenu,
    DecrementWins,
}

/// InputDispatcher maps the configured key bindings to commands. Keys are polled once per frame
/// and a command fires only on the frame a key goes down.
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    bindings: Vec<(Key, InputCommand)>,
    pressed_prev: HashSet<Key>,
}

impl InputDispatcher {
    pub fn new(config: &Config) -> InputDispatcher {
        InputDispatcher {
            bindings: vec![
                (config.menu_toggle_key.clone(), InputCommand::ToggleMenu),
                (
                    config.manual_win_decrement_key.clone(),
                    InputCommand::DecrementWins,
                ),
            ],
            pressed_prev: HashSet::new(),
        }
    }

    /// poll queries the state of all bound keys and returns the commands of the keys that were
    /// pressed since the previous poll.
    pub fn poll<F>(&mut self, is_pressed: F) -> Vec<InputCommand>
    where
        F: Fn(&Key) -> bool,
    {
        let mut pressed_cur = HashSet::with_capacity(self.bindings.len());
        let mut input_cmds = vec![];

        for (key, input_cmd) in self.bindings.iter() {
            if !is_pressed(key) {
                continue;
            }
            if !self.pressed_prev.contains(key) {
                input_cmds.push(*input_cmd);
            }
            pressed_cur.insert(key.clone());
        }

        self.pressed_prev = pressed_cur;
        input_cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_edge_only() {
        let mut dispatcher = InputDispatcher::new(&Config::default());
        let f5 = Key::new("F5");

        assert_eq!(dispatcher.poll(|key| *key == f5), vec![InputCommand::ToggleMenu]);
        assert!(dispatcher.poll(|key| *key == f5).is_empty());
        assert!(dispatcher.poll(|_| false).is_empty());
        assert_eq!(dispatcher.poll(|key| *key == f5), vec![InputCommand::ToggleMenu]);
    }

    #[test]
    fn test_both_bindings() {
        let config = Config {
            manual_win_decrement_key: Key::new("end"),
            ..Config::default()
        };
        let mut dispatcher = InputDispatcher::new(&config);

        assert_eq!(
            dispatcher.poll(|_| true),
            vec![InputCommand::ToggleMenu, InputCommand::DecrementWins]
        );
        assert!(dispatcher.poll(|key| key.name() == "F5").is_empty());
        assert_eq!(
            dispatcher.poll(|key| key.name() == "END"),
            vec![InputCommand::DecrementWins]
        );
    }
}
