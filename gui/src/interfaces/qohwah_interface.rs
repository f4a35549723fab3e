use flume::Receiver;
use qohwah::interfaces::gui_interface::HudFrame;

#[derive(Debug)]
pub struct QohwahInterface {
    pub rx: Receiver<HudFrame>,
    pub hud_frame: HudFrame,
    pub no_frames_received: u64,
}

impl QohwahInterface {
    pub fn new(rx: Receiver<HudFrame>) -> QohwahInterface {
        QohwahInterface {
            rx,
            hud_frame: Default::default(),
            no_frames_received: 0,
        }
    }

    pub fn update(&mut self) {
        // loop to obtain the latest HUD frame in the channel, older frames are outdated anyway
        let mut message = None;

        while let Ok(hud_frame) = self.rx.try_recv() {
            message = Some(hud_frame);
            self.no_frames_received += 1;
        }

        // update data stored in the interface (those are used within the GUI)
        if let Some(hud_frame) = message {
            self.hud_frame = hud_frame;
        }
    }

    /// is_connected returns false as soon as the session thread has finished.
    pub fn is_connected(&self) -> bool {
        !self.rx.is_disconnected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_latest_frame() {
        let (tx, rx) = flume::unbounded();
        let mut interface = QohwahInterface::new(rx);

        for frame_idx in [3, 7, 11].iter() {
            tx.send(HudFrame {
                frame_idx: *frame_idx,
                ..Default::default()
            })
            .unwrap();
        }
        interface.update();
        assert_eq!(interface.hud_frame.frame_idx, 11);
        assert_eq!(interface.no_frames_received, 3);

        // nothing new -> frame is kept
        interface.update();
        assert_eq!(interface.hud_frame.frame_idx, 11);
        assert!(interface.is_connected());

        drop(tx);
        assert!(!interface.is_connected());
    }
}
