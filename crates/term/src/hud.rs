//! Side panel and overlays drawn next to the board.
//!
//! Pure: writes into a framebuffer, no I/O.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::GameStatus;

/// Columns the HUD needs to the right of the board.
pub const HUD_WIDTH: u16 = 22;

/// Presence status as the HUD shows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceView {
    pub connected: bool,
    pub users: usize,
    pub last_notification: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    /// First column of the panel.
    pub x: u16,
}

impl Hud {
    /// HUD occupying the rightmost [`HUD_WIDTH`] columns of `fb`.
    pub fn right_of(fb: &FrameBuffer) -> Self {
        Self {
            x: fb.width().saturating_sub(HUD_WIDTH) + 1,
        }
    }

    pub fn draw(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        renderer: &str,
        presence: Option<&PresenceView>,
    ) {
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = CellStyle { dim: true, ..value };

        let x = self.x;
        let clear_w = fb.width().saturating_sub(x);
        let height = fb.height();
        fb.fill_rect(x, 0, clear_w, height, ' ', CellStyle::default());

        let mut y = 0u16;
        fb.put_str(x, y, "BLOCKFALL", label);
        y += 2;

        fb.put_str(x, y, "STATUS", label);
        fb.put_str(x + 8, y, snap.status.as_str(), value);
        y += 1;
        fb.put_str(x, y, "LINES", label);
        fb.put_u32(x + 8, y, snap.lines, value);
        y += 1;
        fb.put_str(x, y, "LEVEL", label);
        fb.put_u32(x + 8, y, snap.level, value);
        y += 1;
        fb.put_str(x, y, "PIECES", label);
        fb.put_u32(x + 8, y, snap.pieces_locked, value);
        y += 1;
        fb.put_str(x, y, "NEXT", label);
        let next = snap.next.map(|k| k.as_str()).unwrap_or("-");
        fb.put_str(x + 8, y, &next.to_ascii_uppercase(), value);
        y += 2;

        fb.put_str(x, y, "RENDER", label);
        fb.put_str(x + 8, y, renderer, value);
        y += 1;
        fb.put_str(x, y, "ONLINE", label);
        match presence {
            Some(p) if p.connected => {
                fb.put_str(x + 8, y, "yes", value);
                y += 1;
                fb.put_str(x, y, "USERS", label);
                fb.put_u32(x + 8, y, p.users as u32, value);
                if let Some(note) = &p.last_notification {
                    y += 1;
                    fb.put_str(x, y, note, dim);
                }
            }
            Some(_) => fb.put_str(x + 8, y, "no", value),
            None => fb.put_str(x + 8, y, "off", dim),
        }
        y += 2;

        for line in ["arrows/wasd move", "up/x rotate", "space drop", "p start/stop", "r reset  q quit"] {
            if y >= height {
                break;
            }
            fb.put_str(x, y, line, dim);
            y += 1;
        }
    }

    /// Centered message over the board area for non-playing states.
    pub fn draw_overlay(&self, fb: &mut FrameBuffer, status: GameStatus) {
        let text = match status {
            GameStatus::Idle => "PRESS P TO START",
            GameStatus::Finish => "GAME OVER",
            GameStatus::Ready | GameStatus::Play => return,
        };
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let board_w = self.x.saturating_sub(1);
        let text_w = text.chars().count() as u16;
        let x = board_w.saturating_sub(text_w) / 2;
        fb.put_str(x, fb.height() / 2, text, style);
    }
}
