//! Pointer injection for X11-based systems.
//!
//! Delivers pipeline output to the operating system: absolute cursor
//! warps plus a held left button driven by the debounced pinch flag.
//! Delivery is a blocking call; the pipeline does not accept the next
//! frame until the sink has acknowledged the update.

use crate::{
    error::{AppError, Result},
    pipeline::PointerUpdate,
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{ConnectionExt, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
        xtest::ConnectionExt as _,
    },
    rust_connection::RustConnection,
};

/// Receiver of per-frame pointer updates
pub trait PointerSink {
    /// Deliver one update; returns once the sink has acknowledged it
    ///
    /// # Errors
    ///
    /// Returns `CursorControl` when the underlying device action fails.
    fn deliver(&mut self, update: &PointerUpdate) -> Result<()>;
}

/// Sink that logs updates instead of driving a device, for dry runs and
/// headless sessions
#[derive(Debug, Default)]
pub struct LogSink;

impl PointerSink for LogSink {
    fn deliver(&mut self, update: &PointerUpdate) -> Result<()> {
        info!("pointer ({}, {}) pinch={}", update.x, update.y, update.pinch);
        Ok(())
    }
}

/// Cursor control implementation for X11
pub struct CursorController {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    is_pressed: bool,
}

impl CursorController {
    /// Create a new cursor controller
    ///
    /// # Errors
    ///
    /// Returns `CursorControl` when no X11 display is reachable.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 cursor controller");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::CursorControl(format!("Failed to connect to X11: {e}")))?;

        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::CursorControl("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
            is_pressed: false,
        })
    }

    /// Get screen dimensions
    pub const fn screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    /// Set cursor position (absolute)
    fn set_position(&self, x: i32, y: i32) -> Result<()> {
        let max_x = i32::from(self.screen_width.saturating_sub(1)).min(i32::from(i16::MAX));
        let max_y = i32::from(self.screen_height.saturating_sub(1)).min(i32::from(i16::MAX));
        let x = x.clamp(0, max_x) as i16;
        let y = y.clamp(0, max_y) as i16;

        debug!("Setting cursor position to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::CursorControl(format!("Failed to warp pointer: {e}")))?;

        Ok(())
    }

    /// Press or release the left button to track the pinch flag
    fn set_button(&mut self, pressed: bool) -> Result<()> {
        if pressed == self.is_pressed {
            return Ok(());
        }

        let event_type = if pressed {
            BUTTON_PRESS_EVENT
        } else {
            BUTTON_RELEASE_EVENT
        };

        self.connection
            .xtest_fake_input(event_type, 1, x11rb::CURRENT_TIME, x11rb::NONE, 0, 0, 0)
            .map_err(|e| AppError::CursorControl(format!("Failed to inject button event: {e}")))?;

        self.is_pressed = pressed;
        debug!("Left button {}", if pressed { "pressed" } else { "released" });
        Ok(())
    }
}

impl PointerSink for CursorController {
    fn deliver(&mut self, update: &PointerUpdate) -> Result<()> {
        self.set_position(update.x, update.y)?;
        self.set_button(update.pinch)?;

        self.connection
            .flush()
            .map_err(|e| AppError::CursorControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}
