use serde::{Deserialize, Serialize};

use crate::core::Viewport;

/// Displayed rectangle of a chart surface in client coordinates.
///
/// The displayed size may differ from the logical viewport when the host
/// scales the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle showing `viewport` unscaled at the client origin.
    #[must_use]
    pub fn unscaled(viewport: Viewport) -> Self {
        Self::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        )
    }

    fn is_usable(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Maps a client point into logical viewport pixels.
    ///
    /// Returns `None` for a zero-sized or non-finite rectangle.
    #[must_use]
    pub fn to_logical(
        self,
        client_x: f64,
        client_y: f64,
        viewport: Viewport,
    ) -> Option<(f64, f64)> {
        if !self.is_usable() || !viewport.is_valid() {
            return None;
        }
        let scale_x = f64::from(viewport.width) / self.width;
        let scale_y = f64::from(viewport.height) / self.height;
        Some((
            (client_x - self.left) * scale_x,
            (client_y - self.top) * scale_y,
        ))
    }

    /// Inverse of [`Self::to_logical`].
    #[must_use]
    pub fn to_client(self, x: f64, y: f64, viewport: Viewport) -> Option<(f64, f64)> {
        if !self.is_usable() || !viewport.is_valid() {
            return None;
        }
        Some((
            x / f64::from(viewport.width) * self.width + self.left,
            y * (self.height / f64::from(viewport.height)) + self.top,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_size_display_doubles_logical_coordinates() {
        let rect = SurfaceRect::new(10.0, 20.0, 400.0, 200.0);
        let viewport = Viewport::new(800, 400);
        assert_eq!(rect.to_logical(110.0, 70.0, viewport), Some((200.0, 100.0)));
        assert_eq!(rect.to_client(200.0, 100.0, viewport), Some((110.0, 70.0)));
    }

    #[test]
    fn zero_sized_rect_maps_nothing() {
        let rect = SurfaceRect::new(0.0, 0.0, 0.0, 300.0);
        assert!(rect.to_logical(1.0, 1.0, Viewport::new(800, 400)).is_none());
    }
}
