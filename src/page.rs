use crate::foundation::core::Viewport;

/// CSS-style positioning scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Fixed,
}

/// A length resolved against the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    Px(f64),
    /// Percent of viewport width.
    Vw(f64),
    /// Percent of viewport height.
    Vh(f64),
}

impl Length {
    pub fn resolve(self, viewport: Viewport) -> f64 {
        match self {
            Length::Px(v) => v,
            Length::Vw(v) => v / 100.0 * f64::from(viewport.width),
            Length::Vh(v) => v / 100.0 * f64::from(viewport.height),
        }
    }
}

/// Style of the canvas layer that frames are drawn into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasLayer {
    pub position: Position,
    pub top: Length,
    pub left: Length,
    pub width: Length,
    pub height: Length,
    pub z_index: i32,
}

impl CanvasLayer {
    /// Fixed, full-viewport, stacked behind the page content.
    pub fn behind_viewport() -> Self {
        Self {
            position: Position::Fixed,
            top: Length::Px(0.0),
            left: Length::Px(0.0),
            width: Length::Vw(100.0),
            height: Length::Vh(100.0),
            z_index: -1,
        }
    }
}

/// The element whose scroll extent drives playback.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Container {
    /// Offset of the container's top edge from the top of the document, in px.
    pub top: f64,
    pub position: Position,
    pub height: Length,
    pub canvas: Option<CanvasLayer>,
}

impl Container {
    pub fn new(top: f64, height: Length) -> Self {
        Self {
            top,
            position: Position::Static,
            height,
            canvas: None,
        }
    }

    pub fn height_px(&self, viewport: Viewport) -> f64 {
        self.height.resolve(viewport).max(0.0)
    }

    pub fn bottom_px(&self, viewport: Viewport) -> f64 {
        self.top + self.height_px(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_resolve_against_viewport() {
        let vp = Viewport::new(1280, 720).unwrap();
        assert_eq!(Length::Px(12.0).resolve(vp), 12.0);
        assert_eq!(Length::Vw(50.0).resolve(vp), 640.0);
        assert_eq!(Length::Vh(300.0).resolve(vp), 2160.0);
    }

    #[test]
    fn container_bottom_tracks_viewport_height() {
        let c = Container::new(100.0, Length::Vh(300.0));
        assert_eq!(c.bottom_px(Viewport::new(10, 200).unwrap()), 700.0);
        assert_eq!(c.bottom_px(Viewport::new(10, 400).unwrap()), 1300.0);
    }

    #[test]
    fn canvas_layer_sits_behind_content() {
        let layer = CanvasLayer::behind_viewport();
        assert_eq!(layer.position, Position::Fixed);
        assert_eq!(layer.z_index, -1);
        assert_eq!(layer.width, Length::Vw(100.0));
        assert_eq!(layer.height, Length::Vh(100.0));
    }

    #[test]
    fn length_serde_shape() {
        let json = serde_json::to_string(&Length::Vh(300.0)).unwrap();
        assert_eq!(json, r#"{"vh":300.0}"#);
        let back: Length = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Length::Vh(300.0));
    }
}
