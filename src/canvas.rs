//! Final canvas configuration around the drawn layers.

use crate::scene::{AxisStyle, LegendPlacement, Margins, Scene, SceneBuilder};
use crate::style::{palette, Color};

/// Axis titles and colors that read on light and dark hosts alike.
#[must_use]
pub fn axis_style() -> AxisStyle {
    AxisStyle {
        color: palette::AXIS,
        grid: palette::GRID,
        show_grid: true,
        show_zero_line: true,
        tick_font_size: 12.0,
        x_title: "X Position (m)".to_owned(),
        y_title: "Y Position (m)".to_owned(),
    }
}

/// Legend anchored just right of the plot area, at its top.
pub const LEGEND_PLACEMENT: LegendPlacement = LegendPlacement { x: 1.02, y: 0.99 };

/// Plot margins in pixels.
pub const MARGINS: Margins = Margins {
    left: 20.0,
    right: 20.0,
    top: 40.0,
    bottom: 20.0,
};

/// Finalize the layers into a scene: paint order, legend and canvas settings.
#[must_use]
pub fn assemble(builder: SceneBuilder) -> Scene {
    let (drawables, legend) = builder.finish();
    Scene {
        drawables,
        legend,
        axes: axis_style(),
        legend_placement: LEGEND_PLACEMENT,
        aspect_lock: Some(1.0),
        background: Color::TRANSPARENT,
        margins: MARGINS,
    }
}
