//! Tunable rendering options.

use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::errors::{read_json, LoadError};
use crate::policy;

/// Options that adjust presentation without changing the sizing policy.
///
/// Every field has a default, so an options file only needs the keys it overrides.
///
/// # Examples
/// ```
/// use trussviz::RenderOptions;
///
/// let options: RenderOptions = serde_json::from_str(r#"{"canvas_width": 1200}"#).unwrap();
/// assert_eq!(options.canvas_width, 1200);
/// assert_eq!(options.text_offset, 0.45);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Divisor relating the visual scale to joint marker size.
    pub visualization_scale_multiplier: f64,
    /// Arrow label offset per unit of visual scale.
    pub text_offset: f64,
    /// Width of exported SVG documents in pixels.
    pub canvas_width: u32,
    /// Width reserved for the legend column of exported SVG documents, in pixels.
    pub legend_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            visualization_scale_multiplier: 0.6,
            text_offset: policy::TEXT_OFFSET,
            canvas_width: 900,
            legend_width: 190,
        }
    }
}

impl RenderOptions {
    /// Read options from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file is missing, unreadable or malformed, and
    /// [`LoadError::Invalid`] when a value fails [`RenderOptions::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let options: Self = read_json(path)?;
        options.validate().map_err(|reason| LoadError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(options)
    }

    /// Check that every value can be rendered.
    ///
    /// The scale multiplier must be positive and finite, the text offset finite, and the
    /// legend column narrower than the canvas.
    ///
    /// # Errors
    ///
    /// Returns a description of the first out-of-range value.
    ///
    /// # Examples
    /// ```
    /// use trussviz::RenderOptions;
    ///
    /// let options = RenderOptions {
    ///     visualization_scale_multiplier: 0.0,
    ///     ..RenderOptions::default()
    /// };
    /// assert!(options.validate().is_err());
    /// assert!(RenderOptions::default().validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if !is_positive(self.visualization_scale_multiplier) {
            return Err(format!(
                "visualization_scale_multiplier must be positive and finite, got {}",
                self.visualization_scale_multiplier
            ));
        }
        if !self.text_offset.is_finite() {
            return Err(format!("text_offset must be finite, got {}", self.text_offset));
        }
        if self.legend_width >= self.canvas_width {
            return Err(format!(
                "legend_width {} must be below canvas_width {}",
                self.legend_width, self.canvas_width
            ));
        }
        Ok(())
    }

    /// Copy of these options with every out-of-range value reset to its default.
    ///
    /// Options built in code skip [`RenderOptions::load`], so rendering and export go
    /// through this before using them.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut options = self.clone();
        if !is_positive(options.visualization_scale_multiplier) {
            warn!(
                "visualization_scale_multiplier {} is unusable, using {}",
                options.visualization_scale_multiplier, defaults.visualization_scale_multiplier
            );
            options.visualization_scale_multiplier = defaults.visualization_scale_multiplier;
        }
        if !options.text_offset.is_finite() {
            warn!(
                "text_offset {} is unusable, using {}",
                options.text_offset, defaults.text_offset
            );
            options.text_offset = defaults.text_offset;
        }
        if options.legend_width >= options.canvas_width {
            warn!(
                "legend_width {} leaves no room on a {} px canvas, using {}x{}",
                options.legend_width,
                options.canvas_width,
                defaults.legend_width,
                defaults.canvas_width
            );
            options.canvas_width = defaults.canvas_width;
            options.legend_width = defaults.legend_width;
        }
        options
    }
}

/// Whether `value` is a usable positive divisor.
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
