//! Geometry and view configuration.
//!
//! [`Metrics`] holds unscaled design dimensions; every layout computation
//! multiplies them by the view scale. [`ViewConfig`] adds the per-session
//! parameters.

/// Unscaled picker geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metrics {
    /// Width of an entry; also the height of its icon area.
    pub entry_dimension: u32,
    pub entry_icon_dimension: u32,
    pub entry_label_space: u32,
    pub entry_label_height: u32,
    /// Horizontal gap between neighbouring entries.
    pub entry_space: u32,
    pub selector_width: u32,
    pub selector_background_dimension: u32,
    pub selector_button_width: u32,
    pub selector_button_height: u32,
    pub scroll_button_dimension: u32,
    pub scroll_button_space: u32,
    pub action_button_space: u32,
    /// Intro fade and slide length in ticks.
    pub intro_duration: u64,
    /// Horizontal distance the entry row slides in by, in pixels.
    pub intro_slide: u32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            entry_dimension: 144,
            entry_icon_dimension: 128,
            entry_label_space: 4,
            entry_label_height: 13,
            entry_space: 8,
            selector_width: 144,
            selector_background_dimension: 144,
            selector_button_width: 144,
            selector_button_height: 40,
            scroll_button_dimension: 40,
            scroll_button_space: 40,
            action_button_space: 36,
            intro_duration: 25,
            intro_slide: 35,
        }
    }
}

impl Metrics {
    /// Inset of the icon inside its entry.
    #[must_use]
    pub const fn entry_icon_space(&self) -> u32 {
        (self.entry_dimension - self.entry_icon_dimension) / 2
    }

    #[must_use]
    pub const fn entry_width(&self) -> u32 {
        self.entry_dimension
    }

    #[must_use]
    pub const fn entry_height(&self) -> u32 {
        self.entry_dimension + self.entry_label_space + self.entry_label_height
    }

    /// Gap between the selector background and its button.
    #[must_use]
    pub const fn selector_button_space(&self) -> u32 {
        self.entry_label_space + self.entry_label_height + 3
    }

    #[must_use]
    pub const fn selector_height(&self) -> u32 {
        self.selector_background_dimension
            + self.selector_button_space()
            + self.selector_button_height
    }

    /// Horizontal stride from one entry to the next.
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.entry_dimension + self.entry_space
    }
}

/// Parameters for one picker view instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewConfig {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
    /// UI scale factor, at least 1.
    pub scale: u32,
    pub metrics: Metrics,
    /// Play the intro fade. Hosts clear this after the first view of a boot
    /// session so refreshed pickers appear immediately.
    pub play_intro: bool,
    /// Tick at which the intro starts.
    pub start_time: u64,
    /// Ticks of inactivity before the selected entry is narrated.
    pub voice_over_idle_ticks: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            scale: 1,
            metrics: Metrics::default(),
            play_intro: true,
            start_time: 0,
            voice_over_idle_ticks: 42,
        }
    }
}

impl ViewConfig {
    /// Default configuration for a screen of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn without_intro(mut self) -> Self {
        self.play_intro = false;
        self
    }

    /// Scale an unscaled dimension.
    #[must_use]
    pub const fn scaled(&self, value: u32) -> u32 {
        value * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metrics_derived_values() {
        let m = Metrics::default();
        assert_eq!(m.entry_icon_space(), 8);
        assert_eq!(m.entry_height(), 161);
        assert_eq!(m.selector_button_space(), 20);
        assert_eq!(m.selector_height(), 204);
        assert_eq!(m.slot(), 152);
    }

    #[test]
    fn test_scale_never_zero() {
        let cfg = ViewConfig::new(800, 600).with_scale(0);
        assert_eq!(cfg.scale, 1);
        assert_eq!(cfg.with_scale(2).scaled(40), 80);
    }

    #[test]
    fn test_without_intro() {
        assert!(ViewConfig::default().play_intro);
        assert!(!ViewConfig::default().without_intro().play_intro);
    }
}
