//! Shared fixtures for the picker integration tests.
//!
//! - `MockPlatform`: records every platform side effect and serves canned
//!   volume icons and labels
//! - `scenario_theme`/`scenario_config`: a 640x480 picker whose entry slot
//!   is exactly 100px and whose container shows four slots
//! - `Driver`: ticks a view with a monotonically increasing clock

#![allow(dead_code)] // Shared test helper; not every integration test uses every fixture
#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use std::collections::HashMap;

use canopy::config::{Metrics, ViewConfig};
use canopy::input::{FrameInput, KeyCode, KeyModifiers, Keystroke, PointerSample};
use canopy::picker::{IconKind, IconVariant, LabelKind, Theme};
use canopy::platform::{
    AudioFile, BootEntryInfo, EntryType, ImageDecoder, PickerAttributes, PickerContext,
    PlatformReset, TextRasterizer,
};
use canopy::view::BootPickerView;
use canopy::{DirtyRegion, Error, Image, LogLevel, Pixel, Result};
use canopy_rust as canopy;
use tracing::Level;

/// Route crate logs into `tracing` so failing tests show them.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
    canopy::set_log_callback(|level, message| match level {
        LogLevel::Debug => tracing::debug!("{message}"),
        LogLevel::Info => tracing::info!("{message}"),
        LogLevel::Warn => tracing::warn!("{message}"),
        LogLevel::Error => tracing::error!("{message}"),
    });
}

// ============================================================================
// Platform
// ============================================================================

/// Side effects observed by the mock platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformCall {
    PlayAudio(AudioFile),
    PlayEntryAudio(String),
    ToggleVoiceOver,
    ShutDown,
    WarmReset,
}

/// Encoded blobs are two bytes: width and height of the decoded image.
pub fn encoded(width: u8, height: u8) -> Vec<u8> {
    vec![width, height]
}

#[derive(Debug)]
pub struct MockPlatform {
    pub attributes: PickerAttributes,
    pub voice_over: bool,
    pub volume_icons: HashMap<String, Vec<u8>>,
    pub disk_labels: HashMap<String, Vec<u8>>,
    pub fail_text: bool,
    pub calls: Vec<PlatformCall>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            attributes: PickerAttributes::USE_POINTER_CONTROL,
            voice_over: false,
            volume_icons: HashMap::new(),
            disk_labels: HashMap::new(),
            fail_text: false,
            calls: Vec::new(),
        }
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attributes: PickerAttributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }
}

fn decode(data: &[u8], scale: u32) -> Result<Image> {
    match data {
        [width, height] => Ok(Image::filled(
            u32::from(*width) * scale,
            u32::from(*height) * scale,
            Pixel::rgb(200, 200, 200),
        )),
        _ => Err(Error::DecodeFailed(format!("{} bytes", data.len()))),
    }
}

impl ImageDecoder for MockPlatform {
    fn decode_icon(&mut self, data: &[u8], scale: u32, _width: u32, _height: u32) -> Result<Image> {
        decode(data, scale)
    }

    fn decode_label(&mut self, data: &[u8], scale: u32, _light_background: bool) -> Result<Image> {
        decode(data, scale)
    }
}

impl TextRasterizer for MockPlatform {
    fn render_label(&mut self, text: &str, _light_background: bool) -> Result<Image> {
        if self.fail_text {
            return Err(Error::OutOfResources);
        }
        Ok(Image::filled(text.len() as u32 * 6, 13, Pixel::WHITE))
    }
}

impl PickerContext for MockPlatform {
    fn attributes(&self) -> PickerAttributes {
        self.attributes
    }

    fn entry_icon(&mut self, entry: &BootEntryInfo) -> Option<Vec<u8>> {
        self.volume_icons.get(&entry.name).cloned()
    }

    fn entry_label_image(&mut self, entry: &BootEntryInfo, _scale: u32) -> Option<Vec<u8>> {
        self.disk_labels.get(&entry.name).cloned()
    }

    fn play_audio(&mut self, file: AudioFile) {
        self.calls.push(PlatformCall::PlayAudio(file));
    }

    fn play_entry_audio(&mut self, entry: &BootEntryInfo) {
        self.calls.push(PlatformCall::PlayEntryAudio(entry.name.clone()));
    }

    fn voice_over_enabled(&self) -> bool {
        self.voice_over
    }

    fn toggle_voice_over(&mut self) {
        self.voice_over = !self.voice_over;
        self.calls.push(PlatformCall::ToggleVoiceOver);
    }
}

impl PlatformReset for MockPlatform {
    fn shutdown(&mut self) {
        self.calls.push(PlatformCall::ShutDown);
    }

    fn warm_reset(&mut self) {
        self.calls.push(PlatformCall::WarmReset);
    }
}

// ============================================================================
// Theme and geometry
// ============================================================================

/// Entry slot 100px (90 + 10), icon 74px inset by 8px.
pub fn scenario_metrics() -> Metrics {
    Metrics {
        entry_dimension: 90,
        entry_icon_dimension: 74,
        entry_space: 10,
        selector_width: 90,
        selector_background_dimension: 90,
        selector_button_width: 90,
        ..Metrics::default()
    }
}

/// 640x480, no intro. The container is 400px wide at (120, 182).
pub fn scenario_config() -> ViewConfig {
    ViewConfig::new(640, 480)
        .with_metrics(scenario_metrics())
        .without_intro()
}

fn solid(size: (u32, u32), pixel: Pixel) -> Image {
    Image::filled(size.0, size.1, pixel)
}

/// Complete theme sized for `scale`.
pub fn scenario_theme_scaled(scale: u32) -> Theme {
    let s = |v: u32| v * scale;
    let mut theme = Theme::new(Pixel::rgb(10, 10, 30))
        .with_icon(
            IconKind::Selected,
            IconVariant::Base,
            solid((s(90), s(90)), Pixel::rgb(60, 60, 90)),
        )
        .with_icon(
            IconKind::GenericHdd,
            IconVariant::Base,
            solid((s(74), s(74)), Pixel::rgb(128, 128, 128)),
        );

    let buttons = [
        (IconKind::Selector, (s(90), s(40))),
        (IconKind::LeftScroll, (s(40), s(40))),
        (IconKind::RightScroll, (s(40), s(40))),
        (IconKind::ShutDown, (s(40), s(40))),
        (IconKind::Restart, (s(40), s(40))),
    ];
    for (kind, size) in buttons {
        theme.set_icon(kind, IconVariant::Base, solid(size, Pixel::rgb(180, 180, 180)));
        theme.set_icon(kind, IconVariant::Held, solid(size, Pixel::rgb(90, 90, 90)));
    }

    for kind in [IconKind::Apple, IconKind::Windows, IconKind::Tool] {
        theme.set_icon(kind, IconVariant::Base, solid((s(74), s(74)), Pixel::rgb(0, 120, 255)));
    }
    theme.set_icon(
        IconKind::Apple,
        IconVariant::External,
        solid((s(74), s(74)), Pixel::rgb(255, 120, 0)),
    );
    theme.set_label(LabelKind::Apple, solid((s(40), s(13)), Pixel::WHITE));
    theme
}

pub fn scenario_theme() -> Theme {
    scenario_theme_scaled(1)
}

/// Entry names `"Entry 0"`..`"Entry {n-1}"`, all unknown drives.
pub fn entries(n: usize) -> Vec<BootEntryInfo> {
    (0..n)
        .map(|i| BootEntryInfo::new(format!("Entry {i}"), EntryType::UNKNOWN))
        .collect()
}

/// Build and late-initialize a picker over `list`.
pub fn build_view(
    config: ViewConfig,
    platform: &mut MockPlatform,
    list: Vec<BootEntryInfo>,
    default: usize,
) -> BootPickerView {
    let scale = config.scale;
    let mut view =
        BootPickerView::new(config, scenario_theme_scaled(scale)).expect("theme is complete");
    for (i, entry) in list.into_iter().enumerate() {
        view.add_entry(platform, entry, i == default)
            .expect("entry is valid");
    }
    view.late_initialize();
    view
}

// ============================================================================
// Driving
// ============================================================================

/// Ticks a view with a clock advancing by one per frame.
pub struct Driver {
    pub view: BootPickerView,
    pub platform: MockPlatform,
    pub now: u64,
}

impl Driver {
    pub fn new(view: BootPickerView, platform: MockPlatform) -> Self {
        Self {
            view,
            platform,
            now: 0,
        }
    }

    /// The usual 5-entry picker with entry 0 as default.
    pub fn scenario(n: usize) -> Self {
        let mut platform = MockPlatform::new();
        let view = build_view(scenario_config(), &mut platform, entries(n), 0);
        let mut driver = Self::new(view, platform);
        driver.idle();
        driver
    }

    pub fn tick(&mut self, input: FrameInput) -> Vec<DirtyRegion> {
        let regions = self.view.tick(self.now, input, &mut self.platform).to_vec();
        self.now += 1;
        regions
    }

    pub fn idle(&mut self) -> Vec<DirtyRegion> {
        self.tick(FrameInput::idle())
    }

    pub fn key(&mut self, code: KeyCode) -> Vec<DirtyRegion> {
        self.tick(FrameInput::key(Keystroke::key(code)))
    }

    pub fn key_with(&mut self, modifiers: KeyModifiers, code: KeyCode) -> Vec<DirtyRegion> {
        self.tick(FrameInput::key(Keystroke::new(modifiers, Some(code))))
    }

    /// Press and release at the same point over two ticks.
    pub fn click(&mut self, x: u32, y: u32) {
        self.tick(FrameInput::pointer(PointerSample::press(x, y)));
        self.tick(FrameInput::pointer(PointerSample::release(x, y)));
    }

    /// Centre of the icon of entry `index` on screen.
    pub fn entry_icon_center(&self, index: usize) -> (u32, u32) {
        let rect = self.view.entry_rect(index).expect("entry exists");
        let inset = 8 * i64::from(self.view.scene().scale());
        let half = 37 * i64::from(self.view.scene().scale());
        ((rect.x + inset + half) as u32, (rect.y + inset + half) as u32)
    }
}
