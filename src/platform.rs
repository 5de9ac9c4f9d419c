//! Services the picker consumes but does not implement.
//!
//! The host supplies boot entry descriptors, image decoding, text
//! rasterization, audio, and platform reset. Everything is expressed as
//! traits so a firmware build and a test harness can plug in their own
//! implementations; [`Platform`] bundles them for the view.

use std::fmt;

use bitflags::bitflags;

use crate::buffer::Image;
use crate::error::Result;

/// Display name of the built-in NVRAM reset tool.
pub const RESET_NVRAM_ENTRY_NAME: &str = "Reset NVRAM";
/// Display name of the built-in UEFI shell tool.
pub const UEFI_SHELL_ENTRY_NAME: &str = "UEFI Shell";

bitflags! {
    /// Boot entry category. Exactly one bit is expected to be set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EntryType: u32 {
        const UNKNOWN = 1 << 0;
        const APPLE_OS = 1 << 1;
        const APPLE_RECOVERY = 1 << 2;
        const APPLE_TIME_MACHINE = 1 << 3;
        const APPLE_FW_UPDATE = 1 << 4;
        const WINDOWS = 1 << 5;
        const EXTERNAL_OS = 1 << 6;
        const EXTERNAL_TOOL = 1 << 7;
        const RESET_NVRAM = 1 << 8;
        const SYSTEM = 1 << 9;
    }
}

bitflags! {
    /// Picker presentation attributes chosen by the user's configuration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PickerAttributes: u32 {
        /// Prefer the icon stored on the entry's volume.
        const USE_VOLUME_ICON = 1 << 0;
        /// Prefer the pre-rendered label stored on the entry's volume.
        const USE_DISK_LABEL_FILE = 1 << 1;
        /// Use themed label images for known entry types.
        const USE_GENERIC_LABEL_IMAGE = 1 << 2;
        /// Never show volume icons for Time Machine entries.
        const HIDE_THEMED_ICONS = 1 << 3;
        /// Accept pointer input.
        const USE_POINTER_CONTROL = 1 << 4;
    }
}

/// A boot option discovered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootEntryInfo {
    pub name: String,
    pub entry_type: EntryType,
    pub is_external: bool,
}

impl BootEntryInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            name: name.into(),
            entry_type,
            is_external: false,
        }
    }

    /// Mark the entry as living on removable media.
    #[must_use]
    pub fn external(mut self) -> Self {
        self.is_external = true;
        self
    }
}

impl fmt::Display for BootEntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Pre-recorded audio cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioFile {
    ShowAuxiliary,
    Reloading,
}

/// Decodes encoded image blobs into bitmaps.
pub trait ImageDecoder {
    /// Decode a volume icon, scaled to exactly `width` x `height`.
    fn decode_icon(&mut self, data: &[u8], scale: u32, width: u32, height: u32) -> Result<Image>;

    /// Decode a pre-rendered disk label.
    fn decode_label(&mut self, data: &[u8], scale: u32, light_background: bool) -> Result<Image>;
}

/// Renders text into a label bitmap.
pub trait TextRasterizer {
    fn render_label(&mut self, text: &str, light_background: bool) -> Result<Image>;
}

/// Domain services of the boot picker.
pub trait PickerContext {
    fn attributes(&self) -> PickerAttributes;

    /// Raw volume icon for an entry, if one exists.
    fn entry_icon(&mut self, entry: &BootEntryInfo) -> Option<Vec<u8>>;

    /// Raw disk label image for an entry, if one exists.
    fn entry_label_image(&mut self, entry: &BootEntryInfo, scale: u32) -> Option<Vec<u8>>;

    fn play_audio(&mut self, file: AudioFile);

    /// Narrate the name of an entry.
    fn play_entry_audio(&mut self, entry: &BootEntryInfo);

    fn voice_over_enabled(&self) -> bool;

    fn toggle_voice_over(&mut self);
}

/// Platform power control. On real hardware neither call returns.
pub trait PlatformReset {
    fn shutdown(&mut self);
    fn warm_reset(&mut self);
}

/// Every service the picker view needs.
pub trait Platform: PickerContext + ImageDecoder + TextRasterizer + PlatformReset {}

impl<T: PickerContext + ImageDecoder + TextRasterizer + PlatformReset> Platform for T {}
