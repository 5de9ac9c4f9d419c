//! Boot entry widget and the icon and label resolution chains.

use std::rc::Rc;

use crate::buffer::{ClipRect, FrameBuffer, Image};
use crate::config::ViewConfig;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::input::PointerPhase;
use crate::platform::{
    BootEntryInfo, EntryType, Platform, PickerAttributes, RESET_NVRAM_ENTRY_NAME,
    UEFI_SHELL_ENTRY_NAME,
};
use crate::view::{EventContext, Scene};
use crate::widget::{Bounds, PointerEvent, Widget, WidgetId, is_hit};

use super::theme::{ControlImages, IconKind, IconVariant, LabelKind, Theme};

/// Icon of an entry: shared with the theme, or decoded for this entry alone.
#[derive(Debug)]
pub enum EntryIcon {
    Themed(Rc<Image>),
    Custom(Image),
}

impl EntryIcon {
    #[must_use]
    pub fn image(&self) -> &Image {
        match self {
            Self::Themed(image) => &**image,
            Self::Custom(image) => image,
        }
    }

    /// Whether the icon came from the entry's own volume.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// One selectable boot option in the picker row.
#[derive(Debug)]
pub struct BootEntryWidget {
    icon: EntryIcon,
    label: Image,
    /// Set when the press of the current gesture changed the selection, so
    /// its release does not also boot.
    same_gesture: bool,
}

impl BootEntryWidget {
    /// Resolve icon and label for `entry`.
    ///
    /// Only a label that cannot be produced at all is an error; every icon
    /// source falls back to the generic drive image.
    pub fn build(
        platform: &mut dyn Platform,
        theme: &Theme,
        images: &ControlImages,
        config: &ViewConfig,
        entry: &BootEntryInfo,
    ) -> Result<Self> {
        let attributes = platform.attributes();
        emit_log(
            LogLevel::Debug,
            &format!("picker: adding {entry} with attributes {attributes:?}"),
        );

        let label = resolve_label(platform, theme, config.scale, attributes, entry)?;
        let icon = resolve_icon(platform, theme, images, config, attributes, entry);
        Ok(Self::from_parts(icon, label))
    }

    /// An entry from already resolved images.
    #[must_use]
    pub const fn from_parts(icon: EntryIcon, label: Image) -> Self {
        Self {
            icon,
            label,
            same_gesture: false,
        }
    }

    #[must_use]
    pub const fn icon(&self) -> &EntryIcon {
        &self.icon
    }

    #[must_use]
    pub const fn label(&self) -> &Image {
        &self.label
    }
}

impl Widget for BootEntryWidget {
    fn draw(
        &self,
        _this: WidgetId,
        scene: &Scene,
        screen: &mut FrameBuffer,
        base_x: i64,
        base_y: i64,
        window: ClipRect,
    ) {
        let m = scene.metrics();
        let opacity = scene.opacity();
        let icon_space = i64::from(scene.scaled(m.entry_icon_space()));
        screen.draw_child_image(
            self.icon.image(),
            opacity,
            base_x,
            base_y,
            icon_space,
            icon_space,
            window,
        );

        let label_x =
            (i64::from(scene.scaled(m.entry_dimension)) - i64::from(self.label.width())) / 2;
        let label_y = i64::from(scene.scaled(
            m.entry_dimension + m.entry_label_space + m.entry_label_height,
        )) - i64::from(self.label.height());
        screen.draw_child_image(
            &self.label, opacity, base_x, base_y, label_x, label_y, window,
        );
    }

    fn pointer_event(
        &mut self,
        this: WidgetId,
        cx: &mut EventContext<'_>,
        event: PointerEvent,
    ) -> Option<WidgetId> {
        if event.phase == PointerPhase::Hold || !cx.scene.is_opaque() {
            return Some(this);
        }

        let space = i64::from(cx.scene.scaled(cx.scene.metrics().entry_icon_space()));
        let hit = is_hit(
            self.icon.image(),
            event.offset_x - space,
            event.offset_y - space,
        );

        match event.phase {
            PointerPhase::Down => {
                self.same_gesture = false;
                if hit && cx.scene.selected != Some(this) {
                    cx.scene.change_entry(this);
                    self.same_gesture = true;
                }
            }
            PointerPhase::Up => {
                let selected_by_press = std::mem::take(&mut self.same_gesture);
                if hit && !selected_by_press && cx.scene.selected == Some(this) {
                    cx.scene.commit_boot(false);
                }
            }
            PointerPhase::Hold => {}
        }
        Some(this)
    }
}

impl Scene {
    /// Append an entry widget to the row, before the selector, and recentre
    /// the row. Returns the new entry's id.
    pub(crate) fn insert_entry(
        &mut self,
        widget: BootEntryWidget,
        target: Rc<BootEntryInfo>,
        is_default: bool,
    ) -> Result<WidgetId> {
        let m = *self.metrics();
        let slot = self.slot_width();
        let x = self
            .entries()
            .last()
            .map_or(0, |&prev| self.tree.bounds(prev).x + slot);
        let bounds = Bounds::new(
            x,
            0,
            self.scaled(m.entry_width()),
            self.scaled(m.entry_height()),
        );

        let id = self
            .tree
            .insert_before(self.controls.selector, bounds, Box::new(widget))
            .ok_or_else(|| Error::unsupported("picker layout", "selector is detached"))?;
        self.targets.insert(id, target);

        let count = self.entries().len() as u32;
        let spacing = self.scaled(m.entry_space);
        let half_slot = slot / 2;
        self.tree.update_bounds(self.controls.picker, |b| {
            b.width = (count * (slot as u32)).saturating_sub(spacing);
            b.x -= half_slot;
        });

        if is_default {
            self.select_entry(id, false);
        }
        Ok(id)
    }

    /// Detach every entry, last first. Returns how many were removed.
    pub(crate) fn remove_entries(&mut self) -> usize {
        let entries: Vec<WidgetId> = self.entries().iter().rev().copied().collect();
        for &entry in &entries {
            self.tree.remove(entry);
            self.targets.remove(entry);
        }
        self.selected = None;
        self.session.boot_entry = None;
        self.tree.update_bounds(self.controls.picker, |b| b.width = 0);
        entries.len()
    }
}

// ============================================================================
// Label chain
// ============================================================================

fn resolve_label(
    platform: &mut dyn Platform,
    theme: &Theme,
    scale: u32,
    attributes: PickerAttributes,
    entry: &BootEntryInfo,
) -> Result<Image> {
    let light = theme.light_background();

    if attributes.contains(PickerAttributes::USE_DISK_LABEL_FILE) {
        match disk_label(platform, entry, scale, light) {
            Ok(label) => return Ok(label),
            Err(err) => emit_log(
                LogLevel::Info,
                &format!("picker: no disk label for {}: {err}", entry.name),
            ),
        }
    }

    if attributes.contains(PickerAttributes::USE_GENERIC_LABEL_IMAGE) {
        let themed = label_kind(entry).and_then(|kind| {
            theme
                .label(kind)
                .ok_or_else(|| Error::MissingThemeImage(format!("label {kind:?}")))
        });
        match themed {
            Ok(image) => return image.try_clone(),
            Err(err) => emit_log(
                LogLevel::Warn,
                &format!("picker: no themed label for {}: {err}", entry.name),
            ),
        }
    }

    platform.render_label(&entry.name, light)
}

fn disk_label(
    platform: &mut dyn Platform,
    entry: &BootEntryInfo,
    scale: u32,
    light: bool,
) -> Result<Image> {
    let data = platform
        .entry_label_image(entry, scale)
        .ok_or_else(|| Error::unsupported("disk label", "not present"))?;
    platform.decode_label(&data, scale, light)
}

const LABEL_KINDS: &[(EntryType, LabelKind)] = &[
    (EntryType::APPLE_OS, LabelKind::Apple),
    (EntryType::APPLE_RECOVERY, LabelKind::AppleRecovery),
    (EntryType::APPLE_FW_UPDATE, LabelKind::AppleRecovery),
    (EntryType::APPLE_TIME_MACHINE, LabelKind::AppleTimeMachine),
    (EntryType::WINDOWS, LabelKind::Windows),
    (EntryType::EXTERNAL_OS, LabelKind::Other),
    (EntryType::RESET_NVRAM, LabelKind::ResetNvram),
    (EntryType::SYSTEM, LabelKind::Tool),
    (EntryType::UNKNOWN, LabelKind::GenericHdd),
];

fn label_kind(entry: &BootEntryInfo) -> Result<LabelKind> {
    if entry.entry_type == EntryType::EXTERNAL_TOOL {
        return Ok(match tool_kind(&entry.name) {
            ToolKind::ResetNvram => LabelKind::ResetNvram,
            ToolKind::Shell => LabelKind::Shell,
            ToolKind::Other => LabelKind::Tool,
        });
    }
    LABEL_KINDS
        .iter()
        .find(|(ty, _)| *ty == entry.entry_type)
        .map(|&(_, kind)| kind)
        .ok_or_else(|| {
            Error::unsupported("entry type", format!("{:#x}", entry.entry_type.bits()))
        })
}

// ============================================================================
// Icon chain
// ============================================================================

enum ToolKind {
    ResetNvram,
    Shell,
    Other,
}

fn tool_kind(name: &str) -> ToolKind {
    if name.contains(RESET_NVRAM_ENTRY_NAME) {
        ToolKind::ResetNvram
    } else if name.contains(UEFI_SHELL_ENTRY_NAME) {
        ToolKind::Shell
    } else {
        ToolKind::Other
    }
}

const ICON_KINDS: &[(EntryType, &[IconKind])] = &[
    (EntryType::APPLE_OS, &[IconKind::Apple]),
    (
        EntryType::APPLE_RECOVERY,
        &[IconKind::AppleRecovery, IconKind::Apple],
    ),
    (
        EntryType::APPLE_FW_UPDATE,
        &[IconKind::AppleRecovery, IconKind::Apple],
    ),
    (
        EntryType::APPLE_TIME_MACHINE,
        &[IconKind::AppleTimeMachine, IconKind::Apple],
    ),
    (EntryType::WINDOWS, &[IconKind::Windows]),
    (EntryType::EXTERNAL_OS, &[IconKind::Other]),
    (EntryType::RESET_NVRAM, &[IconKind::ResetNvram, IconKind::Tool]),
    (EntryType::UNKNOWN, &[IconKind::GenericHdd]),
];

/// Themed icons to try for `entry`, most specific first.
fn icon_kinds(entry: &BootEntryInfo) -> Result<&'static [IconKind]> {
    if entry.entry_type == EntryType::EXTERNAL_TOOL {
        return Ok(match tool_kind(&entry.name) {
            ToolKind::ResetNvram => &[IconKind::ResetNvram, IconKind::Tool],
            ToolKind::Shell => &[IconKind::Shell, IconKind::Tool],
            ToolKind::Other => &[IconKind::Tool],
        });
    }
    ICON_KINDS
        .iter()
        .find(|(ty, _)| *ty == entry.entry_type)
        .map(|&(_, kinds)| kinds)
        .ok_or_else(|| {
            Error::unsupported("entry type", format!("{:#x}", entry.entry_type.bits()))
        })
}

fn resolve_icon(
    platform: &mut dyn Platform,
    theme: &Theme,
    images: &ControlImages,
    config: &ViewConfig,
    attributes: PickerAttributes,
    entry: &BootEntryInfo,
) -> EntryIcon {
    let wants_volume_icon = attributes.contains(PickerAttributes::USE_VOLUME_ICON)
        && (entry.entry_type != EntryType::APPLE_TIME_MACHINE
            || !attributes.contains(PickerAttributes::HIDE_THEMED_ICONS));
    if wants_volume_icon {
        if let Some(icon) = volume_icon(platform, config, entry) {
            return EntryIcon::Custom(icon);
        }
    }

    let variant = if entry.is_external {
        IconVariant::External
    } else {
        IconVariant::Base
    };
    match icon_kinds(entry) {
        Ok(kinds) => {
            if let Some(image) = kinds.iter().find_map(|&kind| theme.icon(kind, variant)) {
                return EntryIcon::Themed(Rc::clone(image));
            }
        }
        Err(err) => emit_log(
            LogLevel::Warn,
            &format!("picker: no themed icon for {}: {err}", entry.name),
        ),
    }

    let generic = theme
        .icon(IconKind::GenericHdd, variant)
        .unwrap_or(&images.generic_hdd);
    EntryIcon::Themed(Rc::clone(generic))
}

fn volume_icon(
    platform: &mut dyn Platform,
    config: &ViewConfig,
    entry: &BootEntryInfo,
) -> Option<Image> {
    let data = platform.entry_icon(entry)?;
    let dimension = config.scaled(config.metrics.entry_icon_dimension);
    match platform.decode_icon(&data, config.scale, dimension, dimension) {
        Ok(icon) if icon.size() == (dimension, dimension) => Some(icon),
        Ok(icon) => {
            let (width, height) = icon.size();
            emit_log(
                LogLevel::Info,
                &format!(
                    "picker: volume icon of {} is {width}x{height}, expected {dimension}x{dimension}",
                    entry.name
                ),
            );
            None
        }
        Err(err) => {
            emit_log(
                LogLevel::Info,
                &format!("picker: volume icon of {} failed to decode: {err}", entry.name),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, entry_type: EntryType) -> BootEntryInfo {
        BootEntryInfo::new(name, entry_type)
    }

    #[test]
    fn test_label_kind_by_type() {
        assert_eq!(
            label_kind(&entry("macOS", EntryType::APPLE_OS)).unwrap(),
            LabelKind::Apple
        );
        assert_eq!(
            label_kind(&entry("Update", EntryType::APPLE_FW_UPDATE)).unwrap(),
            LabelKind::AppleRecovery
        );
        assert_eq!(
            label_kind(&entry("EFI", EntryType::UNKNOWN)).unwrap(),
            LabelKind::GenericHdd
        );
    }

    #[test]
    fn test_external_tool_kind_by_name() {
        let nvram = entry("Reset NVRAM", EntryType::EXTERNAL_TOOL);
        let shell = entry("UEFI Shell", EntryType::EXTERNAL_TOOL);
        let other = entry("memtest", EntryType::EXTERNAL_TOOL);
        assert_eq!(label_kind(&nvram).unwrap(), LabelKind::ResetNvram);
        assert_eq!(label_kind(&shell).unwrap(), LabelKind::Shell);
        assert_eq!(label_kind(&other).unwrap(), LabelKind::Tool);
        assert_eq!(icon_kinds(&shell).unwrap(), &[IconKind::Shell, IconKind::Tool]);
    }

    #[test]
    fn test_unsupported_type() {
        let odd = entry("odd", EntryType::WINDOWS | EntryType::APPLE_OS);
        assert!(matches!(
            label_kind(&odd),
            Err(Error::Unsupported { what: "entry type", .. })
        ));
        assert!(icon_kinds(&odd).is_err());
        assert!(icon_kinds(&entry("fw", EntryType::SYSTEM)).is_err());
    }

    #[test]
    fn test_recovery_falls_back_to_apple() {
        let kinds = icon_kinds(&entry("Recovery", EntryType::APPLE_RECOVERY)).unwrap();
        assert_eq!(kinds, &[IconKind::AppleRecovery, IconKind::Apple]);
    }

    #[test]
    fn test_entry_icon_accessors() {
        let custom = EntryIcon::Custom(Image::new(3, 2));
        assert!(custom.is_custom());
        assert_eq!(custom.image().size(), (3, 2));
        let themed = EntryIcon::Themed(Rc::new(Image::new(1, 1)));
        assert!(!themed.is_custom());
    }
}
