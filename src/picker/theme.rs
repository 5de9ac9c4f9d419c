//! Themed images.
//!
//! A [`Theme`] is a lookup table from `(IconKind, IconVariant)` to a shared
//! bitmap, plus themed labels and the background. Control images that the
//! picker cannot run without are resolved once into [`ControlImages`] when a
//! view is created, so drawing never has to handle a missing image.

use std::fmt;
use std::rc::Rc;

use crate::buffer::Image;
use crate::color::Pixel;
use crate::error::{Error, Result};

/// What an icon depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconKind {
    /// Highlight drawn behind the selected entry.
    Selected,
    /// Button below the selected entry.
    Selector,
    LeftScroll,
    RightScroll,
    ShutDown,
    Restart,
    GenericHdd,
    Apple,
    AppleRecovery,
    AppleTimeMachine,
    Windows,
    Other,
    ResetNvram,
    Shell,
    Tool,
}

impl IconKind {
    const COUNT: usize = 15;

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Flavour of an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconVariant {
    Base,
    /// Entry on removable media.
    External,
    /// Pressed button.
    Held,
}

impl IconVariant {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Themed label images for entries that have no label of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelKind {
    GenericHdd,
    Apple,
    AppleRecovery,
    AppleTimeMachine,
    Windows,
    Other,
    ResetNvram,
    Shell,
    Tool,
}

impl LabelKind {
    const COUNT: usize = 9;

    const fn index(self) -> usize {
        self as usize
    }
}

/// Image set of the picker.
#[derive(Clone, Debug)]
pub struct Theme {
    icons: Vec<Option<Rc<Image>>>,
    labels: Vec<Option<Rc<Image>>>,
    background_color: Pixel,
    background_image: Option<Rc<Image>>,
    light_background: bool,
}

impl Theme {
    /// An empty theme over a solid background.
    #[must_use]
    pub fn new(background_color: Pixel) -> Self {
        Self {
            icons: vec![None; IconKind::COUNT * IconVariant::COUNT],
            labels: vec![None; LabelKind::COUNT],
            background_color,
            background_image: None,
            light_background: false,
        }
    }

    const fn slot(kind: IconKind, variant: IconVariant) -> usize {
        kind.index() * IconVariant::COUNT + variant.index()
    }

    pub fn set_icon(&mut self, kind: IconKind, variant: IconVariant, image: Image) {
        self.icons[Self::slot(kind, variant)] = Some(Rc::new(image));
    }

    #[must_use]
    pub fn with_icon(mut self, kind: IconKind, variant: IconVariant, image: Image) -> Self {
        self.set_icon(kind, variant, image);
        self
    }

    pub fn set_label(&mut self, kind: LabelKind, image: Image) {
        self.labels[kind.index()] = Some(Rc::new(image));
    }

    #[must_use]
    pub fn with_label(mut self, kind: LabelKind, image: Image) -> Self {
        self.set_label(kind, image);
        self
    }

    /// Centred wallpaper drawn over the background colour.
    #[must_use]
    pub fn with_background_image(mut self, image: Image) -> Self {
        self.background_image = Some(Rc::new(image));
        self
    }

    /// Hint for the label decoder and rasterizer to use dark text.
    #[must_use]
    pub fn with_light_background(mut self, light: bool) -> Self {
        self.light_background = light;
        self
    }

    /// Icon lookup. Empty bitmaps count as missing.
    #[must_use]
    pub fn icon(&self, kind: IconKind, variant: IconVariant) -> Option<&Rc<Image>> {
        self.icons[Self::slot(kind, variant)]
            .as_ref()
            .filter(|image| !image.is_empty())
    }

    #[must_use]
    pub fn label(&self, kind: LabelKind) -> Option<&Rc<Image>> {
        self.labels[kind.index()]
            .as_ref()
            .filter(|image| !image.is_empty())
    }

    #[must_use]
    pub const fn background_color(&self) -> Pixel {
        self.background_color
    }

    #[must_use]
    pub fn background_image(&self) -> Option<&Rc<Image>> {
        self.background_image.as_ref()
    }

    #[must_use]
    pub const fn light_background(&self) -> bool {
        self.light_background
    }

    fn require(&self, kind: IconKind, variant: IconVariant) -> Result<Rc<Image>> {
        self.icon(kind, variant)
            .cloned()
            .ok_or_else(|| Error::MissingThemeImage(format!("{kind}/{variant:?}")))
    }
}

/// Base and pressed images of a button.
#[derive(Clone, Debug)]
pub struct ButtonImages {
    pub base: Rc<Image>,
    pub held: Rc<Image>,
}

impl ButtonImages {
    fn resolve(theme: &Theme, kind: IconKind) -> Result<Self> {
        let images = Self {
            base: theme.require(kind, IconVariant::Base)?,
            held: theme.require(kind, IconVariant::Held)?,
        };
        if images.base.size() != images.held.size() {
            let (width, height) = images.held.size();
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(images)
    }

    #[must_use]
    pub fn get(&self, held: bool) -> &Rc<Image> {
        if held { &self.held } else { &self.base }
    }
}

/// Images every picker view needs.
#[derive(Clone, Debug)]
pub struct ControlImages {
    pub selected: Rc<Image>,
    pub selector: ButtonImages,
    pub left_scroll: ButtonImages,
    pub right_scroll: ButtonImages,
    pub shut_down: ButtonImages,
    pub restart: ButtonImages,
    pub generic_hdd: Rc<Image>,
}

impl ControlImages {
    /// Resolve the mandatory images of `theme`.
    pub fn resolve(theme: &Theme) -> Result<Self> {
        Ok(Self {
            selected: theme.require(IconKind::Selected, IconVariant::Base)?,
            selector: ButtonImages::resolve(theme, IconKind::Selector)?,
            left_scroll: ButtonImages::resolve(theme, IconKind::LeftScroll)?,
            right_scroll: ButtonImages::resolve(theme, IconKind::RightScroll)?,
            shut_down: ButtonImages::resolve(theme, IconKind::ShutDown)?,
            restart: ButtonImages::resolve(theme, IconKind::Restart)?,
            generic_hdd: theme.require(IconKind::GenericHdd, IconVariant::Base)?,
        })
    }
}
