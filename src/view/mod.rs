//! The boot picker view: construction, the per-tick loop, and teardown.
//!
//! A [`BootPickerView`] owns the widget [`Scene`], the screen buffer, and
//! the running animations. The host drives it:
//!
//! 1. [`BootPickerView::new`] lays out the fixed controls.
//! 2. [`BootPickerView::add_entry`] is called once per boot option.
//! 3. [`BootPickerView::late_initialize`] settles the initial scroll.
//! 4. [`BootPickerView::tick`] runs once per frame until
//!    [`BootPickerView::outcome`] returns a decision.
//!
//! # Example
//!
//! ```
//! use canopy_rust::config::ViewConfig;
//! use canopy_rust::view::{BootPickerView, ViewState};
//! # use canopy_rust::picker::{IconKind, IconVariant, Theme};
//! # use canopy_rust::{Image, Pixel};
//! # let mut theme = Theme::new(Pixel::BLACK)
//! #     .with_icon(IconKind::Selected, IconVariant::Base, Image::filled(144, 144, Pixel::WHITE))
//! #     .with_icon(IconKind::GenericHdd, IconVariant::Base, Image::filled(128, 128, Pixel::WHITE));
//! # for (kind, size) in [
//! #     (IconKind::Selector, (144, 40)),
//! #     (IconKind::LeftScroll, (40, 40)),
//! #     (IconKind::RightScroll, (40, 40)),
//! #     (IconKind::ShutDown, (40, 40)),
//! #     (IconKind::Restart, (40, 40)),
//! # ] {
//! #     for variant in [IconVariant::Base, IconVariant::Held] {
//! #         theme.set_icon(kind, variant, Image::filled(size.0, size.1, Pixel::WHITE));
//! #     }
//! # }
//!
//! let mut view = BootPickerView::new(ViewConfig::new(1024, 768).without_intro(), theme)?;
//! view.late_initialize();
//! assert_eq!(view.state(), ViewState::Interactive);
//! # Ok::<(), canopy_rust::Error>(())
//! ```

mod intro;
mod layout;
mod scene;

pub use intro::IntroAnimation;
pub use layout::{ViewRoot, container_width};
pub use scene::{Controls, EventContext, Scene, Session};

use std::rc::Rc;

use crate::anim::AnimationSet;
use crate::buffer::FrameBuffer;
use crate::config::ViewConfig;
use crate::error::{Error, Result};
use crate::event::{EVENT_READY_TO_BOOT, EVENT_REFRESH, LogLevel, emit_event, emit_log};
use crate::input::{FrameInput, InputEvent, PointerPhase, PointerSample, PointerTracker};
use crate::picker::{BootEntryWidget, Theme};
use crate::platform::{BootEntryInfo, PickerAttributes, Platform};
use crate::renderer::{DirtyRegion, RenderStats};
use crate::widget::{Bounds, PointerEvent, WidgetId};

/// Lifecycle of a view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Entries may still be added.
    Constructing,
    /// The intro is playing; only the selector and some keys respond.
    IntroAnimating,
    Interactive,
    /// A decision was made. Further ticks do nothing.
    Exiting,
}

/// What the host should do once the view exits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewOutcome {
    Boot {
        entry: Rc<BootEntryInfo>,
        /// Also make the entry the default.
        set_default: bool,
    },
    /// Rebuild the picker, optionally listing auxiliary entries.
    Refresh { show_auxiliary: bool },
}

/// Fixed widgets whose screen rectangles can be queried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    ActionButtons,
    Restart,
    ShutDown,
    LeftScroll,
    RightScroll,
    Container,
    Picker,
    Selector,
}

/// A graphical boot entry picker.
pub struct BootPickerView {
    scene: Scene,
    screen: FrameBuffer,
    animations: AnimationSet<Scene>,
    pointer: PointerTracker,
    /// Widget that consumed the press of the current pointer gesture.
    held: Option<WidgetId>,
    state: ViewState,
    stats: RenderStats,
    last_frame: Vec<DirtyRegion>,
}

impl BootPickerView {
    /// Lay out an empty picker. Fails if `theme` lacks a control image or
    /// one has the wrong size.
    pub fn new(config: ViewConfig, theme: Theme) -> Result<Self> {
        let scene = Scene::build(config, theme)?;
        let mut animations = AnimationSet::new();
        if config.play_intro {
            animations.start(Box::new(IntroAnimation::new(
                config.start_time,
                config.metrics.intro_duration,
                config.metrics.intro_slide,
            )));
        }
        emit_log(
            LogLevel::Debug,
            &format!(
                "picker: view {}x{} at {}x, container {}",
                config.width,
                config.height,
                config.scale,
                scene.tree.bounds(scene.controls.container).width
            ),
        );
        Ok(Self {
            scene,
            screen: FrameBuffer::new(config.width, config.height),
            animations,
            pointer: PointerTracker::new(),
            held: None,
            state: ViewState::Constructing,
            stats: RenderStats::default(),
            last_frame: Vec::new(),
        })
    }

    /// Append a boot option. A default entry becomes the selection.
    ///
    /// Returns the entry's index.
    pub fn add_entry(
        &mut self,
        platform: &mut dyn Platform,
        entry: impl Into<Rc<BootEntryInfo>>,
        is_default: bool,
    ) -> Result<usize> {
        if self.state != ViewState::Constructing {
            return Err(Error::unsupported(
                "operation",
                "entries are added before late initialization",
            ));
        }
        let entry = entry.into();
        let widget = BootEntryWidget::build(
            platform,
            &self.scene.theme,
            &self.scene.images,
            &self.scene.config,
            &entry,
        )?;
        self.scene.insert_entry(widget, entry, is_default)?;
        Ok(self.scene.entries().len() - 1)
    }

    /// Finish construction: settle the initial scroll and schedule the
    /// first full frame.
    pub fn late_initialize(&mut self) {
        debug_assert_eq!(self.state, ViewState::Constructing);
        if self.scene.selected.is_none() {
            if let Some(&first) = self.scene.entries().first() {
                emit_log(LogLevel::Warn, "picker: no default entry, selecting the first");
                self.scene.select_entry(first, false);
            }
        }
        self.scene.settle_initial_scroll();
        self.redraw_all();
        self.state = if self.animations.is_empty() {
            ViewState::Interactive
        } else {
            ViewState::IntroAnimating
        };
        emit_log(
            LogLevel::Debug,
            &format!(
                "picker: {} entries, offset {}, state {:?}",
                self.entry_count(),
                self.picker_offset(),
                self.state
            ),
        );
    }

    /// Schedule a redraw of the whole screen.
    pub fn redraw_all(&mut self) {
        let (width, height) = (self.scene.view_width(), self.scene.view_height());
        self.scene.request_draw(0, 0, width, height);
    }

    /// Run one frame: animations, narration, one input event, and the
    /// redraw of everything invalidated. Returns the regions drawn.
    pub fn tick(
        &mut self,
        now: u64,
        input: FrameInput,
        platform: &mut dyn Platform,
    ) -> &[DirtyRegion] {
        self.last_frame.clear();
        if self.state == ViewState::Exiting {
            return &self.last_frame;
        }
        debug_assert_ne!(self.state, ViewState::Constructing, "late_initialize not called");

        self.animations.advance(&mut self.scene, now);
        if self.state == ViewState::IntroAnimating && self.animations.is_empty() {
            emit_log(LogLevel::Debug, "picker: intro finished");
            self.state = ViewState::Interactive;
        }

        self.tick_voice_over(platform);

        match input.event() {
            Some(InputEvent::Key(key)) => {
                let view = self.scene.controls.view;
                EventContext::new(&mut self.scene, platform).dispatch_key(view, key);
            }
            Some(InputEvent::Pointer(sample)) => {
                if platform
                    .attributes()
                    .contains(PickerAttributes::USE_POINTER_CONTROL)
                {
                    self.handle_pointer(sample, platform);
                }
            }
            None => {}
        }

        self.flush();

        if self.scene.session.should_exit() {
            self.exit();
        }
        &self.last_frame
    }

    fn tick_voice_over(&mut self, platform: &mut dyn Platform) {
        if !platform.voice_over_enabled() {
            return;
        }
        let session = &mut self.scene.session;
        session.audio_playback_timeout = match session.audio_playback_timeout {
            Some(0) => {
                if let Some(entry) = &session.boot_entry {
                    platform.play_entry_audio(entry);
                }
                None
            }
            Some(ticks) => Some(ticks - 1),
            None => None,
        };
    }

    fn handle_pointer(&mut self, sample: PointerSample, platform: &mut dyn Platform) {
        let Some(phase) = self.pointer.classify(sample) else {
            return;
        };
        let (x, y) = (i64::from(sample.x), i64::from(sample.y));
        let mut cx = EventContext::new(&mut self.scene, platform);
        match phase {
            PointerPhase::Down => {
                let view = cx.scene.controls.view;
                let event = PointerEvent {
                    phase,
                    base_x: 0,
                    base_y: 0,
                    offset_x: x,
                    offset_y: y,
                };
                self.held = cx.dispatch_pointer(view, event);
            }
            PointerPhase::Hold | PointerPhase::Up => {
                let Some(held) = self.held else {
                    return;
                };
                let (base_x, base_y) = cx.scene.tree.origin(held);
                let event = PointerEvent {
                    phase,
                    base_x,
                    base_y,
                    offset_x: x - base_x,
                    offset_y: y - base_y,
                };
                cx.dispatch_pointer(held, event);
                if phase == PointerPhase::Up {
                    self.held = None;
                }
            }
        }
    }

    fn flush(&mut self) {
        let regions = self.scene.requests.drain();
        let view = self.scene.controls.view;
        for region in &regions {
            self.scene
                .draw_widget(view, &mut self.screen, 0, 0, region.to_clip_rect());
        }
        self.stats.record(&regions);
        self.last_frame = regions;
    }

    fn exit(&mut self) {
        self.state = ViewState::Exiting;
        let session = &self.scene.session;
        match &session.boot_entry {
            Some(entry) if session.ready_to_boot => {
                emit_log(LogLevel::Info, &format!("picker: booting {entry}"));
                emit_event(EVENT_READY_TO_BOOT, &entry.name);
            }
            _ => {
                let data = if session.hide_auxiliary { "" } else { "auxiliary" };
                emit_log(LogLevel::Info, "picker: refresh requested");
                emit_event(EVENT_REFRESH, data);
            }
        }
    }

    /// Destroy every entry, last first. Returns how many were removed.
    pub fn remove_entries(&mut self) -> usize {
        let removed = self.scene.remove_entries();
        emit_log(
            LogLevel::Debug,
            &format!("picker: removed {removed} entries"),
        );
        removed
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// The host decision, once the view is exiting.
    #[must_use]
    pub fn outcome(&self) -> Option<ViewOutcome> {
        if self.state != ViewState::Exiting {
            return None;
        }
        let session = &self.scene.session;
        if session.ready_to_boot {
            if let Some(entry) = &session.boot_entry {
                return Some(ViewOutcome::Boot {
                    entry: Rc::clone(entry),
                    set_default: session.set_default,
                });
            }
        }
        Some(ViewOutcome::Refresh {
            show_auxiliary: !session.hide_auxiliary,
        })
    }

    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.scene.session
    }

    #[must_use]
    pub const fn screen(&self) -> &FrameBuffer {
        &self.screen
    }

    #[must_use]
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    #[must_use]
    pub const fn opacity(&self) -> u8 {
        self.scene.opacity
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.scene.entries().len()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.scene.selected?;
        self.scene.entries().iter().position(|&id| id == selected)
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&Rc<BootEntryInfo>> {
        self.scene.session.boot_entry.as_ref()
    }

    /// Width of the entry container.
    #[must_use]
    pub fn container_width(&self) -> u32 {
        self.scene.tree.bounds(self.scene.controls.container).width
    }

    /// Scroll position of the row inside the container.
    #[must_use]
    pub fn picker_offset(&self) -> i64 {
        self.scene.tree.bounds(self.scene.controls.picker).x
    }

    /// Offset of entry `index` from the container's left edge.
    #[must_use]
    pub fn entry_offset(&self, index: usize) -> Option<i64> {
        let &id = self.scene.entries().get(index)?;
        Some(self.picker_offset() + self.scene.tree.bounds(id).x)
    }

    /// Screen rectangle of entry `index`.
    #[must_use]
    pub fn entry_rect(&self, index: usize) -> Option<Bounds> {
        let &id = self.scene.entries().get(index)?;
        Some(self.screen_rect(id))
    }

    /// Screen rectangle of a fixed control.
    #[must_use]
    pub fn control_rect(&self, control: Control) -> Bounds {
        let c = &self.scene.controls;
        let id = match control {
            Control::ActionButtons => c.actions,
            Control::Restart => c.restart,
            Control::ShutDown => c.shut_down,
            Control::LeftScroll => c.left_scroll,
            Control::RightScroll => c.right_scroll,
            Control::Container => c.container,
            Control::Picker => c.picker,
            Control::Selector => c.selector,
        };
        self.screen_rect(id)
    }

    fn screen_rect(&self, id: WidgetId) -> Bounds {
        let (x, y) = self.scene.tree.origin(id);
        let b = self.scene.tree.bounds(id);
        Bounds::new(x, y, b.width, b.height)
    }

    // ========================================================================
    // Programmatic navigation
    // ========================================================================

    /// Select entry `index` without scrolling or redrawing.
    pub fn select_entry(&mut self, index: usize) -> bool {
        let Some(&id) = self.scene.entries().get(index) else {
            return false;
        };
        self.scene.select_entry(id, true);
        true
    }

    /// Select entry `index`, scrolling it into view.
    pub fn change_entry(&mut self, index: usize) -> bool {
        let Some(&id) = self.scene.entries().get(index) else {
            return false;
        };
        if self.scene.selected != Some(id) {
            self.scene.change_entry(id);
        }
        true
    }

    /// Scroll delta that would bring the selection into view.
    #[must_use]
    pub fn scroll_selected(&self) -> i64 {
        self.scene.scroll_selected()
    }

    /// Shift the entry row by `delta` pixels.
    pub fn scroll(&mut self, delta: i64) {
        self.scene.scroll(delta);
    }
}

impl std::fmt::Debug for BootPickerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootPickerView")
            .field("state", &self.state)
            .field("entries", &self.entry_count())
            .field("selected", &self.selected_index())
            .field("opacity", &self.scene.opacity)
            .finish_non_exhaustive()
    }
}
