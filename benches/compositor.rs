//! Compositor performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use canopy::buffer::ClipRect;
use canopy::input::{FrameInput, KeyCode, Keystroke};
use canopy::picker::{IconKind, IconVariant, Theme};
use canopy::platform::{
    AudioFile, BootEntryInfo, EntryType, ImageDecoder, PickerAttributes, PickerContext,
    PlatformReset, TextRasterizer,
};
use canopy::renderer::DrawQueue;
use canopy::view::BootPickerView;
use canopy::{Error, FrameBuffer, Image, Pixel, Result, ViewConfig};
use canopy_rust as canopy;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

struct NullPlatform;

impl ImageDecoder for NullPlatform {
    fn decode_icon(&mut self, _: &[u8], _: u32, _: u32, _: u32) -> Result<Image> {
        Err(Error::DecodeFailed("no decoder".into()))
    }

    fn decode_label(&mut self, _: &[u8], _: u32, _: bool) -> Result<Image> {
        Err(Error::DecodeFailed("no decoder".into()))
    }
}

impl TextRasterizer for NullPlatform {
    fn render_label(&mut self, text: &str, _: bool) -> Result<Image> {
        Ok(Image::filled(text.len() as u32 * 7, 13, Pixel::WHITE))
    }
}

impl PickerContext for NullPlatform {
    fn attributes(&self) -> PickerAttributes {
        PickerAttributes::USE_POINTER_CONTROL
    }

    fn entry_icon(&mut self, _: &BootEntryInfo) -> Option<Vec<u8>> {
        None
    }

    fn entry_label_image(&mut self, _: &BootEntryInfo, _: u32) -> Option<Vec<u8>> {
        None
    }

    fn play_audio(&mut self, _: AudioFile) {}

    fn play_entry_audio(&mut self, _: &BootEntryInfo) {}

    fn voice_over_enabled(&self) -> bool {
        false
    }

    fn toggle_voice_over(&mut self) {}
}

impl PlatformReset for NullPlatform {
    fn shutdown(&mut self) {}

    fn warm_reset(&mut self) {}
}

fn theme() -> Theme {
    let translucent = Pixel::from_straight(200, 200, 200, 160);
    let mut theme = Theme::new(Pixel::BLACK)
        .with_icon(IconKind::Selected, IconVariant::Base, Image::filled(144, 144, translucent))
        .with_icon(IconKind::GenericHdd, IconVariant::Base, Image::filled(128, 128, translucent))
        .with_background_image(Image::filled(800, 600, Pixel::rgb(20, 20, 40)));
    for (kind, (w, h)) in [
        (IconKind::Selector, (144, 40)),
        (IconKind::LeftScroll, (40, 40)),
        (IconKind::RightScroll, (40, 40)),
        (IconKind::ShutDown, (40, 40)),
        (IconKind::Restart, (40, 40)),
    ] {
        theme.set_icon(kind, IconVariant::Base, Image::filled(w, h, translucent));
        theme.set_icon(kind, IconVariant::Held, Image::filled(w, h, Pixel::WHITE));
    }
    theme
}

fn picker(entries: usize) -> BootPickerView {
    let config = ViewConfig::new(1920, 1080).without_intro();
    let mut view = BootPickerView::new(config, theme()).expect("complete theme");
    let mut platform = NullPlatform;
    for i in 0..entries {
        let info = BootEntryInfo::new(format!("Volume {i}"), EntryType::UNKNOWN);
        view.add_entry(&mut platform, info, i == 0)
            .expect("text labels never fail");
    }
    view.late_initialize();
    view
}

fn blit(c: &mut Criterion) {
    let icon = Image::filled(128, 128, Pixel::from_straight(255, 128, 0, 200));
    let mut screen = FrameBuffer::new(1920, 1080);
    let window = ClipRect::new(0, 0, 128, 128);

    c.bench_function("blit_128_opaque", |b| {
        b.iter(|| screen.draw_image(black_box(&icon), 0xFF, 400, 300, window))
    });

    c.bench_function("blit_128_faded", |b| {
        b.iter(|| screen.draw_image(black_box(&icon), 0x80, 400, 300, window))
    });
}

fn draw_queue(c: &mut Criterion) {
    c.bench_function("draw_queue_coalesce_64", |b| {
        b.iter(|| {
            let mut queue = DrawQueue::new(1920, 1080);
            for i in 0..64i64 {
                queue.request_draw_crop(black_box(i * 29 % 1800), i * 13 % 1000, 152, 204);
            }
            queue.drain()
        })
    });
}

fn picker_frames(c: &mut Criterion) {
    c.bench_function("picker_full_frame_12_entries", |b| {
        let mut view = picker(12);
        let mut platform = NullPlatform;
        let mut now = 0;
        b.iter(|| {
            view.redraw_all();
            now += 1;
            black_box(view.tick(now, FrameInput::idle(), &mut platform).len())
        })
    });

    c.bench_function("picker_navigate_12_entries", |b| {
        let mut view = picker(12);
        let mut platform = NullPlatform;
        let mut now = 0;
        let mut right = true;
        b.iter(|| {
            now += 1;
            let code = if right { KeyCode::RIGHT_ARROW } else { KeyCode::LEFT_ARROW };
            let input = FrameInput::key(Keystroke::key(code));
            if view.tick(now, input, &mut platform).is_empty() {
                right = !right;
            }
        })
    });
}

criterion_group!(benches, blit, draw_queue, picker_frames);
criterion_main!(benches);
