//! Test doubles for the media seams and on-disk fixtures

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use crate::audio::MusicPort;
use crate::error::GameError;
use crate::game::Engines;
use crate::input::{EventSource, InputEvent, KeyMap};
use crate::level::{LevelRepository, Rgb, SCHEMA_FILE};
use crate::scene::{FontStyle, Layer, SceneCompositor, Screen, TextExtent};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenCall {
    BlitLayer { opaque: bool },
    Text { text: String, font: FontStyle, color: Rgb, left: f32, top: f32 },
    Present,
}

/// Screen that records calls; text is 10px per char, font size tall
#[derive(Clone, Default)]
pub struct RecordingScreen {
    calls: Rc<RefCell<Vec<ScreenCall>>>,
}

impl RecordingScreen {
    pub fn calls(&self) -> Vec<ScreenCall> {
        self.calls.borrow().clone()
    }

    pub fn texts(&self) -> Vec<ScreenCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, ScreenCall::Text { .. }))
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Screen for RecordingScreen {
    fn blit_layer(&mut self, layer: &Layer) {
        self.calls.borrow_mut().push(ScreenCall::BlitLayer { opaque: layer.is_opaque() });
    }

    fn measure_text(&self, text: &str, font: FontStyle) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f32 * 10.0,
            height: font.size() as f32,
        }
    }

    fn draw_text(&mut self, text: &str, font: FontStyle, color: Rgb, left: f32, top: f32) {
        self.calls.borrow_mut().push(ScreenCall::Text {
            text: text.to_string(),
            font,
            color,
            left,
            top,
        });
    }

    fn present(&mut self) {
        self.calls.borrow_mut().push(ScreenCall::Present);
    }
}

/// Music port that records requested tracks
#[derive(Clone, Default)]
pub struct RecordingMusic {
    tracks: Rc<RefCell<Vec<String>>>,
}

impl RecordingMusic {
    pub fn tracks(&self) -> Vec<String> {
        self.tracks.borrow().clone()
    }
}

#[async_trait(?Send)]
impl MusicPort for RecordingMusic {
    async fn play_music(&mut self, track: &str) -> Result<(), GameError> {
        self.tracks.borrow_mut().push(track.to_string());
        Ok(())
    }
}

/// Returns `Pending` once (waking itself), then completes
#[derive(Default)]
pub struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Music port whose loader takes an extra frame before recording
pub struct SlowMusic {
    inner: RecordingMusic,
}

impl SlowMusic {
    pub fn new(inner: RecordingMusic) -> Self {
        Self { inner }
    }
}

#[async_trait(?Send)]
impl MusicPort for SlowMusic {
    async fn play_music(&mut self, track: &str) -> Result<(), GameError> {
        YieldOnce::default().await;
        self.inner.play_music(track).await
    }
}

/// Event source fed one batch per drain
#[derive(Clone, Default)]
pub struct ScriptedEvents {
    batches: Rc<RefCell<VecDeque<Vec<InputEvent>>>>,
}

impl ScriptedEvents {
    /// Queue the events returned by a future drain
    pub fn push(&self, events: Vec<InputEvent>) {
        self.batches.borrow_mut().push_back(events);
    }
}

impl EventSource for ScriptedEvents {
    fn drain(&mut self) -> Vec<InputEvent> {
        self.batches.borrow_mut().pop_front().unwrap_or_default()
    }
}

pub fn write_png(dir: &Path, name: &str, img: &RgbaImage) {
    img.save(dir.join(name)).unwrap();
}

const SCHEMA: &str = include_str!("../data/level/level.schema.json");

/// Opaque color of each fixture image
pub const SKY: Rgba<u8> = Rgba([10, 20, 200, 255]);
pub const GROUND: Rgba<u8> = Rgba([120, 80, 40, 255]);
pub const HILLS: Rgba<u8> = Rgba([60, 120, 60, 255]);
pub const FOREST: Rgba<u8> = Rgba([20, 90, 20, 255]);

/// 4x64 image, `color` on one half and transparent on the other
///
/// Scaled to the viewport height, each half spans 320 rows.
fn half_image(color: Rgba<u8>, top_half: bool) -> RgbaImage {
    RgbaImage::from_fn(4, 64, |_, y| if (y < 32) == top_half { color } else { Rgba([0, 0, 0, 0]) })
}

/// A data directory with splash and world-1 levels and their images
///
/// Background images (`sky`, `hills`) cover the top half so the level color
/// shows below; scenery images (`ground`, `forest`) cover the bottom half.
pub fn fixture_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let levels = dir.path().join("level");
    let backgrounds = dir.path().join("assets/backgrounds");
    std::fs::create_dir_all(&levels).unwrap();
    std::fs::create_dir_all(&backgrounds).unwrap();

    std::fs::write(levels.join(SCHEMA_FILE), SCHEMA).unwrap();
    std::fs::write(
        levels.join("splash.json"),
        r#"{"name":"Splash","music":"intro.ogg","background_color":[0,0,0],"background_img":"sky.png","scenery_img":"ground.png"}"#,
    )
    .unwrap();
    std::fs::write(
        levels.join("world-1.json"),
        r#"{"name":"Monde 1","music":"world-1.ogg","background_color":[135,206,235],"background_img":"hills.png","scenery_img":"forest.png"}"#,
    )
    .unwrap();

    write_png(&backgrounds, "sky.png", &half_image(SKY, true));
    write_png(&backgrounds, "hills.png", &half_image(HILLS, true));
    write_png(&backgrounds, "ground.png", &half_image(GROUND, false));
    write_png(&backgrounds, "forest.png", &half_image(FOREST, false));
    dir
}

/// Recorders attached to a set of test engines
pub struct Recorders {
    pub screen: RecordingScreen,
    pub music: RecordingMusic,
    pub events: ScriptedEvents,
}

/// Engines wired to recording doubles over `data_dir`
pub fn test_engines(data_dir: &Path) -> (Engines, Recorders) {
    let recorders = Recorders {
        screen: RecordingScreen::default(),
        music: RecordingMusic::default(),
        events: ScriptedEvents::default(),
    };
    let engines = Engines {
        scene: SceneCompositor::new(Box::new(recorders.screen.clone()), data_dir.join("assets/backgrounds")),
        music: Box::new(recorders.music.clone()),
        levels: LevelRepository::new(data_dir.join("level")),
        events: Box::new(recorders.events.clone()),
        keys: KeyMap::default(),
    };
    (engines, recorders)
}
