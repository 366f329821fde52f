// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved viewer preferences: font slots, scroll tuning and HUD flags.

use std::path::{Path, PathBuf};

use glyph_patch_core::{FontSelection, RenderDegree};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Config key the preferences are stored under.
pub const PREFS_KEY: &str = "viewer_prefs";

/// Which text mode a font slot enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotMode {
    /// Static word.
    Static,
    /// Scrolling phrase.
    Scroll,
}

/// One keyboard-selectable font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSlot {
    /// Font file; relative paths resolve against the font directory.
    pub path: PathBuf,
    /// Text mode entered when the slot is selected.
    pub mode: SlotMode,
    /// Render degree; `None` infers it from the file extension.
    #[serde(default)]
    pub degree: Option<RenderDegree>,
}

impl FontSlot {
    fn new(path: &str, mode: SlotMode) -> Self {
        Self {
            path: PathBuf::from(path),
            mode,
            degree: None,
        }
    }

    /// Resolve the slot to a concrete font selection.
    pub fn selection(&self, font_dir: &Path) -> FontSelection {
        let path = if self.path.is_absolute() {
            self.path.clone()
        } else {
            font_dir.join(&self.path)
        };
        match self.degree {
            Some(degree) => FontSelection::new(path, degree),
            None => FontSelection::from_path(path),
        }
    }
}

/// Fonts bound to keys 3 through 8, in key order.
pub fn default_font_slots() -> Vec<FontSlot> {
    vec![
        FontSlot::new("Lora-Italic.ttf", SlotMode::Static),
        FontSlot::new("KaushanScript-Regular.otf", SlotMode::Static),
        FontSlot::new("SourceSansPro-Black.otf", SlotMode::Static),
        FontSlot::new("AlexBrush-Regular.ttf", SlotMode::Scroll),
        FontSlot::new("Inconsolata.otf", SlotMode::Scroll),
        FontSlot::new("AquilineTwo.ttf", SlotMode::Scroll),
    ]
}

/// Scroll tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollPrefs {
    /// Speed the scroll starts at.
    pub initial_speed: f32,
    /// Advance every frame, not only on the right arrow.
    pub auto_scroll: bool,
}

impl Default for ScrollPrefs {
    fn default() -> Self {
        Self {
            initial_speed: 0.02,
            auto_scroll: true,
        }
    }
}

/// HUD and presentation toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudPrefs {
    /// Draw the egui overlay.
    pub show_hud: bool,
    /// Present with vsync.
    pub vsync: bool,
}

impl Default for HudPrefs {
    fn default() -> Self {
        Self {
            show_hud: true,
            vsync: true,
        }
    }
}

/// Everything the viewer persists between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerPrefs {
    /// Key-bound fonts.
    pub fonts: Vec<FontSlot>,
    /// Scroll tuning.
    pub scroll: ScrollPrefs,
    /// HUD toggles.
    pub hud: HudPrefs,
}

impl Default for ViewerPrefs {
    fn default() -> Self {
        Self {
            fonts: default_font_slots(),
            scroll: ScrollPrefs::default(),
            hud: HudPrefs::default(),
        }
    }
}

/// Load/save port for [`ViewerPrefs`].
pub trait PrefsPort {
    /// Stored prefs; `Ok(None)` when nothing has been saved yet.
    fn load_prefs(&self) -> Result<Option<ViewerPrefs>, ConfigError>;
    /// Persist prefs.
    fn save_prefs(&self, prefs: &ViewerPrefs) -> Result<(), ConfigError>;
}

impl<S: ConfigStore> PrefsPort for ConfigService<S> {
    fn load_prefs(&self) -> Result<Option<ViewerPrefs>, ConfigError> {
        self.load(PREFS_KEY)
    }

    fn save_prefs(&self, prefs: &ViewerPrefs) -> Result<(), ConfigError> {
        self.save(PREFS_KEY, prefs)
    }
}
