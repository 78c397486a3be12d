//! Object palette: a row of draggable buttons that start palette drops.

use glam::Vec2;

use crate::resolver::{DropSource, PlacementRequest};

/// One draggable palette button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Prefab name in the placement collection.
    pub id: String,
    /// Icon image name.
    pub icon: String,
    /// Sound played when the drop lands.
    pub sound: String,
}

impl PaletteEntry {
    pub fn new(id: &str, icon: &str, sound: &str) -> Self {
        Self {
            id: id.to_string(),
            icon: icon.to_string(),
            sound: sound.to_string(),
        }
    }
}

/// A horizontal row of equally sized buttons.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    pub button_size: f32,
    pub padding: f32,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>, button_size: f32, padding: f32) -> Self {
        Self {
            entries,
            button_size,
            padding,
        }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Left edge of button `index`, relative to the palette origin.
    pub fn button_x(&self, index: usize) -> f32 {
        (self.button_size + self.padding) * index as f32
    }

    /// Button under `local` (palette-relative pixels). Gaps between buttons
    /// hit nothing.
    pub fn hit_test(&self, local: Vec2) -> Option<&PaletteEntry> {
        if local.x < 0.0 || local.y < 0.0 || local.y > self.button_size {
            return None;
        }
        let stride = self.button_size + self.padding;
        let index = (local.x / stride) as usize;
        if local.x - self.button_x(index) > self.button_size {
            return None;
        }
        self.entries.get(index)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entries = [
            ("grape_1", "grape", "throw_spear"),
            ("grape_2", "grape", "throw_spear"),
            ("grape_3", "grape", "throw_spear"),
            ("fence", "plus", "throw_spear"),
            ("chicken003", "plus", "chicken"),
            ("cow", "cow", "cow"),
            ("sheep", "sheep", "sheep"),
            ("corn_2", "corn", "throw_spear"),
            ("corn_3", "corn", "throw_spear"),
            ("strawberry_1", "strawberry", "throw_spear"),
            ("strawberry_2", "strawberry", "throw_spear"),
            ("strawberry_3", "strawberry", "throw_spear"),
            ("tomato_1", "tomato", "throw_spear"),
            ("tomato_2", "tomato", "throw_spear"),
            ("tomato_3", "tomato", "throw_spear"),
        ]
        .into_iter()
        .map(|(id, icon, sound)| PaletteEntry::new(id, icon, sound))
        .collect();
        Self::new(entries, 64.0, 12.0)
    }
}

/// A finished palette drag, ready to be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIntent {
    pub object_id: String,
    /// Release position in viewport pixels.
    pub screen: Vec2,
    pub sound: String,
}

impl DropIntent {
    pub fn into_request(self) -> PlacementRequest {
        PlacementRequest {
            object_id: self.object_id,
            screen: self.screen,
            source: DropSource::Palette,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    entry: PaletteEntry,
    start: Vec2,
    pointer: Vec2,
}

/// Pointer drag in progress from a palette button.
#[derive(Debug, Default)]
pub struct DragState {
    active: Option<ActiveDrag>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `entry`. Any drag already in progress is dropped.
    pub fn begin(&mut self, entry: &PaletteEntry, pointer: Vec2) {
        log::debug!("Started dragging {}", entry.id);
        self.active = Some(ActiveDrag {
            entry: entry.clone(),
            start: pointer,
            pointer,
        });
    }

    pub fn update(&mut self, pointer: Vec2) {
        if let Some(drag) = self.active.as_mut() {
            drag.pointer = pointer;
        }
    }

    /// Release the pointer. Returns the drop to resolve if a drag was active.
    pub fn end(&mut self, pointer: Vec2) -> Option<DropIntent> {
        let drag = self.active.take()?;
        Some(DropIntent {
            object_id: drag.entry.id,
            screen: pointer,
            sound: drag.entry.sound,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.active.as_ref().map(|d| d.entry.id.as_str())
    }

    /// Where the pointer went down.
    pub fn start(&self) -> Option<Vec2> {
        self.active.as_ref().map(|d| d.start)
    }

    /// Drag sprite center in palette space, given the palette's on-screen
    /// origin and UI scale.
    pub fn sprite_position(&self, origin: Vec2, scale: f32) -> Option<Vec2> {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        self.active.as_ref().map(|d| (d.pointer - origin) / scale)
    }
}
