//! Aircraft and drone models: built-in placeholders plus optional RON model
//! descriptions loaded on a background thread.
//!
//! The frame loop never waits on a load. It polls the channel once per frame
//! and swaps a model in when one arrives; failures keep the placeholder.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not read model {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid model {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("model {} has no parts", path.display())]
    Empty { path: PathBuf },
}

/// Primitive a model part is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Cone along local -Z (nose forward).
    Cone { radius: f32, length: f32 },
    Box { size: Vec3 },
    Icosahedron { radius: f32 },
    Sphere { radius: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPart {
    pub shape: Shape,
    #[serde(default)]
    pub offset: Vec3,
    pub color: [f32; 3],
    #[serde(default = "opaque")]
    pub opacity: f32,
}

fn opaque() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub parts: Vec<ModelPart>,
}

fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

impl Model {
    /// Stand-in jet: cone fuselage, wings, tailplane and fin.
    pub fn placeholder_aircraft() -> Self {
        let hull = rgb(0xcc0000);
        let trim = rgb(0x990000);
        let part = |shape, offset, color| ModelPart { shape, offset, color, opacity: 1.0 };
        Self {
            name: "placeholder-jet".into(),
            parts: vec![
                part(Shape::Cone { radius: 1.0, length: 4.0 }, Vec3::ZERO, hull),
                part(Shape::Box { size: Vec3::new(4.0, 0.1, 1.5) }, Vec3::new(0.0, 0.0, 0.5), trim),
                part(Shape::Box { size: Vec3::new(1.5, 0.1, 1.0) }, Vec3::new(0.0, 0.0, 1.8), trim),
                part(Shape::Box { size: Vec3::new(0.1, 1.0, 1.0) }, Vec3::new(0.0, 0.5, 1.8), trim),
            ],
        }
    }

    /// Stand-in drone: faceted core inside a translucent glow shell.
    pub fn placeholder_drone() -> Self {
        Self {
            name: "placeholder-drone".into(),
            parts: vec![
                ModelPart {
                    shape: Shape::Icosahedron { radius: 1.5 },
                    offset: Vec3::ZERO,
                    color: rgb(0xff3300),
                    opacity: 1.0,
                },
                ModelPart {
                    shape: Shape::Sphere { radius: 2.5 },
                    offset: Vec3::ZERO,
                    color: rgb(0xffaa00),
                    opacity: 0.3,
                },
            ],
        }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let data = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Model = ron::from_str(&data).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if model.parts.is_empty() {
            return Err(ModelError::Empty { path: path.to_path_buf() });
        }
        Ok(model)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSlot {
    Aircraft,
    Drone,
}

/// Models currently in use, swapped in as background loads finish.
pub struct ModelLibrary {
    pub aircraft: Model,
    pub drone: Model,
    tx: mpsc::Sender<(ModelSlot, Result<Model, ModelError>)>,
    rx: mpsc::Receiver<(ModelSlot, Result<Model, ModelError>)>,
    pending: usize,
}

impl Default for ModelLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLibrary {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            aircraft: Model::placeholder_aircraft(),
            drone: Model::placeholder_drone(),
            tx,
            rx,
            pending: 0,
        }
    }

    /// Start loading `path` into `slot` without blocking.
    pub fn request(&mut self, slot: ModelSlot, path: PathBuf) {
        let tx = self.tx.clone();
        self.pending += 1;
        log::debug!("Loading {:?} model from {:?}", slot, path);
        std::thread::spawn(move || {
            // The library may be gone by the time we finish; nothing to do then.
            let _ = tx.send((slot, Model::load(&path)));
        });
    }

    /// Apply finished loads. Returns how many models were swapped in.
    pub fn poll(&mut self) -> usize {
        let mut swapped = 0;
        while let Ok((slot, result)) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            match result {
                Ok(model) => {
                    log::info!("Loaded {:?} model '{}' ({} parts)", slot, model.name, model.parts.len());
                    match slot {
                        ModelSlot::Aircraft => self.aircraft = model,
                        ModelSlot::Drone => self.drone = model,
                    }
                    swapped += 1;
                }
                Err(e) => log::warn!("{}, keeping placeholder {:?} model", e, slot),
            }
        }
        swapped
    }

    pub fn pending(&self) -> usize {
        self.pending
    }
}
