// Recording targets for unit tests.

use crate::target::{EffectTarget, MaterialTarget, TexturedMaterial, VolumetricPlayer};
use glam::Vec4;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Float(String, f32),
    Color(String, Vec4),
    Texture(String, &'static str),
}

#[derive(Debug, Default, Clone)]
pub struct RecordingMaterial {
    pub floats: HashMap<String, f32>,
    pub textures: HashMap<String, &'static str>,
    pub writes: Vec<Write>,
}

impl RecordingMaterial {
    pub fn float_writes(&self, name: &str) -> Vec<f32> {
        self.writes
            .iter()
            .filter_map(|write| match write {
                Write::Float(n, v) if n == name => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn last_color(&self, name: &str) -> Option<Vec4> {
        self.writes.iter().rev().find_map(|write| match write {
            Write::Color(n, c) if n == name => Some(*c),
            _ => None,
        })
    }
}

impl MaterialTarget for RecordingMaterial {
    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
        self.writes.push(Write::Float(name.to_string(), value));
    }

    fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    fn set_color(&mut self, name: &str, color: Vec4) {
        self.writes.push(Write::Color(name.to_string(), color));
    }
}

impl TexturedMaterial for RecordingMaterial {
    type Texture = &'static str;

    fn texture(&self, name: &str) -> Option<&'static str> {
        self.textures.get(name).copied()
    }

    fn set_texture(&mut self, name: &str, texture: &'static str) {
        self.textures.insert(name.to_string(), texture);
        self.writes.push(Write::Texture(name.to_string(), texture));
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingEffect {
    pub floats: HashMap<String, f32>,
    pub vectors: HashMap<String, Vec4>,
    pub mesh: Option<&'static str>,
    pub enabled: bool,
    pub plays: u32,
}

impl EffectTarget for RecordingEffect {
    type Mesh = &'static str;

    fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    fn set_vector4(&mut self, name: &str, value: Vec4) {
        self.vectors.insert(name.to_string(), value);
    }

    fn set_mesh(&mut self, _name: &str, mesh: &'static str) {
        self.mesh = Some(mesh);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn play(&mut self) {
        self.plays += 1;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakePlayer {
    pub open: bool,
    pub playing: bool,
    pub frame: u64,
    pub frames: u32,
}

impl FakePlayer {
    pub fn playing(frames: u32) -> Self {
        Self {
            open: true,
            playing: true,
            frame: 0,
            frames,
        }
    }
}

impl VolumetricPlayer for FakePlayer {
    fn is_open(&self) -> bool {
        self.open
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn current_frame(&self) -> u64 {
        self.frame
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
