//! Capability traits through which the animators reach the rendering engine.
//!
//! The animators never look anything up on their own: every step receives the
//! targets it writes to. Implementations live next to the engine that owns the
//! actual materials, effects and players.

use glam::Vec4;

/// A material instance with named shader properties.
pub trait MaterialTarget {
    fn set_float(&mut self, name: &str, value: f32);
    fn float(&self, name: &str) -> Option<f32>;
    fn set_color(&mut self, name: &str, color: Vec4);
}

/// A material that can also be bound to a texture.
pub trait TexturedMaterial: MaterialTarget {
    type Texture: Clone;

    fn texture(&self, name: &str) -> Option<Self::Texture>;
    fn set_texture(&mut self, name: &str, texture: Self::Texture);
}

/// The list of materials a renderer draws with.
pub trait RendererTarget {
    type Material: TexturedMaterial;

    fn material_count(&self) -> usize;
    fn material(&self, index: usize) -> Option<&Self::Material>;
    fn material_mut(&mut self, index: usize) -> Option<&mut Self::Material>;
}

/// A particle effect handle.
pub trait EffectTarget {
    type Mesh: Clone;

    fn float(&self, name: &str) -> Option<f32>;
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vector4(&mut self, name: &str, value: Vec4);
    fn set_mesh(&mut self, name: &str, mesh: Self::Mesh);
    fn set_enabled(&mut self, enabled: bool);
    fn play(&mut self);
}

/// Read-only view of a volumetric video player.
pub trait VolumetricPlayer {
    fn is_open(&self) -> bool;
    fn is_playing(&self) -> bool;
    /// Value of the external frame counter the gate aligns against.
    fn current_frame(&self) -> u64;
    fn frame_count(&self) -> u32;
}

impl<M: TexturedMaterial> RendererTarget for [M] {
    type Material = M;

    fn material_count(&self) -> usize {
        self.len()
    }

    fn material(&self, index: usize) -> Option<&M> {
        self.get(index)
    }

    fn material_mut(&mut self, index: usize) -> Option<&mut M> {
        self.get_mut(index)
    }
}

impl<M: TexturedMaterial> RendererTarget for Vec<M> {
    type Material = M;

    fn material_count(&self) -> usize {
        self.len()
    }

    fn material(&self, index: usize) -> Option<&M> {
        self.get(index)
    }

    fn material_mut(&mut self, index: usize) -> Option<&mut M> {
        self.get_mut(index)
    }
}

/// Placeholder for dissolve setups that have no particle effect bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffect;

impl EffectTarget for NoEffect {
    type Mesh = ();

    fn float(&self, _name: &str) -> Option<f32> {
        None
    }

    fn set_float(&mut self, _name: &str, _value: f32) {}

    fn set_vector4(&mut self, _name: &str, _value: Vec4) {}

    fn set_mesh(&mut self, _name: &str, _mesh: ()) {}

    fn set_enabled(&mut self, _enabled: bool) {}

    fn play(&mut self) {}
}
