use bevy::diagnostic::FrameCount;
use bevy::prelude::*;
use vfxcore::target::VolumetricPlayer;

/// Playback state published by whatever plugin decodes the vologram on this entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct VolumetricPlayback {
    pub open: bool,
    pub playing: bool,
    pub frame_count: u32,
}

impl VolumetricPlayback {
    pub fn playing(frame_count: u32) -> Self {
        Self {
            open: true,
            playing: true,
            frame_count,
        }
    }
}

/// A playback state read against the app's frame counter.
pub struct PlaybackView<'a> {
    playback: &'a VolumetricPlayback,
    frame: u64,
}

impl<'a> PlaybackView<'a> {
    pub fn new(playback: &'a VolumetricPlayback, frames: &FrameCount) -> Self {
        Self {
            playback,
            frame: u64::from(frames.0),
        }
    }
}

impl VolumetricPlayer for PlaybackView<'_> {
    fn is_open(&self) -> bool {
        self.playback.open
    }

    fn is_playing(&self) -> bool {
        self.playback.playing
    }

    fn current_frame(&self) -> u64 {
        self.frame
    }

    fn frame_count(&self) -> u32 {
        self.playback.frame_count
    }
}
