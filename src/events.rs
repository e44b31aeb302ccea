use bevy::prelude::*;

#[derive(Message)]
pub struct TriggerDissolve {
    pub entity: Entity,
    pub reverse: bool,
}

#[derive(Message)]
pub struct TriggerMeshTrail {
    pub entity: Entity,
}

/// A component's target frame was past the end of its vologram and got clamped.
#[derive(Message, Debug, Clone, Copy)]
pub struct TargetFrameClamped {
    pub entity: Entity,
    pub requested: u32,
    pub max: u32,
}
