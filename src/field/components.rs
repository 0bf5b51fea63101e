use std::collections::HashMap;

use bevy::prelude::*;

/// 球的默认外观
pub const DEFAULT_BALL_MATERIAL: &str = "ball_chrome";
pub const DEFAULT_PHYSICS_MATERIAL: &str = "ball_default";

/// 场上的球
#[derive(Component, Debug, Default)]
pub struct Ball;

/// 拖尾，出生时关闭
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct BallTrail {
    pub enabled:  bool,
    pub material: Option<String>,
}

/// 球体材质
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BallSkin {
    pub base:    String,
    pub current: String,
}

impl BallSkin {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { current: base.clone(), base }
    }
}

/// 碰撞体的物理材质
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BallCollider {
    pub base:             String,
    pub physics_material: String,
}

impl BallCollider {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { physics_material: base.clone(), base }
    }
}

/// 光泽版材质参数
pub const TOY_CORE_GLOSS_SMOOTHNESS: f32 = 0.88;

#[derive(Debug, Clone, PartialEq)]
pub struct GlossMaterial {
    pub name:                    String,
    pub source:                  String,
    pub metallic:                f32,
    pub smoothness:              f32,
    pub specular_highlights:     bool,
    pub environment_reflections: bool,
    pub glossy_reflections:      bool,
}

impl GlossMaterial {
    fn from_source(source: &str) -> Self {
        Self {
            name: format!("{source}_ToyCoreGloss_Runtime"),
            source: source.to_string(),
            metallic: 0.0,
            smoothness: TOY_CORE_GLOSS_SMOOTHNESS,
            specular_highlights: true,
            environment_reflections: true,
            glossy_reflections: true,
        }
    }
}

/// 源材质 → 光泽版材质，每个源只生成一次
#[derive(Resource, Debug, Default)]
pub struct GlossMaterialCache {
    materials: HashMap<String, GlossMaterial>,
}

impl GlossMaterialCache {
    pub fn get_or_create(&mut self, source: &str) -> &GlossMaterial {
        self.materials
            .entry(source.to_string())
            .or_insert_with(|| GlossMaterial::from_source(source))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }
}
