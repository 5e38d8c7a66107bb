use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::mesh::MeshData;
use super::shaders::ShaderSource;
use super::sources;
use crate::utils::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Blank,
    Triangle,
    Pyramid,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [Self::Blank, Self::Triangle, Self::Pyramid];

    pub fn name(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Triangle => "triangle",
            Self::Pyramid => "pyramid",
        }
    }

    pub fn descriptor(self) -> SceneDescriptor {
        match self {
            Self::Blank => SceneDescriptor {
                kind: self,
                mesh: None,
                shaders: None,
                animated: false,
            },
            Self::Triangle => SceneDescriptor {
                kind: self,
                mesh: Some(MeshData::triangle()),
                shaders: Some(ShaderSource::new(
                    sources::TRIANGLE_VERTEX_SRC,
                    sources::TRIANGLE_FRAGMENT_SRC,
                )),
                animated: false,
            },
            Self::Pyramid => SceneDescriptor {
                kind: self,
                mesh: Some(MeshData::pyramid()),
                shaders: Some(ShaderSource::new(
                    sources::PYRAMID_VERTEX_SRC,
                    sources::PYRAMID_FRAGMENT_SRC,
                )),
                animated: true,
            },
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RenderError::UnknownScene(s.to_string()))
    }
}

/// Everything that differs between scenes: geometry, program and whether the
/// frame updater runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescriptor {
    pub kind: SceneKind,
    pub mesh: Option<MeshData>,
    pub shaders: Option<ShaderSource>,
    pub animated: bool,
}
