use std::path::{Path, PathBuf};

/// Locations of the two shader stage sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPaths {
    /// Directory name under `data/shaders/` holding this demo's sources.
    pub const DEMO_DIR: &'static str = "hello_texture";

    /// `<root>/data/shaders/hello_texture/texture.{vert,frag}`.
    pub fn hello_texture(root: impl AsRef<Path>) -> Self {
        let dir = root
            .as_ref()
            .join("data")
            .join("shaders")
            .join(Self::DEMO_DIR);
        Self {
            vertex: dir.join("texture.vert"),
            fragment: dir.join("texture.frag"),
        }
    }
}

impl Default for ShaderPaths {
    /// Resolved against the parent of the working directory, where the demo
    /// expects to be launched from a build subdirectory.
    fn default() -> Self {
        Self::hello_texture("..")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_texture_layout() {
        let p = ShaderPaths::hello_texture("/srv/kiln");
        assert_eq!(
            p.vertex,
            Path::new("/srv/kiln/data/shaders/hello_texture/texture.vert")
        );
        assert_eq!(
            p.fragment,
            Path::new("/srv/kiln/data/shaders/hello_texture/texture.frag")
        );
    }

    #[test]
    fn default_root_is_parent_directory() {
        let p = ShaderPaths::default();
        assert!(p.vertex.starts_with(".."));
        assert!(p.fragment.ends_with("texture.frag"));
    }
}
