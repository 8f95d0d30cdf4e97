use anyhow::Result;

use kiln_engine::core::{AppControl, FrameCtx, InitCtx, Program};
use kiln_engine::input::{InputEvent, Key};
use kiln_engine::paint::Color;
use kiln_engine::render::{compile, CompiledStage, ShaderError, ShaderSource, ShaderStage};

use crate::paths::ShaderPaths;
use crate::triangle::TriangleRenderer;

/// Background the triangle is drawn over.
pub const CLEAR_COLOR: Color = Color::opaque(0.3, 0.2, 0.1);

/// The demo program.
pub struct HelloTexture {
    paths: ShaderPaths,
    renderer: Option<TriangleRenderer>,
}

impl HelloTexture {
    pub fn new(paths: ShaderPaths) -> Self {
        Self {
            paths,
            renderer: None,
        }
    }

    pub fn renderer(&self) -> Option<&TriangleRenderer> {
        self.renderer.as_ref()
    }

    /// Reads both sources, then compiles vertex and fragment in that order.
    ///
    /// Both files are opened before anything is compiled, so a missing
    /// fragment source fails without a compile attempt.
    pub fn load_stages(&self) -> Result<(CompiledStage, CompiledStage), ShaderError> {
        let vertex = ShaderSource::load(ShaderStage::Vertex, &self.paths.vertex)?;
        let fragment = ShaderSource::load(ShaderStage::Fragment, &self.paths.fragment)?;

        Ok((compile(&vertex)?, compile(&fragment)?))
    }
}

impl Default for HelloTexture {
    fn default() -> Self {
        Self::new(ShaderPaths::default())
    }
}

impl Program for HelloTexture {
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let (vertex, fragment) = self.load_stages()?;

        let rctx = ctx.render_ctx();
        self.renderer = Some(TriangleRenderer::new(&rctx, vertex, fragment)?);

        log::info!(
            "hello texture ready ({}, {})",
            self.paths.vertex.display(),
            self.paths.fragment.display()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Static triangle: ctx.time.dt is not needed.
        let Some(renderer) = self.renderer.as_ref() else {
            return AppControl::Continue;
        };
        ctx.render(CLEAR_COLOR, |rctx, target| renderer.render(rctx, target))
    }

    fn on_event(&mut self, event: &InputEvent) -> AppControl {
        if event.is_key_pressed(Key::Escape) {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    fn destroy(&mut self) {
        match self.renderer.take() {
            Some(renderer) => renderer.destroy(),
            None => log::warn!("destroy called with no live GPU resources"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use kiln_engine::input::{KeyState, Modifiers, PointerMoveEvent};

    use super::*;

    const BROKEN_VERT: &str = "#version 450\nvoid main() { gl_Position = nope; }\n";

    fn repo_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Writes `text` to a per-test file in the temp dir and returns its path.
    fn scratch(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kiln-hello-{}-{name}", std::process::id()));
        std::fs::write(&path, text).unwrap();
        path
    }

    fn key_event(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn escape_press_requests_exit() {
        let mut demo = HelloTexture::default();
        assert_eq!(
            demo.on_event(&key_event(Key::Escape, KeyState::Pressed)),
            AppControl::Exit
        );
    }

    #[test]
    fn other_events_are_ignored() {
        let mut demo = HelloTexture::default();
        for ev in [
            key_event(Key::Escape, KeyState::Released),
            key_event(Key::Space, KeyState::Pressed),
            InputEvent::Focused(false),
            InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }),
        ] {
            assert_eq!(demo.on_event(&ev), AppControl::Continue, "{ev:?}");
        }
    }

    #[test]
    fn shipped_sources_load_and_compile() {
        let demo = HelloTexture::new(ShaderPaths::hello_texture(repo_root()));
        let (vs, fs) = demo.load_stages().unwrap();
        assert_eq!(vs.stage(), ShaderStage::Vertex);
        assert_eq!(fs.stage(), ShaderStage::Fragment);
    }

    #[test]
    fn missing_fragment_fails_before_any_compile() {
        // The vertex source would not compile; getting an open error proves
        // compilation never started.
        let paths = ShaderPaths {
            vertex: scratch("broken-for-open.vert", BROKEN_VERT),
            fragment: repo_root().join("data/shaders/hello_texture/missing.frag"),
        };
        let err = HelloTexture::new(paths).load_stages().unwrap_err();
        assert!(
            matches!(err, ShaderError::Open { stage: ShaderStage::Fragment, .. }),
            "{err:?}"
        );
    }

    #[test]
    fn broken_vertex_stage_is_a_compile_error() {
        let paths = ShaderPaths {
            vertex: scratch("broken.vert", BROKEN_VERT),
            fragment: ShaderPaths::hello_texture(repo_root()).fragment,
        };
        let err = HelloTexture::new(paths).load_stages().unwrap_err();
        match err {
            ShaderError::Compile { stage, log, .. } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
    }

    #[test]
    fn destroy_before_init_is_harmless() {
        let mut demo = HelloTexture::default();
        demo.destroy();
        demo.destroy();
        assert!(demo.renderer().is_none());
    }

    #[test]
    fn clear_color_is_opaque_brown() {
        assert_eq!(CLEAR_COLOR, Color::opaque(0.3, 0.2, 0.1));
        assert_eq!(CLEAR_COLOR.a, 1.0);
    }
}
