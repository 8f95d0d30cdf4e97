use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use wgpu::naga;

/// One half of a shader program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Two-letter tag used as a log prefix ("VS", "FS").
    pub fn tag(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VS",
            ShaderStage::Fragment => "FS",
        }
    }

    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors raised while loading, compiling or linking shader stages.
#[derive(Debug)]
pub enum ShaderError {
    /// The source file could not be opened or read.
    Open {
        stage: ShaderStage,
        path: PathBuf,
        source: io::Error,
    },
    /// The stage did not compile; `log` is the compiler diagnostic.
    Compile {
        stage: ShaderStage,
        origin: PathBuf,
        log: String,
    },
    /// A compiled stage was passed to the wrong side of a link.
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },
}

impl ShaderError {
    pub fn stage(&self) -> ShaderStage {
        match self {
            ShaderError::Open { stage, .. } | ShaderError::Compile { stage, .. } => *stage,
            ShaderError::StageMismatch { expected, .. } => *expected,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Open { stage, path, source } => {
                write!(f, "could not open {stage} shader file {}: {source}", path.display())
            }
            ShaderError::Compile { stage, origin, log } => write!(
                f,
                "{}> could not compile {}:\n{log}",
                stage.tag(),
                origin.display()
            ),
            ShaderError::StageMismatch { expected, found } => {
                write!(f, "expected a {expected} stage, got a {found} stage")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Open { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// GLSL source text for one stage, tagged with where it came from.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    stage: ShaderStage,
    origin: PathBuf,
    text: String,
}

impl ShaderSource {
    /// Reads the whole file at `path`.
    pub fn load(stage: ShaderStage, path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ShaderError::Open {
            stage,
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded {stage} shader {} ({} bytes)", path.display(), text.len());
        Ok(Self::from_text(stage, path, text))
    }

    /// Wraps in-memory source; `origin` only labels diagnostics.
    pub fn from_text(
        stage: ShaderStage,
        origin: impl Into<PathBuf>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            origin: origin.into(),
            text: text.into(),
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn compile_error(&self, log: String) -> ShaderError {
        ShaderError::Compile {
            stage: self.stage,
            origin: self.origin.clone(),
            log,
        }
    }
}

/// A stage that parsed and validated.
///
/// Only [`compile`] creates these, so holding one proves the stage compiled.
#[derive(Debug)]
pub struct CompiledStage {
    stage: ShaderStage,
    origin: PathBuf,
    entry_point: String,
    module: naga::Module,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    pub(crate) fn into_module(self) -> naga::Module {
        self.module
    }
}

/// Compiles one GLSL stage.
///
/// Parse and validation failures both come back as [`ShaderError::Compile`]
/// with naga's rendered diagnostic as the log.
pub fn compile(source: &ShaderSource) -> Result<CompiledStage, ShaderError> {
    let naga_stage = source.stage.to_naga();

    let mut frontend = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options::from(naga_stage);
    let module = frontend
        .parse(&options, &source.text)
        .map_err(|errors| source.compile_error(errors.emit_to_string(&source.text)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|err| source.compile_error(err.emit_to_string(&source.text)))?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == naga_stage)
        .map(|ep| ep.name.clone())
        .ok_or_else(|| source.compile_error(format!("no {} entry point", source.stage)))?;

    log::debug!(
        "compiled {} stage {} (entry `{entry_point}`)",
        source.stage,
        source.origin.display()
    );

    Ok(CompiledStage {
        stage: source.stage,
        origin: source.origin.clone(),
        entry_point,
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = "#version 450
layout(location = 0) in vec3 aPos;
void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

    const FRAG: &str = "#version 450
layout(location = 0) out vec4 FragColor;
void main() {
    FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

    fn data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/shaders/hello_texture")
    }

    #[test]
    fn valid_vertex_stage_compiles() {
        let src = ShaderSource::from_text(ShaderStage::Vertex, "inline.vert", VERT);
        let stage = compile(&src).unwrap();
        assert_eq!(stage.stage(), ShaderStage::Vertex);
        assert_eq!(stage.entry_point(), "main");
        assert_eq!(stage.origin(), Path::new("inline.vert"));
    }

    #[test]
    fn valid_fragment_stage_compiles() {
        let src = ShaderSource::from_text(ShaderStage::Fragment, "inline.frag", FRAG);
        let stage = compile(&src).unwrap();
        assert_eq!(stage.stage(), ShaderStage::Fragment);
        assert_eq!(stage.module().entry_points.len(), 1);
    }

    #[test]
    fn syntax_error_yields_compile_log() {
        let src = ShaderSource::from_text(
            ShaderStage::Vertex,
            "broken.vert",
            "#version 450\nvoid main() { this is not glsl }\n",
        );
        let err = compile(&src).unwrap_err();
        match &err {
            ShaderError::Compile { stage, origin, log } => {
                assert_eq!(*stage, ShaderStage::Vertex);
                assert_eq!(origin, Path::new("broken.vert"));
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("VS> could not compile broken.vert"));
    }

    #[test]
    fn missing_file_is_open_error() {
        let path = data_dir().join("does_not_exist.frag");
        let err = ShaderSource::load(ShaderStage::Fragment, &path).unwrap_err();
        match &err {
            ShaderError::Open { stage, path: p, source } => {
                assert_eq!(*stage, ShaderStage::Fragment);
                assert_eq!(p, &path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected open error, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn shipped_hello_texture_sources_compile() {
        let vert = ShaderSource::load(ShaderStage::Vertex, data_dir().join("texture.vert")).unwrap();
        let frag =
            ShaderSource::load(ShaderStage::Fragment, data_dir().join("texture.frag")).unwrap();
        assert!(compile(&vert).is_ok());
        assert!(compile(&frag).is_ok());
    }

    #[test]
    fn stage_tags() {
        assert_eq!(ShaderStage::Vertex.tag(), "VS");
        assert_eq!(ShaderStage::Fragment.tag(), "FS");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
