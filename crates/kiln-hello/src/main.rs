use std::process::ExitCode;

use winit::dpi::LogicalSize;

use kiln_engine::device::GpuInit;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::window::{Runtime, RuntimeConfig};

use kiln_hello::HelloTexture;

/// Process status for a finished run. The runtime has already logged any
/// failure, so nothing is printed here.
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Hello Texture".to_string(),
        initial_size: LogicalSize::new(1280.0, 720.0),
    };

    let result = Runtime::run(config, GpuInit::default(), HelloTexture::default());
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_exits_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn startup_failure_exits_nonzero() {
        let err = anyhow::anyhow!("VS> could not compile texture.vert");
        assert_eq!(exit_status(&Err(err)), 1);
    }
}
