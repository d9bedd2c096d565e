use std::io::Write;

use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::config::{ManifestError, SeedManifest};
use crate::ext::{AsyncTryFrom, BestEffortPathExt};
use crate::filesystem::{FileSystem, FsError};
use crate::shell::{Script, ScriptError};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let mut fs = FileSystem::new();

        if let Some(seed) = &app_config.seed {
            let manifest = SeedManifest::async_try_from(seed.as_path())
                .await
                .context(SeedLoadSnafu)?;
            manifest.apply(&mut fs).context(SeedApplySnafu)?;
            info!("Seeded file system from {}", seed.best_effort_path_display());
        }

        let script = Script::async_try_from(app_config.script.as_path())
            .await
            .context(ScriptLoadSnafu)?;
        info!("Loaded {} commands", script.lines().len());

        let failures = Self::replay(
            &script,
            &mut fs,
            app_config.keep_going,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        )?;
        if failures > 0 {
            warn!("{} commands failed", failures);
        }

        Ok(())
    }

    /// Executes every script line in order, writing rendered results to `out`.
    ///
    /// A failing command aborts the replay unless `keep_going` is set, in
    /// which case it is reported to `err` and counted.
    fn replay(
        script: &Script,
        fs: &mut FileSystem,
        keep_going: bool,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<usize, ApplicationError> {
        let mut failures = 0;
        for line in script.lines() {
            debug!("Executing line {}: {:?}", line.number, line.command);
            match line.command.execute(fs) {
                Ok(output) => {
                    if let Some(text) = output.render() {
                        writeln!(out, "{text}").context(OutputSnafu)?;
                    }
                }
                Err(source) if keep_going => {
                    failures += 1;
                    let message = format!("line {}: {}", line.number, source);
                    writeln!(err, "{}", message.red()).context(OutputSnafu)?;
                }
                Err(source) => {
                    return Err(ApplicationError::CommandError {
                        line: line.number,
                        source,
                    });
                }
            }
        }
        Ok(failures)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load the seed manifest"))]
    SeedLoadError { source: ManifestError },
    #[snafu(display("Failed to build the tree described by the seed manifest"))]
    SeedApplyError { source: FsError },
    #[snafu(display("Failed to load the command script"))]
    ScriptLoadError { source: ScriptError },
    #[snafu(display("Command on line {} failed", line))]
    CommandError { line: usize, source: FsError },
    #[snafu(display("Failed to write command output"))]
    OutputError { source: std::io::Error },
}
