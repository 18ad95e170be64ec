//! LaTeX compiler driver.
//!
//! Writes `<job>.tex` into a scratch directory and runs the external compiler
//! at most twice: strict first, permissive if strict left no usable PDF. An
//! attempt succeeds when `<job>.pdf` exists with non-zero size, regardless of
//! the compiler's exit status.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error preparing compilation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to launch compiler '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Compiler produced no output after {attempts} attempts")]
    NoOutput { attempts: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileMode {
    /// Stop at the first error.
    Strict,
    /// Run to the end and keep whatever output the compiler manages.
    Permissive,
}

impl CompileMode {
    fn flags(self) -> &'static [&'static str] {
        match self {
            CompileMode::Strict => &["-interaction=nonstopmode", "-halt-on-error"],
            CompileMode::Permissive => &["-interaction=batchmode"],
        }
    }
}

const ATTEMPTS: [CompileMode; 2] = [CompileMode::Strict, CompileMode::Permissive];

/// A compiled document, read into memory before the scratch directory is removed.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub bytes: Vec<u8>,
    pub mode: CompileMode,
}

/// Invokes `program [args...] <mode flags> -output-directory=<dir> -jobname=<job> <job>.tex`.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl LatexCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }

    pub async fn compile(&self, latex: &str, job_name: &str) -> Result<CompiledArtifact, CompileError> {
        let workdir = tempfile::Builder::new().prefix("cvforge-").tempdir()?;
        let tex_path = workdir.path().join(format!("{job_name}.tex"));
        let pdf_path = workdir.path().join(format!("{job_name}.pdf"));
        tokio::fs::write(&tex_path, latex).await?;

        for (attempt, mode) in ATTEMPTS.into_iter().enumerate() {
            self.run(mode, workdir.path(), job_name, &tex_path).await?;

            if let Some(bytes) = read_artifact(&pdf_path).await {
                info!(
                    "Compiled job {} in {:?} mode ({} bytes, attempt {}/{})",
                    job_name,
                    mode,
                    bytes.len(),
                    attempt + 1,
                    ATTEMPTS.len()
                );
                return Ok(CompiledArtifact { bytes, mode });
            }

            warn!(
                "Compile attempt {}/{} ({:?}) for job {} produced no output",
                attempt + 1,
                ATTEMPTS.len(),
                mode,
                job_name
            );
        }

        Err(CompileError::NoOutput {
            attempts: ATTEMPTS.len(),
        })
    }

    /// Runs one attempt. Non-zero exits and timeouts are logged, not returned:
    /// the artifact check decides success. Only a failure to launch is fatal.
    async fn run(
        &self,
        mode: CompileMode,
        dir: &Path,
        job_name: &str,
        tex_path: &Path,
    ) -> Result<(), CompileError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .args(mode.flags())
            .arg(format!("-output-directory={}", dir.display()))
            .arg(format!("-jobname={job_name}"))
            .arg(tex_path)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) if !output.status.success() => {
                warn!(
                    "Compiler exited with {} in {:?} mode: {}",
                    output.status,
                    mode,
                    String::from_utf8_lossy(&output.stderr)
                        .chars()
                        .take(500)
                        .collect::<String>()
                );
                Ok(())
            }
            Ok(Ok(_)) => Ok(()),
            Ok(Err(source)) => Err(CompileError::Spawn {
                program: self.program.clone(),
                source,
            }),
            Err(_) => {
                warn!(
                    "Compiler timed out after {}s in {:?} mode",
                    self.timeout.as_secs(),
                    mode
                );
                Ok(())
            }
        }
    }
}

/// The artifact's bytes if it exists and is non-empty.
async fn read_artifact(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Behaviours of the fake compiler script.
    pub(crate) const ALWAYS: &str = "always";
    pub(crate) const PERMISSIVE_ONLY: &str = "permissive_only";
    pub(crate) const NEVER: &str = "never";
    pub(crate) const EMPTY: &str = "empty";

    const FAKE_COMPILER: &str = r#"
behaviour="$1"; shift
dir=""; job=""; strict=0
for arg in "$@"; do
  case "$arg" in
    -output-directory=*) dir="${arg#*=}" ;;
    -jobname=*) job="${arg#*=}" ;;
    -halt-on-error) strict=1 ;;
  esac
done
case "$behaviour" in
  always) echo "PDF" > "$dir/$job.pdf" ;;
  permissive_only)
    if [ "$strict" = "1" ]; then echo "! Undefined control sequence." >&2; exit 1; fi
    echo "PDF" > "$dir/$job.pdf" ;;
  empty) : > "$dir/$job.pdf"; exit 1 ;;
  *) exit 1 ;;
esac
"#;

    /// A compiler backed by `sh` running a scripted fake. The returned TempDir
    /// must outlive the compiler.
    pub(crate) fn fake_compiler(behaviour: &str) -> (LatexCompiler, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-latex.sh");
        std::fs::write(&script, FAKE_COMPILER).unwrap();
        let compiler = LatexCompiler::new(
            "sh",
            vec![script.display().to_string(), behaviour.to_string()],
            Duration::from_secs(10),
        );
        (compiler, dir)
    }

    #[tokio::test]
    async fn test_strict_success_needs_one_attempt() {
        let (compiler, _dir) = fake_compiler(ALWAYS);
        let artifact = compiler.compile("\\documentclass{article}", "job1").await.unwrap();
        assert_eq!(artifact.mode, CompileMode::Strict);
        assert_eq!(artifact.bytes, b"PDF\n");
    }

    #[tokio::test]
    async fn test_falls_back_to_permissive_mode() {
        let (compiler, _dir) = fake_compiler(PERMISSIVE_ONLY);
        let artifact = compiler.compile("\\badmacro", "job2").await.unwrap();
        assert_eq!(artifact.mode, CompileMode::Permissive);
        assert!(!artifact.bytes.is_empty());
    }

    #[tokio::test]
    async fn test_both_attempts_failing_is_an_error() {
        let (compiler, _dir) = fake_compiler(NEVER);
        let err = compiler.compile("x", "job3").await.unwrap_err();
        assert!(matches!(err, CompileError::NoOutput { attempts: 2 }));
    }

    #[tokio::test]
    async fn test_zero_byte_output_counts_as_failure() {
        let (compiler, _dir) = fake_compiler(EMPTY);
        let err = compiler.compile("x", "job4").await.unwrap_err();
        assert!(matches!(err, CompileError::NoOutput { .. }));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let compiler = LatexCompiler::new(
            "/nonexistent/cvforge-latex",
            vec![],
            Duration::from_secs(1),
        );
        let err = compiler.compile("x", "job5").await.unwrap_err();
        assert!(matches!(err, CompileError::Spawn { .. }));
    }

    #[test]
    fn test_mode_flags() {
        assert!(CompileMode::Strict.flags().contains(&"-halt-on-error"));
        assert!(!CompileMode::Permissive.flags().contains(&"-halt-on-error"));
    }
}
