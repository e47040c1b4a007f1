//! On-disk transpiler test cases.
//!
//! A case directory under `tests/programs/` pairs a SpriteScript program
//! (`program.sps`) with the outcome the pipeline must produce for it,
//! described by `case.yaml`. Cases are validated at load time so a
//! malformed fixture fails the whole run instead of silently passing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;

pub const PROGRAM_FILE: &str = "program.sps";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    /// The program transpiles; the generated text must match the golden
    /// file named by `stdout_file`.
    TranspileSuccess,
    /// Tokenizing or parsing fails; the error must contain the fragment in
    /// `stderr_contains_file`.
    FrontendError,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BenchConfig {
    pub enabled: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedOutcome {
    pub exit_code: i32,
    pub stdout_file: Option<String>,
    pub stderr_contains_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    pub bench: BenchConfig,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    fn load(dir: PathBuf) -> Result<Self> {
        let name = match dir.file_name().and_then(|value| value.to_str()) {
            Some(name) => name.to_string(),
            None => bail!("Case directory {} has no usable name", dir.display()),
        };
        let raw = fs::read_to_string(dir.join("case.yaml"))
            .with_context(|| format!("Reading case.yaml for '{name}'"))?;
        let spec: CaseSpec =
            serde_yaml::from_str(&raw).with_context(|| format!("Parsing case.yaml for '{name}'"))?;
        let case = Self { name, dir, spec };
        case.validate()?;
        Ok(case)
    }

    /// Cross-field consistency checks that YAML decoding cannot express.
    fn validate(&self) -> Result<()> {
        ensure!(
            self.dir.join(PROGRAM_FILE).is_file(),
            "Case '{}' is missing {PROGRAM_FILE}",
            self.name
        );
        if self.spec.bench.enabled {
            ensure!(
                !self.spec.bench.tags.is_empty(),
                "Case '{}' enables bench without naming any tags",
                self.name
            );
        }
        match self.spec.class {
            CaseClass::TranspileSuccess => ensure!(
                self.spec.expected.exit_code == 0 && self.spec.expected.stdout_file.is_some(),
                "Case '{}' must expect exit code 0 and name a stdout_file",
                self.name
            ),
            CaseClass::FrontendError => ensure!(
                self.spec.expected.exit_code == 1
                    && self.spec.expected.stderr_contains_file.is_some(),
                "Case '{}' must expect exit code 1 and name a stderr_contains_file",
                self.name
            ),
        }
        Ok(())
    }

    /// SpriteScript source fed to the pipeline.
    pub fn source(&self) -> Result<String> {
        self.read(PROGRAM_FILE)
    }

    /// Golden generated output for a `transpile_success` case.
    pub fn expected_output(&self) -> Result<String> {
        let file = self
            .spec
            .expected
            .stdout_file
            .as_deref()
            .with_context(|| format!("Case '{}' has no stdout_file", self.name))?;
        self.read(file)
    }

    /// Error fragment the frontend must report for a `frontend_error` case.
    pub fn expected_error_fragment(&self) -> Result<String> {
        let file = self
            .spec
            .expected
            .stderr_contains_file
            .as_deref()
            .with_context(|| format!("Case '{}' has no stderr_contains_file", self.name))?;
        Ok(self.read(file)?.trim().to_string())
    }

    fn read(&self, relative: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative))
            .with_context(|| format!("Reading {relative} in case '{}'", self.name))
    }
}

/// Scan `programs_dir` for case directories, sorted by name. Directories
/// without a `case.yaml` are ignored so scratch files can sit alongside the
/// fixtures.
pub fn load_cases(programs_dir: &Path) -> Result<Vec<Case>> {
    let mut cases: Vec<Case> = fs::read_dir(programs_dir)
        .with_context(|| format!("Reading {}", programs_dir.display()))?
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let dir = entry.path();
                let is_case = dir.is_dir() && dir.join("case.yaml").is_file();
                is_case.then(|| Case::load(dir))
            }
            Err(error) => Some(Err(error.into())),
        })
        .collect::<Result<_>>()?;

    ensure!(
        !cases.is_empty(),
        "No test cases under {}",
        programs_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}
