//! Generation run: scan, render, then write every artifact or none.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::emit;
use crate::error::{GenerateError, GenerateResult};
use crate::naming;
use crate::scan::{self, AssetGroup};

/// What a successful run produced for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    /// Module name of the group.
    pub name: String,
    /// Group directory.
    pub dir: PathBuf,
    /// Path of the generated file.
    pub output: PathBuf,
    /// Asset identifiers in ordinal order.
    pub assets: Vec<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Generated groups, sorted by directory name.
    pub groups: Vec<GroupSummary>,
}

impl GenerateReport {
    /// Total number of assets across all groups.
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.groups.iter().map(|g| g.assets.len()).sum()
    }
}

/// Turns a directory tree into generated manifest sources.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator with a validated configuration.
    pub fn new(config: GeneratorConfig) -> GenerateResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one source file per asset group under `root`.
    ///
    /// `module_path` is the Rust path through which generated code reaches
    /// the `sndit` runtime. If any group fails, no file is written.
    pub fn generate(
        &self,
        root: impl AsRef<Path>,
        module_path: &str,
    ) -> GenerateResult<GenerateReport> {
        let root = root.as_ref();
        check_preconditions(root, module_path)?;

        let groups = scan::scan_root(root, &self.config.extensions)?;
        if groups.is_empty() {
            info!("No asset groups found under {}", root.display());
            return Ok(GenerateReport::default());
        }

        let rendered: Vec<(&AssetGroup, String)> = groups
            .iter()
            .map(|g| (g, emit::render(g, module_path, &self.config.type_name)))
            .collect();

        let report = self.write_all(&rendered)?;
        info!(
            "Generated {} groups ({} assets) under {}",
            report.groups.len(),
            report.asset_count(),
            root.display()
        );
        Ok(report)
    }

    /// Stages every artifact in a temp file next to its target, then moves
    /// them into place only once all of them were written.
    fn write_all(&self, rendered: &[(&AssetGroup, String)]) -> GenerateResult<GenerateReport> {
        let mut staged = Vec::with_capacity(rendered.len());
        for (group, source) in rendered {
            let target = group.dir.join(&self.config.output_file);
            let existing = existing_output(&target)?;
            let mut tmp =
                NamedTempFile::new_in(&group.dir).map_err(|e| GenerateError::io(&group.dir, e))?;
            tmp.write_all(source.as_bytes())
                .and_then(|()| tmp.flush())
                .map_err(|e| GenerateError::io(tmp.path(), e))?;
            if let Some(perms) = output_permissions(existing) {
                tmp.as_file()
                    .set_permissions(perms)
                    .map_err(|e| GenerateError::io(tmp.path(), e))?;
            }
            debug!("Staged {} at {}", target.display(), tmp.path().display());
            staged.push((tmp, target, *group));
        }

        let mut report = GenerateReport::default();
        for (tmp, target, group) in staged {
            tmp.persist(&target)
                .map_err(|e| GenerateError::io(&target, e.error))?;
            info!("Wrote {} ({} assets)", target.display(), group.assets.len());
            report.groups.push(GroupSummary {
                name: group.name.clone(),
                dir: group.dir.clone(),
                output: target,
                assets: group.assets.iter().map(|a| a.identifier.clone()).collect(),
            });
        }
        Ok(report)
    }
}

fn check_preconditions(root: &Path, module_path: &str) -> GenerateResult<()> {
    if module_path.trim().is_empty() {
        return Err(GenerateError::Precondition(
            "module path is required".to_string(),
        ));
    }
    if !naming::is_module_path(module_path) {
        return Err(GenerateError::Precondition(format!(
            "module path '{module_path}' is not a Rust path like `sndit` or `my_game::audio`"
        )));
    }
    if !root.is_dir() {
        return Err(GenerateError::Precondition(format!(
            "root directory '{}' does not exist or is not a directory",
            root.display()
        )));
    }
    Ok(())
}

/// Metadata of the artifact a run is about to replace.
///
/// Only a missing target or a regular file can be replaced. Anything else
/// would fail at persist time, after earlier groups were already moved.
fn existing_output(target: &Path) -> GenerateResult<Option<fs::Metadata>> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_file() => Ok(Some(meta)),
        Ok(_) => Err(GenerateError::io(
            target,
            io::Error::other("existing output is not a regular file"),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GenerateError::io(target, e)),
    }
}

/// Keeps the mode of an existing artifact; new artifacts get 0644 on unix.
fn output_permissions(existing: Option<fs::Metadata>) -> Option<fs::Permissions> {
    match existing {
        Some(meta) => Some(meta.permissions()),
        None => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"RIFF").expect("write fixture");
    }

    fn group_dir(root: &Path, name: &str, files: &[&str]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).expect("create group dir");
        for file in files {
            touch(&dir, file);
        }
        dir
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).expect("read generated file")
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .expect("list dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_generate_single_group() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = group_dir(temp.path(), "sfx_play", &["click.wav"]);

        let report = Generator::default()
            .generate(temp.path(), "sndit")
            .expect("generate");

        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].output, sfx.join("sounds_gen.rs"));
        let src = read(&sfx.join("sounds_gen.rs"));
        assert!(src.contains("pub const GROUP: &str = \"sfx_play\";"));
        assert!(src.contains("    Click = 0,"));
        assert!(src.contains("include_bytes!(\"click.wav\")"));
        assert_eq!(listing(&sfx), vec!["click.wav", "sounds_gen.rs"]);
    }

    #[test]
    fn test_generate_orders_by_file_name() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = group_dir(temp.path(), "sfx", &["click.wav", "beep.wav"]);

        let report = Generator::default()
            .generate(temp.path(), "sndit")
            .expect("generate");

        assert_eq!(report.groups[0].assets, vec!["Beep", "Click"]);
        let src = read(&sfx.join("sounds_gen.rs"));
        let beep = src.find("    Beep = 0,").expect("Beep constant");
        let click = src.find("    Click = 1,").expect("Click constant");
        assert!(beep < click);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = group_dir(temp.path(), "sfx", &["b.wav", "a.wav", "c-3.wav"]);
        let music = group_dir(temp.path(), "music", &["theme.wav"]);
        let generator = Generator::default();

        generator.generate(temp.path(), "sndit").expect("first run");
        let first = (read(&sfx.join("sounds_gen.rs")), read(&music.join("sounds_gen.rs")));
        generator.generate(temp.path(), "sndit").expect("second run");
        let second = (read(&sfx.join("sounds_gen.rs")), read(&music.join("sounds_gen.rs")));

        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_overwrites_previous_output() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = group_dir(temp.path(), "sfx", &["click.wav"]);
        fs::write(sfx.join("sounds_gen.rs"), "stale").expect("write stale output");

        Generator::default()
            .generate(temp.path(), "sndit")
            .expect("generate");

        assert!(read(&sfx.join("sounds_gen.rs")).starts_with(emit::HEADER));
    }

    #[test]
    fn test_collision_aborts_whole_run() {
        let temp = TempDir::new().expect("temp dir");
        let good = group_dir(temp.path(), "a_good", &["beep.wav"]);
        let bad = group_dir(temp.path(), "b_bad", &["Click.wav", "click.wav"]);

        let err = Generator::default()
            .generate(temp.path(), "sndit")
            .expect_err("collision");

        assert!(matches!(err, GenerateError::NameCollision { ref group, .. } if group == "b_bad"));
        assert_eq!(listing(&good), vec!["beep.wav"]);
        assert_eq!(listing(&bad), vec!["Click.wav", "click.wav"]);
    }

    #[test]
    fn test_unreplaceable_output_aborts_whole_run() {
        let temp = TempDir::new().expect("temp dir");
        let good = group_dir(temp.path(), "a_good", &["beep.wav"]);
        fs::write(good.join("sounds_gen.rs"), "previous").expect("write previous output");
        let bad = group_dir(temp.path(), "b_bad", &["click.wav"]);
        fs::create_dir(bad.join("sounds_gen.rs")).expect("create blocking dir");

        let err = Generator::default()
            .generate(temp.path(), "sndit")
            .expect_err("output is a directory");

        assert!(
            matches!(err, GenerateError::Io { ref path, .. } if *path == bad.join("sounds_gen.rs"))
        );
        assert_eq!(read(&good.join("sounds_gen.rs")), "previous");
        assert_eq!(listing(&good), vec!["beep.wav", "sounds_gen.rs"]);
        assert_eq!(listing(&bad), vec!["click.wav", "sounds_gen.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_output_is_not_replaced() {
        let temp = TempDir::new().expect("temp dir");
        let sfx = group_dir(temp.path(), "sfx", &["click.wav"]);
        let elsewhere = temp.path().join("elsewhere.rs");
        fs::write(&elsewhere, "untouched").expect("write link target");
        std::os::unix::fs::symlink(&elsewhere, sfx.join("sounds_gen.rs")).expect("symlink");

        let err = Generator::default()
            .generate(temp.path(), "sndit")
            .expect_err("output is a symlink");

        assert!(matches!(err, GenerateError::Io { .. }));
        assert_eq!(read(&elsewhere), "untouched");
    }

    #[test]
    fn test_skips_directories_without_audio() {
        let temp = TempDir::new().expect("temp dir");
        let docs = group_dir(temp.path(), "docs", &["readme.md"]);
        let empty = group_dir(temp.path(), "empty", &[]);
        group_dir(temp.path(), "sfx", &["click.wav"]);

        let report = Generator::default()
            .generate(temp.path(), "sndit")
            .expect("generate");

        assert_eq!(report.groups.len(), 1);
        assert_eq!(listing(&docs), vec!["readme.md"]);
        assert!(listing(&empty).is_empty());
    }

    #[test]
    fn test_empty_root_generates_nothing() {
        let temp = TempDir::new().expect("temp dir");
        let report = Generator::default()
            .generate(temp.path(), "sndit")
            .expect("generate");
        assert!(report.groups.is_empty());
        assert_eq!(report.asset_count(), 0);
    }

    #[test]
    fn test_module_path_is_required() {
        let temp = TempDir::new().expect("temp dir");
        group_dir(temp.path(), "sfx", &["click.wav"]);

        let err = Generator::default()
            .generate(temp.path(), "")
            .expect_err("missing module");
        assert!(matches!(err, GenerateError::Precondition(_)));

        let err = Generator::default()
            .generate(temp.path(), "github.com/hoani/game")
            .expect_err("invalid module");
        assert!(matches!(err, GenerateError::Precondition(_)));
    }

    #[test]
    fn test_missing_root_is_precondition() {
        let temp = TempDir::new().expect("temp dir");
        let err = Generator::default()
            .generate(temp.path().join("missing"), "sndit")
            .expect_err("missing root");
        assert!(matches!(err, GenerateError::Precondition(_)));
    }

    #[test]
    fn test_custom_config() {
        let temp = TempDir::new().expect("temp dir");
        let music = group_dir(temp.path(), "music", &["theme.ogg", "intro.wav"]);
        let config = GeneratorConfig {
            extensions: vec!["ogg".to_string()],
            output_file: "tracks.rs".to_string(),
            type_name: "Track".to_string(),
        };

        let report = Generator::new(config)
            .expect("valid config")
            .generate(temp.path(), "my_game::audio")
            .expect("generate");

        assert_eq!(report.groups[0].assets, vec!["Theme"]);
        let src = read(&music.join("tracks.rs"));
        assert!(src.contains("pub enum Track {"));
        assert!(src.contains("impl my_game::audio::SoundId for Track {"));
        assert!(!src.contains("intro.wav"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GeneratorConfig {
            extensions: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            Generator::new(config),
            Err(GenerateError::Config(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("temp dir");
        let sfx = group_dir(temp.path(), "sfx", &["click.wav"]);
        Generator::default()
            .generate(temp.path(), "sndit")
            .expect("generate");

        let mode = fs::metadata(sfx.join("sounds_gen.rs"))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
