//! End-to-end refreshes of the `native` project type through the core
//! orchestrator.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use git2::{IndexAddOption, Repository, Signature};
use initproject_adapters::{
    GitVcs, LocalFilesystem, MemoryFilesystem, PathToolLocator, StaticToolLocator, StaticVcs,
    TeraRenderer, builtin_registry,
};
use initproject_core::{
    application::{GenerationError, RefreshError},
    prelude::*,
};
use walkdir::WalkDir;

const SCENARIO: &str = "type: native\nout: ./demo\nlicense: mit\nname: Foo\n";

const FULL: &str = r#"
generator:
  type: native
name: Foo
prefix: foo_
copyright_years: "2024"
copyright_holder: Foo Corp
author_name: Jane Doe
author_email: jane@example.com
execution_types: [debug, release]
supported_paths:
  src:
    enable: true
    shaders: true
    config: true
  public_include: true
  build: true
  vendors: true
  test: false
share:
  enable: true
  license: zlib
"#;

fn memory_service(fs: &MemoryFilesystem, tools: StaticToolLocator) -> RefreshService {
    let fs: Arc<dyn Filesystem> = Arc::new(fs.clone());
    let resolver = TemplateResolver::new(Arc::new(TeraRenderer::new()), fs.clone(), "templates");
    RefreshService::new(fs, Arc::new(StaticVcs::new()), Arc::new(tools), resolver)
}

fn refresh_in_memory(
    fs: &MemoryFilesystem,
    tools: StaticToolLocator,
    yaml: &str,
) -> InitResult<()> {
    let config = Configuration::from_yaml_str(yaml)?;
    let project_type = builtin_registry().load(config.project_type()?)?;
    memory_service(fs, tools).refresh(RefreshRequest {
        config: &config,
        project_type: project_type.as_ref(),
        out_path: Path::new("demo"),
        config_source: None,
    })
}

#[test]
fn readme_and_mit_license_for_absent_output() {
    let fs = MemoryFilesystem::new();

    refresh_in_memory(&fs, StaticToolLocator::new(), SCENARIO).unwrap();

    let readme = fs.read_file("demo/README.md").unwrap();
    assert!(readme.starts_with("# Foo #\n"));
    let license = fs.read_file("demo/LICENSE").unwrap();
    assert!(license.contains("The MIT License"));
}

#[test]
fn bogus_license_writes_no_license() {
    let fs = MemoryFilesystem::new();
    let yaml = SCENARIO.replace("license: mit", "license: bogus");

    let err = refresh_in_memory(&fs, StaticToolLocator::new(), &yaml).unwrap_err();

    assert!(err.to_string().contains("Invalid license type"));
    assert!(matches!(
        err,
        InitError::Generation(GenerationError::InvalidLicense { .. })
    ));
    assert!(fs.read_file("demo/LICENSE").is_none());
    assert!(fs.read_file("demo/README.md").is_none());
}

#[test]
fn full_layout_is_generated() {
    let fs = MemoryFilesystem::new();
    let tools = StaticToolLocator::new().with_program("premake5");

    refresh_in_memory(&fs, tools, FULL).unwrap();

    for dir in [
        "demo/src/shaders",
        "demo/src/config",
        "demo/include",
        "demo/build",
        "demo/vendors/include",
        "demo/vendors/lib",
    ] {
        assert!(fs.is_dir(Path::new(dir)), "{dir} missing");
    }
    assert!(!fs.is_dir(Path::new("demo/test")));

    let header = fs.read_file("demo/src/config/foo_config.h").unwrap();
    assert!(header.contains(" * Foo Copyright (C) 2024 Foo Corp"));
    assert!(header.contains("// Debug\n//\n#if defined(DEBUG)\n#endif\n"));
    assert!(header.contains("#if defined(RELEASE)"));
    assert!(!header.contains("\n\n\n"));

    let license = fs.read_file("demo/LICENSE").unwrap();
    assert!(license.starts_with("zlib License\n\nCopyright (c) 2024 Foo Corp"));

    let readme = fs.read_file("demo/README.md").unwrap();
    assert!(readme.contains("Foo uses [Premake5]"));
    assert!(readme.contains("File [LICENSE](LICENSE) covers all files"));
    assert!(readme.contains("Foo by Jane Doe\n<jane@example.com>\n"));
    assert!(!readme.contains("twitter"));
}

#[test]
fn missing_premake_stops_refresh() {
    let fs = MemoryFilesystem::new();

    let err = refresh_in_memory(&fs, StaticToolLocator::new(), FULL).unwrap_err();

    assert_eq!(
        err,
        InitError::Refresh(RefreshError::Environment {
            messages: vec!["premake5 was not found in PATH.".into()]
        })
    );
    assert!(fs.read_file("demo/README.md").is_none());
}

#[test]
fn override_template_wins() {
    let fs = MemoryFilesystem::new().with_file("templates/README_md.tmpl", "custom {{ name|upper }}\n");

    refresh_in_memory(&fs, StaticToolLocator::new(), SCENARIO).unwrap();

    assert_eq!(fs.read_file("demo/README.md").as_deref(), Some("custom FOO\n"));
}

#[test]
fn unknown_project_type_is_a_load_error() {
    let fs = MemoryFilesystem::new();

    let err = refresh_in_memory(&fs, StaticToolLocator::new(), "type: cobol\n").unwrap_err();

    assert_eq!(err.to_string(), "invalid project type cobol. use --list-types");
    assert!(fs.list_files().is_empty());
}

// ── On-disk refreshes ────────────────────────────────────────────────────────

fn disk_service() -> RefreshService {
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resolver = TemplateResolver::new(
        Arc::new(TeraRenderer::new()),
        fs.clone(),
        "initproject-test-no-overrides",
    );
    RefreshService::new(fs, Arc::new(GitVcs::new()), Arc::new(PathToolLocator::new()), resolver)
}

fn refresh_on_disk(config_path: &Path, out_path: &Path) -> InitResult<()> {
    let source = fs::read_to_string(config_path).unwrap();
    let config = Configuration::from_yaml_str(&source)?;
    let project_type = builtin_registry().load(config.project_type()?)?;
    disk_service().refresh(RefreshRequest {
        config: &config,
        project_type: project_type.as_ref(),
        out_path,
        config_source: Some(config_path),
    })
}

fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .map(Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

fn commit_all(path: &Path) {
    let repo = Repository::init(path).unwrap();
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("initproject", "initproject@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "generated", &tree, &[])
        .unwrap();
}

#[test]
fn refresh_creates_tree_and_snapshot_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("project.yml");
    fs::write(&config_path, SCENARIO).unwrap();
    let out = dir.path().join("demo");

    refresh_on_disk(&config_path, &out).unwrap();

    assert_eq!(
        fs::read_to_string(out.join(".initproject.yml")).unwrap(),
        SCENARIO
    );
    assert!(fs::read_to_string(out.join("README.md")).unwrap().contains("Foo"));
    assert!(
        fs::read_to_string(out.join("LICENSE"))
            .unwrap()
            .contains("The MIT License")
    );
}

#[test]
fn refreshing_a_clean_repository_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("project.yml");
    fs::write(&config_path, SCENARIO).unwrap();
    let out = dir.path().join("demo");

    refresh_on_disk(&config_path, &out).unwrap();
    let first = snapshot_tree(&out);
    commit_all(&out);

    refresh_on_disk(&config_path, &out).unwrap();

    assert_eq!(snapshot_tree(&out), first);
    assert!(!GitVcs::new().is_dirty(&out).unwrap());
}

#[test]
fn refreshing_from_the_snapshot_keeps_it_intact() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("project.yml");
    fs::write(&config_path, SCENARIO).unwrap();
    let out = dir.path().join("demo");

    refresh_on_disk(&config_path, &out).unwrap();
    commit_all(&out);
    let first = snapshot_tree(&out);

    refresh_on_disk(&out.join(".initproject.yml"), &out).unwrap();

    assert_eq!(
        fs::read_to_string(out.join(".initproject.yml")).unwrap(),
        SCENARIO
    );
    assert_eq!(snapshot_tree(&out), first);
}

#[test]
fn dirty_repository_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("project.yml");
    fs::write(&config_path, SCENARIO).unwrap();
    let out = dir.path().join("demo");

    refresh_on_disk(&config_path, &out).unwrap();
    commit_all(&out);
    fs::write(out.join("README.md"), "local edits\n").unwrap();
    let before = snapshot_tree(&out);

    let err = refresh_on_disk(&config_path, &out).unwrap_err();

    assert!(err.to_string().contains("dirty working tree"));
    assert_eq!(snapshot_tree(&out), before);
}

#[test]
fn existing_plain_directory_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("project.yml");
    fs::write(&config_path, SCENARIO).unwrap();
    let out = dir.path().join("demo");
    fs::create_dir(&out).unwrap();

    let err = refresh_on_disk(&config_path, &out).unwrap_err();

    assert!(err.to_string().contains("exists but is not a repository"));
    assert!(snapshot_tree(&out).is_empty());
}
