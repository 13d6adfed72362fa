mod common;

use crate::common::{init_tracing, paths};

use std::error::Error;
use std::fs;

use tempfile::tempdir;

use stalecheck::errors::StalecheckError;
use stalecheck::filter::FilterCatalog;
use stalecheck::workflow::load_job_names;

type TestResult = Result<(), Box<dyn Error>>;

const CATALOG: &str = r#"
- name: "^build$"
  files: ["^src/.*\\.ts$"]
- name: "^docs$"
  files: ["^.*$"]
  skip-if:
    all-files-match-any: ["^docs/.*"]
"#;

#[test]
fn parses_and_validates_a_full_catalog() -> TestResult {
    init_tracing();

    let catalog = FilterCatalog::parse(CATALOG)?;
    assert_eq!(catalog.len(), 2);

    let build = catalog.resolve("build").expect("build resolves");
    assert!(build.is_relevant(&paths(&["src/a.ts"])));

    let docs = catalog.resolve("docs").expect("docs resolves");
    assert!(!docs.is_relevant(&paths(&["docs/a.md"])));
    assert!(docs.is_relevant(&paths(&["docs/a.md", "src/x.ts"])));
    Ok(())
}

#[test]
fn load_reads_catalog_from_disk_and_names_the_file_on_error() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("filters.yaml");
    fs::write(&path, CATALOG)?;
    let catalog = FilterCatalog::load(&path)?;
    assert_eq!(catalog.len(), 2);

    let missing = dir.path().join("nope.yaml");
    let err = FilterCatalog::load(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.yaml"));
    Ok(())
}

#[test]
fn entry_without_name_is_fatal() {
    init_tracing();

    let err = FilterCatalog::parse("- files: [\"^src/\"]\n").unwrap_err();
    assert!(matches!(err, StalecheckError::ConfigError(_)));
    assert!(err.to_string().contains("name"));
}

#[test]
fn entry_without_files_is_fatal() {
    init_tracing();

    let err = FilterCatalog::parse("- name: \"^build$\"\n").unwrap_err();
    assert!(err.to_string().contains("files"));

    let err = FilterCatalog::parse("- name: \"^build$\"\n  files: []\n").unwrap_err();
    assert!(err.to_string().contains("files"));
}

#[test]
fn non_list_files_is_fatal() {
    init_tracing();

    let err =
        FilterCatalog::parse("- name: \"^build$\"\n  files: \"^src/\"\n").unwrap_err();
    assert!(matches!(err, StalecheckError::ConfigError(_)));
}

#[test]
fn malformed_regex_is_fatal_at_load_time() {
    init_tracing();

    let err =
        FilterCatalog::parse("- name: \"^build$\"\n  files: [\"(unclosed\"]\n").unwrap_err();
    assert!(matches!(err, StalecheckError::PatternError { .. }));
    assert!(err.to_string().contains("(unclosed"));

    let err = FilterCatalog::parse(
        "- name: \"^docs$\"\n  files: [\"^.*$\"]\n  skip-if:\n    all-files-match-any: [\"(bad\"]\n",
    )
    .unwrap_err();
    assert!(matches!(err, StalecheckError::PatternError { .. }));
}

#[test]
fn empty_or_non_list_catalog_is_fatal() {
    init_tracing();

    assert!(FilterCatalog::parse("[]").is_err());
    assert!(FilterCatalog::parse("key: value\n").is_err());
}

#[test]
fn skip_if_without_patterns_behaves_as_absent() -> TestResult {
    init_tracing();

    let catalog = FilterCatalog::parse(
        "- name: \"^docs$\"\n  files: [\"^docs/\"]\n  skip-if:\n    all-files-match-any: []\n",
    )?;
    let docs = catalog.resolve("docs").expect("docs resolves");
    assert!(docs.is_relevant(&paths(&["docs/a.md"])));
    Ok(())
}

#[test]
fn workflow_job_names_keep_declared_order() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("workflow.yaml");
    fs::write(
        &path,
        "name: ci\njobs:\n  zeta:\n    runs-on: ubuntu\n  alpha:\n    runs-on: ubuntu\n  mid:\n    runs-on: ubuntu\n",
    )?;

    let jobs = load_job_names(&path)?;
    assert_eq!(jobs, ["zeta", "alpha", "mid"]);
    Ok(())
}

#[test]
fn workflow_without_jobs_section_is_fatal() -> TestResult {
    init_tracing();

    let dir = tempdir()?;

    let no_jobs = dir.path().join("no_jobs.yaml");
    fs::write(&no_jobs, "name: ci\n")?;
    let err = load_job_names(&no_jobs).unwrap_err();
    assert!(err.to_string().contains("jobs"));

    let null_jobs = dir.path().join("null_jobs.yaml");
    fs::write(&null_jobs, "jobs:\n")?;
    assert!(load_job_names(&null_jobs).is_err());

    let non_mapping = dir.path().join("non_mapping.yaml");
    fs::write(&non_mapping, "jobs: [a, b]\n")?;
    assert!(load_job_names(&non_mapping).is_err());
    Ok(())
}

#[test]
fn workflow_with_empty_jobs_mapping_yields_no_jobs() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let path = dir.path().join("workflow.yaml");
    fs::write(&path, "jobs: {}\n")?;
    assert!(load_job_names(&path)?.is_empty());
    Ok(())
}
