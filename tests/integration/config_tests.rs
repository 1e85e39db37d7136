//! Integration tests for configuration loading and layering.

use npm_scripts::config::{
    generate_example_config, load_layers, load_options, load_options_from_path, Config, Options,
    RunScript, SelectBackend, Settings,
};
use npm_scripts::error::NpsError;
use npm_scripts::package::{PackageManager, ScanStrategy};

use crate::fixtures::{create_project_with_config, standard_scripts, write_file};

// ==================== Defaults ====================

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.select, SelectBackend::Auto);
    assert_eq!(config.select_script_prompt, "Select a script");
    assert_eq!(config.select_workspace_format_item, "{name}");
    assert!(config.workspace_script_solo_picker);
    assert_eq!(config.run_script, RunScript::Spawn);
}

#[test]
fn test_example_config_parses_to_defaults() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_file(temp.path(), "example.toml", &generate_example_config());

    let options = load_options_from_path(&path).unwrap();

    assert_eq!(Config::from_options(options), Config::default());
}

// ==================== Layering ====================

#[test]
fn test_user_project_and_flags() {
    let project = create_project_with_config(
        &standard_scripts(),
        "package_manager = \"pnpm\"\nselect_script_prompt = \"Project prompt\"\n",
    );
    let user = write_file(
        project.path(),
        "user/config.toml",
        "package_manager = \"yarn\"\nrun_script = \"print\"\nselect = \"plain\"\n",
    );

    let process = load_layers(Some(&user), &project.path().join(".npsrc.toml"));
    let settings = Settings::with_layer(process);
    let per_call = Options {
        select: Some(SelectBackend::Tui),
        ..Options::default()
    };
    let config = settings.resolve(&per_call);

    assert_eq!(config.package_manager, Some(PackageManager::Pnpm));
    assert_eq!(config.select_script_prompt, "Project prompt");
    assert_eq!(config.run_script, RunScript::Print);
    assert_eq!(config.select, SelectBackend::Tui);
    assert_eq!(config.scan_strategy, ScanStrategy::Auto);
}

#[test]
fn test_setup_replaces_previous_layer() {
    let mut settings = Settings::new();
    settings.setup(Options {
        package_manager: Some(PackageManager::Bun),
        workspace_script_solo_picker: Some(false),
        ..Options::default()
    });
    settings.setup(Options {
        select_workspace_prompt: Some("Which package?".to_string()),
        ..Options::default()
    });

    let config = settings.resolve(&Options::default());

    assert_eq!(config.package_manager, None);
    assert!(config.workspace_script_solo_picker);
    assert_eq!(config.select_workspace_prompt, "Which package?");
}

#[test]
fn test_per_call_layer_does_not_stick() {
    let settings = Settings::new();
    let per_call = Options {
        scan_strategy: Some(ScanStrategy::Walk),
        ..Options::default()
    };

    assert_eq!(settings.resolve(&per_call).scan_strategy, ScanStrategy::Walk);
    assert_eq!(settings.resolve(&Options::default()).scan_strategy, ScanStrategy::Auto);
}

// ==================== --config ====================

#[test]
fn test_cli_config_skips_project_file() {
    let project = create_project_with_config(&standard_scripts(), "package_manager = \"pnpm\"\n");
    let custom = write_file(project.path(), "custom.toml", "run_script = \"print\"\n");

    let options = load_options(Some(&custom), project.path()).unwrap();

    assert_eq!(options.run_script, Some(RunScript::Print));
    assert_eq!(options.package_manager, None);
}

#[test]
fn test_cli_config_errors() {
    let project = create_project_with_config(&standard_scripts(), "");
    let missing = project.path().join("missing.toml");
    let invalid = write_file(project.path(), "invalid.toml", "select = \"sometimes\"\n");

    assert!(matches!(
        load_options(Some(&missing), project.path()),
        Err(NpsError::InvalidConfig { .. })
    ));
    assert!(matches!(
        load_options(Some(&invalid), project.path()),
        Err(NpsError::InvalidConfig { .. })
    ));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let project = create_project_with_config(
        &standard_scripts(),
        "theme = \"dark\"\nrun_script = \"print\"\n",
    );

    let options = load_options_from_path(&project.path().join(".npsrc.toml")).unwrap();

    assert_eq!(
        options,
        Options {
            run_script: Some(RunScript::Print),
            ..Options::default()
        }
    );
}
