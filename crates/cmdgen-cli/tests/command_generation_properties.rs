//! Property-based tests for `cmdgen command`

use clap::Parser;
use cmdgen_cli::{router::CommandRouter, Cli, Commands};
use proptest::prelude::*;
use tempfile::TempDir;

fn command_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,10}(/[a-z][a-zA-Z0-9_]{0,10}){0,2}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: every `--set` pair reaches the command unchanged
    #[test]
    fn prop_set_pairs_are_preserved(
        pairs in prop::collection::vec(("[a-z][a-z0-9_]{0,8}", "[a-zA-Z0-9=/ ]{0,12}"), 0..4),
    ) {
        let mut argv = vec!["cmdgen".to_string(), "command".to_string(), "ship".to_string()];
        for (key, value) in &pairs {
            argv.push("--set".to_string());
            argv.push(format!("{key}={value}"));
        }

        let cli = Cli::try_parse_from(&argv).unwrap();
        let Commands::Command(args) = cli.command;
        let command = CommandRouter::generate_command(&args);
        prop_assert_eq!(command.params, pairs);
    }

    /// Property: the bundled templates render for any valid name and leave
    /// no placeholder behind
    #[test]
    fn prop_bundled_templates_render_completely(name in command_name_strategy()) {
        let temp = TempDir::new().unwrap();
        let project_root = temp.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["cmdgen", "command", name.as_str(), "--project-root", project_root.as_str()]).unwrap();
        let Commands::Command(args) = cli.command;

        let report = CommandRouter::generate_command(&args).run().unwrap();
        prop_assert!(report.is_success());

        let base = temp.path().join("app/lib/commands");
        let top = std::fs::read_to_string(base.join(format!("{name}.liquid"))).unwrap();
        prop_assert!(!top.contains("<%="));
        let expected = format!("commands/{}/check", name);
        prop_assert!(top.contains(&expected));

        for file in ["build.liquid", "check.liquid", "execute.liquid"] {
            let content = std::fs::read_to_string(base.join(&name).join(file)).unwrap();
            prop_assert!(!content.contains("<%="));
        }
    }
}
