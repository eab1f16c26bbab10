//! Parameter set construction and client command assembly.

use std::{borrow::Cow, ffi::OsString, fmt, path::PathBuf, process::Command};

use yarn_launch_config::{ContainerResources, LayoutSettings, ParamError, ParameterSet};

use crate::{config::LauncherConfig, paths::PathContext};

/// Build the fixed parameter set passed to the YARN client.
///
/// Pure: the same inputs always give the same set, in the same order.
#[must_use]
pub fn build_parameters(
    ctx: &PathContext,
    layout: &LayoutSettings,
    resources: &ContainerResources,
) -> ParameterSet {
    let mut params = ParameterSet::new();
    params.insert("jar", archive_path(ctx, layout));
    params.insert("launch_script_path", ctx.app_root.join(&layout.launch_script));
    params.insert("container_memory", resources.container_memory);
    params.insert("container_vcores", resources.container_vcores);
    params.insert("master_memory", resources.master_memory);
    params.insert("priority", resources.priority);
    params.insert("num_nodes", resources.num_nodes);
    params
}

fn archive_path(ctx: &PathContext, layout: &LayoutSettings) -> PathBuf {
    ctx.project_root.join(&layout.archive)
}

/// A fully built client invocation as an argv vector.
///
/// Arguments are kept as `OsString` so paths reach the child byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl LaunchCommand {
    /// Program followed by its arguments, lossily decoded for display.
    pub fn argv(&self) -> impl Iterator<Item = Cow<'_, str>> {
        std::iter::once(Cow::Borrowed(self.program.as_str()))
            .chain(self.args.iter().map(|arg| arg.to_string_lossy()))
    }

    /// Build a process command. Arguments are passed directly, never through a shell.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.argv().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write_shell_token(f, &token)?;
        }
        Ok(())
    }
}

/// Write a token so that pasting the output into `sh` reproduces it.
fn write_shell_token(f: &mut fmt::Formatter<'_>, token: &str) -> fmt::Result {
    let plain = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:,@+%".contains(c));
    if plain {
        return f.write_str(token);
    }
    write!(f, "'{}'", token.replace('\'', r"'\''"))
}

/// Assemble the client invocation:
/// `<binary> <subcommand> <archive> <entry_point> [--name value]*`.
pub fn build_command(
    ctx: &PathContext,
    config: &LauncherConfig,
) -> Result<LaunchCommand, CommandError> {
    let client = &config.client;
    for (field, value) in [
        ("client.binary", &client.binary),
        ("client.subcommand", &client.subcommand),
        ("client.entry_point", &client.entry_point),
    ] {
        if value.is_empty() {
            return Err(CommandError::EmptyField(field));
        }
    }

    let params = build_parameters(ctx, &config.layout, &config.resources);
    params.validate()?;

    let mut args: Vec<OsString> = vec![
        client.subcommand.clone().into(),
        archive_path(ctx, &config.layout).into_os_string(),
        client.entry_point.clone().into(),
    ];
    args.extend(params.to_cli_args());

    Ok(LaunchCommand {
        program: client.binary.clone(),
        args,
    })
}

/// Errors that can occur while assembling the command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error(transparent)]
    Param(#[from] ParamError),
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use yarn_launch_config::ParamValue;

    use super::*;

    fn repo_ctx() -> PathContext {
        PathContext::new("/repo/app", "/repo")
    }

    #[test]
    fn test_parameter_paths() {
        let params = build_parameters(
            &repo_ctx(),
            &LayoutSettings::default(),
            &ContainerResources::default(),
        );
        assert_eq!(
            params.get("jar"),
            Some(&ParamValue::Path("/repo/yarn/build/libs/yarn-0.5.jar".into()))
        );
        assert_eq!(
            params.get("launch_script_path"),
            Some(&ParamValue::Path(
                "/repo/app/yarn/local/yarn_example.py".into()
            ))
        );
    }

    #[test]
    fn test_parameter_keys_and_order() {
        let params = build_parameters(
            &repo_ctx(),
            &LayoutSettings::default(),
            &ContainerResources::default(),
        );
        assert_eq!(
            params.names().collect::<Vec<_>>(),
            vec![
                "jar",
                "launch_script_path",
                "container_memory",
                "container_vcores",
                "master_memory",
                "priority",
                "num_nodes",
            ]
        );
        for key in ["jar", "launch_script_path"] {
            match params.get(key) {
                Some(ParamValue::Path(p)) => assert!(p.is_absolute()),
                other => panic!("{key} should be a path, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_serialized_tokens_alternate() {
        let params = build_parameters(
            &repo_ctx(),
            &LayoutSettings::default(),
            &ContainerResources::default(),
        );
        let tokens = params.to_cli_args();
        assert_eq!(tokens.len(), 2 * params.len());
        for (pair, name) in tokens.chunks(2).zip(params.names()) {
            assert_eq!(pair[0], format!("--{name}").as_str());
            assert!(!pair[1].to_string_lossy().starts_with("--"));
        }
    }

    #[test]
    fn test_build_command_default() {
        let cmd = build_command(&repo_ctx(), &LauncherConfig::default()).unwrap();
        assert_eq!(cmd.program, "hadoop");
        assert_eq!(
            cmd.to_string(),
            "hadoop jar /repo/yarn/build/libs/yarn-0.5.jar cn.edu.buaa.act.petuumOnYarn.Client \
             --jar /repo/yarn/build/libs/yarn-0.5.jar \
             --launch_script_path /repo/app/yarn/local/yarn_example.py \
             --container_memory 500 --container_vcores 1 --master_memory 350 \
             --priority 10 --num_nodes 1"
        );
    }

    #[test]
    fn test_build_command_deterministic() {
        let config = LauncherConfig::default();
        let a = build_command(&repo_ctx(), &config).unwrap();
        let b = build_command(&repo_ctx(), &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_paths_with_spaces_stay_single_args() {
        let ctx = PathContext::new("/my repo/app", "/my repo");
        let cmd = build_command(&ctx, &LauncherConfig::default()).unwrap();
        assert_eq!(cmd.args[1], "/my repo/yarn/build/libs/yarn-0.5.jar");
        assert!(
            cmd.to_string()
                .contains("'/my repo/app/yarn/local/yarn_example.py'")
        );

        let process = cmd.to_command();
        assert_eq!(process.get_program(), "hadoop");
        assert_eq!(
            process.get_args().nth(1).map(Path::new),
            Some(Path::new("/my repo/yarn/build/libs/yarn-0.5.jar"))
        );
    }

    #[test]
    fn test_single_quote_escaped() {
        let cmd = LaunchCommand {
            program: "echo".into(),
            args: vec!["it's".into(), OsString::new()],
        };
        assert_eq!(cmd.to_string(), r"echo 'it'\''s' ''");
    }

    #[test]
    fn test_assignment_like_tokens_quoted() {
        let cmd = LaunchCommand {
            program: "FOO=bar".into(),
            args: vec!["--opt=1".into()],
        };
        assert_eq!(cmd.to_string(), "'FOO=bar' '--opt=1'");
    }

    #[test]
    fn test_empty_fields_rejected() {
        let mut config = LauncherConfig::default();
        config.client.entry_point.clear();
        assert!(matches!(
            build_command(&repo_ctx(), &config),
            Err(CommandError::EmptyField("client.entry_point"))
        ));

        let mut config = LauncherConfig::default();
        config.layout.launch_script.clear();
        let ctx = PathContext::new("", "/repo");
        assert!(matches!(
            build_command(&ctx, &config),
            Err(CommandError::Param(ParamError::Empty(name))) if name == "launch_script_path"
        ));
    }
}
