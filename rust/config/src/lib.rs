//! Configuration types shared between yarn-launch crates.

mod params;
mod settings;

pub use params::*;
pub use settings::*;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_resources_default() {
        let res = ContainerResources::default();
        assert_eq!(res.container_memory, 500);
        assert_eq!(res.container_vcores, 1);
        assert_eq!(res.master_memory, 350);
        assert_eq!(res.priority, 10);
        assert_eq!(res.num_nodes, 1);
    }

    #[test]
    fn test_client_and_layout_default() {
        let client = ClientSettings::default();
        assert_eq!(client.binary, "hadoop");
        assert_eq!(client.subcommand, "jar");
        assert_eq!(client.entry_point, "cn.edu.buaa.act.petuumOnYarn.Client");

        let layout = LayoutSettings::default();
        assert_eq!(layout.app_root_depth, 3);
        assert_eq!(layout.archive, "yarn/build/libs/yarn-0.5.jar");
        assert_eq!(layout.launch_script, "yarn/local/yarn_example.py");
    }

    #[test]
    fn test_partial_resources_fill_defaults() {
        let res: ContainerResources = toml::from_str("container_memory = 2048").unwrap();
        assert_eq!(res.container_memory, 2048);
        assert_eq!(res.master_memory, 350);
        assert_eq!(res.num_nodes, 1);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(toml::from_str::<ContainerResources>("container_mem = 1").is_err());
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut set = ParameterSet::new();
        set.insert("a", 1u64);
        set.insert("b", "two");
        set.insert("a", 3u64);
        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.get("a"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_to_cli_args_order() {
        let set: ParameterSet = [
            ("jar", ParamValue::Path(PathBuf::from("/p/a.jar"))),
            ("priority", ParamValue::Int(10)),
            ("mode", ParamValue::Str("fast".into())),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            set.to_cli_args(),
            vec!["--jar", "/p/a.jar", "--priority", "10", "--mode", "fast"]
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(ParameterSet::new().validate(), Err(ParamError::EmptySet));

        let mut set = ParameterSet::new();
        set.insert("num_nodes", 1u64);
        assert!(set.validate().is_ok());

        set.insert("launch_script_path", PathBuf::new());
        assert_eq!(
            set.validate(),
            Err(ParamError::Empty("launch_script_path".into()))
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_path_bytes_preserved() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let raw = OsStr::from_bytes(b"/re\xffpo/a.jar");
        let set: ParameterSet = [("jar", ParamValue::Path(raw.into()))].into_iter().collect();
        let args = set.to_cli_args();
        assert_eq!(args[1].as_bytes(), b"/re\xffpo/a.jar");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ParamValue::Int(500).to_string(), "500");
        assert_eq!(ParamValue::from("x y").to_string(), "x y");
        assert!(ParamValue::from("").is_empty());
        assert!(!ParamValue::Int(0).is_empty());
    }
}
