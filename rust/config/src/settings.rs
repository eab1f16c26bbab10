//! Client, layout and container resource settings.

use serde::{Deserialize, Serialize};

/// Container and scheduling requests forwarded to the YARN client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContainerResources {
    /// Per-container memory reservation in MB.
    #[serde(default = "default_container_memory")]
    pub container_memory: u64,
    /// Per-container virtual core count.
    #[serde(default = "default_container_vcores")]
    pub container_vcores: u64,
    /// Application master memory reservation in MB.
    #[serde(default = "default_master_memory")]
    pub master_memory: u64,
    #[serde(default = "default_priority")]
    pub priority: u64,
    #[serde(default = "default_num_nodes")]
    pub num_nodes: u64,
}

fn default_container_memory() -> u64 {
    500
}
fn default_container_vcores() -> u64 {
    1
}
fn default_master_memory() -> u64 {
    350
}
fn default_priority() -> u64 {
    10
}
fn default_num_nodes() -> u64 {
    1
}

impl Default for ContainerResources {
    fn default() -> Self {
        Self {
            container_memory: default_container_memory(),
            container_vcores: default_container_vcores(),
            master_memory: default_master_memory(),
            priority: default_priority(),
            num_nodes: default_num_nodes(),
        }
    }
}

/// How the resource-manager client is invoked.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientSettings {
    /// Client executable, looked up on `PATH` when not absolute.
    #[serde(default = "default_binary")]
    pub binary: String,
    #[serde(default = "default_subcommand")]
    pub subcommand: String,
    /// Fully qualified class that drives job submission inside the archive.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
}

fn default_binary() -> String {
    "hadoop".into()
}
fn default_subcommand() -> String {
    "jar".into()
}
fn default_entry_point() -> String {
    "cn.edu.buaa.act.petuumOnYarn.Client".into()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            subcommand: default_subcommand(),
            entry_point: default_entry_point(),
        }
    }
}

/// Repository layout relative to the launcher's install location.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Number of `dirname` steps from the launcher file to the application root.
    #[serde(default = "default_app_root_depth")]
    pub app_root_depth: usize,
    /// Application archive, relative to the project root.
    #[serde(default = "default_archive")]
    pub archive: String,
    /// Worker entry-point script, relative to the application root.
    #[serde(default = "default_launch_script")]
    pub launch_script: String,
}

fn default_app_root_depth() -> usize {
    3
}
fn default_archive() -> String {
    "yarn/build/libs/yarn-0.5.jar".into()
}
fn default_launch_script() -> String {
    "yarn/local/yarn_example.py".into()
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            app_root_depth: default_app_root_depth(),
            archive: default_archive(),
            launch_script: default_launch_script(),
        }
    }
}
