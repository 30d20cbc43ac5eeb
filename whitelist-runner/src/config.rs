// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the whitelist interpreter.
//!
//! Configuration is read from `.config/whitelist.toml`, layered over a default config embedded
//! in this crate. Values passed on the command line take precedence over both.

use crate::{
    errors::{ConfigError, ConfigParseError, ConfigParseErrorKind},
    interpreter::InterpreterOptions,
};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Configuration for the whitelist interpreter, resolved from config files.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhitelistConfig {
    root: Utf8PathBuf,
    config_file: Utf8PathBuf,
    whitelist: Option<Utf8PathBuf>,
    output_file: Option<Utf8PathBuf>,
}

impl WhitelistConfig {
    /// The default location of the config file, relative to the root directory.
    pub const CONFIG_PATH: &'static str = ".config/whitelist.toml";

    /// Contains the default config as a TOML file.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the config from `file`, or from [`CONFIG_PATH`](Self::CONFIG_PATH) under `root` if
    /// no file is given.
    ///
    /// A missing config file at the default location is not an error; an explicitly specified
    /// file must exist. Relative paths in the config are resolved against `root`.
    ///
    /// `unknown_callback` is called with any keys in the file that aren't recognized.
    pub fn from_sources(
        root: impl Into<Utf8PathBuf>,
        file: Option<&Utf8Path>,
        mut unknown_callback: impl FnMut(&Utf8Path, &BTreeSet<String>),
    ) -> Result<Self, ConfigParseError> {
        let root = root.into();
        let (config_file, source) = match file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };
        debug!(config_file = %config_file, "reading whitelist config");

        let builder = Self::make_default_config().add_source(source);
        let (deserialized, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            unknown_callback(&config_file, &unknown);
        }

        let InterpretSection {
            whitelist,
            output_file,
        } = deserialized.interpret;
        Ok(Self {
            whitelist: whitelist.map(|path| root.join(path)),
            output_file: output_file.map(|path| root.join(path)),
            root,
            config_file,
        })
    }

    /// Returns the default config, without reading any files.
    pub fn default_config(root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        let builder = Self::make_default_config();
        let (deserialized, unknown) = match Self::build_and_deserialize_config(&builder) {
            Ok(data) => data,
            Err(error) => {
                panic!("default config should be valid: {error}");
            }
        };

        // Make sure that the default config doesn't have any unknown keys in it. These keys
        // would be embedded/shipped with this binary.
        if !unknown.is_empty() {
            panic!(
                "found unknown keys in default config: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            );
        }

        let InterpretSection {
            whitelist,
            output_file,
        } = deserialized.interpret;
        Self {
            config_file: root.join(Self::CONFIG_PATH),
            whitelist: whitelist.map(|path| root.join(path)),
            output_file: output_file.map(|path| root.join(path)),
            root,
        }
    }

    /// Returns the root directory relative paths are resolved against.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the config file that was consulted. It may not exist.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Returns the whitelist path from the config, if set.
    pub fn whitelist(&self) -> Option<&Utf8Path> {
        self.whitelist.as_deref()
    }

    /// Returns the output file from the config, if set.
    pub fn output_file(&self) -> Option<&Utf8Path> {
        self.output_file.as_deref()
    }

    /// Resolves the whitelist path and interpreter options, with command-line values taking
    /// precedence over the config.
    pub fn interpreter_args(
        &self,
        whitelist: Option<&Utf8Path>,
        output_file: Option<&Utf8Path>,
    ) -> Result<(Utf8PathBuf, InterpreterOptions), ConfigError> {
        let whitelist = whitelist
            .or(self.whitelist())
            .ok_or_else(|| ConfigError::NoWhitelist {
                config_file: self.config_file.clone(),
            })?;

        let mut options = InterpreterOptions::new();
        if let Some(output_file) = output_file.or(self.output_file()) {
            options = options.with_output_file(output_file);
        }

        Ok((whitelist.to_owned(), options))
    }

    // ---
    // Helper methods
    // ---

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(WhitelistConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: WhitelistConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // Both serde_path_to_error and the config crate report the key. Drop the key
                // from the config error so it's only reported once.
                let path = error.path().clone();
                let config_error = error.into_inner();
                let error = match config_error {
                    config::ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct WhitelistConfigDeserialize {
    #[serde(default)]
    interpret: InterpretSection,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct InterpretSection {
    #[serde(default)]
    whitelist: Option<Utf8PathBuf>,
    #[serde(default)]
    output_file: Option<Utf8PathBuf>,
}
