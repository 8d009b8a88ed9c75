//! Rendering Leiningen invocations as command lines

use std::borrow::Cow;
use std::fmt;

use lein_tasks_core::types::Environment;

use crate::args::{
    BikeshedArgs, CheckArgs, CljfmtArgs, CljstyleArgs, EastwoodArgs, EftestArgs, FormatMode,
    KibitArgs, ReleaseArgs, RunArgs, UberjarArgs,
};

/// One Leiningen invocation with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeinCall {
    Eastwood(EastwoodArgs),
    Check(CheckArgs),
    Kibit(KibitArgs),
    Cljfmt(CljfmtArgs),
    Bikeshed(BikeshedArgs),
    Cljstyle(CljstyleArgs),
    Uberjar(UberjarArgs),
    Release(ReleaseArgs),
    Run(RunArgs),
    Eftest(EftestArgs),
}

impl LeinCall {
    /// The Leiningen subcommand this call runs
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::Eastwood(_) => "eastwood",
            Self::Check(_) => "check",
            Self::Kibit(_) => "kibit",
            Self::Cljfmt(_) => "cljfmt",
            Self::Bikeshed(_) => "bikeshed",
            Self::Cljstyle(_) => "cljstyle",
            Self::Uberjar(_) => "uberjar",
            Self::Release(_) => "release",
            Self::Run(_) => "run",
            Self::Eftest(_) => "eftest",
        }
    }

    /// Render the call as a command line
    pub fn command_line(&self) -> CommandLine {
        let mut line = CommandLine::new(self.subcommand());

        match self {
            Self::Eastwood(args) => {
                line.push_opt(args.config.as_deref());
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Check(args) => line.with_profile(&args.profile, &args.environment),
            Self::Kibit(args) => {
                line.push_flag("--replace", args.replace);
                line.push_flag("--interactive", args.interactive);
                line.push_option("--reporter", args.reporter.as_deref());
                line.push_all(args.paths.as_deref());
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Cljfmt(args) => {
                line.push(args.mode.unwrap_or_default().as_str());
                line.push_all(args.paths.as_deref());
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Bikeshed(args) => {
                line.push_flag("--help-me", args.show_help);
                line.push_bool("--verbose", args.verbose);
                line.push_option(
                    "--max-line-length",
                    args.maximum_line_length.map(|n| n.to_string()).as_deref(),
                );
                line.push_bool("--long-lines", args.long_lines);
                line.push_bool("--trailing-whitespace", args.trailing_whitespace);
                line.push_bool("--trailing-blank-lines", args.trailing_blank_lines);
                line.push_bool("--var-redefs", args.var_redefs);
                line.push_bool("--docstrings", args.docstrings);
                line.push_bool("--name-collisions", args.name_collisions);
                line.push_option(
                    "--exclude-profiles",
                    args.exclude_profiles.as_ref().map(|p| p.join(",")).as_deref(),
                );
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Cljstyle(args) => {
                line.push(args.mode.unwrap_or(FormatMode::Check).as_str());
                line.push_all(args.paths.as_deref());
                line
            }
            Self::Uberjar(args) => {
                line.push_opt(args.main_namespace.as_deref());
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Release(args) => {
                line.push_opt(args.level.as_deref());
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Run(args) => {
                line.push_option("-m", args.main_function.as_deref());
                let quote = args.quote_arguments.unwrap_or(false);
                for argument in args.arguments.iter().flatten() {
                    if quote {
                        line.push(format!("\"{}\"", argument));
                    } else {
                        line.push(argument.as_str());
                    }
                }
                line.with_profile(&args.profile, &args.environment)
            }
            Self::Eftest(args) => {
                line.push_option(":only", args.only.as_deref());
                line.push_all(args.test_selectors.as_deref());
                line.push_all(args.namespaces.as_deref());
                line.push_all(args.files.as_deref());
                line.with_profile(&args.profile, &args.environment)
            }
        }
    }
}

/// A rendered `lein` command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    /// Profile to activate with `with-profile`
    pub profile: Option<String>,
    /// Subcommand (e.g., "eastwood")
    pub subcommand: String,
    /// Arguments after the subcommand
    pub arguments: Vec<String>,
    /// Variables overlaid on the inherited environment
    pub environment: Environment,
}

impl CommandLine {
    fn new(subcommand: &str) -> Self {
        Self {
            subcommand: subcommand.to_string(),
            ..Default::default()
        }
    }

    fn with_profile(mut self, profile: &Option<String>, environment: &Option<Environment>) -> Self {
        self.profile = profile.clone();
        self.environment = environment.clone().unwrap_or_default();
        self
    }

    fn push(&mut self, argument: impl Into<String>) {
        self.arguments.push(argument.into());
    }

    fn push_opt(&mut self, argument: Option<&str>) {
        if let Some(argument) = argument {
            self.push(argument);
        }
    }

    fn push_all(&mut self, arguments: Option<&[String]>) {
        self.arguments
            .extend(arguments.unwrap_or_default().iter().cloned());
    }

    /// `flag` when `value` is true
    fn push_flag(&mut self, flag: &str, value: Option<bool>) {
        if value == Some(true) {
            self.push(flag);
        }
    }

    /// `flag true` or `flag false` when `value` is set
    fn push_bool(&mut self, flag: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.push(flag);
            self.push(value.to_string());
        }
    }

    /// `flag value` when `value` is set
    fn push_option(&mut self, flag: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.push(flag);
            self.push(value);
        }
    }

    /// Arguments handed to the `lein` binary, profile selection included
    pub fn program_arguments(&self) -> Vec<String> {
        let mut arguments = Vec::with_capacity(self.arguments.len() + 3);
        if let Some(profile) = &self.profile {
            arguments.push("with-profile".to_string());
            arguments.push(profile.clone());
        }
        arguments.push(self.subcommand.clone());
        arguments.extend(self.arguments.iter().cloned());
        arguments
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.environment {
            write!(f, "{}={} ", key, shell_escape::escape(Cow::from(value.as_str())))?;
        }
        f.write_str("lein")?;
        for argument in self.program_arguments() {
            write!(f, " {}", shell_escape::escape(Cow::from(argument)))?;
        }
        Ok(())
    }
}
