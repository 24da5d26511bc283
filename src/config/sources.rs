//! Source resolution: command-line flags, environment variables, defaults
//!
//! Each registered option resolves to exactly one value using a fixed
//! precedence:
//!
//! 1. the flag, when given explicitly on the command line
//! 2. the environment variable `{PREFIX}_{OPTION_NAME}`, when set and non-empty
//! 3. the compiled-in default from the option table
//!
//! Argv and the environment are captured once in [`Sources`]. Tests build
//! `Sources` by hand, so precedence can be exercised without touching the
//! process environment.
//!
//! # Example
//!
//! ```rust
//! use strata::config::options::{DB_HOST, DB_USER, OPTIONS};
//! use strata::config::sources::{resolve, Sources, ValueSource};
//!
//! # fn example() -> strata::domain::Result<()> {
//! let sources = Sources::new(
//!     ["strata", "--db-host", "db.internal"],
//!     [("STRATA_DB_HOST", "ignored"), ("STRATA_DB_USER", "svc")],
//! );
//! let raw = resolve(OPTIONS, &sources)?;
//!
//! assert_eq!(raw.text(DB_HOST)?, "db.internal");
//! assert_eq!(raw.source(DB_HOST), Some(ValueSource::Flag));
//! assert_eq!(raw.text(DB_USER)?, "svc");
//! # Ok(())
//! # }
//! ```

use super::options::{self, OptionKind, OptionSpec};
use crate::domain::{Result, StrataError};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fmt;
use std::path::Path;

/// Prefix used when the program name is unusable or longer than
/// [`MAX_PROGRAM_PREFIX_LEN`]
pub const FALLBACK_ENV_PREFIX: &str = "test";

/// Longest program name still used verbatim as the environment prefix
pub const MAX_PROGRAM_PREFIX_LEN: usize = 10;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Explicit command-line flag
    Flag,
    /// Environment variable
    Environment,
    /// Compiled-in default
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Flag => write!(f, "flag"),
            ValueSource::Environment => write!(f, "environment"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// String value
    Text(String),
    /// Integer value
    Integer(i64),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// A value together with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The effective value
    pub value: RawValue,
    /// Which layer supplied it
    pub source: ValueSource,
}

/// Resolved values keyed by canonical option name
///
/// Built once by [`resolve`] and never mutated afterwards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawValues {
    values: BTreeMap<&'static str, Resolved>,
}

impl RawValues {
    /// Get the full resolution record for an option
    pub fn get(&self, name: &str) -> Option<&Resolved> {
        self.values.get(name)
    }

    /// Which layer supplied an option
    pub fn source(&self, name: &str) -> Option<ValueSource> {
        self.get(name).map(|r| r.source)
    }

    /// Get a string option
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the option is unknown or not a string
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.get(name).map(|r| &r.value) {
            Some(RawValue::Text(s)) => Ok(s),
            Some(RawValue::Integer(_)) => Err(StrataError::Configuration(format!(
                "option '{name}' holds an integer, not a string"
            ))),
            None => Err(StrataError::Configuration(format!(
                "option '{name}' was not resolved"
            ))),
        }
    }

    /// Get an integer option
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the option is unknown or not an integer
    pub fn integer(&self, name: &str) -> Result<i64> {
        match self.get(name).map(|r| &r.value) {
            Some(RawValue::Integer(n)) => Ok(*n),
            Some(RawValue::Text(_)) => Err(StrataError::Configuration(format!(
                "option '{name}' holds a string, not an integer"
            ))),
            None => Err(StrataError::Configuration(format!(
                "option '{name}' was not resolved"
            ))),
        }
    }

    /// Iterate over all resolved options in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Resolved)> {
        self.values.iter().map(|(name, resolved)| (*name, resolved))
    }

    /// Number of resolved options
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Secret options are redacted so RawValues can be logged safely.
impl fmt::Debug for RawValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, resolved) in &self.values {
            if is_secret(name) {
                map.entry(name, &format_args!("[REDACTED] ({})", resolved.source));
            } else {
                map.entry(name, resolved);
            }
        }
        map.finish()
    }
}

fn is_secret(name: &str) -> bool {
    options::find(name).is_some_and(|opt| opt.secret)
}

/// Snapshot of the process inputs consulted during resolution
#[derive(Clone)]
pub struct Sources {
    args: Vec<OsString>,
    env: HashMap<String, String>,
    prefix: String,
}

// Argv and the environment may carry credentials; only shapes are shown.
impl fmt::Debug for Sources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sources")
            .field("args", &self.args.len())
            .field("env", &self.env.len())
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl Sources {
    /// Build sources from an explicit argument vector and environment
    ///
    /// `args` includes the program name as its first element. The
    /// environment prefix is derived from that name; see
    /// [`Sources::with_prefix`] to override it.
    pub fn new<A, T, E, K, V>(args: A, env: E) -> Self
    where
        A: IntoIterator<Item = T>,
        T: Into<OsString>,
        E: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let prefix = default_prefix(args.first());
        Self {
            args,
            env: env
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            prefix,
        }
    }

    /// Snapshot the current process argv and environment
    ///
    /// Environment entries that are not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::new(std::env::args_os(), env)
    }

    /// Override the environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The environment variable prefix in effect
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Environment value for an option, ignoring empty values
    fn env_value(&self, opt: &OptionSpec) -> Option<(String, &str)> {
        let key = opt.env_key(&self.prefix);
        let value = self.env.get(&key)?;
        if value.is_empty() {
            return None;
        }
        Some((key, value.as_str()))
    }
}

/// Derive the environment prefix from the program name
///
/// The basename of argv[0] is used when it is at most
/// [`MAX_PROGRAM_PREFIX_LEN`] characters, otherwise [`FALLBACK_ENV_PREFIX`].
pub fn default_prefix(program: Option<&OsString>) -> String {
    let name = program
        .and_then(|p| Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if name.is_empty() || name.chars().count() > MAX_PROGRAM_PREFIX_LEN {
        FALLBACK_ENV_PREFIX.to_string()
    } else {
        name
    }
}

/// Build the flag parser for an option table
///
/// No clap defaults are registered: an option is present in the matches
/// only when it was given on the command line.
pub fn command(options: &[OptionSpec]) -> Command {
    options.iter().fold(
        Command::new(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .about(env!("CARGO_PKG_DESCRIPTION")),
        |cmd, opt| cmd.arg(flag(opt)),
    )
}

fn flag(opt: &OptionSpec) -> Arg {
    let arg = Arg::new(opt.name)
        .long(opt.name)
        .short(opt.short)
        .help(opt.help)
        .action(ArgAction::Set)
        .num_args(1);

    match opt.kind {
        OptionKind::Text => arg.value_name("VALUE").value_parser(value_parser!(String)),
        OptionKind::Integer => arg
            .value_name("N")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64)),
    }
}

/// Resolve every option in `options` against `sources`
///
/// # Errors
///
/// - [`StrataError::Arguments`] for malformed command-line input
/// - [`StrataError::DisplayRequested`] when `--help` or `--version` was given
/// - [`StrataError::Configuration`] when an environment value cannot be
///   parsed for an integer option
///
/// No partial result is returned on failure.
pub fn resolve(options: &[OptionSpec], sources: &Sources) -> Result<RawValues> {
    let matches = command(options).try_get_matches_from(sources.args.iter().cloned())?;

    let mut values = BTreeMap::new();
    for opt in options {
        let resolved = resolve_one(opt, &matches, sources)?;
        values.insert(opt.name, resolved);
    }

    Ok(RawValues { values })
}

fn resolve_one(opt: &OptionSpec, matches: &ArgMatches, sources: &Sources) -> Result<Resolved> {
    if let Some(value) = flag_value(opt, matches)? {
        return Ok(Resolved {
            value,
            source: ValueSource::Flag,
        });
    }

    if let Some((key, raw)) = sources.env_value(opt) {
        let value = parse_value(opt, raw).map_err(|reason| {
            StrataError::Configuration(format!("environment variable {key}: {reason}"))
        })?;
        return Ok(Resolved {
            value,
            source: ValueSource::Environment,
        });
    }

    let value = parse_value(opt, opt.default).map_err(|reason| {
        StrataError::Configuration(format!("default for '{}': {reason}", opt.name))
    })?;
    Ok(Resolved {
        value,
        source: ValueSource::Default,
    })
}

fn flag_value(opt: &OptionSpec, matches: &ArgMatches) -> Result<Option<RawValue>> {
    let lookup_err = |e: clap::parser::MatchesError| {
        StrataError::Configuration(format!("flag '--{}': {e}", opt.name))
    };

    let value = match opt.kind {
        OptionKind::Text => matches
            .try_get_one::<String>(opt.name)
            .map_err(lookup_err)?
            .map(|s| RawValue::Text(s.clone())),
        OptionKind::Integer => matches
            .try_get_one::<i64>(opt.name)
            .map_err(lookup_err)?
            .map(|n| RawValue::Integer(*n)),
    };
    Ok(value)
}

fn parse_value(opt: &OptionSpec, raw: &str) -> std::result::Result<RawValue, String> {
    match opt.kind {
        OptionKind::Text => Ok(RawValue::Text(raw.to_string())),
        OptionKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(RawValue::Integer)
            .map_err(|e| format!("'{raw}' is not a valid integer ({e})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{
        AUTH_SECRET, DB_HOST, DB_PASSWORD, DB_PORT, DB_TYPE, LOG_LEVEL, OPTIONS,
    };
    use test_case::test_case;

    const NO_ENV: [(&str, &str); 0] = [];

    fn sources(args: &[&str], env: &[(&str, &str)]) -> Sources {
        let mut argv = vec!["test"];
        argv.extend_from_slice(args);
        Sources::new(argv, env.iter().copied())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let raw = resolve(OPTIONS, &sources(&[], &[])).unwrap();

        assert_eq!(raw.len(), OPTIONS.len());
        assert_eq!(raw.text(DB_TYPE).unwrap(), "mysql");
        assert_eq!(raw.text(DB_PORT).unwrap(), "");
        assert_eq!(raw.integer(LOG_LEVEL).unwrap(), 0);
        assert!(raw.iter().all(|(_, r)| r.source == ValueSource::Default));
    }

    #[test_case(&[], &[], "localhost", ValueSource::Default ; "neither")]
    #[test_case(&[], &[("TEST_DB_HOST", "env-host")], "env-host", ValueSource::Environment ; "env only")]
    #[test_case(&["-H", "flag-host"], &[], "flag-host", ValueSource::Flag ; "flag only")]
    #[test_case(&["--db-host", "flag-host"], &[("TEST_DB_HOST", "env-host")], "flag-host", ValueSource::Flag ; "flag beats env")]
    fn test_precedence(
        args: &[&str],
        env: &[(&str, &str)],
        expected: &str,
        expected_source: ValueSource,
    ) {
        let raw = resolve(OPTIONS, &sources(args, env)).unwrap();
        assert_eq!(raw.text(DB_HOST).unwrap(), expected);
        assert_eq!(raw.source(DB_HOST), Some(expected_source));
    }

    #[test]
    fn test_precedence_for_integer_option() {
        let raw = resolve(OPTIONS, &sources(&["-l", "3"], &[("TEST_LOG_LEVEL", "1")])).unwrap();
        assert_eq!(raw.integer(LOG_LEVEL).unwrap(), 3);

        let raw = resolve(OPTIONS, &sources(&[], &[("TEST_LOG_LEVEL", "1")])).unwrap();
        assert_eq!(raw.integer(LOG_LEVEL).unwrap(), 1);
        assert_eq!(raw.source(LOG_LEVEL), Some(ValueSource::Environment));
    }

    #[test]
    fn test_empty_env_value_falls_through_to_default() {
        let raw = resolve(OPTIONS, &sources(&[], &[("TEST_DB_TYPE", "")])).unwrap();
        assert_eq!(raw.text(DB_TYPE).unwrap(), "mysql");
        assert_eq!(raw.source(DB_TYPE), Some(ValueSource::Default));
    }

    #[test]
    fn test_explicit_empty_flag_wins() {
        let raw = resolve(OPTIONS, &sources(&["-P", ""], &[("TEST_DB_PORT", "1234")])).unwrap();
        assert_eq!(raw.text(DB_PORT).unwrap(), "");
        assert_eq!(raw.source(DB_PORT), Some(ValueSource::Flag));
    }

    #[test]
    fn test_env_for_other_prefix_is_ignored() {
        let raw = resolve(OPTIONS, &sources(&[], &[("OTHER_DB_HOST", "nope")])).unwrap();
        assert_eq!(raw.text(DB_HOST).unwrap(), "localhost");
    }

    #[test]
    fn test_custom_prefix() {
        let sources = Sources::new(["whatever"], [("MYAPP_DB_HOST", "db")]).with_prefix("myapp");
        let raw = resolve(OPTIONS, &sources).unwrap();
        assert_eq!(raw.text(DB_HOST).unwrap(), "db");
    }

    #[test]
    fn test_missing_flag_value_is_argument_error() {
        let err = resolve(OPTIONS, &sources(&["--db-host"], &[])).unwrap_err();
        assert!(matches!(err, StrataError::Arguments(_)));
    }

    #[test]
    fn test_unknown_flag_is_argument_error() {
        let err = resolve(OPTIONS, &sources(&["--db-nope", "x"], &[])).unwrap_err();
        assert!(matches!(err, StrataError::Arguments(_)));
    }

    #[test]
    fn test_non_integer_flag_is_argument_error() {
        let err = resolve(OPTIONS, &sources(&["-l", "loud"], &[])).unwrap_err();
        assert!(matches!(err, StrataError::Arguments(_)));
    }

    #[test]
    fn test_negative_integer_flag_is_accepted() {
        let raw = resolve(OPTIONS, &sources(&["-l", "-1"], &[])).unwrap();
        assert_eq!(raw.integer(LOG_LEVEL).unwrap(), -1);
    }

    #[test]
    fn test_non_integer_env_is_configuration_error() {
        let err = resolve(OPTIONS, &sources(&[], &[("TEST_LOG_LEVEL", "loud")])).unwrap_err();
        assert!(matches!(err, StrataError::Configuration(_)));
        assert!(err.to_string().contains("TEST_LOG_LEVEL"));
    }

    #[test]
    fn test_help_is_display_request() {
        let err = resolve(OPTIONS, &sources(&["--help"], &[])).unwrap_err();
        match err {
            StrataError::DisplayRequested(text) => assert!(text.contains("--db-type")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_typed_accessor_mismatch() {
        let raw = resolve(OPTIONS, &sources(&[], &[])).unwrap();
        assert!(raw.integer(DB_HOST).is_err());
        assert!(raw.text(LOG_LEVEL).is_err());
        assert!(raw.text("db-nope").is_err());
    }

    #[test]
    fn test_option_order_does_not_matter() {
        let src = sources(&["-d", "postgres"], &[("TEST_DB_USER", "svc")]);
        let forward = resolve(OPTIONS, &src).unwrap();

        let mut reversed: Vec<OptionSpec> = OPTIONS.to_vec();
        reversed.reverse();
        let backward = resolve(&reversed, &src).unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let raw = resolve(
            OPTIONS,
            &sources(&["-p", "hunter2"], &[("TEST_AUTH_SECRET", "s3cr3t")]),
        )
        .unwrap();
        let debug = format!("{raw:?}");

        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains(DB_PASSWORD));
        assert!(debug.contains(AUTH_SECRET));
        assert!(debug.contains("localhost"));
    }

    #[test_case("test", "test" ; "short name")]
    #[test_case("/usr/local/bin/strata", "strata" ; "basename")]
    #[test_case("some-very-long-binary-name", "test" ; "too long")]
    #[test_case("", "test" ; "empty")]
    fn test_default_prefix(program: &str, expected: &str) {
        assert_eq!(default_prefix(Some(&OsString::from(program))), expected);
    }

    #[test]
    fn test_default_prefix_without_args() {
        let sources = Sources::new(Vec::<OsString>::new(), NO_ENV);
        assert_eq!(sources.prefix(), FALLBACK_ENV_PREFIX);
    }
}
