//! `ql-gettext` entrypoint.
//!
//! Resolves messages and lists catalog languages the same way the player
//! does at runtime, which makes it handy for checking an installed or
//! freshly built locale tree.

use std::fs;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use quodlibet_i18n::{I18nConfig, I18nError, InitRequest, TranslationRegistry};
use thiserror::Error;

/// Look up Quod Libet translations from the command line.
#[derive(Parser, Debug)]
#[command(name = "ql-gettext")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Translate a message for German:\n",
    "    $ ql-gettext lookup --language de \"Play\"\n\n",
    "  Pick the plural form for a count:\n",
    "    $ ql-gettext lookup --plural \"%d songs\" --count 3 \"%d song\"\n\n",
    "  List languages shipped for a plugin domain:\n",
    "    $ ql-gettext languages --domain myplugin --dir ./po/locale",
))]
struct Cli {
    /// TOML configuration file for the registry.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the translation of a message.
    Lookup(LookupArgs),

    /// Print the languages with a catalog for a domain, one per line.
    Languages(DomainArgs),
}

#[derive(Args, Debug, Clone)]
struct DomainArgs {
    /// Translation domain [default: the configured domain].
    #[arg(short, long)]
    domain: Option<String>,

    /// Local locale directory to bind the domain to.
    #[arg(long, value_name = "DIR")]
    dir: Option<Utf8PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct LookupArgs {
    #[command(flatten)]
    domain: DomainArgs,

    /// Language to use instead of the environment's preference.
    #[arg(short, long)]
    language: Option<String>,

    /// Disambiguating context of the message.
    #[arg(long)]
    context: Option<String>,

    /// Plural form of the message.
    #[arg(long, requires = "count")]
    plural: Option<String>,

    /// Count selecting between the singular and plural form.
    #[arg(long, requires = "plural")]
    count: Option<u64>,

    /// Message to translate.
    msgid: String,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read configuration {path}: {source}")]
    ReadConfig {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    let cli = Cli::parse();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<(), CliError> {
    let config = load_config(cli)?;
    match &cli.command {
        Command::Lookup(args) => lookup(config, args, stdout),
        Command::Languages(args) => languages(config, args, stdout),
    }
}

fn load_config(cli: &Cli) -> Result<I18nConfig, CliError> {
    let Some(path) = &cli.config else {
        return Ok(I18nConfig::default());
    };
    let source = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    Ok(I18nConfig::from_toml_str(&source)?)
}

fn registry_for(
    mut config: I18nConfig,
    domain: &DomainArgs,
    language: Option<&str>,
) -> Result<(TranslationRegistry, String), CliError> {
    if let Some(name) = &domain.domain {
        config.domain.clone_from(name);
    }
    let name = config.domain.clone();

    let mut registry = TranslationRegistry::new(config);
    registry.initialise(InitRequest::new().language(language))?;
    registry.register(&name, domain.dir.as_deref())?;
    Ok((registry, name))
}

fn lookup(config: I18nConfig, args: &LookupArgs, stdout: &mut dyn Write) -> Result<(), CliError> {
    let (registry, _) = registry_for(config, &args.domain, args.language.as_deref())?;
    let msgid = args.msgid.as_str();

    let text = match (args.context.as_deref(), args.plural.as_deref(), args.count) {
        (Some(context), Some(plural), Some(count)) => {
            registry.npgettext(context, msgid, plural, count)
        }
        (None, Some(plural), Some(count)) => registry.ngettext(msgid, plural, count),
        (Some(context), _, _) => registry.pgettext(context, msgid),
        (None, _, _) => registry.gettext(msgid),
    };

    writeln!(stdout, "{text}")?;
    Ok(())
}

fn languages(
    config: I18nConfig,
    args: &DomainArgs,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let (registry, domain) = registry_for(config, args, None)?;
    for language in registry.available_languages(&domain) {
        writeln!(stdout, "{language}")?;
    }
    Ok(())
}

fn exit_code_for_run_result(result: Result<(), CliError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "ql-gettext: {message}").is_err() {
        // Nothing left to report to.
    }
}
